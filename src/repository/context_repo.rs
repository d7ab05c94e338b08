// ==========================================
// 夜市摊位库存系统 - 计划日上下文数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 表: demo_context（单行, id = 1） / events
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::context::{CalendarEvent, DemoOverride};
use crate::domain::types::{EventType, WeatherKey};
use crate::engine::context_resolver::ContextSource;
use crate::repository::coerce::{parse_date, sql_bool, sql_date, sql_text};
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// ContextRepository - 演示覆写与日历事件
// ==========================================
pub struct ContextRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ContextRepository {
    /// 创建新的 ContextRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // demo_context
    // ==========================================

    /// 读取演示覆写行（不存在返回 None）
    ///
    /// 无法识别的天气值置为 None
    pub fn get_demo_override(&self) -> RepositoryResult<Option<DemoOverride>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT enabled, demo_date, weather, is_public_holiday, local_event_label
            FROM demo_context
            WHERE id = 1
            "#,
        )?;

        let result = stmt.query_row([], |row| {
            let weather = sql_text(&row.get::<_, SqlValue>(2)?);
            Ok(DemoOverride {
                enabled: sql_bool(&row.get::<_, SqlValue>(0)?),
                demo_date: sql_date(&row.get::<_, SqlValue>(1)?),
                weather: weather.as_deref().and_then(WeatherKey::parse),
                is_public_holiday: sql_bool(&row.get::<_, SqlValue>(3)?),
                local_event_label: sql_text(&row.get::<_, SqlValue>(4)?),
            })
        });

        match result {
            Ok(demo) => Ok(Some(demo)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 写入演示覆写（存在则覆盖）
    pub fn upsert_demo_override(&self, demo: &DemoOverride) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO demo_context (id, enabled, demo_date, weather, is_public_holiday, local_event_label)
            VALUES (1, ?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                enabled = excluded.enabled,
                demo_date = excluded.demo_date,
                weather = excluded.weather,
                is_public_holiday = excluded.is_public_holiday,
                local_event_label = excluded.local_event_label
            "#,
            params![
                demo.enabled as i64,
                demo.demo_date.map(|d| d.format("%Y-%m-%d").to_string()),
                demo.weather.map(|w| w.as_str()),
                demo.is_public_holiday as i64,
                demo.local_event_label,
            ],
        )?;
        Ok(())
    }

    /// 清除演示覆写
    pub fn delete_demo_override(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM demo_context WHERE id = 1", [])?;
        Ok(affected)
    }

    // ==========================================
    // events
    // ==========================================

    /// 查询指定日期的日历事件（按插入顺序）
    pub fn list_events_on(&self, date: NaiveDate) -> RepositoryResult<Vec<CalendarEvent>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT on_date, type, label
            FROM events
            WHERE substr(on_date, 1, 10) = ?1
            ORDER BY id ASC
            "#,
        )?;

        let rows = stmt
            .query_map(params![date.format("%Y-%m-%d").to_string()], |row| {
                let on_date: String = row.get(0)?;
                let event_type: String = row.get(1)?;
                Ok((on_date, event_type, sql_text(&row.get::<_, SqlValue>(2)?)))
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        let events = rows
            .into_iter()
            .map(|(on_date, event_type, label)| CalendarEvent {
                on_date: parse_date(&on_date).unwrap_or(date),
                event_type: EventType::from_db_str(&event_type),
                label,
            })
            .collect();

        Ok(events)
    }

    /// 新增日历事件
    pub fn insert_event(&self, event: &CalendarEvent) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO events (on_date, type, label) VALUES (?1, ?2, ?3)",
            params![
                event.on_date.format("%Y-%m-%d").to_string(),
                event.event_type.to_db_str(),
                event.label,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }
}

#[async_trait]
impl ContextSource for ContextRepository {
    async fn find_demo_override(&self) -> RepositoryResult<Option<DemoOverride>> {
        self.get_demo_override()
    }

    async fn find_events_on(&self, date: NaiveDate) -> RepositoryResult<Vec<CalendarEvent>> {
        self.list_events_on(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{configure_sqlite_connection, init_schema};

    fn setup() -> ContextRepository {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        ContextRepository::from_connection(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_demo_override_upsert_and_clear() {
        let repo = setup();
        assert!(repo.get_demo_override().unwrap().is_none());

        let demo = DemoOverride {
            enabled: true,
            demo_date: NaiveDate::from_ymd_opt(2025, 6, 15),
            weather: Some(WeatherKey::Hot),
            is_public_holiday: true,
            local_event_label: None,
        };
        repo.upsert_demo_override(&demo).unwrap();
        assert_eq!(repo.get_demo_override().unwrap(), Some(demo.clone()));

        let disabled = DemoOverride {
            enabled: false,
            ..demo
        };
        repo.upsert_demo_override(&disabled).unwrap();
        assert!(!repo.get_demo_override().unwrap().unwrap().enabled);

        assert_eq!(repo.delete_demo_override().unwrap(), 1);
        assert!(repo.get_demo_override().unwrap().is_none());
    }

    #[test]
    fn test_unknown_weather_reads_as_none() {
        let repo = setup();
        {
            let conn = repo.get_conn().unwrap();
            conn.execute(
                "INSERT INTO demo_context (id, enabled, demo_date, weather) VALUES (1, 1, '2025-06-15', 'snow')",
                [],
            )
            .unwrap();
        }
        let demo = repo.get_demo_override().unwrap().unwrap();
        assert_eq!(demo.weather, None);
        assert_eq!(demo.demo_date, NaiveDate::from_ymd_opt(2025, 6, 15));
    }

    #[test]
    fn test_events_filtered_by_date_in_insert_order() {
        let repo = setup();
        let day = NaiveDate::from_ymd_opt(2025, 8, 31).unwrap();
        let other = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();

        for (date, ty, label) in [
            (day, EventType::LocalEvent, Some("Pesta Tanglung")),
            (other, EventType::PublicHoliday, None),
            (day, EventType::PublicHoliday, Some("Hari Merdeka")),
        ] {
            repo.insert_event(&CalendarEvent {
                on_date: date,
                event_type: ty,
                label: label.map(str::to_string),
            })
            .unwrap();
        }

        let events = repo.list_events_on(day).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type, EventType::LocalEvent);
        assert_eq!(events[0].label.as_deref(), Some("Pesta Tanglung"));
        assert_eq!(events[1].event_type, EventType::PublicHoliday);
    }
}
