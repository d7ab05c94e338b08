// ==========================================
// 夜市摊位库存系统 - 预测权重配置仓储
// ==========================================
// 表: forecast_settings（单行, id = 1）
// 存储: 三个 JSON 文本列, 原样读出, 不做键级校验
// 键级转换与默认值由 ForecastSettingsProvider 负责
// ==========================================

use crate::config::forecast_settings::{RawForecastSettings, SettingsSource};
use crate::db::open_sqlite_connection;
use crate::domain::forecast::ForecastSettings;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, Connection};
use serde_json::Value as JsonValue;
use std::sync::{Arc, Mutex};

// ==========================================
// ForecastSettingsRepository
// ==========================================
pub struct ForecastSettingsRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ForecastSettingsRepository {
    /// 创建新的 ForecastSettingsRepository 实例
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

    /// 读取配置行（不存在返回 None）
    ///
    /// 列内容不是合法 JSON 时该类别为 None
    pub fn get_raw(&self) -> RepositoryResult<Option<RawForecastSettings>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT dow_multipliers, weather_multipliers, holiday_multipliers
            FROM forecast_settings
            WHERE id = 1
            "#,
        )?;

        let result = stmt.query_row([], |row| {
            Ok(RawForecastSettings {
                dow: parse_json_column(&row.get::<_, SqlValue>(0)?),
                weather: parse_json_column(&row.get::<_, SqlValue>(1)?),
                holiday: parse_json_column(&row.get::<_, SqlValue>(2)?),
            })
        });

        match result {
            Ok(raw) => Ok(Some(raw)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 保存完整权重表（存在则覆盖）
    pub fn save(&self, settings: &ForecastSettings) -> RepositoryResult<()> {
        let dow = serde_json::to_string(&settings.dow)
            .map_err(|e| RepositoryError::InternalError(e.to_string()))?;
        let weather = serde_json::to_string(&settings.weather)
            .map_err(|e| RepositoryError::InternalError(e.to_string()))?;
        let holiday = serde_json::to_string(&settings.holiday)
            .map_err(|e| RepositoryError::InternalError(e.to_string()))?;

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO forecast_settings (id, dow_multipliers, weather_multipliers, holiday_multipliers, updated_at)
            VALUES (1, ?1, ?2, ?3, datetime('now'))
            ON CONFLICT(id) DO UPDATE SET
                dow_multipliers = excluded.dow_multipliers,
                weather_multipliers = excluded.weather_multipliers,
                holiday_multipliers = excluded.holiday_multipliers,
                updated_at = excluded.updated_at
            "#,
            params![dow, weather, holiday],
        )?;
        Ok(())
    }
}

fn parse_json_column(value: &SqlValue) -> Option<JsonValue> {
    match value {
        SqlValue::Text(s) => serde_json::from_str(s).ok(),
        _ => None,
    }
}

#[async_trait]
impl SettingsSource for ForecastSettingsRepository {
    async fn find_forecast_settings(&self) -> RepositoryResult<Option<RawForecastSettings>> {
        self.get_raw()
    }
}
