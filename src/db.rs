// ==========================================
// 夜市摊位库存系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 提供建表脚本（幂等），供应用启动与测试共用
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 建表（幂等）
///
/// 数值列不加类型约束：上游可能写入字符串，由仓储层统一做安全转换。
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS ingredients (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            unit TEXT NOT NULL,
            low_stock_days_override INTEGER,
            active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS ingredient_batches (
            id TEXT PRIMARY KEY,
            ingredient_id TEXT NOT NULL REFERENCES ingredients(id) ON DELETE CASCADE,
            qty_remaining,
            expiry_date TEXT,
            received_at TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_batches_ingredient
            ON ingredient_batches(ingredient_id);

        CREATE TABLE IF NOT EXISTS menu_items (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS menu_variants (
            id TEXT PRIMARY KEY,
            menu_item_id TEXT NOT NULL REFERENCES menu_items(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            price,
            baseline_daily
        );

        CREATE TABLE IF NOT EXISTS recipe_items (
            variant_id TEXT NOT NULL REFERENCES menu_variants(id) ON DELETE CASCADE,
            ingredient_id TEXT NOT NULL REFERENCES ingredients(id) ON DELETE CASCADE,
            qty_per_serving
        );

        CREATE TABLE IF NOT EXISTS forecast_settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            dow_multipliers TEXT,
            weather_multipliers TEXT,
            holiday_multipliers TEXT,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS demo_context (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            enabled INTEGER NOT NULL DEFAULT 0,
            demo_date TEXT,
            weather TEXT,
            is_public_holiday INTEGER NOT NULL DEFAULT 0,
            local_event_label TEXT
        );

        CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            on_date TEXT NOT NULL,
            type TEXT NOT NULL,
            label TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_events_on_date ON events(on_date);
        "#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN \
                 ('ingredients','ingredient_batches','menu_items','menu_variants', \
                  'recipe_items','forecast_settings','demo_context','events')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 8);
    }
}
