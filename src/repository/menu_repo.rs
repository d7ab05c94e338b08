// ==========================================
// 夜市摊位库存系统 - 菜单与配方数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 表: menu_items / menu_variants / recipe_items
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::catalog::{MenuVariant, RecipeItem};
use crate::repository::coerce::{sql_number_or, sql_text};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// MenuRepository - 菜单规格/配方仓储
// ==========================================
pub struct MenuRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MenuRepository {
    /// 创建新的 MenuRepository 实例
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

    /// 查询全部菜单规格（关联菜单项名称）
    ///
    /// price / baseline_daily 非数字时按 0 处理
    pub fn list_variants(&self) -> RepositoryResult<Vec<MenuVariant>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT v.id, v.menu_item_id, v.name, v.price, v.baseline_daily, m.name
            FROM menu_variants v
            LEFT JOIN menu_items m ON m.id = v.menu_item_id
            ORDER BY m.name ASC, v.name ASC
            "#,
        )?;

        let variants = stmt
            .query_map([], |row| {
                Ok(MenuVariant {
                    id: row.get(0)?,
                    menu_item_id: row.get(1)?,
                    name: row.get(2)?,
                    price: sql_number_or(&row.get::<_, SqlValue>(3)?, 0.0),
                    baseline_daily: sql_number_or(&row.get::<_, SqlValue>(4)?, 0.0),
                    item_name: sql_text(&row.get::<_, SqlValue>(5)?),
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(variants)
    }

    /// 查询全部配方行
    ///
    /// qty_per_serving 非数字时按 0 处理（后续被预测引擎跳过）
    pub fn list_recipe_items(&self) -> RepositoryResult<Vec<RecipeItem>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT variant_id, ingredient_id, qty_per_serving
            FROM recipe_items
            "#,
        )?;

        let items = stmt
            .query_map([], |row| {
                Ok(RecipeItem {
                    variant_id: row.get(0)?,
                    ingredient_id: row.get(1)?,
                    qty_per_serving: sql_number_or(&row.get::<_, SqlValue>(2)?, 0.0),
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(items)
    }
}
