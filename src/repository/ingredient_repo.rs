// ==========================================
// 夜市摊位库存系统 - 原料与批次数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 表: ingredients / ingredient_batches
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::catalog::{Ingredient, IngredientBatch};
use crate::repository::coerce::{sql_date, sql_integer, sql_number_or, sql_text};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// IngredientRepository - 原料仓储
// ==========================================
pub struct IngredientRepository {
    conn: Arc<Mutex<Connection>>,
}

impl IngredientRepository {
    /// 创建新的 IngredientRepository 实例
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

    /// 查询所有启用的原料（按名称排序）
    pub fn list_active(&self) -> RepositoryResult<Vec<Ingredient>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, unit, low_stock_days_override
            FROM ingredients
            WHERE active <> 0
            ORDER BY name ASC
            "#,
        )?;

        let ingredients = stmt
            .query_map([], map_ingredient)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(ingredients)
    }

    /// 按主键查询
    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Ingredient>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, unit, low_stock_days_override
            FROM ingredients
            WHERE id = ?1
            "#,
        )?;

        match stmt.query_row(params![id], map_ingredient) {
            Ok(ingredient) => Ok(Some(ingredient)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 新建原料
    pub fn create(&self, ingredient: &Ingredient) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO ingredients (id, name, unit, low_stock_days_override)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                ingredient.id,
                ingredient.name,
                ingredient.unit,
                ingredient.low_stock_days_override,
            ],
        )?;
        Ok(())
    }
}

fn map_ingredient(row: &Row<'_>) -> SqliteResult<Ingredient> {
    Ok(Ingredient {
        id: row.get(0)?,
        name: row.get(1)?,
        unit: row.get(2)?,
        low_stock_days_override: sql_integer(&row.get::<_, SqlValue>(3)?),
    })
}

// ==========================================
// IngredientBatchRepository - 原料批次仓储
// ==========================================
pub struct IngredientBatchRepository {
    conn: Arc<Mutex<Connection>>,
}

impl IngredientBatchRepository {
    /// 创建新的 IngredientBatchRepository 实例
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

    /// 查询全部批次（按入库日期升序）
    ///
    /// qty_remaining 非数字时按 0 处理
    pub fn list_all(&self) -> RepositoryResult<Vec<IngredientBatch>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, ingredient_id, qty_remaining, expiry_date, received_at
            FROM ingredient_batches
            ORDER BY received_at ASC
            "#,
        )?;

        let batches = stmt
            .query_map([], |row| {
                Ok(IngredientBatch {
                    id: sql_text(&row.get::<_, SqlValue>(0)?),
                    ingredient_id: row.get(1)?,
                    qty_remaining: sql_number_or(&row.get::<_, SqlValue>(2)?, 0.0),
                    expiry_date: sql_date(&row.get::<_, SqlValue>(3)?),
                    received_at: sql_date(&row.get::<_, SqlValue>(4)?),
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(batches)
    }

    /// 写入新批次
    pub fn insert(&self, batch: &IngredientBatch) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO ingredient_batches (id, ingredient_id, qty_remaining, expiry_date, received_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                batch.id,
                batch.ingredient_id,
                batch.qty_remaining,
                batch.expiry_date.map(|d| d.format("%Y-%m-%d").to_string()),
                batch.received_at.map(|d| d.format("%Y-%m-%d").to_string()),
            ],
        )?;
        Ok(())
    }
}
