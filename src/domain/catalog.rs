// ==========================================
// 夜市摊位库存系统 - 菜单与原料实体
// ==========================================
// 对应表: ingredients / ingredient_batches / menu_variants / recipe_items
// 红线: 数值字段在仓储层已完成安全转换（非法值 → 0）
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Ingredient - 原料
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    /// g / ml / pcs / kg / biji ...
    pub unit: String,
    /// 低库存覆盖天数（仅存储, 预警判定不使用）
    pub low_stock_days_override: Option<i64>,
}

// ==========================================
// IngredientBatch - 原料批次
// ==========================================
// 同一原料可有多个批次, 批次之间从不合并
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientBatch {
    pub id: Option<String>,
    pub ingredient_id: String,
    pub qty_remaining: f64,
    pub expiry_date: Option<NaiveDate>,
    pub received_at: Option<NaiveDate>,
}

// ==========================================
// MenuVariant - 菜单规格
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuVariant {
    pub id: String,
    pub menu_item_id: String,
    pub name: String,
    pub price: f64,
    /// 普通日的期望销量
    pub baseline_daily: f64,
    /// 所属菜单项名称（读取时关联 menu_items）
    pub item_name: Option<String>,
}

// ==========================================
// RecipeItem - 配方行（规格 ↔ 原料）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeItem {
    pub variant_id: String,
    pub ingredient_id: String,
    pub qty_per_serving: f64,
}

// ==========================================
// 写入输入
// ==========================================

/// 入库新批次
#[derive(Debug, Clone, Deserialize)]
pub struct ReceiveBatchInput {
    pub ingredient_id: String,
    pub qty: f64,
    /// 空串视为无保质期
    pub expiry_date: Option<String>,
    /// 空串视为计划日
    pub received_at: Option<String>,
}

/// 新建原料
#[derive(Debug, Clone, Deserialize)]
pub struct NewIngredientInput {
    pub name: String,
    pub unit: String,
    pub low_stock_days_override: Option<i64>,
}
