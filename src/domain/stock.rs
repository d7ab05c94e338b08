// ==========================================
// 夜市摊位库存系统 - 库存与预警实体
// ==========================================
// StockInfo: 单原料按计划日聚合的库存信息（每次重算）
// StockAlert: 预警输出（只读）
// InventoryRow: 库存总览行
// ==========================================

use crate::domain::types::{AlertSeverity, AlertType, InventoryStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// StockInfo - 单原料库存聚合
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StockInfo {
    /// 未过期批次数量之和
    pub available: f64,
    /// 过期 1–3 天的批次数量之和
    pub expired_qty: f64,
    /// 3 天内到期批次的最小剩余天数
    pub expiring_soon_min_days: Option<i64>,
    /// 过期批次的入库日期（消息用）
    pub expired_received_dates: Vec<NaiveDate>,
    /// 是否有批次恰好在计划日前一天过期
    pub has_expired_yesterday: bool,
    /// 未过期批次中最早的到期日（不限窗口）
    pub next_expiry_date: Option<NaiveDate>,
}

// ==========================================
// StockAlert - 库存预警
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAlert {
    pub id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub ingredient_id: String,
    pub ingredient_name: String,
    pub severity: AlertSeverity,
    pub message: String,
}

// ==========================================
// InventoryRow - 库存总览行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRow {
    pub ingredient_id: String,
    pub name: String,
    pub unit: String,
    pub available: f64,
    pub expired_qty: f64,
    pub next_expiry_date: Option<NaiveDate>,
    pub next_expiry_days: Option<i64>,
    pub status: InventoryStatus,
}
