// ==========================================
// 夜市摊位库存系统 - 库存聚合引擎
// ==========================================
// 职责: 按计划日对批次分类（可用 / 临期 / 已过期 / 忽略）, 按原料汇总
// 规则 (diff_days = 到期日 - 计划日):
// - 无到期日         → 可用
// - diff_days < -3   → 忽略（视为已丢弃）
// - -3 ..= -1        → 已过期数量; -1 标记"昨天过期"
// - diff_days >= 0   → 可用; <= 3 时记录最小剩余天数
// 红线: 原料之间互不影响
// ==========================================

use crate::domain::catalog::{Ingredient, IngredientBatch};
use crate::domain::forecast::IngredientUsage;
use crate::domain::stock::{InventoryRow, StockInfo};
use crate::domain::types::InventoryStatus;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// 临期窗口（天）
pub const EXPIRING_SOON_DAYS: i64 = 3;
/// 过期后仍计入的天数
pub const EXPIRED_RETENTION_DAYS: i64 = 3;

// ==========================================
// StockAggregator
// ==========================================
pub struct StockAggregator;

impl StockAggregator {
    /// 到期日与计划日相差的自然日数
    pub fn diff_days(expiry_date: NaiveDate, planning_date: NaiveDate) -> i64 {
        (expiry_date - planning_date).num_days()
    }

    /// 按原料聚合批次
    #[instrument(skip(batches), fields(count = batches.len()))]
    pub fn aggregate(
        batches: &[IngredientBatch],
        planning_date: NaiveDate,
    ) -> HashMap<String, StockInfo> {
        let mut stock: HashMap<String, StockInfo> = HashMap::new();

        for batch in batches {
            let info = stock.entry(batch.ingredient_id.clone()).or_default();
            let qty = batch.qty_remaining;

            let Some(expiry) = batch.expiry_date else {
                info.available += qty;
                continue;
            };

            let diff = Self::diff_days(expiry, planning_date);

            if diff < -EXPIRED_RETENTION_DAYS {
                continue;
            }

            if diff < 0 {
                info.expired_qty += qty;
                if let Some(received) = batch.received_at {
                    info.expired_received_dates.push(received);
                }
                if diff == -1 {
                    info.has_expired_yesterday = true;
                }
            } else {
                info.available += qty;
                if diff <= EXPIRING_SOON_DAYS {
                    info.expiring_soon_min_days = Some(match info.expiring_soon_min_days {
                        Some(current) => current.min(diff),
                        None => diff,
                    });
                }
                info.next_expiry_date = Some(match info.next_expiry_date {
                    Some(current) => current.min(expiry),
                    None => expiry,
                });
            }
        }

        debug!(ingredients = stock.len(), "库存聚合完成");
        stock
    }

    /// 可覆盖天数 = floor(available / usage)；usage <= 0 时为 None
    pub fn coverage_days(available: f64, usage: f64) -> Option<i64> {
        if !(usage > 0.0) {
            return None;
        }
        let days = (available / usage).floor();
        days.is_finite().then_some(days as i64)
    }

    /// 原料当日用量与可用量对照（只含有用量的原料, 按名称排序）
    pub fn usage_rows(
        ingredients: &[Ingredient],
        usage: &HashMap<String, f64>,
        stock: &HashMap<String, StockInfo>,
    ) -> Vec<IngredientUsage> {
        let mut rows: Vec<IngredientUsage> = ingredients
            .iter()
            .filter_map(|ing| {
                let used = usage.get(&ing.id).copied().filter(|u| *u > 0.0)?;
                let available = stock.get(&ing.id).map(|s| s.available).unwrap_or(0.0);
                Some(IngredientUsage {
                    ingredient_id: ing.id.clone(),
                    ingredient_name: ing.name.clone(),
                    unit: ing.unit.clone(),
                    usage: used,
                    available,
                    coverage_days: Self::coverage_days(available, used),
                })
            })
            .collect();

        rows.sort_by(|a, b| a.ingredient_name.cmp(&b.ingredient_name));
        rows
    }

    /// 库存总览
    ///
    /// 状态优先级: empty > expired > expiring > ok
    #[instrument(skip(ingredients, batches), fields(ingredients = ingredients.len()))]
    pub fn inventory_overview(
        ingredients: &[Ingredient],
        batches: &[IngredientBatch],
        planning_date: NaiveDate,
    ) -> Vec<InventoryRow> {
        let stock = Self::aggregate(batches, planning_date);
        let empty = StockInfo::default();

        let mut rows: Vec<InventoryRow> = ingredients
            .iter()
            .map(|ing| {
                let info = stock.get(&ing.id).unwrap_or(&empty);
                let next_expiry_days = info
                    .next_expiry_date
                    .map(|d| Self::diff_days(d, planning_date));

                InventoryRow {
                    ingredient_id: ing.id.clone(),
                    name: ing.name.clone(),
                    unit: ing.unit.clone(),
                    available: info.available,
                    expired_qty: info.expired_qty,
                    next_expiry_date: info.next_expiry_date,
                    next_expiry_days,
                    status: Self::status_of(info, next_expiry_days),
                }
            })
            .collect();

        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows
    }

    fn status_of(info: &StockInfo, next_expiry_days: Option<i64>) -> InventoryStatus {
        if info.available <= 0.0 && info.expired_qty <= 0.0 {
            InventoryStatus::Empty
        } else if info.expired_qty > 0.0 {
            InventoryStatus::Expired
        } else if matches!(next_expiry_days, Some(d) if (0..=EXPIRING_SOON_DAYS).contains(&d)) {
            InventoryStatus::Expiring
        } else {
            InventoryStatus::Ok
        }
    }
}
