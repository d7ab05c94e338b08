// ==========================================
// 夜市摊位库存系统 - 库存预警生成
// ==========================================
// 输入: 原料列表 + 当日用量 + 库存聚合
// 输出: 排序后的预警列表
// 规则（每个原料独立判定）:
// - low_stock (critical):    当日用量 > 可用量（覆盖天数设置不参与判定）
// - expiring_soon (warn):    最小剩余天数 0..=3
// - expired (critical):      仅在过期次日提示
// 排序: 严重度 → 原料名（区分大小写）, 稳定排序
// ==========================================

use crate::domain::catalog::Ingredient;
use crate::domain::stock::{StockAlert, StockInfo};
use crate::domain::types::{AlertSeverity, AlertType};
use crate::engine::stock_aggregator::EXPIRING_SOON_DAYS;
use crate::i18n::{t_with_args, Locale};
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, instrument};

// ==========================================
// AlertGenerator
// ==========================================
pub struct AlertGenerator {
    locale: Locale,
}

impl AlertGenerator {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// 生成预警
    ///
    /// 没有批次的原料按库存为 0 处理
    #[instrument(skip_all, fields(ingredients = ingredients.len(), locale = %self.locale))]
    pub fn generate(
        &self,
        ingredients: &[Ingredient],
        usage_by_ingredient: &HashMap<String, f64>,
        stock_by_ingredient: &HashMap<String, StockInfo>,
    ) -> Vec<StockAlert> {
        let empty = StockInfo::default();
        let mut alerts = Vec::new();

        for ing in ingredients {
            let info = stock_by_ingredient.get(&ing.id).unwrap_or(&empty);
            let usage = usage_by_ingredient.get(&ing.id).copied().unwrap_or(0.0);

            if let Some(alert) = self.low_stock(ing, usage, info) {
                alerts.push(alert);
            }
            if let Some(alert) = self.expiring_soon(ing, info) {
                alerts.push(alert);
            }
            if let Some(alert) = self.expired(ing, info) {
                alerts.push(alert);
            }
        }

        Self::sort(&mut alerts);
        debug!(count = alerts.len(), "预警生成完成");
        alerts
    }

    /// 严重度 → 原料名, 稳定排序
    pub fn sort(alerts: &mut [StockAlert]) {
        alerts.sort_by(|a, b| {
            a.severity
                .rank()
                .cmp(&b.severity.rank())
                .then_with(|| a.ingredient_name.cmp(&b.ingredient_name))
        });
    }

    // ==========================================
    // 单项规则
    // ==========================================

    fn low_stock(&self, ing: &Ingredient, usage: f64, info: &StockInfo) -> Option<StockAlert> {
        if !(usage > 0.0) || !(usage > info.available) {
            return None;
        }

        let shortage = usage - info.available;
        let qty = format_qty(shortage, &ing.unit);
        let message = t_with_args(
            self.locale,
            "alert.low_stock",
            &[("name", ing.name.as_str()), ("qty", qty.as_str())],
        );
        Some(build_alert(ing, AlertType::LowStock, AlertSeverity::Critical, message))
    }

    fn expiring_soon(&self, ing: &Ingredient, info: &StockInfo) -> Option<StockAlert> {
        let days = info
            .expiring_soon_min_days
            .filter(|d| (0..=EXPIRING_SOON_DAYS).contains(d))?;

        let message = if days == 0 {
            t_with_args(self.locale, "alert.expiring_today", &[("name", ing.name.as_str())])
        } else {
            let days = days.to_string();
            t_with_args(
                self.locale,
                "alert.expiring_in_days",
                &[("name", ing.name.as_str()), ("days", days.as_str())],
            )
        };
        Some(build_alert(ing, AlertType::ExpiringSoon, AlertSeverity::Warn, message))
    }

    fn expired(&self, ing: &Ingredient, info: &StockInfo) -> Option<StockAlert> {
        if !(info.expired_qty > 0.0) || !info.has_expired_yesterday {
            return None;
        }

        let qty = format_qty(info.expired_qty, &ing.unit);
        let detail = self.expired_detail(&info.expired_received_dates);
        let message = t_with_args(
            self.locale,
            "alert.expired",
            &[
                ("name", ing.name.as_str()),
                ("qty", qty.as_str()),
                ("detail", detail.as_str()),
            ],
        );
        Some(build_alert(ing, AlertType::Expired, AlertSeverity::Critical, message))
    }

    /// 过期批次说明（按出现顺序去重）
    fn expired_detail(&self, received: &[NaiveDate]) -> String {
        let mut unique: Vec<NaiveDate> = Vec::new();
        for d in received {
            if !unique.contains(d) {
                unique.push(*d);
            }
        }

        match unique.as_slice() {
            [] => t_with_args(self.locale, "alert.expired_detail_unknown", &[]),
            [only] => {
                let date = only.format("%Y-%m-%d").to_string();
                t_with_args(self.locale, "alert.expired_detail_one", &[("date", date.as_str())])
            }
            [first, ..] => {
                let date = first.format("%Y-%m-%d").to_string();
                t_with_args(self.locale, "alert.expired_detail_many", &[("date", date.as_str())])
            }
        }
    }
}

fn build_alert(
    ing: &Ingredient,
    alert_type: AlertType,
    severity: AlertSeverity,
    message: String,
) -> StockAlert {
    StockAlert {
        id: format!("{}_{}", alert_type.id_prefix(), ing.id),
        alert_type,
        ingredient_id: ing.id.clone(),
        ingredient_name: ing.name.clone(),
        severity,
        message,
    }
}

/// 数量转为易读文本
///
/// 先向上取整; g / ml 满 1000 时换算为 kg / L 并保留 1 位小数
/// （按 N / 1000.0 的二进制值舍入, 恰好一半时进位）
pub fn format_qty(qty: f64, unit: &str) -> String {
    let q = qty.ceil();
    let big = match unit {
        "g" if q >= 1000.0 => Some("kg"),
        "ml" if q >= 1000.0 => Some("L"),
        _ => None,
    };

    match big {
        Some(big_unit) => {
            let tenths = thousandths_to_tenths(q);
            format!(
                "{}.{} {} (~{} {})",
                tenths / 10,
                tenths % 10,
                big_unit,
                q as i64,
                unit
            )
        }
        None => format!("{} {}", q as i64, unit),
    }
}

/// 整数 q 对应 q / 1000.0 保留一位小数后的十分位整数
fn thousandths_to_tenths(q: f64) -> i64 {
    let whole = q as i64;
    let tenths = whole / 100;
    let round_up = match (whole % 100).cmp(&50) {
        Ordering::Less => false,
        Ordering::Greater => true,
        // 十进制上恰好一半: 看 q / 1000.0 落在真值哪一侧
        Ordering::Equal => (q / 1000.0).mul_add(1000.0, -q) >= 0.0,
    };
    if round_up {
        tenths + 1
    } else {
        tenths
    }
}
