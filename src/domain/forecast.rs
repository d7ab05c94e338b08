// ==========================================
// 夜市摊位库存系统 - 预测实体
// ==========================================
// ForecastSettings: 乘数权重表（星期/天气/节假日）
// VariantForecast / IngredientNeed: 预测输出
// ==========================================

use crate::domain::types::{DowKey, HolidayKey, WeatherKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// ForecastSettings - 乘数权重表
// ==========================================
// 不变量: 经 ForecastSettingsProvider 产出的表中每个键都存在且为正数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSettings {
    pub dow: BTreeMap<DowKey, f64>,
    pub weather: BTreeMap<WeatherKey, f64>,
    pub holiday: BTreeMap<HolidayKey, f64>,
}

impl ForecastSettings {
    /// 星期默认权重
    pub fn default_dow(key: DowKey) -> f64 {
        match key {
            DowKey::Mon => 0.90,
            DowKey::Tue => 0.95,
            DowKey::Wed => 1.00,
            DowKey::Thu => 1.05,
            DowKey::Fri => 1.15,
            DowKey::Sat => 1.20,
            DowKey::Sun => 1.10,
        }
    }

    /// 天气默认权重
    pub fn default_weather(key: WeatherKey) -> f64 {
        match key {
            WeatherKey::Clear => 1.00,
            WeatherKey::Rain => 0.85,
            WeatherKey::Hot => 0.95,
        }
    }

    /// 节假日默认权重
    pub fn default_holiday(key: HolidayKey) -> f64 {
        match key {
            HolidayKey::PublicHoliday => 1.20,
            HolidayKey::Ramadan => 1.40,
            HolidayKey::LocalEvent => 1.15,
        }
    }
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            dow: DowKey::ALL
                .iter()
                .map(|&k| (k, Self::default_dow(k)))
                .collect(),
            weather: WeatherKey::ALL
                .iter()
                .map(|&k| (k, Self::default_weather(k)))
                .collect(),
            holiday: HolidayKey::ALL
                .iter()
                .map(|&k| (k, Self::default_holiday(k)))
                .collect(),
        }
    }
}

// ==========================================
// VariantForecast - 单规格预测份数
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantForecast {
    pub variant_id: String,
    pub forecast_units: i64,
}

// ==========================================
// IngredientNeed - 单规格单原料需求量
// ==========================================
// 不做跨规格聚合, 保留逐规格明细
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientNeed {
    pub variant_id: String,
    pub ingredient_id: String,
    pub qty_needed: f64,
}

// ==========================================
// 展示用明细
// ==========================================

/// 规格预测明细（含原料需求）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantForecastDetail {
    pub variant_id: String,
    pub item_name: String,
    pub variant_name: String,
    pub price: f64,
    pub baseline: f64,
    pub forecast_units: i64,
    pub ingredients_needed: Vec<IngredientNeedLine>,
}

/// 原料需求行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientNeedLine {
    pub ingredient_id: String,
    pub ingredient_name: String,
    pub unit: String,
    pub qty_needed: f64,
}

/// 原料当日用量汇总（跨规格）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientUsage {
    pub ingredient_id: String,
    pub ingredient_name: String,
    pub unit: String,
    pub usage: f64,
    pub available: f64,
    /// floor(available / usage)；usage <= 0 时为 None
    pub coverage_days: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_complete() {
        let s = ForecastSettings::default();
        assert_eq!(s.dow.len(), 7);
        assert_eq!(s.weather.len(), 3);
        assert_eq!(s.holiday.len(), 3);
        assert_eq!(s.dow[&DowKey::Sat], 1.20);
        assert_eq!(s.weather[&WeatherKey::Rain], 0.85);
        assert_eq!(s.holiday[&HolidayKey::Ramadan], 1.40);
        assert!(s.dow.values().chain(s.weather.values()).chain(s.holiday.values()).all(|v| *v > 0.0));
    }
}
