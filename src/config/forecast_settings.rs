// ==========================================
// 夜市摊位库存系统 - 预测权重配置提供者
// ==========================================
// 职责: 读取乘数权重表, 每个键独立回落到默认值
// 红线: fetch() 永不返回错误（读取失败 → 完整默认表 + warn 日志）
// ==========================================

use crate::domain::forecast::ForecastSettings;
use crate::domain::types::{DowKey, HolidayKey, WeatherKey};
use crate::repository::coerce::{json_number, positive_or};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

// ==========================================
// RawForecastSettings - 配置行原始内容
// ==========================================
// 每个类别为一段 JSON（期望为对象）, 列缺失或非法 JSON 时为 None
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawForecastSettings {
    pub dow: Option<JsonValue>,
    pub weather: Option<JsonValue>,
    pub holiday: Option<JsonValue>,
}

// ==========================================
// SettingsSource Trait
// ==========================================
// 实现者: ForecastSettingsRepository（forecast_settings 表）
#[async_trait]
pub trait SettingsSource: Send + Sync {
    /// 读取唯一的配置行
    ///
    /// # 返回
    /// - Ok(None): 尚未保存过配置
    async fn find_forecast_settings(&self) -> RepositoryResult<Option<RawForecastSettings>>;
}

// ==========================================
// ForecastSettingsProvider
// ==========================================
pub struct ForecastSettingsProvider {
    source: Arc<dyn SettingsSource>,
}

impl ForecastSettingsProvider {
    pub fn new(source: Arc<dyn SettingsSource>) -> Self {
        Self { source }
    }

    /// 获取权重表
    ///
    /// # 规则
    /// - 键存在且可转为有限正数 → 使用
    /// - 否则 → 该键默认值
    /// - 类别缺失或不是 JSON 对象 → 该类别全部默认
    /// - 无配置行或读取失败 → 完整默认表
    #[instrument(skip(self))]
    pub async fn fetch(&self) -> ForecastSettings {
        match self.source.find_forecast_settings().await {
            Ok(Some(raw)) => Self::resolve(&raw),
            Ok(None) => {
                debug!("forecast_settings 无配置行, 使用默认权重");
                ForecastSettings::default()
            }
            Err(e) => {
                warn!(error = %e, "读取 forecast_settings 失败, 使用默认权重");
                ForecastSettings::default()
            }
        }
    }

    /// 将原始配置行解析为完整权重表
    pub fn resolve(raw: &RawForecastSettings) -> ForecastSettings {
        ForecastSettings {
            dow: resolve_category(
                raw.dow.as_ref(),
                &DowKey::ALL,
                DowKey::as_str,
                ForecastSettings::default_dow,
            ),
            weather: resolve_category(
                raw.weather.as_ref(),
                &WeatherKey::ALL,
                WeatherKey::as_str,
                ForecastSettings::default_weather,
            ),
            holiday: resolve_category(
                raw.holiday.as_ref(),
                &HolidayKey::ALL,
                HolidayKey::as_str,
                ForecastSettings::default_holiday,
            ),
        }
    }
}

fn resolve_category<K: Copy + Ord>(
    raw: Option<&JsonValue>,
    keys: &[K],
    name: fn(&K) -> &'static str,
    default: fn(K) -> f64,
) -> BTreeMap<K, f64> {
    let object = raw.and_then(JsonValue::as_object);
    keys.iter()
        .map(|&key| {
            let stored = object
                .and_then(|obj| obj.get(name(&key)))
                .and_then(json_number);
            (key, positive_or(stored, default(key)))
        })
        .collect()
}
