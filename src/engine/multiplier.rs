// ==========================================
// 夜市摊位库存系统 - 需求乘数计算
// ==========================================
// 公式: multiplier = dow[星期] × weather[天气] × holiday
// holiday 优先级: 公共假期 > 本地活动 > 1.0
// ramadan: 预留, 目前无触发条件
// ==========================================

use crate::domain::context::TodayContext;
use crate::domain::forecast::ForecastSettings;
use crate::domain::types::HolidayKey;

// ==========================================
// MultiplierCalculator
// ==========================================
pub struct MultiplierCalculator;

impl MultiplierCalculator {
    /// 合成当日乘数（缺失的键按 1.0）
    pub fn combine(settings: &ForecastSettings, ctx: &TodayContext) -> f64 {
        let dow = settings.dow.get(&ctx.dow_key).copied().unwrap_or(1.0);
        let weather = settings.weather.get(&ctx.weather).copied().unwrap_or(1.0);
        dow * weather * Self::holiday_factor(settings, ctx)
    }

    /// 节假日因子
    pub fn holiday_factor(settings: &ForecastSettings, ctx: &TodayContext) -> f64 {
        let key = if ctx.is_public_holiday {
            HolidayKey::PublicHoliday
        } else if ctx.has_local_event {
            HolidayKey::LocalEvent
        } else {
            return 1.0;
        };
        settings.holiday.get(&key).copied().unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{DowKey, WeatherKey};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    /// 2025-06-14（周六）
    fn saturday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_plain_day_is_dow_times_weather() {
        let s = ForecastSettings::default();
        let ctx = TodayContext::new(saturday(), WeatherKey::Rain, false, false, None);
        assert!(close(MultiplierCalculator::combine(&s, &ctx), 1.20 * 0.85));
    }

    #[test]
    fn test_public_holiday_beats_local_event() {
        let s = ForecastSettings::default();
        let both = TodayContext::new(saturday(), WeatherKey::Clear, true, true, Some("Bazar".into()));
        assert!(close(MultiplierCalculator::combine(&s, &both), 1.20 * 1.00 * 1.20));

        let event_only = TodayContext::new(saturday(), WeatherKey::Hot, false, true, None);
        assert!(close(
            MultiplierCalculator::combine(&s, &event_only),
            1.20 * 0.95 * 1.15
        ));
    }

    #[test]
    fn test_missing_keys_default_to_one() {
        let empty = ForecastSettings {
            dow: BTreeMap::new(),
            weather: BTreeMap::new(),
            holiday: BTreeMap::new(),
        };
        let ctx = TodayContext::new(saturday(), WeatherKey::Hot, true, false, None);
        assert_eq!(MultiplierCalculator::combine(&empty, &ctx), 1.0);

        let mut partial = empty.clone();
        partial.dow.insert(DowKey::Sat, 1.5);
        assert_eq!(MultiplierCalculator::combine(&partial, &ctx), 1.5);
    }
}
