// ==========================================
// 夜市摊位库存系统 - 计划日上下文
// ==========================================
// TodayContext: 一次计算的计划日快照（每次重新构造，不可变）
// DemoOverride: 演示模式覆写行（至多一行）
// CalendarEvent: events 表中的日历事件
// ==========================================

use crate::domain::types::{DowKey, EventType, WeatherKey};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// TodayContext - 计划日上下文
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodayContext {
    /// 计划日（无时刻）
    pub date: NaiveDate,
    /// YYYY-MM-DD
    pub date_iso: String,
    pub dow_key: DowKey,
    pub weather: WeatherKey,
    pub is_public_holiday: bool,
    pub has_local_event: bool,
    pub local_event_label: Option<String>,
}

impl TodayContext {
    /// 构造上下文；date_iso 与 dow_key 由 date 推导
    pub fn new(
        date: NaiveDate,
        weather: WeatherKey,
        is_public_holiday: bool,
        has_local_event: bool,
        local_event_label: Option<String>,
    ) -> Self {
        Self {
            date,
            date_iso: date.format("%Y-%m-%d").to_string(),
            dow_key: DowKey::from_date(date),
            weather,
            is_public_holiday,
            has_local_event,
            local_event_label,
        }
    }

    /// 普通日（晴天，无节假日/活动）
    pub fn plain(date: NaiveDate) -> Self {
        Self::new(date, WeatherKey::Clear, false, false, None)
    }
}

// ==========================================
// DemoOverride - 演示模式覆写
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoOverride {
    pub enabled: bool,
    pub demo_date: Option<NaiveDate>,
    /// 无法识别的天气值在读取时已置为 None
    pub weather: Option<WeatherKey>,
    pub is_public_holiday: bool,
    pub local_event_label: Option<String>,
}

impl DemoOverride {
    /// 是否处于生效状态（启用且指定了日期）
    pub fn active_date(&self) -> Option<NaiveDate> {
        if self.enabled {
            self.demo_date
        } else {
            None
        }
    }
}

// ==========================================
// CalendarEvent - 日历事件
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub on_date: NaiveDate,
    pub event_type: EventType,
    pub label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_derives_iso_and_dow() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let ctx = TodayContext::new(date, WeatherKey::Hot, true, false, None);
        assert_eq!(ctx.date_iso, "2025-06-15");
        assert_eq!(ctx.dow_key, DowKey::Sun);
    }

    #[test]
    fn test_demo_override_active_date() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let mut demo = DemoOverride {
            enabled: true,
            demo_date: Some(date),
            weather: None,
            is_public_holiday: false,
            local_event_label: None,
        };
        assert_eq!(demo.active_date(), Some(date));

        demo.enabled = false;
        assert_eq!(demo.active_date(), None);

        demo.enabled = true;
        demo.demo_date = None;
        assert_eq!(demo.active_date(), None);
    }
}
