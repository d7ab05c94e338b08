// ==========================================
// 夜市摊位库存系统 - 领域类型定义
// ==========================================
// 星期 / 天气 / 节假日键, 预警类型与严重度, 库存状态
// 序列化格式: snake_case (与数据库及 JSON 配置一致)
// ==========================================

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 星期键 (Day-of-Week Key)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DowKey {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DowKey {
    /// 周日起始的索引表（0 = 周日）
    const SUNDAY_FIRST: [DowKey; 7] = [
        DowKey::Sun,
        DowKey::Mon,
        DowKey::Tue,
        DowKey::Wed,
        DowKey::Thu,
        DowKey::Fri,
        DowKey::Sat,
    ];

    pub const ALL: [DowKey; 7] = [
        DowKey::Mon,
        DowKey::Tue,
        DowKey::Wed,
        DowKey::Thu,
        DowKey::Fri,
        DowKey::Sat,
        DowKey::Sun,
    ];

    /// 由日期推导星期键
    pub fn from_date(date: NaiveDate) -> Self {
        Self::SUNDAY_FIRST[date.weekday().num_days_from_sunday() as usize]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DowKey::Mon => "mon",
            DowKey::Tue => "tue",
            DowKey::Wed => "wed",
            DowKey::Thu => "thu",
            DowKey::Fri => "fri",
            DowKey::Sat => "sat",
            DowKey::Sun => "sun",
        }
    }
}

impl fmt::Display for DowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 天气键 (Weather Key)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherKey {
    #[default]
    Clear,
    Rain,
    Hot,
}

impl WeatherKey {
    pub const ALL: [WeatherKey; 3] = [WeatherKey::Clear, WeatherKey::Rain, WeatherKey::Hot];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherKey::Clear => "clear",
            WeatherKey::Rain => "rain",
            WeatherKey::Hot => "hot",
        }
    }

    /// 从字符串解析，无法识别时返回 None（由调用方决定默认值）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "clear" => Some(WeatherKey::Clear),
            "rain" => Some(WeatherKey::Rain),
            "hot" => Some(WeatherKey::Hot),
            _ => None,
        }
    }

    /// 本地化文案键
    pub fn i18n_key(&self) -> &'static str {
        match self {
            WeatherKey::Clear => "weather.clear",
            WeatherKey::Rain => "weather.rain",
            WeatherKey::Hot => "weather.hot",
        }
    }
}

impl fmt::Display for WeatherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 节假日键 (Holiday Key)
// ==========================================
// ramadan: 预留类别, 目前没有任何上下文标志触发它
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayKey {
    PublicHoliday,
    Ramadan,
    LocalEvent,
}

impl HolidayKey {
    pub const ALL: [HolidayKey; 3] = [
        HolidayKey::PublicHoliday,
        HolidayKey::Ramadan,
        HolidayKey::LocalEvent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HolidayKey::PublicHoliday => "public_holiday",
            HolidayKey::Ramadan => "ramadan",
            HolidayKey::LocalEvent => "local_event",
        }
    }
}

impl fmt::Display for HolidayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 日历事件类型 (events 表 type 列)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    PublicHoliday,
    LocalEvent,
    Ramadan,
    Other(String),
}

impl EventType {
    pub fn from_db_str(s: &str) -> Self {
        match s.trim() {
            "public_holiday" => EventType::PublicHoliday,
            "local_event" => EventType::LocalEvent,
            "ramadan" => EventType::Ramadan,
            other => EventType::Other(other.to_string()),
        }
    }

    pub fn to_db_str(&self) -> &str {
        match self {
            EventType::PublicHoliday => "public_holiday",
            EventType::LocalEvent => "local_event",
            EventType::Ramadan => "ramadan",
            EventType::Other(s) => s.as_str(),
        }
    }
}

// ==========================================
// 预警类型 (Alert Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    LowStock,
    ExpiringSoon,
    Expired,
}

impl AlertType {
    /// 预警 ID 前缀
    pub fn id_prefix(&self) -> &'static str {
        match self {
            AlertType::LowStock => "low",
            AlertType::ExpiringSoon => "soon",
            AlertType::Expired => "expired",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertType::LowStock => write!(f, "low_stock"),
            AlertType::ExpiringSoon => write!(f, "expiring_soon"),
            AlertType::Expired => write!(f, "expired"),
        }
    }
}

// ==========================================
// 预警严重度 (Alert Severity)
// ==========================================
// 排序: Critical(0) < Warn(1) < Info(2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warn,
    Critical,
}

impl AlertSeverity {
    /// 排序秩（越小越靠前）
    pub fn rank(&self) -> u8 {
        match self {
            AlertSeverity::Critical => 0,
            AlertSeverity::Warn => 1,
            AlertSeverity::Info => 2,
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Info => write!(f, "info"),
            AlertSeverity::Warn => write!(f, "warn"),
            AlertSeverity::Critical => write!(f, "critical"),
        }
    }
}

// ==========================================
// 库存状态 (Inventory Status)
// ==========================================
// 库存总览使用, 判定优先级: Empty > Expired > Expiring > Ok
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventoryStatus {
    Ok,
    Empty,
    Expired,
    Expiring,
}

impl fmt::Display for InventoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InventoryStatus::Ok => write!(f, "ok"),
            InventoryStatus::Empty => write!(f, "empty"),
            InventoryStatus::Expired => write!(f, "expired"),
            InventoryStatus::Expiring => write!(f, "expiring"),
        }
    }
}
