// ==========================================
// 夜市摊位库存系统 - 数据入口安全转换
// ==========================================
// 职责: 统一的"转换或默认"策略，供仓储行映射与配置读取使用
// 约定:
// - 数值: 数字或可解析的数字字符串 → f64；其余 → None（调用方给默认值）
// - 非有限值 (NaN/Inf) 视为非数字
// - 日期: 取前 10 位 YYYY-MM-DD，时刻部分丢弃
// ==========================================

use chrono::NaiveDate;
use rusqlite::types::Value as SqlValue;
use serde_json::Value as JsonValue;

/// SQLite 动态类型值 → 有限 f64
pub fn sql_number(value: &SqlValue) -> Option<f64> {
    let n = match value {
        SqlValue::Integer(i) => *i as f64,
        SqlValue::Real(f) => *f,
        SqlValue::Text(s) => s.trim().parse::<f64>().ok()?,
        SqlValue::Null | SqlValue::Blob(_) => return None,
    };
    n.is_finite().then_some(n)
}

/// SQLite 值 → f64，非法时取默认值
pub fn sql_number_or(value: &SqlValue, default: f64) -> f64 {
    sql_number(value).unwrap_or(default)
}

/// SQLite 值 → 整数（小数截断），非法时 None
pub fn sql_integer(value: &SqlValue) -> Option<i64> {
    match value {
        SqlValue::Integer(i) => Some(*i),
        other => sql_number(other).map(|f| f.trunc() as i64),
    }
}

/// SQLite 值 → 非空字符串
pub fn sql_text(value: &SqlValue) -> Option<String> {
    match value {
        SqlValue::Text(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        SqlValue::Integer(i) => Some(i.to_string()),
        _ => None,
    }
}

/// SQLite 值 → 布尔（0/空/NULL 为 false）
pub fn sql_bool(value: &SqlValue) -> bool {
    match value {
        SqlValue::Integer(i) => *i != 0,
        SqlValue::Real(f) => *f != 0.0,
        SqlValue::Text(s) => matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "t" | "yes"),
        SqlValue::Null | SqlValue::Blob(_) => false,
    }
}

/// SQLite 值 → 日期
pub fn sql_date(value: &SqlValue) -> Option<NaiveDate> {
    match value {
        SqlValue::Text(s) => parse_date(s),
        _ => None,
    }
}

/// 解析日期字符串（接受 `YYYY-MM-DD` 及带时刻的 ISO 字符串）
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    let head = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// JSON 值 → 有限 f64
pub fn json_number(value: &JsonValue) -> Option<f64> {
    let n = match value {
        JsonValue::Number(n) => n.as_f64()?,
        JsonValue::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// 正数或默认值（乘数用：0 / 负数 / 非数字都回落到默认值）
pub fn positive_or(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sql_number_variants() {
        assert_eq!(sql_number(&SqlValue::Integer(3)), Some(3.0));
        assert_eq!(sql_number(&SqlValue::Real(2.5)), Some(2.5));
        assert_eq!(sql_number(&SqlValue::Text(" 12.5 ".to_string())), Some(12.5));
        assert_eq!(sql_number(&SqlValue::Text("abc".to_string())), None);
        assert_eq!(sql_number(&SqlValue::Text("NaN".to_string())), None);
        assert_eq!(sql_number(&SqlValue::Null), None);
        assert_eq!(sql_number_or(&SqlValue::Text("".to_string()), 0.0), 0.0);
    }

    #[test]
    fn test_sql_bool_and_text() {
        assert!(sql_bool(&SqlValue::Integer(1)));
        assert!(!sql_bool(&SqlValue::Integer(0)));
        assert!(sql_bool(&SqlValue::Text("true".to_string())));
        assert!(!sql_bool(&SqlValue::Null));
        assert_eq!(sql_text(&SqlValue::Text("  ".to_string())), None);
        assert_eq!(sql_text(&SqlValue::Text(" Telur ".to_string())), Some("Telur".to_string()));
    }

    #[test]
    fn test_parse_date_discards_time() {
        let d = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert_eq!(parse_date("2025-06-15"), Some(d));
        assert_eq!(parse_date("2025-06-15T23:59:00Z"), Some(d));
        assert_eq!(parse_date("15/06/2025"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_json_number_and_positive_or() {
        assert_eq!(json_number(&json!(1.2)), Some(1.2));
        assert_eq!(json_number(&json!("0.85")), Some(0.85));
        assert_eq!(json_number(&json!("x")), None);
        assert_eq!(json_number(&json!(null)), None);
        assert_eq!(positive_or(Some(0.0), 1.1), 1.1);
        assert_eq!(positive_or(Some(-2.0), 1.1), 1.1);
        assert_eq!(positive_or(None, 1.1), 1.1);
        assert_eq!(positive_or(Some(1.3), 1.1), 1.3);
    }
}
