// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持马来语（默认）和英文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// 约束: 语言作为显式参数传入，不读写 rust-i18n 的全局 locale
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 界面语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Bahasa Melayu
    #[default]
    Ms,
    /// English
    En,
}

impl Locale {
    /// 语言代码（与 locales/app.yml 中的键一致）
    pub fn code(&self) -> &'static str {
        match self {
            Locale::Ms => "ms",
            Locale::En => "en",
        }
    }

    /// 从语言代码解析，无法识别时返回 None
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "ms" | "bm" | "ms-my" => Some(Locale::Ms),
            "en" | "en-us" | "en-gb" => Some(Locale::En),
            _ => None,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use gerai_forecast::i18n::{t, Locale};
/// let msg = t(Locale::En, "error.load_failed");
/// ```
pub fn t(locale: Locale, key: &str) -> String {
    rust_i18n::t!(key, locale = locale.code()).to_string()
}

/// 翻译消息（带参数）
///
/// 占位符格式: `%{name}`
///
/// 只扫描模板一遍, 参数值中出现的占位符原样保留
///
/// # 示例
/// ```no_run
/// use gerai_forecast::i18n::{t_with_args, Locale};
/// let msg = t_with_args(Locale::Ms, "alert.expiring_in_days", &[("name", "Telur"), ("days", "2")]);
/// ```
pub fn t_with_args(locale: Locale, key: &str, args: &[(&str, &str)]) -> String {
    interpolate(&t(locale, key), args)
}

fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("%{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match args.iter().find(|(k, _)| *k == name) {
                    Some((_, value)) => out.push_str(value),
                    None => out.push_str(&rest[start..start + 2 + end + 1]),
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
