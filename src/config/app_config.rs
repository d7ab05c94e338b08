// ==========================================
// 夜市摊位库存系统 - 运行时配置
// ==========================================
// 来源: 环境变量
// - GERAI_FORECAST_DB_PATH: 数据库路径（默认: 用户数据目录）
// - GERAI_FORECAST_LOCALE:  界面语言 ms | en（默认: ms）
// ==========================================

use crate::i18n::Locale;
use std::path::PathBuf;
use tracing::warn;

pub const ENV_DB_PATH: &str = "GERAI_FORECAST_DB_PATH";
pub const ENV_LOCALE: &str = "GERAI_FORECAST_LOCALE";

const DB_FILE_NAME: &str = "gerai_forecast.db";

/// 运行时配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: String,
    pub locale: Locale,
}

impl AppConfig {
    /// 从环境变量读取
    pub fn from_env() -> Self {
        Self {
            db_path: get_default_db_path(),
            locale: locale_from_env(),
        }
    }
}

/// 获取默认数据库路径
///
/// # 返回
/// - 设置了 GERAI_FORECAST_DB_PATH: 使用该路径
/// - 开发环境: 用户数据目录/gerai-forecast-dev/gerai_forecast.db
/// - 生产环境: 用户数据目录/gerai-forecast/gerai_forecast.db
/// - 无用户数据目录: ./gerai_forecast.db
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(ENV_DB_PATH) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from(format!("./{}", DB_FILE_NAME));

    if let Some(data_dir) = dirs::data_dir() {
        #[cfg(debug_assertions)]
        let dir = data_dir.join("gerai-forecast-dev");

        #[cfg(not(debug_assertions))]
        let dir = data_dir.join("gerai-forecast");

        // 目录创建失败时退回当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join(DB_FILE_NAME);
        } else {
            warn!(dir = %dir.display(), "无法创建数据目录, 使用当前目录");
        }
    }

    path.to_string_lossy().to_string()
}

fn locale_from_env() -> Locale {
    match std::env::var(ENV_LOCALE) {
        Ok(code) if !code.trim().is_empty() => Locale::parse(&code).unwrap_or_else(|| {
            warn!(locale = %code, "无法识别的语言代码, 使用 ms");
            Locale::default()
        }),
        _ => Locale::default(),
    }
}
