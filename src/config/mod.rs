// ==========================================
// 夜市摊位库存系统 - 配置层
// ==========================================
// 职责: 预测权重配置（forecast_settings 表 + 默认值）
//       运行时配置（环境变量）
// ==========================================

pub mod app_config;
pub mod forecast_settings;

// 重导出
pub use app_config::{get_default_db_path, AppConfig};
pub use forecast_settings::{ForecastSettingsProvider, RawForecastSettings, SettingsSource};
