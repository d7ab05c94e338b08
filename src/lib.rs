// ==========================================
// 夜市摊位库存系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 当日需求预测 + 库存预警 (纯计算引擎)
// ==========================================

// 初始化国际化系统（马来语为默认）
rust_i18n::i18n!("locales", fallback = "ms");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 预测与预警规则
pub mod engine;

// 配置层 - 预测权重配置
pub mod config;

// 数据库基础设施（连接初始化/建表）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 对 UI 暴露的接口
pub mod api;

// 应用层 - 运行时装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AlertSeverity, AlertType, DowKey, HolidayKey, InventoryStatus, WeatherKey};

// 领域实体
pub use domain::{
    ForecastSettings, Ingredient, IngredientBatch, MenuVariant, RecipeItem, StockAlert,
    StockInfo, TodayContext,
};

// 引擎
pub use engine::{
    AlertGenerator, ContextResolver, MultiplierCalculator, StockAggregator, VariantForecaster,
};

// 配置
pub use config::ForecastSettingsProvider;

// API
pub use api::{DashboardSnapshot, ForecastApi};

// 国际化
pub use i18n::Locale;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Gerai Forecast";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
