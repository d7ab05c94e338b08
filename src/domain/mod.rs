// ==========================================
// 夜市摊位库存系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod catalog;
pub mod context;
pub mod forecast;
pub mod stock;
pub mod types;

// 重导出核心类型
pub use catalog::{Ingredient, IngredientBatch, MenuVariant, NewIngredientInput, ReceiveBatchInput, RecipeItem};
pub use context::{CalendarEvent, DemoOverride, TodayContext};
pub use forecast::{
    ForecastSettings, IngredientNeed, IngredientNeedLine, IngredientUsage, VariantForecast,
    VariantForecastDetail,
};
pub use stock::{InventoryRow, StockAlert, StockInfo};
pub use types::{AlertSeverity, AlertType, DowKey, EventType, HolidayKey, InventoryStatus, WeatherKey};
