// ==========================================
// 夜市摊位库存系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口, 供界面层调用
// ==========================================

pub mod error;
pub mod forecast_api;
pub mod inventory_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use forecast_api::{build_snapshot, DashboardSnapshot, ForecastApi, ForecastInputs};
pub use inventory_api::InventoryApi;
