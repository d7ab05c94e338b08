// ==========================================
// 夜市摊位库存系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// 约束: 数值列在行映射时经 coerce 统一转换
// ==========================================

pub mod coerce;
pub mod context_repo;
pub mod error;
pub mod ingredient_repo;
pub mod menu_repo;
pub mod settings_repo;

// 重导出核心仓储
pub use context_repo::ContextRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use ingredient_repo::{IngredientBatchRepository, IngredientRepository};
pub use menu_repo::MenuRepository;
pub use settings_repo::ForecastSettingsRepository;
