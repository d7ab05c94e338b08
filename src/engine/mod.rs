// ==========================================
// 夜市摊位库存系统 - 引擎层
// ==========================================
// 职责: 实现预测与预警规则, 不拼 SQL
// 流程: 上下文 → 乘数 → 规格预测 → 原料需求
//       批次 → 库存聚合 → 预警
// ==========================================

pub mod alert_generator;
pub mod context_resolver;
pub mod multiplier;
pub mod repositories;
pub mod stock_aggregator;
pub mod variant_forecaster;

// 重导出核心引擎
pub use alert_generator::{format_qty, AlertGenerator};
pub use context_resolver::{Clock, ContextResolver, ContextSource, FixedClock, SystemClock};
pub use multiplier::MultiplierCalculator;
pub use repositories::{ForecastDataSource, ForecastRepositories};
pub use stock_aggregator::StockAggregator;
pub use variant_forecaster::VariantForecaster;
