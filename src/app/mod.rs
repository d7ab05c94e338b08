// ==========================================
// 夜市摊位库存系统 - 应用层
// ==========================================
// 职责: 运行时装配, 连接界面与后端
// ==========================================

pub mod state;

// 重导出
pub use crate::config::get_default_db_path;
pub use state::AppState;
