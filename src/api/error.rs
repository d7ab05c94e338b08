// ==========================================
// 夜市摊位库存系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换Repository错误为用户可读的错误消息
// 约束: 必需数据读取失败须指明集合名称
// ==========================================

use crate::i18n::{t, Locale};
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 数据加载错误
    // ==========================================
    /// 必需数据读取失败（不做部分计算）
    #[error("数据加载失败: collection={collection}, {message}")]
    DataLoadFailed { collection: String, message: String },

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 包装必需集合的读取错误
    pub fn load_failed(collection: &str, err: RepositoryError) -> Self {
        ApiError::DataLoadFailed {
            collection: collection.to_string(),
            message: err.to_string(),
        }
    }

    /// 面向摊主的本地化提示
    ///
    /// 技术细节只进日志, 界面上只给一句可读提示
    pub fn user_message(&self, locale: Locale) -> String {
        match self {
            ApiError::DataLoadFailed { .. } => t(locale, "error.load_failed"),
            // 输入校验消息在构造时已本地化
            ApiError::InvalidInput(msg) => msg.clone(),
            _ => t(locale, "error.save_failed"),
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("外键约束违反: {}", msg))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
