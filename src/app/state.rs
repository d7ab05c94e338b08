// ==========================================
// 夜市摊位库存系统 - 应用状态
// ==========================================
// 职责: 打开数据库、建表、装配仓储/引擎/API
// 约束: 所有仓储共享同一连接
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{ForecastApi, InventoryApi};
use crate::config::{AppConfig, ForecastSettingsProvider};
use crate::db::{init_schema, open_sqlite_connection};
use crate::engine::{Clock, ContextResolver, ForecastRepositories, SystemClock};
use crate::i18n::Locale;
use crate::repository::{
    ContextRepository, ForecastSettingsRepository, IngredientBatchRepository,
    IngredientRepository, MenuRepository,
};

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 界面语言
    pub locale: Locale,

    /// 预测看板API
    pub forecast_api: Arc<ForecastApi>,

    /// 库存维护API
    pub inventory_api: Arc<InventoryApi>,

    /// 权重配置仓储（设置页保存用）
    pub settings_repo: Arc<ForecastSettingsRepository>,
}

impl AppState {
    /// 使用系统时钟创建AppState
    pub fn new(config: AppConfig) -> Result<Self, String> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// 使用指定时钟创建AppState
    pub fn with_clock(config: AppConfig, clock: Arc<dyn Clock>) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", config.db_path);

        let conn = open_sqlite_connection(&config.db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        init_schema(&conn).map_err(|e| format!("建表失败: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let ingredient_repo = Arc::new(IngredientRepository::from_connection(conn.clone()));
        let batch_repo = Arc::new(IngredientBatchRepository::from_connection(conn.clone()));
        let menu_repo = Arc::new(MenuRepository::from_connection(conn.clone()));
        let context_repo = Arc::new(ContextRepository::from_connection(conn.clone()));
        let settings_repo = Arc::new(ForecastSettingsRepository::from_connection(conn));

        // ==========================================
        // 初始化Engine / Config层
        // ==========================================
        let context_resolver = Arc::new(ContextResolver::new(context_repo.clone(), clock));
        let settings_provider = Arc::new(ForecastSettingsProvider::new(settings_repo.clone()));
        let repositories = Arc::new(ForecastRepositories::new(
            ingredient_repo.clone(),
            batch_repo.clone(),
            menu_repo,
        ));

        // ==========================================
        // 初始化API层
        // ==========================================
        let forecast_api = Arc::new(ForecastApi::new(
            context_resolver.clone(),
            settings_provider,
            repositories,
            config.locale,
        ));
        let inventory_api = Arc::new(InventoryApi::new(
            ingredient_repo,
            batch_repo,
            context_repo,
            context_resolver,
            config.locale,
        ));

        tracing::info!("AppState初始化完成, locale={}", config.locale);

        Ok(Self {
            db_path: config.db_path,
            locale: config.locale,
            forecast_api,
            inventory_api,
            settings_repo,
        })
    }
}
