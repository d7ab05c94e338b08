// ==========================================
// 夜市摊位库存系统 - 引擎层仓储聚合
// ==========================================
// 职责: 聚合预测流程所需的四类必需数据读取
// 红线: 任一必需读取失败 → 整体失败, 不做部分计算
// ==========================================

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::catalog::{Ingredient, IngredientBatch, MenuVariant, RecipeItem};
use crate::repository::{
    IngredientBatchRepository, IngredientRepository, MenuRepository, RepositoryResult,
};

// ==========================================
// ForecastDataSource Trait
// ==========================================
// 四个读取互不依赖, 由调用方并发发起
#[async_trait]
pub trait ForecastDataSource: Send + Sync {
    async fn load_ingredients(&self) -> RepositoryResult<Vec<Ingredient>>;

    async fn load_batches(&self) -> RepositoryResult<Vec<IngredientBatch>>;

    async fn load_recipe_items(&self) -> RepositoryResult<Vec<RecipeItem>>;

    async fn load_menu_variants(&self) -> RepositoryResult<Vec<MenuVariant>>;
}

/// 预测流程仓储集合
///
/// # 包含的仓储
/// - `ingredient_repo`: 原料
/// - `batch_repo`: 原料批次
/// - `menu_repo`: 菜单规格与配方
#[derive(Clone)]
pub struct ForecastRepositories {
    /// 原料仓储
    pub ingredient_repo: Arc<IngredientRepository>,
    /// 批次仓储
    pub batch_repo: Arc<IngredientBatchRepository>,
    /// 菜单/配方仓储
    pub menu_repo: Arc<MenuRepository>,
}

impl ForecastRepositories {
    /// 创建新的仓储集合
    pub fn new(
        ingredient_repo: Arc<IngredientRepository>,
        batch_repo: Arc<IngredientBatchRepository>,
        menu_repo: Arc<MenuRepository>,
    ) -> Self {
        Self {
            ingredient_repo,
            batch_repo,
            menu_repo,
        }
    }
}

#[async_trait]
impl ForecastDataSource for ForecastRepositories {
    async fn load_ingredients(&self) -> RepositoryResult<Vec<Ingredient>> {
        self.ingredient_repo.list_active()
    }

    async fn load_batches(&self) -> RepositoryResult<Vec<IngredientBatch>> {
        self.batch_repo.list_all()
    }

    async fn load_recipe_items(&self) -> RepositoryResult<Vec<RecipeItem>> {
        self.menu_repo.list_recipe_items()
    }

    async fn load_menu_variants(&self) -> RepositoryResult<Vec<MenuVariant>> {
        self.menu_repo.list_variants()
    }
}
