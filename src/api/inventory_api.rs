// ==========================================
// 夜市摊位库存系统 - 库存维护 API
// ==========================================
// 职责: 入库批次 / 新建原料 / 演示模式设置
// 约束: 入参先校验, 再写库; 校验失败返回本地化提示
// ==========================================

use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::catalog::{Ingredient, IngredientBatch, NewIngredientInput, ReceiveBatchInput};
use crate::domain::context::DemoOverride;
use crate::engine::ContextResolver;
use crate::i18n::{t, Locale};
use crate::repository::coerce::parse_date;
use crate::repository::{ContextRepository, IngredientBatchRepository, IngredientRepository};

// ==========================================
// InventoryApi
// ==========================================
pub struct InventoryApi {
    ingredient_repo: Arc<IngredientRepository>,
    batch_repo: Arc<IngredientBatchRepository>,
    context_repo: Arc<ContextRepository>,
    context_resolver: Arc<ContextResolver>,
    locale: Locale,
}

impl InventoryApi {
    pub fn new(
        ingredient_repo: Arc<IngredientRepository>,
        batch_repo: Arc<IngredientBatchRepository>,
        context_repo: Arc<ContextRepository>,
        context_resolver: Arc<ContextResolver>,
        locale: Locale,
    ) -> Self {
        Self {
            ingredient_repo,
            batch_repo,
            context_repo,
            context_resolver,
            locale,
        }
    }

    /// 入库新批次
    ///
    /// # 规则
    /// - qty 必须为有限数且 >= 0
    /// - received_at 为空时取计划日
    /// - expiry_date 为空时视为无保质期
    /// - 原料必须存在
    #[instrument(skip(self, input), fields(ingredient_id = %input.ingredient_id))]
    pub async fn receive_batch(&self, input: ReceiveBatchInput) -> ApiResult<IngredientBatch> {
        if !input.qty.is_finite() || input.qty < 0.0 {
            return Err(ApiError::InvalidInput(t(self.locale, "error.invalid_quantity")));
        }

        if self.ingredient_repo.find_by_id(&input.ingredient_id)?.is_none() {
            return Err(ApiError::NotFound(format!(
                "Ingredient(id={})不存在",
                input.ingredient_id
            )));
        }

        let expiry_date = match non_blank(input.expiry_date.as_deref()) {
            Some(raw) => Some(parse_date(raw).ok_or_else(|| {
                ApiError::InvalidInput(format!("expiry_date 格式错误: {}", raw))
            })?),
            None => None,
        };

        let received_at = match non_blank(input.received_at.as_deref()).and_then(parse_date) {
            Some(d) => d,
            None => self.context_resolver.resolve().await.date,
        };

        let batch = IngredientBatch {
            id: Some(Uuid::new_v4().to_string()),
            ingredient_id: input.ingredient_id,
            qty_remaining: input.qty,
            expiry_date,
            received_at: Some(received_at),
        };
        self.batch_repo.insert(&batch)?;

        info!(qty = batch.qty_remaining, received_at = %received_at, "批次已入库");
        Ok(batch)
    }

    /// 新建原料（名称与单位去除首尾空白后不能为空）
    #[instrument(skip(self, input))]
    pub fn add_ingredient(&self, input: NewIngredientInput) -> ApiResult<Ingredient> {
        let name = input.name.trim();
        let unit = input.unit.trim();
        if name.is_empty() || unit.is_empty() {
            return Err(ApiError::InvalidInput(t(self.locale, "error.ingredient_required")));
        }

        let ingredient = Ingredient {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            unit: unit.to_string(),
            low_stock_days_override: input.low_stock_days_override.filter(|d| *d >= 1),
        };
        self.ingredient_repo.create(&ingredient)?;

        info!(id = %ingredient.id, name = %ingredient.name, "原料已新建");
        Ok(ingredient)
    }

    /// 设置演示模式
    #[instrument(skip(self, demo))]
    pub fn set_demo_override(&self, demo: DemoOverride) -> ApiResult<()> {
        if demo.enabled && demo.demo_date.is_none() {
            warn!("演示模式已启用但未指定日期, 计算时将使用真实日期");
        }
        self.context_repo.upsert_demo_override(&demo)?;
        Ok(())
    }

    /// 清除演示模式
    #[instrument(skip(self))]
    pub fn clear_demo_override(&self) -> ApiResult<()> {
        let removed = self.context_repo.delete_demo_override()?;
        info!(removed, "演示模式已清除");
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
