// ==========================================
// 夜市摊位库存系统 - 预测看板 API
// ==========================================
// 职责: 并发读取 → 计算流水线 → 看板快照
// 流程:
// 1. 上下文解析 / 权重读取 / 四类必需数据读取 并发进行
// 2. 乘数 = f(上下文, 权重)
// 3. 规格预测 → 原料需求 → 用量汇总
// 4. 库存聚合 → 预警
// 红线: 必需数据任一读取失败 → 整体失败（DataLoadFailed）
// ==========================================

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::api::error::{ApiError, ApiResult};
use crate::config::ForecastSettingsProvider;
use crate::domain::catalog::{Ingredient, IngredientBatch, MenuVariant, RecipeItem};
use crate::domain::context::TodayContext;
use crate::domain::forecast::{
    ForecastSettings, IngredientNeed, IngredientUsage, VariantForecast, VariantForecastDetail,
};
use crate::domain::stock::{InventoryRow, StockAlert};
use crate::engine::{
    AlertGenerator, ContextResolver, ForecastDataSource, MultiplierCalculator, StockAggregator,
    VariantForecaster,
};
use crate::i18n::{t, t_with_args, Locale};

// ==========================================
// DashboardSnapshot - 看板快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub context: TodayContext,
    pub settings: ForecastSettings,
    pub multiplier: f64,
    pub variants: Vec<VariantForecastDetail>,
    pub total_forecast_units: i64,
    pub ingredient_usage: Vec<IngredientUsage>,
    pub alerts: Vec<StockAlert>,
    /// 06:00 简报文案（已本地化）
    pub briefing: Vec<String>,
}

/// 四类必需数据
#[derive(Debug, Clone, Default)]
pub struct ForecastInputs {
    pub ingredients: Vec<Ingredient>,
    pub batches: Vec<IngredientBatch>,
    pub recipe_items: Vec<RecipeItem>,
    pub variants: Vec<MenuVariant>,
}

// ==========================================
// ForecastApi
// ==========================================
pub struct ForecastApi {
    context_resolver: Arc<ContextResolver>,
    settings_provider: Arc<ForecastSettingsProvider>,
    data_source: Arc<dyn ForecastDataSource>,
    locale: Locale,
}

impl ForecastApi {
    pub fn new(
        context_resolver: Arc<ContextResolver>,
        settings_provider: Arc<ForecastSettingsProvider>,
        data_source: Arc<dyn ForecastDataSource>,
        locale: Locale,
    ) -> Self {
        Self {
            context_resolver,
            settings_provider,
            data_source,
            locale,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 加载看板快照
    #[instrument(skip(self), fields(locale = %self.locale))]
    pub async fn load_dashboard(&self) -> ApiResult<DashboardSnapshot> {
        let (ctx, settings, inputs) = futures::join!(
            self.context_resolver.resolve(),
            self.settings_provider.fetch(),
            self.load_inputs(),
        );
        let inputs = inputs?;

        let snapshot = build_snapshot(ctx, settings, &inputs, self.locale);
        info!(
            date = %snapshot.context.date_iso,
            multiplier = snapshot.multiplier,
            total_forecast_units = snapshot.total_forecast_units,
            alerts = snapshot.alerts.len(),
            "看板快照计算完成"
        );
        Ok(snapshot)
    }

    /// 按给定乘数与计划日计算库存预警
    #[instrument(skip(self, ctx), fields(date = %ctx.date_iso))]
    pub async fn compute_stock_alerts(
        &self,
        multiplier: f64,
        ctx: &TodayContext,
    ) -> ApiResult<Vec<StockAlert>> {
        let inputs = self.load_inputs().await?;
        let computed = forecast_usage(&inputs, multiplier);
        let stock = StockAggregator::aggregate(&inputs.batches, ctx.date);
        Ok(AlertGenerator::new(self.locale).generate(
            &inputs.ingredients,
            &computed.usage,
            &stock,
        ))
    }

    /// 库存总览（以计划日为基准）
    #[instrument(skip(self))]
    pub async fn inventory_overview(&self) -> ApiResult<Vec<InventoryRow>> {
        let data = self.data_source.as_ref();
        let (ctx, loaded) = futures::join!(
            self.context_resolver.resolve(),
            async {
                futures::try_join!(
                    async {
                        data.load_ingredients()
                            .await
                            .map_err(|e| ApiError::load_failed("ingredients", e))
                    },
                    async {
                        data.load_batches()
                            .await
                            .map_err(|e| ApiError::load_failed("ingredient_batches", e))
                    },
                )
            },
        );
        let (ingredients, batches) = loaded?;

        Ok(StockAggregator::inventory_overview(
            &ingredients,
            &batches,
            ctx.date,
        ))
    }

    /// 并发读取四类必需数据
    pub async fn load_inputs(&self) -> ApiResult<ForecastInputs> {
        let data = self.data_source.as_ref();
        let (ingredients, batches, recipe_items, variants) = futures::try_join!(
            async {
                data.load_ingredients()
                    .await
                    .map_err(|e| ApiError::load_failed("ingredients", e))
            },
            async {
                data.load_batches()
                    .await
                    .map_err(|e| ApiError::load_failed("ingredient_batches", e))
            },
            async {
                data.load_recipe_items()
                    .await
                    .map_err(|e| ApiError::load_failed("recipe_items", e))
            },
            async {
                data.load_menu_variants()
                    .await
                    .map_err(|e| ApiError::load_failed("menu_variants", e))
            },
        )?;

        Ok(ForecastInputs {
            ingredients,
            batches,
            recipe_items,
            variants,
        })
    }
}

// ==========================================
// 纯计算部分
// ==========================================

/// 预测中间结果
struct ForecastComputation {
    forecasts: Vec<VariantForecast>,
    needs: Vec<IngredientNeed>,
    usage: HashMap<String, f64>,
}

fn forecast_usage(inputs: &ForecastInputs, multiplier: f64) -> ForecastComputation {
    let forecasts = VariantForecaster::forecast(&inputs.variants, multiplier);
    let needs = VariantForecaster::expand_needs(&inputs.recipe_items, &forecasts);
    let usage = VariantForecaster::aggregate_usage(&needs);
    ForecastComputation {
        forecasts,
        needs,
        usage,
    }
}

/// 由上下文、权重与已读取的数据计算看板快照
pub fn build_snapshot(
    ctx: TodayContext,
    settings: ForecastSettings,
    inputs: &ForecastInputs,
    locale: Locale,
) -> DashboardSnapshot {
    let multiplier = MultiplierCalculator::combine(&settings, &ctx);

    let ForecastComputation {
        forecasts,
        needs,
        usage,
    } = forecast_usage(inputs, multiplier);
    let variants = VariantForecaster::build_breakdown(
        &inputs.variants,
        &forecasts,
        &needs,
        &inputs.ingredients,
    );
    let total_forecast_units = forecasts.iter().map(|f| f.forecast_units).sum();

    let stock = StockAggregator::aggregate(&inputs.batches, ctx.date);
    let alerts = AlertGenerator::new(locale).generate(&inputs.ingredients, &usage, &stock);
    let ingredient_usage = StockAggregator::usage_rows(&inputs.ingredients, &usage, &stock);

    let briefing = briefing_lines(&ctx, multiplier, total_forecast_units, alerts.is_empty(), locale);

    DashboardSnapshot {
        context: ctx,
        settings,
        multiplier,
        variants,
        total_forecast_units,
        ingredient_usage,
        alerts,
        briefing,
    }
}

/// 06:00 简报
pub fn briefing_lines(
    ctx: &TodayContext,
    multiplier: f64,
    total_forecast_units: i64,
    no_alerts: bool,
    locale: Locale,
) -> Vec<String> {
    let weather = t(locale, ctx.weather.i18n_key());
    let multiplier_text = format!("{:.2}", multiplier);
    let total = total_forecast_units.to_string();

    let mut lines = vec![
        t_with_args(locale, "briefing.title", &[("date", ctx.date_iso.as_str())]),
        t_with_args(locale, "briefing.weather", &[("weather", weather.as_str())]),
    ];

    if ctx.is_public_holiday {
        lines.push(t(locale, "briefing.public_holiday"));
    }
    if let (true, Some(label)) = (ctx.has_local_event, ctx.local_event_label.as_deref()) {
        lines.push(t_with_args(locale, "briefing.local_event", &[("label", label)]));
    }

    lines.push(t_with_args(
        locale,
        "briefing.multiplier",
        &[("multiplier", multiplier_text.as_str())],
    ));
    lines.push(t_with_args(locale, "briefing.total_forecast", &[("total", total.as_str())]));

    if no_alerts {
        lines.push(t(locale, "briefing.no_alerts"));
    }

    lines
}
