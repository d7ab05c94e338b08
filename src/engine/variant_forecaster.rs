// ==========================================
// 夜市摊位库存系统 - 规格预测与原料展开
// ==========================================
// 职责: 乘数 × 基准销量 → 预测份数; 份数 × 配方 → 原料需求
// 红线: 需求按 (规格, 原料) 逐行输出, 聚合由 aggregate_usage 单独完成
// ==========================================

use crate::domain::catalog::{Ingredient, MenuVariant, RecipeItem};
use crate::domain::forecast::{
    IngredientNeed, IngredientNeedLine, VariantForecast, VariantForecastDetail,
};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// 菜单项名称缺失时的展示名
const FALLBACK_ITEM_NAME: &str = "Item";

// ==========================================
// VariantForecaster
// ==========================================
pub struct VariantForecaster;

impl VariantForecaster {
    /// 预测每个规格的份数
    ///
    /// forecast_units = round(baseline_daily × multiplier), 半数向上, 下限 0
    #[instrument(skip(variants), fields(count = variants.len()))]
    pub fn forecast(variants: &[MenuVariant], multiplier: f64) -> Vec<VariantForecast> {
        variants
            .iter()
            .map(|v| VariantForecast {
                variant_id: v.id.clone(),
                forecast_units: Self::forecast_units(v.baseline_daily, multiplier),
            })
            .collect()
    }

    /// 单规格预测份数
    pub fn forecast_units(baseline: f64, multiplier: f64) -> i64 {
        let raw = baseline * multiplier;
        if !raw.is_finite() || raw <= 0.0 {
            return 0;
        }
        (raw + 0.5).floor() as i64
    }

    /// 展开原料需求
    ///
    /// 跳过: qty_per_serving <= 0 或该规格预测份数 <= 0 或规格不存在
    pub fn expand_needs(
        recipes: &[RecipeItem],
        forecasts: &[VariantForecast],
    ) -> Vec<IngredientNeed> {
        let units: HashMap<&str, i64> = forecasts
            .iter()
            .map(|f| (f.variant_id.as_str(), f.forecast_units))
            .collect();

        recipes
            .iter()
            .filter_map(|r| {
                let forecast_units = *units.get(r.variant_id.as_str())?;
                if !(r.qty_per_serving > 0.0) || forecast_units <= 0 {
                    return None;
                }
                Some(IngredientNeed {
                    variant_id: r.variant_id.clone(),
                    ingredient_id: r.ingredient_id.clone(),
                    qty_needed: r.qty_per_serving * forecast_units as f64,
                })
            })
            .collect()
    }

    /// 按原料汇总需求量（跨规格求和）
    pub fn aggregate_usage(needs: &[IngredientNeed]) -> HashMap<String, f64> {
        let mut usage: HashMap<String, f64> = HashMap::new();
        for need in needs {
            *usage.entry(need.ingredient_id.clone()).or_insert(0.0) += need.qty_needed;
        }
        debug!(ingredients = usage.len(), "原料需求汇总完成");
        usage
    }

    /// 构造展示用明细（规格 → 原料需求行）
    ///
    /// 原料不存在的需求行不展示
    pub fn build_breakdown(
        variants: &[MenuVariant],
        forecasts: &[VariantForecast],
        needs: &[IngredientNeed],
        ingredients: &[Ingredient],
    ) -> Vec<VariantForecastDetail> {
        let units: HashMap<&str, i64> = forecasts
            .iter()
            .map(|f| (f.variant_id.as_str(), f.forecast_units))
            .collect();
        let by_id: HashMap<&str, &Ingredient> =
            ingredients.iter().map(|i| (i.id.as_str(), i)).collect();

        variants
            .iter()
            .map(|v| {
                let ingredients_needed = needs
                    .iter()
                    .filter(|n| n.variant_id == v.id)
                    .filter_map(|n| {
                        let ing = by_id.get(n.ingredient_id.as_str())?;
                        Some(IngredientNeedLine {
                            ingredient_id: ing.id.clone(),
                            ingredient_name: ing.name.clone(),
                            unit: ing.unit.clone(),
                            qty_needed: n.qty_needed,
                        })
                    })
                    .collect();

                VariantForecastDetail {
                    variant_id: v.id.clone(),
                    item_name: v
                        .item_name
                        .clone()
                        .unwrap_or_else(|| FALLBACK_ITEM_NAME.to_string()),
                    variant_name: v.name.clone(),
                    price: v.price,
                    baseline: v.baseline_daily,
                    forecast_units: units.get(v.id.as_str()).copied().unwrap_or(0),
                    ingredients_needed,
                }
            })
            .collect()
    }
}
