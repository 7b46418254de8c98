use serde::Serialize;

use crate::food_database::{FoodDatabase, NutrientVector};
use crate::matcher::FoodMatcher;
use crate::normalizer;
use crate::quantity;
use crate::servings::{DishCategory, ServingsPolicy};
use crate::unit_converter::{ConversionSource, UnitConverter};

/// One recipe entry as supplied by the caller: free ingredient text plus an
/// optional measurement string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientLine {
    pub raw_name: String,
    pub raw_measure: String,
}

impl IngredientLine {
    pub fn new(raw_name: impl Into<String>, raw_measure: impl Into<String>) -> Self {
        IngredientLine {
            raw_name: raw_name.into(),
            raw_measure: raw_measure.into(),
        }
    }
}

/// How one ingredient line fared, kept on the result for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct IngredientResolution {
    pub raw_name: String,
    pub simplified_name: String,
    pub matched_description: Option<String>,
    pub grams: f32,
    pub matched: bool,
}

/// Nutrition facts for one whole recipe. `per_100g` is empty when nothing
/// contributed weight; `servings` is at least 1.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeNutritionResult {
    pub totals: NutrientVector,
    pub per_100g: NutrientVector,
    pub per_serving: NutrientVector,
    pub total_weight_grams: f32,
    pub servings: u32,
    pub servings_policy: ServingsPolicy,
    pub matched_count: usize,
    pub total_ingredients: usize,
    pub match_rate_percent: f32,
    pub ingredients: Vec<IngredientResolution>,
}

/// Runs the per-ingredient resolution pipeline and accumulates recipe
/// totals. Holds only borrows of the read-only database, so one aggregator
/// per thread over a shared database is fine.
pub struct NutritionAggregator<'a> {
    database: &'a FoodDatabase,
    matcher: FoodMatcher<'a>,
    converter: UnitConverter<'a>,
    policy: ServingsPolicy,
}

impl<'a> NutritionAggregator<'a> {
    pub fn new(database: &'a FoodDatabase, policy: ServingsPolicy) -> Self {
        NutritionAggregator {
            database,
            matcher: FoodMatcher::new(database),
            converter: UnitConverter::new(database),
            policy,
        }
    }

    /// Aggregates nutrition for one recipe. Never fails: unresolved
    /// ingredients, unparseable measures, and unconvertible units are
    /// reported through `progress_updater` and degrade the result instead
    /// of aborting it.
    pub fn aggregate(
        &self,
        lines: &[IngredientLine],
        dish: DishCategory,
        progress_updater: impl Fn(String),
    ) -> RecipeNutritionResult {
        let mut totals = NutrientVector::new();
        let mut total_weight_grams = 0.0_f32;
        let mut matched_count = 0usize;
        let mut resolutions = Vec::with_capacity(lines.len());

        for (index, line) in lines.iter().enumerate() {
            let normalized = normalizer::normalize(&line.raw_name);
            progress_updater(format!(
                "Resolving ingredient {}/{}: '{}' -> '{}'",
                index + 1,
                lines.len(),
                line.raw_name,
                normalized.simplified
            ));

            let match_result = self.matcher.find_match(&normalized.simplified);
            let Some(description) = match_result.description else {
                progress_updater(format!(
                    "   -> No reference food found for '{}'; excluded from totals",
                    line.raw_name
                ));
                resolutions.push(IngredientResolution {
                    raw_name: line.raw_name.clone(),
                    simplified_name: normalized.simplified,
                    matched_description: None,
                    grams: 0.0,
                    matched: false,
                });
                continue;
            };

            let parsed = match quantity::try_parse(&line.raw_measure) {
                Some(parsed) => parsed,
                None => {
                    progress_updater(format!(
                        "   -> Could not parse measure '{}'; assuming 1 {}",
                        line.raw_measure,
                        quantity::DEFAULT_UNIT
                    ));
                    quantity::parse("")
                }
            };

            let conversion = self
                .converter
                .to_grams(parsed.amount, &parsed.unit, &description);
            if conversion.source == ConversionSource::DefaultWeight {
                progress_updater(format!(
                    "   -> No conversion for {} {} of '{}'; assuming {} g",
                    parsed.amount, parsed.unit, description, conversion.grams
                ));
            }

            let nutrients = self.database.nutrients_for(&description, conversion.grams);
            if nutrients.is_empty() {
                progress_updater(format!(
                    "   -> No nutrient data on record for '{}'",
                    description
                ));
            }
            for (name, value) in nutrients {
                *totals.entry(name).or_insert(0.0) += value;
            }

            progress_updater(format!(
                "   -> Matched '{}' as '{}' ({:.1} g)",
                line.raw_name, description, conversion.grams
            ));

            total_weight_grams += conversion.grams;
            matched_count += 1;
            resolutions.push(IngredientResolution {
                raw_name: line.raw_name.clone(),
                simplified_name: normalized.simplified,
                matched_description: Some(description),
                grams: conversion.grams,
                matched: true,
            });
        }

        let per_100g = if total_weight_grams > 0.0 {
            let scale_factor = 100.0 / total_weight_grams;
            totals
                .iter()
                .map(|(name, value)| (name.clone(), value * scale_factor))
                .collect()
        } else {
            NutrientVector::new()
        };

        let servings = if total_weight_grams > 0.0 {
            self.policy.estimate(total_weight_grams, dish)
        } else {
            1
        };

        let per_serving = totals
            .iter()
            .map(|(name, value)| (name.clone(), value / servings as f32))
            .collect();

        let match_rate_percent = if lines.is_empty() {
            0.0
        } else {
            matched_count as f32 / lines.len() as f32 * 100.0
        };

        RecipeNutritionResult {
            totals,
            per_100g,
            per_serving,
            total_weight_grams,
            servings,
            servings_policy: self.policy,
            matched_count,
            total_ingredients: lines.len(),
            match_rate_percent,
            ingredients: resolutions,
        }
    }
}
