use anyhow::Result;
use serde_json::json;
use std::io::Write;
use tempfile::TempDir;

use nutri_estimate::aggregator::{NutritionAggregator, RecipeNutritionResult};
use nutri_estimate::food_database::{
    FoodDatabase, FOOD_NUTRITION_FILE, FOOD_PORTIONS_FILE, INGREDIENT_NUTRITION_FILE,
};
use nutri_estimate::recipe_input;
use nutri_estimate::servings::{DishCategory, ServingsPolicy};

fn write_reference_tables(dir: &TempDir) -> Result<()> {
    let mut foods = std::fs::File::create(dir.path().join(FOOD_NUTRITION_FILE))?;
    writeln!(
        foods,
        "Food code,Main food description,WWEIA Category number,WWEIA Category description,Energy,Protein,Total Fat"
    )?;
    writeln!(foods, "1001,\"Shrimp, raw\",2204,Shellfish,85,20.1,1.1")?;
    writeln!(foods, "1002,\"Tomato, raw\",6402,Tomatoes,18,0.9,0.2")?;
    writeln!(
        foods,
        "1003,\"Flour, wheat, white, all purpose\",4402,Flours,364,10.3,1.0"
    )?;
    writeln!(foods, "1004,\"Milk, NFS\",9602,Milk,61,3.2,3.3")?;
    writeln!(foods, "1005,\"Chicken, meat only, raw\",2202,Poultry,120,22.5,2.6")?;

    let mut ingredients = std::fs::File::create(dir.path().join(INGREDIENT_NUTRITION_FILE))?;
    writeln!(
        ingredients,
        "Ingredient code,Ingredient description,Category number,Category description,Energy,Protein,Total Fat"
    )?;
    writeln!(ingredients, "2001,\"Water\",94,Beverages,0,0,0")?;

    let mut portions = std::fs::File::create(dir.path().join(FOOD_PORTIONS_FILE))?;
    writeln!(
        portions,
        "Food code,Main food description,Seq num,Portion description,Portion weight (g)"
    )?;
    writeln!(portions, "1002,\"Tomato, raw\",1,1 medium,123")?;
    writeln!(portions, "1004,\"Milk, NFS\",1,1 cup,244")?;

    Ok(())
}

fn load_database() -> Result<(TempDir, FoodDatabase)> {
    let dir = TempDir::new()?;
    write_reference_tables(&dir)?;
    let db = FoodDatabase::load(dir.path())?;
    Ok((dir, db))
}

fn no_progress(_: String) {}

fn estimate(
    database: &FoodDatabase,
    recipe: &serde_json::Value,
    policy: ServingsPolicy,
) -> RecipeNutritionResult {
    let name = recipe_input::recipe_name(recipe);
    let dish = DishCategory::infer(recipe_input::recipe_category(recipe), name);
    let lines = recipe_input::ingredient_lines(recipe);
    NutritionAggregator::new(database, policy).aggregate(&lines, dish, no_progress)
}

#[test]
fn test_numbered_slot_recipe_end_to_end() -> Result<()> {
    let (_dir, db) = load_database()?;
    let recipe = json!({
        "meals": [{
            "strMeal": "Prawn Paella",
            "strCategory": "Seafood",
            "strIngredient1": "Raw king prawns",
            "strMeasure1": "300g",
            "strIngredient2": "Chopped Tomatoes",
            "strMeasure2": "1 (400g) tin",
            "strIngredient3": "Flour",
            "strMeasure3": "2 cups",
            "strIngredient4": "Milk",
            "strMeasure4": "1 cup",
            "strIngredient5": "",
            "strMeasure5": ""
        }]
    });

    let result = estimate(&db, &recipe, ServingsPolicy::WeightBucket);

    assert_eq!(result.total_ingredients, 4);
    assert_eq!(result.matched_count, 4);
    assert_eq!(result.match_rate_percent, 100.0);

    // 300 g prawns resolve to the shrimp record
    assert_eq!(
        result.ingredients[0].matched_description.as_deref(),
        Some("shrimp, raw")
    );
    assert!((result.ingredients[0].grams - 300.0).abs() < 1e-3);

    // The bracketed weight overrides the surrounding tin text
    assert!((result.ingredients[1].grams - 400.0).abs() < 1e-3);

    // 2 cups of flour at density 0.55: 2 x 240 x 0.55
    assert!((result.ingredients[2].grams - 264.0).abs() < 1e-2);

    // 1 cup of milk at density 1.03: 240 x 1.03
    assert!((result.ingredients[3].grams - 247.2).abs() < 1e-2);

    // 1211.2 g lands in the 6-serving weight bucket
    assert!((result.total_weight_grams - 1211.2).abs() < 0.1);
    assert_eq!(result.servings, 6);

    // 300x0.85 + 400x0.18 + 264x3.64 + 247.2x0.61
    assert!((result.totals["Energy"] - 1438.752).abs() < 0.5);
    Ok(())
}

#[test]
fn test_both_policies_agree_on_550g_main() -> Result<()> {
    let (_dir, db) = load_database()?;
    let recipe = json!({
        "name": "Roast Chicken",
        "category": "Chicken",
        "ingredients": [{"name": "chicken breasts", "measure": "550g"}]
    });

    let bucket = estimate(&db, &recipe, ServingsPolicy::WeightBucket);
    let standard = estimate(&db, &recipe, ServingsPolicy::CategoryStandard);

    assert!((bucket.total_weight_grams - 550.0).abs() < 1e-3);
    assert_eq!(bucket.servings, 3);
    assert_eq!(standard.servings, 3);
    Ok(())
}

#[test]
fn test_soup_category_changes_standard_servings() -> Result<()> {
    let (_dir, db) = load_database()?;
    let recipe = json!({
        "strMeal": "Chicken Noodle Soup",
        "strCategory": "Starter",
        "strIngredient1": "Chicken breasts",
        "strMeasure1": "600g"
    });

    // 600 g at the 300 g soup portion gives 2; the weight bucket says 4
    let standard = estimate(&db, &recipe, ServingsPolicy::CategoryStandard);
    assert_eq!(standard.servings, 2);

    let bucket = estimate(&db, &recipe, ServingsPolicy::WeightBucket);
    assert_eq!(bucket.servings, 4);
    Ok(())
}

#[test]
fn test_empty_recipe_degrades_gracefully() -> Result<()> {
    let (_dir, db) = load_database()?;
    let recipe = json!({"name": "Mystery Dish", "ingredients": []});

    let result = estimate(&db, &recipe, ServingsPolicy::WeightBucket);

    assert_eq!(result.total_weight_grams, 0.0);
    assert_eq!(result.servings, 1);
    assert_eq!(result.match_rate_percent, 0.0);
    assert!(result.totals.is_empty());
    assert!(result.per_100g.is_empty());
    assert!(result.per_serving.is_empty());
    Ok(())
}

#[test]
fn test_estimation_is_deterministic() -> Result<()> {
    let (_dir, db) = load_database()?;
    let recipe = json!({
        "name": "Prawn and Tomato Stew",
        "ingredients": [
            {"name": "raw king prawns", "measure": "250g"},
            {"name": "chopped tomatoes", "measure": "2 cups"},
            {"name": "milk", "measure": "½ cup"}
        ]
    });

    let first = estimate(&db, &recipe, ServingsPolicy::CategoryStandard);
    let second = estimate(&db, &recipe, ServingsPolicy::CategoryStandard);

    assert_eq!(
        serde_json::to_value(&first)?,
        serde_json::to_value(&second)?
    );
    Ok(())
}

#[test]
fn test_weight_and_nutrients_are_conserved() -> Result<()> {
    let (_dir, db) = load_database()?;
    let recipe = json!({
        "name": "Prawn Paella",
        "ingredients": [
            {"name": "raw king prawns", "measure": "300g"},
            {"name": "chopped tomatoes", "measure": "1 (400g) tin"},
            {"name": "flour", "measure": "2 cups"}
        ]
    });

    let result = estimate(&db, &recipe, ServingsPolicy::WeightBucket);

    let summed: f32 = result.ingredients.iter().map(|r| r.grams).sum();
    assert!((result.total_weight_grams - summed).abs() < 1e-3);

    for (nutrient, total) in &result.totals {
        let from_100g = result.per_100g[nutrient] * result.total_weight_grams / 100.0;
        assert!((from_100g - total).abs() < 1e-2, "nutrient {}", nutrient);
        let from_servings = result.per_serving[nutrient] * result.servings as f32;
        assert!((from_servings - total).abs() < 1e-2, "nutrient {}", nutrient);
    }
    Ok(())
}
