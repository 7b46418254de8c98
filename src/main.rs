use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rayon::prelude::*;

use nutri_estimate::aggregator::{NutritionAggregator, RecipeNutritionResult};
use nutri_estimate::cli::parse_args;
use nutri_estimate::food_database::FoodDatabase;
use nutri_estimate::recipe_input;
use nutri_estimate::servings::DishCategory;

/// Display units for reported nutrients, matched by name prefix. Anything
/// not listed prints as grams.
static NUTRIENT_UNITS: &[(&str, &str)] = &[
    ("Energy", "kcal"),
    ("Cholesterol", "mg"),
    ("Sodium", "mg"),
    ("Calcium", "mg"),
    ("Iron", "mg"),
    ("Magnesium", "mg"),
    ("Phosphorus", "mg"),
    ("Potassium", "mg"),
    ("Zinc", "mg"),
    ("Copper", "mg"),
    ("Selenium", "mcg"),
    ("Retinol", "mcg"),
    ("Carotene", "mcg"),
    ("Vitamin", "mg"),
    ("Thiamin", "mg"),
    ("Riboflavin", "mg"),
    ("Niacin", "mg"),
    ("Folate", "mcg"),
    ("Folic acid", "mcg"),
    ("Choline", "mg"),
    ("Caffeine", "mg"),
];

fn nutrient_unit(name: &str) -> &'static str {
    NUTRIENT_UNITS
        .iter()
        .find(|(prefix, _)| name.starts_with(prefix))
        .map(|(_, unit)| *unit)
        .unwrap_or("g")
}

fn print_nutrient_block(nutrients: &nutri_estimate::food_database::NutrientVector) {
    for (nutrient, value) in nutrients {
        if nutrient.starts_with("Energy") {
            let kilojoules = (value * 4.184).round();
            println!("  {}: {:.0} kJ ({:.0} cal)", nutrient, kilojoules, value);
        } else {
            println!("  {}: {:.1} {}", nutrient, value, nutrient_unit(nutrient));
        }
    }
}

fn print_nutrition_report(recipe_name: &str, result: &RecipeNutritionResult) {
    println!("\n=== Nutrition estimate: {} ===", recipe_name);
    println!(
        "Total weight: {:.0} g | Servings: {} | Matched ingredients: {}/{} ({:.0}%)",
        result.total_weight_grams,
        result.servings,
        result.matched_count,
        result.total_ingredients,
        result.match_rate_percent
    );

    println!("\nPer serving:");
    print_nutrient_block(&result.per_serving);

    println!("\nPer 100 g:");
    print_nutrient_block(&result.per_100g);

    let unmatched: Vec<&str> = result
        .ingredients
        .iter()
        .filter(|resolution| !resolution.matched)
        .map(|resolution| resolution.raw_name.as_str())
        .collect();
    if !unmatched.is_empty() {
        println!("\nUnmatched ingredients: {}", unmatched.join(", "));
    }
}

fn process_recipe(
    recipe: &serde_json::Value,
    aggregator: &NutritionAggregator,
    progress_updater: impl Fn(String),
) -> (String, RecipeNutritionResult) {
    let name = recipe_input::recipe_name(recipe)
        .unwrap_or("Unnamed recipe")
        .to_string();
    let dish = DishCategory::infer(recipe_input::recipe_category(recipe), Some(&name));
    let lines = recipe_input::ingredient_lines(recipe);
    let result = aggregator.aggregate(&lines, dish, progress_updater);
    (name, result)
}

fn main() -> Result<()> {
    let cli_args = parse_args();

    println!(
        "Loading reference nutrition data from '{}'...",
        cli_args.data_dir
    );
    let database = FoodDatabase::load(Path::new(&cli_args.data_dir)).with_context(|| {
        format!(
            "Failed to load reference nutrition data from '{}'",
            cli_args.data_dir
        )
    })?;
    println!("Loaded {} reference foods.", database.food_count());

    let recipe_content = fs::read_to_string(&cli_args.recipe_file)
        .with_context(|| format!("Failed to read recipe file '{}'", cli_args.recipe_file))?;
    let recipe_json: serde_json::Value = serde_json::from_str(&recipe_content)
        .with_context(|| format!("Recipe file '{}' is not valid JSON", cli_args.recipe_file))?;

    let aggregator = NutritionAggregator::new(&database, cli_args.servings_policy);

    let results: Vec<(String, RecipeNutritionResult)> = if cli_args.batch {
        let recipes = recipe_json
            .as_array()
            .context("Batch mode expects the recipe file to hold a JSON array")?;
        println!("Processing {} recipes in batch mode...", recipes.len());
        recipes
            .par_iter()
            .map(|recipe| process_recipe(recipe, &aggregator, |_message| {}))
            .collect()
    } else {
        let progress_callback = |message: String| {
            println!("{}", message);
        };
        vec![process_recipe(&recipe_json, &aggregator, progress_callback)]
    };

    for (name, result) in &results {
        print_nutrition_report(name, result);
    }

    if let Some(output_path) = &cli_args.output {
        let reports: Vec<serde_json::Value> = results
            .iter()
            .map(|(name, result)| serde_json::json!({"recipe": name, "nutrition": result}))
            .collect();
        let payload = if cli_args.batch {
            serde_json::to_string_pretty(&reports)?
        } else {
            serde_json::to_string_pretty(&reports[0])?
        };
        fs::write(output_path, payload)
            .with_context(|| format!("Failed to write results to '{}'", output_path))?;
        println!("\nResults written to {}", output_path);
    }

    Ok(())
}
