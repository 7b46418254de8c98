use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

// Expected reference table file names inside the data directory
pub const FOOD_NUTRITION_FILE: &str = "food_nutrition.csv";
pub const INGREDIENT_NUTRITION_FILE: &str = "ingredient_nutrition.csv";
pub const FOOD_PORTIONS_FILE: &str = "food_portions.csv";

// Expected column headers
const FOOD_DESCRIPTION_COL: &str = "Main food description";
const INGREDIENT_DESCRIPTION_COL: &str = "Ingredient description";
const PORTION_DESCRIPTION_COL: &str = "Portion description";
const PORTION_WEIGHT_COL: &str = "Portion weight (g)";

// Nutrient columns start here in both nutrient tables; earlier columns are
// codes and category metadata.
const NUTRIENT_COLUMN_OFFSET: usize = 4;

/// Canonical unit spellings probed against portion descriptions when
/// resolving an unknown unit through the portion table. Order matters:
/// the first spelling found in the requested portion wins.
const PORTION_MATCH_UNITS: &[&str] = &[
    "cup",
    "tablespoon",
    "teaspoon",
    "ounce",
    "fl oz",
    "pound",
    "g",
    "kg",
    "ml",
    "liter",
    "pinch",
    "slice",
    "piece",
    "whole",
    "clove",
];

/// Nutrient amounts keyed by nutrient name. Amounts carry a fixed unit per
/// nutrient name; the map never mixes units under one key.
pub type NutrientVector = BTreeMap<String, f32>;

/// One entry of a nutrient reference table: a canonical food description and
/// its nutrient amounts per 100 g.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FoodRecord {
    pub description: String,
    pub nutrients_per_100g: NutrientVector,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PortionWeight {
    pub portion_description: String,
    pub weight_grams: f32,
}

/// Read-only reference food database. Loaded once at startup, then shared
/// by reference across all matching and conversion calls.
#[derive(Debug)]
pub struct FoodDatabase {
    foods: Vec<FoodRecord>,
    // Lowercased descriptions in table order. Scored matching iterates this
    // list, so load order is the tie-break order.
    descriptions: Vec<String>,
    description_index: HashMap<String, usize>,
    ingredient_foods: Vec<FoodRecord>,
    ingredient_index: HashMap<String, usize>,
    portions: HashMap<String, Vec<PortionWeight>>,
}

fn parse_optional_f32(s: &str) -> Option<f32> {
    s.trim().parse::<f32>().ok()
}

// Collapses embedded line breaks and runs of whitespace so headers read
// from wrapped spreadsheet exports can be used as nutrient keys.
fn clean_header(header: &str) -> String {
    header.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| clean_header(h) == name)
        .ok_or_else(|| anyhow::anyhow!("Column '{}' not found", name))
}

fn load_nutrient_table(csv_path: &Path, description_col: &str) -> Result<Vec<FoodRecord>> {
    if !csv_path.exists() {
        return Err(anyhow::anyhow!(
            "Reference CSV file not found at: {:?}",
            csv_path
        ));
    }

    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open reference CSV file at {:?}", csv_path))?;
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers = rdr.headers()?.clone();
    let desc_idx = find_column(&headers, description_col)?;

    let nutrient_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .skip(NUTRIENT_COLUMN_OFFSET)
        .map(|(idx, h)| (idx, clean_header(h)))
        .collect();

    let mut records = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record =
            result.with_context(|| format!("Failed to read record at row index {}", row_index))?;

        let description = record
            .get(desc_idx)
            .ok_or_else(|| anyhow::anyhow!("Missing description at row {}", row_index))?
            .trim()
            .to_string();
        if description.is_empty() {
            continue;
        }

        let mut nutrients_per_100g = NutrientVector::new();
        for (idx, name) in &nutrient_columns {
            if let Some(value) = record.get(*idx).and_then(parse_optional_f32) {
                nutrients_per_100g.insert(name.clone(), value);
            }
        }

        records.push(FoodRecord {
            description,
            nutrients_per_100g,
        });
    }

    if records.is_empty() {
        return Err(anyhow::anyhow!(
            "No valid nutrient records loaded from {:?}",
            csv_path
        ));
    }

    Ok(records)
}

fn load_portion_table(csv_path: &Path) -> Result<HashMap<String, Vec<PortionWeight>>> {
    if !csv_path.exists() {
        return Err(anyhow::anyhow!(
            "Portion CSV file not found at: {:?}",
            csv_path
        ));
    }

    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open portion CSV file at {:?}", csv_path))?;
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers = rdr.headers()?.clone();
    let food_idx = find_column(&headers, FOOD_DESCRIPTION_COL)?;
    let portion_idx = find_column(&headers, PORTION_DESCRIPTION_COL)?;
    let weight_idx = find_column(&headers, PORTION_WEIGHT_COL)?;

    let mut portions: HashMap<String, Vec<PortionWeight>> = HashMap::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record =
            result.with_context(|| format!("Failed to read record at row index {}", row_index))?;

        let food = record
            .get(food_idx)
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default();
        let portion_description = record
            .get(portion_idx)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        let weight_grams = record.get(weight_idx).and_then(parse_optional_f32);

        if food.is_empty() || portion_description.is_empty() {
            continue;
        }
        let Some(weight_grams) = weight_grams else {
            continue;
        };

        portions.entry(food).or_default().push(PortionWeight {
            portion_description,
            weight_grams,
        });
    }

    Ok(portions)
}

impl FoodDatabase {
    /// Loads the three reference tables from `data_dir`. This is the only
    /// fatal failure point of the engine; every later lookup is infallible.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let foods = load_nutrient_table(
            &data_dir.join(FOOD_NUTRITION_FILE),
            FOOD_DESCRIPTION_COL,
        )
        .with_context(|| format!("Failed to load food nutrient table from {:?}", data_dir))?;

        let ingredient_foods = load_nutrient_table(
            &data_dir.join(INGREDIENT_NUTRITION_FILE),
            INGREDIENT_DESCRIPTION_COL,
        )
        .with_context(|| {
            format!("Failed to load ingredient nutrient table from {:?}", data_dir)
        })?;

        let portions = load_portion_table(&data_dir.join(FOOD_PORTIONS_FILE))
            .with_context(|| format!("Failed to load portion table from {:?}", data_dir))?;

        let descriptions: Vec<String> = foods
            .iter()
            .map(|f| f.description.to_lowercase())
            .collect();
        let mut description_index = HashMap::new();
        for (idx, desc) in descriptions.iter().enumerate() {
            description_index.entry(desc.clone()).or_insert(idx);
        }

        let mut ingredient_index = HashMap::new();
        for (idx, record) in ingredient_foods.iter().enumerate() {
            ingredient_index
                .entry(record.description.to_lowercase())
                .or_insert(idx);
        }

        Ok(FoodDatabase {
            foods,
            descriptions,
            description_index,
            ingredient_foods,
            ingredient_index,
            portions,
        })
    }

    /// Lowercased food descriptions in load order.
    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    pub fn contains(&self, description: &str) -> bool {
        self.description_index
            .contains_key(&description.to_lowercase())
    }

    pub fn food_count(&self) -> usize {
        self.foods.len()
    }

    /// Nutrients for `description` scaled to `weight_grams`. Values in the
    /// reference tables are per 100 g. Falls back to the ingredient-level
    /// table when the food-level table has no entry; returns an empty vector
    /// when neither table knows the description.
    pub fn nutrients_for(&self, description: &str, weight_grams: f32) -> NutrientVector {
        let key = description.to_lowercase();
        let record = self
            .description_index
            .get(&key)
            .map(|&idx| &self.foods[idx])
            .or_else(|| {
                self.ingredient_index
                    .get(&key)
                    .map(|&idx| &self.ingredient_foods[idx])
            });

        let Some(record) = record else {
            return NutrientVector::new();
        };

        record
            .nutrients_per_100g
            .iter()
            .map(|(name, value)| (name.clone(), value / 100.0 * weight_grams))
            .collect()
    }

    /// Weight in grams of one portion of `food_description` matching
    /// `portion_description` (for example "1 cup"). Preference order: a
    /// portion mentioning the same unit as the request, then any "cup"
    /// portion, then any "medium" portion, then the first portion on record.
    pub fn find_portion_weight(
        &self,
        food_description: &str,
        portion_description: &str,
    ) -> Option<f32> {
        let food_portions = self.portions.get(&food_description.to_lowercase())?;
        let wanted = portion_description.to_lowercase();

        for unit in PORTION_MATCH_UNITS {
            if wanted.contains(unit) {
                if let Some(found) = food_portions
                    .iter()
                    .find(|p| p.portion_description.to_lowercase().contains(unit))
                {
                    return Some(found.weight_grams);
                }
            }
        }

        for fallback in ["cup", "medium"] {
            if let Some(found) = food_portions
                .iter()
                .find(|p| p.portion_description.to_lowercase().contains(fallback))
            {
                return Some(found.weight_grams);
            }
        }

        food_portions.first().map(|p| p.weight_grams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_test_tables(dir: &TempDir) -> Result<()> {
        let mut foods = std::fs::File::create(dir.path().join(FOOD_NUTRITION_FILE))?;
        writeln!(
            foods,
            "Food code,{},WWEIA Category number,WWEIA Category description,Energy,Protein,Total Fat",
            FOOD_DESCRIPTION_COL
        )?;
        writeln!(foods, "1001,\"Milk, whole\",9602,Milk,61,3.2,3.3")?;
        writeln!(foods, "1002,\"Cheddar cheese\",1602,Cheese,403,23,33")?;
        writeln!(foods, "1003,\"Shrimp, raw\",2204,Shellfish,85,20,")?;
        writeln!(foods, "1004,,0,Empty,1,1,1")?;

        let mut ingredients = std::fs::File::create(dir.path().join(INGREDIENT_NUTRITION_FILE))?;
        writeln!(
            ingredients,
            "Ingredient code,{},Category number,Category description,Energy,Protein,Total Fat",
            INGREDIENT_DESCRIPTION_COL
        )?;
        writeln!(ingredients, "2001,\"Cornstarch\",18,Starches,381,0.3,0.1")?;

        let mut portions = std::fs::File::create(dir.path().join(FOOD_PORTIONS_FILE))?;
        writeln!(
            portions,
            "Food code,{},Seq num,{},\"Portion weight\n(g)\"",
            FOOD_DESCRIPTION_COL, PORTION_DESCRIPTION_COL
        )?;
        writeln!(portions, "1001,\"Milk, whole\",1,1 cup,244")?;
        writeln!(portions, "1001,\"Milk, whole\",2,1 fl oz,30.5")?;
        writeln!(portions, "1002,\"Cheddar cheese\",1,1 slice,21")?;
        writeln!(portions, "1002,\"Cheddar cheese\",2,1 cup shredded,113")?;

        Ok(())
    }

    fn load_test_database() -> Result<(TempDir, FoodDatabase)> {
        let dir = TempDir::new()?;
        write_test_tables(&dir)?;
        let db = FoodDatabase::load(dir.path())?;
        Ok((dir, db))
    }

    #[test]
    fn test_load_indexes_descriptions_in_order() -> Result<()> {
        let (_dir, db) = load_test_database()?;
        assert_eq!(db.food_count(), 3); // empty-description row skipped
        assert_eq!(
            db.descriptions(),
            &["milk, whole", "cheddar cheese", "shrimp, raw"]
        );
        assert!(db.contains("Milk, whole"));
        assert!(!db.contains("butter"));
        Ok(())
    }

    #[test]
    fn test_nutrients_scaled_by_weight() -> Result<()> {
        let (_dir, db) = load_test_database()?;
        let nutrients = db.nutrients_for("Milk, whole", 50.0);
        assert!((nutrients["Energy"] - 30.5).abs() < 1e-3);
        assert!((nutrients["Protein"] - 1.6).abs() < 1e-3);

        // Unparsable fat cell is absent rather than zero
        let shrimp = db.nutrients_for("shrimp, raw", 100.0);
        assert!((shrimp["Energy"] - 85.0).abs() < 1e-3);
        assert!(shrimp.get("Total Fat").is_none());
        Ok(())
    }

    #[test]
    fn test_nutrients_fall_back_to_ingredient_table() -> Result<()> {
        let (_dir, db) = load_test_database()?;
        let nutrients = db.nutrients_for("Cornstarch", 200.0);
        assert!((nutrients["Energy"] - 762.0).abs() < 1e-3);

        let missing = db.nutrients_for("unobtainium", 100.0);
        assert!(missing.is_empty());
        Ok(())
    }

    #[test]
    fn test_portion_weight_preference_order() -> Result<()> {
        let (_dir, db) = load_test_database()?;
        // Exact unit mention wins
        assert_eq!(db.find_portion_weight("Milk, whole", "1 fl oz"), Some(30.5));
        // Unknown unit falls back to the cup portion
        assert_eq!(
            db.find_portion_weight("Cheddar cheese", "1 knob"),
            Some(113.0)
        );
        // Unlisted food has no portion data
        assert_eq!(db.find_portion_weight("unobtainium", "1 cup"), None);
        Ok(())
    }

    #[test]
    fn test_load_missing_column_is_fatal() -> Result<()> {
        let dir = TempDir::new()?;
        write_test_tables(&dir)?;
        let mut foods = std::fs::File::create(dir.path().join(FOOD_NUTRITION_FILE))?;
        writeln!(foods, "Food code,Name,Energy")?;
        writeln!(foods, "1,Milk,61")?;

        let result = FoodDatabase::load(dir.path());
        assert!(result.is_err());
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains(&format!("Column '{}' not found", FOOD_DESCRIPTION_COL)));
        Ok(())
    }

    #[test]
    fn test_load_missing_file_is_fatal() -> Result<()> {
        let dir = TempDir::new()?;
        let result = FoodDatabase::load(dir.path());
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn test_header_cleaning_strips_line_breaks() {
        assert_eq!(clean_header("Portion weight\n(g)"), "Portion weight (g)");
        assert_eq!(clean_header("Energy"), "Energy");
    }
}
