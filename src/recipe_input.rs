use serde_json::Value;

use crate::aggregator::IngredientLine;

/// Slots in the numbered strIngredientN/strMeasureN field convention.
const NUMBERED_SLOTS: usize = 20;

fn unwrap_meals(recipe: &Value) -> &Value {
    recipe
        .get("meals")
        .and_then(|meals| meals.get(0))
        .unwrap_or(recipe)
}

fn nonempty_str(value: Option<&Value>) -> Option<&str> {
    let text = value?.as_str()?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Extracts ingredient lines from a recipe record. Two shapes are accepted:
/// an explicit `ingredients` array of `{name, measure}` objects (or bare
/// strings), or the numbered `strIngredient1..20` / `strMeasure1..20` field
/// pairs. Records wrapped in a `meals` array are unwrapped to their first
/// element. Anything malformed yields an empty list, never an error.
pub fn ingredient_lines(recipe: &Value) -> Vec<IngredientLine> {
    let record = unwrap_meals(recipe);
    if !record.is_object() {
        return Vec::new();
    }

    if let Some(entries) = record.get("ingredients").and_then(Value::as_array) {
        return entries
            .iter()
            .filter_map(|entry| {
                if let Some(name) = entry.as_str() {
                    let name = name.trim();
                    if name.is_empty() {
                        return None;
                    }
                    return Some(IngredientLine::new(name, ""));
                }
                let name = nonempty_str(entry.get("name"))?;
                let measure = nonempty_str(entry.get("measure")).unwrap_or_default();
                Some(IngredientLine::new(name, measure))
            })
            .collect();
    }

    let mut lines = Vec::new();
    for slot in 1..=NUMBERED_SLOTS {
        let Some(name) = nonempty_str(record.get(format!("strIngredient{slot}"))) else {
            continue;
        };
        let measure = nonempty_str(record.get(format!("strMeasure{slot}"))).unwrap_or_default();
        lines.push(IngredientLine::new(name, measure));
    }
    lines
}

/// Pulls the recipe name out of whichever field the record uses.
pub fn recipe_name(recipe: &Value) -> Option<&str> {
    let record = unwrap_meals(recipe);
    ["strMeal", "name", "title", "recipe_title"]
        .iter()
        .find_map(|field| nonempty_str(record.get(field)))
}

/// Pulls the recipe category, if the record carries one.
pub fn recipe_category(recipe: &Value) -> Option<&str> {
    let record = unwrap_meals(recipe);
    ["strCategory", "category"]
        .iter()
        .find_map(|field| nonempty_str(record.get(field)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_explicit_ingredients_array() {
        let recipe = json!({
            "name": "Pancakes",
            "ingredients": [
                {"name": "Flour", "measure": "2 cups"},
                {"name": "Milk", "measure": "300 ml"},
                {"name": "Salt"}
            ]
        });

        let lines = ingredient_lines(&recipe);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], IngredientLine::new("Flour", "2 cups"));
        assert_eq!(lines[1], IngredientLine::new("Milk", "300 ml"));
        assert_eq!(lines[2], IngredientLine::new("Salt", ""));
    }

    #[test]
    fn test_ingredients_as_bare_strings() {
        let recipe = json!({
            "ingredients": ["Butter", "  ", "Eggs"]
        });

        let lines = ingredient_lines(&recipe);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].raw_name, "Butter");
        assert_eq!(lines[1].raw_name, "Eggs");
    }

    #[test]
    fn test_numbered_slots_skip_gaps() {
        let recipe = json!({
            "strMeal": "Omelette",
            "strIngredient1": "Eggs",
            "strMeasure1": "3",
            "strIngredient2": "",
            "strMeasure2": "1 tsp",
            "strIngredient3": "Butter",
            "strMeasure3": null,
            "strIngredient4": null
        });

        let lines = ingredient_lines(&recipe);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], IngredientLine::new("Eggs", "3"));
        assert_eq!(lines[1], IngredientLine::new("Butter", ""));
    }

    #[test]
    fn test_meals_wrapper_unwraps_first_element() {
        let recipe = json!({
            "meals": [
                {
                    "strMeal": "Beef Wellington",
                    "strCategory": "Beef",
                    "strIngredient1": "Beef fillet",
                    "strMeasure1": "750g"
                },
                {
                    "strMeal": "Second meal ignored",
                    "strIngredient1": "Chicken"
                }
            ]
        });

        let lines = ingredient_lines(&recipe);
        assert_eq!(lines, vec![IngredientLine::new("Beef fillet", "750g")]);
        assert_eq!(recipe_name(&recipe), Some("Beef Wellington"));
        assert_eq!(recipe_category(&recipe), Some("Beef"));
    }

    #[test]
    fn test_malformed_records_yield_empty() {
        assert!(ingredient_lines(&json!(null)).is_empty());
        assert!(ingredient_lines(&json!("just a string")).is_empty());
        assert!(ingredient_lines(&json!([1, 2, 3])).is_empty());
        assert!(ingredient_lines(&json!({"meals": []})).is_empty());
        assert!(ingredient_lines(&json!({"ingredients": "not an array"})).is_empty());
    }

    #[test]
    fn test_name_and_category_field_fallbacks() {
        let recipe = json!({"title": "Lemon Tart", "category": "Dessert"});
        assert_eq!(recipe_name(&recipe), Some("Lemon Tart"));
        assert_eq!(recipe_category(&recipe), Some("Dessert"));

        let recipe = json!({"recipe_title": "Stock"});
        assert_eq!(recipe_name(&recipe), Some("Stock"));
        assert_eq!(recipe_category(&recipe), None);

        assert_eq!(recipe_name(&json!({})), None);
    }
}
