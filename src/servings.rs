use clap::ValueEnum;
use serde::Serialize;

/// The two serving-count estimates. They are not equivalent; callers pick
/// which one a pipeline stage treats as authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServingsPolicy {
    /// Bucket the total weight into one of {2, 3, 4, 5, 6, 8} servings.
    WeightBucket,
    /// Divide the total weight by a standard portion for the dish category,
    /// clamped to 1..=12 servings.
    CategoryStandard,
}

impl ServingsPolicy {
    pub fn estimate(&self, total_grams: f32, dish: DishCategory) -> u32 {
        match self {
            ServingsPolicy::WeightBucket => weight_bucket(total_grams),
            ServingsPolicy::CategoryStandard => category_standard(total_grams, dish),
        }
    }
}

/// Dish shape a recipe is served as, inferred from its category and name.
/// Sets the standard portion size for the category-standard policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DishCategory {
    #[default]
    Main,
    Soup,
    Salad,
    Dessert,
}

const SOUP_KEYWORDS: &[&str] = &["soup", "stew", "broth", "汤"];
const SALAD_KEYWORDS: &[&str] = &["salad", "沙拉"];
const DESSERT_KEYWORDS: &[&str] = &["dessert", "cake", "sweet", "pudding", "甜点"];

impl DishCategory {
    /// Grams in one standard serving of this kind of dish.
    pub fn portion_grams(&self) -> f32 {
        match self {
            DishCategory::Main => 200.0,
            DishCategory::Soup => 300.0,
            DishCategory::Salad => 125.0,
            DishCategory::Dessert => 100.0,
        }
    }

    /// Infers the dish shape from recipe category and name text. Soup wins
    /// over salad over dessert; anything else is a main.
    pub fn infer(category: Option<&str>, name: Option<&str>) -> Self {
        let text = format!(
            "{} {}",
            category.unwrap_or_default(),
            name.unwrap_or_default()
        )
        .to_lowercase();

        if SOUP_KEYWORDS.iter().any(|k| text.contains(k)) {
            DishCategory::Soup
        } else if SALAD_KEYWORDS.iter().any(|k| text.contains(k)) {
            DishCategory::Salad
        } else if DESSERT_KEYWORDS.iter().any(|k| text.contains(k)) {
            DishCategory::Dessert
        } else {
            DishCategory::Main
        }
    }
}

/// Serving count from fixed weight buckets. Always one of {2, 3, 4, 5, 6, 8}.
pub fn weight_bucket(total_grams: f32) -> u32 {
    match total_grams {
        w if w < 300.0 => 2,
        w if w < 600.0 => 3,
        w if w < 900.0 => 4,
        w if w < 1200.0 => 5,
        w if w < 1500.0 => 6,
        _ => 8,
    }
}

/// Serving count from the dish category's standard portion size, clamped to
/// 1..=12.
pub fn category_standard(total_grams: f32, dish: DishCategory) -> u32 {
    let servings = (total_grams / dish.portion_grams()).round() as i64;
    servings.clamp(1, 12) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_bucket_boundaries() {
        assert_eq!(weight_bucket(0.0), 2);
        assert_eq!(weight_bucket(299.9), 2);
        assert_eq!(weight_bucket(300.0), 3);
        assert_eq!(weight_bucket(550.0), 3);
        assert_eq!(weight_bucket(600.0), 4);
        assert_eq!(weight_bucket(1199.9), 5);
        assert_eq!(weight_bucket(1200.0), 6);
        assert_eq!(weight_bucket(5000.0), 8);
    }

    #[test]
    fn test_weight_bucket_codomain() {
        for grams in (0..4000).step_by(37) {
            let servings = weight_bucket(grams as f32);
            assert!([2, 3, 4, 5, 6, 8].contains(&servings));
        }
    }

    #[test]
    fn test_category_standard_portions() {
        assert_eq!(category_standard(550.0, DishCategory::Main), 3);
        assert_eq!(category_standard(600.0, DishCategory::Soup), 2);
        assert_eq!(category_standard(250.0, DishCategory::Salad), 2);
        assert_eq!(category_standard(350.0, DishCategory::Dessert), 4);
    }

    #[test]
    fn test_category_standard_clamps() {
        assert_eq!(category_standard(0.0, DishCategory::Main), 1);
        assert_eq!(category_standard(50.0, DishCategory::Main), 1);
        assert_eq!(category_standard(99999.0, DishCategory::Main), 12);
    }

    #[test]
    fn test_category_standard_bounds() {
        for grams in (0..10000).step_by(111) {
            for dish in [
                DishCategory::Main,
                DishCategory::Soup,
                DishCategory::Salad,
                DishCategory::Dessert,
            ] {
                let servings = category_standard(grams as f32, dish);
                assert!((1..=12).contains(&servings));
            }
        }
    }

    #[test]
    fn test_dish_inference() {
        assert_eq!(
            DishCategory::infer(Some("Starter"), Some("Chicken Noodle Soup")),
            DishCategory::Soup
        );
        assert_eq!(
            DishCategory::infer(None, Some("番茄汤")),
            DishCategory::Soup
        );
        assert_eq!(
            DishCategory::infer(None, Some("Greek Salad")),
            DishCategory::Salad
        );
        assert_eq!(
            DishCategory::infer(Some("Dessert"), Some("Chocolate Cake")),
            DishCategory::Dessert
        );
        assert_eq!(
            DishCategory::infer(Some("Beef"), Some("Beef Wellington")),
            DishCategory::Main
        );
        assert_eq!(DishCategory::infer(None, None), DishCategory::Main);
    }

    #[test]
    fn test_policies_disagree_on_small_recipes() {
        // The policies are deliberately kept separate: below 300 g the
        // bucket policy says 2 while the category policy can say 1
        assert_eq!(
            ServingsPolicy::WeightBucket.estimate(150.0, DishCategory::Main),
            2
        );
        assert_eq!(
            ServingsPolicy::CategoryStandard.estimate(150.0, DishCategory::Main),
            1
        );
    }
}
