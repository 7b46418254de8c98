use serde::Serialize;

use crate::food_database::FoodDatabase;
use crate::quantity;

/// Grams a matched food falls back to when neither the unit table nor the
/// portion table can convert it.
pub const DEFAULT_WEIGHT_GRAMS: f32 = 100.0;

/// Base grams per unit for the canonical vocabulary. Volume units hold the
/// weight of water and get a density adjustment per matched food.
static UNIT_GRAMS: &[(&str, f32)] = &[
    // mass
    ("mg", 0.001),
    ("g", 1.0),
    ("kg", 1000.0),
    ("oz", 28.35),
    ("lb", 453.59),
    // volume
    ("ml", 1.0),
    ("l", 1000.0),
    ("fl_oz", 30.0),
    ("cup", 240.0),
    ("tbsp", 15.0),
    ("tsp", 5.0),
    // informal
    ("pinch", 0.36),
    ("dash", 0.6),
    ("drop", 0.05),
    ("clove", 5.0),
    ("slice", 25.0),
    ("whole", 100.0),
    ("to_taste", 0.5),
    ("a_little", 2.0),
];

const VOLUME_UNITS: &[&str] = &["ml", "l", "fl_oz", "cup", "tbsp", "tsp"];

/// Density multipliers keyed by description keyword. The first keyword found
/// inside the matched description wins; foods matching none count as water.
static DENSITY_KEYWORDS: &[(&str, f32)] = &[
    ("milk", 1.03),
    ("cream", 1.01),
    ("oil", 0.92),
    ("butter", 0.91),
    ("flour", 0.55),
    ("sugar", 0.85),
    ("honey", 1.42),
    ("syrup", 1.33),
    ("rice", 0.75),
    ("salt", 1.2),
];

/// Where a gram figure came from. `DefaultWeight` marks the 100 g fallback
/// that callers report as an unconvertible unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionSource {
    UnitTable,
    PortionTable,
    DefaultWeight,
}

#[derive(Debug, Clone, Serialize)]
pub struct GramConversion {
    pub grams: f32,
    pub source: ConversionSource,
}

fn density_for(description: &str) -> f32 {
    let description = description.to_lowercase();
    DENSITY_KEYWORDS
        .iter()
        .find(|(keyword, _)| description.contains(keyword))
        .map(|(_, density)| *density)
        .unwrap_or(1.0)
}

/// Converts parsed quantities into gram weights, borrowing the loaded
/// database for portion lookups.
pub struct UnitConverter<'a> {
    database: &'a FoodDatabase,
}

impl<'a> UnitConverter<'a> {
    pub fn new(database: &'a FoodDatabase) -> Self {
        UnitConverter { database }
    }

    /// Converts `amount` of `unit` of the matched food to grams. Units in
    /// the fixed table convert directly, with a density adjustment for
    /// volumes; anything else is normalized and tried against the food's
    /// portion table; failing both, the fixed default weight is returned.
    pub fn to_grams(&self, amount: f32, unit: &str, matched_description: &str) -> GramConversion {
        let unit = unit.trim().to_lowercase();

        if let Some((_, base)) = UNIT_GRAMS.iter().find(|(name, _)| *name == unit) {
            let mut grams = amount * base;
            if VOLUME_UNITS.contains(&unit.as_str()) {
                grams *= density_for(matched_description);
            }
            return GramConversion {
                grams,
                source: ConversionSource::UnitTable,
            };
        }

        let portion_unit = quantity::canonical_unit(&unit).unwrap_or(&unit);
        if let Some(portion_grams) = self
            .database
            .find_portion_weight(matched_description, portion_unit)
        {
            return GramConversion {
                grams: amount * portion_grams,
                source: ConversionSource::PortionTable,
            };
        }

        GramConversion {
            grams: DEFAULT_WEIGHT_GRAMS,
            source: ConversionSource::DefaultWeight,
        }
    }
}
