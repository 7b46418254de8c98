use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::taxonomy;

/// An ingredient name reduced to its core food tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedName {
    pub simplified: String,
    pub core_tokens: Vec<String>,
}

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("invalid parenthetical pattern"));

// Token shapes stripped as quantities: "2", "(400g)", "400g"
static NUMERIC_TOKENS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"^\d+$").expect("invalid number pattern"),
        Regex::new(r"^\(\d+[a-z]*\)$").expect("invalid bracketed pattern"),
        Regex::new(r"^\d+[a-z]+$").expect("invalid number-unit pattern"),
    ]
});

/// Modifier tokens removed before core-token extraction: units, containers,
/// preparation states, sizes and shapes, and quality qualifiers.
const MODIFIER_WORDS: &[&str] = &[
    // units
    "cup", "cups", "tablespoon", "tablespoons", "teaspoon", "teaspoons", "tbsp", "tsp",
    "oz", "ounce", "ounces", "pound", "pounds", "gram", "grams", "g", "kg", "ml",
    "liter", "liters", "l", "pinch", "dash",
    // containers and packaging
    "tin", "can", "jar", "packet", "pack", "package", "container", "box", "bottle",
    // preparation state
    "fresh", "frozen", "canned", "dried", "dry", "raw", "cooked", "boiled", "steamed",
    "roasted", "baked", "fried", "grilled", "smoked", "cured", "pickled", "preserved",
    // size and shape
    "large", "medium", "small", "tiny", "big", "huge", "whole", "half", "quarter",
    "sliced", "diced", "chopped", "minced", "grated", "shredded", "ground", "mashed",
    "cubed", "julienned", "crushed", "crumbled", "torn", "broken", "split", "halved",
    // qualifiers
    "optional", "approximately", "about", "roughly", "extra", "virgin", "pure",
    "natural", "organic", "free-range", "grass-fed", "wild", "farm-raised", "homemade",
    "store-bought", "commercial", "premium", "quality", "skinless", "boneless",
    "skin-on", "bone-in", "lean", "fatty", "fat-free", "low-fat", "full-fat",
    "reduced-fat", "unsalted", "salted", "sweetened", "unsweetened", "finely",
    "coarsely", "thinly", "thickly", "freshly", "lightly", "heavily",
];

const CONNECTOR_WORDS: &[&str] = &[
    "and", "or", "with", "without", "plus", "of", "for", "from", "in", "on", "as",
];

fn is_stripped_token(word: &str) -> bool {
    MODIFIER_WORDS.contains(&word)
        || CONNECTOR_WORDS.contains(&word)
        || NUMERIC_TOKENS.iter().any(|re| re.is_match(word))
}

/// Reduces raw ingredient text to core food tokens.
///
/// Names of two or fewer tokens pass through unchanged. Longer names lose
/// parenthetical content, quantity tokens, modifiers, and connectors; the
/// survivors that carry a taxonomy keyword become the core tokens. Three
/// overrides trump the general walk: any name mentioning salt collapses to
/// "salt", pepper together with black or ground collapses to "pepper", and
/// butter collapses to "butter".
pub fn normalize(raw_name: &str) -> NormalizedName {
    let name = raw_name.trim().to_lowercase();

    if name.split_whitespace().count() <= 2 {
        return NormalizedName {
            simplified: name.clone(),
            core_tokens: vec![name],
        };
    }

    let without_parens = PARENTHETICAL.replace_all(&name, "");
    let spaced = without_parens.replace(',', " ");

    let filtered: Vec<&str> = spaced
        .split_whitespace()
        .filter(|word| !is_stripped_token(word))
        .collect();

    if filtered.is_empty() {
        return NormalizedName {
            simplified: name.clone(),
            core_tokens: vec![name],
        };
    }

    if name.contains("salt") {
        return NormalizedName {
            simplified: "salt".to_string(),
            core_tokens: vec!["salt".to_string()],
        };
    }
    if name.contains("pepper") && (name.contains("black") || name.contains("ground")) {
        return NormalizedName {
            simplified: "pepper".to_string(),
            core_tokens: vec!["pepper".to_string()],
        };
    }
    if name.contains("butter") {
        return NormalizedName {
            simplified: "butter".to_string(),
            core_tokens: vec!["butter".to_string()],
        };
    }

    let mut core_tokens: Vec<String> = filtered
        .iter()
        .filter(|word| taxonomy::word_contains_keyword(word))
        .map(|word| word.to_string())
        .collect();

    if core_tokens.is_empty() {
        core_tokens = filtered.iter().map(|word| word.to_string()).collect();
    }

    NormalizedName {
        simplified: core_tokens.join(" "),
        core_tokens,
    }
}
