use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// A free-text measurement reduced to an amount and a canonical unit token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedQuantity {
    pub amount: f32,
    pub unit: String,
}

impl ParsedQuantity {
    fn new(amount: f32, unit: &str) -> Self {
        ParsedQuantity {
            amount,
            unit: unit.to_string(),
        }
    }
}

/// Unit assumed when a measurement is empty or unrecognizable.
pub const DEFAULT_UNIT: &str = "piece";

/// Surface spellings mapped onto the canonical unit vocabulary. Scanned in
/// order; multi-word spellings come before their single-word tails.
static UNIT_ALIASES: &[(&str, &str)] = &[
    ("fluid ounces", "fl_oz"),
    ("fluid ounce", "fl_oz"),
    ("fl oz", "fl_oz"),
    ("fl. oz", "fl_oz"),
    ("grams", "g"),
    ("gram", "g"),
    ("gr", "g"),
    ("g", "g"),
    ("kilograms", "kg"),
    ("kilogram", "kg"),
    ("kg", "kg"),
    ("mg", "mg"),
    ("ounces", "oz"),
    ("ounce", "oz"),
    ("oz", "oz"),
    ("pounds", "lb"),
    ("pound", "lb"),
    ("lbs", "lb"),
    ("lb", "lb"),
    ("millilitres", "ml"),
    ("milliliters", "ml"),
    ("millilitre", "ml"),
    ("milliliter", "ml"),
    ("ml", "ml"),
    ("litres", "l"),
    ("liters", "l"),
    ("litre", "l"),
    ("liter", "l"),
    ("l", "l"),
    ("cups", "cup"),
    ("cup", "cup"),
    ("tablespoons", "tbsp"),
    ("tablespoon", "tbsp"),
    ("tbsps", "tbsp"),
    ("tbsp", "tbsp"),
    ("tbs", "tbsp"),
    ("teaspoons", "tsp"),
    ("teaspoon", "tsp"),
    ("tsps", "tsp"),
    ("tsp", "tsp"),
    ("pinches", "pinch"),
    ("pinch", "pinch"),
    ("dashes", "dash"),
    ("dash", "dash"),
    ("drops", "drop"),
    ("drop", "drop"),
    ("cloves", "clove"),
    ("clove", "clove"),
    ("slices", "slice"),
    ("slice", "slice"),
    ("pieces", "piece"),
    ("piece", "piece"),
    ("pcs", "piece"),
    ("pc", "piece"),
    ("whole", "whole"),
    ("sticks", "stick"),
    ("stick", "stick"),
    ("cans", "can"),
    ("can", "can"),
    ("tins", "can"),
    ("tin", "can"),
    ("jars", "jar"),
    ("jar", "jar"),
    ("packets", "packet"),
    ("packet", "packet"),
    ("packs", "packet"),
    ("pack", "packet"),
    ("handfuls", "handful"),
    ("handful", "handful"),
];

/// Descriptive phrases that stand in for a measurement. Matched against the
/// whole text first, then searched inside text that starts with a number.
/// All yield amount 1.0 and a symbolic unit.
static DESCRIPTIVE_PHRASES: &[(&str, &str)] = &[
    ("to taste", "to_taste"),
    ("as needed", "to_taste"),
    ("as required", "to_taste"),
    ("适量", "to_taste"),
    ("a pinch", "pinch"),
    ("a dash", "dash"),
    ("a little", "a_little"),
    ("a splash", "a_little"),
    ("a drizzle", "a_little"),
    ("for garnish", "a_little"),
    ("少许", "a_little"),
    ("少量", "a_little"),
];

/// Leading quantity words and the amounts they stand for.
static QUANTITY_WORDS: &[(&str, f32)] = &[
    ("a couple", 2.0),
    ("a few", 3.0),
    ("several", 4.0),
    ("one", 1.0),
    ("two", 2.0),
    ("three", 3.0),
    ("four", 4.0),
    ("five", 5.0),
];

static BRACKETED_QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\s*(\d+(?:\.\d+)?)\s*([a-z]+)\s*\)").expect("invalid bracketed pattern")
});

static CONCATENATED_QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)([a-z]+)\b").expect("invalid concatenated pattern")
});

// Leading amount: mixed fraction, simple fraction, or plain number
static SPACED_QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+\s+\d+\s*/\s*\d+|\d+\s*/\s*\d+|\d+(?:\.\d+)?)\s+(\S.*)$")
        .expect("invalid spaced pattern")
});

static BARE_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("invalid integer pattern"));

/// Maps a unit spelling onto the canonical vocabulary. Multi-word spellings
/// are tried against the whole phrase before its first word.
pub fn canonical_unit(raw: &str) -> Option<&'static str> {
    let phrase = raw.trim().trim_end_matches('.').to_lowercase();
    if let Some((_, unit)) = UNIT_ALIASES.iter().find(|(alias, _)| *alias == phrase) {
        return Some(unit);
    }
    let first_word = phrase.split_whitespace().next()?;
    UNIT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == first_word)
        .map(|(_, unit)| *unit)
}

fn parse_fraction(text: &str) -> Option<f32> {
    let (numerator, denominator) = text.split_once('/')?;
    let numerator: f32 = numerator.trim().parse().ok()?;
    let denominator: f32 = denominator.trim().parse().ok()?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

fn parse_amount(text: &str) -> Option<f32> {
    let text = text.trim();
    if let Some((whole, fraction)) = text.split_once(char::is_whitespace) {
        if let (Ok(whole), Some(fraction)) =
            (whole.parse::<f32>(), parse_fraction(fraction.trim()))
        {
            return Some(whole + fraction);
        }
    }
    parse_fraction(text).or_else(|| text.parse().ok())
}

// Unicode vulgar fractions rewritten to their ASCII form so one amount
// grammar covers "½ cup" and "2½ cups" alike.
fn replace_vulgar_fractions(text: &str) -> String {
    const FRACTIONS: &[(char, &str)] = &[
        ('½', " 1/2"),
        ('⅓', " 1/3"),
        ('⅔', " 2/3"),
        ('¼', " 1/4"),
        ('¾', " 3/4"),
    ];
    let mut replaced = text.to_string();
    for (symbol, ascii) in FRACTIONS {
        replaced = replaced.replace(*symbol, ascii);
    }
    replaced
}

/// Parses a free-text measurement, trying each rule in a fixed order and
/// returning `None` when none applies. `parse` wraps this with the
/// `(1.0, piece)` default; callers that report parse fallbacks use this
/// directly to tell the default apart from a recognized measurement.
pub fn try_parse(text: &str) -> Option<ParsedQuantity> {
    let text = replace_vulgar_fractions(text.trim()).trim().to_lowercase();
    if text.is_empty() {
        return Some(ParsedQuantity::new(1.0, DEFAULT_UNIT));
    }

    // (a) bracketed "number unit", e.g. "1 (400g) tin"
    if let Some(captures) = BRACKETED_QUANTITY.captures(&text) {
        if let (Ok(amount), Some(unit)) = (
            captures[1].parse::<f32>(),
            canonical_unit(&captures[2]),
        ) {
            return Some(ParsedQuantity::new(amount, unit));
        }
    }

    // (b) number and unit run together, e.g. "400g"
    if let Some(captures) = CONCATENATED_QUANTITY.captures(&text) {
        if let (Ok(amount), Some(unit)) = (
            captures[1].parse::<f32>(),
            canonical_unit(&captures[2]),
        ) {
            return Some(ParsedQuantity::new(amount, unit));
        }
    }

    // (c) spaced number (fractions included) followed by a unit phrase
    if let Some(captures) = SPACED_QUANTITY.captures(&text) {
        if let (Some(amount), Some(unit)) = (
            parse_amount(&captures[1]),
            canonical_unit(&captures[2]),
        ) {
            return Some(ParsedQuantity::new(amount, unit));
        }
    }

    // (d) the whole text is a descriptive phrase
    if let Some((_, unit)) = DESCRIPTIVE_PHRASES
        .iter()
        .find(|(phrase, _)| *phrase == text)
    {
        return Some(ParsedQuantity::new(1.0, unit));
    }

    // (e) leading number followed by a descriptive phrase
    if let Some(captures) = SPACED_QUANTITY.captures(&text) {
        if let Some(amount) = parse_amount(&captures[1]) {
            let rest = &captures[2];
            if let Some((_, unit)) = DESCRIPTIVE_PHRASES
                .iter()
                .find(|(phrase, _)| rest.contains(phrase))
            {
                return Some(ParsedQuantity::new(amount, unit));
            }
        }
    }

    // (f) quantity word, optionally followed by a unit
    for (word, amount) in QUANTITY_WORDS {
        if text == *word {
            return Some(ParsedQuantity::new(*amount, DEFAULT_UNIT));
        }
        if let Some(rest) = text.strip_prefix(word) {
            if rest.starts_with(' ') {
                let rest = rest.trim().trim_start_matches("of ").trim();
                let unit = canonical_unit(rest).unwrap_or(DEFAULT_UNIT);
                return Some(ParsedQuantity::new(*amount, unit));
            }
        }
    }

    // (g) bare integer, read as grams
    if BARE_INTEGER.is_match(&text) {
        if let Ok(amount) = text.parse::<f32>() {
            return Some(ParsedQuantity::new(amount, "g"));
        }
    }

    None
}

/// Parses a free-text measurement into an amount and canonical unit. Never
/// fails; unrecognized text yields one piece.
pub fn parse(text: &str) -> ParsedQuantity {
    try_parse(text).unwrap_or_else(|| ParsedQuantity::new(1.0, DEFAULT_UNIT))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_parses(text: &str, amount: f32, unit: &str) {
        let parsed = parse(text);
        assert_eq!(parsed.unit, unit, "unit for {:?}", text);
        assert!(
            (parsed.amount - amount).abs() < 1e-4,
            "amount for {:?}: {} != {}",
            text,
            parsed.amount,
            amount
        );
    }

    #[test]
    fn test_empty_input_defaults_to_one_piece() {
        assert_parses("", 1.0, "piece");
        assert_parses("   ", 1.0, "piece");
    }

    #[test]
    fn test_bracketed_quantity_wins() {
        assert_parses("1 (400g) tin", 400.0, "g");
        assert_parses("2 (200 ml) cartons", 200.0, "ml");
    }

    #[test]
    fn test_concatenated_number_and_unit() {
        assert_parses("400g", 400.0, "g");
        assert_parses("1.5kg", 1.5, "kg");
        assert_parses("250ml", 250.0, "ml");
        assert_parses("2cups", 2.0, "cup");
    }

    #[test]
    fn test_spaced_number_and_unit_phrase() {
        assert_parses("2 cups", 2.0, "cup");
        assert_parses("3 Tablespoons", 3.0, "tbsp");
        assert_parses("1 cup shredded", 1.0, "cup");
        assert_parses("200 g", 200.0, "g");
        assert_parses("4 fl oz", 4.0, "fl_oz");
    }

    #[test]
    fn test_fractions() {
        assert_parses("1/2 tsp", 0.5, "tsp");
        assert_parses("2 1/2 cups", 2.5, "cup");
        assert_parses("½ cup", 0.5, "cup");
        assert_parses("2½ cups", 2.5, "cup");
    }

    #[test]
    fn test_descriptive_phrases() {
        assert_parses("to taste", 1.0, "to_taste");
        assert_parses("To Taste", 1.0, "to_taste");
        assert_parses("a pinch", 1.0, "pinch");
        assert_parses("a splash", 1.0, "a_little");
        assert_parses("适量", 1.0, "to_taste");
        assert_parses("少许", 1.0, "a_little");
    }

    #[test]
    fn test_quantity_words() {
        assert_parses("two", 2.0, "piece");
        assert_parses("three cloves", 3.0, "clove");
        assert_parses("a couple of slices", 2.0, "slice");
        assert_parses("a few", 3.0, "piece");
        assert_parses("several sprigs", 4.0, "piece");
    }

    #[test]
    fn test_bare_integer_reads_as_grams() {
        assert_parses("250", 250.0, "g");
    }

    #[test]
    fn test_unrecognized_text_falls_back() {
        assert!(try_parse("a generous glug").is_none());
        assert_parses("a generous glug", 1.0, "piece");
    }

    #[test]
    fn test_canonical_unit_aliases() {
        assert_eq!(canonical_unit("Tablespoons"), Some("tbsp"));
        assert_eq!(canonical_unit("tins"), Some("can"));
        assert_eq!(canonical_unit("fl oz"), Some("fl_oz"));
        assert_eq!(canonical_unit("cup shredded"), Some("cup"));
        assert_eq!(canonical_unit("glug"), None);
    }
}
