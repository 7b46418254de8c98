use serde::Serialize;

/// Top-level food categories. Declaration order is the classification scan
/// order; first match wins, so reordering changes results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Meat,
    Seafood,
    Vegetables,
    Fruits,
    Dairy,
    Grains,
    Seasonings,
    Oils,
    NutsSeeds,
    Beverages,
    Sweeteners,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Meat => "meat",
            Category::Seafood => "seafood",
            Category::Vegetables => "vegetables",
            Category::Fruits => "fruits",
            Category::Dairy => "dairy",
            Category::Grains => "grains",
            Category::Seasonings => "seasonings",
            Category::Oils => "oils",
            Category::NutsSeeds => "nuts_seeds",
            Category::Beverages => "beverages",
            Category::Sweeteners => "sweeteners",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory label for one ingredient name. Not authoritative; it feeds
/// scoring bonuses and default fallbacks only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Classification {
    pub category: Option<Category>,
    pub subcategory: Option<&'static str>,
    /// Taxonomy keywords found in the name while classifying, reused by the
    /// matcher as scoring hints.
    pub matched_keywords: Vec<&'static str>,
}

type Subcategories = &'static [(&'static str, &'static [&'static str])];

/// The fixed two-level food taxonomy. Both the category order and the
/// subcategory order within each category are significant.
pub const TAXONOMY: &[(Category, Subcategories)] = &[
    (
        Category::Meat,
        &[
            ("beef", &["beef", "steak", "ribeye", "sirloin", "brisket", "ground beef", "minced beef", "burger", "chuck", "roast beef"]),
            ("pork", &["pork", "ham", "bacon", "sausage", "loin", "chop", "tenderloin", "ground pork", "minced pork", "prosciutto", "pancetta"]),
            ("lamb", &["lamb", "mutton", "chop", "rack", "leg of lamb", "ground lamb", "minced lamb"]),
            ("poultry", &["chicken", "turkey", "duck", "goose", "hen", "breast", "thigh", "wing", "drumstick", "ground chicken", "minced chicken"]),
            ("game", &["venison", "rabbit", "quail", "pheasant", "boar", "bison", "buffalo"]),
            ("processed", &["sausage", "salami", "pepperoni", "jerky", "meatball", "meatloaf", "deli meat", "cured meat"]),
        ],
    ),
    (
        Category::Seafood,
        &[
            ("fish", &["fish", "salmon", "tuna", "cod", "haddock", "trout", "bass", "tilapia", "sardine", "anchovy", "mackerel", "halibut", "snapper", "mahi mahi", "swordfish"]),
            ("shellfish", &["shrimp", "prawn", "king prawn", "crab", "lobster", "crawfish", "crayfish", "langoustine"]),
            ("mollusks", &["mussel", "clam", "oyster", "scallop", "squid", "octopus", "calamari"]),
            ("processed", &["fish stick", "fish finger", "fish cake", "surimi", "canned tuna", "canned salmon", "smoked salmon", "smoked fish"]),
        ],
    ),
    (
        Category::Vegetables,
        &[
            ("root", &["carrot", "potato", "sweet potato", "yam", "turnip", "radish", "beet", "beetroot", "parsnip", "rutabaga", "celeriac"]),
            ("bulb", &["onion", "garlic", "shallot", "leek", "spring onion", "scallion", "green onion", "fennel"]),
            ("leafy_greens", &["lettuce", "spinach", "kale", "chard", "arugula", "rocket", "collard", "cabbage", "bok choy", "watercress", "endive", "radicchio"]),
            ("cruciferous", &["broccoli", "cauliflower", "brussels sprout", "cabbage", "kale", "bok choy", "kohlrabi"]),
            ("nightshade", &["tomato", "pepper", "eggplant", "aubergine", "potato", "chili", "capsicum", "bell pepper"]),
            ("squash", &["zucchini", "courgette", "pumpkin", "butternut squash", "acorn squash", "spaghetti squash", "gourd"]),
            ("legume", &["bean", "pea", "lentil", "chickpea", "garbanzo", "kidney bean", "black bean", "pinto bean", "navy bean", "edamame", "soybean"]),
            ("other", &["cucumber", "celery", "asparagus", "artichoke", "corn", "maize", "mushroom", "avocado"]),
        ],
    ),
    (
        Category::Fruits,
        &[
            ("berry", &["strawberry", "blueberry", "raspberry", "blackberry", "cranberry", "boysenberry", "gooseberry", "elderberry", "mulberry", "acai berry"]),
            ("citrus", &["orange", "lemon", "lime", "grapefruit", "tangerine", "mandarin", "clementine", "kumquat", "citron", "yuzu"]),
            ("tropical", &["banana", "pineapple", "mango", "papaya", "kiwi", "guava", "passion fruit", "lychee", "dragon fruit", "star fruit", "durian"]),
            ("stone", &["peach", "plum", "nectarine", "apricot", "cherry", "date", "olive"]),
            ("pome", &["apple", "pear", "quince"]),
            ("melon", &["watermelon", "cantaloupe", "honeydew", "melon"]),
            ("dried", &["raisin", "prune", "date", "fig", "apricot", "cranberry", "currant"]),
        ],
    ),
    (
        Category::Dairy,
        &[
            ("milk", &["milk", "whole milk", "skim milk", "low-fat milk", "buttermilk", "condensed milk", "evaporated milk"]),
            ("cheese", &["cheese", "cheddar", "mozzarella", "parmesan", "feta", "gouda", "brie", "camembert", "blue cheese", "goat cheese", "ricotta", "cottage cheese", "cream cheese"]),
            ("cream", &["cream", "heavy cream", "whipping cream", "sour cream", "creme fraiche", "half and half"]),
            ("yogurt", &["yogurt", "greek yogurt", "plain yogurt", "flavored yogurt", "kefir"]),
            ("butter", &["butter", "unsalted butter", "salted butter", "clarified butter", "ghee"]),
        ],
    ),
    (
        Category::Grains,
        &[
            ("rice", &["rice", "white rice", "brown rice", "jasmine rice", "basmati rice", "arborio rice", "wild rice", "rice flour"]),
            ("wheat", &["wheat", "flour", "all-purpose flour", "bread flour", "cake flour", "whole wheat flour", "semolina", "bulgur", "couscous"]),
            ("corn", &["corn", "maize", "cornmeal", "polenta", "grits", "corn flour", "cornstarch"]),
            ("oats", &["oat", "oatmeal", "rolled oats", "steel-cut oats", "quick oats"]),
            ("other_grains", &["barley", "quinoa", "millet", "rye", "buckwheat", "amaranth", "spelt", "farro", "teff"]),
            ("pasta", &["pasta", "spaghetti", "penne", "fettuccine", "linguine", "macaroni", "noodle", "egg noodle", "rice noodle"]),
            ("bread", &["bread", "white bread", "whole wheat bread", "rye bread", "sourdough", "baguette", "roll", "bun", "pita", "naan", "tortilla"]),
        ],
    ),
    (
        Category::Seasonings,
        &[
            ("herbs", &["basil", "oregano", "thyme", "rosemary", "parsley", "cilantro", "coriander", "mint", "dill", "sage", "tarragon", "chive", "bay leaf", "marjoram"]),
            ("spices", &["pepper", "black pepper", "white pepper", "red pepper", "chili", "paprika", "cumin", "coriander", "cinnamon", "nutmeg", "clove", "allspice", "cardamom", "turmeric", "ginger", "saffron", "fennel seed", "star anise"]),
            ("salt", &["salt", "sea salt", "kosher salt", "table salt", "fleur de sel", "himalayan salt"]),
            ("condiments", &["ketchup", "mustard", "mayonnaise", "soy sauce", "hot sauce", "worcestershire sauce", "fish sauce", "vinegar", "balsamic vinegar", "miso", "tahini"]),
        ],
    ),
    (
        Category::Oils,
        &[
            ("vegetable_oils", &["oil", "olive oil", "vegetable oil", "canola oil", "sunflower oil", "corn oil", "peanut oil", "sesame oil", "coconut oil", "avocado oil", "grapeseed oil", "walnut oil"]),
            ("animal_fats", &["butter", "lard", "tallow", "schmaltz", "duck fat", "bacon fat", "ghee"]),
            ("other_fats", &["margarine", "shortening", "cooking spray"]),
        ],
    ),
    (
        Category::NutsSeeds,
        &[
            ("nuts", &["nut", "almond", "walnut", "pecan", "cashew", "pistachio", "hazelnut", "macadamia", "brazil nut", "pine nut", "chestnut"]),
            ("seeds", &["seed", "sesame", "sunflower", "pumpkin", "flax", "chia", "hemp", "poppy seed"]),
            ("nut_products", &["peanut butter", "almond butter", "tahini", "nut milk", "almond milk", "cashew milk"]),
        ],
    ),
    (
        Category::Beverages,
        &[
            ("alcoholic", &["wine", "red wine", "white wine", "beer", "vodka", "rum", "whiskey", "gin", "tequila", "brandy", "liqueur", "champagne", "prosecco"]),
            ("non_alcoholic", &["water", "juice", "orange juice", "apple juice", "soda", "coffee", "tea", "milk", "smoothie", "lemonade", "iced tea"]),
        ],
    ),
    (
        Category::Sweeteners,
        &[
            ("sugars", &["sugar", "white sugar", "brown sugar", "powdered sugar", "confectioners sugar", "cane sugar", "raw sugar", "demerara sugar"]),
            ("syrups", &["syrup", "maple syrup", "corn syrup", "golden syrup", "agave syrup", "honey", "molasses", "date syrup"]),
            ("artificial", &["stevia", "sweetener", "aspartame", "sucralose", "saccharin"]),
        ],
    ),
];

/// Assigns a (category, subcategory) label by scanning the taxonomy in
/// declaration order and picking the first category with any keyword
/// contained in the name, then the first subcategory likewise. Keywords
/// found along the way are recorded for the matcher's scoring hints.
pub fn classify(name: &str) -> Classification {
    let name = name.to_lowercase();
    let mut classification = Classification::default();

    for (category, subcategories) in TAXONOMY {
        let found = subcategories
            .iter()
            .flat_map(|(_, keywords)| keywords.iter())
            .find(|keyword| name.contains(*keyword));
        let Some(&keyword) = found else {
            continue;
        };

        classification.category = Some(*category);
        classification.matched_keywords.push(keyword);

        for (subcat, keywords) in *subcategories {
            if let Some(&sub_keyword) = keywords.iter().find(|k| name.contains(*k)) {
                classification.subcategory = Some(subcat);
                if !classification.matched_keywords.contains(&sub_keyword) {
                    classification.matched_keywords.push(sub_keyword);
                }
                break;
            }
        }
        break;
    }

    classification
}

/// True when the word carries a taxonomy keyword inside it (or equals one).
/// Used to decide which filtered tokens survive normalization.
pub fn word_contains_keyword(word: &str) -> bool {
    TAXONOMY.iter().any(|(_, subcategories)| {
        subcategories
            .iter()
            .flat_map(|(_, keywords)| keywords.iter())
            .any(|keyword| *keyword == word || word.contains(keyword))
    })
}

/// True when the word equals a taxonomy keyword or appears inside one.
/// Used to weight core words during candidate scoring.
pub fn keyword_contains_word(word: &str) -> bool {
    TAXONOMY.iter().any(|(_, subcategories)| {
        subcategories
            .iter()
            .flat_map(|(_, keywords)| keywords.iter())
            .any(|keyword| *keyword == word || keyword.contains(word))
    })
}

/// All keywords of a category, in declaration order across its subcategories.
pub fn category_keywords(category: Category) -> impl Iterator<Item = &'static str> {
    TAXONOMY
        .iter()
        .filter(move |(c, _)| *c == category)
        .flat_map(|(_, subcategories)| subcategories.iter())
        .flat_map(|(_, keywords)| keywords.iter().copied())
}

pub fn subcategory_keywords(
    category: Category,
    subcategory: &str,
) -> Option<&'static [&'static str]> {
    TAXONOMY
        .iter()
        .find(|(c, _)| *c == category)
        .and_then(|(_, subcategories)| {
            subcategories
                .iter()
                .find(|(name, _)| *name == subcategory)
                .map(|(_, keywords)| *keywords)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_first_category_wins() {
        // "chicken" is meat/poultry even though "hen" also appears later in
        // other keyword sets
        let c = classify("chicken breast");
        assert_eq!(c.category, Some(Category::Meat));
        assert_eq!(c.subcategory, Some("poultry"));
        assert!(c.matched_keywords.contains(&"chicken"));
    }

    #[test]
    fn test_classify_subcategory_order_within_category() {
        // "pepper" hits vegetables/nightshade before seasonings/spices
        // because vegetables comes first in the taxonomy
        let c = classify("red pepper");
        assert_eq!(c.category, Some(Category::Vegetables));
        assert_eq!(c.subcategory, Some("nightshade"));
    }

    #[test]
    fn test_classify_unknown_name() {
        let c = classify("mystery substance");
        assert_eq!(c.category, None);
        assert_eq!(c.subcategory, None);
        assert!(c.matched_keywords.is_empty());
    }

    #[test]
    fn test_classify_is_substring_based() {
        // "beefsteak" contains "beef"
        let c = classify("beefsteak");
        assert_eq!(c.category, Some(Category::Meat));
        assert_eq!(c.subcategory, Some("beef"));
    }

    #[test]
    fn test_keyword_containment_directions() {
        // "prawns" contains the keyword "prawn"
        assert!(word_contains_keyword("prawns"));
        // "praw" appears inside the keyword "prawn"
        assert!(keyword_contains_word("praw"));
        assert!(!word_contains_keyword("xyz"));
        assert!(!keyword_contains_word("xyz"));
    }

    #[test]
    fn test_category_keyword_access() {
        let meat: Vec<_> = category_keywords(Category::Meat).collect();
        assert_eq!(meat[0], "beef");
        assert!(meat.contains(&"chicken"));

        let shellfish = subcategory_keywords(Category::Seafood, "shellfish").unwrap();
        assert!(shellfish.contains(&"shrimp"));
        assert!(subcategory_keywords(Category::Seafood, "nope").is_none());
    }
}
