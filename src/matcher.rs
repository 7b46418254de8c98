use serde::Serialize;

use crate::food_database::FoodDatabase;
use crate::taxonomy::{self, Classification};

/// Outcome of resolving one ingredient name against the reference database.
/// `score` is nonzero only when the candidate search produced the match;
/// table hits and defaults report zero.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub description: Option<String>,
    pub score: i64,
    pub classification: Classification,
}

impl MatchResult {
    fn unmatched(classification: Classification) -> Self {
        MatchResult {
            description: None,
            score: 0,
            classification,
        }
    }

    fn from_table(description: &str, classification: Classification) -> Self {
        MatchResult {
            description: Some(description.to_string()),
            score: 0,
            classification,
        }
    }
}

/// Candidate search matches below this score are discarded in favor of the
/// curated fallbacks.
const MIN_CANDIDATE_SCORE: i64 = 10;

/// Alias rewrites applied before any lookup. An exact full-name hit replaces
/// the whole name; otherwise the first key found inside the name is replaced
/// in place and the scan stops. Keys near the end map cooking modifiers to
/// nothing so they vanish from names that reach the scoring stage.
static REPLACEMENTS: &[(&str, &str)] = &[
    // shellfish aliases
    ("prawn", "shrimp"),
    ("prawns", "shrimp"),
    ("king prawn", "shrimp"),
    ("king prawns", "shrimp"),
    ("tiger prawn", "shrimp"),
    ("tiger prawns", "shrimp"),
    ("jumbo prawn", "shrimp"),
    ("jumbo prawns", "shrimp"),
    ("shelled prawn", "shrimp"),
    ("shelled prawns", "shrimp"),
    ("peeled prawn", "shrimp"),
    ("peeled prawns", "shrimp"),
    ("shrimp", "shrimp"),
    ("shrimps", "shrimp"),
    ("peeled shrimp", "shrimp"),
    ("deveined shrimp", "shrimp"),
    ("raw prawn", "shrimp, raw"),
    ("raw prawns", "shrimp, raw"),
    ("raw king prawn", "shrimp, raw"),
    ("raw king prawns", "shrimp, raw"),
    ("raw shrimp", "shrimp, raw"),
    ("cooked prawn", "shrimp, cooked"),
    ("cooked prawns", "shrimp, cooked"),
    ("cooked shrimp", "shrimp, cooked"),
    // cheeses
    ("feta", "cheese, feta"),
    ("feta cheese", "cheese, feta"),
    ("cubed feta", "cheese, feta"),
    ("cubed feta cheese", "cheese, feta"),
    ("crumbled feta", "cheese, feta"),
    ("crumbled feta cheese", "cheese, feta"),
    ("greek feta", "cheese, feta"),
    ("greek feta cheese", "cheese, feta"),
    ("cheddar", "cheese, cheddar"),
    ("cheddar cheese", "cheese, cheddar"),
    ("grated cheddar", "cheese, cheddar"),
    ("grated cheddar cheese", "cheese, cheddar"),
    ("shredded cheddar", "cheese, cheddar"),
    ("shredded cheddar cheese", "cheese, cheddar"),
    ("mild cheddar", "cheese, cheddar"),
    ("sharp cheddar", "cheese, cheddar"),
    ("mature cheddar", "cheese, cheddar"),
    ("mozzarella", "cheese, mozzarella"),
    ("mozzarella cheese", "cheese, mozzarella"),
    ("fresh mozzarella", "cheese, mozzarella"),
    ("fresh mozzarella cheese", "cheese, mozzarella"),
    ("grated mozzarella", "cheese, mozzarella"),
    ("grated mozzarella cheese", "cheese, mozzarella"),
    ("shredded mozzarella", "cheese, mozzarella"),
    ("shredded mozzarella cheese", "cheese, mozzarella"),
    ("buffalo mozzarella", "cheese, mozzarella"),
    ("parmesan", "cheese, parmesan"),
    ("grated parmesan", "cheese, parmesan, dry grated"),
    ("grated parmesan cheese", "cheese, parmesan, dry grated"),
    ("shredded parmesan", "cheese, parmesan"),
    ("shredded parmesan cheese", "cheese, parmesan"),
    ("parmigiano", "cheese, parmesan"),
    ("parmigiano reggiano", "cheese, parmesan"),
    ("parmigiano-reggiano", "cheese, parmesan"),
    ("ricotta", "cheese, ricotta"),
    ("ricotta cheese", "cheese, ricotta"),
    ("cottage cheese", "cheese, cottage"),
    ("cream cheese", "cheese, cream"),
    ("goat cheese", "cheese, goat"),
    ("blue cheese", "cheese, blue"),
    ("gorgonzola", "cheese, blue"),
    ("roquefort", "cheese, blue"),
    ("stilton", "cheese, blue"),
    ("brie", "cheese, brie"),
    ("camembert", "cheese, camembert"),
    ("gouda", "cheese, gouda"),
    ("swiss cheese", "cheese, swiss"),
    ("gruyere", "cheese, gruyere"),
    ("manchego", "cheese, manchego"),
    // oils and fats
    ("oil", "oil, vegetable"),
    ("olive oil", "oil, olive"),
    ("extra virgin olive oil", "oil, olive"),
    ("evoo", "oil, olive"),
    ("virgin olive oil", "oil, olive"),
    ("light olive oil", "oil, olive"),
    ("vegetable oil", "oil, vegetable"),
    ("canola oil", "oil, canola"),
    ("rapeseed oil", "oil, canola"),
    ("sunflower oil", "oil, sunflower"),
    ("corn oil", "oil, corn"),
    ("peanut oil", "oil, peanut"),
    ("groundnut oil", "oil, peanut"),
    ("sesame oil", "oil, sesame"),
    ("toasted sesame oil", "oil, sesame"),
    ("coconut oil", "oil, coconut"),
    ("avocado oil", "oil, avocado"),
    ("grapeseed oil", "oil, grapeseed"),
    ("walnut oil", "oil, walnut"),
    ("flaxseed oil", "oil, flaxseed"),
    ("palm oil", "oil, palm"),
    ("butter", "butter, regular, salted"),
    ("unsalted butter", "butter, regular, unsalted"),
    ("salted butter", "butter, regular, salted"),
    ("clarified butter", "butter, clarified"),
    ("ghee", "butter, clarified"),
    ("margarine", "margarine, regular"),
    ("lard", "lard"),
    ("shortening", "shortening, vegetable"),
    ("vegetable shortening", "shortening, vegetable"),
    // aromatics
    ("garlic", "garlic, raw"),
    ("minced garlic", "garlic, raw"),
    ("crushed garlic", "garlic, raw"),
    ("chopped garlic", "garlic, raw"),
    ("garlic clove", "garlic, raw"),
    ("garlic cloves", "garlic, raw"),
    ("fresh garlic", "garlic, raw"),
    ("garlic powder", "garlic powder"),
    ("onion", "onion, raw"),
    ("onions", "onion, raw"),
    ("chopped onion", "onion, raw"),
    ("diced onion", "onion, raw"),
    ("sliced onion", "onion, raw"),
    ("minced onion", "onion, raw"),
    ("white onion", "onion, raw"),
    ("yellow onion", "onion, raw"),
    ("red onion", "onion, raw"),
    ("sweet onion", "onion, raw"),
    ("spring onion", "onions, green, raw"),
    ("spring onions", "onions, green, raw"),
    ("green onion", "onions, green, raw"),
    ("green onions", "onions, green, raw"),
    ("scallion", "onions, green, raw"),
    ("scallions", "onions, green, raw"),
    ("shallot", "shallot, raw"),
    ("shallots", "shallot, raw"),
    // tomatoes
    ("tomato", "tomato, raw"),
    ("tomatoes", "tomato, raw"),
    ("chopped tomato", "tomato, raw"),
    ("chopped tomatoes", "tomato, raw"),
    ("diced tomato", "tomato, raw"),
    ("diced tomatoes", "tomato, raw"),
    ("sliced tomato", "tomato, raw"),
    ("sliced tomatoes", "tomato, raw"),
    ("cherry tomato", "tomato, raw"),
    ("cherry tomatoes", "tomato, raw"),
    ("plum tomato", "tomato, raw"),
    ("plum tomatoes", "tomato, raw"),
    ("roma tomato", "tomato, raw"),
    ("roma tomatoes", "tomato, raw"),
    ("sun-dried tomato", "tomato, sun-dried"),
    ("sun-dried tomatoes", "tomato, sun-dried"),
    ("canned tomato", "tomatoes, canned"),
    ("canned tomatoes", "tomatoes, canned"),
    ("tinned tomato", "tomatoes, canned"),
    ("tinned tomatoes", "tomatoes, canned"),
    ("tomato paste", "tomato paste"),
    ("tomato puree", "tomato puree"),
    ("passata", "tomato puree"),
    ("tomato sauce", "tomato sauce"),
    // vegetables
    ("carrot", "carrot, raw"),
    ("carrots", "carrot, raw"),
    ("chopped carrots", "carrot, raw"),
    ("diced carrots", "carrot, raw"),
    ("sliced carrots", "carrot, raw"),
    ("grated carrot", "carrot, raw"),
    ("shredded carrot", "carrot, raw"),
    ("baby carrots", "carrot, raw"),
    ("bell pepper", "pepper, sweet, raw"),
    ("bell peppers", "pepper, sweet, raw"),
    ("capsicum", "pepper, sweet, raw"),
    ("red bell pepper", "pepper, sweet, red, raw"),
    ("red bell peppers", "pepper, sweet, red, raw"),
    ("green bell pepper", "pepper, sweet, green, raw"),
    ("green bell peppers", "pepper, sweet, green, raw"),
    ("yellow bell pepper", "pepper, sweet, yellow, raw"),
    ("yellow bell peppers", "pepper, sweet, yellow, raw"),
    ("orange bell pepper", "pepper, sweet, orange, raw"),
    ("orange bell peppers", "pepper, sweet, orange, raw"),
    ("red capsicum", "pepper, sweet, red, raw"),
    ("green capsicum", "pepper, sweet, green, raw"),
    ("yellow capsicum", "pepper, sweet, yellow, raw"),
    // herbs
    ("parsley", "parsley, raw"),
    ("fresh parsley", "parsley, raw"),
    ("chopped parsley", "parsley, raw"),
    ("freshly chopped parsley", "parsley, raw"),
    ("flat-leaf parsley", "parsley, raw"),
    ("curly parsley", "parsley, raw"),
    ("italian parsley", "parsley, raw"),
    ("dried parsley", "parsley, dried"),
    ("basil", "basil, raw"),
    ("fresh basil", "basil, raw"),
    ("chopped basil", "basil, raw"),
    ("fresh chopped basil", "basil, raw"),
    ("basil leaves", "basil, raw"),
    ("fresh basil leaves", "basil, raw"),
    ("thai basil", "basil, raw"),
    ("holy basil", "basil, raw"),
    ("dried basil", "basil, dried"),
    ("cilantro", "cilantro, raw"),
    ("fresh cilantro", "cilantro, raw"),
    ("chopped cilantro", "cilantro, raw"),
    ("coriander leaves", "cilantro, raw"),
    ("fresh coriander", "cilantro, raw"),
    ("chinese parsley", "cilantro, raw"),
    ("rosemary", "rosemary, raw"),
    ("fresh rosemary", "rosemary, raw"),
    ("rosemary sprig", "rosemary, raw"),
    ("rosemary sprigs", "rosemary, raw"),
    ("dried rosemary", "rosemary, dried"),
    ("thyme", "thyme, raw"),
    ("fresh thyme", "thyme, raw"),
    ("thyme sprig", "thyme, raw"),
    ("thyme sprigs", "thyme, raw"),
    ("dried thyme", "thyme, dried"),
    ("oregano", "oregano, raw"),
    ("fresh oregano", "oregano, raw"),
    ("dried oregano", "oregano, dried"),
    ("mint", "mint, raw"),
    ("mint leaves", "mint, raw"),
    ("peppermint", "mint, raw"),
    ("spearmint", "mint, raw"),
    ("dried mint", "mint, dried"),
    ("sage", "sage, raw"),
    ("fresh sage", "sage, raw"),
    ("dried sage", "sage, dried"),
    ("dill", "dill, raw"),
    ("dill weed", "dill, raw"),
    ("dried dill", "dill, dried"),
    ("chive", "chives, raw"),
    ("chives", "chives, raw"),
    ("fresh chives", "chives, raw"),
    ("chopped chives", "chives, raw"),
    ("dried chives", "chives, dried"),
    ("bay leaf", "bay leaf, dried"),
    ("bay leaves", "bay leaf, dried"),
    ("dried bay leaf", "bay leaf, dried"),
    ("dried bay leaves", "bay leaf, dried"),
    // pepper and salt
    ("black pepper", "pepper, black"),
    ("ground black pepper", "pepper, black"),
    ("freshly ground black pepper", "pepper, black"),
    ("cracked black pepper", "pepper, black"),
    ("white pepper", "pepper, white"),
    ("ground white pepper", "pepper, white"),
    ("salt", "salt, table"),
    ("table salt", "salt, table"),
    ("sea salt", "salt, sea"),
    ("fleur de sel", "salt, sea"),
    ("kosher salt", "salt, kosher"),
    ("himalayan salt", "salt, himalayan"),
    ("pink salt", "salt, himalayan"),
    // wines
    ("white wine", "wine, white"),
    ("dry white wine", "wine, white"),
    ("sweet white wine", "wine, white"),
    ("red wine", "wine, red"),
    ("dry red wine", "wine, red"),
    ("full-bodied red wine", "wine, red"),
    ("rose wine", "wine, rose"),
    ("rosé wine", "wine, rose"),
    ("sparkling wine", "wine, sparkling"),
    ("champagne", "wine, champagne"),
    ("prosecco", "wine, prosecco"),
    ("cooking wine", "wine, cooking"),
    ("rice wine", "wine, rice"),
    ("mirin", "wine, rice"),
    ("sake", "wine, rice"),
    ("sherry", "wine, sherry"),
    ("port", "wine, port"),
    ("marsala", "wine, marsala"),
    ("madeira", "wine, madeira"),
    ("vermouth", "wine, vermouth"),
    // modifiers erased from names
    ("extra virgin", ""),
    ("virgin", ""),
    ("freshly", ""),
    ("fresh", ""),
    ("frozen", ""),
    ("dried", ""),
    ("canned", ""),
    ("tinned", ""),
    ("jarred", ""),
    ("bottled", ""),
    ("packaged", ""),
    ("whole", ""),
    ("half", ""),
    ("quarter", ""),
    ("sliced", ""),
    ("diced", ""),
    ("chopped", ""),
    ("minced", ""),
    ("grated", ""),
    ("shredded", ""),
    ("julienned", ""),
    ("cubed", ""),
    ("crushed", ""),
    ("mashed", ""),
    ("pureed", ""),
    ("ground", ""),
    ("crumbled", ""),
    ("torn", ""),
    ("peeled", ""),
    ("skinless", ""),
    ("boneless", ""),
    ("skin-on", ""),
    ("bone-in", ""),
    ("large", ""),
    ("medium", ""),
    ("small", ""),
    ("baby", ""),
    ("mini", ""),
    ("giant", ""),
    ("ripe", ""),
    ("unripe", ""),
    ("overripe", ""),
    ("green", ""),
    ("red", ""),
    ("yellow", ""),
    ("orange", ""),
    ("purple", ""),
    ("black", ""),
    ("white", ""),
    ("brown", ""),
    ("pink", ""),
    ("golden", ""),
    ("dark", ""),
    ("light", ""),
    ("mild", ""),
    ("hot", ""),
    ("spicy", ""),
    ("sweet", ""),
    ("sour", ""),
    ("bitter", ""),
    ("salty", ""),
    ("savory", ""),
    ("umami", ""),
    ("organic", ""),
    ("free-range", ""),
    ("grass-fed", ""),
    ("wild-caught", ""),
    ("farm-raised", ""),
    ("homemade", ""),
    ("store-bought", ""),
    ("commercial", ""),
    ("premium", ""),
    ("quality", ""),
    ("lean", ""),
    ("fatty", ""),
    ("fat-free", ""),
    ("low-fat", ""),
    ("full-fat", ""),
    ("reduced-fat", ""),
    ("unsalted", ""),
    ("salted", ""),
    ("sweetened", ""),
    ("unsweetened", ""),
    ("roasted", ""),
    ("toasted", ""),
    ("grilled", ""),
    ("broiled", ""),
    ("baked", ""),
    ("fried", ""),
    ("deep-fried", ""),
    ("pan-fried", ""),
    ("stir-fried", ""),
    ("sauteed", ""),
    ("sautéed", ""),
    ("boiled", ""),
    ("steamed", ""),
    ("poached", ""),
    ("braised", ""),
    ("stewed", ""),
    ("smoked", ""),
    ("cured", ""),
    ("pickled", ""),
    ("fermented", ""),
    ("marinated", ""),
    ("seasoned", ""),
    ("spiced", ""),
    ("flavored", ""),
    ("infused", ""),
    ("stuffed", ""),
    ("filled", ""),
    ("topped", ""),
    ("garnished", ""),
    ("mixed", ""),
    ("blended", ""),
    ("combined", ""),
    ("prepared", ""),
    ("ready-to-use", ""),
    ("ready-to-eat", ""),
    ("instant", ""),
    ("quick", ""),
    ("slow", ""),
    ("overnight", ""),
    ("day-old", ""),
];

/// Small curated table of exact database descriptions for the handful of
/// staples where the candidate search tends to wander. Checked before any
/// other lookup, on word boundaries, and only when the target row exists.
static PRECISE_FOODS: &[(&str, &str)] = &[
    ("salt", "salt, table"),
    ("sea salt", "salt, table"),
    ("table salt", "salt, table"),
    ("kosher salt", "salt, table"),
    ("himalayan salt", "salt, table"),
    ("fleur de sel", "salt, table"),
    ("salt flakes", "salt, table"),
    ("pinch of salt", "salt, table"),
    ("pinch of sea salt", "salt, table"),
    ("black pepper", "pepper, black"),
    ("ground black pepper", "pepper, black"),
    ("freshly ground black pepper", "pepper, black"),
    ("cracked black pepper", "pepper, black"),
    ("ground pepper", "pepper, black"),
    ("pepper", "pepper, black"),
    ("white pepper", "pepper, white"),
    ("ground white pepper", "pepper, white"),
    ("butter", "butter, nfs"),
    ("unsalted butter", "butter, nfs"),
    ("clarified butter", "butter, nfs"),
    ("ghee", "butter, nfs"),
    ("salted butter", "butter, regular, salted"),
    ("heavy cream", "cream, heavy"),
    ("whipping cream", "cream, heavy"),
    ("sour cream", "cream, sour"),
    ("cream", "cream, nfs"),
    ("olive oil", "olive oil"),
    ("extra virgin olive oil", "olive oil"),
    ("garlic", "garlic, raw"),
    ("minced garlic", "garlic, raw"),
    ("onion", "onions, raw"),
    ("chopped onion", "onions, raw"),
    ("tomato", "tomatoes, raw"),
    ("chopped tomatoes", "tomatoes, raw"),
    ("parsley", "parsley, raw"),
    ("fresh parsley", "parsley, raw"),
    ("chopped parsley", "parsley, raw"),
    ("freshly chopped parsley", "parsley, raw"),
];

/// Broad name-to-description fallbacks consulted only after the candidate
/// search comes up empty. Containment matches, first entry wins.
static COMMON_FOODS: &[(&str, &str)] = &[
    ("beef", "beef, ground, raw"),
    ("steak", "beef, steak, raw"),
    ("ground beef", "beef, ground, raw"),
    ("minced beef", "beef, ground, raw"),
    ("pork", "pork, raw"),
    ("ham", "ham, sliced, regular"),
    ("bacon", "pork bacon, raw"),
    ("chicken", "chicken, meat only, raw"),
    ("chicken breast", "chicken, breast, meat only, raw"),
    ("turkey", "turkey, meat only, raw"),
    ("lamb", "lamb, raw"),
    ("duck", "duck, meat only, raw"),
    ("sausage", "sausage, pork, raw"),
    ("fish", "fish, nfs"),
    ("salmon", "salmon, raw"),
    ("tuna", "tuna, raw"),
    ("cod", "cod, raw"),
    ("shrimp", "shrimp, raw"),
    ("prawn", "shrimp, nfs"),
    ("king prawn", "shrimp, nfs"),
    ("crab", "crab, raw"),
    ("lobster", "lobster, raw"),
    ("mussel", "mussel, raw"),
    ("clam", "clam, raw"),
    ("oyster", "oyster, raw"),
    ("scallop", "scallop, raw"),
    ("squid", "squid, raw"),
    ("octopus", "octopus, raw"),
    ("vegetable", "vegetables, nfs"),
    ("carrot", "carrot, raw"),
    ("potato", "potato, raw"),
    ("onion", "onion, raw"),
    ("chopped onion", "onion, raw"),
    ("garlic", "garlic, raw"),
    ("minced garlic", "garlic, raw"),
    ("tomato", "tomato, raw"),
    ("chopped tomatoes", "tomato, raw"),
    ("pepper", "pepper, black"),
    ("bell pepper", "pepper, sweet, raw"),
    ("lettuce", "lettuce, raw"),
    ("spinach", "spinach, raw"),
    ("broccoli", "broccoli, raw"),
    ("cauliflower", "cauliflower, raw"),
    ("cabbage", "cabbage, raw"),
    ("zucchini", "zucchini, raw"),
    ("eggplant", "eggplant, raw"),
    ("cucumber", "cucumber, with peel, raw"),
    ("celery", "celery, raw"),
    ("corn", "corn, raw"),
    ("pea", "peas, green, raw"),
    ("bean", "beans, string, green, raw"),
    ("lentil", "lentils, raw"),
    ("fruit", "fruit, nfs"),
    ("apple", "apple, raw"),
    ("banana", "banana, raw"),
    ("orange", "orange, raw"),
    ("lemon", "lemon, raw"),
    ("lime", "lime, raw"),
    ("grape", "grapes, raw"),
    ("strawberry", "strawberries, raw"),
    ("blueberry", "blueberries, raw"),
    ("raspberry", "raspberries, raw"),
    ("blackberry", "blackberries, raw"),
    ("melon", "melon, nfs, raw"),
    ("watermelon", "watermelon, raw"),
    ("pineapple", "pineapple, raw"),
    ("mango", "mango, raw"),
    ("peach", "peach, raw"),
    ("pear", "pear, raw"),
    ("plum", "plum, raw"),
    ("cherry", "cherries, raw"),
    ("kiwi", "kiwi fruit, raw"),
    ("milk", "milk, nfs"),
    ("cheese", "cheese, nfs"),
    ("feta", "cheese, feta"),
    ("feta cheese", "cheese, feta"),
    ("cubed feta cheese", "cheese, feta"),
    ("cheddar", "cheese, cheddar"),
    ("mozzarella", "cheese, mozzarella"),
    ("parmesan", "cheese, parmesan"),
    ("yogurt", "yogurt, plain"),
    ("cream", "cream, nfs"),
    ("heavy cream", "cream, heavy"),
    ("whipping cream", "cream, heavy"),
    ("sour cream", "cream, sour"),
    ("butter", "butter, nfs"),
    ("unsalted butter", "butter, nfs"),
    ("salted butter", "butter, regular, salted"),
    ("clarified butter", "butter, nfs"),
    ("ghee", "butter, nfs"),
    ("flour", "flour, wheat, white, all purpose"),
    ("rice", "rice, white, nfs"),
    ("pasta", "pasta, nfs"),
    ("bread", "bread, white"),
    ("oat", "oats, raw"),
    ("cereal", "cereal, nfs"),
    ("wheat", "wheat, nfs"),
    ("barley", "barley, raw"),
    ("quinoa", "quinoa, raw"),
    ("noodle", "noodles, egg, raw"),
    ("salt", "salt, table"),
    ("spice", "spices, nfs"),
    ("herb", "herbs, nfs"),
    ("basil", "basil, fresh"),
    ("oregano", "oregano, fresh"),
    ("thyme", "thyme, fresh"),
    ("rosemary", "rosemary, fresh"),
    ("parsley", "parsley, fresh"),
    ("freshly chopped parsley", "parsley, raw"),
    ("cilantro", "cilantro, fresh"),
    ("coriander", "coriander, fresh"),
    ("cumin", "cumin, ground"),
    ("paprika", "paprika"),
    ("cinnamon", "cinnamon, ground"),
    ("nutmeg", "nutmeg, ground"),
    ("ginger", "ginger root, raw"),
    ("turmeric", "turmeric, ground"),
    ("oil", "oil, vegetable, nfs"),
    ("olive oil", "oil, olive"),
    ("vegetable oil", "oil, vegetable, nfs"),
    ("canola oil", "oil, canola"),
    ("sunflower oil", "oil, sunflower"),
    ("sesame oil", "oil, sesame"),
    ("coconut oil", "oil, coconut"),
    ("margarine", "margarine, regular"),
    ("lard", "lard"),
    ("shortening", "shortening, vegetable"),
    ("nut", "nuts, nfs"),
    ("seed", "seeds, nfs"),
    ("almond", "almonds, raw"),
    ("walnut", "walnuts, raw"),
    ("pecan", "pecans, raw"),
    ("cashew", "cashews, raw"),
    ("pistachio", "pistachios, raw"),
    ("peanut", "peanuts, raw"),
    ("sesame", "sesame seeds, raw"),
    ("sunflower", "sunflower seeds, raw"),
    ("pumpkin", "pumpkin seeds, raw"),
    ("flax", "flaxseeds, raw"),
    ("chia", "chia seeds, raw"),
    ("water", "water, nfs"),
    ("juice", "juice, nfs"),
    ("soda", "soft drink, nfs"),
    ("coffee", "coffee, brewed"),
    ("tea", "tea, brewed"),
    ("wine", "wine, nfs"),
    ("white wine", "wine, white"),
    ("red wine", "wine, red"),
    ("beer", "beer, nfs"),
    ("smoothie", "smoothie, nfs"),
    ("sugar", "sugar, white, granulated or lump"),
    ("honey", "honey"),
    ("syrup", "syrup, nfs"),
    ("maple", "syrup, maple"),
    ("molasses", "molasses"),
    ("agave", "agave syrup"),
    ("stevia", "sweetener, stevia"),
    ("sweetener", "sweetener, nfs"),
];

/// Last-resort descriptions per taxonomy label: (category, per-subcategory
/// defaults, category-wide default).
static CATEGORY_DEFAULTS: &[(
    taxonomy::Category,
    &[(&str, &str)],
    &str,
)] = &[
    (
        taxonomy::Category::Meat,
        &[
            ("beef", "beef, ground, raw"),
            ("pork", "pork, raw"),
            ("lamb", "lamb, raw"),
            ("poultry", "chicken, meat only, raw"),
            ("game", "venison, raw"),
            ("processed", "sausage, pork, raw"),
        ],
        "meat, nfs",
    ),
    (
        taxonomy::Category::Seafood,
        &[
            ("fish", "fish, nfs"),
            ("shellfish", "shrimp, nfs"),
            ("mollusks", "mussel, raw"),
            ("processed", "fish, processed, nfs"),
        ],
        "seafood, nfs",
    ),
    (
        taxonomy::Category::Vegetables,
        &[
            ("root", "potato, raw"),
            ("bulb", "onion, raw"),
            ("leafy_greens", "spinach, raw"),
            ("cruciferous", "broccoli, raw"),
            ("nightshade", "tomato, raw"),
            ("squash", "zucchini, raw"),
            ("legume", "beans, string, green, raw"),
            ("other", "vegetables, nfs"),
        ],
        "vegetables, nfs",
    ),
    (
        taxonomy::Category::Fruits,
        &[
            ("berry", "strawberries, raw"),
            ("citrus", "orange, raw"),
            ("tropical", "banana, raw"),
            ("stone", "peach, raw"),
            ("pome", "apple, raw"),
            ("melon", "watermelon, raw"),
            ("dried", "raisins"),
        ],
        "fruit, nfs",
    ),
    (
        taxonomy::Category::Dairy,
        &[
            ("milk", "milk, nfs"),
            ("cheese", "cheese, nfs"),
            ("cream", "cream, nfs"),
            ("yogurt", "yogurt, plain"),
            ("butter", "butter, regular, salted"),
        ],
        "dairy, nfs",
    ),
    (
        taxonomy::Category::Grains,
        &[
            ("rice", "rice, white, nfs"),
            ("wheat", "flour, wheat, white, all purpose"),
            ("corn", "corn, raw"),
            ("oats", "oats, raw"),
            ("other_grains", "grains, nfs"),
            ("pasta", "pasta, nfs"),
            ("bread", "bread, white"),
        ],
        "grains, nfs",
    ),
    (
        taxonomy::Category::Seasonings,
        &[
            ("herbs", "herbs, nfs"),
            ("spices", "spices, nfs"),
            ("salt", "salt, table"),
            ("condiments", "condiments, nfs"),
        ],
        "seasonings, nfs",
    ),
    (
        taxonomy::Category::Oils,
        &[
            ("vegetable_oils", "oil, vegetable, nfs"),
            ("animal_fats", "butter, regular, salted"),
            ("other_fats", "shortening, vegetable"),
        ],
        "oil, nfs",
    ),
    (
        taxonomy::Category::NutsSeeds,
        &[
            ("nuts", "nuts, nfs"),
            ("seeds", "seeds, nfs"),
            ("nut_products", "peanut butter"),
        ],
        "nuts, nfs",
    ),
    (
        taxonomy::Category::Beverages,
        &[
            ("alcoholic", "wine, nfs"),
            ("non_alcoholic", "water, nfs"),
        ],
        "beverages, nfs",
    ),
    (
        taxonomy::Category::Sweeteners,
        &[
            ("sugars", "sugar, white, granulated or lump"),
            ("syrups", "syrup, nfs"),
            ("artificial", "sweetener, nfs"),
        ],
        "sugar, nfs",
    ),
];

/// Descriptions containing any of these read as composite dishes rather
/// than single foods; plain candidates get a bonus for avoiding them all.
const COMPLEX_INDICATORS: &[&str] = &[
    "mixed", "with", "and", "in", "or", "plus", "topped", "stuffed", "filled",
    "coated", "breaded", "battered",
];

/// Single-food descriptions favored when the database row is a short
/// extension of one of these names.
const PURE_INGREDIENTS: &[&str] = &[
    "butter", "garlic", "olive oil", "onion", "salt", "eggs", "water",
    "sugar", "potatoes", "milk", "flour", "pepper", "carrots", "parsley",
    "vegetable oil", "soy sauce", "rice", "tomatoes", "chicken", "beef",
    "pork", "lamb", "fish", "salmon", "tuna", "shrimp", "cheese", "cream",
    "yogurt", "lemon", "lime", "orange", "apple", "banana", "berries",
    "strawberry", "blueberry", "raspberry", "nuts", "almonds", "walnuts",
    "peanuts", "beans", "pasta", "noodles", "bread", "wine", "vinegar",
    "honey", "maple syrup", "chocolate", "vanilla", "cinnamon", "cumin",
    "basil", "oregano", "thyme", "rosemary", "ginger", "mushrooms",
    "avocado", "cucumber", "lettuce", "spinach", "kale", "cabbage",
    "broccoli", "cauliflower", "corn", "peas", "bell pepper", "chili",
    "bacon", "ham", "sausage", "tofu", "quinoa",
];

const SEASONING_WORDS: &[&str] = &["pepper", "salt", "spice", "herb", "seasoning"];

/// Resolves ingredient names to reference food descriptions, borrowing the
/// loaded database for its lifetime.
pub struct FoodMatcher<'a> {
    database: &'a FoodDatabase,
}

impl<'a> FoodMatcher<'a> {
    pub fn new(database: &'a FoodDatabase) -> Self {
        FoodMatcher { database }
    }

    /// Resolves one ingredient name. Lookup order: alias replacement, the
    /// precise curated table, exact description match, scored candidate
    /// search, the broad curated table, taxonomy defaults. Returns an
    /// unmatched result when every stage comes up empty.
    pub fn find_match(&self, raw_name: &str) -> MatchResult {
        let name = raw_name.trim().to_lowercase();
        if name.len() < 3 {
            return MatchResult::unmatched(taxonomy::classify(&name));
        }

        let name = apply_replacements(&name);
        let classification = taxonomy::classify(&name);

        for (key, value) in PRECISE_FOODS {
            if matches_on_word_boundary(&name, key) && self.database.contains(value) {
                return MatchResult::from_table(value, classification);
            }
        }

        if self.database.contains(&name) {
            return MatchResult {
                description: Some(name),
                score: 0,
                classification,
            };
        }

        let mut best: Option<(&str, i64)> = None;
        for description in self.database.descriptions() {
            let score = score_candidate(description, &name, &classification);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((description, score));
            }
        }
        if let Some((description, score)) = best {
            if score > MIN_CANDIDATE_SCORE {
                return MatchResult {
                    description: Some(description.to_string()),
                    score,
                    classification,
                };
            }
        }

        for (key, value) in COMMON_FOODS {
            if name == *key || name.contains(key) {
                return MatchResult::from_table(value, classification);
            }
        }

        if let Some(category) = classification.category {
            if let Some((_, subcategory_defaults, category_default)) =
                CATEGORY_DEFAULTS.iter().find(|(c, _, _)| *c == category)
            {
                let description = classification
                    .subcategory
                    .and_then(|sub| {
                        subcategory_defaults
                            .iter()
                            .find(|(name, _)| *name == sub)
                            .map(|(_, default)| *default)
                    })
                    .unwrap_or(category_default);
                return MatchResult::from_table(description, classification);
            }
        }

        MatchResult::unmatched(classification)
    }
}

fn apply_replacements(name: &str) -> String {
    for (key, value) in REPLACEMENTS {
        if name == *key {
            return (*value).to_string();
        }
    }
    for (key, value) in REPLACEMENTS {
        if name.contains(key) {
            return name.replace(key, value);
        }
    }
    name.to_string()
}

/// True when `key` appears in `name` as the whole name or as a
/// space-delimited prefix or suffix.
fn matches_on_word_boundary(name: &str, key: &str) -> bool {
    name == key
        || name
            .strip_prefix(key)
            .is_some_and(|rest| rest.starts_with(' '))
        || name
            .strip_suffix(key)
            .is_some_and(|rest| rest.ends_with(' '))
}

/// Scores one database description against an ingredient name. Containment
/// and position dominate; taxonomy keyword hits, per-word coverage, and the
/// single-food heuristics refine; composite descriptions and the
/// salt-versus-cheese and pepper-versus-bell-pepper collisions are pushed
/// down hard.
fn score_candidate(description: &str, name: &str, classification: &Classification) -> i64 {
    let mut score: i64 = 0;

    if description == name {
        score += 200;
    } else if description.contains(name) {
        score += 100;
        if description.starts_with(name) {
            score += 30;
        }
        if description.ends_with(name) {
            score += 15;
        }
    }

    for keyword in &classification.matched_keywords {
        if description.contains(keyword) {
            score += 5 * keyword.len().min(10) as i64;
        }
    }

    if let Some(category) = classification.category {
        if taxonomy::category_keywords(category).any(|k| description.contains(k)) {
            score += 20;
        }
        if let Some(subcategory) = classification.subcategory {
            if let Some(keywords) = taxonomy::subcategory_keywords(category, subcategory) {
                if keywords.iter().any(|k| description.contains(k)) {
                    score += 30;
                }
            }
        }
    }

    let words: Vec<&str> = name.split_whitespace().filter(|w| w.len() > 2).collect();
    if words.len() > 1 {
        let mut seen: Vec<&str> = Vec::new();
        let mut matched = 0usize;
        for word in words {
            if seen.contains(&word) {
                continue;
            }
            seen.push(word);
            let mut weight = word.len() as i64;
            if taxonomy::keyword_contains_word(word) {
                weight *= 3;
            }
            if description.contains(word) {
                score += 5 * weight;
                matched += 1;
            }
        }
        if matched >= 2 {
            score += matched as i64 * 10;
        }
        if matched == seen.len() {
            score += 50;
        }
    }

    if !COMPLEX_INDICATORS.iter().any(|w| description.contains(w)) {
        score += 25;
    }

    for pure in PURE_INGREDIENTS {
        if description.starts_with(pure)
            && (description.len() as f32) < (pure.len() as f32) * 2.5
        {
            score += 100;
            break;
        } else if description == *pure {
            score += 150;
            break;
        }
    }

    let comma_count = description.matches(',').count() as i64;
    if comma_count > 1 {
        score -= 30 * (comma_count - 1);
    }

    if description.contains("raw") {
        score += 15;
    }

    if name.contains("oil") && description.contains("oil") {
        score += 50;
    }

    let name_is_seasoning = SEASONING_WORDS.iter().any(|w| name.contains(w));
    let description_is_seasoning = SEASONING_WORDS.iter().any(|w| description.contains(w));
    if name_is_seasoning && description_is_seasoning {
        score += 100;

        if name.contains("salt") {
            if description == "salt, table" || description.starts_with("salt,") {
                score += 200;
            }
            if description.contains("cheese") {
                score -= 300;
            }
        }
        if name.contains("pepper") && name.contains("black") {
            if description == "pepper, black" || description.starts_with("pepper, black") {
                score += 200;
            }
            if description.contains("bell pepper")
                || description.contains("hot pepper")
                || description.contains("sweet pepper")
            {
                score -= 300;
            }
        }
    }

    score
}
