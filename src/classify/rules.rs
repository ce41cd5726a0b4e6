//! Built-in keyword tables.
//!
//! Lists overlap on purpose ("pepper", "bean", "corn" and "clove" each appear
//! under more than one category). The priority order in [`CATEGORY_ORDER`]
//! decides which one wins.

use crate::model::Category;

/// Fixed evaluation order of the category rules
pub const CATEGORY_ORDER: [Category; 6] = [
    Category::Protein,
    Category::Grain,
    Category::Vegetable,
    Category::Dairy,
    Category::Fruit,
    Category::Spice,
];

pub const PROTEIN_KEYWORDS: &[&str] = &[
    "chicken", "beef", "pork", "lamb", "turkey", "duck", "veal", "fish", "salmon", "tuna", "cod",
    "tilapia", "shrimp", "prawn", "crab", "lobster", "scallop", "tofu", "tempeh", "seitan",
    "egg", "bean", "lentil", "chickpea", "bacon", "sausage", "steak", "meat", "anchov",
];

pub const GRAIN_KEYWORDS: &[&str] = &[
    "rice", "pasta", "noodle", "spaghetti", "penne", "macaroni", "fettuccine", "linguine",
    "bread", "flour", "oats", "oatmeal", "quinoa", "barley", "couscous", "tortilla", "corn",
    "wheat", "bulgur", "cracker", "polenta",
];

pub const VEGETABLE_KEYWORDS: &[&str] = &[
    "onion", "garlic", "tomato", "potato", "carrot", "celery", "broccoli", "spinach", "lettuce",
    "kale", "cabbage", "cucumber", "zucchini", "eggplant", "pepper", "mushroom", "peas", "bean",
    "corn", "squash", "pumpkin", "asparagus", "cauliflower", "leek", "shallot", "radish", "beet",
    "artichoke", "scallion", "clove",
];

pub const DAIRY_KEYWORDS: &[&str] = &[
    "milk", "cheese", "butter", "cream", "yogurt", "yoghurt", "parmesan", "mozzarella",
    "cheddar", "ricotta", "ghee", "feta",
];

pub const FRUIT_KEYWORDS: &[&str] = &[
    "apple", "banana", "orange", "lemon", "lime", "berry", "grape", "mango", "peach", "pear",
    "cherry", "avocado", "coconut", "raisin", "plum", "melon", "pineapple",
];

pub const SPICE_KEYWORDS: &[&str] = &[
    "salt", "pepper", "cumin", "paprika", "oregano", "basil", "thyme", "rosemary", "cinnamon",
    "nutmeg", "turmeric", "ginger", "chili", "cayenne", "clove", "parsley", "cilantro",
    "coriander", "bay leaf", "sage", "vanilla", "curry", "saffron", "cardamom", "dill", "mint",
];

/// Liquid and condiment keywords that mark a sauce base
pub const LIQUID_KEYWORDS: &[&str] = &[
    "oil", "vinegar", "sauce", "dressing", "marinade", "stock", "broth", "wine", "juice",
];

pub fn keywords_for(category: Category) -> &'static [&'static str] {
    match category {
        Category::Protein => PROTEIN_KEYWORDS,
        Category::Grain => GRAIN_KEYWORDS,
        Category::Vegetable => VEGETABLE_KEYWORDS,
        Category::Dairy => DAIRY_KEYWORDS,
        Category::Fruit => FRUIT_KEYWORDS,
        Category::Spice => SPICE_KEYWORDS,
        Category::Other => &[],
    }
}
