pub mod rules;

use crate::model::{Category, ComponentType};

/// Keywords that put an ingredient into one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new<I, S>(category: Category, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        CategoryRule {
            category,
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    fn matches(&self, folded_name: &str) -> bool {
        self.keywords.iter().any(|k| folded_name.contains(k.as_str()))
    }
}

/// Ordered, immutable rule table used by [`classify`] and [`component_type`].
///
/// Rules are evaluated first to last and the first match wins, so the order
/// of `categories` is part of the classification contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRules {
    categories: Vec<CategoryRule>,
    liquid_keywords: Vec<String>,
}

impl ClassificationRules {
    pub fn new<I, S>(categories: Vec<CategoryRule>, liquid_keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ClassificationRules {
            categories,
            liquid_keywords: liquid_keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Categories in the order they are tried
    pub fn order(&self) -> Vec<Category> {
        self.categories.iter().map(|rule| rule.category).collect()
    }

    pub fn categories(&self) -> &[CategoryRule] {
        &self.categories
    }

    /// True when the name carries a liquid or condiment keyword
    pub fn is_liquid(&self, name: &str) -> bool {
        let folded = name.to_lowercase();
        self.liquid_keywords
            .iter()
            .any(|k| folded.contains(k.as_str()))
    }
}

impl Default for ClassificationRules {
    fn default() -> Self {
        let categories = rules::CATEGORY_ORDER
            .iter()
            .map(|&category| CategoryRule::new(category, rules::keywords_for(category)))
            .collect();

        ClassificationRules::new(categories, rules::LIQUID_KEYWORDS)
    }
}

/// Assign a category by substring match against the ordered rule table.
///
/// Matching is case-insensitive. Falls back to [`Category::Other`].
pub fn classify(name: &str, rules: &ClassificationRules) -> Category {
    let folded = name.to_lowercase();
    rules
        .categories
        .iter()
        .find(|rule| rule.matches(&folded))
        .map(|rule| rule.category)
        .unwrap_or(Category::Other)
}

/// Derive the recipe-component type from a category and the ingredient name.
///
/// Liquids and condiments (see [`ClassificationRules::is_liquid`]), spices and
/// dairy are sauce bases. There is no separate fallback type, so fruit and
/// unclassified ingredients are sauce bases as well.
pub fn component_type(
    name: &str,
    category: Category,
    rules: &ClassificationRules,
) -> ComponentType {
    match category {
        Category::Protein => ComponentType::Protein,
        Category::Grain => ComponentType::Carb,
        Category::Vegetable => ComponentType::Vegetable,
        _ if rules.is_liquid(name) => ComponentType::SauceBase,
        Category::Spice | Category::Dairy => ComponentType::SauceBase,
        Category::Fruit | Category::Other => ComponentType::SauceBase,
    }
}
