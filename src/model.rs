use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Coarse food classification assigned to an [`Ingredient`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vegetable,
    Fruit,
    Protein,
    Dairy,
    Grain,
    Spice,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Vegetable => "vegetable",
            Category::Fruit => "fruit",
            Category::Protein => "protein",
            Category::Dairy => "dairy",
            Category::Grain => "grain",
            Category::Spice => "spice",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification used when assembling generated recipes.
///
/// The enrichment pipeline only ever produces `Protein`, `Carb`, `Vegetable`
/// and `SauceBase`; the remaining variants exist because chefs create them
/// by hand and the persisted collection must round-trip them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    Protein,
    Vegetable,
    Carb,
    SauceBase,
    CookingMethod,
    InstructionTemplate,
    FlavorProfile,
    Spice,
    Dairy,
    Fruit,
    Other,
}

impl ComponentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Protein => "protein",
            ComponentType::Vegetable => "vegetable",
            ComponentType::Carb => "carb",
            ComponentType::SauceBase => "sauce_base",
            ComponentType::CookingMethod => "cooking_method",
            ComponentType::InstructionTemplate => "instruction_template",
            ComponentType::FlavorProfile => "flavor_profile",
            ComponentType::Spice => "spice",
            ComponentType::Dairy => "dairy",
            ComponentType::Fruit => "fruit",
            ComponentType::Other => "other",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything stored under a unique name
pub trait Named {
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub category: Category,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Ingredient {
            name: name.into(),
            category,
        }
    }
}

impl Named for Ingredient {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeComponent {
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub description: String,
}

impl Named for RecipeComponent {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Recipe object as returned by the upstream recipe API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecipe {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "extendedIngredients", default)]
    pub extended_ingredients: Vec<RawIngredient>,
}

impl RawRecipe {
    /// Ingredient labels in listing order, skipping entries with no usable name
    pub fn ingredient_labels(&self) -> impl Iterator<Item = &str> {
        self.extended_ingredients.iter().filter_map(RawIngredient::label)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIngredient {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "originalName", default)]
    pub original_name: Option<String>,
}

impl RawIngredient {
    pub fn label(&self) -> Option<&str> {
        non_blank(&self.name).or_else(|| non_blank(&self.original_name))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}
