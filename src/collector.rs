use std::collections::{BTreeSet, HashSet};

use log::debug;

use crate::classify::{classify, component_type, ClassificationRules};
use crate::model::{Category, ComponentType, Ingredient, RecipeComponent};
use crate::normalize::normalize_name;

/// Tag added to components whose name carries a liquid or condiment keyword
pub const LIQUID_TAG: &str = "liquid";

/// Accumulates distinct ingredients and components across one batch.
///
/// Identity is `(name, category)` for ingredients and
/// `(name, type, description)` for components. Names compare case-sensitively
/// here; case-insensitive collapsing happens later, against the store.
#[derive(Debug, Default)]
pub struct BatchCollector {
    ingredients: Vec<Ingredient>,
    components: Vec<RecipeComponent>,
    ingredient_keys: HashSet<(String, Category)>,
    component_keys: HashSet<(String, ComponentType, String)>,
    dropped: usize,
}

impl BatchCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize, classify and record one raw ingredient string.
    ///
    /// Returns `false` if the name was dropped by the normalizer. Inserting an
    /// identity that is already present has no effect.
    pub fn collect(&mut self, raw: &str, rules: &ClassificationRules) -> bool {
        let Some(name) = normalize_name(raw) else {
            debug!("Dropping ingredient {:?}: outside name length bounds", raw);
            self.dropped += 1;
            return false;
        };

        let category = classify(&name, rules);
        let kind = component_type(&name, category, rules);
        let description = describe(&name, category);

        if self.ingredient_keys.insert((name.clone(), category)) {
            self.ingredients.push(Ingredient::new(name.clone(), category));
        }

        if self
            .component_keys
            .insert((name.clone(), kind, description.clone()))
        {
            let mut tags = BTreeSet::from([category.to_string()]);
            if rules.is_liquid(&name) {
                tags.insert(LIQUID_TAG.to_string());
            }
            self.components.push(RecipeComponent {
                name,
                component_type: kind,
                tags,
                description,
            });
        }

        true
    }

    pub fn collect_all<'a, I>(&mut self, raws: I, rules: &ClassificationRules)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for raw in raws {
            self.collect(raw, rules);
        }
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn components(&self) -> &[RecipeComponent] {
        &self.components
    }

    /// Number of raw strings rejected by the normalizer
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn into_parts(self) -> (Vec<Ingredient>, Vec<RecipeComponent>) {
        (self.ingredients, self.components)
    }
}

fn describe(name: &str, category: Category) -> String {
    format!("{} ({})", name, category)
}
