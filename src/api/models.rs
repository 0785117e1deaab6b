use crate::indexer::{
    BuildReport, DurationCategory, Filters, IngredientCount, MatchResult, QueryDescriptor,
    RecipeType,
};
use crate::utils::{parse_set, text::ingredient_preview};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Search request parameters
///
/// List-valued parameters are comma-separated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub recipe_type: String,
    pub vegetarian: Option<bool>,
    pub beginner: Option<bool>,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_page")]
    pub page: usize,
    pub limit: Option<usize>,
}

fn default_page() -> usize {
    1
}

impl SearchParams {
    pub fn to_descriptor(&self) -> Result<QueryDescriptor> {
        let filters = Filters {
            durations: parse_set(&self.duration)?,
            recipe_types: parse_set(&self.recipe_type)?,
            vegetarian: self.vegetarian,
            beginner_friendly: self.beginner,
            cuisines: parse_set(&self.cuisine)?,
        };

        Ok(QueryDescriptor::new()
            .with_ingredients(self.ingredients.split(','))
            .with_filters(filters)
            .with_title(&self.title))
    }
}

/// Search response
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub summary: String,
    pub results: Vec<RecipeCard>,
    pub pagination: Pagination,
}

/// Recipe card for search results
#[derive(Debug, Clone, Serialize)]
pub struct RecipeCard {
    pub id: usize,
    pub title: String,
    pub match_percentage: f64,
    pub rating: f64,
    pub review_count: u32,
    pub recipe_type: RecipeType,
    pub duration: DurationCategory,
    pub cook_time: Option<String>,
    pub ingredients: String,
}

impl From<&MatchResult<'_>> for RecipeCard {
    fn from(m: &MatchResult<'_>) -> Self {
        Self {
            id: m.record.id,
            title: m.record.title.clone(),
            match_percentage: m.match_percentage,
            rating: m.record.rating,
            review_count: m.record.review_count,
            recipe_type: m.record.recipe_type,
            duration: m.record.duration,
            cook_time: m.record.details.cook_time.clone(),
            ingredients: ingredient_preview(&m.record.ingredients, 10),
        }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Query parameters for a single recipe
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeParams {
    #[serde(default)]
    pub ingredients: String,
}

/// Ingredient vocabulary query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientListParams {
    pub limit: Option<usize>,
}

/// Ingredient vocabulary response
#[derive(Debug, Clone, Serialize)]
pub struct IngredientsResponse {
    pub ingredients: Vec<IngredientCount>,
    pub total: usize,
}

/// Index statistics
#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub total_recipes: usize,
    pub total_ingredients: usize,
    pub recipes_by_type: BTreeMap<RecipeType, usize>,
    pub build: BuildReport,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::Cuisine;
    use std::collections::BTreeSet;

    #[test]
    fn test_params_to_descriptor() {
        let params = SearchParams {
            ingredients: "tomato, olive oil".to_string(),
            duration: "under_30min,under_1h".to_string(),
            vegetarian: Some(true),
            cuisine: "asian".to_string(),
            title: "  ".to_string(),
            page: 1,
            ..Default::default()
        };

        let query = params.to_descriptor().unwrap();
        assert_eq!(query.ingredient_tokens(), &["tomato", "olive", "oil"]);
        assert_eq!(
            query.filters.durations,
            Some(BTreeSet::from([
                DurationCategory::Under30,
                DurationCategory::Under1h
            ]))
        );
        assert_eq!(query.filters.recipe_types, None);
        assert_eq!(query.filters.cuisines, Some(BTreeSet::from([Cuisine::Asian])));
        assert_eq!(query.title_substring(), None);
    }

    #[test]
    fn test_params_reject_unknown_values() {
        let params = SearchParams {
            recipe_type: "brunch".to_string(),
            ..Default::default()
        };
        assert!(params.to_descriptor().is_err());
    }
}
