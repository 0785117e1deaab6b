use crate::indexer::recipe::{Cuisine, DurationCategory, RecipeDetails, RecipeType};
use crate::indexer::search::MatchResult;
use serde::Serialize;
use std::collections::BTreeSet;

/// Everything a detail page shows for one chosen recipe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedRecipeView {
    pub id: usize,
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub link: String,
    pub recipe_type: RecipeType,
    pub duration: DurationCategory,
    pub is_vegetarian: bool,
    pub is_beginner_friendly: bool,
    pub cuisines: BTreeSet<Cuisine>,
    pub rating: f64,
    pub review_count: u32,
    pub match_percentage: f64,
    pub hashtags: Vec<String>,
    pub details: RecipeDetails,
}

impl From<&MatchResult<'_>> for SelectedRecipeView {
    fn from(m: &MatchResult<'_>) -> Self {
        let record = m.record;
        Self {
            id: record.id,
            title: record.title.clone(),
            ingredients: record.ingredients.clone(),
            instructions: record.instructions.clone(),
            link: record.link.clone(),
            recipe_type: record.recipe_type,
            duration: record.duration,
            is_vegetarian: record.is_vegetarian,
            is_beginner_friendly: record.is_beginner_friendly,
            cuisines: record.cuisines.clone(),
            rating: record.rating,
            review_count: record.review_count,
            match_percentage: m.match_percentage,
            hashtags: record
                .details
                .keywords
                .iter()
                .map(|k| format!("#{k}"))
                .collect(),
            details: record.details.clone(),
        }
    }
}
