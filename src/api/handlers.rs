use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::{
    api::models::*,
    indexer::{search, BuildReport, MatchResult, QueryDescriptor, RecipeIndex, SelectedRecipeView},
    Error, Result,
};

/// Shared application state
///
/// The index is immutable once built, so handlers read it without locking.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<RecipeIndex>,
    pub report: Arc<BuildReport>,
    pub settings: crate::config::Settings,
}

/// GET /api/search - Search recipes
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    debug!("Search request: {:?}", params);

    let descriptor = params.to_descriptor()?;
    let limit = params
        .limit
        .unwrap_or(state.settings.pagination.default_page_size)
        .min(state.settings.pagination.max_page_size);

    let results = search(&state.index, &descriptor, limit, params.page)?;

    Ok(Json(SearchResponse {
        summary: descriptor.to_string(),
        results: results.results.iter().map(RecipeCard::from).collect(),
        pagination: Pagination {
            page: results.page,
            limit: results.page_size,
            total: results.total,
            total_pages: results.total_pages,
        },
    }))
}

/// GET /api/recipes/:id - Get recipe details
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<usize>,
    Query(params): Query<RecipeParams>,
) -> Result<Json<SelectedRecipeView>> {
    debug!("Get recipe request: {}", id);

    let record = state
        .index
        .get(id)
        .ok_or_else(|| Error::NotFound(format!("Recipe {id} not found")))?;

    let descriptor = QueryDescriptor::new().with_ingredients(params.ingredients.split(','));
    let selected = MatchResult {
        record,
        match_percentage: descriptor.match_percentage(record),
    };

    Ok(Json(SelectedRecipeView::from(&selected)))
}

/// GET /api/ingredients - Ingredient vocabulary, most frequent first
pub async fn list_ingredients(
    State(state): State<AppState>,
    Query(params): Query<IngredientListParams>,
) -> Result<Json<IngredientsResponse>> {
    let vocabulary = state.index.ingredient_vocabulary();
    let limit = params.limit.unwrap_or(vocabulary.len());

    Ok(Json(IngredientsResponse {
        ingredients: vocabulary.iter().take(limit).cloned().collect(),
        total: vocabulary.len(),
    }))
}

/// GET /api/stats - Index statistics
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<Stats>> {
    debug!("Get stats request");

    Ok(Json(Stats {
        total_recipes: state.index.len(),
        total_ingredients: state.index.ingredient_vocabulary().len(),
        recipes_by_type: state.index.type_counts(),
        build: (*state.report).clone(),
    }))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}
