// Recipe index and query engine
// Rows are normalized and classified once at build time; queries only scan

pub mod classify;
pub mod index;
pub mod loader;
pub mod normalize;
pub mod recipe;
pub mod row;
pub mod sample;
pub mod search;
pub mod view;

// Re-exports
pub use index::{BuildReport, IndexBuilder, IngredientCount, MalformedRow, RecipeIndex};
pub use loader::load_index;
pub use recipe::{Cuisine, DurationCategory, Nutrition, RecipeDetails, RecipeRecord, RecipeType};
pub use row::RawRecipeRow;
pub use sample::{stratified_sample, SamplePlan};
pub use search::{rank, search, Filters, MatchResult, QueryDescriptor, SearchResults};
pub use view::SelectedRecipeView;
