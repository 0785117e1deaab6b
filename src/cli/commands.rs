use crate::config::Settings;
use crate::indexer::{
    load_index, search as run_search, stratified_sample, BuildReport, Filters, QueryDescriptor,
    RecipeIndex, SamplePlan, SearchResults,
};
use crate::utils::{parse_set, text::ingredient_preview, text::truncate};
use crate::Result;
use tracing::info;

/// Filter flags as given on the command line
#[derive(Debug, Clone, Default)]
pub struct SearchArgs {
    pub ingredients: Vec<String>,
    pub duration: Option<String>,
    pub recipe_type: Option<String>,
    pub vegetarian: bool,
    pub beginner: bool,
    pub cuisine: Option<String>,
    pub title: Option<String>,
}

impl SearchArgs {
    /// Toggles only ever narrow: an unset flag leaves the filter off
    pub fn to_descriptor(&self) -> Result<QueryDescriptor> {
        let filters = Filters {
            durations: parse_set(self.duration.as_deref().unwrap_or_default())?,
            recipe_types: parse_set(self.recipe_type.as_deref().unwrap_or_default())?,
            vegetarian: self.vegetarian.then_some(true),
            beginner_friendly: self.beginner.then_some(true),
            cuisines: parse_set(self.cuisine.as_deref().unwrap_or_default())?,
        };

        Ok(QueryDescriptor::new()
            .with_ingredients(&self.ingredients)
            .with_filters(filters)
            .with_title(self.title.as_deref().unwrap_or_default()))
    }
}

/// Load the configured corpus, sampling it down when asked to
pub fn load(settings: &Settings) -> Result<(RecipeIndex, BuildReport)> {
    let (index, report) = load_index(&settings.data.path)?;

    if !settings.data.sample {
        return Ok((index, report));
    }

    let sampled = stratified_sample(&index, &SamplePlan::default(), settings.data.sample_seed)?;
    info!(
        "Sampled {} of {} recipes (seed {})",
        sampled.len(),
        index.len(),
        settings.data.sample_seed
    );
    Ok((sampled, report))
}

/// Search the index and print one page of results
pub fn search(index: &RecipeIndex, args: &SearchArgs, limit: usize, page: usize) -> Result<()> {
    let descriptor = args.to_descriptor()?;
    let results = run_search(index, &descriptor, limit, page)?;

    println!("Research summary: {descriptor}");
    print_search_results(&results);

    Ok(())
}

/// Print the most frequent ingredient names
pub fn ingredients(index: &RecipeIndex, top: usize) {
    let vocabulary = index.ingredient_vocabulary();
    println!(
        "Showing {} of {} ingredients\n",
        top.min(vocabulary.len()),
        vocabulary.len()
    );

    for entry in vocabulary.iter().take(top) {
        println!("  {:>6}  {}", entry.count, entry.name);
    }
}

/// Print what the index build kept and dropped
pub fn stats(index: &RecipeIndex, report: &BuildReport) {
    println!("Rows read:            {}", report.rows_read);
    println!("Rows accepted:        {}", report.accepted);
    println!("Malformed rows:       {}", report.malformed.len());
    println!("Without ingredients:  {}", report.empty_ingredients);
    println!("Unclassified:         {}", report.unclassified);
    println!("Duplicate titles:     {}", report.duplicate_titles);
    println!("Excluded in total:    {}", report.excluded());

    println!("\nRecipes in index: {}", index.len());
    for (recipe_type, count) in index.type_counts() {
        println!("  {:<12} {}", recipe_type.label(), count);
    }
    println!(
        "Distinct ingredients: {}",
        index.ingredient_vocabulary().len()
    );

    for malformed in report.malformed.iter().take(10) {
        println!("  row {}: {}", malformed.row, truncate(&malformed.reason, 100));
    }
}

// Helper functions

fn print_search_results(results: &SearchResults<'_>) {
    if results.results.is_empty() {
        println!("No recipes found");
        return;
    }

    println!(
        "There are {} recipes matching your search (page {} of {}):\n",
        results.total, results.page, results.total_pages
    );

    for m in &results.results {
        let record = m.record;
        println!("[{}] {} ({}%)", record.id, record.title, m.match_percentage);
        println!(
            "    {} | {} | Rating: {} ({} reviews)",
            record.recipe_type,
            record.details.cook_time.as_deref().unwrap_or("-"),
            record.rating,
            record.review_count
        );
        println!("    {}", ingredient_preview(&record.ingredients, 10));
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::{DurationCategory, RecipeType};
    use std::collections::BTreeSet;

    #[test]
    fn test_search_args_to_descriptor() {
        let args = SearchArgs {
            ingredients: vec!["tomato".to_string(), "Olive Oil".to_string()],
            recipe_type: Some("main_course,dessert".to_string()),
            vegetarian: true,
            ..Default::default()
        };

        let query = args.to_descriptor().unwrap();
        assert_eq!(query.ingredient_tokens(), &["tomato", "olive", "oil"]);
        assert_eq!(
            query.filters.recipe_types,
            Some(BTreeSet::from([RecipeType::MainCourse, RecipeType::Dessert]))
        );
        assert_eq!(query.filters.vegetarian, Some(true));
        assert_eq!(query.filters.beginner_friendly, None);
        assert_eq!(query.filters.durations, None::<BTreeSet<DurationCategory>>);
        assert_eq!(query.title_substring(), None);
    }
}
