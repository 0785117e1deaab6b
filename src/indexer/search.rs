use crate::error::{Error, Result};
use crate::indexer::index::RecipeIndex;
use crate::indexer::recipe::{Cuisine, DurationCategory, RecipeRecord, RecipeType};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// Categorical filters; a `None` field is not filtered on
///
/// Present filters combine with AND. Set-valued filters accept a record whose
/// value is a member of the set; `cuisines` accepts a record carrying any of
/// the listed cuisines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub durations: Option<BTreeSet<DurationCategory>>,
    pub recipe_types: Option<BTreeSet<RecipeType>>,
    pub vegetarian: Option<bool>,
    pub beginner_friendly: Option<bool>,
    pub cuisines: Option<BTreeSet<Cuisine>>,
}

impl Filters {
    pub fn matches(&self, record: &RecipeRecord) -> bool {
        if let Some(durations) = &self.durations {
            if !durations.contains(&record.duration) {
                return false;
            }
        }

        if let Some(types) = &self.recipe_types {
            if !types.contains(&record.recipe_type) {
                return false;
            }
        }

        if let Some(vegetarian) = self.vegetarian {
            if record.is_vegetarian != vegetarian {
                return false;
            }
        }

        if let Some(beginner) = self.beginner_friendly {
            if record.is_beginner_friendly != beginner {
                return false;
            }
        }

        if let Some(cuisines) = &self.cuisines {
            if cuisines.is_disjoint(&record.cuisines) {
                return false;
            }
        }

        true
    }
}

/// One search request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    ingredient_tokens: Vec<String>,
    pub filters: Filters,
    title_substring: Option<String>,
}

impl QueryDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add ingredient tokens
    ///
    /// Each item is split on whitespace and lower-cased. Repeated tokens are
    /// kept once, in first-seen order.
    pub fn with_ingredients<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for item in items {
            for token in item.as_ref().split_whitespace() {
                let token = token.to_lowercase();
                if !self.ingredient_tokens.contains(&token) {
                    self.ingredient_tokens.push(token);
                }
            }
        }
        self
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    /// Narrow results by title or ingredient text; blank input is ignored
    pub fn with_title(mut self, title: impl AsRef<str>) -> Self {
        let title = title.as_ref().trim();
        self.title_substring = (!title.is_empty()).then(|| title.to_lowercase());
        self
    }

    pub fn ingredient_tokens(&self) -> &[String] {
        &self.ingredient_tokens
    }

    pub fn title_substring(&self) -> Option<&str> {
        self.title_substring.as_deref()
    }

    /// Every token is a substring of at least one normalized ingredient
    pub fn matches_ingredients(&self, record: &RecipeRecord) -> bool {
        self.ingredient_tokens.iter().all(|token| {
            record
                .normalized_ingredients
                .iter()
                .any(|name| name.contains(token.as_str()))
        })
    }

    /// Share of the recipe's ingredient list named by the query, in percent
    /// rounded to one decimal
    ///
    /// This is query length over ingredient count, not overlap. An empty
    /// query scores 0.0.
    pub fn match_percentage(&self, record: &RecipeRecord) -> f64 {
        let ingredient_count = record.normalized_ingredients.len();
        if self.ingredient_tokens.is_empty() || ingredient_count == 0 {
            return 0.0;
        }

        let ratio = self.ingredient_tokens.len() as f64 / ingredient_count as f64 * 100.0;
        (ratio * 10.0).round() / 10.0
    }

    fn matches_title(&self, record: &RecipeRecord) -> bool {
        let Some(needle) = self.title_substring.as_deref() else {
            return true;
        };

        record.title.to_lowercase().contains(needle)
            || record
                .normalized_ingredients
                .iter()
                .any(|name| name.contains(needle))
    }
}

impl fmt::Display for QueryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if !self.ingredient_tokens.is_empty() {
            parts.push(format!("ingredients: {}", self.ingredient_tokens.join(", ")));
        }
        if let Some(durations) = &self.filters.durations {
            let labels: Vec<&str> = durations.iter().map(|d| d.label()).collect();
            parts.push(format!("duration: {}", labels.join(" or ")));
        }
        if let Some(types) = &self.filters.recipe_types {
            let labels: Vec<&str> = types.iter().map(|t| t.label()).collect();
            parts.push(format!("recipe type: {}", labels.join(" or ")));
        }
        match self.filters.vegetarian {
            Some(true) => parts.push("vegetarian recipes only".to_string()),
            Some(false) => parts.push("non-vegetarian recipes only".to_string()),
            None => {}
        }
        match self.filters.beginner_friendly {
            Some(true) => parts.push("beginner friendly recipes only".to_string()),
            Some(false) => parts.push("non-beginner recipes only".to_string()),
            None => {}
        }
        if let Some(cuisines) = &self.filters.cuisines {
            let labels: Vec<&str> = cuisines.iter().map(|c| c.label()).collect();
            parts.push(format!("cuisine: {}", labels.join(" or ")));
        }
        if let Some(title) = &self.title_substring {
            parts.push(format!("title search: {title}"));
        }

        if parts.is_empty() {
            f.write_str("all recipes")
        } else {
            f.write_str(&parts.join(" - "))
        }
    }
}

/// A record that survived filtering, with its ranking score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchResult<'a> {
    pub record: &'a RecipeRecord,
    pub match_percentage: f64,
}

/// One page of ranked matches
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults<'a> {
    pub results: Vec<MatchResult<'a>>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Percentage descending, then rating descending, then title ascending
fn compare_ranked(a: &MatchResult<'_>, b: &MatchResult<'_>) -> Ordering {
    b.match_percentage
        .total_cmp(&a.match_percentage)
        .then_with(|| b.record.rating.total_cmp(&a.record.rating))
        .then_with(|| a.record.title.cmp(&b.record.title))
}

/// Filter, rank and title-narrow the whole index without paginating
pub fn rank<'a>(index: &'a RecipeIndex, descriptor: &QueryDescriptor) -> Vec<MatchResult<'a>> {
    let mut ranked: Vec<MatchResult<'a>> = index
        .all()
        .filter(|record| descriptor.filters.matches(record))
        .filter(|record| descriptor.matches_ingredients(record))
        .map(|record| MatchResult {
            record,
            match_percentage: descriptor.match_percentage(record),
        })
        .collect();

    ranked.sort_by(compare_ranked);

    // Narrows the ranked list; never re-ranks
    ranked.retain(|m| descriptor.matches_title(m.record));
    ranked
}

/// Search the index and return one page of results
///
/// `page_number` is 1-based. There is always at least one page, so page 1 is
/// valid even when nothing matches. Any other page beyond the last one fails
/// with `OutOfRange`.
pub fn search<'a>(
    index: &'a RecipeIndex,
    descriptor: &QueryDescriptor,
    page_size: usize,
    page_number: usize,
) -> Result<SearchResults<'a>> {
    if page_size == 0 {
        return Err(Error::Validation(
            "Page size must be greater than zero".to_string(),
        ));
    }

    let ranked = rank(index, descriptor);
    let total = ranked.len();
    let total_pages = total.div_ceil(page_size).max(1);

    if page_number == 0 || page_number > total_pages {
        return Err(Error::OutOfRange {
            page: page_number,
            total_pages,
        });
    }

    debug!(
        "Search [{}] matched {} recipes ({} pages of {})",
        descriptor, total, total_pages, page_size
    );

    let results = ranked
        .into_iter()
        .skip((page_number - 1) * page_size)
        .take(page_size)
        .collect();

    Ok(SearchResults {
        results,
        total,
        page: page_number,
        page_size,
        total_pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::recipe::RecipeDetails;

    fn record(title: &str, ingredients: &[&str], rating: f64) -> RecipeRecord {
        RecipeRecord {
            id: 0,
            title: title.to_string(),
            ingredients: ingredients.iter().map(|i| i.to_string()).collect(),
            normalized_ingredients: ingredients.iter().map(|i| i.to_string()).collect(),
            instructions: vec![],
            link: String::new(),
            recipe_type: RecipeType::MainCourse,
            duration: DurationCategory::Under30,
            is_vegetarian: true,
            is_beginner_friendly: false,
            cuisines: BTreeSet::new(),
            rating,
            review_count: 0,
            details: RecipeDetails::default(),
        }
    }

    fn index(records: Vec<RecipeRecord>) -> RecipeIndex {
        RecipeIndex::from_records(records)
    }

    #[test]
    fn test_tokens_are_split_lowercased_and_deduplicated() {
        let query = QueryDescriptor::new().with_ingredients(["Tomato  Onion", "tomato", " "]);
        assert_eq!(query.ingredient_tokens(), &["tomato", "onion"]);
    }

    #[test]
    fn test_blank_title_is_ignored() {
        let query = QueryDescriptor::new().with_title("   ");
        assert_eq!(query.title_substring(), None);

        let query = QueryDescriptor::new().with_title(" Soup ");
        assert_eq!(query.title_substring(), Some("soup"));
    }

    #[test]
    fn test_match_percentage_rounding() {
        let soup = record("Tomato Soup", &["tomato", "onion", "salt"], 4.0);
        let query = QueryDescriptor::new().with_ingredients(["tomato"]);
        assert_eq!(query.match_percentage(&soup), 33.3);

        let query = QueryDescriptor::new().with_ingredients(["tomato onion"]);
        assert_eq!(query.match_percentage(&soup), 66.7);

        assert_eq!(QueryDescriptor::new().match_percentage(&soup), 0.0);
    }

    #[test]
    fn test_ingredient_tokens_match_substrings() {
        let salad = record("Salad", &["cherry tomato", "cucumber"], 4.0);
        let query = QueryDescriptor::new().with_ingredients(["tomato cuc"]);
        assert!(query.matches_ingredients(&salad));

        let query = QueryDescriptor::new().with_ingredients(["tomato beef"]);
        assert!(!query.matches_ingredients(&salad));
    }

    #[test]
    fn test_ties_break_by_rating_then_title() {
        let idx = index(vec![
            record("B", &["egg", "milk"], 4.0),
            record("A", &["egg", "flour"], 4.0),
            record("C", &["egg", "sugar"], 5.0),
        ]);
        let query = QueryDescriptor::new().with_ingredients(["egg"]);

        let titles: Vec<&str> = rank(&idx, &query)
            .iter()
            .map(|m| m.record.title.as_str())
            .collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_title_stage_matches_title_or_ingredient() {
        let idx = index(vec![
            record("Garlic Bread", &["bread", "garlic"], 3.0),
            record("Aioli", &["garlic clove", "egg"], 4.0),
            record("Pancake", &["egg", "flour"], 5.0),
        ]);
        let query = QueryDescriptor::new().with_title("GARLIC");

        let titles: Vec<&str> = rank(&idx, &query)
            .iter()
            .map(|m| m.record.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Aioli", "Garlic Bread"]);
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let idx = index(vec![record("A", &["egg"], 1.0)]);
        let result = search(&idx, &QueryDescriptor::new(), 0, 1);
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_page_zero_is_out_of_range() {
        let idx = index(vec![record("A", &["egg"], 1.0)]);
        let result = search(&idx, &QueryDescriptor::new(), 10, 0);
        assert!(matches!(
            result,
            Err(Error::OutOfRange {
                page: 0,
                total_pages: 1
            })
        ));
    }

    #[test]
    fn test_no_matches_still_has_one_page() {
        let idx = index(vec![record("A", &["egg"], 1.0)]);
        let query = QueryDescriptor::new().with_ingredients(["saffron"]);

        let results = search(&idx, &query, 25, 1).unwrap();
        assert_eq!(results.total, 0);
        assert_eq!(results.total_pages, 1);
        assert!(results.results.is_empty());
    }

    #[test]
    fn test_summary() {
        let query = QueryDescriptor::new()
            .with_ingredients(["tomato"])
            .with_filters(Filters {
                vegetarian: Some(true),
                recipe_types: Some(BTreeSet::from([RecipeType::MainCourse])),
                ..Default::default()
            })
            .with_title("soup");
        assert_eq!(
            query.to_string(),
            "ingredients: tomato - recipe type: Main Course - vegetarian recipes only - title search: soup"
        );
        assert_eq!(QueryDescriptor::new().to_string(), "all recipes");
    }
}
