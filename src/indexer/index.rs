use crate::error::{Error, Result};
use crate::indexer::classify;
use crate::indexer::normalize::{clean_instructions, normalize_ingredient, readable_duration};
use crate::indexer::recipe::{
    Cuisine, DurationCategory, Nutrition, RecipeDetails, RecipeRecord, RecipeType,
};
use crate::indexer::row::RawRecipeRow;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use tracing::{debug, info, warn};

/// Immutable in-memory table of normalized recipes
///
/// Built once, then shared read-only. Records keep insertion order and their
/// `id` is their position in that order.
#[derive(Debug, Clone)]
pub struct RecipeIndex {
    records: Vec<RecipeRecord>,
    vocabulary: Vec<IngredientCount>,
}

/// How often a normalized ingredient appears across the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientCount {
    pub name: String,
    pub count: usize,
}

/// A row rejected because a required field was missing or badly shaped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedRow {
    pub row: usize,
    pub reason: String,
}

/// What happened to every row fed into an index build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub rows_read: usize,
    pub accepted: usize,
    pub malformed: Vec<MalformedRow>,
    pub empty_ingredients: usize,
    pub unclassified: usize,
    pub duplicate_titles: usize,
}

impl BuildReport {
    pub fn excluded(&self) -> usize {
        self.malformed.len() + self.empty_ingredients + self.unclassified + self.duplicate_titles
    }
}

enum Normalized {
    Record(Box<RecipeRecord>),
    NoIngredients,
    Unclassified,
}

/// Incremental index construction
///
/// Rows are numbered from 1 in the order they are pushed. A bad row is
/// reported and skipped; it never aborts the build.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    records: Vec<RecipeRecord>,
    titles: HashSet<String>,
    report: BuildReport,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_row(&mut self) -> usize {
        self.report.rows_read += 1;
        self.report.rows_read
    }

    fn reject(&mut self, error: Error) {
        warn!("Skipping record: {}", error);
        if let Error::MalformedRecord { row, reason } = error {
            self.report.malformed.push(MalformedRow { row, reason });
        }
    }

    /// Record a row that could not even be parsed
    pub fn push_invalid(&mut self, reason: impl Into<String>) {
        let row = self.next_row();
        self.reject(malformed(row, reason));
    }

    /// Add a row given as untyped JSON, reporting shape errors as malformed
    pub fn push_value(&mut self, value: serde_json::Value) {
        match serde_json::from_value::<RawRecipeRow>(value) {
            Ok(raw) => self.push_row(raw),
            Err(e) => self.push_invalid(e.to_string()),
        }
    }

    /// Add a cleaned row
    pub fn push_row(&mut self, raw: RawRecipeRow) {
        let row = self.next_row();

        let record = match normalize_row(row, self.records.len(), raw) {
            Ok(Normalized::Record(record)) => record,
            Ok(Normalized::NoIngredients) => {
                debug!("Row {} has no usable ingredients", row);
                self.report.empty_ingredients += 1;
                return;
            }
            Ok(Normalized::Unclassified) => {
                debug!("Row {} fits no recipe type", row);
                self.report.unclassified += 1;
                return;
            }
            Err(e) => {
                self.reject(e);
                return;
            }
        };

        if !self.titles.insert(record.title.clone()) {
            debug!("Row {} duplicates title {:?}", row, record.title);
            self.report.duplicate_titles += 1;
            return;
        }

        self.records.push(*record);
        self.report.accepted += 1;
    }

    /// Finish the build
    ///
    /// Fails with `EmptyIndex` rather than returning an index with no records.
    pub fn finish(self) -> Result<(RecipeIndex, BuildReport)> {
        let report = self.report;

        if self.records.is_empty() {
            return Err(Error::EmptyIndex {
                malformed: report.malformed.len(),
            });
        }

        info!(
            "Recipe index built: {} of {} rows accepted ({} malformed, {} without ingredients, {} unclassified, {} duplicate titles)",
            report.accepted,
            report.rows_read,
            report.malformed.len(),
            report.empty_ingredients,
            report.unclassified,
            report.duplicate_titles
        );

        Ok((RecipeIndex::from_records(self.records), report))
    }
}

fn required<T>(value: Option<T>, row: usize, field: &str) -> Result<T> {
    value.ok_or_else(|| Error::MalformedRecord {
        row,
        reason: format!("missing required field `{field}`"),
    })
}

fn malformed(row: usize, reason: impl Into<String>) -> Error {
    Error::MalformedRecord {
        row,
        reason: reason.into(),
    }
}

fn normalize_row(row: usize, id: usize, raw: RawRecipeRow) -> Result<Normalized> {
    let cuisine_flags = raw.cuisine_columns();
    let title = required(raw.title, row, "title")?.trim().to_string();
    if title.is_empty() {
        return Err(malformed(row, "title is blank"));
    }
    let ingredients = required(raw.ingredients, row, "ingredients")?;
    let directions = required(raw.directions, row, "directions")?;
    let link = required(raw.link, row, "link")?;
    let ner = required(raw.ner, row, "NER")?;

    let rating = required(raw.rating, row, "AggregatedRating")?;
    if !rating.is_finite() {
        return Err(malformed(row, "AggregatedRating is not a number"));
    }
    let review_count = required(raw.review_count, row, "ReviewCount")?;
    if !review_count.is_finite() || review_count < 0.0 {
        return Err(malformed(row, "ReviewCount must be a non-negative number"));
    }

    // The cleaned dataset stores keywords as hashtags
    let keywords: Vec<String> = raw
        .keywords
        .iter()
        .map(|k| k.trim().trim_start_matches('#').to_string())
        .filter(|k| !k.is_empty())
        .collect();

    let normalized_ingredients: BTreeSet<String> =
        ner.iter().filter_map(|n| normalize_ingredient(n)).collect();
    if normalized_ingredients.is_empty() {
        return Ok(Normalized::NoIngredients);
    }

    let recipe_type = match raw.recipe_type.as_deref() {
        Some("Other") => None,
        Some(label) => Some(
            label
                .parse::<RecipeType>()
                .map_err(|e| malformed(row, e.to_string()))?,
        ),
        None => classify::classify_recipe_type(&keywords, &title, raw.category.as_deref()),
    };
    let Some(recipe_type) = recipe_type else {
        return Ok(Normalized::Unclassified);
    };

    let duration = match (raw.duration_category.as_deref(), raw.total_time.as_deref()) {
        (Some(label), _) => label
            .parse::<DurationCategory>()
            .map_err(|e| malformed(row, e.to_string()))?,
        (None, Some(total)) => classify::duration_category(total)
            .ok_or_else(|| malformed(row, format!("unreadable TotalTime {total:?}")))?,
        (None, None) => return Err(malformed(row, "missing required field `TotalTime`")),
    };

    let is_vegetarian = raw
        .vegetarian
        .unwrap_or_else(|| classify::is_vegetarian(&ner));
    let is_beginner_friendly = raw
        .beginner_friendly
        .unwrap_or_else(|| classify::is_beginner_friendly(&keywords));
    let cuisines = match cuisine_flags {
        Some(flags) => Cuisine::ALL
            .into_iter()
            .zip(flags)
            .filter_map(|(cuisine, set)| set.then_some(cuisine))
            .collect(),
        None => classify::cuisines(&keywords),
    };

    let details = RecipeDetails {
        author: raw.author,
        description: raw.description,
        image_url: raw.image_url,
        servings: raw
            .servings
            .filter(|s| s.is_finite() && *s >= 0.0)
            .map(|s| s as u32),
        cook_time: raw.cook_time.as_deref().map(readable_duration),
        prep_time: raw.prep_time.as_deref().map(readable_duration),
        total_time: raw.total_time.as_deref().map(readable_duration),
        keywords,
        nutrition: Nutrition {
            calories: raw.calories,
            fat: raw.fat,
            saturated_fat: raw.saturated_fat,
            cholesterol: raw.cholesterol,
            sodium: raw.sodium,
            carbohydrate: raw.carbohydrate,
            fiber: raw.fiber,
            sugar: raw.sugar,
            protein: raw.protein,
        },
    };

    Ok(Normalized::Record(Box::new(RecipeRecord {
        id,
        title,
        ingredients: ingredients.iter().map(|i| i.trim().to_string()).collect(),
        normalized_ingredients,
        instructions: clean_instructions(&directions),
        link: link.trim().to_string(),
        recipe_type,
        duration,
        is_vegetarian,
        is_beginner_friendly,
        cuisines,
        rating,
        review_count: review_count as u32,
        details,
    })))
}

impl RecipeIndex {
    /// Build an index from cleaned rows
    pub fn build<I>(rows: I) -> Result<(Self, BuildReport)>
    where
        I: IntoIterator<Item = RawRecipeRow>,
    {
        let mut builder = IndexBuilder::new();
        for row in rows {
            builder.push_row(row);
        }
        builder.finish()
    }

    /// Wrap already-normalized records, renumbering them in the given order
    pub(crate) fn from_records(mut records: Vec<RecipeRecord>) -> Self {
        for (id, record) in records.iter_mut().enumerate() {
            record.id = id;
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in &records {
            for name in &record.normalized_ingredients {
                *counts.entry(name.as_str()).or_default() += 1;
            }
        }

        let mut vocabulary: Vec<IngredientCount> = counts
            .into_iter()
            .map(|(name, count)| IngredientCount {
                name: name.to_string(),
                count,
            })
            .collect();
        vocabulary.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

        Self {
            records,
            vocabulary,
        }
    }

    /// Every record in insertion order; call again to restart
    pub fn all(&self) -> std::slice::Iter<'_, RecipeRecord> {
        self.records.iter()
    }

    pub fn get(&self, id: usize) -> Option<&RecipeRecord> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Normalized ingredient names, most frequent first
    pub fn ingredient_vocabulary(&self) -> &[IngredientCount] {
        &self.vocabulary
    }

    /// Records per recipe type; every type is present, possibly with zero
    pub fn type_counts(&self) -> BTreeMap<RecipeType, usize> {
        let mut counts: BTreeMap<RecipeType, usize> =
            RecipeType::ALL.into_iter().map(|t| (t, 0)).collect();
        for record in &self.records {
            *counts.entry(record.recipe_type).or_default() += 1;
        }
        counts
    }
}
