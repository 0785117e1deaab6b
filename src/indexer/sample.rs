use crate::error::{Error, Result};
use crate::indexer::index::RecipeIndex;
use crate::indexer::recipe::{RecipeRecord, RecipeType};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;
use tracing::info;

/// Number of recipes to keep per recipe type
///
/// Types missing from the plan are left out of the sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplePlan(pub BTreeMap<RecipeType, usize>);

impl Default for SamplePlan {
    /// 10,000 recipes weighted towards mains and desserts
    fn default() -> Self {
        Self(BTreeMap::from([
            (RecipeType::Beverages, 1500),
            (RecipeType::Breakfast, 1300),
            (RecipeType::Dessert, 3200),
            (RecipeType::MainCourse, 4000),
        ]))
    }
}

impl SamplePlan {
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }
}

/// Draw a smaller index following `plan`
///
/// Within each type, recipes tagged with a world cuisine are taken first and
/// the remainder is filled from untagged ones. The result is shuffled. The
/// same seed always produces the same sample.
pub fn stratified_sample(index: &RecipeIndex, plan: &SamplePlan, seed: u64) -> Result<RecipeIndex> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut sampled: Vec<RecipeRecord> = Vec::with_capacity(plan.total().min(index.len()));

    for (&recipe_type, &wanted) in &plan.0 {
        let (mut tagged, mut untagged): (Vec<&RecipeRecord>, Vec<&RecipeRecord>) = index
            .all()
            .filter(|r| r.recipe_type == recipe_type)
            .partition(|r| r.has_cuisine());

        tagged.shuffle(&mut rng);
        untagged.shuffle(&mut rng);

        let from_tagged = wanted.min(tagged.len());
        let from_untagged = (wanted - from_tagged).min(untagged.len());

        info!(
            "Sampling {}: {} cuisine-tagged + {} other (wanted {})",
            recipe_type, from_tagged, from_untagged, wanted
        );

        sampled.extend(tagged.into_iter().take(from_tagged).cloned());
        sampled.extend(untagged.into_iter().take(from_untagged).cloned());
    }

    if sampled.is_empty() {
        return Err(Error::Validation(
            "Sample plan selects no recipes from this index".to_string(),
        ));
    }

    sampled.shuffle(&mut rng);
    Ok(RecipeIndex::from_records(sampled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::recipe::{Cuisine, DurationCategory, RecipeDetails};
    use std::collections::BTreeSet;

    fn record(title: String, recipe_type: RecipeType, tagged: bool) -> RecipeRecord {
        RecipeRecord {
            id: 0,
            title,
            ingredients: vec!["salt".to_string()],
            normalized_ingredients: BTreeSet::from(["salt".to_string()]),
            instructions: vec![],
            link: String::new(),
            recipe_type,
            duration: DurationCategory::Under30,
            is_vegetarian: true,
            is_beginner_friendly: false,
            cuisines: if tagged {
                BTreeSet::from([Cuisine::Asian])
            } else {
                BTreeSet::new()
            },
            rating: 4.0,
            review_count: 1,
            details: RecipeDetails::default(),
        }
    }

    fn corpus() -> RecipeIndex {
        let mut records = Vec::new();
        for i in 0..10 {
            records.push(record(format!("dessert {i}"), RecipeType::Dessert, i < 3));
            records.push(record(format!("drink {i}"), RecipeType::Beverages, false));
            records.push(record(format!("main {i}"), RecipeType::MainCourse, true));
        }
        RecipeIndex::from_records(records)
    }

    #[test]
    fn test_sample_prefers_cuisine_tagged_recipes() {
        let plan = SamplePlan(BTreeMap::from([
            (RecipeType::Dessert, 5),
            (RecipeType::Beverages, 2),
        ]));

        let sample = stratified_sample(&corpus(), &plan, 42).unwrap();
        let counts = sample.type_counts();

        assert_eq!(sample.len(), 7);
        assert_eq!(counts.get(&RecipeType::Dessert), Some(&5));
        assert_eq!(counts.get(&RecipeType::Beverages), Some(&2));
        assert_eq!(counts.get(&RecipeType::MainCourse), Some(&0));

        let tagged_desserts = sample
            .all()
            .filter(|r| r.recipe_type == RecipeType::Dessert && r.has_cuisine())
            .count();
        assert_eq!(tagged_desserts, 3);
    }

    #[test]
    fn test_sample_is_deterministic_and_renumbered() {
        let plan = SamplePlan::default();
        let first = stratified_sample(&corpus(), &plan, 7).unwrap();
        let second = stratified_sample(&corpus(), &plan, 7).unwrap();

        let titles = |idx: &RecipeIndex| idx.all().map(|r| r.title.clone()).collect::<Vec<_>>();
        assert_eq!(titles(&first), titles(&second));
        assert_eq!(first.len(), 30);
        assert!(first.all().enumerate().all(|(i, r)| r.id == i));
    }

    #[test]
    fn test_empty_sample_fails() {
        let plan = SamplePlan(BTreeMap::from([(RecipeType::Breakfast, 10)]));
        assert!(stratified_sample(&corpus(), &plan, 1).is_err());
    }
}
