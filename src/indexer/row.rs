use serde::{Deserialize, Serialize};

/// One cleaned row as produced by the data-cleaning pipeline
///
/// Field names follow the cleaned dataset's columns. Everything is optional
/// here so that a missing column surfaces as a malformed-record report from
/// the index builder instead of a parse failure for the whole file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecipeRow {
    pub title: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub directions: Option<Vec<String>>,
    pub link: Option<String>,
    #[serde(rename = "NER")]
    pub ner: Option<Vec<String>>,

    #[serde(rename = "Keywords", default)]
    pub keywords: Vec<String>,
    #[serde(rename = "RecipeCategory")]
    pub category: Option<String>,

    #[serde(rename = "TotalTime")]
    pub total_time: Option<String>,
    #[serde(rename = "CookTime")]
    pub cook_time: Option<String>,
    #[serde(rename = "PrepTime")]
    pub prep_time: Option<String>,

    // Precomputed classification columns; derived when absent
    #[serde(rename = "TotalTime_cat")]
    pub duration_category: Option<String>,
    #[serde(rename = "RecipeType")]
    pub recipe_type: Option<String>,
    #[serde(rename = "Vegetarian_Friendly")]
    pub vegetarian: Option<bool>,
    #[serde(rename = "Beginner_Friendly")]
    pub beginner_friendly: Option<bool>,
    #[serde(rename = "Asian")]
    pub asian: Option<bool>,
    #[serde(rename = "African")]
    pub african: Option<bool>,
    #[serde(rename = "North & South America")]
    pub americas: Option<bool>,
    #[serde(rename = "Europe and Eastern Europe")]
    pub europe: Option<bool>,

    #[serde(rename = "AggregatedRating")]
    pub rating: Option<f64>,
    #[serde(rename = "ReviewCount")]
    pub review_count: Option<f64>,

    #[serde(rename = "AuthorName")]
    pub author: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Images")]
    pub image_url: Option<String>,
    #[serde(rename = "RecipeServings")]
    pub servings: Option<f64>,

    #[serde(rename = "Calories")]
    pub calories: Option<f64>,
    #[serde(rename = "FatContent")]
    pub fat: Option<f64>,
    #[serde(rename = "SaturatedFatContent")]
    pub saturated_fat: Option<f64>,
    #[serde(rename = "CholesterolContent")]
    pub cholesterol: Option<f64>,
    #[serde(rename = "SodiumContent")]
    pub sodium: Option<f64>,
    #[serde(rename = "CarbohydrateContent")]
    pub carbohydrate: Option<f64>,
    #[serde(rename = "FiberContent")]
    pub fiber: Option<f64>,
    #[serde(rename = "SugarContent")]
    pub sugar: Option<f64>,
    #[serde(rename = "ProteinContent")]
    pub protein: Option<f64>,
}

impl RawRecipeRow {
    /// Cuisine columns, if the row carries all four of them
    pub fn cuisine_columns(&self) -> Option<[bool; 4]> {
        Some([self.asian?, self.african?, self.americas?, self.europe?])
    }
}
