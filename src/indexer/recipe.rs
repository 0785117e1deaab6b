use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Course a recipe belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeType {
    MainCourse,
    Breakfast,
    Dessert,
    Beverages,
}

impl RecipeType {
    pub const ALL: [RecipeType; 4] = [
        RecipeType::MainCourse,
        RecipeType::Breakfast,
        RecipeType::Dessert,
        RecipeType::Beverages,
    ];

    /// Label used by the cleaned dataset's `RecipeType` column
    pub fn label(&self) -> &'static str {
        match self {
            RecipeType::MainCourse => "Main Course",
            RecipeType::Breakfast => "Breakfast",
            RecipeType::Dessert => "Dessert",
            RecipeType::Beverages => "Beverages",
        }
    }
}

impl fmt::Display for RecipeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RecipeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match key.as_str() {
            "maincourse" | "main" => Ok(RecipeType::MainCourse),
            "breakfast" => Ok(RecipeType::Breakfast),
            "dessert" => Ok(RecipeType::Dessert),
            "beverages" | "beverage" => Ok(RecipeType::Beverages),
            _ => Err(Error::Validation(format!(
                "Invalid recipe type: {s}. Must be main_course, breakfast, dessert or beverages"
            ))),
        }
    }
}

/// Coarse bucket of a recipe's total time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DurationCategory {
    #[serde(rename = "under_30min")]
    Under30,
    #[serde(rename = "under_1h")]
    Under1h,
    #[serde(rename = "over_1h")]
    Over1h,
}

impl DurationCategory {
    pub fn from_minutes(total_minutes: u32) -> Self {
        if total_minutes <= 30 {
            DurationCategory::Under30
        } else if total_minutes <= 60 {
            DurationCategory::Under1h
        } else {
            DurationCategory::Over1h
        }
    }

    /// Label used by the cleaned dataset's `TotalTime_cat` column
    pub fn label(&self) -> &'static str {
        match self {
            DurationCategory::Under30 => "< 30min",
            DurationCategory::Under1h => "< 1h",
            DurationCategory::Over1h => "> 1h",
        }
    }
}

impl fmt::Display for DurationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DurationCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "< 30min" | "under_30min" | "under30" | "30m" => Ok(DurationCategory::Under30),
            "< 1h" | "under_1h" | "under1h" | "1h" => Ok(DurationCategory::Under1h),
            "> 1h" | "over_1h" | "over1h" => Ok(DurationCategory::Over1h),
            _ => Err(Error::Validation(format!(
                "Invalid duration: {s}. Must be under_30min, under_1h or over_1h"
            ))),
        }
    }
}

/// World region a recipe's cuisine is tagged with
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cuisine {
    Asian,
    African,
    AmericasRegion,
    EuropeRegion,
}

impl Cuisine {
    pub const ALL: [Cuisine; 4] = [
        Cuisine::Asian,
        Cuisine::African,
        Cuisine::AmericasRegion,
        Cuisine::EuropeRegion,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Cuisine::Asian => "Asian",
            Cuisine::African => "African",
            Cuisine::AmericasRegion => "North & South America",
            Cuisine::EuropeRegion => "Europe and Eastern Europe",
        }
    }
}

impl fmt::Display for Cuisine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Cuisine {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "asian" | "asia" => Ok(Cuisine::Asian),
            "african" | "africa" => Ok(Cuisine::African),
            "americas" | "americas_region" | "america" | "north & south america" => {
                Ok(Cuisine::AmericasRegion)
            }
            "europe" | "europe_region" | "european" | "europe and eastern europe" => {
                Ok(Cuisine::EuropeRegion)
            }
            _ => Err(Error::Validation(format!(
                "Invalid cuisine: {s}. Must be asian, african, americas or europe"
            ))),
        }
    }
}

/// Nutrition facts per serving
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: Option<f64>,
    pub fat: Option<f64>,
    pub saturated_fat: Option<f64>,
    pub cholesterol: Option<f64>,
    pub sodium: Option<f64>,
    pub carbohydrate: Option<f64>,
    pub fiber: Option<f64>,
    pub sugar: Option<f64>,
    pub protein: Option<f64>,
}

/// Descriptive fields carried for display only; never used for matching
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetails {
    pub author: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub keywords: Vec<String>,
    pub servings: Option<u32>,
    pub cook_time: Option<String>,
    pub prep_time: Option<String>,
    pub total_time: Option<String>,
    pub nutrition: Nutrition,
}

/// One normalized row of the recipe index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub id: usize,
    pub title: String,
    pub ingredients: Vec<String>,
    pub normalized_ingredients: BTreeSet<String>,
    pub instructions: Vec<String>,
    pub link: String,
    pub recipe_type: RecipeType,
    pub duration: DurationCategory,
    pub is_vegetarian: bool,
    pub is_beginner_friendly: bool,
    pub cuisines: BTreeSet<Cuisine>,
    pub rating: f64,
    pub review_count: u32,
    pub details: RecipeDetails,
}

impl RecipeRecord {
    pub fn has_cuisine(&self) -> bool {
        !self.cuisines.is_empty()
    }
}
