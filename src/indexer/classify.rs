//! Keyword classification tables.
//!
//! Every table here is compiled once and evaluated only while the index is
//! built; queries read the resulting enum fields and never re-run a pattern.

use crate::indexer::normalize::parse_iso_minutes;
use crate::indexer::recipe::{Cuisine, DurationCategory, RecipeType};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Recipe type patterns, tried in this order
const TYPE_PATTERNS: &[(RecipeType, &str)] = &[
    (
        RecipeType::MainCourse,
        r"lunch|meal|meat|chicken|beef|pork|steak|turkey|duck|fish|salmon|lamb|crab|shrimp|lobster|tuna|vegetable|potato|rice|noodle|pasta|penne|spaghetti|macaroni|linguine|pizza|quiche|bean|lentil|onion|soup|stew|dressing",
    ),
    (RecipeType::Breakfast, r"breakfast"),
    (
        RecipeType::Dessert,
        r"dessert|cake|cookie|brownie|muffin|biscuit|babka|sweet|candy|sugar|banana",
    ),
    (
        RecipeType::Beverages,
        r"beverage|cocktail|smoothie|lemonade|coffee",
    ),
];

const NON_VEGETARIAN: &[&str] = &[
    "meat", "chicken", "beef", "pork", "fish", "bacon", "ham", "steak", "scallop", "sausage",
    "lamb", "duck", "goose", "lobster", "shrimp", "prawn", "crab", "squid", "octopus",
    "calamari", "oyster", "mussel", "clam", "snail", "seafood", "prosciutto", "salami",
    "pepperoni", "pancetta", "chorizo", "andouille", "pate", "veal", "venison", "game",
    "poultry", "turkey", "bison", "boar", "tuna", "salmon", "cod", "haddock", "halibut",
    "tilapia", "anchovy", "anchovies",
];

const ASIAN: &[&str] = &[
    "Asian",
    "Indian",
    "Chinese",
    "Southwest Asia (middle East)",
    "Thai",
    "Japanese",
    "Hawaiian",
    "Russian",
    "Korean",
    "Vietnamese",
    "Indonesian",
    "Malaysian",
    "Pakistani",
    "Cantonese",
    "Nepalese",
    "Cambodian",
    "Mongolian",
];

const AFRICAN: &[&str] = &[
    "African",
    "South African",
    "Egyptian",
    "Nigerian",
    "Sudanese",
    "Ecuadorean",
    "Moroccan",
    "Ethiopian",
    "Somalian",
];

const AMERICAS: &[&str] = &[
    "Mexican",
    "Southwestern U.S.",
    "Caribbean",
    "South American",
    "Hawaiian",
    "Cuban",
    "Venezuelan",
    "Peruvian",
    "Puerto Rican",
    "Native American",
    "Colombian",
    "Chilean",
    "Costa Rican",
    "Guatemalan",
    "Honduran",
];

const EUROPE: &[&str] = &[
    "Greek",
    "Scandinavian",
    "German",
    "Spanish",
    "Russian",
    "Hungarian",
    "Lebanese",
    "Danish",
    "Turkish",
    "Finnish",
    "Dutch",
    "Belgian",
    "Norwegian",
    "Welsh",
    "Czech",
    "Icelandic",
];

static TYPE_TABLE: LazyLock<Vec<(RecipeType, Regex)>> = LazyLock::new(|| {
    TYPE_PATTERNS
        .iter()
        .map(|(recipe_type, pattern)| (*recipe_type, Regex::new(pattern).expect("valid regex")))
        .collect()
});

// Keywords must start a word so that "graham" or "champagne" do not read as ham
static NON_VEGETARIAN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = NON_VEGETARIAN
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{alternation})")).expect("valid regex")
});

fn cuisine_table() -> [(Cuisine, &'static [&'static str]); 4] {
    [
        (Cuisine::Asian, ASIAN),
        (Cuisine::African, AFRICAN),
        (Cuisine::AmericasRegion, AMERICAS),
        (Cuisine::EuropeRegion, EUROPE),
    ]
}

fn match_type(text: &str) -> Option<RecipeType> {
    let text = text.to_lowercase();
    TYPE_TABLE
        .iter()
        .find(|(_, re)| re.is_match(&text))
        .map(|(recipe_type, _)| *recipe_type)
}

/// Assign a recipe type from keywords, then title, then category
///
/// The first source that matches any pattern decides. Returns `None` for
/// recipes that fit none of the four types.
pub fn classify_recipe_type(
    keywords: &[String],
    title: &str,
    category: Option<&str>,
) -> Option<RecipeType> {
    let keyword_text = keywords.join(" ");
    let sources = [Some(keyword_text.as_str()), Some(title), category];

    let found = sources.into_iter().flatten().find_map(match_type);
    found
}

/// True unless some ingredient names meat or seafood
pub fn is_vegetarian(ingredients: &[String]) -> bool {
    !ingredients
        .iter()
        .any(|ingredient| NON_VEGETARIAN_PATTERN.is_match(&ingredient.to_lowercase()))
}

pub fn is_beginner_friendly(keywords: &[String]) -> bool {
    keywords.iter().any(|k| k.trim().eq_ignore_ascii_case("easy"))
}

fn mentions(text: &str, keyword: &str) -> bool {
    let padded = format!(" {text} ");
    padded.contains(&format!(" {} ", keyword.to_lowercase()))
}

/// World cuisines named in the keyword list
pub fn cuisines(keywords: &[String]) -> BTreeSet<Cuisine> {
    let text = keywords
        .iter()
        .map(|k| k.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    cuisine_table()
        .into_iter()
        .filter(|(_, table)| table.iter().any(|keyword| mentions(&text, keyword)))
        .map(|(cuisine, _)| cuisine)
        .collect()
}

/// Duration bucket of an ISO 8601 total time
pub fn duration_category(total_time: &str) -> Option<DurationCategory> {
    parse_iso_minutes(total_time).map(DurationCategory::from_minutes)
}
