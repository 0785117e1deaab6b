// Text normalization applied to cleaned rows while the index is built
use regex::Regex;
use std::sync::LazyLock;

static HOURS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)H").expect("valid regex"));
static MINUTES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)M").expect("valid regex"));

/// Irregular plurals seen in ingredient lists
const IRREGULAR: &[(&str, &str)] = &[
    ("leaves", "leaf"),
    ("loaves", "loaf"),
    ("halves", "half"),
    ("knives", "knife"),
    ("calves", "calf"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("children", "child"),
    ("people", "person"),
    ("cookies", "cookie"),
    ("brownies", "brownie"),
    ("veggies", "veggie"),
    ("smoothies", "smoothie"),
];

/// Words that look plural but must be left alone
const INVARIANT: &[&str] = &[
    "molasses", "series", "species", "swiss", "hummus", "couscous", "asparagus", "citrus",
    "octopus", "schnapps", "chips", "greens", "grits", "brussels", "oats", "peas", "bass",
];

/// Digits of one duration component, or `None` when the component is absent
fn component<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Total minutes of an ISO 8601 duration such as `PT1H30M`
///
/// Only hour and minute components are read. Returns `None` when the value
/// is not an ISO duration at all, or when a component does not fit.
pub fn parse_iso_minutes(duration: &str) -> Option<u32> {
    let duration = duration.trim();
    if !duration.starts_with('P') {
        return None;
    }

    let hours = match component(&HOURS, duration) {
        Some(digits) => digits.parse::<u32>().ok()?,
        None => 0,
    };
    let minutes = match component(&MINUTES, duration) {
        Some(digits) => digits.parse::<u32>().ok()?,
        None => 0,
    };
    hours.checked_mul(60)?.checked_add(minutes)
}

/// Convert an ISO 8601 duration to display form (`PT1H30M` -> `1 h 30 min`)
///
/// Values that are not ISO durations are returned trimmed and unchanged.
/// Component digits are shown as written, minus leading zeros.
pub fn readable_duration(duration: &str) -> String {
    let duration = duration.trim();
    if !duration.starts_with('P') {
        return duration.to_string();
    }

    let digits = |d: &str| match d.trim_start_matches('0') {
        "" => "0".to_string(),
        trimmed => trimmed.to_string(),
    };

    let mut parts = Vec::new();
    if let Some(hours) = component(&HOURS, duration) {
        parts.push(format!("{} h", digits(hours)));
    }
    if let Some(minutes) = component(&MINUTES, duration) {
        parts.push(format!("{} min", digits(minutes)));
    }
    parts.join(" ")
}

/// Singular form of a single lower-case English word
pub fn singularize(word: &str) -> String {
    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == word) {
        return singular.to_string();
    }

    if word.len() <= 3
        || INVARIANT.contains(&word)
        || word.ends_with("ss")
        || word.ends_with("us")
        || word.ends_with("is")
    {
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix("ies") {
        if stem.len() > 1 {
            return format!("{stem}y");
        }
    }

    if let Some(stem) = word.strip_suffix("oes") {
        return format!("{stem}o");
    }

    for suffix in ["ches", "shes", "xes", "sses"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }

    match word.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => word.to_string(),
    }
}

/// Matching form of an ingredient name: lower-cased, whitespace collapsed and
/// the head noun (last word) singularized
pub fn normalize_ingredient(name: &str) -> Option<String> {
    let lowered = name.to_lowercase();
    let mut words: Vec<&str> = lowered.split_whitespace().collect();
    let last = words.pop()?;
    let singular = singularize(last);

    if words.is_empty() {
        Some(singular)
    } else {
        Some(format!("{} {}", words.join(" "), singular))
    }
}

/// Trim instruction steps and drop empty ones
pub fn clean_instructions(steps: &[String]) -> Vec<String> {
    steps
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_minutes() {
        assert_eq!(parse_iso_minutes("PT1H30M"), Some(90));
        assert_eq!(parse_iso_minutes("PT45M"), Some(45));
        assert_eq!(parse_iso_minutes("PT2H"), Some(120));
        assert_eq!(parse_iso_minutes("PT0M"), Some(0));
        assert_eq!(parse_iso_minutes("45 minutes"), None);
    }

    #[test]
    fn test_oversized_durations_are_unreadable() {
        assert_eq!(parse_iso_minutes("PT80000000H"), None);
        assert_eq!(parse_iso_minutes("PT99999999999M"), None);
        assert_eq!(parse_iso_minutes("PT71582789H"), None);
        assert_eq!(parse_iso_minutes("PT71582788H16M"), None);
        assert_eq!(parse_iso_minutes("PT71582788H15M"), Some(u32::MAX));
    }

    #[test]
    fn test_readable_duration() {
        assert_eq!(readable_duration("PT1H30M"), "1 h 30 min");
        assert_eq!(readable_duration("PT45M"), "45 min");
        assert_eq!(readable_duration("PT3H"), "3 h");
        assert_eq!(readable_duration(" 20 min "), "20 min");
        assert_eq!(readable_duration("PT05M"), "5 min");
        assert_eq!(readable_duration("PT0H0M"), "0 h 0 min");
        assert_eq!(readable_duration("PT99999999999M"), "99999999999 min");
    }

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("tomatoes"), "tomato");
        assert_eq!(singularize("berries"), "berry");
        assert_eq!(singularize("peaches"), "peach");
        assert_eq!(singularize("eggs"), "egg");
        assert_eq!(singularize("cloves"), "clove");
        assert_eq!(singularize("leaves"), "leaf");
        assert_eq!(singularize("cheeses"), "cheese");
        assert_eq!(singularize("cookies"), "cookie");
        assert_eq!(singularize("anchovies"), "anchovy");
        assert_eq!(singularize("glasses"), "glass");
        assert_eq!(singularize("molasses"), "molasses");
        assert_eq!(singularize("asparagus"), "asparagus");
        assert_eq!(singularize("salt"), "salt");
        assert_eq!(singularize("gas"), "gas");
    }

    #[test]
    fn test_normalize_ingredient() {
        assert_eq!(
            normalize_ingredient("  Cherry   Tomatoes "),
            Some("cherry tomato".to_string())
        );
        assert_eq!(normalize_ingredient("Onions"), Some("onion".to_string()));
        assert_eq!(normalize_ingredient("   "), None);
    }

    #[test]
    fn test_clean_instructions() {
        let steps = vec![
            " Boil water. ".to_string(),
            "".to_string(),
            "Add pasta.".to_string(),
        ];
        assert_eq!(clean_instructions(&steps), vec!["Boil water.", "Add pasta."]);
    }
}
