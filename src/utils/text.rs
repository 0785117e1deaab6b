/// Truncate text to a maximum number of characters
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// First `count` ingredients joined for a result card, with an ellipsis when
/// more are left out
pub fn ingredient_preview(ingredients: &[String], count: usize) -> String {
    let shown = ingredients
        .iter()
        .take(count)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    if ingredients.len() > count {
        format!("{shown}...")
    } else {
        shown
    }
}
