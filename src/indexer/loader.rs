use crate::error::Result;
use crate::indexer::index::{BuildReport, IndexBuilder, RecipeIndex};
use std::path::Path;
use tracing::info;

/// Load cleaned rows from a JSON array or JSON Lines file and build the index
///
/// A file that is not valid JSON as a whole fails outright. In JSON Lines
/// mode a single unparsable line is reported as a malformed row instead.
pub fn load_index(path: impl AsRef<Path>) -> Result<(RecipeIndex, BuildReport)> {
    let path = path.as_ref();
    info!("Loading recipes from {:?}", path);

    let content = std::fs::read_to_string(path)?;
    let mut builder = IndexBuilder::new();

    if content.trim_start().starts_with('[') {
        let rows: Vec<serde_json::Value> = serde_json::from_str(&content)?;
        for row in rows {
            builder.push_value(row);
        }
    } else {
        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            match serde_json::from_str::<serde_json::Value>(line) {
                Ok(row) => builder.push_value(row),
                Err(e) => builder.push_invalid(format!("invalid JSON: {e}")),
            }
        }
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ROW: &str = r#"{"title":"Tomato Soup","ingredients":["2 tomatoes"],"directions":["Simmer."],"link":"example.com/soup","NER":["tomatoes"],"TotalTime":"PT20M","AggregatedRating":4.0,"ReviewCount":3}"#;

    #[test]
    fn test_load_json_lines() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{ROW}").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "{{not json").unwrap();

        let (index, report) = load_index(file.path()).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(report.rows_read, 2);
        assert_eq!(report.malformed.len(), 1);
        assert_eq!(report.malformed[0].row, 2);
    }

    #[test]
    fn test_load_json_array() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[{ROW}]").unwrap();

        let (index, _) = load_index(file.path()).unwrap();
        assert_eq!(index.get(0).unwrap().title, "Tomato Soup");
    }

    #[test]
    fn test_broken_array_fails() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[{ROW}").unwrap();

        assert!(matches!(load_index(file.path()), Err(Error::Json(_))));
    }

    #[test]
    fn test_missing_file_fails() {
        assert!(matches!(
            load_index("/nonexistent/recipes.jsonl"),
            Err(Error::Io(_))
        ));
    }
}
