// Command-line interface

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pantry-search")]
#[command(about = "Pantry Search - find recipes by the ingredients you have", long_about = None)]
pub struct Cli {
    /// Cleaned recipe data (JSON array or JSON Lines)
    #[arg(long, global = true, env = "DATA_PATH")]
    pub data: Option<PathBuf>,

    /// Reduce the corpus to the stratified 10K sample after loading
    #[arg(long, global = true)]
    pub sample: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the JSON API server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Search recipes by ingredients and filters
    Search {
        /// Ingredients you have (each may hold several words)
        ingredients: Vec<String>,

        /// Accepted durations, comma-separated (under_30min, under_1h, over_1h)
        #[arg(long)]
        duration: Option<String>,

        /// Accepted recipe types, comma-separated
        #[arg(long)]
        recipe_type: Option<String>,

        /// Vegetarian recipes only
        #[arg(long)]
        vegetarian: bool,

        /// Beginner friendly recipes only
        #[arg(long)]
        beginner: bool,

        /// Cuisines, comma-separated (asian, african, americas, europe)
        #[arg(long)]
        cuisine: Option<String>,

        /// Narrow results by title or ingredient text
        #[arg(long)]
        title: Option<String>,

        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Recipes per page
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List ingredient names, most frequent first
    Ingredients {
        /// Number of ingredients to show
        #[arg(long, default_value_t = 20)]
        top: usize,
    },

    /// Show index build report and recipe counts
    Stats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_flags_parse() {
        let cli = Cli::try_parse_from([
            "pantry-search",
            "search",
            "tomato",
            "olive oil",
            "--recipe-type",
            "main_course,dessert",
            "--vegetarian",
        ])
        .unwrap();

        match cli.command {
            Commands::Search {
                ingredients,
                recipe_type,
                vegetarian,
                beginner,
                page,
                ..
            } => {
                assert_eq!(ingredients, vec!["tomato", "olive oil"]);
                assert_eq!(recipe_type.as_deref(), Some("main_course,dessert"));
                assert!(vegetarian);
                assert!(!beginner);
                assert_eq!(page, 1);
            }
            other => panic!("expected search command, got {other:?}"),
        }
    }
}
