//! Command-line interface definitions for news_translate.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every argument has a default, so running the binary with no flags reads
//! `news_articles_shortened.db` and writes
//! `news_summaries_translations_shortened.xlsx` in the current directory.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How article bodies are cut down to a summary.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Truncation {
    /// Keep the first N characters.
    #[default]
    Chars,
    /// Keep the first N whitespace-separated words.
    Words,
}

/// Command-line arguments for the news_translate application.
///
/// # Examples
///
/// ```sh
/// # Defaults: ./news_articles_shortened.db, table `articles`
/// news_translate
///
/// # Custom paths and a larger summary budget
/// news_translate -d feeds.db -t links -o out/summaries.xlsx -w 120
///
/// # Extra languages from a config file
/// news_translate -c languages.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// SQLite database holding the article links
    #[arg(short, long, default_value = "news_articles_shortened.db")]
    pub database: PathBuf,

    /// Table with a `link` column
    #[arg(short, long, default_value = "articles")]
    pub table: String,

    /// Spreadsheet to write (overwritten if it exists)
    #[arg(short, long, default_value = "news_summaries_translations_shortened.xlsx")]
    pub output: PathBuf,

    /// Summary budget, counted in units chosen by --truncation
    #[arg(short = 'w', long, default_value_t = 60)]
    pub max_words: usize,

    /// Unit used by --max-words
    #[arg(long, value_enum, default_value_t = Truncation::Chars)]
    pub truncation: Truncation,

    /// Optional path to a YAML config with languages and endpoints
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Bearer token for the model hub and inference endpoint
    #[arg(long, env = "HF_API_TOKEN", hide_env_values = true)]
    pub hf_api_token: Option<String>,
}
