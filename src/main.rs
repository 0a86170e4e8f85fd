//! # news_translate
//!
//! A batch pipeline that reads article links from a SQLite table, scrapes
//! each article, cuts the text down to a short summary, translates the
//! summary into a set of target languages and writes everything to an
//! `.xlsx` spreadsheet.
//!
//! ## Usage
//!
//! ```sh
//! news_translate -d news_articles_shortened.db -t articles -o summaries.xlsx
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Reading**: Load every `link` from the configured table
//! 2. **Extraction**: Fetch each page and strip it down to title and body
//! 3. **Summarizing/Translating**: Truncate the body, translate per language
//! 4. **Output**: Write one spreadsheet row per link
//!
//! Articles are processed one at a time. A failure on one article or one
//! language blanks the affected cells and the run carries on.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod errors;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod source;
mod summarizer;
mod translate;
mod utils;

#[cfg(test)]
mod test_support;

use cli::Cli;
use config::PipelineConfig;
use pipeline::RunSettings;
use scrapers::article::ArticleExtractor;
use translate::inference::InferenceClient;
use utils::{ensure_writable_dir, parent_dir};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_translate starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.database, %args.table, ?args.output, args.max_words, ?args.truncation, "Parsed CLI arguments");

    let config = PipelineConfig::load(args.config.as_deref()).await?;

    // Early check: ensure the output directory is writable
    let output_dir = parent_dir(&args.output);
    if let Err(e) = ensure_writable_dir(output_dir).await {
        error!(
            path = %output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    let extractor = ArticleExtractor::new(&config.user_agent)?;
    let http = reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .build()?;
    let loader = InferenceClient::new(
        http,
        &config.model_info_url,
        &config.inference_url,
        args.hf_api_token.clone(),
    )?;
    let summarizer = summarizer::for_truncation(args.truncation);

    let settings = RunSettings {
        database: &args.database,
        table: &args.table,
        output: &args.output,
        max_words: args.max_words,
        languages: &config.languages,
        max_translation_length: config.max_translation_length,
    };

    let report = match pipeline::run(&settings, &extractor, &loader, summarizer.as_ref()).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Run failed");
            return Err(e.into());
        }
    };

    for (language, tally) in &report.translations {
        info!(
            %language,
            succeeded = tally.succeeded,
            failed = tally.failed,
            "Translation results"
        );
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        rows = report.rows,
        extracted = report.extracted,
        extraction_failed = report.extraction_failed,
        output = %args.output.display(),
        "Execution complete"
    );

    Ok(())
}
