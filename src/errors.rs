//! Error types for each stage of the pipeline.
//!
//! Only [`DataAccessError`], [`OutputError`] and [`ConfigError`] are fatal and
//! reach `main`. The other three are caught where they happen and turn into
//! absent fields on the affected [`SummaryRecord`](crate::models::SummaryRecord).

use thiserror::Error;

/// The article store could not be opened or queried.
#[derive(Error, Debug)]
pub enum DataAccessError {
    #[error("failed to open database {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("table name must not be empty")]
    EmptyTableName,

    #[error("failed to read column `link` from table {table}: {source}")]
    Query {
        table: String,
        #[source]
        source: sqlx::Error,
    },
}

/// Fetching or parsing a single article failed.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// A translation engine could not be constructed.
#[derive(Error, Debug)]
pub enum ModelLoadError {
    #[error("failed to resolve model {model}: {source}")]
    Http {
        model: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("model {model} is not a translation model (pipeline: {pipeline})")]
    NotTranslation { model: String, pipeline: String },

    #[error("invalid endpoint for model {model}: {source}")]
    Endpoint {
        model: String,
        #[source]
        source: url::ParseError,
    },
}

/// Translating one summary into one language failed.
#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("inference endpoint returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("inference endpoint returned no translation")]
    EmptyResponse,
}

/// The spreadsheet could not be written.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The run configuration file is unreadable or invalid.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// A failure that ends the run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    DataAccess(#[from] DataAccessError),

    #[error(transparent)]
    Output(#[from] OutputError),
}
