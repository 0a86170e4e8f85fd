//! Reads article links from a SQLite table.
//!
//! The whole `link` column is loaded into memory in the order SQLite
//! returns it. The database is opened read-only and is never created.

use crate::errors::DataAccessError;
use crate::models::ArticleReference;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{Connection, Row};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Quote `name` as an SQL identifier so it cannot break out of the query.
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Load every `link` value from `table` in the database at `db_path`.
///
/// NULL links are returned as empty strings so every row still produces an
/// output record.
///
/// # Errors
///
/// Returns [`DataAccessError`] if the file cannot be opened as a SQLite
/// database or if the table or its `link` column does not exist.
#[instrument(level = "info", skip_all, fields(db = %db_path.display(), %table))]
pub async fn read_article_links(
    db_path: &Path,
    table: &str,
) -> Result<Vec<ArticleReference>, DataAccessError> {
    if table.trim().is_empty() {
        return Err(DataAccessError::EmptyTableName);
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .read_only(true)
        .create_if_missing(false);
    let mut conn = SqliteConnection::connect_with(&options)
        .await
        .map_err(|source| DataAccessError::Open {
            path: db_path.display().to_string(),
            source,
        })?;

    let sql = format!(
        "SELECT CAST(link AS TEXT) AS link FROM {}",
        quote_identifier(table)
    );
    debug!(%sql, "Querying article links");

    let rows = sqlx::query(&sql)
        .fetch_all(&mut conn)
        .await
        .map_err(|source| DataAccessError::Query {
            table: table.to_string(),
            source,
        })?;

    let mut links = Vec::with_capacity(rows.len());
    for row in &rows {
        let link: Option<String> = row.try_get("link").map_err(|source| {
            DataAccessError::Query {
                table: table.to_string(),
                source,
            }
        })?;
        links.push(ArticleReference {
            link: link.unwrap_or_default(),
        });
    }

    // Read-only connection; a failed close loses nothing.
    let _ = conn.close().await;

    info!(count = links.len(), "Loaded article links");
    Ok(links)
}
