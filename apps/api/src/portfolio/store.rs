//! Portfolio Store — loads the portfolio table once at startup.
//!
//! Two backends:
//! - CSV file with `Techstack` and `Links` columns (always available)
//! - PostgreSQL table `portfolio_entries`, seeded from the CSV on first run

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::db::create_pool;
use crate::models::portfolio::PortfolioRow;
use crate::portfolio::{Portfolio, PortfolioEntry};

#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Techstack", alias = "tech_stack", alias = "TechStack")]
    techstack: String,
    #[serde(alias = "Links", alias = "links", alias = "Link")]
    link: String,
}

/// Loads the portfolio from PostgreSQL when `DATABASE_URL` is set, else from the CSV file.
pub async fn load_portfolio(config: &Config) -> Result<Portfolio> {
    let entries = match &config.database_url {
        Some(database_url) => {
            let pool = create_pool(database_url).await?;
            ensure_schema(&pool).await?;

            if count_entries(&pool).await? == 0 {
                if config.portfolio_csv.exists() {
                    let seed = read_csv(&config.portfolio_csv)?;
                    let inserted = seed_entries(&pool, &seed).await?;
                    info!(
                        "Seeded {} portfolio rows from {}",
                        inserted,
                        config.portfolio_csv.display()
                    );
                } else {
                    warn!(
                        "Portfolio table is empty and {} does not exist; no links will be matched",
                        config.portfolio_csv.display()
                    );
                }
            }

            load_entries(&pool).await?
        }
        None => read_csv(&config.portfolio_csv)?,
    };

    info!("Portfolio loaded: {} entries", entries.len());
    Ok(Portfolio::new(entries))
}

/// Reads portfolio entries from a CSV file. Rows without a link are skipped.
pub fn read_csv(path: &Path) -> Result<Vec<PortfolioEntry>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open portfolio CSV {}", path.display()))?;

    let mut entries = Vec::new();
    for (index, record) in reader.deserialize::<CsvRecord>().enumerate() {
        let record = record.with_context(|| {
            format!("Malformed portfolio row {} in {}", index + 1, path.display())
        })?;
        if record.link.trim().is_empty() {
            warn!("Skipping portfolio row {} without a link", index + 1);
            continue;
        }
        entries.push(PortfolioEntry::from_techstack(&record.techstack, record.link));
    }

    Ok(entries)
}

pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS portfolio_entries (
            id          UUID PRIMARY KEY,
            position    INTEGER NOT NULL,
            techstack   TEXT NOT NULL,
            link        TEXT NOT NULL,
            created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create portfolio_entries table")?;
    Ok(())
}

async fn count_entries(pool: &PgPool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM portfolio_entries")
        .fetch_one(pool)
        .await
        .context("Failed to count portfolio rows")?;
    Ok(count)
}

/// Inserts `entries` in one transaction, keeping their order in `position`.
pub async fn seed_entries(pool: &PgPool, entries: &[PortfolioEntry]) -> Result<u64> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0;

    for (position, entry) in entries.iter().enumerate() {
        let position = i32::try_from(position).context("Portfolio too large to seed")?;
        sqlx::query(
            r#"
            INSERT INTO portfolio_entries (id, position, techstack, link)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(position)
        .bind(entry.tags.join(", "))
        .bind(&entry.link)
        .execute(&mut *tx)
        .await?;
        inserted += 1;
    }

    tx.commit().await?;
    Ok(inserted)
}

pub async fn load_entries(pool: &PgPool) -> Result<Vec<PortfolioEntry>> {
    let rows = sqlx::query_as::<_, PortfolioRow>(
        "SELECT id, position, techstack, link, created_at FROM portfolio_entries ORDER BY position, created_at",
    )
    .fetch_all(pool)
    .await
    .context("Failed to load portfolio rows")?;

    Ok(rows.into_iter().map(PortfolioEntry::from).collect())
}

impl From<PortfolioRow> for PortfolioEntry {
    fn from(row: PortfolioRow) -> Self {
        PortfolioEntry::from_techstack(&row.techstack, row.link)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use chrono::Utc;

    use super::*;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_csv_with_original_headers() {
        let file = write_csv(
            "Techstack,Links\n\
             \"React, Node.js, MongoDB\",https://example.com/react-portfolio\n\
             \"Python, Django, PostgreSQL\",https://example.com/python-portfolio\n",
        );
        let entries = read_csv(file.path()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].tags, vec!["React", "Node.js", "MongoDB"]);
        assert_eq!(entries[1].link, "https://example.com/python-portfolio");
    }

    #[test]
    fn test_read_csv_with_lowercase_headers_and_blank_link() {
        let file = write_csv("techstack,link\nRust,https://example.com/rust\nGo,\n");
        let entries = read_csv(file.path()).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].tags, vec!["Rust"]);
    }

    #[test]
    fn test_read_csv_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_csv(&dir.path().join("absent.csv")).unwrap_err();
        assert!(err.to_string().contains("absent.csv"));
    }

    #[test]
    fn test_read_csv_missing_column_is_error() {
        let file = write_csv("Techstack\nRust\n");
        assert!(read_csv(file.path()).is_err());
    }

    #[test]
    fn test_row_converts_to_entry() {
        let row = PortfolioRow {
            id: Uuid::new_v4(),
            position: 0,
            techstack: "Kotlin, Android".to_string(),
            link: "https://example.com/android".to_string(),
            created_at: Utc::now(),
        };
        let entry = PortfolioEntry::from(row);
        assert_eq!(entry.tags, vec!["Kotlin", "Android"]);
        assert_eq!(entry.link, "https://example.com/android");
    }
}
