use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PortfolioRow {
    pub id: Uuid,
    /// Preserves the row order of the CSV the table was seeded from.
    pub position: i32,
    pub techstack: String,
    pub link: String,
    pub created_at: DateTime<Utc>,
}
