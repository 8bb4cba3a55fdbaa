// src/store/mod.rs
//! Append-only results log backed by Postgres.
//!
//! Appends are best-effort: a failed insert reports zero rows inserted
//! and logs, it never raises. Reads go through `Result` and callers
//! decide how to degrade.

use crate::error::GatewayError;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS results (\
    id SERIAL PRIMARY KEY, \
    key TEXT NOT NULL, \
    result TEXT, \
    created_at TIMESTAMP NOT NULL\
)";

/// Handle to the `results` table. Cheap to clone; the pool is shared.
#[derive(Clone)]
pub struct ResultsLog {
    pool: PgPool,
}

/// One row of the per-day activity report.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyCount {
    pub day: NaiveDate,
    pub total: i64,
}

impl ResultsLog {
    /// Connects to the given Postgres URI and bootstraps the schema.
    pub async fn connect(uri: &str) -> Result<Self, GatewayError> {
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .connect(uri)
            .await?;

        sqlx::query(SCHEMA).execute(&pool).await?;
        log::info!("results log connected");

        Ok(Self { pool })
    }

    /// Appends one entry, returning how many rows were inserted.
    ///
    /// Failures are swallowed into a zero count with an error log: the
    /// log is an observability aid, not a dependency of any export.
    pub async fn append(&self, key: &str, result: &str, created_at: NaiveDateTime) -> u64 {
        let outcome = sqlx::query("INSERT INTO results (key, result, created_at) VALUES ($1, $2, $3)")
            .bind(key)
            .bind(result)
            .bind(created_at)
            .execute(&self.pool)
            .await;

        match outcome {
            Ok(done) => done.rows_affected(),
            Err(err) => {
                log::error!("results append for key '{}' failed: {}", key, err);
                0
            }
        }
    }

    /// Counts appended results per day over the half-open window
    /// `[start, end)`.
    pub async fn daily_counts(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<DailyCount>, GatewayError> {
        let rows = sqlx::query(
            "SELECT created_at::date AS day, COUNT(*) AS total \
             FROM results WHERE created_at >= $1 AND created_at < $2 \
             GROUP BY day ORDER BY day",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(DailyCount {
                    day: row.try_get("day")?,
                    total: row.try_get("total")?,
                })
            })
            .collect()
    }
}
