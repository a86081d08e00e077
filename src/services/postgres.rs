use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// How a user reacted to a proposed match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "interaction_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InteractionType {
    Viewed,
    Liked,
    Passed,
}

impl InteractionType {
    /// Parse the wire spelling used by the event endpoint.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "viewed" => Some(InteractionType::Viewed),
            "liked" => Some(InteractionType::Liked),
            "passed" => Some(InteractionType::Passed),
            _ => None,
        }
    }
}

/// One recorded reaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchInteraction {
    pub user_id: String,
    pub target_user_id: String,
    pub interaction: InteractionType,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Per-user interaction counters for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionStats {
    pub user_id: String,
    pub likes_sent: i64,
    pub likes_received: i64,
    pub mutual_matches: i64,
    pub passed: i64,
}

/// PostgreSQL store for match interactions.
///
/// The core backend owns profiles; this service keeps its own small table of
/// who viewed/liked/passed whom, which drives mutual-match detection and the
/// dashboard counters.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new client and run pending migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, PostgresError> {
        Self::new(url, max_connections.unwrap_or(10), min_connections.unwrap_or(1)).await
    }

    /// Record an interaction, replacing any earlier reaction to the same
    /// target (a pass after a like overwrites the like).
    pub async fn record_interaction(
        &self,
        user_id: &str,
        target_user_id: &str,
        interaction: InteractionType,
    ) -> Result<(), PostgresError> {
        if user_id == target_user_id {
            return Err(PostgresError::InvalidInput(
                "cannot record an interaction with yourself".into(),
            ));
        }

        let query = r#"
            INSERT INTO match_interactions (user_id, target_user_id, interaction, created_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (user_id, target_user_id)
            DO UPDATE SET
                interaction = EXCLUDED.interaction,
                created_at = EXCLUDED.created_at
        "#;

        sqlx::query(query)
            .bind(user_id)
            .bind(target_user_id)
            .bind(interaction)
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "Recorded interaction: {} -> {} ({:?})",
            user_id,
            target_user_id,
            interaction
        );

        Ok(())
    }

    /// Whether `user_id` currently has a like recorded towards `target_user_id`
    pub async fn has_liked(&self, user_id: &str, target_user_id: &str) -> Result<bool, PostgresError> {
        let query = r#"
            SELECT 1 AS found
            FROM match_interactions
            WHERE user_id = $1 AND target_user_id = $2 AND interaction = 'liked'
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .bind(target_user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    /// Whether both users currently like each other
    pub async fn is_mutual_like(&self, user_a: &str, user_b: &str) -> Result<bool, PostgresError> {
        Ok(self.has_liked(user_a, user_b).await? && self.has_liked(user_b, user_a).await?)
    }

    /// Interactions recorded by a user, newest first
    pub async fn get_interactions(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<MatchInteraction>, PostgresError> {
        let query = r#"
            SELECT user_id, target_user_id, interaction, created_at
            FROM match_interactions
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(|row| MatchInteraction {
                user_id: row.get("user_id"),
                target_user_id: row.get("target_user_id"),
                interaction: row.get("interaction"),
                created_at: row.get("created_at"),
            })
            .collect())
    }

    /// Dashboard counters for one user
    pub async fn get_interaction_stats(
        &self,
        user_id: &str,
    ) -> Result<InteractionStats, PostgresError> {
        let counters = r#"
            SELECT
                COUNT(*) FILTER (WHERE user_id = $1 AND interaction = 'liked') AS likes_sent,
                COUNT(*) FILTER (WHERE target_user_id = $1 AND interaction = 'liked') AS likes_received,
                COUNT(*) FILTER (WHERE user_id = $1 AND interaction = 'passed') AS passed
            FROM match_interactions
            WHERE user_id = $1 OR target_user_id = $1
        "#;

        let row = sqlx::query(counters).bind(user_id).fetch_one(&self.pool).await?;

        let mutual = r#"
            SELECT COUNT(*) AS mutual
            FROM match_interactions a
            JOIN match_interactions b
              ON a.target_user_id = b.user_id
             AND b.target_user_id = a.user_id
            WHERE a.user_id = $1
              AND a.interaction = 'liked'
              AND b.interaction = 'liked'
        "#;

        let mutual_row = sqlx::query(mutual).bind(user_id).fetch_one(&self.pool).await?;

        Ok(InteractionStats {
            user_id: user_id.to_string(),
            likes_sent: row.get("likes_sent"),
            likes_received: row.get("likes_received"),
            mutual_matches: mutual_row.get("mutual"),
            passed: row.get("passed"),
        })
    }

    /// Remove all interactions recorded by a user (profile reset)
    pub async fn clear_interactions(&self, user_id: &str) -> Result<u64, PostgresError> {
        let query = r#"
            DELETE FROM match_interactions
            WHERE user_id = $1
        "#;

        let result = sqlx::query(query).bind(user_id).execute(&self.pool).await?;

        tracing::info!(
            "Cleared {} interactions for user {}",
            result.rows_affected(),
            user_id
        );

        Ok(result.rows_affected())
    }

    /// Lightweight connectivity probe for the health endpoint
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        let row = sqlx::query("SELECT 1 AS alive").fetch_one(&self.pool).await?;
        let alive: i32 = row.get("alive");
        Ok(alive == 1)
    }
}
