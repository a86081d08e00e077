use crate::models::domain::{MatchResult, MatchStats};
use serde::{Deserialize, Serialize};

/// Response for the find-matches endpoint. Mirrors the engine outcome plus
/// the filtering counters the dashboard renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub matches: Vec<MatchResult>,
    pub total_candidates: usize,
    pub filtered_by_deal_breakers: usize,
    pub stats: MatchStats,
}

/// Response for a single-pair compatibility check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairResponse {
    pub compatible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_result: Option<MatchResult>,
}

/// Score distribution buckets used by the stats summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreDistribution {
    /// 80-100
    pub high: usize,
    /// 50-79
    pub medium: usize,
    /// 0-49
    pub low: usize,
}

/// Response for the matching stats summary endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchStatsSummaryResponse {
    pub total_potential_matches: usize,
    pub filtered_by_deal_breakers: usize,
    pub compatible_matches: usize,
    pub score_distribution: ScoreDistribution,
    pub top_match_score: Option<f64>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Record event response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordEventResponse {
    pub success: bool,
    pub event_id: String,
    /// True when a `liked` event completed a mutual like.
    pub mutual_match: bool,
}
