use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to find matches for a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: u16,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(alias = "min_score", rename = "minScore", default)]
    pub min_score: f64,
    /// Optional partial-match location filter applied when querying candidates.
    #[serde(default)]
    pub location: Option<String>,
}

fn default_limit() -> u16 {
    20
}

/// Request to record a match interaction event
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordEventRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "target_user_id", rename = "targetUserId")]
    pub target_user_id: String,
    #[serde(alias = "event_type", rename = "eventType")]
    pub event_type: String,
}
