use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::core::CompatibilityEngine;
use crate::models::{
    ErrorResponse, FindMatchesRequest, FindMatchesResponse, HealthResponse,
    MatchStatsSummaryResponse, PairResponse, RecordEventRequest, RecordEventResponse,
    ScoreDistribution,
};
use crate::services::{
    AuthError, BackendClient, BackendError, CacheKey, CacheManager, InteractionType,
    PostgresClient, TokenVerifier,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<BackendClient>,
    pub cache: Arc<CacheManager>,
    pub postgres: Arc<PostgresClient>,
    pub engine: CompatibilityEngine,
    pub verifier: TokenVerifier,
    pub max_candidates: usize,
    pub max_limit: u16,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/matches/pair", web::get().to(pair_compatibility))
        .route("/matches/event", web::post().to(record_event))
        .route("/matches/stats", web::get().to(match_stats));
}

fn auth_header(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}

fn auth_error_response(err: AuthError) -> HttpResponse {
    let (status_code, error) = match err {
        AuthError::MissingToken => (401, "missing_token"),
        AuthError::InvalidToken(_) => (401, "invalid_token"),
        AuthError::Forbidden => (403, "forbidden"),
    };
    let body = ErrorResponse {
        error: error.to_string(),
        message: err.to_string(),
        status_code,
    };
    if status_code == 403 {
        HttpResponse::Forbidden().json(body)
    } else {
        HttpResponse::Unauthorized().json(body)
    }
}

fn backend_error_response(err: BackendError, context: &str) -> HttpResponse {
    match err {
        BackendError::NotFound(what) => HttpResponse::NotFound().json(ErrorResponse {
            error: "not_found".to_string(),
            message: format!("{} ({})", context, what),
            status_code: 404,
        }),
        other => {
            tracing::error!("{}: {}", context, other);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "backend_error".to_string(),
                message: context.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "limit": 20,
///   "minScore": 0,
///   "location": "warsaw"
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    if let Err(err) = state.verifier.check(auth_header(&http_req), &req.user_id) {
        return auth_error_response(err);
    }

    let user_id = &req.user_id;
    let limit = req.limit.min(state.max_limit);
    let location = req.location.as_deref();

    tracing::info!(
        "Finding matches for user: {}, limit: {}, min_score: {}",
        user_id,
        limit,
        req.min_score
    );

    let cache_key = CacheKey::matches(user_id, limit, req.min_score, location);
    if let Ok(cached) = state.cache.get::<FindMatchesResponse>(&cache_key).await {
        tracing::debug!("Serving cached matches for {}", user_id);
        return HttpResponse::Ok().json(cached);
    }

    let seeker = match state.backend.get_profile(user_id).await {
        Ok(profile) => profile,
        Err(e) => return backend_error_response(e, "Failed to fetch seeker profile"),
    };

    let candidates = match state
        .backend
        .query_candidates(user_id, location, state.max_candidates)
        .await
    {
        Ok(candidates) => candidates,
        Err(e) => return backend_error_response(e, "Failed to query candidates"),
    };

    tracing::debug!("Scoring {} candidates for {}", candidates.len(), user_id);

    let outcome = state
        .engine
        .find_matches(&seeker, candidates, limit as usize, req.min_score);

    for exclusion in &outcome.exclusions {
        tracing::debug!(
            "Excluded candidate {} for {}: {}",
            exclusion.candidate_id,
            user_id,
            exclusion.reason
        );
    }

    let response = FindMatchesResponse {
        matches: outcome.matches,
        total_candidates: outcome.total_candidates,
        filtered_by_deal_breakers: outcome.filtered_by_deal_breakers,
        stats: outcome.stats,
    };

    if let Err(e) = state.cache.set(&cache_key, &response).await {
        tracing::warn!("Failed to cache matches for {}: {}", user_id, e);
    }

    tracing::info!(
        "Returning {} matches for user {} ({} filtered by deal-breakers)",
        response.matches.len(),
        user_id,
        response.filtered_by_deal_breakers
    );

    HttpResponse::Ok().json(response)
}

#[derive(Debug, Deserialize)]
struct PairQuery {
    #[serde(rename = "userId")]
    user_id: String,
    #[serde(rename = "candidateId")]
    candidate_id: String,
}

/// Single-pair compatibility analysis
///
/// GET /api/v1/matches/pair?userId={userId}&candidateId={candidateId}
async fn pair_compatibility(
    state: web::Data<AppState>,
    query: web::Query<PairQuery>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(err) = state.verifier.check(auth_header(&http_req), &query.user_id) {
        return auth_error_response(err);
    }

    let seeker = match state.backend.get_profile(&query.user_id).await {
        Ok(profile) => profile,
        Err(e) => return backend_error_response(e, "Failed to fetch seeker profile"),
    };

    let candidate = match state.backend.get_profile(&query.candidate_id).await {
        Ok(profile) => profile,
        Err(e) => return backend_error_response(e, "Failed to fetch candidate profile"),
    };

    match state.engine.match_pair(&seeker, candidate) {
        Some(result) => HttpResponse::Ok().json(PairResponse {
            compatible: true,
            reason: None,
            match_result: Some(result),
        }),
        // Deal-breaker details stay server-side; the frontend only needs
        // to know the pair is off the table.
        None => HttpResponse::Ok().json(PairResponse {
            compatible: false,
            reason: Some("Incompatible due to deal-breakers or profile restrictions".to_string()),
            match_result: None,
        }),
    }
}

/// Record match interaction endpoint
///
/// POST /api/v1/matches/event
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "targetUserId": "string",
///   "eventType": "viewed|liked|passed"
/// }
/// ```
async fn record_event(
    state: web::Data<AppState>,
    req: web::Json<RecordEventRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    if let Err(err) = state.verifier.check(auth_header(&http_req), &req.user_id) {
        return auth_error_response(err);
    }

    let interaction = match InteractionType::parse(&req.event_type) {
        Some(interaction) => interaction,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid event type".to_string(),
                message: "Event type must be one of: viewed, liked, passed".to_string(),
                status_code: 400,
            });
        }
    };

    if let Err(e) = state
        .postgres
        .record_interaction(&req.user_id, &req.target_user_id, interaction)
        .await
    {
        tracing::error!("Failed to record interaction: {}", e);
        return HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Failed to record event".to_string(),
            message: e.to_string(),
            status_code: 500,
        });
    }

    // A like can complete a mutual match; anything else cannot.
    let mutual_match = if interaction == InteractionType::Liked {
        state
            .postgres
            .is_mutual_like(&req.user_id, &req.target_user_id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Mutual-like check failed: {}", e);
                false
            })
    } else {
        false
    };

    if let Err(e) = state.cache.invalidate_user(&req.user_id).await {
        tracing::warn!("Failed to invalidate cache for {}: {}", req.user_id, e);
    }

    tracing::debug!(
        "Recorded event: {} -> {} ({:?}), mutual: {}",
        req.user_id,
        req.target_user_id,
        interaction,
        mutual_match
    );

    HttpResponse::Ok().json(RecordEventResponse {
        success: true,
        event_id: uuid::Uuid::new_v4().to_string(),
        mutual_match,
    })
}

#[derive(Debug, Deserialize)]
struct StatsQuery {
    #[serde(rename = "userId")]
    user_id: String,
}

/// Matching statistics summary
///
/// GET /api/v1/matches/stats?userId={userId}
///
/// Runs a full (unlimited) matching pass and returns the score distribution
/// without the match payloads; the dashboard polls this.
async fn match_stats(
    state: web::Data<AppState>,
    query: web::Query<StatsQuery>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(err) = state.verifier.check(auth_header(&http_req), &query.user_id) {
        return auth_error_response(err);
    }

    let seeker = match state.backend.get_profile(&query.user_id).await {
        Ok(profile) => profile,
        Err(e) => return backend_error_response(e, "Failed to fetch seeker profile"),
    };

    let candidates = match state
        .backend
        .query_candidates(&query.user_id, None, state.max_candidates)
        .await
    {
        Ok(candidates) => candidates,
        Err(e) => return backend_error_response(e, "Failed to query candidates"),
    };

    let total_potential_matches = candidates.len();
    let outcome = state
        .engine
        .find_matches(&seeker, candidates, state.max_candidates, 0.0);

    let high = outcome
        .matches
        .iter()
        .filter(|m| m.compatibility_score >= 80.0)
        .count();
    let medium = outcome
        .matches
        .iter()
        .filter(|m| m.compatibility_score >= 50.0 && m.compatibility_score < 80.0)
        .count();
    let low = outcome
        .matches
        .iter()
        .filter(|m| m.compatibility_score < 50.0)
        .count();

    HttpResponse::Ok().json(MatchStatsSummaryResponse {
        total_potential_matches,
        filtered_by_deal_breakers: outcome.filtered_by_deal_breakers,
        compatible_matches: outcome.matches.len(),
        score_distribution: ScoreDistribution { high, medium, low },
        top_match_score: outcome.matches.first().map(|m| m.compatibility_score),
    })
}
