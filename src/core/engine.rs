use crate::core::filters::check_deal_breakers;
use crate::core::scoring::{
    round1, score_budget, score_interests, score_lifestyle, score_location, score_personality,
    score_preferences, score_schedule, shared_interests, shared_languages,
};
use crate::models::{
    EngineWeights, ExclusionRecord, Explanation, MatchOutcome, MatchResult, MatchStats, MatchTier,
    Profile, ScoreBreakdown,
};
use std::cmp::Ordering;
use thiserror::Error;

/// Errors raised when constructing an engine. Scoring itself never fails:
/// missing or malformed profile data degrades to neutral scores instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("scoring weights must sum to 100, got {0}")]
    InvalidWeights(u32),
}

/// The compatibility matching engine.
///
/// A pure function of its inputs: no I/O, no interior state, no mutation.
/// One instance can be shared across request handlers freely.
///
/// # Phases
/// 1. Bidirectional deal-breaker filtering (either side can veto the pair)
/// 2. Seven-category weighted scoring
/// 3. Ranking, tiering and explanation ordering
#[derive(Debug, Clone)]
pub struct CompatibilityEngine {
    weights: EngineWeights,
}

struct ScoredPair {
    total: f64,
    breakdown: ScoreBreakdown,
    explanations: Vec<Explanation>,
}

impl CompatibilityEngine {
    /// Build an engine with custom weights. Rejects any weight table that
    /// does not sum to exactly 100; a misconfigured engine must never start.
    pub fn new(weights: EngineWeights) -> Result<Self, EngineError> {
        let total = weights.total();
        if total != 100 {
            return Err(EngineError::InvalidWeights(total));
        }
        Ok(Self { weights })
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: EngineWeights::default(),
        }
    }

    pub fn weights(&self) -> &EngineWeights {
        &self.weights
    }

    /// Rank `candidates` against `seeker`.
    ///
    /// Self-matches are skipped, pairs vetoed by either side's deal-breakers
    /// are excluded before scoring, and survivors scoring below `min_score`
    /// are dropped. Results are sorted by score descending (stable, so ties
    /// keep their input order) and truncated to `limit`; statistics cover the
    /// whole filtered set, not just the returned page.
    pub fn find_matches(
        &self,
        seeker: &Profile,
        candidates: Vec<Profile>,
        limit: usize,
        min_score: f64,
    ) -> MatchOutcome {
        let total_candidates = candidates.len().saturating_sub(1);

        let mut filtered_by_deal_breakers = 0;
        let mut exclusions: Vec<ExclusionRecord> = Vec::new();
        let mut results: Vec<MatchResult> = Vec::new();

        for candidate in candidates {
            if candidate.user_id == seeker.user_id {
                continue;
            }

            if let Some(reason) = check_deal_breakers(seeker, &candidate) {
                filtered_by_deal_breakers += 1;
                exclusions.push(ExclusionRecord {
                    candidate_id: candidate.user_id.clone(),
                    reason,
                });
                continue;
            }

            if let Some(reason) = check_deal_breakers(&candidate, seeker) {
                filtered_by_deal_breakers += 1;
                exclusions.push(ExclusionRecord {
                    candidate_id: candidate.user_id.clone(),
                    reason: format!("Mutual: {}", reason),
                });
                continue;
            }

            let scored = self.score_pair(seeker, &candidate);
            if scored.total < min_score {
                continue;
            }

            results.push(build_match_result(seeker, candidate, scored));
        }

        results.sort_by(|a, b| {
            b.compatibility_score
                .partial_cmp(&a.compatibility_score)
                .unwrap_or(Ordering::Equal)
        });

        let stats = compute_stats(&results);
        results.truncate(limit);

        MatchOutcome {
            matches: results,
            total_candidates,
            filtered_by_deal_breakers,
            stats,
            exclusions,
        }
    }

    /// Compatibility analysis for a single pair. `None` means the pair was
    /// excluded (self-match or a deal-breaker on either side).
    pub fn match_pair(&self, seeker: &Profile, candidate: Profile) -> Option<MatchResult> {
        self.find_matches(seeker, vec![candidate], 1, 0.0)
            .matches
            .into_iter()
            .next()
    }

    fn score_pair(&self, seeker: &Profile, candidate: &Profile) -> ScoredPair {
        let mut explanations: Vec<Explanation> = Vec::new();

        let (budget, exp) = score_budget(seeker, candidate);
        explanations.extend(exp);
        let (lifestyle, exp) = score_lifestyle(seeker, candidate);
        explanations.extend(exp);
        let (personality, exp) = score_personality(seeker, candidate);
        explanations.extend(exp);
        let (schedule, exp) = score_schedule(seeker, candidate);
        explanations.extend(exp);
        let (location, exp) = score_location(seeker, candidate);
        explanations.extend(exp);
        let (preferences, exp) = score_preferences(seeker, candidate);
        explanations.extend(exp);
        let (interests, exp) = score_interests(seeker, candidate);
        explanations.extend(exp);

        let budget = budget.clamp(0.0, 100.0);
        let lifestyle = lifestyle.clamp(0.0, 100.0);
        let personality = personality.clamp(0.0, 100.0);
        let schedule = schedule.clamp(0.0, 100.0);
        let location = location.clamp(0.0, 100.0);
        let preferences = preferences.clamp(0.0, 100.0);
        let interests = interests.clamp(0.0, 100.0);

        let w = &self.weights;
        let total = (budget * w.budget as f64
            + lifestyle * w.lifestyle as f64
            + personality * w.personality as f64
            + schedule * w.schedule as f64
            + location * w.location as f64
            + preferences * w.preferences as f64
            + interests * w.interests as f64)
            / 100.0;
        let total = total.clamp(0.0, 100.0);

        // Positive reasons first, then neutral, then negative; equally
        // impactful reasons order by descending score. Report generation
        // depends on this exact ordering.
        explanations.sort_by(|a, b| {
            a.impact
                .rank()
                .cmp(&b.impact.rank())
                .then_with(|| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal))
        });

        let breakdown = ScoreBreakdown {
            budget_score: round1(budget),
            lifestyle_score: round1(lifestyle),
            personality_score: round1(personality),
            schedule_score: round1(schedule),
            location_score: round1(location),
            preferences_score: round1(preferences),
            interests_score: round1(interests),
            total_score: round1(total),
        };

        ScoredPair {
            total,
            breakdown,
            explanations,
        }
    }
}

impl Default for CompatibilityEngine {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

fn build_match_result(seeker: &Profile, candidate: Profile, scored: ScoredPair) -> MatchResult {
    let shared_interests = shared_interests(seeker, &candidate);
    let shared_languages = shared_languages(seeker, &candidate);
    let match_tier = MatchTier::from_score(scored.total);

    MatchResult {
        user_id: candidate.user_id,
        username: candidate.username,
        firstname: candidate.firstname,
        lastname: candidate.lastname,
        photo: candidate.photo.and_then(|p| p.url),
        age: candidate.age,
        gender: candidate.gender,
        bio: candidate.bio,
        location: candidate.location,
        languages: candidate.languages,
        compatibility_score: round1(scored.total),
        match_tier,
        score_breakdown: scored.breakdown,
        explanations: scored.explanations,
        shared_interests,
        shared_languages,
        compatible: true,
    }
}

/// Aggregate statistics over the full filtered set, before truncation.
fn compute_stats(results: &[MatchResult]) -> MatchStats {
    if results.is_empty() {
        return MatchStats::default();
    }

    let scores: Vec<f64> = results.iter().map(|r| r.compatibility_score).collect();
    let sum: f64 = scores.iter().sum();
    let highest = scores.iter().cloned().fold(f64::MIN, f64::max);
    let lowest = scores.iter().cloned().fold(f64::MAX, f64::min);

    let count_tier = |tier: MatchTier| results.iter().filter(|r| r.match_tier == tier).count();

    MatchStats {
        average_score: round1(sum / scores.len() as f64),
        highest_score: Some(highest),
        lowest_score: Some(lowest),
        perfect_matches: count_tier(MatchTier::Perfect),
        great_matches: count_tier(MatchTier::Great),
        good_matches: count_tier(MatchTier::Good),
    }
}
