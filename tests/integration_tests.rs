// Integration tests for the Pokojowo compatibility engine

use pokojowo_algo::models::{Impact, MatchTier, Profile};
use pokojowo_algo::CompatibilityEngine;

fn profile_from_json(value: serde_json::Value) -> Profile {
    serde_json::from_value(value).expect("test profile should deserialize")
}

/// Seeker used by several scenarios: 28 years old, 1500-3000 PLN, clean,
/// hard lines on smoking, parties and quiet hours.
fn demanding_seeker() -> Profile {
    profile_from_json(serde_json::json!({
        "userId": "seeker",
        "username": "kasia",
        "age": 28,
        "tenantProfile": {
            "flatmateTraits": {"cleanliness": "clean"},
            "preferences": {
                "budget": {"currency": "PLN", "min": 1500, "max": 3000}
            },
            "dealBreakers": {
                "noSmokers": true,
                "noParties": true,
                "quietHoursRequired": true
            }
        }
    }))
}

/// Candidate compatible with `demanding_seeker`: 26, 1200-2500 PLN,
/// very clean, non-smoking, quiet early bird.
fn tidy_candidate(id: &str) -> Profile {
    profile_from_json(serde_json::json!({
        "userId": id,
        "username": format!("user_{}", id),
        "age": 26,
        "tenantProfile": {
            "personality": ["quiet", "early_bird"],
            "flatmateTraits": {"cleanliness": "very_clean"},
            "preferences": {
                "budget": {"currency": "PLN", "min": 1200, "max": 2500}
            }
        }
    }))
}

fn smoker_candidate(id: &str) -> Profile {
    profile_from_json(serde_json::json!({
        "userId": id,
        "username": format!("user_{}", id),
        "age": 27,
        "tenantProfile": {
            "preferences": {
                "budget": {"currency": "PLN", "min": 1500, "max": 3000},
                "lifestylePreferences": {"smokes": true}
            }
        }
    }))
}

fn budget_candidate(id: &str, min: f64, max: f64) -> Profile {
    profile_from_json(serde_json::json!({
        "userId": id,
        "username": format!("user_{}", id),
        "age": 26,
        "tenantProfile": {
            "preferences": {"budget": {"currency": "PLN", "min": min, "max": max}}
        }
    }))
}

#[test]
fn test_full_scenario_lands_in_great_tier_with_positive_reasons() {
    let engine = CompatibilityEngine::with_default_weights();
    let seeker = demanding_seeker();

    let outcome = engine.find_matches(&seeker, vec![tidy_candidate("c1")], 10, 0.0);

    assert_eq!(outcome.filtered_by_deal_breakers, 0);
    assert_eq!(outcome.matches.len(), 1);

    let result = &outcome.matches[0];
    assert!(
        result.compatibility_score >= 70.0,
        "expected >= 70, got {}",
        result.compatibility_score
    );
    assert!(matches!(
        result.match_tier,
        MatchTier::Great | MatchTier::Perfect
    ));

    let has_positive_budget = result.explanations.iter().any(|e| {
        e.impact == Impact::Positive && e.reason.to_lowercase().contains("budget")
    });
    let has_positive_cleanliness = result.explanations.iter().any(|e| {
        e.impact == Impact::Positive && e.reason.to_lowercase().contains("cleanliness")
    });

    assert!(has_positive_budget, "explanations: {:?}", result.explanations);
    assert!(has_positive_cleanliness, "explanations: {:?}", result.explanations);
}

#[test]
fn test_smoking_deal_breaker_filters_and_counts() {
    let engine = CompatibilityEngine::with_default_weights();
    let seeker = demanding_seeker();

    let outcome = engine.find_matches(
        &seeker,
        vec![smoker_candidate("smoker"), tidy_candidate("tidy")],
        10,
        0.0,
    );

    assert_eq!(outcome.filtered_by_deal_breakers, 1);
    assert_eq!(outcome.matches.len(), 1);
    assert_eq!(outcome.matches[0].user_id, "tidy");
}

#[test]
fn test_exclusion_is_bidirectional() {
    let engine = CompatibilityEngine::with_default_weights();
    let picky = demanding_seeker();
    let smoker = smoker_candidate("smoker");

    // Picky as seeker: her deal-breaker rejects the smoker.
    let outcome = engine.find_matches(&picky, vec![smoker.clone()], 10, 0.0);
    assert!(outcome.matches.is_empty());
    assert_eq!(outcome.filtered_by_deal_breakers, 1);

    // Smoker as seeker: the pair is still excluded, now by the candidate side.
    let outcome = engine.find_matches(&smoker, vec![picky], 10, 0.0);
    assert!(outcome.matches.is_empty());
    assert_eq!(outcome.filtered_by_deal_breakers, 1);
}

#[test]
fn test_scores_are_seeker_relative_but_inclusion_is_symmetric() {
    let engine = CompatibilityEngine::with_default_weights();

    // Only one side states an age preference, so the preference category
    // scores differently depending on who is the seeker.
    let with_age_pref = profile_from_json(serde_json::json!({
        "userId": "a",
        "username": "a",
        "age": 30,
        "tenantProfile": {
            "preferences": {
                "ageRange": [25, 28],
                "budget": {"currency": "PLN", "min": 1500, "max": 3000}
            }
        }
    }));
    // 35 is outside a's preferred range; a's own age draws no penalty from b.
    let without_age_pref = profile_from_json(serde_json::json!({
        "userId": "b",
        "username": "b",
        "age": 35,
        "tenantProfile": {
            "preferences": {"budget": {"currency": "PLN", "min": 1500, "max": 3000}}
        }
    }));

    let forward = engine.find_matches(&with_age_pref, vec![without_age_pref.clone()], 10, 0.0);
    let backward = engine.find_matches(&without_age_pref, vec![with_age_pref], 10, 0.0);

    assert_eq!(forward.matches.len(), 1);
    assert_eq!(backward.matches.len(), 1);
    assert_ne!(
        forward.matches[0].score_breakdown.preferences_score,
        backward.matches[0].score_breakdown.preferences_score
    );
}

#[test]
fn test_determinism_byte_identical_output() {
    let engine = CompatibilityEngine::with_default_weights();
    let seeker = demanding_seeker();
    let candidates = vec![
        tidy_candidate("c1"),
        budget_candidate("c2", 1400.0, 2800.0),
        budget_candidate("c3", 2000.0, 3500.0),
        smoker_candidate("c4"),
    ];

    let first = engine.find_matches(&seeker, candidates.clone(), 10, 0.0);
    let second = engine.find_matches(&seeker, candidates, 10, 0.0);

    let first_json = serde_json::to_string(&first).unwrap();
    let second_json = serde_json::to_string(&second).unwrap();
    assert_eq!(first_json, second_json);
}

#[test]
fn test_self_is_never_matched() {
    let engine = CompatibilityEngine::with_default_weights();
    let seeker = demanding_seeker();

    let outcome = engine.find_matches(
        &seeker,
        vec![demanding_seeker(), tidy_candidate("c1")],
        10,
        0.0,
    );

    assert_eq!(outcome.total_candidates, 1);
    assert!(outcome.matches.iter().all(|m| m.user_id != "seeker"));
}

#[test]
fn test_limit_returns_single_best_match() {
    let engine = CompatibilityEngine::with_default_weights();
    let seeker = budget_candidate("seeker", 1500.0, 3000.0);

    let mut candidates = Vec::new();
    for i in 0..10 {
        // Increasingly misaligned budgets; c0 matches the seeker exactly.
        let shift = i as f64 * 300.0;
        candidates.push(budget_candidate(
            &format!("c{}", i),
            1500.0 + shift,
            3000.0 + shift,
        ));
    }

    let outcome = engine.find_matches(&seeker, candidates, 1, 0.0);

    assert_eq!(outcome.matches.len(), 1);
    assert_eq!(outcome.matches[0].user_id, "c0");
}

#[test]
fn test_impossible_min_score_yields_empty_but_counted_result() {
    let engine = CompatibilityEngine::with_default_weights();
    let seeker = budget_candidate("seeker", 1500.0, 3000.0);
    let candidates: Vec<Profile> = (0..10)
        .map(|i| budget_candidate(&format!("c{}", i), 1500.0, 3000.0))
        .collect();

    let outcome = engine.find_matches(&seeker, candidates, 20, 101.0);

    assert!(outcome.matches.is_empty());
    assert_eq!(outcome.total_candidates, 9);
    assert_eq!(outcome.filtered_by_deal_breakers, 0);
}

#[test]
fn test_stats_cover_pretruncation_set() {
    let engine = CompatibilityEngine::with_default_weights();
    let seeker = budget_candidate("seeker", 1500.0, 3000.0);

    let candidates = vec![
        budget_candidate("best", 1500.0, 3000.0),
        budget_candidate("worse", 3500.0, 5000.0),
        budget_candidate("worst", 6000.0, 9000.0),
    ];

    let outcome = engine.find_matches(&seeker, candidates, 1, 0.0);

    assert_eq!(outcome.matches.len(), 1);
    let top = outcome.matches[0].compatibility_score;
    assert_eq!(outcome.stats.highest_score, Some(top));
    // The lowest score belongs to a truncated-away candidate.
    assert!(outcome.stats.lowest_score.unwrap() < top);
}

#[test]
fn test_ties_keep_candidate_input_order() {
    let engine = CompatibilityEngine::with_default_weights();
    let seeker = budget_candidate("seeker", 1500.0, 3000.0);

    // Identical candidates score identically; the sort is stable.
    let candidates = vec![
        budget_candidate("first", 1500.0, 3000.0),
        budget_candidate("second", 1500.0, 3000.0),
        budget_candidate("third", 1500.0, 3000.0),
    ];

    let outcome = engine.find_matches(&seeker, candidates, 10, 0.0);

    let order: Vec<&str> = outcome.matches.iter().map(|m| m.user_id.as_str()).collect();
    assert_eq!(order, vec!["first", "second", "third"]);
}

#[test]
fn test_explanations_ordered_by_impact_then_score() {
    let engine = CompatibilityEngine::with_default_weights();

    let seeker = profile_from_json(serde_json::json!({
        "userId": "a",
        "username": "a",
        "age": 30,
        "languages": ["polish", "english"],
        "tenantProfile": {
            "interests": ["cooking", "hiking", "games", "movies"],
            "personality": ["early_bird", "neat"],
            "dailyRoutine": {"wakeUp": "06:30", "sleepTime": "22:30"},
            "flatmateTraits": {"cleanliness": "clean", "socialLevel": "moderate"},
            "preferences": {
                "budget": {"currency": "PLN", "min": 1500, "max": 3000},
                "leaseDurationMonths": 12
            }
        }
    }));
    let candidate = profile_from_json(serde_json::json!({
        "userId": "b",
        "username": "b",
        "age": 29,
        "languages": ["polish", "german"],
        "tenantProfile": {
            "interests": ["cooking", "hiking", "running"],
            "personality": ["night_owl", "messy"],
            "dailyRoutine": {"wakeUp": "11:00", "sleepTime": "03:00"},
            "flatmateTraits": {"cleanliness": "relaxed", "socialLevel": "social"},
            "preferences": {
                "budget": {"currency": "PLN", "min": 1600, "max": 2900},
                "leaseDurationMonths": 12
            }
        }
    }));

    let outcome = engine.find_matches(&seeker, vec![candidate], 10, 0.0);
    let explanations = &outcome.matches[0].explanations;

    assert!(explanations.len() >= 4, "expected a rich explanation list");

    for pair in explanations.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.impact.rank() <= b.impact.rank(),
            "impact order violated: {:?} before {:?}",
            a,
            b
        );
        if a.impact == b.impact {
            assert!(
                a.score >= b.score,
                "score order violated within impact: {:?} before {:?}",
                a,
                b
            );
        }
    }
}

#[test]
fn test_perfect_budget_scenario() {
    let engine = CompatibilityEngine::with_default_weights();
    let seeker = budget_candidate("seeker", 1500.0, 3000.0);
    let candidate = budget_candidate("other", 1500.0, 3000.0);

    let outcome = engine.find_matches(&seeker, vec![candidate], 10, 0.0);
    assert!(outcome.matches[0].score_breakdown.budget_score >= 95.0);
}

#[test]
fn test_tier_boundaries() {
    assert_eq!(MatchTier::from_score(85.0), MatchTier::Perfect);
    assert_eq!(MatchTier::from_score(84.9), MatchTier::Great);
    assert_eq!(MatchTier::from_score(70.0), MatchTier::Great);
    assert_eq!(MatchTier::from_score(69.9), MatchTier::Good);
    assert_eq!(MatchTier::from_score(55.0), MatchTier::Good);
    assert_eq!(MatchTier::from_score(54.9), MatchTier::Fair);
    assert_eq!(MatchTier::from_score(40.0), MatchTier::Fair);
    assert_eq!(MatchTier::from_score(39.9), MatchTier::Poor);
}

#[test]
fn test_shared_interests_and_languages_are_reported() {
    let engine = CompatibilityEngine::with_default_weights();

    let seeker = profile_from_json(serde_json::json!({
        "userId": "a", "username": "a",
        "languages": ["Polish", "English"],
        "tenantProfile": {"interests": ["Cooking", "Hiking"]}
    }));
    let candidate = profile_from_json(serde_json::json!({
        "userId": "b", "username": "b",
        "languages": ["english"],
        "tenantProfile": {"interests": ["cooking", "surfing"]}
    }));

    let outcome = engine.find_matches(&seeker, vec![candidate], 10, 0.0);
    let result = &outcome.matches[0];

    assert_eq!(result.shared_interests, vec!["cooking"]);
    assert_eq!(result.shared_languages, vec!["english"]);
}
