use crate::core::distance::{ordinal_score, range_overlap_ratio, time_diff_hours};
use crate::core::regions::same_region;
use crate::models::{
    CookingFrequency, Explanation, Impact, Personality, Profile, ScoreCategory,
};
use std::collections::BTreeSet;

/// Round to one decimal, the precision used everywhere in match output.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Weighted average over the sub-factors that produced a value, or the
/// category's neutral fallback when none did.
fn weighted_average(parts: &[(f64, f64)], fallback: f64) -> f64 {
    let total_weight: f64 = parts.iter().map(|(_, weight)| weight).sum();
    if total_weight <= 0.0 {
        return fallback;
    }
    parts.iter().map(|(score, weight)| score * weight).sum::<f64>() / total_weight
}

fn fmt_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Case-insensitive intersection of two tag lists, sorted for deterministic
/// output.
fn shared_lowercased(a: &[String], b: &[String]) -> Vec<String> {
    let set_a: BTreeSet<String> = a.iter().map(|s| s.to_lowercase()).collect();
    let set_b: BTreeSet<String> = b.iter().map(|s| s.to_lowercase()).collect();
    set_a.intersection(&set_b).cloned().collect()
}

pub fn shared_interests(seeker: &Profile, candidate: &Profile) -> Vec<String> {
    shared_lowercased(seeker.interests(), candidate.interests())
}

pub fn shared_languages(seeker: &Profile, candidate: &Profile) -> Vec<String> {
    shared_lowercased(&seeker.languages, &candidate.languages)
}

/// Budget compatibility (0-100): range overlap (70%) blended with how close
/// the two budget midpoints sit (30%). Mismatched currencies short-circuit.
pub fn score_budget(seeker: &Profile, candidate: &Profile) -> (f64, Vec<Explanation>) {
    let (seeker_budget, candidate_budget) = match (seeker.budget(), candidate.budget()) {
        (Some(s), Some(c)) => (s, c),
        _ => {
            return (
                50.0,
                vec![Explanation::new(
                    ScoreCategory::Budget,
                    "Budget information incomplete - cannot fully assess",
                    Impact::Neutral,
                    50.0,
                )],
            )
        }
    };

    if seeker_budget.currency != candidate_budget.currency {
        return (
            30.0,
            vec![Explanation::new(
                ScoreCategory::Budget,
                format!(
                    "Different currencies ({} vs {})",
                    seeker_budget.currency, candidate_budget.currency
                ),
                Impact::Negative,
                30.0,
            )],
        );
    }

    let overlap = range_overlap_ratio(
        seeker_budget.min_value(),
        seeker_budget.max_value(),
        candidate_budget.min_value(),
        candidate_budget.max_value(),
    );

    let max_budget = seeker_budget.max_value().max(candidate_budget.max_value());
    let midpoint_diff = if max_budget > 0.0 {
        (seeker_budget.midpoint() - candidate_budget.midpoint()).abs() / max_budget
    } else {
        0.0
    };
    let midpoint_score = (100.0 * (1.0 - midpoint_diff * 2.0)).max(0.0);

    let score = overlap * 70.0 + midpoint_score * 0.3;

    let currency = &seeker_budget.currency;
    let explanation = if score >= 85.0 {
        Explanation::new(
            ScoreCategory::Budget,
            format!(
                "Excellent budget match ({}-{} {} overlaps well)",
                fmt_amount(seeker_budget.min_value()),
                fmt_amount(seeker_budget.max_value()),
                currency
            ),
            Impact::Positive,
            round1(score),
        )
    } else if score >= 70.0 {
        Explanation::new(
            ScoreCategory::Budget,
            "Strong budget overlap - similar price expectations",
            Impact::Positive,
            round1(score),
        )
    } else if score >= 60.0 {
        Explanation::new(
            ScoreCategory::Budget,
            "Good budget overlap with some flexibility needed",
            Impact::Neutral,
            round1(score),
        )
    } else if score >= 40.0 {
        Explanation::new(
            ScoreCategory::Budget,
            "Limited budget overlap - may need to negotiate",
            Impact::Neutral,
            round1(score),
        )
    } else {
        Explanation::new(
            ScoreCategory::Budget,
            format!(
                "Significant budget mismatch (your {}-{} vs their {}-{} {})",
                fmt_amount(seeker_budget.min_value()),
                fmt_amount(seeker_budget.max_value()),
                fmt_amount(candidate_budget.min_value()),
                fmt_amount(candidate_budget.max_value()),
                currency
            ),
            Impact::Negative,
            round1(score),
        )
    };

    (score, vec![explanation])
}

fn smoking_compatibility(seeker: &Profile, candidate: &Profile) -> f64 {
    match (seeker.smokes(), candidate.smokes()) {
        (false, false) => 100.0,
        (true, true) => 95.0,
        (false, true) => {
            if seeker.ok_with_smoking() {
                70.0
            } else {
                15.0
            }
        }
        (true, false) => {
            if candidate.ok_with_smoking() {
                70.0
            } else {
                15.0
            }
        }
    }
}

fn pets_compatibility(seeker: &Profile, candidate: &Profile) -> f64 {
    match (seeker.has_pets(), candidate.has_pets()) {
        (false, false) => 100.0,
        (true, true) => 90.0,
        (true, false) => {
            if candidate.ok_with_pets() {
                85.0
            } else {
                20.0
            }
        }
        (false, true) => {
            if seeker.ok_with_pets() {
                85.0
            } else {
                20.0
            }
        }
    }
}

/// Lifestyle compatibility (0-100): smoking and pets always contribute via
/// their compatibility tables; the ordinal traits only enter the average when
/// at least one side has answered them.
pub fn score_lifestyle(seeker: &Profile, candidate: &Profile) -> (f64, Vec<Explanation>) {
    let mut parts: Vec<(f64, f64)> = Vec::new();
    let mut explanations = Vec::new();

    let seeker_traits = seeker.flatmate_traits();
    let candidate_traits = candidate.flatmate_traits();

    // Smoking
    let smoking = smoking_compatibility(seeker, candidate);
    parts.push((smoking, 20.0));
    if smoking < 50.0 {
        explanations.push(Explanation::new(
            ScoreCategory::Lifestyle,
            "Smoking preference conflict",
            Impact::Negative,
            smoking,
        ));
    } else if smoking >= 90.0 && !seeker.smokes() && !candidate.smokes() {
        explanations.push(Explanation::new(
            ScoreCategory::Lifestyle,
            "Both non-smokers - clean air environment",
            Impact::Positive,
            smoking,
        ));
    }

    // Pets
    let pets = pets_compatibility(seeker, candidate);
    parts.push((pets, 15.0));
    if pets < 50.0 {
        explanations.push(Explanation::new(
            ScoreCategory::Lifestyle,
            "Pet preference mismatch - needs discussion",
            Impact::Negative,
            pets,
        ));
    } else if candidate.has_pets() && seeker.ok_with_pets() {
        explanations.push(Explanation::new(
            ScoreCategory::Lifestyle,
            "You're open to pets - candidate has pets",
            Impact::Positive,
            pets,
        ));
    }

    // Cleanliness
    let seeker_clean = seeker_traits.and_then(|t| t.cleanliness);
    let candidate_clean = candidate_traits.and_then(|t| t.cleanliness);
    if seeker_clean.is_some() || candidate_clean.is_some() {
        let score = ordinal_score(seeker_clean, candidate_clean);
        parts.push((score, 25.0));
        if score >= 80.0 {
            let level = candidate_clean.map(|c| c.as_str()).unwrap_or("moderate");
            explanations.push(Explanation::new(
                ScoreCategory::Lifestyle,
                format!("Similar cleanliness standards ({})", level),
                Impact::Positive,
                score,
            ));
        } else if score < 50.0 {
            explanations.push(Explanation::new(
                ScoreCategory::Lifestyle,
                "Different cleanliness expectations - potential friction",
                Impact::Negative,
                score,
            ));
        }
    }

    // Social level
    let seeker_social = seeker_traits.and_then(|t| t.social_level);
    let candidate_social = candidate_traits.and_then(|t| t.social_level);
    if seeker_social.is_some() || candidate_social.is_some() {
        let score = ordinal_score(seeker_social, candidate_social);
        parts.push((score, 15.0));
        if score >= 80.0 && seeker_social.is_some() {
            explanations.push(Explanation::new(
                ScoreCategory::Lifestyle,
                "Compatible social levels",
                Impact::Positive,
                score,
            ));
        }
    }

    // Guests frequency
    let seeker_guests = seeker_traits.and_then(|t| t.guests_frequency);
    let candidate_guests = candidate_traits.and_then(|t| t.guests_frequency);
    if seeker_guests.is_some() || candidate_guests.is_some() {
        let score = ordinal_score(seeker_guests, candidate_guests);
        parts.push((score, 10.0));
        if score < 50.0 {
            explanations.push(Explanation::new(
                ScoreCategory::Lifestyle,
                "Different guest frequency preferences",
                Impact::Negative,
                score,
            ));
        }
    }

    // Noise tolerance
    let seeker_noise = seeker_traits.and_then(|t| t.noise_tolerance);
    let candidate_noise = candidate_traits.and_then(|t| t.noise_tolerance);
    if seeker_noise.is_some() || candidate_noise.is_some() {
        let score = ordinal_score(seeker_noise, candidate_noise);
        parts.push((score, 10.0));
        if score < 40.0 {
            explanations.push(Explanation::new(
                ScoreCategory::Lifestyle,
                "Very different noise tolerance - may cause conflicts",
                Impact::Negative,
                score,
            ));
        }
    }

    // Cooking frequency
    let seeker_cooking = seeker_traits.and_then(|t| t.cooking_frequency);
    let candidate_cooking = candidate_traits.and_then(|t| t.cooking_frequency);
    if seeker_cooking.is_some() || candidate_cooking.is_some() {
        let score = ordinal_score(seeker_cooking, candidate_cooking);
        parts.push((score, 5.0));
        if score >= 80.0
            && matches!(
                seeker_cooking,
                Some(CookingFrequency::Daily) | Some(CookingFrequency::Often)
            )
        {
            explanations.push(Explanation::new(
                ScoreCategory::Lifestyle,
                "Both enjoy cooking - can share kitchen time",
                Impact::Positive,
                score,
            ));
        }
    }

    (weighted_average(&parts, 50.0), explanations)
}

/// Personality alignment (0-100) over four independent tag axes. An axis only
/// counts when at least one side carries a tag on it; axis weights are
/// renormalized over the axes actually present.
pub fn score_personality(seeker: &Profile, candidate: &Profile) -> (f64, Vec<Explanation>) {
    let seeker_tags = seeker.personality();
    let candidate_tags = candidate.personality();

    if seeker_tags.is_empty() && candidate_tags.is_empty() {
        return (
            60.0,
            vec![Explanation::new(
                ScoreCategory::Personality,
                "Personality traits not specified",
                Impact::Neutral,
                60.0,
            )],
        );
    }

    let mut parts: Vec<(f64, f64)> = Vec::new();
    let mut explanations = Vec::new();

    let seeker_has = |tag| seeker_tags.contains(&tag);
    let candidate_has = |tag| candidate_tags.contains(&tag);

    // Introvert / extrovert
    let s_intro = seeker_has(Personality::Introvert);
    let s_extro = seeker_has(Personality::Extrovert);
    let c_intro = candidate_has(Personality::Introvert);
    let c_extro = candidate_has(Personality::Extrovert);
    if s_intro || s_extro || c_intro || c_extro {
        let score = if s_intro && c_intro {
            explanations.push(Explanation::new(
                ScoreCategory::Personality,
                "Both introverts - will respect each other's space",
                Impact::Positive,
                95.0,
            ));
            95.0
        } else if s_extro && c_extro {
            explanations.push(Explanation::new(
                ScoreCategory::Personality,
                "Both extroverts - great for socializing together",
                Impact::Positive,
                90.0,
            ));
            90.0
        } else if (s_intro && c_extro) || (s_extro && c_intro) {
            explanations.push(Explanation::new(
                ScoreCategory::Personality,
                "Introvert-extrovert mix may require adjustment",
                Impact::Neutral,
                55.0,
            ));
            55.0
        } else {
            70.0
        };
        parts.push((score, 30.0));
    }

    // Early bird / night owl
    let s_early = seeker_has(Personality::EarlyBird);
    let s_night = seeker_has(Personality::NightOwl);
    let c_early = candidate_has(Personality::EarlyBird);
    let c_night = candidate_has(Personality::NightOwl);
    if s_early || s_night || c_early || c_night {
        let score = if s_early && c_early {
            explanations.push(Explanation::new(
                ScoreCategory::Personality,
                "Both early birds - synchronized morning routines",
                Impact::Positive,
                100.0,
            ));
            100.0
        } else if s_night && c_night {
            explanations.push(Explanation::new(
                ScoreCategory::Personality,
                "Both night owls - late night compatibility",
                Impact::Positive,
                100.0,
            ));
            100.0
        } else if (s_early && c_night) || (s_night && c_early) {
            explanations.push(Explanation::new(
                ScoreCategory::Personality,
                "Opposite sleep schedules - potential noise conflicts",
                Impact::Negative,
                35.0,
            ));
            35.0
        } else {
            70.0
        };
        parts.push((score, 35.0));
    }

    // Neat / messy
    let s_neat = seeker_has(Personality::Neat);
    let s_messy = seeker_has(Personality::Messy);
    let c_neat = candidate_has(Personality::Neat);
    let c_messy = candidate_has(Personality::Messy);
    if s_neat || s_messy || c_neat || c_messy {
        let score = if s_neat && c_neat {
            explanations.push(Explanation::new(
                ScoreCategory::Personality,
                "Both value tidiness - clean shared spaces",
                Impact::Positive,
                100.0,
            ));
            100.0
        } else if s_messy && c_messy {
            85.0
        } else if (s_neat && c_messy) || (s_messy && c_neat) {
            explanations.push(Explanation::new(
                ScoreCategory::Personality,
                "Different tidiness standards - may cause tension",
                Impact::Negative,
                40.0,
            ));
            40.0
        } else {
            70.0
        };
        parts.push((score, 25.0));
    }

    // Quiet / talkative
    let s_quiet = seeker_has(Personality::Quiet);
    let s_talk = seeker_has(Personality::Talkative);
    let c_quiet = candidate_has(Personality::Quiet);
    let c_talk = candidate_has(Personality::Talkative);
    if s_quiet || s_talk || c_quiet || c_talk {
        let score = if s_quiet && c_quiet {
            90.0
        } else if s_talk && c_talk {
            85.0
        } else if s_quiet && c_talk {
            explanations.push(Explanation::new(
                ScoreCategory::Personality,
                "Quiet-talkative mix - balance your communication styles",
                Impact::Neutral,
                50.0,
            ));
            50.0
        } else if s_talk && c_quiet {
            50.0
        } else {
            70.0
        };
        parts.push((score, 10.0));
    }

    (weighted_average(&parts, 60.0), explanations)
}

fn wake_time_score(diff_hours: f64) -> f64 {
    if diff_hours <= 0.5 {
        100.0
    } else if diff_hours <= 1.0 {
        90.0
    } else if diff_hours <= 1.5 {
        80.0
    } else if diff_hours <= 2.0 {
        65.0
    } else if diff_hours <= 3.0 {
        50.0
    } else {
        30.0
    }
}

fn sleep_time_score(diff_hours: f64) -> f64 {
    if diff_hours <= 0.5 {
        100.0
    } else if diff_hours <= 1.0 {
        90.0
    } else if diff_hours <= 1.5 {
        75.0
    } else if diff_hours <= 2.0 {
        60.0
    } else if diff_hours <= 3.0 {
        45.0
    } else {
        25.0
    }
}

/// Schedule compatibility (0-100) from wake-up and sleep alignment plus work
/// start times, where staggered starts beat identical ones: fewer collisions
/// over the bathroom and the kitchen.
pub fn score_schedule(seeker: &Profile, candidate: &Profile) -> (f64, Vec<Explanation>) {
    let seeker_routine = seeker.daily_routine();
    let candidate_routine = candidate.daily_routine();

    if seeker_routine.is_none() && candidate_routine.is_none() {
        return (
            65.0,
            vec![Explanation::new(
                ScoreCategory::Schedule,
                "Schedule information not available",
                Impact::Neutral,
                65.0,
            )],
        );
    }

    let mut parts: Vec<(f64, f64)> = Vec::new();
    let mut explanations = Vec::new();

    // Wake-up times
    let seeker_wake = seeker_routine.and_then(|r| r.wake_up.as_deref());
    let candidate_wake = candidate_routine.and_then(|r| r.wake_up.as_deref());
    if let (Some(a), Some(b)) = (seeker_wake, candidate_wake) {
        if let Some(diff) = time_diff_hours(a, b) {
            let score = wake_time_score(diff);
            if diff <= 0.5 {
                explanations.push(Explanation::new(
                    ScoreCategory::Schedule,
                    format!("Wake up times nearly identical ({})", a),
                    Impact::Positive,
                    score,
                ));
            } else if diff > 3.0 {
                explanations.push(Explanation::new(
                    ScoreCategory::Schedule,
                    format!("Very different wake times ({} vs {})", a, b),
                    Impact::Negative,
                    score,
                ));
            }
            parts.push((score, 40.0));
        }
    }

    // Sleep times
    let seeker_sleep = seeker_routine.and_then(|r| r.sleep_time.as_deref());
    let candidate_sleep = candidate_routine.and_then(|r| r.sleep_time.as_deref());
    if let (Some(a), Some(b)) = (seeker_sleep, candidate_sleep) {
        if let Some(diff) = time_diff_hours(a, b) {
            let score = sleep_time_score(diff);
            if diff <= 0.5 {
                explanations.push(Explanation::new(
                    ScoreCategory::Schedule,
                    "Sleep times align perfectly",
                    Impact::Positive,
                    score,
                ));
            } else if diff > 3.0 {
                explanations.push(Explanation::new(
                    ScoreCategory::Schedule,
                    "Very different sleep times - noise consideration needed",
                    Impact::Negative,
                    score,
                ));
            }
            parts.push((score, 40.0));
        }
    }

    // Work start times
    let seeker_work = seeker_routine
        .and_then(|r| r.work_hours.as_ref())
        .and_then(|w| w.from.as_deref());
    let candidate_work = candidate_routine
        .and_then(|r| r.work_hours.as_ref())
        .and_then(|w| w.from.as_deref());
    if let (Some(a), Some(b)) = (seeker_work, candidate_work) {
        if let Some(diff) = time_diff_hours(a, b) {
            let score = if diff <= 1.0 {
                70.0
            } else if diff >= 2.0 {
                explanations.push(Explanation::new(
                    ScoreCategory::Schedule,
                    "Staggered work times - less morning rush",
                    Impact::Positive,
                    90.0,
                ));
                90.0
            } else {
                80.0
            };
            parts.push((score, 20.0));
        }
    }

    (weighted_average(&parts, 65.0), explanations)
}

/// Location compatibility (0-100). Compares the seeker's preferred location
/// against the candidate's actual one when stated, otherwise falls back to
/// actual-vs-actual; a country comparison is averaged in independently.
pub fn score_location(seeker: &Profile, candidate: &Profile) -> (f64, Vec<Explanation>) {
    let mut scores: Vec<f64> = Vec::new();
    let mut explanations = Vec::new();

    let seeker_location = seeker.location.as_deref().map(|l| l.trim().to_lowercase());
    let candidate_location = candidate.location.as_deref().map(|l| l.trim().to_lowercase());
    let seeker_pref_location = seeker
        .preferences()
        .and_then(|p| p.location.as_deref())
        .map(|l| l.trim().to_lowercase());
    let seeker_country = seeker.preferences().and_then(|p| p.country.as_deref());
    let candidate_country = candidate.preferences().and_then(|p| p.country.as_deref());

    if let (Some(preferred), Some(actual)) = (&seeker_pref_location, &candidate_location) {
        if actual.contains(preferred.as_str()) || preferred.contains(actual.as_str()) {
            scores.push(100.0);
            explanations.push(Explanation::new(
                ScoreCategory::Location,
                format!("Both interested in {}", title_case(actual)),
                Impact::Positive,
                100.0,
            ));
        } else if same_region(preferred, actual) {
            scores.push(75.0);
            explanations.push(Explanation::new(
                ScoreCategory::Location,
                "Looking in similar regions",
                Impact::Neutral,
                75.0,
            ));
        } else {
            scores.push(40.0);
            explanations.push(Explanation::new(
                ScoreCategory::Location,
                format!("Different locations ({} vs {})", preferred, actual),
                Impact::Negative,
                40.0,
            ));
        }
    } else if let (Some(mine), Some(theirs)) = (&seeker_location, &candidate_location) {
        if mine == theirs {
            scores.push(95.0);
        } else if same_region(mine, theirs) {
            scores.push(70.0);
        } else {
            scores.push(50.0);
        }
    }

    if let (Some(mine), Some(theirs)) = (seeker_country, candidate_country) {
        if mine.eq_ignore_ascii_case(theirs) {
            scores.push(100.0);
        } else {
            scores.push(30.0);
            explanations.push(Explanation::new(
                ScoreCategory::Location,
                format!("Different country preferences ({} vs {})", mine, theirs),
                Impact::Negative,
                30.0,
            ));
        }
    }

    if scores.is_empty() {
        return (
            60.0,
            vec![Explanation::new(
                ScoreCategory::Location,
                "Location preferences not specified",
                Impact::Neutral,
                60.0,
            )],
        );
    }

    let score = scores.iter().sum::<f64>() / scores.len() as f64;
    (score, explanations)
}

/// Soft preference compatibility (0-100): age-range fit, desired gender,
/// lease-duration closeness and shared languages. These are preferences, not
/// deal-breakers; a gender mismatch here costs points, never the match.
pub fn score_preferences(seeker: &Profile, candidate: &Profile) -> (f64, Vec<Explanation>) {
    let mut parts: Vec<(f64, f64)> = Vec::new();
    let mut explanations = Vec::new();

    let seeker_prefs = seeker.preferences();
    let candidate_prefs = candidate.preferences();

    // Age range fit
    if let (Some(range), Some(age)) = (
        seeker_prefs.and_then(|p| p.age_range.as_ref()).filter(|r| !r.is_empty()),
        candidate.age,
    ) {
        let min_age = range[0];
        let max_age = range.get(1).copied().unwrap_or(100);
        let score = if age >= min_age && age <= max_age {
            explanations.push(Explanation::new(
                ScoreCategory::Preferences,
                format!("Candidate age {} within your preferred range", age),
                Impact::Positive,
                100.0,
            ));
            100.0
        } else {
            let distance = if age < min_age { min_age - age } else { age - max_age };
            let score = (100.0 - 10.0 * distance as f64).max(20.0);
            if score < 60.0 {
                explanations.push(Explanation::new(
                    ScoreCategory::Preferences,
                    format!(
                        "Candidate age {} outside your preferred {}-{} range",
                        age, min_age, max_age
                    ),
                    Impact::Negative,
                    score,
                ));
            }
            score
        };
        parts.push((score, 30.0));
    }

    // Desired gender
    if let (Some(wanted), Some(actual)) = (seeker_prefs.and_then(|p| p.gender), candidate.gender) {
        let score = if wanted == actual { 100.0 } else { 50.0 };
        parts.push((score, 20.0));
    }

    // Lease duration closeness
    if let (Some(seeker_p), Some(candidate_p)) = (seeker_prefs, candidate_prefs) {
        let mine = seeker_p.lease_duration_months;
        let theirs = candidate_p.lease_duration_months;
        let diff = mine.abs_diff(theirs);
        let score = if diff == 0 {
            explanations.push(Explanation::new(
                ScoreCategory::Preferences,
                format!("Same lease duration preference ({} months)", mine),
                Impact::Positive,
                100.0,
            ));
            100.0
        } else if diff <= 3 {
            80.0
        } else if diff <= 6 {
            60.0
        } else {
            explanations.push(Explanation::new(
                ScoreCategory::Preferences,
                format!("Different lease preferences ({} vs {} months)", mine, theirs),
                Impact::Negative,
                40.0,
            ));
            40.0
        };
        parts.push((score, 25.0));
    }

    // Shared languages
    let shared = shared_languages(seeker, candidate);
    if !shared.is_empty() {
        let score = (60.0 + 20.0 * shared.len() as f64).min(100.0);
        if shared.len() >= 2 {
            let display: Vec<&str> = shared.iter().take(3).map(String::as_str).collect();
            explanations.push(Explanation::new(
                ScoreCategory::Preferences,
                format!("Share {} languages: {}", shared.len(), display.join(", ")),
                Impact::Positive,
                score,
            ));
        }
        parts.push((score, 25.0));
    } else if !seeker.languages.is_empty() && !candidate.languages.is_empty() {
        explanations.push(Explanation::new(
            ScoreCategory::Preferences,
            "No common languages - communication may be difficult",
            Impact::Negative,
            30.0,
        ));
        parts.push((30.0, 25.0));
    }

    if parts.is_empty() {
        return (
            60.0,
            vec![Explanation::new(
                ScoreCategory::Preferences,
                "Preference information incomplete",
                Impact::Neutral,
                60.0,
            )],
        );
    }

    (weighted_average(&parts, 60.0), explanations)
}

/// Shared-interest score (0-100): overlap ratio over the combined tag set,
/// with a flat bonus per shared tag so long lists still reward depth.
pub fn score_interests(seeker: &Profile, candidate: &Profile) -> (f64, Vec<Explanation>) {
    if seeker.interests().is_empty() {
        return (
            50.0,
            vec![Explanation::new(
                ScoreCategory::Interests,
                "No interests specified in your profile",
                Impact::Neutral,
                50.0,
            )],
        );
    }

    if candidate.interests().is_empty() {
        return (
            50.0,
            vec![Explanation::new(
                ScoreCategory::Interests,
                "Candidate has no interests listed",
                Impact::Neutral,
                50.0,
            )],
        );
    }

    let shared = shared_interests(seeker, candidate);

    let seeker_set: BTreeSet<String> = seeker.interests().iter().map(|s| s.to_lowercase()).collect();
    let candidate_set: BTreeSet<String> =
        candidate.interests().iter().map(|s| s.to_lowercase()).collect();
    let union_count = seeker_set.union(&candidate_set).count();

    let overlap_ratio = if union_count > 0 {
        shared.len() as f64 / union_count as f64
    } else {
        0.0
    };

    let base = overlap_ratio * 70.0;
    let bonus = (shared.len() as f64 * 6.0).min(30.0);
    let score = (base + bonus).min(100.0);

    let explanation = if shared.len() >= 4 {
        let mut display = shared
            .iter()
            .take(4)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        if shared.len() > 4 {
            display.push_str(&format!(" +{} more", shared.len() - 4));
        }
        Explanation::new(
            ScoreCategory::Interests,
            format!("Strong interest overlap: {}", display),
            Impact::Positive,
            round1(score),
        )
    } else if shared.len() >= 2 {
        Explanation::new(
            ScoreCategory::Interests,
            format!("Share {} interests: {}", shared.len(), shared.join(", ")),
            Impact::Positive,
            round1(score),
        )
    } else if shared.len() == 1 {
        Explanation::new(
            ScoreCategory::Interests,
            format!("One shared interest: {}", shared[0]),
            Impact::Neutral,
            round1(score),
        )
    } else {
        Explanation::new(
            ScoreCategory::Interests,
            "No overlapping interests - different hobbies",
            Impact::Neutral,
            round1(score),
        )
    };

    (score, vec![explanation])
}
