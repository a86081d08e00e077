use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Deserialize an optional enum field, downgrading unrecognized values to
/// `None` instead of failing the whole document. Profiles are edited by a
/// separate frontend and occasionally carry stale enum spellings.
fn lenient_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value::<T>(value.clone()) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => {
            tracing::warn!(%value, "unrecognized enum value in profile, treating as unspecified");
            Ok(None)
        }
    }
}

/// Same idea for enum lists: unknown entries are dropped, not fatal.
fn lenient_enum_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let values = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<T>(value.clone()) {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                tracing::warn!(%value, "unrecognized tag in profile list, dropping");
                None
            }
        })
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// Free-form personality tags. A profile may carry several, including
/// contradictory ones; nothing here assumes mutual exclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    Introvert,
    Extrovert,
    NightOwl,
    EarlyBird,
    Neat,
    Messy,
    Quiet,
    Talkative,
}

/// Ordered trait scales used for ordinal-distance scoring. `rank` is the
/// position on the scale; adjacent ranks are "close", distant ranks are not.
pub trait Ordinal: Copy {
    fn rank(self) -> u8;
}

/// Cleanliness scale, tidiest first. Rank order doubles as the
/// "less clean than" relation used by the minimum-cleanliness deal-breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cleanliness {
    VeryClean,
    Clean,
    Moderate,
    Relaxed,
    Messy,
}

impl Cleanliness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cleanliness::VeryClean => "very_clean",
            Cleanliness::Clean => "clean",
            Cleanliness::Moderate => "moderate",
            Cleanliness::Relaxed => "relaxed",
            Cleanliness::Messy => "messy",
        }
    }
}

impl Ordinal for Cleanliness {
    fn rank(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Cleanliness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialLevel {
    VerySocial,
    Social,
    Moderate,
    Quiet,
    VeryQuiet,
}

impl Ordinal for SocialLevel {
    fn rank(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuestsFrequency {
    Often,
    Sometimes,
    Rarely,
    Never,
}

impl Ordinal for GuestsFrequency {
    fn rank(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseTolerance {
    VeryTolerant,
    Tolerant,
    Moderate,
    Sensitive,
    VerySensitive,
}

impl Ordinal for NoiseTolerance {
    fn rank(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CookingFrequency {
    Daily,
    Often,
    Sometimes,
    Rarely,
    Never,
}

impl Ordinal for CookingFrequency {
    fn rank(self) -> u8 {
        self as u8
    }
}

/// Work hours window within a daily routine. Times are "HH:MM" strings as
/// stored by the frontend; parsing happens at scoring time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkHours {
    #[serde(rename = "from", default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyRoutine {
    #[serde(rename = "wakeUp", default)]
    pub wake_up: Option<String>,
    #[serde(rename = "sleepTime", default)]
    pub sleep_time: Option<String>,
    #[serde(rename = "workHours", default)]
    pub work_hours: Option<WorkHours>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LifestylePreferences {
    #[serde(default)]
    pub smokes: Option<bool>,
    #[serde(rename = "hasPets", default)]
    pub has_pets: Option<bool>,
    #[serde(rename = "okWithSmoking", default)]
    pub ok_with_smoking: Option<bool>,
    #[serde(rename = "okWithPets", default)]
    pub ok_with_pets: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

fn default_currency() -> String {
    "PLN".to_string()
}

impl Budget {
    /// Lower bound with the documented fallback for partially-filled budgets.
    pub fn min_value(&self) -> f64 {
        self.min.unwrap_or(0.0)
    }

    /// Upper bound with the documented fallback for partially-filled budgets.
    pub fn max_value(&self) -> f64 {
        self.max.unwrap_or(10_000.0)
    }

    pub fn midpoint(&self) -> f64 {
        (self.min_value() + self.max_value()) / 2.0
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub gender: Option<Gender>,
    #[serde(rename = "ageRange", default)]
    pub age_range: Option<Vec<u32>>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(rename = "lifestylePreferences", default)]
    pub lifestyle_preferences: Option<LifestylePreferences>,
    #[serde(default)]
    pub budget: Option<Budget>,
    #[serde(rename = "leaseDurationMonths", default = "default_lease_months")]
    pub lease_duration_months: u32,
}

fn default_lease_months() -> u32 {
    12
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlatmateTraits {
    #[serde(default, deserialize_with = "lenient_enum")]
    pub cleanliness: Option<Cleanliness>,
    #[serde(rename = "socialLevel", default, deserialize_with = "lenient_enum")]
    pub social_level: Option<SocialLevel>,
    #[serde(rename = "guestsFrequency", default, deserialize_with = "lenient_enum")]
    pub guests_frequency: Option<GuestsFrequency>,
    #[serde(rename = "cookingFrequency", default, deserialize_with = "lenient_enum")]
    pub cooking_frequency: Option<CookingFrequency>,
    #[serde(rename = "noiseTolerance", default, deserialize_with = "lenient_enum")]
    pub noise_tolerance: Option<NoiseTolerance>,
    #[serde(rename = "sharedSpaces", default)]
    pub shared_spaces: Vec<String>,
}

/// Hard constraints that exclude a pair before any scoring happens.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DealBreakers {
    #[serde(rename = "noSmokers", default)]
    pub no_smokers: bool,
    #[serde(rename = "noPets", default)]
    pub no_pets: bool,
    #[serde(rename = "noParties", default)]
    pub no_parties: bool,
    #[serde(rename = "sameGenderOnly", default)]
    pub same_gender_only: bool,
    #[serde(rename = "quietHoursRequired", default)]
    pub quiet_hours_required: bool,
    #[serde(rename = "minAge", default)]
    pub min_age: Option<u32>,
    #[serde(rename = "maxAge", default)]
    pub max_age: Option<u32>,
    #[serde(rename = "minCleanliness", default, deserialize_with = "lenient_enum")]
    pub min_cleanliness: Option<Cleanliness>,
    #[serde(rename = "maxBudget", default)]
    pub max_budget: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TenantProfile {
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default, deserialize_with = "lenient_enum_list")]
    pub personality: Vec<Personality>,
    #[serde(rename = "dailyRoutine", default)]
    pub daily_routine: Option<DailyRoutine>,
    #[serde(default)]
    pub preferences: Option<Preferences>,
    #[serde(rename = "flatmateTraits", default)]
    pub flatmate_traits: Option<FlatmateTraits>,
    #[serde(rename = "dealBreakers", default)]
    pub deal_breakers: Option<DealBreakers>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Photo {
    #[serde(default)]
    pub url: Option<String>,
}

/// A marketplace user as seen by the matching engine: a read-only snapshot
/// supplied fresh per call. The engine never mutates or stores these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "userId", alias = "_id")]
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub photo: Option<Photo>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(rename = "isProfileComplete", default)]
    pub is_profile_complete: bool,
    #[serde(rename = "tenantProfile", default)]
    pub tenant_profile: Option<TenantProfile>,
}

impl Profile {
    pub fn tenant(&self) -> Option<&TenantProfile> {
        self.tenant_profile.as_ref()
    }

    pub fn deal_breakers(&self) -> Option<&DealBreakers> {
        self.tenant().and_then(|t| t.deal_breakers.as_ref())
    }

    pub fn preferences(&self) -> Option<&Preferences> {
        self.tenant().and_then(|t| t.preferences.as_ref())
    }

    pub fn flatmate_traits(&self) -> Option<&FlatmateTraits> {
        self.tenant().and_then(|t| t.flatmate_traits.as_ref())
    }

    pub fn daily_routine(&self) -> Option<&DailyRoutine> {
        self.tenant().and_then(|t| t.daily_routine.as_ref())
    }

    pub fn budget(&self) -> Option<&Budget> {
        self.preferences().and_then(|p| p.budget.as_ref())
    }

    pub fn personality(&self) -> &[Personality] {
        self.tenant().map(|t| t.personality.as_slice()).unwrap_or(&[])
    }

    pub fn has_personality(&self, tag: Personality) -> bool {
        self.personality().contains(&tag)
    }

    pub fn interests(&self) -> &[String] {
        self.tenant().map(|t| t.interests.as_slice()).unwrap_or(&[])
    }

    /// Declared smoker, defaulting to non-smoker when unspecified.
    pub fn smokes(&self) -> bool {
        self.lifestyle_flag(|l| l.smokes, false)
    }

    pub fn has_pets(&self) -> bool {
        self.lifestyle_flag(|l| l.has_pets, false)
    }

    /// Tolerates a smoking flatmate; unanswered reads as tolerant.
    pub fn ok_with_smoking(&self) -> bool {
        self.lifestyle_flag(|l| l.ok_with_smoking, true)
    }

    pub fn ok_with_pets(&self) -> bool {
        self.lifestyle_flag(|l| l.ok_with_pets, true)
    }

    fn lifestyle_flag(
        &self,
        pick: impl Fn(&LifestylePreferences) -> Option<bool>,
        default: bool,
    ) -> bool {
        self.preferences()
            .and_then(|p| p.lifestyle_preferences.as_ref())
            .and_then(pick)
            .unwrap_or(default)
    }
}

/// Match quality tier, labelled for the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Perfect,
    Great,
    Good,
    Fair,
    Poor,
}

impl MatchTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            MatchTier::Perfect
        } else if score >= 70.0 {
            MatchTier::Great
        } else if score >= 55.0 {
            MatchTier::Good
        } else if score >= 40.0 {
            MatchTier::Fair
        } else {
            MatchTier::Poor
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Neutral,
    Negative,
}

impl Impact {
    /// Ordering key for explanation lists: positive entries lead.
    pub fn rank(&self) -> u8 {
        match self {
            Impact::Positive => 0,
            Impact::Neutral => 1,
            Impact::Negative => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreCategory {
    Budget,
    Lifestyle,
    Personality,
    Schedule,
    Location,
    Preferences,
    Interests,
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScoreCategory::Budget => "Budget",
            ScoreCategory::Lifestyle => "Lifestyle",
            ScoreCategory::Personality => "Personality",
            ScoreCategory::Schedule => "Schedule",
            ScoreCategory::Location => "Location",
            ScoreCategory::Preferences => "Preferences",
            ScoreCategory::Interests => "Interests",
        };
        f.write_str(name)
    }
}

/// One human-readable reason behind a category score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explanation {
    pub category: ScoreCategory,
    pub reason: String,
    pub impact: Impact,
    pub score: f64,
}

impl Explanation {
    pub fn new(
        category: ScoreCategory,
        reason: impl Into<String>,
        impact: Impact,
        score: f64,
    ) -> Self {
        Self {
            category,
            reason: reason.into(),
            impact,
            score,
        }
    }
}

/// Per-category sub-scores plus the weighted total, all rounded to one decimal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    #[serde(rename = "budgetScore")]
    pub budget_score: f64,
    #[serde(rename = "lifestyleScore")]
    pub lifestyle_score: f64,
    #[serde(rename = "personalityScore")]
    pub personality_score: f64,
    #[serde(rename = "scheduleScore")]
    pub schedule_score: f64,
    #[serde(rename = "locationScore")]
    pub location_score: f64,
    #[serde(rename = "preferencesScore")]
    pub preferences_score: f64,
    #[serde(rename = "interestsScore")]
    pub interests_score: f64,
    #[serde(rename = "totalScore")]
    pub total_score: f64,
}

/// Scored candidate returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub user_id: String,
    pub username: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub photo: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub languages: Vec<String>,
    pub compatibility_score: f64,
    pub match_tier: MatchTier,
    pub score_breakdown: ScoreBreakdown,
    pub explanations: Vec<Explanation>,
    pub shared_interests: Vec<String>,
    pub shared_languages: Vec<String>,
    pub compatible: bool,
}

/// Aggregate statistics over the filtered, scored candidate set
/// (computed before the limit truncation).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchStats {
    pub average_score: f64,
    pub highest_score: Option<f64>,
    pub lowest_score: Option<f64>,
    pub perfect_matches: usize,
    pub great_matches: usize,
    pub good_matches: usize,
}

impl Default for MatchStats {
    fn default() -> Self {
        Self {
            average_score: 0.0,
            highest_score: None,
            lowest_score: None,
            perfect_matches: 0,
            great_matches: 0,
            good_matches: 0,
        }
    }
}

/// A candidate removed by the deal-breaker filter, kept for diagnostics.
#[derive(Debug, Clone)]
pub struct ExclusionRecord {
    pub candidate_id: String,
    pub reason: String,
}

/// Full result of a matching run.
#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcome {
    pub matches: Vec<MatchResult>,
    pub total_candidates: usize,
    pub filtered_by_deal_breakers: usize,
    pub stats: MatchStats,
    #[serde(skip)]
    pub exclusions: Vec<ExclusionRecord>,
}

/// Category weights for the compatibility engine. Integer percentages that
/// must sum to exactly 100; validated once when the engine is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineWeights {
    pub budget: u32,
    pub lifestyle: u32,
    pub personality: u32,
    pub schedule: u32,
    pub location: u32,
    pub preferences: u32,
    pub interests: u32,
}

impl EngineWeights {
    pub fn total(&self) -> u32 {
        self.budget
            + self.lifestyle
            + self.personality
            + self.schedule
            + self.location
            + self.preferences
            + self.interests
    }
}

impl Default for EngineWeights {
    fn default() -> Self {
        Self {
            budget: 20,
            lifestyle: 25,
            personality: 15,
            schedule: 12,
            location: 10,
            preferences: 10,
            interests: 8,
        }
    }
}
