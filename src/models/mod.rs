// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Budget, Cleanliness, CookingFrequency, DailyRoutine, DealBreakers, EngineWeights,
    ExclusionRecord, Explanation, FlatmateTraits, Gender, GuestsFrequency, Impact,
    LifestylePreferences, MatchOutcome, MatchResult, MatchStats, MatchTier, NoiseTolerance,
    Ordinal, Personality, Photo, Preferences, Profile, ScoreBreakdown, ScoreCategory, SocialLevel,
    TenantProfile, WorkHours,
};
pub use requests::{FindMatchesRequest, RecordEventRequest};
pub use responses::{
    ErrorResponse, FindMatchesResponse, HealthResponse, MatchStatsSummaryResponse, PairResponse,
    RecordEventResponse, ScoreDistribution,
};
