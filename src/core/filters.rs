use crate::models::{
    FlatmateTraits, GuestsFrequency, NoiseTolerance, Ordinal, Personality, Profile, SocialLevel,
};

/// Check one side's deal-breakers against the other profile.
///
/// This is a one-way check: `owner`'s hard constraints are tested against
/// `candidate`'s attributes. The engine calls it in both directions and a hit
/// on either side excludes the pair before any scoring happens.
///
/// Rules run in a fixed order and the first hit wins; the returned string is
/// the diagnostic reason for the exclusion.
pub fn check_deal_breakers(owner: &Profile, candidate: &Profile) -> Option<String> {
    let breakers = owner.deal_breakers()?;
    let candidate_traits = candidate.flatmate_traits();

    // Smoking
    if breakers.no_smokers && candidate.smokes() {
        return Some("Candidate smokes (deal-breaker)".to_string());
    }

    // Pets
    if breakers.no_pets && candidate.has_pets() {
        return Some("Candidate has pets (deal-breaker)".to_string());
    }

    // Same gender only; only enforceable when both genders are known
    if breakers.same_gender_only {
        if let (Some(owner_gender), Some(candidate_gender)) = (owner.gender, candidate.gender) {
            if owner_gender != candidate_gender {
                return Some("Gender mismatch (same gender required)".to_string());
            }
        }
    }

    // Age bounds
    if let Some(age) = candidate.age {
        if let Some(min_age) = breakers.min_age {
            if age < min_age {
                return Some(format!("Candidate age {} below minimum {}", age, min_age));
            }
        }
        if let Some(max_age) = breakers.max_age {
            if age > max_age {
                return Some(format!("Candidate age {} above maximum {}", age, max_age));
            }
        }
    }

    // Minimum cleanliness: a higher rank on the scale means less clean
    if let (Some(min_cleanliness), Some(cleanliness)) = (
        breakers.min_cleanliness,
        candidate_traits.and_then(|t| t.cleanliness),
    ) {
        if cleanliness.rank() > min_cleanliness.rank() {
            return Some(format!(
                "Cleanliness {} below minimum {}",
                cleanliness, min_cleanliness
            ));
        }
    }

    // Budget ceiling: candidate's minimum acceptable rent above the owner's cap
    if let Some(max_budget) = breakers.max_budget {
        if let Some(candidate_min) = candidate.budget().and_then(|b| b.min) {
            if candidate_min > max_budget {
                return Some(format!(
                    "Budget incompatible (candidate min {} > your max {})",
                    candidate_min, max_budget
                ));
            }
        }
    }

    // Quiet hours
    if breakers.quiet_hours_required && may_ignore_quiet_hours(candidate) {
        return Some("Candidate may not respect quiet hours (night owl, noise tolerant)".to_string());
    }

    // Parties
    if breakers.no_parties {
        if let Some(traits) = candidate_traits {
            if likely_hosts_parties(traits) {
                return Some(
                    "Candidate likely hosts parties (very social, frequent guests)".to_string(),
                );
            }
        }
    }

    None
}

/// Heuristic: a noise-tolerant night owl is assumed to be active (and audible)
/// during quiet hours. Inferred from loosely related fields, not a stated fact.
fn may_ignore_quiet_hours(candidate: &Profile) -> bool {
    let noise = candidate.flatmate_traits().and_then(|t| t.noise_tolerance);
    candidate.has_personality(Personality::NightOwl)
        && matches!(
            noise,
            Some(NoiseTolerance::VeryTolerant) | Some(NoiseTolerance::Tolerant)
        )
}

/// Heuristic: frequent guests plus a high social level is read as party
/// hosting. Inferred, not declared; kept intentionally as-is.
fn likely_hosts_parties(traits: &FlatmateTraits) -> bool {
    traits.guests_frequency == Some(GuestsFrequency::Often)
        && matches!(
            traits.social_level,
            Some(SocialLevel::VerySocial) | Some(SocialLevel::Social)
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Cleanliness, DealBreakers, Gender, LifestylePreferences, Preferences, TenantProfile,
    };

    fn bare_profile(id: &str) -> Profile {
        Profile {
            user_id: id.to_string(),
            username: format!("user_{}", id),
            firstname: None,
            lastname: None,
            photo: None,
            age: None,
            gender: None,
            bio: None,
            location: None,
            languages: vec![],
            is_profile_complete: true,
            tenant_profile: None,
        }
    }

    fn with_breakers(mut profile: Profile, breakers: DealBreakers) -> Profile {
        let tenant = profile.tenant_profile.get_or_insert_with(TenantProfile::default);
        tenant.deal_breakers = Some(breakers);
        profile
    }

    fn smoker(mut profile: Profile) -> Profile {
        let tenant = profile.tenant_profile.get_or_insert_with(TenantProfile::default);
        let prefs = tenant.preferences.get_or_insert_with(Preferences::default);
        prefs.lifestyle_preferences = Some(LifestylePreferences {
            smokes: Some(true),
            ..Default::default()
        });
        profile
    }

    #[test]
    fn test_no_breakers_passes() {
        let a = bare_profile("a");
        let b = bare_profile("b");
        assert!(check_deal_breakers(&a, &b).is_none());
    }

    #[test]
    fn test_no_smokers_rejects_smoker() {
        let owner = with_breakers(
            bare_profile("a"),
            DealBreakers {
                no_smokers: true,
                ..Default::default()
            },
        );
        let candidate = smoker(bare_profile("b"));

        let reason = check_deal_breakers(&owner, &candidate).unwrap();
        assert!(reason.contains("smokes"));
    }

    #[test]
    fn test_no_smokers_is_one_way() {
        // The smoker has no deal-breakers of their own.
        let owner = with_breakers(
            bare_profile("a"),
            DealBreakers {
                no_smokers: true,
                ..Default::default()
            },
        );
        let candidate = smoker(bare_profile("b"));

        assert!(check_deal_breakers(&candidate, &owner).is_none());
    }

    #[test]
    fn test_same_gender_needs_both_known() {
        let mut owner = with_breakers(
            bare_profile("a"),
            DealBreakers {
                same_gender_only: true,
                ..Default::default()
            },
        );
        owner.gender = Some(Gender::Female);
        let candidate = bare_profile("b");

        // Candidate gender unknown: rule cannot fire.
        assert!(check_deal_breakers(&owner, &candidate).is_none());

        let mut candidate = bare_profile("b");
        candidate.gender = Some(Gender::Male);
        assert!(check_deal_breakers(&owner, &candidate).is_some());
    }

    #[test]
    fn test_age_bounds() {
        let owner = with_breakers(
            bare_profile("a"),
            DealBreakers {
                min_age: Some(21),
                max_age: Some(30),
                ..Default::default()
            },
        );

        let mut young = bare_profile("b");
        young.age = Some(19);
        assert!(check_deal_breakers(&owner, &young)
            .unwrap()
            .contains("below minimum 21"));

        let mut old = bare_profile("c");
        old.age = Some(35);
        assert!(check_deal_breakers(&owner, &old)
            .unwrap()
            .contains("above maximum 30"));

        let mut fine = bare_profile("d");
        fine.age = Some(25);
        assert!(check_deal_breakers(&owner, &fine).is_none());
    }

    #[test]
    fn test_min_cleanliness() {
        let owner = with_breakers(
            bare_profile("a"),
            DealBreakers {
                min_cleanliness: Some(Cleanliness::Moderate),
                ..Default::default()
            },
        );

        let mut messy = bare_profile("b");
        let tenant = messy.tenant_profile.get_or_insert_with(TenantProfile::default);
        tenant.flatmate_traits = Some(FlatmateTraits {
            cleanliness: Some(Cleanliness::Messy),
            ..Default::default()
        });
        assert!(check_deal_breakers(&owner, &messy).is_some());

        let mut clean = bare_profile("c");
        let tenant = clean.tenant_profile.get_or_insert_with(TenantProfile::default);
        tenant.flatmate_traits = Some(FlatmateTraits {
            cleanliness: Some(Cleanliness::Clean),
            ..Default::default()
        });
        assert!(check_deal_breakers(&owner, &clean).is_none());
    }

    #[test]
    fn test_max_budget() {
        let owner = with_breakers(
            bare_profile("a"),
            DealBreakers {
                max_budget: Some(2000.0),
                ..Default::default()
            },
        );

        let mut expensive = bare_profile("b");
        let tenant = expensive.tenant_profile.get_or_insert_with(TenantProfile::default);
        let prefs = tenant.preferences.get_or_insert_with(Preferences::default);
        prefs.budget = Some(crate::models::Budget {
            currency: "PLN".to_string(),
            min: Some(2500.0),
            max: Some(4000.0),
        });

        assert!(check_deal_breakers(&owner, &expensive)
            .unwrap()
            .contains("Budget incompatible"));
    }

    #[test]
    fn test_quiet_hours_heuristic() {
        let owner = with_breakers(
            bare_profile("a"),
            DealBreakers {
                quiet_hours_required: true,
                ..Default::default()
            },
        );

        let mut loud = bare_profile("b");
        let tenant = loud.tenant_profile.get_or_insert_with(TenantProfile::default);
        tenant.personality = vec![Personality::NightOwl];
        tenant.flatmate_traits = Some(FlatmateTraits {
            noise_tolerance: Some(NoiseTolerance::VeryTolerant),
            ..Default::default()
        });
        assert!(check_deal_breakers(&owner, &loud).is_some());

        // A noise-sensitive night owl passes: both signals are required.
        let mut considerate = bare_profile("c");
        let tenant = considerate.tenant_profile.get_or_insert_with(TenantProfile::default);
        tenant.personality = vec![Personality::NightOwl];
        tenant.flatmate_traits = Some(FlatmateTraits {
            noise_tolerance: Some(NoiseTolerance::Sensitive),
            ..Default::default()
        });
        assert!(check_deal_breakers(&owner, &considerate).is_none());
    }

    #[test]
    fn test_no_parties_heuristic() {
        let owner = with_breakers(
            bare_profile("a"),
            DealBreakers {
                no_parties: true,
                ..Default::default()
            },
        );

        let mut host = bare_profile("b");
        let tenant = host.tenant_profile.get_or_insert_with(TenantProfile::default);
        tenant.flatmate_traits = Some(FlatmateTraits {
            guests_frequency: Some(GuestsFrequency::Often),
            social_level: Some(SocialLevel::VerySocial),
            ..Default::default()
        });
        assert!(check_deal_breakers(&owner, &host).is_some());

        // Frequent guests alone is not enough.
        let mut visitor = bare_profile("c");
        let tenant = visitor.tenant_profile.get_or_insert_with(TenantProfile::default);
        tenant.flatmate_traits = Some(FlatmateTraits {
            guests_frequency: Some(GuestsFrequency::Often),
            social_level: Some(SocialLevel::Quiet),
            ..Default::default()
        });
        assert!(check_deal_breakers(&owner, &visitor).is_none());
    }

    #[test]
    fn test_rule_order_smoking_first() {
        let owner = with_breakers(
            bare_profile("a"),
            DealBreakers {
                no_smokers: true,
                min_age: Some(30),
                ..Default::default()
            },
        );
        let mut candidate = smoker(bare_profile("b"));
        candidate.age = Some(20);

        // Both rules apply; the smoking rule is checked first.
        let reason = check_deal_breakers(&owner, &candidate).unwrap();
        assert!(reason.contains("smokes"));
    }
}
