use crate::models::Ordinal;

/// Score two positions on an ordered trait scale (0-100).
///
/// Exact match is worth much more than being one step apart; beyond that the
/// score drops linearly with a floor. Either side missing is neutral.
#[inline]
pub fn ordinal_score<T: Ordinal>(a: Option<T>, b: Option<T>) -> f64 {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        _ => return 50.0,
    };

    match a.rank().abs_diff(b.rank()) {
        0 => 100.0,
        1 => 80.0,
        distance => (100.0 - 25.0 * distance as f64).max(20.0),
    }
}

/// Absolute difference between two "HH:MM" clock times, in hours.
///
/// Wraps around midnight so 23:00 vs 01:00 is two hours, not twenty-two.
/// Returns `None` for anything that does not parse as a time of day.
pub fn time_diff_hours(a: &str, b: &str) -> Option<f64> {
    let minutes_a = parse_clock_minutes(a)?;
    let minutes_b = parse_clock_minutes(b)?;

    let diff = minutes_a.abs_diff(minutes_b);
    let diff = diff.min(1440 - diff);

    Some(diff as f64 / 60.0)
}

fn parse_clock_minutes(time: &str) -> Option<u32> {
    let (hours, minutes) = time.trim().split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours >= 24 || minutes >= 60 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Overlap ratio between two budget ranges (0.0 to 1.0).
///
/// The ratio is the intersection length over the *smaller* range length, so a
/// narrow budget fully inside a wide one still counts as a complete overlap.
/// Two coinciding point ranges (min == max) count as a full overlap.
pub fn range_overlap_ratio(min_a: f64, max_a: f64, min_b: f64, max_b: f64) -> f64 {
    let start = min_a.max(min_b);
    let end = max_a.min(max_b);

    if start > end {
        return 0.0;
    }

    let smaller = (max_a - min_a).min(max_b - min_b);
    if smaller <= 0.0 {
        // Degenerate point range touching the other range.
        return 1.0;
    }

    ((end - start) / smaller).min(1.0)
}
