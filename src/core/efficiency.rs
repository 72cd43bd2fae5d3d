use std::collections::HashSet;

use crate::core::selector::SlotKey;
use crate::models::Match;

/// Weight of the mean match score
const AVG_SCORE_WEIGHT: f64 = 5.0;

/// Points per distinct client need slot covered
const COVERAGE_WEIGHT: f64 = 5.0;

/// Upper bound of the efficiency figure
const MAX_EFFICIENCY: f64 = 100.0;

/// Summarize a set of selected matches as a 0-100 figure
///
/// efficiency = min(100, mean(score) * 5 + distinct_client_slots * 5)
///
/// This is a heuristic for comparing options side by side, not a share of a
/// theoretical optimum. An empty selection scores 0.
pub fn calculate_efficiency(matches: &[Match]) -> f64 {
    if matches.is_empty() {
        return 0.0;
    }

    let avg_score = matches.iter().map(|m| m.score).sum::<f64>() / matches.len() as f64;
    let coverage = matches
        .iter()
        .map(SlotKey::client)
        .collect::<HashSet<_>>()
        .len();

    (avg_score * AVG_SCORE_WEIGHT + coverage as f64 * COVERAGE_WEIGHT).min(MAX_EFFICIENCY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TimeSlot, Weekday};

    fn create_match(client: &str, start: &str, end: &str, score: f64) -> Match {
        Match {
            caregiver_id: "cg".to_string(),
            client_id: client.to_string(),
            day: Weekday::Monday,
            time_slot: TimeSlot::parse(start, end).unwrap(),
            score,
        }
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(calculate_efficiency(&[]), 0.0);
    }

    #[test]
    fn test_low_scores_below_cap() {
        let matches = vec![
            create_match("a", "09:00", "10:00", 2.0),
            create_match("b", "09:00", "10:00", 4.0),
        ];
        // mean 3.0 * 5 + 2 slots * 5
        assert!((calculate_efficiency(&matches) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_client_slots_count_once() {
        let matches = vec![
            create_match("a", "09:00", "10:00", 1.0),
            create_match("a", "09:00", "10:00", 1.0),
        ];
        assert!((calculate_efficiency(&matches) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_capped_at_hundred() {
        let matches = vec![create_match("a", "09:00", "17:00", 1440.0)];
        assert_eq!(calculate_efficiency(&matches), 100.0);
    }
}
