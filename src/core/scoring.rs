use crate::core::distance::sanitize_distance;
use crate::models::TimeSlot;

/// Applied when the caregiver slot covers the whole client need
pub const FULL_COVERAGE_MULTIPLIER: f64 = 2.0;

/// Applied on top of full coverage when both slots are identical
pub const EXACT_MATCH_MULTIPLIER: f64 = 1.5;

/// Score one caregiver slot against one client need slot
///
/// Scoring formula:
/// score = overlap_minutes * 1 / (distance + 1)
///     * 2.0   if the caregiver slot fully covers the client slot
///     * 1.5   if both slots have the same start and end
///
/// Returns 0 for disjoint slots.
pub fn calculate_match_score(caregiver_slot: &TimeSlot, client_slot: &TimeSlot, distance: f64) -> f64 {
    let overlap = caregiver_slot.overlap_minutes(client_slot);
    if overlap == 0 {
        return 0.0;
    }

    let mut score = f64::from(overlap) * proximity_factor(distance);

    if caregiver_slot.fully_covers(client_slot) {
        score *= FULL_COVERAGE_MULTIPLIER;
    }

    if caregiver_slot == client_slot {
        score *= EXACT_MATCH_MULTIPLIER;
    }

    score
}

/// 1 / (d + 1): 1.0 at zero distance, decaying towards 0
#[inline]
fn proximity_factor(distance: f64) -> f64 {
    1.0 / (sanitize_distance(distance) + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(start: &str, end: &str) -> TimeSlot {
        TimeSlot::parse(start, end).unwrap()
    }

    #[test]
    fn test_exact_match_applies_both_multipliers() {
        let s = slot("09:00", "17:00");
        let score = calculate_match_score(&s, &s, 0.0);
        assert!((score - 480.0 * 2.0 * 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_full_coverage_without_exact_match() {
        let caregiver = slot("08:00", "12:00");
        let client = slot("09:00", "11:00");
        let score = calculate_match_score(&caregiver, &client, 1.0);
        assert!((score - 120.0 * 0.5 * 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_overlap_has_no_bonus() {
        let caregiver = slot("10:00", "12:00");
        let client = slot("09:00", "11:00");
        let score = calculate_match_score(&caregiver, &client, 0.0);
        assert!((score - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_distance_strictly_reduces_score() {
        let s = slot("09:00", "11:00");
        let near = calculate_match_score(&s, &s, 0.0);
        let far = calculate_match_score(&s, &s, 10.0);
        assert!(near > far);
        assert!((far - near / 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_slots_score_zero() {
        let score = calculate_match_score(&slot("06:00", "07:00"), &slot("08:00", "09:00"), 0.0);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_negative_distance_is_clamped() {
        let s = slot("09:00", "10:00");
        assert_eq!(
            calculate_match_score(&s, &s, -3.0),
            calculate_match_score(&s, &s, 0.0)
        );
    }
}
