use crate::models::{Caregiver, Client, MatchingOptions, TimeSlot};

/// Check whether either side has vetoed the pairing
///
/// Exclusions are bidirectional: the pair is skipped if the caregiver lists
/// the client or the client lists the caregiver.
#[inline]
pub fn is_excluded(caregiver: &Caregiver, client: &Client) -> bool {
    caregiver.exclusions.contains(&client.id) || client.exclusions.contains(&caregiver.id)
}

/// Check whether a caregiver slot may be offered under the current options
///
/// With shift caps disabled every slot is usable and the shift type is
/// informational only.
#[inline]
pub fn fits_shift(caregiver: &Caregiver, slot: &TimeSlot, options: &MatchingOptions) -> bool {
    if !options.enforce_shift_caps {
        return true;
    }

    match caregiver.shift_type.max_minutes() {
        Some(cap) => slot.duration_minutes() <= cap,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftType;
    use std::collections::BTreeSet;

    fn create_caregiver(id: &str, excludes: &[&str], shift_type: ShiftType) -> Caregiver {
        Caregiver {
            id: id.to_string(),
            name: format!("Caregiver {}", id),
            address: "123 Oak Street".to_string(),
            phone: String::new(),
            weekly_schedule: vec![],
            exclusions: excludes.iter().map(|s| s.to_string()).collect(),
            shift_type,
        }
    }

    fn create_client(id: &str, excludes: &[&str]) -> Client {
        Client {
            id: id.to_string(),
            name: format!("Client {}", id),
            address: "456 Pine Ave".to_string(),
            phone: String::new(),
            weekly_schedule: vec![],
            exclusions: excludes.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
        }
    }

    #[test]
    fn test_no_exclusions() {
        let caregiver = create_caregiver("cg", &[], ShiftType::Anytime);
        let client = create_client("cl", &[]);
        assert!(!is_excluded(&caregiver, &client));
    }

    #[test]
    fn test_caregiver_side_exclusion() {
        let caregiver = create_caregiver("cg", &["cl"], ShiftType::Anytime);
        let client = create_client("cl", &[]);
        assert!(is_excluded(&caregiver, &client));
    }

    #[test]
    fn test_client_side_exclusion() {
        let caregiver = create_caregiver("cg", &[], ShiftType::Anytime);
        let client = create_client("cl", &["cg"]);
        assert!(is_excluded(&caregiver, &client));
    }

    #[test]
    fn test_shift_caps_ignored_by_default() {
        let caregiver = create_caregiver("cg", &[], ShiftType::PartTime);
        let long = TimeSlot::parse("08:00", "16:00").unwrap();
        assert!(fits_shift(&caregiver, &long, &MatchingOptions::default()));
    }

    #[test]
    fn test_shift_caps_enforced() {
        let options = MatchingOptions { enforce_shift_caps: true };
        let part_time = create_caregiver("pt", &[], ShiftType::PartTime);
        let mid_time = create_caregiver("mt", &[], ShiftType::MidTime);
        let anytime = create_caregiver("at", &[], ShiftType::Anytime);

        let two_hours = TimeSlot::parse("09:00", "11:00").unwrap();
        let three_hours = TimeSlot::parse("09:00", "12:00").unwrap();
        let eight_hours = TimeSlot::parse("09:00", "17:00").unwrap();

        assert!(fits_shift(&part_time, &two_hours, &options));
        assert!(!fits_shift(&part_time, &three_hours, &options));
        assert!(fits_shift(&mid_time, &three_hours, &options));
        assert!(!fits_shift(&mid_time, &eight_hours, &options));
        assert!(fits_shift(&anytime, &eight_hours, &options));
    }
}
