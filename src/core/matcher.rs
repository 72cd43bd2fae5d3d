use rand::Rng;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::core::{
    distance::{DistanceProvider, RandomDistance},
    filters::{fits_shift, is_excluded},
    scoring::calculate_match_score,
    selector::generate_schedule_options,
};
use crate::models::{Caregiver, Client, Match, MatchingOptions, ScheduleOption};

/// Result of one scheduling run
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub options: Vec<ScheduleOption>,
    /// Number of candidate matches the options were chosen from
    pub total_matches: usize,
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Exclusion filtering per caregiver/client pair
/// 2. Slot overlap detection per day
/// 3. Scoring and stable ranking of candidates
/// 4. Option selection (client-first, balanced, max client coverage)
///
/// The matcher holds no per-run state; every call is independent.
#[derive(Clone)]
pub struct Matcher {
    distance: Arc<dyn DistanceProvider>,
    options: MatchingOptions,
}

impl Matcher {
    pub fn new(distance: Arc<dyn DistanceProvider>, options: MatchingOptions) -> Self {
        Self { distance, options }
    }

    pub fn with_distance<D: DistanceProvider + 'static>(distance: D) -> Self {
        Self::new(Arc::new(distance), MatchingOptions::default())
    }

    /// Matcher backed by the random distance stub
    pub fn with_default_distance() -> Self {
        Self::with_distance(RandomDistance::default())
    }

    pub fn options(&self) -> &MatchingOptions {
        &self.options
    }

    /// Enumerate and score every feasible caregiver/client pairing
    ///
    /// For every client need slot and every non-excluded caregiver, each
    /// caregiver slot on the same day that overlaps the need produces one
    /// candidate carrying the client's slot. The result is sorted by score,
    /// highest first; the sort is stable, so equal scores keep input order.
    ///
    /// # Arguments
    /// * `caregivers` - Caregivers with their weekly availability
    /// * `clients` - Clients with their weekly needs
    pub fn generate_matches(&self, caregivers: &[Caregiver], clients: &[Client]) -> Vec<Match> {
        let mut matches = Vec::new();

        for client in clients {
            for client_day in &client.weekly_schedule {
                for client_slot in &client_day.slots {
                    for caregiver in caregivers {
                        if is_excluded(caregiver, client) {
                            continue;
                        }

                        for caregiver_slot in caregiver.slots_on(client_day.day) {
                            if !caregiver_slot.overlaps(client_slot)
                                || !fits_shift(caregiver, caregiver_slot, &self.options)
                            {
                                continue;
                            }

                            let distance = self.distance.distance(&caregiver.address, &client.address);
                            let score = calculate_match_score(caregiver_slot, client_slot, distance);

                            matches.push(Match {
                                caregiver_id: caregiver.id.clone(),
                                client_id: client.id.clone(),
                                day: client_day.day,
                                time_slot: *client_slot,
                                score,
                            });
                        }
                    }
                }
            }
        }

        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        debug!(
            caregivers = caregivers.len(),
            clients = clients.len(),
            candidates = matches.len(),
            "Generated candidate matches"
        );

        matches
    }

    /// Generate candidates and build the three schedule options
    ///
    /// `rng` only drives the balanced option's shuffle.
    pub fn schedule<R: Rng + ?Sized>(
        &self,
        caregivers: &[Caregiver],
        clients: &[Client],
        rng: &mut R,
    ) -> MatchResult {
        let matches = self.generate_matches(caregivers, clients);
        let options = generate_schedule_options(&matches, rng);

        MatchResult {
            options,
            total_matches: matches.len(),
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_distance()
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
