// Core algorithm exports
pub mod distance;
pub mod efficiency;
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod selector;
pub mod timeslot;

pub use distance::{DistanceProvider, DistanceTable, FixedDistance, RandomDistance};
pub use efficiency::calculate_efficiency;
pub use filters::{fits_shift, is_excluded};
pub use matcher::{MatchResult, Matcher};
pub use scoring::calculate_match_score;
pub use selector::{
    generate_schedule_options, select_balanced, select_client_first, select_max_client_coverage,
    select_max_client_coverage_from, Strategy,
};
pub use timeslot::{fully_covers, overlap_minutes, overlaps, TimeSlot, TimeSlotError};
