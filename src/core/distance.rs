use rand::Rng;
use std::collections::HashMap;

/// Default upper bound for the random distance stub
pub const DEFAULT_MAX_RANDOM_DISTANCE: f64 = 50.0;

/// Maps a pair of addresses to a travel distance
///
/// Implementations must return a value `>= 0`; the scorer clamps anything
/// else (including NaN) to zero. Symmetry is not required.
pub trait DistanceProvider: Send + Sync {
    fn distance(&self, from: &str, to: &str) -> f64;
}

impl<F> DistanceProvider for F
where
    F: Fn(&str, &str) -> f64 + Send + Sync,
{
    fn distance(&self, from: &str, to: &str) -> f64 {
        self(from, to)
    }
}

/// Uniform random distance in `[0, max)`
///
/// Stand-in for a real geocoder. Every call draws a fresh value, so two
/// candidates for the same address pair usually get different distances.
/// A max that is negative or not finite yields zero for every pair.
#[derive(Debug, Clone, Copy)]
pub struct RandomDistance {
    max: f64,
}

impl RandomDistance {
    pub fn new(max: f64) -> Self {
        let max = if max.is_finite() { max.max(0.0) } else { 0.0 };
        Self { max }
    }
}

impl Default for RandomDistance {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RANDOM_DISTANCE)
    }
}

impl DistanceProvider for RandomDistance {
    fn distance(&self, _from: &str, _to: &str) -> f64 {
        if self.max <= 0.0 {
            return 0.0;
        }
        rand::rng().random_range(0.0..self.max)
    }
}

/// Same distance for every pair
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDistance(pub f64);

impl DistanceProvider for FixedDistance {
    fn distance(&self, _from: &str, _to: &str) -> f64 {
        self.0
    }
}

/// Explicit per-pair distances with a fallback
///
/// Lookups are directional: `(a, b)` and `(b, a)` are separate entries.
#[derive(Debug, Clone, Default)]
pub struct DistanceTable {
    entries: HashMap<(String, String), f64>,
    fallback: f64,
}

impl DistanceTable {
    pub fn new(fallback: f64) -> Self {
        Self {
            entries: HashMap::new(),
            fallback,
        }
    }

    pub fn with(mut self, from: impl Into<String>, to: impl Into<String>, distance: f64) -> Self {
        self.insert(from, to, distance);
        self
    }

    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>, distance: f64) {
        self.entries.insert((from.into(), to.into()), distance);
    }
}

impl DistanceProvider for DistanceTable {
    fn distance(&self, from: &str, to: &str) -> f64 {
        // Tuple keys need owned strings; tables are tiny so the allocation is fine
        self.entries
            .get(&(from.to_string(), to.to_string()))
            .copied()
            .unwrap_or(self.fallback)
    }
}

/// Clamp a provider result into the range the scorer accepts
#[inline]
pub fn sanitize_distance(distance: f64) -> f64 {
    if distance.is_nan() {
        0.0
    } else {
        distance.max(0.0)
    }
}
