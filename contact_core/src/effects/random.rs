//! Random sources for burst generation
//!
//! Burst geometry only ever asks for uniform floats in `[0, 1)`, so the
//! trait is that one method plus helpers built on it. Tests swap in
//! [`SequenceSource`] to get reproducible particles.

/// Uniform random numbers in `[0, 1)`
pub trait RandomSource: Send {
    fn next_f64(&mut self) -> f64;

    /// Uniform value in `[low, high)`
    fn range(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_f64() * (high - low)
    }

    /// Uniform index into a collection of `len` items
    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.next_f64() * len as f64) as usize).min(len - 1)
    }
}

/// Production source backed by `fastrand`
#[derive(Debug, Clone)]
pub struct FastRandSource {
    rng: fastrand::Rng,
}

impl FastRandSource {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for FastRandSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for FastRandSource {
    fn next_f64(&mut self) -> f64 {
        self.rng.f64()
    }
}

/// Replays a fixed list of values, cycling when exhausted
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    /// Values outside `[0, 1)` are clamped into it
    pub fn new(values: Vec<f64>) -> Self {
        let values = if values.is_empty() { vec![0.0] } else { values };
        Self {
            values: values
                .into_iter()
                .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
                .collect(),
            cursor: 0,
        }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceSource {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        value
    }
}
