//! Particle burst and ripple generation
//!
//! A burst is 22 particles spread around a circle with jittered angles,
//! travel distances, sizes and timings. Particles are plain descriptors:
//! [`Particle::sample`] turns one into a frame for any elapsed time, which
//! is how renderers without CSS animate them.

use std::f64::consts::TAU;
use std::time::Duration;

use tokio::time::Instant;

use super::easing::CubicBezier;
use super::random::RandomSource;

/// Particles per burst
pub const PARTICLE_COUNT: usize = 22;

/// Upper bound (exclusive) of the random angular offset, in radians
pub const ANGLE_JITTER: f64 = 0.6;

pub const DISTANCE_RANGE: (f64, f64) = (40.0, 120.0);
pub const SIZE_RANGE: (f64, f64) = (4.0, 10.0);
pub const DURATION_RANGE_MS: (f64, f64) = (500.0, 900.0);
pub const DELAY_RANGE_MS: (f64, f64) = (0.0, 40.0);
pub const ROTATION_RANGE_DEG: (f64, f64) = (0.0, 360.0);

/// Delay before a burst's particles are dropped
pub const CLEAR_DELAY_MS: u64 = 1100;

/// Longest a particle can stay on screen (max delay + max duration)
pub const MAX_PARTICLE_LIFETIME_MS: u64 = (DURATION_RANGE_MS.1 + DELAY_RANGE_MS.1) as u64;

/// Opacity is held at 1 until this fraction of the flight
const FADE_START: f64 = 0.6;

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    /// Linear blend towards `other`, `t` in `[0, 1]`
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

/// Burst palette: brand green, teal, brand blue, off-white
pub const PALETTE: [Rgb; 4] = [
    Rgb(0x27, 0xFF, 0x00),
    Rgb(0x33, 0xEE, 0xBB),
    Rgb(0x44, 0x9D, 0xDD),
    Rgb(0xE8, 0xE8, 0xE8),
];

/// One animated burst element
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: String,
    pub dx: f64,
    pub dy: f64,
    pub size: f64,
    pub duration_ms: f64,
    pub delay_ms: f64,
    pub color: Rgb,
    pub rotation_deg: f64,
}

/// Where a particle is drawn at some instant, relative to the burst origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleFrame {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub rotation_deg: f64,
    pub scale: f64,
    pub opacity: f64,
    pub color: Rgb,
}

impl Particle {
    /// Build the `index`-th particle of the burst identified by `burst_key`
    pub fn generate(burst_key: u64, index: usize, rng: &mut dyn RandomSource) -> Self {
        let angle = TAU * index as f64 / PARTICLE_COUNT as f64 + rng.range(0.0, ANGLE_JITTER);
        let distance = rng.range(DISTANCE_RANGE.0, DISTANCE_RANGE.1);
        let size = rng.range(SIZE_RANGE.0, SIZE_RANGE.1);
        let duration_ms = rng.range(DURATION_RANGE_MS.0, DURATION_RANGE_MS.1);
        let delay_ms = rng.range(DELAY_RANGE_MS.0, DELAY_RANGE_MS.1);
        let color = PALETTE[rng.index(PALETTE.len())];
        let rotation_deg = rng.range(ROTATION_RANGE_DEG.0, ROTATION_RANGE_DEG.1);

        Self {
            id: format!("{}-{}", burst_key, index),
            dx: angle.cos() * distance,
            dy: angle.sin() * distance,
            size,
            duration_ms,
            delay_ms,
            color,
            rotation_deg,
        }
    }

    /// Travel distance from the origin to the end of the flight
    pub fn distance(&self) -> f64 {
        self.dx.hypot(self.dy)
    }

    pub fn lifetime_ms(&self) -> f64 {
        self.delay_ms + self.duration_ms
    }

    /// Frame at `elapsed` since the burst started; `None` before the
    /// particle's delay has passed. Finished particles stay at their end
    /// position with zero opacity.
    pub fn sample(&self, elapsed: Duration) -> Option<ParticleFrame> {
        let elapsed_ms = elapsed.as_micros() as f64 / 1000.0;
        if elapsed_ms < self.delay_ms {
            return None;
        }
        let progress = if self.duration_ms > 0.0 {
            ((elapsed_ms - self.delay_ms) / self.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let travel = CubicBezier::BURST.ease(progress);
        let opacity = if progress <= FADE_START {
            1.0
        } else {
            1.0 - CubicBezier::BURST.ease((progress - FADE_START) / (1.0 - FADE_START))
        };

        Some(ParticleFrame {
            x: self.dx * travel,
            y: self.dy * travel,
            size: self.size,
            rotation_deg: self.rotation_deg + 180.0 * travel,
            scale: 1.0 - 0.3 * travel,
            opacity,
            color: self.color,
        })
    }
}

/// Soft flash over the submit control after a burst
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub delay_ms: u64,
    pub duration_ms: u64,
    pub peak_opacity: f64,
}

/// The ripple every burst plays
pub const RIPPLE: Ripple = Ripple {
    delay_ms: 60,
    duration_ms: 800,
    peak_opacity: 0.6,
};

impl Ripple {
    /// Peak is reached a quarter of the way through
    const PEAK_AT: f64 = 0.25;

    pub fn opacity(&self, elapsed: Duration) -> f64 {
        let elapsed_ms = elapsed.as_micros() as f64 / 1000.0;
        let start = self.delay_ms as f64;
        if elapsed_ms < start || self.duration_ms == 0 {
            return 0.0;
        }
        let progress = ((elapsed_ms - start) / self.duration_ms as f64).clamp(0.0, 1.0);
        if progress <= Self::PEAK_AT {
            self.peak_opacity * CubicBezier::EASE_OUT.ease(progress / Self::PEAK_AT)
        } else {
            let fade = (progress - Self::PEAK_AT) / (1.0 - Self::PEAK_AT);
            self.peak_opacity * (1.0 - CubicBezier::EASE_OUT.ease(fade))
        }
    }
}

/// Particles of the current burst plus the burst counter
#[derive(Debug, Default)]
pub struct BurstState {
    key: u64,
    particles: Vec<Particle>,
    started_at: Option<Instant>,
}

impl BurstState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the particle set with a fresh burst and return its key
    pub fn trigger(&mut self, rng: &mut dyn RandomSource) -> u64 {
        self.key += 1;
        let key = self.key;
        self.particles = (0..PARTICLE_COUNT)
            .map(|i| Particle::generate(key, i, rng))
            .collect();
        self.started_at = Some(Instant::now());
        key
    }

    /// Drop the particles of burst `key`. A newer burst is left alone.
    pub fn clear(&mut self, key: u64) -> bool {
        if key != self.key || self.particles.is_empty() {
            return false;
        }
        self.particles.clear();
        true
    }

    pub fn key(&self) -> u64 {
        self.key
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_active(&self) -> bool {
        !self.particles.is_empty()
    }

    /// Time since the latest burst was triggered
    pub fn elapsed(&self) -> Option<Duration> {
        self.started_at.map(|at| at.elapsed())
    }

    /// Frames of every particle visible at `elapsed`
    pub fn frames_at(&self, elapsed: Duration) -> Vec<ParticleFrame> {
        self.particles
            .iter()
            .filter_map(|p| p.sample(elapsed))
            .filter(|f| f.opacity > 0.0)
            .collect()
    }

    pub fn ripple_opacity(&self) -> f64 {
        self.elapsed().map(|e| RIPPLE.opacity(e)).unwrap_or(0.0)
    }
}
