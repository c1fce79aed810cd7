//! Decorative feedback played when the form is submitted
//!
//! Everything here is pure computation over an injectable random source;
//! scheduling the clear timer is the widget's job.

pub mod burst;
pub mod easing;
pub mod random;

pub use burst::{BurstState, Particle, ParticleFrame, Ripple, Rgb, PALETTE, PARTICLE_COUNT, RIPPLE};
pub use easing::CubicBezier;
pub use random::{FastRandSource, RandomSource, SequenceSource};
