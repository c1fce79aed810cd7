//! Together Learning contact widget core
//!
//! UI-agnostic pieces of the contact form: field state, the submission
//! status machine, the particle burst, and the transport that posts to
//! `/api/contact`. Front ends render [`ContactWidget`] and feed it input.

pub mod api;
pub mod effects;
pub mod form;
pub mod status;
pub mod utils;
pub mod widget;

pub use api::{ContactTransport, HttpTransport};
pub use effects::{BurstState, FastRandSource, Particle, ParticleFrame, RandomSource, Rgb};
pub use form::{FieldIssue, FormField, FormValues, InputKind};
pub use status::SubmissionStatus;
pub use utils::config::WidgetConfig;
pub use utils::error::{ConfigError, SubmissionError};
pub use widget::{ContactWidget, WidgetEvent};
