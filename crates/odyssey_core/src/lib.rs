//! ODYSSEY Core Types
//!
//! Pure types shared by the walk engine: the error taxonomy, the opaque
//! parameter bag handed to steps, and seeds for reproducible selection.
//! The `telemetry` feature adds a `tracing-subscriber` setup for test
//! harnesses.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod params;
pub mod seed;
#[cfg(feature = "telemetry")]
pub mod telemetry;

// Re-exports
pub use error::{StepError, StepResult, WalkError, WalkResult};
pub use params::Params;
pub use seed::{SeedSource, WalkSeed, SEED_ENV_VAR};
#[cfg(feature = "telemetry")]
pub use telemetry::init_tracing;
