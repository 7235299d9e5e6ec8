//! ODYSSEY Random Walk
//!
//! Drives a system under test through randomly chosen, currently
//! applicable steps and records every execution so a failing walk can be
//! replayed exactly.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod history;
pub mod record;
pub mod registry;
pub mod select;
pub mod step;
pub mod walk;

pub use config::{Selection, WalkConfig};
pub use history::{History, HistoryEntry};
pub use record::{RecordedStep, WalkComparison, WalkDelta, WalkRecord};
pub use registry::{Registration, StepRegistry};
pub use select::Selector;
pub use step::{DEFAULT_WEIGHT, FnStep, Step, normalize_weight};
pub use walk::RandomWalk;

pub use odyssey_core::{Params, SeedSource, StepError, StepResult, WalkError, WalkResult, WalkSeed};
