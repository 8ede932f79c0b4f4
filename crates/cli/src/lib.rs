//! Memolab CLI library
//!
//! Scenario loading, side-by-side replay and configuration for the
//! `memolab` binary.

pub mod config;
pub mod replay;
pub mod report;
pub mod scenario;

pub use config::MemolabConfig;
pub use replay::{replay, Invocation, ReplayOptions, ReplayReport, VariantReport, VariantSelection};
pub use scenario::{Event, EventKind, Scenario};
