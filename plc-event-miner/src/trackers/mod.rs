//! Stateful change detectors
//!
//! Each tracker owns the per-key state of one mining pass and turns a
//! sequence of observations into events. Keys are column indices for
//! readings and `direction + register` for commands.

pub mod boolean;
pub mod command;
pub mod scalar;

pub use boolean::BooleanChangeTracker;
pub use command::CommandChangeTracker;
pub use scalar::{ScalarTrendTracker, TrendState};
