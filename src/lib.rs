//! Tabular Q-learning for choosing among a small, fixed set of actions under uncertainty

/// Agent interface driven by training loops
pub mod agent;

/// Implemented RL algorithms
pub mod algo;

/// Environment
pub mod env;

/// Error types
pub mod error;

/// Exploration policies
pub mod exploration;

/// Transitions
pub mod memory;

/// Episode runner and training loop
pub mod train;

/// Testing environments
#[cfg(feature = "gym")]
pub mod gym;

mod util;

pub use error::{Error, Result};
