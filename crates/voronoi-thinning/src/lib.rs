#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// thinning configuration module.
pub mod config;

/// iterative thinning engine.
pub mod engine;

/// Error types for the thinning module.
pub mod error;

/// 8-neighborhood classification of pixels.
pub mod neighborhood;

/// module containing parallelization utilities.
pub mod parallel;

/// algorithm identifiers and their registry.
pub mod registry;

/// pixel removal rules of the thinning algorithms.
pub mod rules;

/// in-place and copy-on-write thinning entry points.
pub mod thin;

pub use crate::config::ThinningConfig;
pub use crate::engine::{ThinningEngine, ThinningReport, ThinningStatus};
pub use crate::error::ThinningError;
pub use crate::registry::{AlgorithmRegistry, RuleEvaluation, ThinningAlgorithm};
pub use crate::rules::AlgorithmVariant;
pub use crate::thin::{thin, Thinner, ThinningMode, ThinningOutput};
