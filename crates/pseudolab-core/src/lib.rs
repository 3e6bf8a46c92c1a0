//! # pseudolab-core
//!
//! Classical digit-extraction pseudorandom generators, kept deterministic and
//! fully traceable so each step can be checked by hand.
//!
//! ## Quick Start
//!
//! ```
//! use pseudolab_core::{GenerationRequest, Method, generate};
//!
//! let request = GenerationRequest::new(Method::MiddleSquare { seed: 5115 }, 5).unwrap();
//! let result = generate(&request);
//!
//! assert_eq!(result.values[0], 0.1632);
//! for step in &result.steps {
//!     println!("{}: {} -> {} -> {:.4}", step.iteration, step.product, step.star, step.ri);
//! }
//! ```
//!
//! ## Architecture
//!
//! Request → Recurrence → (values, trace) → acceptance tests (`pseudolab-tests`)
//!
//! - [`generator`]: the three recurrences and their trace types.
//! - [`config`]: defaults, parameter checks and the JSON config file.
//! - [`export`]: the plain-text export format used by the CLI.
//! - [`error`]: the error type shared by every pseudolab crate.
//!
//! Nothing here is suitable for cryptographic use.

pub mod config;
pub mod error;
pub mod export;
pub mod generator;

pub use config::{
    DEFAULT_CONFIDENCE, DEFAULT_INTERVALS, LabConfig, check_confidence, check_intervals,
};
pub use error::{Error, Result};
pub use export::{format_timestamp, render_export, write_export};
pub use generator::{
    DEFAULT_COUNT, GenerationRequest, GenerationResult, GenerationStep, Method, MethodKind,
    StepInput, constant_multiplier, generate, middle_product, middle_square,
};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
