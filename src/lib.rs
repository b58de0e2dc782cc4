//! Request priority calculator.
//!
//! Modular structure:
//! - [`scoring`] — Rating tables, weights, threshold ladder, priority scorer
//! - [`reference`] — Read-only workload lookup from a CSV source
//! - [`config`] — JSON configuration
//! - [`error`] — Error kinds
//! - [`logging`] — Structured logging

pub mod config;
pub mod error;
pub mod logging;
pub mod reference;
pub mod scoring;

pub use config::CalculatorConfig;
pub use error::{Field, PriorityError, Result};
pub use logging::StructuredLogger;
pub use reference::{ReferenceDataLookup, ReferenceSource};
pub use scoring::{PriorityRequest, PriorityScorer, ScoreBreakdown, ScoringProfile};
