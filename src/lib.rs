//! Deterministic, rule-based clinical scoring.
//!
//! Raw findings are normalized into typed [`types::findings::Findings`], every
//! score system is evaluated in parallel and the outcomes are merged into a
//! [`ScoreReport`] with a templated summary and ranked tool recommendations.

pub mod batch;
pub mod calculators;
pub mod config;
pub mod engine;
pub mod error;
pub mod i18n;
pub mod normalize;
pub mod recommend;
pub mod report;
pub mod types;

pub use engine::{evaluate, Engine};
pub use error::{Result, ScoreDocError};
pub use normalize::{normalize, Normalizer};
pub use types::report::{Locale, Request, ScoreReport};
pub use types::score::{ScoreResult, ScoreSystemId};
