//! Character n-gram F-score (chrF) evaluation library.
//!
//! This crate provides a streaming chrF scorer including:
//! - Character n-gram extraction for every order up to `max_n`
//! - Multiset overlap counting and multi-reference selection
//! - Sentence and corpus level statistics with weighted F-beta aggregation
//! - Plain-text and SGML input adapters, and the classic text report
//!
//! The scoring engine lives in [`measure`]. Input adapters and report
//! formatting are thin layers around it.

/// Scoring engine: n-grams, error counting, statistics and scores.
pub mod measure;

/// Error type shared by the whole crate.
pub mod error;

/// Plain-text input helpers (line reading, reference splitting).
pub mod io;

/// SGML segment reading and hypothesis/reference pairing.
pub mod sgm;

/// Text report writers (sentence level, n-gram level and summary lines).
pub mod report;

pub use error::{ChrfError, Result, Side};
pub use measure::config::{EvalConfig, Weights};
pub use measure::evaluator::Evaluator;
pub use measure::score::{ChrfScore, NgramScores};
pub use measure::stats::{CorpusStats, SentenceStats};
