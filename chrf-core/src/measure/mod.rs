//! Top-level module for the chrF scoring engine.
//!
//! Components, leaf-first:
//! - Character n-gram extraction (`ngram`)
//! - Multiset overlap counting between two n-gram lists (`overlap`)
//! - Best-reference selection per order and direction (`selector`)
//! - Sentence and corpus statistics (`stats`)
//! - Per-order and weighted precision/recall/F (`score`)
//! - Validated evaluation parameters (`config`)
//! - The streaming evaluation driver (`evaluator`)

/// Character n-grams and per-line n-gram order sets.
pub mod ngram;

/// Unmatched n-gram counting with multiset semantics.
pub mod overlap;

/// Independent best-reference selection for precision and recall.
pub mod selector;

/// Per-sentence results and running corpus totals.
pub mod stats;

/// Precision, recall and F-beta per order, and weighted aggregation.
pub mod score;

/// Evaluation parameters and the normalized n-gram weight vector.
pub mod config;

/// Streaming (and optionally parallel) evaluation over sentence pairs.
pub mod evaluator;
