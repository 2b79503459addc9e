use std::convert::Infallible;
use std::fmt;

use thiserror::Error;

/// Which input sequence ran out first when pairing hypotheses with references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
	Hypotheses,
	References,
}

impl fmt::Display for Side {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Side::Hypotheses => f.write_str("hypotheses"),
			Side::References => f.write_str("references"),
		}
	}
}

/// Errors raised while configuring or running an evaluation.
///
/// Degenerate inputs (empty lines, orders longer than a line) are not errors:
/// they have defined scores.
#[derive(Error, Debug)]
pub enum ChrfError {
	/// The hypothesis and reference sequences have different lengths.
	/// `row` is the 0-based index of the first row missing on `side`.
	#[error("Input {side} was too short. Row {row} (and later) missing.")]
	LengthMismatch { row: usize, side: Side },

	#[error("Invalid configuration: {0}")]
	Configuration(String),

	/// Two statistics objects built for different n-gram orders were combined.
	#[error("N-gram order mismatch: expected {expected}, found {found}")]
	OrderMismatch { expected: usize, found: usize },

	#[error("Invalid pattern: {0}")]
	Pattern(#[from] regex::Error),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

impl From<Infallible> for ChrfError {
	fn from(never: Infallible) -> Self {
		match never {}
	}
}

pub type Result<T> = std::result::Result<T, ChrfError>;
