use std::collections::HashMap;

use serde::Serialize;

use super::ngram::Ngram;

/// Outcome of matching a candidate n-gram list against a target list.
///
/// `candidate_len` is the length used to normalize this direction's error
/// (hypothesis length for precision, reference length for recall).
///
/// # Invariants
/// - `count <= candidate_len`
/// - `missing.len() == count`, in candidate order
/// - `rate` is in `0.0..=100.0`
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ErrorResult {
	pub count: usize,
	pub rate: f64,
	pub missing: Vec<Ngram>,
	pub candidate_len: usize,
	pub target_len: usize,
}

impl ErrorResult {
	/// Result for a comparison that never happened (no references at all).
	/// Contributes nothing to the statistics.
	pub fn empty() -> Self {
		Self { count: 0, rate: 0.0, missing: Vec::new(), candidate_len: 0, target_len: 0 }
	}
}

/// Counts the candidate n-grams that find no partner in `target`.
///
/// Each target n-gram can be consumed by at most one candidate n-gram, so
/// the count only depends on the two multisets, not on their order.
///
/// An empty candidate has a rate of 100 against a non-empty target and of
/// 0 against an empty one.
pub fn count_errors(candidate: &[Ngram], target: &[Ngram]) -> ErrorResult {
	let mut remaining: HashMap<&Ngram, usize> = HashMap::with_capacity(target.len());
	for ngram in target {
		*remaining.entry(ngram).or_insert(0) += 1;
	}

	let mut missing = Vec::new();
	for ngram in candidate {
		match remaining.get_mut(ngram) {
			Some(left) if *left > 0 => *left -= 1,
			_ => missing.push(ngram.clone()),
		}
	}

	let count = missing.len();
	let rate = if !candidate.is_empty() {
		100.0 * count as f64 / candidate.len() as f64
	} else if !target.is_empty() {
		100.0
	} else {
		0.0
	};

	ErrorResult { count, rate, missing, candidate_len: candidate.len(), target_len: target.len() }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn grams(items: &[&str]) -> Vec<Ngram> {
		items.iter().map(|s| Ngram::from(*s)).collect()
	}

	#[test]
	fn identical_lists_have_no_errors() {
		let a = grams(&["a", "b", "a"]);
		let result = count_errors(&a, &a);
		assert_eq!(result.count, 0);
		assert_eq!(result.rate, 0.0);
		assert!(result.missing.is_empty());
		assert_eq!((result.candidate_len, result.target_len), (3, 3));
	}

	#[test]
	fn target_instances_are_consumed_once() {
		let candidate = grams(&["a", "a", "a"]);
		let target = grams(&["a", "b"]);
		let result = count_errors(&candidate, &target);
		assert_eq!(result.count, 2);
		assert_eq!(result.missing, grams(&["a", "a"]));
		assert!((result.rate - 200.0 / 3.0).abs() < 1e-12);
	}

	#[test]
	fn missing_keeps_encounter_order() {
		let candidate = grams(&["x", "a", "y", "z"]);
		let target = grams(&["a"]);
		let result = count_errors(&candidate, &target);
		assert_eq!(result.missing, grams(&["x", "y", "z"]));
		assert_eq!(result.rate, 75.0);
	}

	#[test]
	fn empty_candidate_edge_cases() {
		let empty: Vec<Ngram> = Vec::new();
		let target = grams(&["a"]);
		assert_eq!(count_errors(&empty, &target).rate, 100.0);
		assert_eq!(count_errors(&empty, &target).count, 0);
		assert_eq!(count_errors(&empty, &empty).rate, 0.0);
	}

	#[test]
	fn empty_target_misses_everything() {
		let candidate = grams(&["a", "b"]);
		let result = count_errors(&candidate, &[]);
		assert_eq!(result.count, 2);
		assert_eq!(result.rate, 100.0);
	}
}
