use serde::Serialize;

use crate::error::{ChrfError, Result};

use super::overlap::ErrorResult;
use super::score::{NgramScores, per_order_scores};

/// Best error results of one sentence, per order and per direction.
///
/// Index `i` holds order `i + 1`. Precision errors compare the hypothesis
/// against its references, recall errors the references against the
/// hypothesis. This is the only level where missing n-grams are kept.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SentenceStats {
	precision: Vec<ErrorResult>,
	recall: Vec<ErrorResult>,
}

impl SentenceStats {
	/// Builds sentence statistics from per-order results.
	///
	/// Both vectors must have one entry per order.
	pub fn new(precision: Vec<ErrorResult>, recall: Vec<ErrorResult>) -> Self {
		debug_assert_eq!(precision.len(), recall.len());
		Self { precision, recall }
	}

	pub fn max_n(&self) -> usize {
		self.precision.len()
	}

	/// Hypothesis to reference errors, one per order.
	pub fn precision_errors(&self) -> &[ErrorResult] {
		&self.precision
	}

	/// Reference to hypothesis errors, one per order.
	pub fn recall_errors(&self) -> &[ErrorResult] {
		&self.recall
	}

	/// Per-order precision, recall and F-beta for this sentence alone.
	pub fn scores(&self, beta: f64) -> NgramScores {
		CorpusStats::from(self).scores(beta)
	}
}

/// Running per-order totals over all sentences seen so far.
///
/// # Responsibilities
/// - Sum error counts and normalization lengths, per order and direction
/// - Merge with partial totals computed elsewhere (e.g. on another thread)
///
/// # Invariants
/// - All vectors have exactly `max_n` entries
/// - `hyp_err[i] <= hyp_len[i]` and `ref_err[i] <= ref_len[i]`
/// - Totals only ever grow
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct CorpusStats {
	max_n: usize,
	sentences: usize,
	hyp_err: Vec<usize>,
	hyp_len: Vec<usize>,
	ref_err: Vec<usize>,
	ref_len: Vec<usize>,
}

impl CorpusStats {
	/// Creates all-zero totals for orders `1..=max_n`.
	pub fn new(max_n: usize) -> Self {
		Self {
			max_n,
			sentences: 0,
			hyp_err: vec![0; max_n],
			hyp_len: vec![0; max_n],
			ref_err: vec![0; max_n],
			ref_len: vec![0; max_n],
		}
	}

	/// Adds one sentence's best errors to the totals.
	///
	/// Only counts and lengths are kept; the missing n-gram lists are dropped.
	/// In both directions `candidate_len` is the normalization length.
	pub fn accumulate(&mut self, sentence: &SentenceStats) {
		debug_assert_eq!(self.max_n, sentence.max_n());
		for (i, (hyp, reference)) in sentence.precision.iter().zip(&sentence.recall).enumerate() {
			self.hyp_err[i] += hyp.count;
			self.hyp_len[i] += hyp.candidate_len;
			self.ref_err[i] += reference.count;
			self.ref_len[i] += reference.candidate_len;
		}
		self.sentences += 1;
	}

	/// Merges totals computed over another part of the corpus.
	///
	/// # Errors
	/// Returns an error if the two totals were built for different `max_n`.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.max_n != other.max_n {
			return Err(ChrfError::OrderMismatch { expected: self.max_n, found: other.max_n });
		}

		for i in 0..self.max_n {
			self.hyp_err[i] += other.hyp_err[i];
			self.hyp_len[i] += other.hyp_len[i];
			self.ref_err[i] += other.ref_err[i];
			self.ref_len[i] += other.ref_len[i];
		}
		self.sentences += other.sentences;

		Ok(())
	}

	pub fn max_n(&self) -> usize {
		self.max_n
	}

	/// Number of sentences folded in so far.
	pub fn sentences(&self) -> usize {
		self.sentences
	}

	pub fn hyp_err(&self) -> &[usize] {
		&self.hyp_err
	}

	pub fn hyp_len(&self) -> &[usize] {
		&self.hyp_len
	}

	pub fn ref_err(&self) -> &[usize] {
		&self.ref_err
	}

	pub fn ref_len(&self) -> &[usize] {
		&self.ref_len
	}

	/// Per-order precision, recall and F-beta of the totals.
	pub fn scores(&self, beta: f64) -> NgramScores {
		per_order_scores(self, beta)
	}
}

impl From<&SentenceStats> for CorpusStats {
	fn from(sentence: &SentenceStats) -> Self {
		let mut stats = CorpusStats::new(sentence.max_n());
		stats.accumulate(sentence);
		stats
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::measure::ngram::NgramOrderSet;
	use crate::measure::selector::select_references;

	fn sentence(hyp: &str, refs: &[&str], max_n: usize) -> SentenceStats {
		let refs: Vec<NgramOrderSet> = refs.iter().map(|r| NgramOrderSet::extract(r, max_n, true)).collect();
		select_references(&NgramOrderSet::extract(hyp, max_n, true), &refs)
	}

	#[test]
	fn accumulate_sums_counts_and_lengths() {
		let mut stats = CorpusStats::new(2);
		stats.accumulate(&sentence("ab", &["ax"], 2));
		stats.accumulate(&sentence("ab", &["ab"], 2));

		// "ab " vs "ax ": unigrams b/x miss, bigrams both miss
		assert_eq!(stats.hyp_err(), &[1, 2]);
		assert_eq!(stats.hyp_len(), &[6, 4]);
		assert_eq!(stats.ref_err(), &[1, 2]);
		assert_eq!(stats.ref_len(), &[6, 4]);
		assert_eq!(stats.sentences(), 2);
	}

	#[test]
	fn recall_length_comes_from_reference() {
		let stats = CorpusStats::from(&sentence("a", &["abcd"], 1));
		assert_eq!(stats.hyp_len(), &[2]);
		assert_eq!(stats.ref_len(), &[5]);
		assert_eq!(stats.ref_err(), &[3]);
	}

	#[test]
	fn merge_equals_sequential_accumulation() {
		let a = sentence("the cat", &["a cat"], 3);
		let b = sentence("dogs", &["the dog"], 3);

		let mut sequential = CorpusStats::new(3);
		sequential.accumulate(&a);
		sequential.accumulate(&b);

		let mut merged = CorpusStats::from(&b);
		merged.merge(&CorpusStats::from(&a)).unwrap();

		assert_eq!(merged, sequential);
	}

	#[test]
	fn merge_rejects_different_orders() {
		let mut stats = CorpusStats::new(2);
		let err = stats.merge(&CorpusStats::new(3)).unwrap_err();
		assert!(matches!(err, ChrfError::OrderMismatch { expected: 2, found: 3 }));
	}
}
