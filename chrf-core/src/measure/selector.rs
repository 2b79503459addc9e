use super::ngram::{Ngram, NgramOrderSet};
use super::overlap::{ErrorResult, count_errors};
use super::stats::SentenceStats;

/// Returns the result with the lowest rate; on ties the first one wins.
fn lowest_rate(results: impl Iterator<Item = ErrorResult>) -> Option<ErrorResult> {
	results.min_by(|a, b| a.rate.total_cmp(&b.rate))
}

/// Picks the best reference for one order, separately for each direction.
///
/// Returns `(precision_error, recall_error)`. The two may come from
/// different references: each direction is minimized on its own.
pub fn select_order<'a, I>(hypothesis: &[Ngram], references: I) -> (ErrorResult, ErrorResult)
where
	I: IntoIterator<Item = &'a [Ngram]>,
	I::IntoIter: Clone,
{
	let references = references.into_iter();
	let precision = lowest_rate(references.clone().map(|r| count_errors(hypothesis, r)));
	let recall = lowest_rate(references.map(|r| count_errors(r, hypothesis)));
	(
		precision.unwrap_or_else(ErrorResult::empty),
		recall.unwrap_or_else(ErrorResult::empty),
	)
}

/// Scores one hypothesis against all of its references, for every order.
///
/// # Notes
/// - All order sets must have been extracted with the same `max_n`.
/// - With no references at all every order gets an empty result, so the
///   sentence adds nothing to corpus totals.
pub(crate) fn select_references(hypothesis: &NgramOrderSet, references: &[NgramOrderSet]) -> SentenceStats {
	let max_n = hypothesis.max_n();
	debug_assert!(references.iter().all(|r| r.max_n() == max_n), "reference order sets must use max_n {}", max_n);
	let mut precision = Vec::with_capacity(max_n);
	let mut recall = Vec::with_capacity(max_n);

	for i in 0..max_n {
		let (hyp_error, ref_error) = select_order(hypothesis.order(i), references.iter().map(|r| r.order(i)));
		precision.push(hyp_error);
		recall.push(ref_error);
	}

	SentenceStats::new(precision, recall)
}
