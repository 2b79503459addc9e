use serde::Serialize;

use super::config::Weights;
use super::stats::CorpusStats;

/// Precision, recall and F-beta for each n-gram order, in percent.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct NgramScores {
	pub precision: Vec<f64>,
	pub recall: Vec<f64>,
	pub f: Vec<f64>,
}

/// Weighted combination of [`NgramScores`] across orders.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct ChrfScore {
	pub precision: f64,
	pub recall: f64,
	pub f: f64,
}

/// `100 * (1 - err / len)`, or 0 when nothing was counted.
fn percent_matched(err: usize, len: usize) -> f64 {
	if len > 0 {
		100.0 - 100.0 * (err as f64 / len as f64)
	} else {
		0.0
	}
}

/// F-beta of one precision/recall pair; 0 when the denominator is not positive.
///
/// For `beta > 1` both sides are divided by `beta²` so that large betas stay finite.
pub fn f_beta(precision: f64, recall: f64, beta: f64) -> f64 {
	let factor = beta * beta;
	let (scale, divisor) = if factor > 1.0 {
		let inverse = 1.0 / factor;
		(inverse + 1.0, precision + inverse * recall)
	} else {
		(1.0 + factor, factor * precision + recall)
	};
	if divisor > 0.0 {
		scale * precision * recall / divisor
	} else {
		0.0
	}
}

/// Converts accumulated counts into per-order precision, recall and F-beta.
pub fn per_order_scores(stats: &CorpusStats, beta: f64) -> NgramScores {
	let precision: Vec<f64> = stats
		.hyp_err()
		.iter()
		.zip(stats.hyp_len())
		.map(|(err, len)| percent_matched(*err, *len))
		.collect();
	let recall: Vec<f64> = stats
		.ref_err()
		.iter()
		.zip(stats.ref_len())
		.map(|(err, len)| percent_matched(*err, *len))
		.collect();
	let f = precision.iter().zip(&recall).map(|(p, r)| f_beta(*p, *r, beta)).collect();

	NgramScores { precision, recall, f }
}

/// Weighted sum `Σ weight[i] * value[i]`.
pub fn aggregate(values: &[f64], weights: &[f64]) -> f64 {
	values.iter().zip(weights).map(|(v, w)| w * v).sum()
}

impl NgramScores {
	pub fn max_n(&self) -> usize {
		self.f.len()
	}

	/// Collapses the per-order scores into single chrF values.
	pub fn weighted(&self, weights: &Weights) -> ChrfScore {
		ChrfScore {
			precision: aggregate(&self.precision, weights.as_slice()),
			recall: aggregate(&self.recall, weights.as_slice()),
			f: aggregate(&self.f, weights.as_slice()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::measure::ngram::NgramOrderSet;
	use crate::measure::selector::select_references;

	fn corpus(pairs: &[(&str, &str)], max_n: usize) -> CorpusStats {
		let mut stats = CorpusStats::new(max_n);
		for (hyp, reference) in pairs {
			let refs = [NgramOrderSet::extract(reference, max_n, true)];
			stats.accumulate(&select_references(&NgramOrderSet::extract(hyp, max_n, true), &refs));
		}
		stats
	}

	#[test]
	fn f_beta_is_harmonic_mean_for_beta_one() {
		assert!((f_beta(50.0, 100.0, 1.0) - 200.0 / 3.0).abs() < 1e-12);
		assert_eq!(f_beta(0.0, 0.0, 1.0), 0.0);
	}

	#[test]
	fn huge_beta_tends_to_recall() {
		let f = f_beta(50.0, 80.0, 1e150);
		assert!(f.is_finite());
		assert!((f - 80.0).abs() < 1e-9);
		assert_eq!(f_beta(0.0, 80.0, 1e150), 0.0);
		assert_eq!(f_beta(0.0, 0.0, 1e150), 0.0);
	}

	#[test]
	fn larger_beta_favours_recall() {
		let recall_heavy = f_beta(40.0, 80.0, 3.0);
		let precision_heavy = f_beta(80.0, 40.0, 3.0);
		assert!(recall_heavy > precision_heavy);
	}

	#[test]
	fn unseen_orders_score_zero() {
		let scores = corpus(&[("a", "a")], 4).scores(1.0);
		assert_eq!(scores.precision, vec![100.0, 100.0, 0.0, 0.0]);
		assert_eq!(scores.f[3], 0.0);
	}

	#[test]
	fn partial_overlap() {
		// hyp "ab " / ref "ax ": 2 of 3 unigrams match in each direction
		let scores = corpus(&[("ab", "ax")], 1).scores(2.0);
		let expected = 100.0 - 100.0 * (1.0 / 3.0);
		assert!((scores.precision[0] - expected).abs() < 1e-12);
		assert!((scores.recall[0] - expected).abs() < 1e-12);
		assert!((scores.f[0] - expected).abs() < 1e-9);
	}

	#[test]
	fn aggregate_weights_each_order() {
		assert_eq!(aggregate(&[10.0, 20.0], &[0.25, 0.75]), 17.5);
		let weights = Weights::uniform(2);
		let score = NgramScores { precision: vec![100.0, 50.0], recall: vec![0.0, 50.0], f: vec![0.0, 50.0] }
			.weighted(&weights);
		assert_eq!(score, ChrfScore { precision: 75.0, recall: 25.0, f: 25.0 });
	}
}
