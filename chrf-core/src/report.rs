//! Text reports in the classic chrF layout.
//!
//! Sentence-level lines are prefixed with the 1-based line number and `::`,
//! summary lines have no prefix. All scores are printed with 4 decimals.

use std::io::{self, Write};

use crate::measure::config::EvalConfig;
use crate::measure::ngram::Ngram;
use crate::measure::score::NgramScores;
use crate::measure::stats::{CorpusStats, SentenceStats};

/// What to print besides the corpus summary.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReportOptions {
	/// Per-sentence chrF, precision and recall.
	pub sentence_level: bool,
	/// Per-order F, precision and recall (for sentences and the summary).
	pub ngram_level: bool,
	/// Unmatched n-grams of every sentence; needs `sentence_level`.
	pub print_missing: bool,
	/// Legacy n-gram escaping for the missing n-gram lines.
	pub compatible: bool,
	/// No precision and recall lines in the summary.
	pub hide_precrec: bool,
}

/// Prints beta the way a decimal literal reads: `1.0`, `2.0`, `0.5`.
///
/// Outside `[1e-4, 1e16)` it switches to exponent form with a signed,
/// at least two digit exponent: `1e-05`, `2.5e+20`.
pub fn format_beta(beta: f64) -> String {
	let magnitude = beta.abs();
	if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
		let scientific = format!("{:e}", beta);
		return match scientific.split_once('e') {
			Some((mantissa, exponent)) => match exponent.strip_prefix('-') {
				Some(digits) => format!("{}e-{:0>2}", mantissa, digits),
				None => format!("{}e+{:0>2}", mantissa, exponent),
			},
			None => scientific,
		};
	}
	if beta.fract() == 0.0 {
		format!("{:.1}", beta)
	} else {
		format!("{}", beta)
	}
}

/// Renders an n-gram for the missing n-gram lines.
///
/// In compatible mode characters are joined with `==` and spaces become `=`.
pub fn format_ngram(ngram: &Ngram, compatible: bool) -> String {
	if !compatible {
		return ngram.as_str().to_owned();
	}
	ngram
		.as_str()
		.chars()
		.map(|c| c.to_string())
		.collect::<Vec<_>>()
		.join("==")
		.replace(' ', "=")
}

/// Writes `"<line>::<side>-<n>grams: "` followed by the unmatched n-grams.
pub fn write_missing<W: Write>(
	out: &mut W,
	line_n: usize,
	side: &str,
	order_index: usize,
	missing: &[Ngram],
	compatible: bool,
) -> io::Result<()> {
	let rendered: Vec<String> = missing.iter().map(|ngram| format_ngram(ngram, compatible)).collect();
	write!(out, "{}::{}-{}grams: {}", line_n, side, order_index + 1, rendered.join(" "))?;
	if compatible {
		write!(out, " ")?;
	}
	writeln!(out)
}

fn write_ngram_scores<W: Write>(out: &mut W, prefix: &str, scores: &NgramScores) -> io::Result<()> {
	for i in 0..scores.max_n() {
		writeln!(out, "{}{}gram-{:<6}{:.4}", prefix, i + 1, "F", scores.f[i])?;
		writeln!(out, "{}{}gram-{:<6}{:.4}", prefix, i + 1, "Prec", scores.precision[i])?;
		writeln!(out, "{}{}gram-{:<6}{:.4}", prefix, i + 1, "Rec", scores.recall[i])?;
	}
	Ok(())
}

/// Writes everything requested for one sentence.
///
/// Order: missing reference n-grams, missing hypothesis n-grams, per-order
/// scores, then the weighted sentence scores.
pub fn write_sentence<W: Write>(
	out: &mut W,
	line_n: usize,
	stats: &SentenceStats,
	config: &EvalConfig,
	options: &ReportOptions,
) -> io::Result<()> {
	if options.print_missing {
		for (i, error) in stats.recall_errors().iter().enumerate() {
			write_missing(out, line_n, "ref", i, &error.missing, options.compatible)?;
		}
		for (i, error) in stats.precision_errors().iter().enumerate() {
			write_missing(out, line_n, "hyp", i, &error.missing, options.compatible)?;
		}
	}

	let scores = stats.scores(config.beta());
	let prefix = format!("{}::", line_n);
	if options.ngram_level {
		write_ngram_scores(out, &prefix, &scores)?;
	}

	if options.sentence_level {
		let score = scores.weighted(config.weights());
		writeln!(out, "{}chrF-{}\t{:.4}", prefix, format_beta(config.beta()), score.f)?;
		writeln!(out, "{}chrPrec\t{:.4}", prefix, score.precision)?;
		writeln!(out, "{}chrRec\t{:.4}", prefix, score.recall)?;
	}
	Ok(())
}

/// Writes the corpus summary.
pub fn write_summary<W: Write>(
	out: &mut W,
	stats: &CorpusStats,
	config: &EvalConfig,
	options: &ReportOptions,
) -> io::Result<()> {
	let scores = stats.scores(config.beta());
	if options.ngram_level {
		write_ngram_scores(out, "", &scores)?;
	}

	let score = scores.weighted(config.weights());
	writeln!(out, "chrF-{}\t{:.4}", format_beta(config.beta()), score.f)?;
	if !options.hide_precrec {
		writeln!(out, "chrPrec\t{:.4}", score.precision)?;
		writeln!(out, "chrRec\t{:.4}", score.recall)?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::measure::evaluator::Evaluator;

	fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
		let mut out = Vec::new();
		f(&mut out).unwrap();
		String::from_utf8(out).unwrap()
	}

	#[test]
	fn beta_prints_like_a_float() {
		assert_eq!(format_beta(1.0), "1.0");
		assert_eq!(format_beta(3.0), "3.0");
		assert_eq!(format_beta(0.5), "0.5");
		assert_eq!(format_beta(0.0001), "0.0001");
		assert_eq!(format_beta(123456.0), "123456.0");
	}

	#[test]
	fn extreme_betas_use_exponent_form() {
		assert_eq!(format_beta(1e-5), "1e-05");
		assert_eq!(format_beta(1.5e-5), "1.5e-05");
		assert_eq!(format_beta(1e16), "1e+16");
		assert_eq!(format_beta(2.5e20), "2.5e+20");
		assert_eq!(format_beta(1e-100), "1e-100");
	}

	#[test]
	fn compatible_ngram_escaping() {
		assert_eq!(format_ngram(&Ngram::from("a b"), true), "a=====b");
		assert_eq!(format_ngram(&Ngram::from("ab"), true), "a==b");
		assert_eq!(format_ngram(&Ngram::from("a b"), false), "a b");
	}

	#[test]
	fn missing_line_layout() {
		let missing = vec![Ngram::from("x "), Ngram::from("yz")];
		let plain = render(|out| write_missing(out, 3, "hyp", 1, &missing, false));
		assert_eq!(plain, "3::hyp-2grams: x  yz\n");
		let compatible = render(|out| write_missing(out, 3, "hyp", 1, &missing, true));
		assert_eq!(compatible, "3::hyp-2grams: x=== y==z \n");
	}

	#[test]
	fn summary_layout() {
		let config = EvalConfig::new(1, 1.0).unwrap();
		let eval = Evaluator::new(config.clone());
		let stats = eval.evaluate(["the cat"], [["the cat"]]).unwrap();

		let text = render(|out| write_summary(out, &stats, &config, &ReportOptions::default()));
		assert_eq!(text, "chrF-1.0\t100.0000\nchrPrec\t100.0000\nchrRec\t100.0000\n");

		let options = ReportOptions { ngram_level: true, hide_precrec: true, ..Default::default() };
		let text = render(|out| write_summary(out, &stats, &config, &options));
		assert_eq!(text, "1gram-F     100.0000\n1gram-Prec  100.0000\n1gram-Rec   100.0000\nchrF-1.0\t100.0000\n");
	}

	#[test]
	fn sentence_layout() {
		let config = EvalConfig::new(1, 2.0).unwrap();
		let eval = Evaluator::new(config.clone());
		let stats = eval.score_sentence("ab", ["ax"]);
		let options = ReportOptions { sentence_level: true, print_missing: true, ..Default::default() };

		let text = render(|out| write_sentence(out, 1, &stats, &config, &options));
		let lines: Vec<&str> = text.lines().collect();
		assert_eq!(lines[0], "1::ref-1grams: x");
		assert_eq!(lines[1], "1::hyp-1grams: b");
		assert_eq!(lines[2], "1::chrF-2.0\t66.6667");
		assert_eq!(lines[3], "1::chrPrec\t66.6667");
		assert_eq!(lines[4], "1::chrRec\t66.6667");
	}
}
