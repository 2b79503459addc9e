//! Command-line arguments for `chrf`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use chrf_core::io::DEFAULT_REFERENCE_SEPARATOR;
use chrf_core::report::ReportOptions;
use chrf_core::{EvalConfig, Result};

/// Layout of the hypothesis and reference files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
	/// One sentence per line (default)
	Plain,
	/// WMT style SGML with <doc> and <seg> tags
	Sgm,
}

#[derive(Parser, Debug)]
#[command(name = "chrf")]
#[command(version)]
#[command(about = "Character n-gram F-score (chrF) for machine translation evaluation", long_about = None)]
#[command(after_help = "Simple usage example:\n\n  chrf -b 2.0 hyp.txt ref.txt > score")]
pub struct Cli {
	/// Plain-text hypothesis file
	pub hypothesis: PathBuf,

	/// Reference file. Can contain multiple alternatives, split by --reference-separator
	pub reference: PathBuf,

	/// N-gram order
	#[arg(short = 'n', long = "order", default_value_t = 6)]
	pub order: usize,

	/// Comma separated n-gram weights (default uniform 1/n)
	#[arg(short = 'w', long = "nweight", value_name = "WEIGHTS")]
	pub nweight: Option<String>,

	/// Balance parameter for f-measure
	#[arg(short = 'b', long = "beta", default_value_t = 1.0)]
	pub beta: f64,

	/// Do not consider spaces as characters
	#[arg(long = "ignore-space")]
	pub ignore_space: bool,

	/// Separator for multiple references
	#[arg(long = "reference-separator", value_name = "SEP", default_value = DEFAULT_REFERENCE_SEPARATOR)]
	pub reference_separator: String,

	/// Input format of both files
	#[arg(long = "input-format", value_enum, default_value = "plain")]
	pub input_format: InputFormat,

	/// Suppress precision and recall in summary
	#[arg(long = "hide-precrec")]
	pub hide_precrec: bool,

	/// Show n-gram level scores
	#[arg(long = "show-ngram")]
	pub show_ngram: bool,

	/// Show sentence level scores
	#[arg(long = "show-sentence")]
	pub show_sentence: bool,

	/// Show ngrams without a match. Requires --show-sentence
	#[arg(long = "show-missing")]
	pub show_missing: bool,

	/// Produce backwards compatible output
	#[arg(long = "compatible")]
	pub compatible: bool,

	/// Score the corpus on all CPUs (summary only)
	#[arg(long = "parallel", conflicts_with = "show_sentence")]
	pub parallel: bool,
}

impl Cli {
	/// Builds the validated evaluation parameters.
	pub fn eval_config(&self) -> Result<EvalConfig> {
		let mut config = EvalConfig::new(self.order, self.beta)?;
		if let Some(weights) = &self.nweight {
			config.set_weights_from_str(weights)?;
		}
		config.use_space = !self.ignore_space;
		Ok(config)
	}

	pub fn report_options(&self) -> ReportOptions {
		ReportOptions {
			sentence_level: self.show_sentence,
			ngram_level: self.show_ngram,
			print_missing: self.show_missing,
			compatible: self.compatible,
			hide_precrec: self.hide_precrec,
		}
	}
}
