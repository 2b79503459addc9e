use std::error::Error;
use std::io::{self, BufWriter, Write};
use std::process;

use clap::Parser;
use log::warn;

use chrf_core::io::{read_lines, read_reference_groups};
use chrf_core::report::{ReportOptions, write_sentence, write_summary};
use chrf_core::sgm::{SgmParser, pair_segments};
use chrf_core::{CorpusStats, EvalConfig, Evaluator, SentenceStats};

mod cli;

use cli::{Cli, InputFormat};

/// Builds the per-sentence callback: prints the sentence report when asked.
fn sentence_reporter<'a, W: Write>(
	out: &'a mut W,
	config: &'a EvalConfig,
	options: &'a ReportOptions,
) -> impl FnMut(usize, &SentenceStats) -> chrf_core::Result<()> + 'a {
	move |row: usize, stats: &SentenceStats| {
		if options.sentence_level {
			write_sentence(out, row + 1, stats, config, options)?;
		}
		Ok(())
	}
}

fn evaluate_plain<W: Write>(cli: &Cli, evaluator: &Evaluator, out: &mut W) -> Result<CorpusStats, Box<dyn Error>> {
	let hyps = read_lines(&cli.hypothesis)?;
	let refs = read_reference_groups(&cli.reference, &cli.reference_separator)?;

	if cli.parallel {
		let hyps = hyps.collect::<io::Result<Vec<String>>>()?;
		let refs = refs.collect::<io::Result<Vec<Vec<String>>>>()?;
		return Ok(evaluator.evaluate_parallel(&hyps, &refs)?);
	}

	let options = cli.report_options();
	let report = sentence_reporter(out, evaluator.config(), &options);
	Ok(evaluator.try_evaluate_with(hyps, refs, report)?)
}

fn evaluate_sgm<W: Write>(cli: &Cli, evaluator: &Evaluator, out: &mut W) -> Result<CorpusStats, Box<dyn Error>> {
	let parser = SgmParser::new()?;
	let index = parser.index_references(read_lines(&cli.reference)?)?;
	let pairs = pair_segments(parser.segments(read_lines(&cli.hypothesis)?), &index);

	if cli.parallel {
		let (hyps, refs): (Vec<String>, Vec<Vec<String>>) = pairs.collect::<io::Result<Vec<_>>>()?.into_iter().unzip();
		return Ok(evaluator.evaluate_parallel(&hyps, &refs)?);
	}

	let options = cli.report_options();
	let report = sentence_reporter(out, evaluator.config(), &options);
	Ok(evaluator.try_evaluate_pairs_with(pairs, report)?)
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
	let evaluator = Evaluator::new(cli.eval_config()?);
	if cli.show_missing && !cli.show_sentence {
		warn!("--show-missing has no effect without --show-sentence");
	}

	let stdout = io::stdout();
	let mut out = BufWriter::new(stdout.lock());

	let stats = match cli.input_format {
		InputFormat::Plain => evaluate_plain(cli, &evaluator, &mut out)?,
		InputFormat::Sgm => evaluate_sgm(cli, &evaluator, &mut out)?,
	};

	write_summary(&mut out, &stats, evaluator.config(), &cli.report_options())?;
	out.flush()?;
	Ok(())
}

fn main() {
	env_logger::init();
	let cli = Cli::parse();

	if let Err(e) = run(&cli) {
		eprintln!("chrf: {}", e);
		process::exit(1);
	}
}
