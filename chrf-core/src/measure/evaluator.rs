use std::convert::Infallible;
use std::sync::mpsc;
use std::thread;

use log::{debug, info, warn};

use crate::error::{ChrfError, Result, Side};

use super::config::EvalConfig;
use super::ngram::NgramOrderSet;
use super::score::ChrfScore;
use super::selector::select_references;
use super::stats::{CorpusStats, SentenceStats};

/// Chunks per CPU for parallel evaluation.
const CHUNK_FACTOR: usize = 8;

/// Walks hypotheses and reference groups in lockstep.
///
/// Yields `(row, hypothesis, references)` and fails on the first row where
/// one side has run out. Nothing is buffered ahead.
struct Paired<H, R> {
	hyps: H,
	refs: R,
	row: usize,
	done: bool,
}

impl<H, R> Paired<H, R> {
	fn new(hyps: H, refs: R) -> Self {
		Self { hyps, refs, row: 0, done: false }
	}
}

impl<H, R, S, G, E> Iterator for Paired<H, R>
where
	H: Iterator<Item = std::result::Result<S, E>>,
	R: Iterator<Item = std::result::Result<G, E>>,
	ChrfError: From<E>,
{
	type Item = Result<(usize, S, G)>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}

		let row = self.row;
		let item = match (self.hyps.next(), self.refs.next()) {
			(None, None) => {
				self.done = true;
				return None;
			}
			(Some(Ok(hyp)), Some(Ok(refs))) => Ok((row, hyp, refs)),
			(Some(Err(e)), _) | (_, Some(Err(e))) => Err(ChrfError::from(e)),
			(None, Some(_)) => Err(ChrfError::LengthMismatch { row, side: Side::Hypotheses }),
			(Some(_), None) => Err(ChrfError::LengthMismatch { row, side: Side::References }),
		};

		self.row += 1;
		self.done = item.is_err();
		Some(item)
	}
}

/// Streaming chrF evaluation driver.
///
/// # Responsibilities
/// - Pair hypotheses with their reference groups, one sentence at a time
/// - Score each sentence and fold it into the corpus totals
/// - Hand every sentence's statistics to the caller before dropping them
///
/// The evaluator holds no state between runs: each call owns its own
/// [`CorpusStats`].
#[derive(Clone, Debug, Default)]
pub struct Evaluator {
	config: EvalConfig,
}

impl Evaluator {
	pub fn new(config: EvalConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &EvalConfig {
		&self.config
	}

	/// Scores one hypothesis against its alternative references.
	///
	/// An empty reference group is tolerated: the sentence then adds nothing
	/// to the totals.
	pub fn score_sentence<I>(&self, hypothesis: &str, references: I) -> SentenceStats
	where
		I: IntoIterator,
		I::Item: AsRef<str>,
	{
		let max_n = self.config.max_n();
		let use_space = self.config.use_space;

		let hyp_ngrams = NgramOrderSet::extract(hypothesis, max_n, use_space);
		let ref_ngrams: Vec<NgramOrderSet> = references
			.into_iter()
			.map(|r| NgramOrderSet::extract(r.as_ref(), max_n, use_space))
			.collect();
		if ref_ngrams.is_empty() {
			warn!("No reference for hypothesis {:?}, sentence ignored", hypothesis);
		}

		select_references(&hyp_ngrams, &ref_ngrams)
	}

	/// Evaluates a whole corpus and returns its totals.
	pub fn evaluate<H, R>(&self, hyps: H, refs: R) -> Result<CorpusStats>
	where
		H: IntoIterator,
		H::Item: AsRef<str>,
		R: IntoIterator,
		R::Item: IntoIterator,
		<R::Item as IntoIterator>::Item: AsRef<str>,
	{
		self.evaluate_with(hyps, refs, |_, _| Ok(()))
	}

	/// Like [`Evaluator::evaluate`], calling `on_sentence` with the 0-based
	/// row and the statistics of every sentence as soon as it is scored.
	///
	/// # Errors
	/// - `LengthMismatch` as soon as one input runs out before the other
	/// - any error returned by `on_sentence`, which stops the run
	pub fn evaluate_with<H, R, F>(&self, hyps: H, refs: R, on_sentence: F) -> Result<CorpusStats>
	where
		H: IntoIterator,
		H::Item: AsRef<str>,
		R: IntoIterator,
		R::Item: IntoIterator,
		<R::Item as IntoIterator>::Item: AsRef<str>,
		F: FnMut(usize, &SentenceStats) -> Result<()>,
	{
		self.try_evaluate_with(
			hyps.into_iter().map(Ok::<_, Infallible>),
			refs.into_iter().map(Ok::<_, Infallible>),
			on_sentence,
		)
	}

	/// Same as [`Evaluator::evaluate_with`] for inputs that may fail while
	/// being read (e.g. lines of a file). The first input error ends the run.
	pub fn try_evaluate_with<H, R, S, G, E, F>(&self, hyps: H, refs: R, on_sentence: F) -> Result<CorpusStats>
	where
		H: IntoIterator<Item = std::result::Result<S, E>>,
		R: IntoIterator<Item = std::result::Result<G, E>>,
		S: AsRef<str>,
		G: IntoIterator,
		G::Item: AsRef<str>,
		ChrfError: From<E>,
		F: FnMut(usize, &SentenceStats) -> Result<()>,
	{
		let pairs = Paired::new(hyps.into_iter(), refs.into_iter());
		self.evaluate_pairs(pairs, on_sentence)
	}

	/// Evaluates sentences that arrive already paired with their references,
	/// e.g. SGML segments matched by document and segment id.
	pub fn try_evaluate_pairs_with<P, S, G, E, F>(&self, pairs: P, on_sentence: F) -> Result<CorpusStats>
	where
		P: IntoIterator<Item = std::result::Result<(S, G), E>>,
		S: AsRef<str>,
		G: IntoIterator,
		G::Item: AsRef<str>,
		ChrfError: From<E>,
		F: FnMut(usize, &SentenceStats) -> Result<()>,
	{
		let pairs = pairs
			.into_iter()
			.enumerate()
			.map(|(row, pair)| pair.map(|(hyp, refs)| (row, hyp, refs)).map_err(ChrfError::from));
		self.evaluate_pairs(pairs, on_sentence)
	}

	fn evaluate_pairs<P, S, G, F>(&self, pairs: P, mut on_sentence: F) -> Result<CorpusStats>
	where
		P: Iterator<Item = Result<(usize, S, G)>>,
		S: AsRef<str>,
		G: IntoIterator,
		G::Item: AsRef<str>,
		F: FnMut(usize, &SentenceStats) -> Result<()>,
	{
		let mut stats = CorpusStats::new(self.config.max_n());

		for pair in pairs {
			let (row, hyp, refs) = pair?;
			let sentence = self.score_sentence(hyp.as_ref(), refs);
			debug!(
				"Row {}: {} precision / {} recall unigram errors",
				row,
				sentence.precision_errors().first().map_or(0, |e| e.count),
				sentence.recall_errors().first().map_or(0, |e| e.count),
			);
			stats.accumulate(&sentence);
			on_sentence(row, &sentence)?;
		}

		info!("Scored {} sentences, chrF = {:.4}", stats.sentences(), self.summarize(&stats).f);
		Ok(stats)
	}

	/// Evaluates an in-memory corpus on several threads.
	///
	/// Gives the same totals as [`Evaluator::evaluate`].
	///
	/// # Behavior
	/// - Checks both lengths first.
	/// - Splits the pairs into chunks (based on CPU cores * factor).
	/// - Scores each chunk on its own thread into partial totals.
	/// - Merges the partial totals received over a channel.
	pub fn evaluate_parallel<S, G, T>(&self, hyps: &[S], refs: &[G]) -> Result<CorpusStats>
	where
		S: AsRef<str> + Sync,
		G: AsRef<[T]> + Sync,
		T: AsRef<str> + Sync,
	{
		if hyps.len() != refs.len() {
			let row = hyps.len().min(refs.len());
			let side = if hyps.len() < refs.len() { Side::Hypotheses } else { Side::References };
			return Err(ChrfError::LengthMismatch { row, side });
		}

		let max_n = self.config.max_n();
		let mut stats = CorpusStats::new(max_n);
		if hyps.is_empty() {
			return Ok(stats);
		}

		let chunks = num_cpus::get() * CHUNK_FACTOR;
		let chunk_size = hyps.len().div_ceil(chunks);

		let (tx, rx) = mpsc::channel();
		thread::scope(|scope| {
			for (hyp_chunk, ref_chunk) in hyps.chunks(chunk_size).zip(refs.chunks(chunk_size)) {
				let tx = tx.clone();
				scope.spawn(move || {
					let mut partial = CorpusStats::new(max_n);
					for (hyp, group) in hyp_chunk.iter().zip(ref_chunk) {
						let group: &[T] = group.as_ref();
						partial.accumulate(&self.score_sentence(hyp.as_ref(), group));
					}
					// The receiver outlives the scope
					let _ = tx.send(partial);
				});
			}
		});
		drop(tx);

		for partial in rx.iter() {
			stats.merge(&partial)?;
		}

		info!("Scored {} sentences in parallel, chrF = {:.4}", stats.sentences(), self.summarize(&stats).f);
		Ok(stats)
	}

	/// Weighted precision, recall and chrF-beta of some totals.
	pub fn summarize(&self, stats: &CorpusStats) -> ChrfScore {
		stats.scores(self.config.beta()).weighted(self.config.weights())
	}
}
