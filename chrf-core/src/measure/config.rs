use serde::{Deserialize, Serialize};

use crate::error::{ChrfError, Result};

/// Default n-gram order ceiling.
pub const DEFAULT_MAX_N: usize = 6;

/// Default F-measure balance.
pub const DEFAULT_BETA: f64 = 1.0;

/// Largest accepted n-gram order. Every per-order table is allocated up front.
pub const MAX_ORDER: usize = 64;

/// Per-order weights used to combine scores across n-gram orders.
///
/// # Invariants
/// - One weight per order
/// - Every weight is finite and non-negative, and they sum to 1.0
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(transparent)]
pub struct Weights(Vec<f64>);

impl Weights {
	/// `1 / max_n` for every order.
	///
	/// `max_n` is not checked here; [`EvalConfig::new`] bounds it by [`MAX_ORDER`].
	pub fn uniform(max_n: usize) -> Self {
		Self(vec![1.0 / max_n as f64; max_n])
	}

	/// Normalizes raw weights so that they sum to 1.0.
	///
	/// # Errors
	/// Returns an error if there is not exactly one weight per order, if a
	/// weight is negative or not finite, or if the weights sum to zero or
	/// overflow.
	pub fn normalized(raw: Vec<f64>, max_n: usize) -> Result<Self> {
		if raw.len() != max_n {
			return Err(ChrfError::Configuration(format!(
				"expected {} n-gram weights, got {}",
				max_n,
				raw.len()
			)));
		}
		if let Some(bad) = raw.iter().find(|w| !w.is_finite() || **w < 0.0) {
			return Err(ChrfError::Configuration(format!("n-gram weight {} is not a non-negative number", bad)));
		}

		let sum: f64 = raw.iter().sum();
		if sum <= 0.0 {
			return Err(ChrfError::Configuration("n-gram weights sum to zero".to_owned()));
		}
		if !sum.is_finite() {
			return Err(ChrfError::Configuration("n-gram weights sum to infinity".to_owned()));
		}

		Ok(Self(raw.into_iter().map(|w| w / sum).collect()))
	}

	/// Parses a comma separated list such as `"1,2,1"` and normalizes it.
	pub fn parse(list: &str, max_n: usize) -> Result<Self> {
		let raw = list
			.split(',')
			.map(|w| {
				w.trim()
					.parse::<f64>()
					.map_err(|_| ChrfError::Configuration(format!("invalid n-gram weight '{}'", w.trim())))
			})
			.collect::<Result<Vec<f64>>>()?;
		Self::normalized(raw, max_n)
	}

	pub fn as_slice(&self) -> &[f64] {
		&self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// Optional evaluation parameters as they arrive from outside (JSON, query).
///
/// Missing fields take the defaults of [`EvalConfig::default`].
#[derive(Deserialize, Default, Debug)]
pub struct ConfigParams {
	pub max_n: Option<usize>,
	pub beta: Option<f64>,
	pub weights: Option<Vec<f64>>,
	pub use_space: Option<bool>,
}

/// Parameters of one evaluation run.
///
/// # Responsibilities
/// - Validate the order ceiling and F-beta balance
/// - Keep a normalized weight vector matching `max_n`
///
/// # Invariants
/// - `1 <= max_n <= MAX_ORDER`
/// - `beta` and `beta²` are finite, `beta` is strictly positive
/// - `weights.len() == max_n`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(try_from = "ConfigParams")]
pub struct EvalConfig {
	max_n: usize,
	beta: f64,
	weights: Weights,

	/// Whether spaces count as scoreable characters.
	pub use_space: bool,
}

impl EvalConfig {
	/// Creates a configuration with uniform weights and spaces enabled.
	///
	/// # Errors
	/// Returns an error if `max_n` is outside `1..=MAX_ORDER` or `beta` is not
	/// a positive number.
	pub fn new(max_n: usize, beta: f64) -> Result<Self> {
		if max_n < 1 {
			return Err(ChrfError::Configuration("n-gram order must be >= 1".to_owned()));
		}
		if max_n > MAX_ORDER {
			return Err(ChrfError::Configuration(format!("n-gram order must be <= {}, got {}", MAX_ORDER, max_n)));
		}
		let mut config = Self { max_n, beta: DEFAULT_BETA, weights: Weights::uniform(max_n), use_space: true };
		config.set_beta(beta)?;
		Ok(config)
	}

	pub fn max_n(&self) -> usize {
		self.max_n
	}

	pub fn beta(&self) -> f64 {
		self.beta
	}

	pub fn weights(&self) -> &Weights {
		&self.weights
	}

	/// Sets the F-measure balance.
	///
	/// # Errors
	/// Returns an error if `beta` is not strictly positive, or if it or its
	/// square is not finite.
	pub fn set_beta(&mut self, beta: f64) -> Result<()> {
		if !beta.is_finite() || beta <= 0.0 {
			return Err(ChrfError::Configuration(format!("beta must be > 0, got {}", beta)));
		}
		if !(beta * beta).is_finite() {
			return Err(ChrfError::Configuration(format!("beta {} is too large", beta)));
		}
		self.beta = beta;
		Ok(())
	}

	/// Replaces the weights with `raw`, normalized to sum to 1.0.
	pub fn set_weights(&mut self, raw: Vec<f64>) -> Result<()> {
		self.weights = Weights::normalized(raw, self.max_n)?;
		Ok(())
	}

	/// Same as [`EvalConfig::set_weights`] from a comma separated list.
	pub fn set_weights_from_str(&mut self, list: &str) -> Result<()> {
		self.weights = Weights::parse(list, self.max_n)?;
		Ok(())
	}
}

impl Default for EvalConfig {
	fn default() -> Self {
		Self { max_n: DEFAULT_MAX_N, beta: DEFAULT_BETA, weights: Weights::uniform(DEFAULT_MAX_N), use_space: true }
	}
}

impl TryFrom<ConfigParams> for EvalConfig {
	type Error = ChrfError;

	fn try_from(params: ConfigParams) -> Result<Self> {
		let mut config = Self::new(params.max_n.unwrap_or(DEFAULT_MAX_N), params.beta.unwrap_or(DEFAULT_BETA))?;
		if let Some(weights) = params.weights {
			config.set_weights(weights)?;
		}
		if let Some(use_space) = params.use_space {
			config.use_space = use_space;
		}
		Ok(config)
	}
}
