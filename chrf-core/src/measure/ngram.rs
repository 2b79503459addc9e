use std::fmt;

use serde::Serialize;

/// A contiguous run of characters taken from one line.
///
/// Equality and hashing are by exact character sequence; no case or
/// punctuation normalization is ever applied.
#[derive(Serialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Ngram(String);

impl Ngram {
	fn from_chars(chars: &[char]) -> Self {
		Self(chars.iter().collect())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Number of characters (the n-gram order).
	pub fn order(&self) -> usize {
		self.0.chars().count()
	}
}

impl fmt::Display for Ngram {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for Ngram {
	fn from(s: &str) -> Self {
		Self(s.to_owned())
	}
}

/// All character n-grams of one line, one list per order `1..=max_n`.
///
/// # Invariants
/// - There are always exactly `max_n` lists, whatever the line length
/// - List `i` only holds n-grams of `i + 1` characters, in line order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NgramOrderSet {
	orders: Vec<Vec<Ngram>>,
}

impl NgramOrderSet {
	/// Extracts the n-grams of `line` for every order from 1 to `max_n`.
	///
	/// # Notes
	/// - One trailing space is appended first, so the last word is treated
	///   like every other word.
	/// - With `use_space == false` every space is removed afterwards,
	///   the appended one included.
	/// - Orders longer than the resulting line get an empty list.
	/// - UTF-8 safe: works on characters, not bytes.
	pub fn extract(line: &str, max_n: usize, use_space: bool) -> Self {
		let mut chars: Vec<char> = line.chars().collect();
		chars.push(' ');
		if !use_space {
			chars.retain(|c| *c != ' ');
		}

		let mut orders = Vec::with_capacity(max_n);
		for n in 1..=max_n {
			if n > chars.len() {
				// Line too short for this order
				orders.push(Vec::new());
				continue;
			}
			orders.push(chars.windows(n).map(Ngram::from_chars).collect());
		}

		Self { orders }
	}

	/// Returns the n-grams of order `index + 1`.
	pub fn order(&self, index: usize) -> &[Ngram] {
		&self.orders[index]
	}

	/// Number of orders held (always the `max_n` used for extraction).
	pub fn max_n(&self) -> usize {
		self.orders.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = &[Ngram]> {
		self.orders.iter().map(Vec::as_slice)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn texts(ngrams: &[Ngram]) -> Vec<&str> {
		ngrams.iter().map(Ngram::as_str).collect()
	}

	#[test]
	fn appends_trailing_space() {
		let set = NgramOrderSet::extract("ab", 2, true);
		assert_eq!(texts(set.order(0)), vec!["a", "b", " "]);
		assert_eq!(texts(set.order(1)), vec!["ab", "b "]);
	}

	#[test]
	fn pads_missing_orders_with_empty_lists() {
		let set = NgramOrderSet::extract("ab", 6, true);
		assert_eq!(set.max_n(), 6);
		assert_eq!(set.order(2), &[Ngram::from("ab ")]);
		for i in 3..6 {
			assert!(set.order(i).is_empty());
		}
	}

	#[test]
	fn ignore_space_drops_all_spaces() {
		let set = NgramOrderSet::extract("a b", 2, false);
		assert_eq!(texts(set.order(0)), vec!["a", "b"]);
		assert_eq!(texts(set.order(1)), vec!["ab"]);
	}

	#[test]
	fn empty_line() {
		let with_space = NgramOrderSet::extract("", 3, true);
		assert_eq!(texts(with_space.order(0)), vec![" "]);
		assert!(with_space.order(1).is_empty());

		let without_space = NgramOrderSet::extract("", 3, false);
		assert!(without_space.iter().all(<[Ngram]>::is_empty));
		assert_eq!(without_space.max_n(), 3);
	}

	#[test]
	fn multibyte_characters() {
		let set = NgramOrderSet::extract("çé", 2, true);
		assert_eq!(texts(set.order(0)), vec!["ç", "é", " "]);
		assert_eq!(set.order(1)[0].order(), 2);
	}

	#[test]
	fn case_is_significant() {
		let upper = NgramOrderSet::extract("A", 1, true);
		let lower = NgramOrderSet::extract("a", 1, true);
		assert_ne!(upper.order(0)[0], lower.order(0)[0]);
	}
}
