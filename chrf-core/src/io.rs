use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Default separator between alternative references on one line.
pub const DEFAULT_REFERENCE_SEPARATOR: &str = "*#";

/// Lazily reads a text file line by line.
///
/// - Splits on `\n` / `\r\n`
/// - Strips surrounding whitespace from every line
pub fn read_lines<P: AsRef<Path>>(filename: P) -> io::Result<impl Iterator<Item = io::Result<String>>> {
	let reader = BufReader::new(File::open(filename)?);
	Ok(reader.lines().map(|line| line.map(|l| l.trim().to_owned())))
}

/// Splits one reference line into its alternatives.
///
/// Example:
/// `"the cat*#a cat"` + `"*#"` → `["the cat", "a cat"]`
pub fn split_references(line: &str, separator: &str) -> Vec<String> {
	line.split(separator).map(str::to_owned).collect()
}

/// Lazily reads a reference file, one group of alternatives per line.
pub fn read_reference_groups<P: AsRef<Path>>(
	filename: P,
	separator: &str,
) -> io::Result<impl Iterator<Item = io::Result<Vec<String>>>> {
	let separator = separator.to_owned();
	Ok(read_lines(filename)?.map(move |line| line.map(|l| split_references(&l, &separator))))
}
