//! SGML (WMT style) input support.
//!
//! Only two kinds of lines matter:
//! - `<doc sysid="..." docid="..." ...>` opens a document
//! - `<seg id="...">text</seg>` is one segment of the current document
//!
//! Everything else is skipped. References are looked up by
//! `(docid, segid)`, so hypothesis and reference files may list their
//! documents in different orders.

use std::collections::HashMap;
use std::io;

use regex::Regex;

use crate::error::Result;

const DOC_PATTERN: &str = r#"^<doc sysid="([^"]*)" docid="([^"]*)" [^>]*>"#;
const SEG_PATTERN: &str = r#"^<seg id="([^"]*)">(.*)</seg>"#;

/// One `<seg>` with the ids of its enclosing document.
///
/// `sysid` and `docid` are `None` for segments found before any `<doc>` line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
	pub sysid: Option<String>,
	pub docid: Option<String>,
	pub segid: String,
	pub text: String,
}

impl Segment {
	fn key(&self) -> SegmentKey {
		(self.docid.clone(), self.segid.clone())
	}
}

/// `(docid, segid)`
pub type SegmentKey = (Option<String>, String);

/// All reference texts, grouped by segment key.
pub type ReferenceIndex = HashMap<SegmentKey, Vec<String>>;

/// Compiled line patterns.
#[derive(Clone, Debug)]
pub struct SgmParser {
	doc: Regex,
	seg: Regex,
}

impl SgmParser {
	pub fn new() -> Result<Self> {
		Ok(Self { doc: Regex::new(DOC_PATTERN)?, seg: Regex::new(SEG_PATTERN)? })
	}

	/// Lazily turns lines into segments.
	///
	/// Lines are stripped before matching.
	pub fn segments<I>(&self, lines: I) -> Segments<'_, I::IntoIter>
	where
		I: IntoIterator<Item = io::Result<String>>,
	{
		Segments { parser: self, lines: lines.into_iter(), sysid: None, docid: None }
	}

	/// Reads all reference segments into an index.
	///
	/// Segments sharing a key become alternative references of each other.
	pub fn index_references<I>(&self, lines: I) -> io::Result<ReferenceIndex>
	where
		I: IntoIterator<Item = io::Result<String>>,
	{
		let mut index = ReferenceIndex::new();
		for segment in self.segments(lines) {
			let segment = segment?;
			index.entry(segment.key()).or_default().push(segment.text);
		}
		Ok(index)
	}
}

/// Iterator over the segments of an SGML stream.
pub struct Segments<'a, I> {
	parser: &'a SgmParser,
	lines: I,
	sysid: Option<String>,
	docid: Option<String>,
}

impl<I> Iterator for Segments<'_, I>
where
	I: Iterator<Item = io::Result<String>>,
{
	type Item = io::Result<Segment>;

	fn next(&mut self) -> Option<Self::Item> {
		for line in self.lines.by_ref() {
			let line = match line {
				Ok(line) => line,
				Err(e) => return Some(Err(e)),
			};
			let line = line.trim();

			if let Some(caps) = self.parser.doc.captures(line) {
				self.sysid = Some(caps[1].to_owned());
				self.docid = Some(caps[2].to_owned());
				continue;
			}

			if let Some(caps) = self.parser.seg.captures(line) {
				return Some(Ok(Segment {
					sysid: self.sysid.clone(),
					docid: self.docid.clone(),
					segid: caps[1].to_owned(),
					text: caps[2].to_owned(),
				}));
			}
		}
		None
	}
}

/// Pairs every hypothesis segment with the references at the same key.
///
/// A hypothesis without references gets an empty group.
pub fn pair_segments<'a, I>(
	hypotheses: I,
	references: &'a ReferenceIndex,
) -> impl Iterator<Item = io::Result<(String, Vec<String>)>> + 'a
where
	I: Iterator<Item = io::Result<Segment>> + 'a,
{
	hypotheses.map(move |segment| {
		let segment = segment?;
		let refs = references.get(&segment.key()).cloned().unwrap_or_default();
		Ok((segment.text, refs))
	})
}
