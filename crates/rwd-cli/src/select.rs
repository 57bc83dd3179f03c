use clap::Parser;
use glob::Pattern;

/// Which entries to act on.
#[derive(Debug, Clone, Parser)]
pub struct Selection {
	/// Glob patterns to match entry names against (ex: *.ttf).
	///
	/// Entries are selected if they match any of the patterns. With no patterns, all entries are
	/// selected.
	#[arg(value_name = "GLOB")]
	pub patterns: Vec<Pattern>,
}

impl Selection {
	/// Whether an entry name is selected.
	pub fn matches(&self, name: &str) -> bool {
		self.patterns.is_empty() || self.patterns.iter().any(|pattern| pattern.matches(name))
	}
}
