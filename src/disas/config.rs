
use parse_display::{ Display, FromStr };

use crate::disas::{ ListingStyle, TextOnly, AddrText, AddrBytesText };

// ------------------------------------------------------------------------------------------------
// StyleName
// ------------------------------------------------------------------------------------------------

/// Names for the listing styles, as they're written on the command line.
#[derive(Debug, Display, FromStr, PartialEq, Eq, Copy, Clone)]
pub enum StyleName {
	#[display("text")]
	Text,
	#[display("addr")]
	Addr,
	#[display("bytes")]
	Bytes,
}

impl StyleName {
	pub fn style(self) -> ListingStyle {
		match self {
			StyleName::Text  => TextOnly.into(),
			StyleName::Addr  => AddrText.into(),
			StyleName::Bytes => AddrBytesText.into(),
		}
	}
}

// ------------------------------------------------------------------------------------------------
// DisasConfig
// ------------------------------------------------------------------------------------------------

/// How many instructions a run decodes if nobody says otherwise.
pub const DEFAULT_MAX_COUNT: usize = 200;

/// Settings for one disassembly run.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct DisasConfig {
	/// Stop after this many instructions.
	pub max_count: usize,
	/// Compact display (no `+` signs, relative branches show only their targets).
	pub compact:   bool,
	/// How to format the listing.
	pub style:     StyleName,
}

impl Default for DisasConfig {
	fn default() -> Self {
		Self { max_count: DEFAULT_MAX_COUNT, compact: false, style: StyleName::Bytes }
	}
}

impl DisasConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn max_count(self, max_count: usize) -> Self { Self { max_count, ..self } }
	pub fn compact  (self, compact: bool)    -> Self { Self { compact,   ..self } }
	pub fn style    (self, style: StyleName) -> Self { Self { style,     ..self } }

	pub fn listing_style(&self) -> ListingStyle {
		self.style.style()
	}
}
