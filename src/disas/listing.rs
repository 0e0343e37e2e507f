
use enum_dispatch::enum_dispatch;

use crate::decode::{ DecodedInstruction };

// ------------------------------------------------------------------------------------------------
// IListingStyle
// ------------------------------------------------------------------------------------------------

#[enum_dispatch]
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ListingStyle {
	TextOnly,
	AddrText,
	AddrBytesText,
}

/// Trait for the ways a disassembly run can be turned into a listing.
#[enum_dispatch(ListingStyle)]
pub trait IListingStyle {
	/// One instruction's line, without a newline.
	fn fmt_line(&self, i: &DecodedInstruction) -> String;

	// --------------------------------------------------------------------------------------------
	// Provided methods

	/// The whole run, one instruction per line.
	fn fmt_listing(&self, insts: &[DecodedInstruction]) -> String {
		insts.iter()
			.map(|i| self.fmt_line(i))
			.collect::<Vec<_>>()
			.join("\n")
	}
}

// ------------------------------------------------------------------------------------------------
// Styles
// ------------------------------------------------------------------------------------------------

/// Just the instruction text: `ADD B, C`.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct TextOnly;

impl IListingStyle for TextOnly {
	fn fmt_line(&self, i: &DecodedInstruction) -> String {
		i.text().into()
	}
}

/// Address and text: `001000: ADD B, C`.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct AddrText;

impl IListingStyle for AddrText {
	fn fmt_line(&self, i: &DecodedInstruction) -> String {
		format!("{:06X}: {}", i.va(), i.text())
	}
}

/// Address, bytes, and text, separated by pipes: `001000|14 01 02|ADD B, C`.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct AddrBytesText;

impl IListingStyle for AddrBytesText {
	fn fmt_line(&self, i: &DecodedInstruction) -> String {
		format!("{:06X}|{}|{}", i.va(), fmt_bytes(i.bytes()), i.text())
	}
}

/// Bytes in hex, separated by spaces.
pub fn fmt_bytes(bytes: &[u8]) -> String {
	bytes.iter()
		.map(|b| format!("{:02X}", b))
		.collect::<Vec<_>>()
		.join(" ")
}
