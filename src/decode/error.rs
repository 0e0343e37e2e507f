use std::error::Error;

use parse_display::Display;

// ------------------------------------------------------------------------------------------------
// ExtractErrorKind
// ------------------------------------------------------------------------------------------------

/// The ways pulling operand bits out of an instruction can go wrong. These are always caused
/// by a bad template in the opcode table, never by the bytes being decoded.
#[derive(Debug, Display, PartialEq, Eq, Copy, Clone)]
pub enum ExtractErrorKind {
	/// Something other than `o`, `0`, `1`, `u`, or `A`..`F` in the template.
	#[display("bad template character '{0}'")]
	BadTemplateChar(char),

	/// An argument letter with no field to put its bits in.
	#[display("no argument field {0}")]
	NoSuchArg(u8),

	/// The template describes more bits than the instruction has bytes.
	#[display("template runs past the end of the instruction")]
	OutOfBits,

	/// One operand was given more bits than an argument field can hold.
	#[display("operand has more than 32 bits")]
	FieldOverflow,
}

// ------------------------------------------------------------------------------------------------
// ExtractError
// ------------------------------------------------------------------------------------------------

/// Bit extraction error. `pos` is the (whitespace-stripped) template position being processed.
#[derive(Debug, Display, PartialEq, Eq, Copy, Clone)]
#[display("bit extraction error at template position {pos}: {kind}")]
pub struct ExtractError {
	pub pos:  usize,
	pub kind: ExtractErrorKind,
}

impl Error for ExtractError {}

impl ExtractError {
	pub fn new(pos: usize, kind: ExtractErrorKind) -> Self {
		Self { pos, kind }
	}
}

pub type ExtractResult<T> = Result<T, ExtractError>;
