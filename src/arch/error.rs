use std::error::Error;

use parse_display::Display;

use crate::memory::{ VA };

// ------------------------------------------------------------------------------------------------
// DisasErrorKind
// ------------------------------------------------------------------------------------------------

/// The kinds of disassembly errors. Any of these stops a disassembly run in its tracks.
#[derive(Debug, Display, PartialEq, Eq, Copy, Clone)]
pub enum DisasErrorKind {
	/// Tried to fetch a byte from somewhere there isn't one.
	#[display("no byte at {addr}")]
	OutOfBytes { addr: VA },

	/// The memory collaborator failed for some reason of its own.
	#[display("memory fault")]
	MemoryFault,
}

// ------------------------------------------------------------------------------------------------
// DisasError
// ------------------------------------------------------------------------------------------------

/// The disassembly error type.
#[derive(Debug, Display, PartialEq, Eq, Copy, Clone)]
#[display("disassembly error at VA {va}: {kind}")]
pub struct DisasError {
	/// VA being accessed.
	pub va:   VA,
	/// kind of error.
	pub kind: DisasErrorKind,
}

impl Error for DisasError {}

impl DisasError {
	/// Shorthand constructors.
	pub fn out_of_bytes(va: VA) -> DisasError {
		DisasError { va, kind: DisasErrorKind::OutOfBytes { addr: va } }
	}

	/// Ditto.
	pub fn memory_fault(va: VA) -> DisasError {
		DisasError { va, kind: DisasErrorKind::MemoryFault }
	}
}

// ------------------------------------------------------------------------------------------------
// DisasResult
// ------------------------------------------------------------------------------------------------

/// Alias for a `Result` with a `DisasError` as its error type.
pub type DisasResult<T> = Result<T, DisasError>;
