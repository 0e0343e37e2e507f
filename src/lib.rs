//! A disassembler for an instruction set whose operand encodings are described by per-opcode
//! bit-layout templates rather than fixed fields.
//!
//! The pieces, from the bottom up:
//!
//! - [`decode::ArgField`] accumulates one operand's bits and prints them as all kinds of numbers.
//! - [`decode::Layout`] is a parsed template; [`decode::DecodedInstruction`] uses one to fill
//!   in argument fields from raw bytes.
//! - [`print`] decides how each operand is printed, based on the shape of its token in the
//!   opcode table's mnemonic.
//! - [`disas::Disassembler`] walks memory decoding one instruction after another, and
//!   [`disas::IListingStyle`] turns the result into text.

pub mod arch;
pub mod decode;
pub mod disas;
pub mod memory;
pub mod print;

pub use arch::*;
pub use decode::*;
pub use disas::*;
pub use memory::*;
pub use print::*;
