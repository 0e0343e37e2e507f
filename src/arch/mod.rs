
// ------------------------------------------------------------------------------------------------
// Sub-modules
// ------------------------------------------------------------------------------------------------

pub mod error;
pub mod toy;

pub use error::*;

// ------------------------------------------------------------------------------------------------
// Instruction set conventions
// ------------------------------------------------------------------------------------------------

/// Operators whose 24-bit operand is an offset from the instruction's own address.
pub const RELATIVE_OPERATORS: &[&str] = &["JR", "CALLR"];

/// Mnemonic prefixes of the signed arithmetic instructions, whose numbers print signed.
pub const SIGNED_PREFIXES: &[&str] = &["SADD", "SSUB", "SMUL", "SDIV", "SCP"];

/// If a mnemonic has this in it, it works on float registers and its 32-bit numbers are floats.
pub const FLOAT_MARKER: &str = "fr";

/// Is `mnemonic` a relative branch/call? Only its operator (first word) is considered.
pub fn is_relative_mnemonic(mnemonic: &str) -> bool {
	let op = mnemonic.split(' ').next().unwrap_or("");
	RELATIVE_OPERATORS.contains(&op)
}

/// Is `mnemonic` a signed arithmetic instruction?
pub fn is_signed_mnemonic(mnemonic: &str) -> bool {
	SIGNED_PREFIXES.iter().any(|p| mnemonic.starts_with(p))
}

/// Does `mnemonic` work with floats?
pub fn is_float_mnemonic(mnemonic: &str) -> bool {
	mnemonic.contains(FLOAT_MARKER)
}

// ------------------------------------------------------------------------------------------------
// OpcodeDesc
// ------------------------------------------------------------------------------------------------

/// What the opcode table knows about one instruction.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct OpcodeDesc {
	/// e.g. `"LD r, (rrr, nnn)"`.
	pub mnemonic: String,
	/// Bit layout of the bytes after the opcode byte, e.g. `"AAAAABBB BBuuuuuu"`.
	pub template: String,
	/// The first byte.
	pub opcode:   u8,
}

impl OpcodeDesc {
	pub fn new(mnemonic: &str, template: &str, opcode: u8) -> Self {
		Self { mnemonic: mnemonic.into(), template: template.into(), opcode }
	}
}

// ------------------------------------------------------------------------------------------------
// IOpcodeResolver
// ------------------------------------------------------------------------------------------------

/// Trait for opcode tables.
pub trait IOpcodeResolver {
	/// Look up an instruction by its first byte alone.
	fn resolve_primary(&self, first: u8) -> Option<OpcodeDesc>;

	/// Look up an instruction whose secondary opcode lives in the second byte.
	fn resolve_secondary(&self, first: u8, second: u8) -> Option<OpcodeDesc>;

	/// true if `first` alone identifies the instruction.
	fn is_single_byte(&self, first: u8) -> bool;
}

// ------------------------------------------------------------------------------------------------
// IFlagNames
// ------------------------------------------------------------------------------------------------

/// Trait to abstract looking up condition flag names.
pub trait IFlagNames {
	fn flag_name(&self, index: u8) -> String;
}

/// A dummy struct that implements `IFlagNames` and gives every flag the same useless name.
pub struct NullFlagNames;

impl IFlagNames for NullFlagNames {
	fn flag_name(&self, _index: u8) -> String {
		"???".into()
	}
}
