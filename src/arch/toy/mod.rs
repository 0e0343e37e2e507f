//! A toy instruction set with a small opcode table. It exists so that there's something to
//! disassemble in tests and from the command line; it has one instruction for each kind of
//! operand the printer knows about, plus a couple of grouped (two-byte) opcodes.

use std::collections::HashMap;

use lazy_static::lazy_static;
use smallvec::SmallVec;

use crate::arch::{ OpcodeDesc, IOpcodeResolver, IFlagNames };
use crate::decode::{ Layout, MAX_BYTES };

// ------------------------------------------------------------------------------------------------
// Sub-modules
// ------------------------------------------------------------------------------------------------

mod descs;

use descs::{ ToyDesc, PRIMARY_DESCS, GROUPS, SECONDARY_DESCS, FLAG_NAMES, SUB_SHIFT };

// ------------------------------------------------------------------------------------------------
// Lookup tables
// ------------------------------------------------------------------------------------------------

fn to_desc(d: &ToyDesc) -> OpcodeDesc {
	OpcodeDesc::new(d.mnemonic, d.template, d.opcode)
}

lazy_static! {
	static ref PRIMARY: HashMap<u8, OpcodeDesc> = {
		PRIMARY_DESCS.iter().chain(GROUPS.iter())
			.map(|d| (d.opcode, to_desc(d)))
			.collect()
	};

	static ref SECONDARY: HashMap<(u8, u8), OpcodeDesc> = {
		SECONDARY_DESCS.iter()
			.filter_map(|d| d.sub.map(|sub| ((d.opcode, sub), to_desc(d))))
			.collect()
	};
}

fn is_group(first: u8) -> bool {
	GROUPS.iter().any(|g| g.opcode == first)
}

// ------------------------------------------------------------------------------------------------
// ToyIsa
// ------------------------------------------------------------------------------------------------

/// The toy instruction set's opcode table and flag names.
#[derive(Debug, Default, Copy, Clone)]
pub struct ToyIsa;

impl ToyIsa {
	pub fn new() -> Self {
		Self
	}

	/// Assembles an instruction: `sub` is the secondary opcode for grouped instructions, and
	/// `args` are the argument field values. Returns `None` if there's no such instruction.
	pub fn encode(&self, first: u8, sub: Option<u8>, args: &[u32])
	-> Option<SmallVec<[u8; MAX_BYTES]>> {
		let desc = match sub {
			None      => PRIMARY.get(&first).filter(|_| !is_group(first))?,
			Some(sub) => SECONDARY.get(&(first, sub))?,
		};

		let layout = Layout::parse(&desc.template);
		Some(layout.encode(first, sub.unwrap_or(0) as u32, args))
	}

	/// Every instruction in the table, as `(first byte, secondary opcode, descriptor)`.
	pub fn all_descs(&self) -> impl Iterator<Item = (u8, Option<u8>, OpcodeDesc)> {
		PRIMARY_DESCS.iter().chain(SECONDARY_DESCS.iter())
			.map(|d| (d.opcode, d.sub, to_desc(d)))
	}
}

impl IOpcodeResolver for ToyIsa {
	fn resolve_primary(&self, first: u8) -> Option<OpcodeDesc> {
		let ret = PRIMARY.get(&first).cloned();

		if ret.is_none() {
			log::trace!("no primary opcode 0x{:02X}", first);
		}

		ret
	}

	fn resolve_secondary(&self, first: u8, second: u8) -> Option<OpcodeDesc> {
		SECONDARY.get(&(first, second >> SUB_SHIFT)).cloned()
	}

	fn is_single_byte(&self, first: u8) -> bool {
		!is_group(first)
	}
}

impl IFlagNames for ToyIsa {
	fn flag_name(&self, index: u8) -> String {
		FLAG_NAMES.get(index as usize).copied().unwrap_or("?").into()
	}
}
