
use std::sync::Arc;

use bitflags::bitflags;
use smallvec::{ SmallVec };

use crate::arch::{ IFlagNames, is_signed_mnemonic, is_float_mnemonic };
use crate::decode::{ ArgField, ExtractError, Layout };
use crate::memory::{ VA };
use crate::print::{ Syntax, RenderCtx, compose };

// ------------------------------------------------------------------------------------------------
// Constants
// ------------------------------------------------------------------------------------------------

/// Most argument fields an instruction can have (template letters `A`..`F`).
pub const MAX_ARGS:  usize = 6;
/// Longest instruction we expect to see; longer ones just spill onto the heap.
pub const MAX_BYTES: usize = 8;

/// What illegal instructions are called.
pub const ILLEGAL_MNEMONIC: &str = "ILLEGAL";

// ------------------------------------------------------------------------------------------------
// InstFlags
// ------------------------------------------------------------------------------------------------

bitflags! {
	/// Properties of a decoded instruction that affect how it's printed.
	pub struct InstFlags: u8 {
		/// 24-bit numbers are offsets from the instruction's address.
		const RELATIVE = 0b0001;
		/// No opcode matched; this is a 1-byte placeholder.
		const ILLEGAL  = 0b0010;
		/// Signed arithmetic; numbers print signed.
		const SIGNED   = 0b0100;
		/// Float instruction; 32-bit numbers print as floats.
		const FLOAT    = 0b1000;
	}
}

// ------------------------------------------------------------------------------------------------
// Stage
// ------------------------------------------------------------------------------------------------

/// How far along decoding is. Only ever moves forward.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub enum Stage {
	/// Just constructed; no bytes yet.
	Created,
	/// Bytes captured and argument fields filled in.
	Extracted,
	/// Text rendered. Read-only from here on.
	Composed,
}

// ------------------------------------------------------------------------------------------------
// DecodedInstruction
// ------------------------------------------------------------------------------------------------

/// One instruction at one address. Built in three steps: [`new`](Self::new), then
/// [`extract`](Self::extract) with the raw bytes, then [`compose`](Self::compose) to get the
/// text.
#[derive(Debug, Clone)]
pub struct DecodedInstruction {
	va:        VA,
	opcode:    u8,
	layout:    Arc<Layout>,
	syntax:    Arc<Syntax>,
	flags:     InstFlags,
	bytes:     SmallVec<[u8; MAX_BYTES]>,
	args:      SmallVec<[ArgField; MAX_ARGS]>,
	text:      String,
	stage:     Stage,
	extract_err: Option<ExtractError>,
}

impl DecodedInstruction {
	/// `layout` and `syntax` are usually shared with every other instruction that has the same
	/// opcode; see [`Disassembler`](crate::disas::Disassembler).
	pub fn new(va: VA, opcode: u8, layout: Arc<Layout>, syntax: Arc<Syntax>,
	relative: bool, illegal: bool) -> Self {
		let mut flags = InstFlags::empty();
		flags.set(InstFlags::RELATIVE, relative);
		flags.set(InstFlags::ILLEGAL,  illegal);
		flags.set(InstFlags::SIGNED,   is_signed_mnemonic(syntax.text()));
		flags.set(InstFlags::FLOAT,    is_float_mnemonic(syntax.text()));

		Self {
			va,
			opcode,
			layout,
			syntax,
			flags,
			bytes:       SmallVec::new(),
			args:        SmallVec::new(),
			text:        String::new(),
			stage:       Stage::Created,
			extract_err: None,
		}
	}

	/// Same as `new`, but parses the template and mnemonic itself.
	pub fn from_text(va: VA, opcode: u8, mnemonic: &str, template: &str, relative: bool) -> Self {
		let layout = Arc::new(Layout::parse(template));
		let syntax = Arc::new(Syntax::parse(mnemonic));
		Self::new(va, opcode, layout, syntax, relative, false)
	}

	/// A 1-byte placeholder for an opcode that isn't in the table.
	pub fn illegal(va: VA, opcode: u8) -> Self {
		let layout = Arc::new(Layout::parse(""));
		let syntax = Arc::new(Syntax::parse(ILLEGAL_MNEMONIC));
		Self::new(va, opcode, layout, syntax, false, true)
	}

	// --------------------------------------------------------------------------------------------
	// Decoding steps

	/// How many bytes [`extract`](Self::extract) wants.
	pub fn wanted_bytes(&self) -> usize {
		if self.is_illegal() { 1 } else { self.layout.byte_len() }
	}

	/// Captures the raw bytes and pulls the argument fields out of them. Problems with the
	/// template are logged and remembered (see [`extract_error`](Self::extract_error)), and
	/// whatever fields were filled in before the problem are kept.
	pub fn extract(&mut self, bytes: &[u8]) {
		if self.stage != Stage::Created {
			log::warn!("instruction at {} already extracted", self.va);
			return;
		}

		self.stage = Stage::Extracted;
		let len = bytes.len().min(self.wanted_bytes());
		self.bytes = SmallVec::from_slice(&bytes[.. len]);

		// bare opcode, nothing to pull out.
		if self.layout.byte_len() < 2 || self.is_illegal() {
			return;
		}

		self.args = (0 .. self.layout.num_args()).map(ArgField::new).collect();

		if let Err(e) = self.layout.extract(&self.bytes, &mut self.args) {
			log::warn!("at {} ('{}', template '{}'): {}",
				self.va, self.syntax.text(), self.layout.template(), e);
			self.extract_err = Some(e);
		}
	}

	/// Renders the text. `compact` turns on compact display for all the argument fields.
	pub fn compose(&mut self, flags: &dyn IFlagNames, compact: bool) {
		match self.stage {
			Stage::Extracted => {}
			Stage::Created => {
				log::warn!("composing instruction at {} before extracting", self.va);
			}
			Stage::Composed => {
				log::warn!("instruction at {} already composed", self.va);
				return;
			}
		}

		for arg in self.args.iter_mut() {
			arg.set_compact(compact);
		}

		let ctx = RenderCtx {
			va:       self.va,
			relative: self.is_relative(),
			signed:   self.flags.contains(InstFlags::SIGNED),
			float:    self.flags.contains(InstFlags::FLOAT),
			flags,
		};

		self.text = compose(&self.syntax, &self.args, &ctx);
		self.stage = Stage::Composed;
	}

	// --------------------------------------------------------------------------------------------
	// Accessors

	/// Get virtual address.
	pub fn va(&self) -> VA { self.va }
	/// Get the virtual address of the instruction after this one.
	pub fn next_va(&self) -> VA { self.va + self.size() }
	/// The first byte.
	pub fn opcode(&self) -> u8 { self.opcode }
	/// Get size, in bytes. Before extraction this is how many bytes it *will* be.
	pub fn size(&self) -> usize {
		if self.stage == Stage::Created { self.wanted_bytes() } else { self.bytes.len() }
	}
	/// The original bytes that this instruction was decoded from.
	pub fn bytes(&self) -> &[u8] { &self.bytes }
	/// The argument fields.
	pub fn args(&self) -> &[ArgField] { &self.args }
	/// The rendered text; empty until composed.
	pub fn text(&self) -> &str { &self.text }
	/// The mnemonic from the opcode table.
	pub fn mnemonic(&self) -> &str { self.syntax.text() }
	/// The parsed layout.
	pub fn layout(&self) -> &Layout { &self.layout }
	pub fn flags(&self) -> InstFlags { self.flags }
	pub fn stage(&self) -> Stage { self.stage }
	/// If bit extraction hit a problem, what it was.
	pub fn extract_error(&self) -> Option<ExtractError> { self.extract_err }
	/// Is this an illegal instruction?
	pub fn is_illegal(&self) -> bool { self.flags.contains(InstFlags::ILLEGAL) }
	/// Is this a relative branch/call?
	pub fn is_relative(&self) -> bool { self.flags.contains(InstFlags::RELATIVE) }

	/// For relative branches/calls, the absolute address they go to.
	pub fn control_target(&self) -> Option<VA> {
		if !self.is_relative() {
			return None;
		}

		self.args.iter()
			.rev()
			.find(|a| a.byte_count() == 3)
			.map(|a| a.rel_target(self.va))
	}
}
