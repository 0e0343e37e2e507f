//! The disassembly driver: fetches bytes, looks up opcodes, decodes instructions one after
//! another, and hands back the run for formatting.
//!
//! A run is not re-entrant (the driver's shape cache is mutated as it goes), which is why
//! everything here takes `&mut self`. Callers that share a driver between threads need to
//! serialize access to it.

use crate::arch::{ DisasError, DisasResult, IOpcodeResolver, IFlagNames, is_relative_mnemonic };
use crate::decode::{ DecodedInstruction };
use crate::memory::{ IByteSource, VA };

// ------------------------------------------------------------------------------------------------
// Sub-modules
// ------------------------------------------------------------------------------------------------

mod cache;
mod config;
mod listing;
#[cfg(test)]
mod tests;

pub use cache::*;
pub use config::*;
pub use listing::*;

// ------------------------------------------------------------------------------------------------
// Disassembler
// ------------------------------------------------------------------------------------------------

/// Decodes runs of instructions. `R` is the opcode table and `F` names the condition flags
/// (often they're the same type).
pub struct Disassembler<R: IOpcodeResolver, F: IFlagNames> {
	resolver: R,
	flags:    F,
	cache:    ShapeCache,
	last_err: Option<DisasError>,
}

impl<R: IOpcodeResolver, F: IFlagNames> Disassembler<R, F> {
	pub fn new(resolver: R, flags: F) -> Self {
		Self { resolver, flags, cache: ShapeCache::new(), last_err: None }
	}

	pub fn resolver(&self) -> &R { &self.resolver }
	pub fn flag_names(&self) -> &F { &self.flags }
	pub fn cache(&self) -> &ShapeCache { &self.cache }

	/// If the last run stopped early because of an error, that error.
	pub fn last_error(&self) -> Option<DisasError> {
		self.last_err
	}

	/// Decodes up to `max_count` instructions starting at `va`. Stops early (keeping what was
	/// decoded so far) if a byte can't be fetched, or after the instruction that reaches the
	/// top of the address space.
	pub fn run<S>(&mut self, src: &S, va: VA, max_count: usize, compact: bool)
	-> Vec<DecodedInstruction>
	where
		S: IByteSource + ?Sized
	{
		let mut iter = self.disas_all(src, va, compact);
		let ret: Vec<_> = (&mut iter).take(max_count).collect();
		let err = iter.err();

		if let Some(e) = err {
			log::error!("disassembly run from {} aborted after {} instructions: {}",
				va, ret.len(), e);
		}

		log::debug!("disassembled {} instructions from {}", ret.len(), va);
		self.last_err = err;
		ret
	}

	/// Same as [`run`](Self::run), with the count and display mode from `config`.
	pub fn run_with<S>(&mut self, src: &S, va: VA, config: &DisasConfig)
	-> Vec<DecodedInstruction>
	where
		S: IByteSource + ?Sized
	{
		self.run(src, va, config.max_count, config.compact)
	}

	/// Iterator over instructions starting at `va`, with no limit on how many.
	pub fn disas_all<'dis, 'src, S>(&'dis mut self, src: &'src S, va: VA, compact: bool)
	-> DisasAll<'dis, 'src, R, F, S>
	where
		S: IByteSource + ?Sized
	{
		DisasAll::new(self, src, va, compact)
	}

	/// Decodes the single instruction at `va`. An unknown opcode is not an error; it gives a
	/// 1-byte illegal instruction.
	pub fn disas_instr<S>(&mut self, src: &S, va: VA, compact: bool)
	-> DisasResult<DecodedInstruction>
	where
		S: IByteSource + ?Sized
	{
		let first = src.fetch_u8(va)?;
		let primary = self.resolver.resolve_primary(first);

		let desc = if self.resolver.is_single_byte(first) {
			primary.clone()
		} else {
			let second = src.fetch_u8(va + 1usize)?;
			self.resolver.resolve_secondary(first, second)
		};

		let mut inst = match desc {
			Some(desc) => {
				let relative = primary.map_or(false, |p| is_relative_mnemonic(&p.mnemonic));
				let layout = self.cache.layout(&desc.template);
				let syntax = self.cache.syntax(&desc.mnemonic);
				DecodedInstruction::new(va, desc.opcode, layout, syntax, relative, false)
			}

			None => {
				log::trace!("ran into opcode 0x{:02X} at {}", first, va);
				DecodedInstruction::illegal(va, first)
			}
		};

		let mut bytes = Vec::with_capacity(inst.wanted_bytes());
		src.fetch_n(va, inst.wanted_bytes(), &mut bytes)?;

		inst.extract(&bytes);
		inst.compose(&self.flags, compact);
		log::trace!("{}: {}", va, inst.text());
		Ok(inst)
	}
}

// ------------------------------------------------------------------------------------------------
// DisasAll
// ------------------------------------------------------------------------------------------------

/// Iterator type. Also lets you find out *why* iteration stopped, like:
///
/// ```ignore
/// let mut iter = dis.disas_all(&mem, va, false);
/// for inst in &mut iter {
///     // blah blah
/// }
///
/// if let Some(err) = iter.err() {
///     // do stuff with err
/// }
/// ```
pub struct DisasAll<'dis, 'src, R, F, S>
where
	R: IOpcodeResolver,
	F: IFlagNames,
	S: IByteSource + ?Sized,
{
	disas:   &'dis mut Disassembler<R, F>,
	src:     &'src S,
	va:      VA,
	compact: bool,
	done:    bool,
	err:     Option<DisasError>,
}

impl<'dis, 'src, R, F, S> DisasAll<'dis, 'src, R, F, S>
where
	R: IOpcodeResolver,
	F: IFlagNames,
	S: IByteSource + ?Sized,
{
	fn new(disas: &'dis mut Disassembler<R, F>, src: &'src S, va: VA, compact: bool) -> Self {
		Self { disas, src, va, compact, done: false, err: None }
	}

	/// If iteration stopped because of an error, returns that error.
	pub fn err(&self) -> Option<DisasError> {
		self.err
	}

	/// Whether or not iteration stopped because of an error.
	pub fn has_err(&self) -> bool {
		self.err().is_some()
	}

	/// The address of the next instruction (or where the error occurred, if any).
	pub fn va(&self) -> VA {
		self.va
	}
}

impl<'dis, 'src, R, F, S> Iterator for DisasAll<'dis, 'src, R, F, S>
where
	R: IOpcodeResolver,
	F: IFlagNames,
	S: IByteSource + ?Sized,
{
	type Item = DecodedInstruction;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}

		match self.disas.disas_instr(self.src, self.va, self.compact) {
			Ok(inst) => {
				let size = inst.size();

				// the address space ends here; don't wrap around to 0.
				if self.va.would_wrap(size) {
					self.done = true;
				}

				self.va += size;
				Some(inst)
			}

			Err(e) => {
				self.err = Some(e);
				self.done = true;
				None
			}
		}
	}
}
