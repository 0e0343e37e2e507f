
use parse_display::Display;

use crate::memory::{ IByteSource, VA };
use crate::arch::{ DisasError, DisasResult };

// ------------------------------------------------------------------------------------------------
// Image
// ------------------------------------------------------------------------------------------------

/// A flat chunk of the address space: some bytes loaded at a base address. Anything outside
/// the loaded bytes cannot be fetched.
#[derive(Debug, Display, Clone)]
#[display("{name} [{base} .. +0x{len:X})")]
pub struct Image {
	name: String,
	base: VA,
	len:  usize,
	data: Vec<u8>,
}

impl Image {
	pub fn new(name: &str, base: VA, data: Vec<u8>) -> Self {
		Self { name: name.into(), base, len: data.len(), data }
	}

	/// Human-readable name (usually the file it came from).
	pub fn name(&self) -> &str { &self.name }
	/// Address of the first byte.
	pub fn base(&self) -> VA { self.base }
	/// How many bytes are loaded.
	pub fn len(&self) -> usize { self.len }
	/// true if nothing is loaded.
	pub fn is_empty(&self) -> bool { self.len == 0 }
	/// The raw bytes.
	pub fn data(&self) -> &[u8] { &self.data }

	/// If `va` falls within this image, the offset of that byte in `data`.
	pub fn offset_of(&self, va: VA) -> Option<usize> {
		// distance from base, wrapping, so images that straddle the top of memory work.
		let offs = (va.0.wrapping_sub(self.base.0) & crate::memory::ADDR_MASK) as usize;

		if offs < self.len { Some(offs) } else { None }
	}
}

impl IByteSource for Image {
	fn fetch_u8(&self, va: VA) -> DisasResult<u8> {
		match self.offset_of(va) {
			Some(offs) => Ok(self.data[offs]),
			None       => Err(DisasError::out_of_bytes(va)),
		}
	}
}

/// A bare slice is an image based at address 0.
impl IByteSource for [u8] {
	fn fetch_u8(&self, va: VA) -> DisasResult<u8> {
		self.get(va.0 as usize).copied().ok_or_else(|| DisasError::out_of_bytes(va))
	}
}

impl IByteSource for Vec<u8> {
	fn fetch_u8(&self, va: VA) -> DisasResult<u8> {
		self.as_slice().fetch_u8(va)
	}
}
