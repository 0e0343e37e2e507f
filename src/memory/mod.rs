
use crate::arch::{ DisasResult };

// ------------------------------------------------------------------------------------------------
// Sub-modules
// ------------------------------------------------------------------------------------------------

mod image;
mod va;

pub use image::*;
pub use va::*;

// ------------------------------------------------------------------------------------------------
// IByteSource
// ------------------------------------------------------------------------------------------------

/// Trait for anything bytes can be fetched out of: the emulated machine's memory, a loaded
/// image, or just a slice in tests.
pub trait IByteSource {
	/// Fetch one byte. `va` is always within the 24-bit address space. An `Err` here is fatal
	/// to whatever disassembly run is in progress.
	fn fetch_u8(&self, va: VA) -> DisasResult<u8>;

	// --------------------------------------------------------------------------------------------
	// Provided methods

	/// Fetches `n` consecutive bytes starting at `va`, wrapping at the top of the address space.
	fn fetch_n(&self, va: VA, n: usize, out: &mut Vec<u8>) -> DisasResult<()> {
		for i in 0 .. n {
			out.push(self.fetch_u8(va + i)?);
		}

		Ok(())
	}
}

impl<T: IByteSource + ?Sized> IByteSource for &T {
	fn fetch_u8(&self, va: VA) -> DisasResult<u8> {
		(**self).fetch_u8(va)
	}
}
