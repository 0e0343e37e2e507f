
use std::ops::{ Add, AddAssign };
use std::fmt::{ UpperHex, Formatter, Result as FmtResult };

use parse_display::Display;

// ------------------------------------------------------------------------------------------------
// VA
// ------------------------------------------------------------------------------------------------

/// How many bits are in an address.
pub const ADDR_BITS: usize = 24;

/// Mask for the valid bits of an address.
pub const ADDR_MASK: u32 = (1 << ADDR_BITS) - 1;

/// newtype for virtual addresses. The address space is 24 bits, and all arithmetic on a `VA`
/// wraps around at 2<sup>24</sup>.
#[derive(Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default)]
#[display("0x{0:06X}")]
pub struct VA(pub u32);

impl VA {
	/// Constructs a VA, discarding any bits above the 24th.
	pub fn new(addr: u32) -> Self {
		VA(addr & ADDR_MASK)
	}

	/// Adds a signed offset, wrapping around the address space.
	pub fn offset(self, offs: i64) -> Self {
		VA(((self.0 as i64 + offs) & (ADDR_MASK as i64)) as u32)
	}

	/// Would adding `size` to this address go past the end of the address space?
	pub fn would_wrap(self, size: usize) -> bool {
		(self.0 as u64) + (size as u64) > (ADDR_MASK as u64)
	}
}

impl UpperHex for VA {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		UpperHex::fmt(&self.0, f)
	}
}

impl Add<usize> for VA {
	type Output = Self;
	#[inline] fn add(self, other: usize) -> Self {
		VA(((self.0 as usize).wrapping_add(other) as u32) & ADDR_MASK)
	}
}

impl Add<u32> for VA {
	type Output = Self;
	#[inline] fn add(self, other: u32) -> Self {
		VA(self.0.wrapping_add(other) & ADDR_MASK)
	}
}

impl AddAssign<usize> for VA {
	#[inline] fn add_assign(&mut self, other: usize) {
		*self = *self + other;
	}
}
