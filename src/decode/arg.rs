
use std::fmt::{ Debug, Formatter, Result as FmtResult };

use crate::decode::{ ExtractErrorKind };
use crate::memory::{ VA };

// ------------------------------------------------------------------------------------------------
// ArgField
// ------------------------------------------------------------------------------------------------

/// The most bits one argument field can hold.
pub const MAX_FIELD_BITS: usize = 32;

/// One operand of an instruction, built up a bit at a time (most-significant first) as the
/// template is walked. Once built, it can be viewed as a bunch of different kinds of numbers.
///
/// The bit and byte counts are always derived from the bits pushed so far, so they can't
/// disagree with the value.
#[derive(PartialEq, Eq, Clone, Default)]
pub struct ArgField {
	index:   usize,
	nbits:   usize,
	value:   u32,
	compact: bool,
}

impl Debug for ArgField {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "arg{}[{}b: {}]", self.index, self.nbits, self.bit_string())
	}
}

impl ArgField {
	/// An empty field for operand number `index`.
	pub fn new(index: usize) -> Self {
		Self { index, ..Self::default() }
	}

	/// Appends one bit at the bottom.
	pub fn push_bit(&mut self, bit: bool) -> Result<(), ExtractErrorKind> {
		if self.nbits == MAX_FIELD_BITS {
			return Err(ExtractErrorKind::FieldOverflow);
		}

		self.value = (self.value << 1) | (bit as u32);
		self.nbits += 1;
		Ok(())
	}

	/// Which operand this is.
	pub fn index(&self) -> usize { self.index }
	/// How many bits have been pushed.
	pub fn bit_count(&self) -> usize { self.nbits }
	/// How many bytes it takes to hold those bits.
	pub fn byte_count(&self) -> usize { (self.nbits + 7) / 8 }
	/// Whether compact display is on.
	pub fn is_compact(&self) -> bool { self.compact }

	/// Compact display leaves the sign off relative offsets and shows relative branches as just
	/// their target.
	pub fn set_compact(&mut self, compact: bool) {
		self.compact = compact;
	}

	/// The bits pushed so far, as a string of `0` and `1`.
	pub fn bit_string(&self) -> String {
		(0 .. self.nbits).rev()
			.map(|i| if (self.value >> i) & 1 != 0 { '1' } else { '0' })
			.collect()
	}

	// --------------------------------------------------------------------------------------------
	// Unsigned views

	pub fn value_u32(&self) -> u32 { self.value }
	pub fn value_u24(&self) -> u32 { self.value & 0xFF_FFFF }
	pub fn value_u16(&self) -> u16 { self.value as u16 }
	pub fn value_u8 (&self) -> u8  { self.value as u8 }

	pub fn hex_u32(&self) -> String { format!("0x{:08X}", self.value_u32()) }
	pub fn hex_u24(&self) -> String { format!("0x{:06X}", self.value_u24()) }
	pub fn hex_u16(&self) -> String { format!("0x{:04X}", self.value_u16()) }
	pub fn hex_u8 (&self) -> String { format!("0x{:02X}", self.value_u8()) }

	// --------------------------------------------------------------------------------------------
	// Signed views

	/// The low `width` bits as a two's complement number, split into (negative, magnitude).
	/// Zero counts as non-negative.
	pub fn sign_magnitude(&self, width: u32) -> (bool, u32) {
		debug_assert!(width >= 1 && width <= 32);
		let mask = ((1u64 << width) - 1) as u32;
		let low  = self.value & mask;

		if low & (1 << (width - 1)) != 0 {
			(true, ((1u64 << width) - low as u64) as u32)
		} else {
			(false, low)
		}
	}

	/// The low `width` bits, sign-extended.
	pub fn value_signed(&self, width: u32) -> i64 {
		match self.sign_magnitude(width) {
			(true, mag)  => -(mag as i64),
			(false, mag) => mag as i64,
		}
	}

	fn fmt_signed(&self, width: u32, digits: usize) -> String {
		let (neg, mag) = self.sign_magnitude(width);
		let sign = if neg { "-" } else { "" };
		format!("{}0x{:0digits$X}", sign, mag, digits = digits)
	}

	pub fn signed_8 (&self) -> String { self.fmt_signed(8,  2) }
	/// 13-bit fields live in two bytes, so they get 4 digits like 16-bit ones.
	pub fn signed_13(&self) -> String { self.fmt_signed(13, 4) }
	pub fn signed_16(&self) -> String { self.fmt_signed(16, 4) }
	pub fn signed_24(&self) -> String { self.fmt_signed(24, 6) }
	pub fn signed_32(&self) -> String { self.fmt_signed(32, 8) }

	// --------------------------------------------------------------------------------------------
	// Relative addresses (24-bit fields only)

	/// The 24-bit offset this field encodes.
	pub fn rel_offset(&self) -> i64 {
		self.value_signed(24)
	}

	/// The offset in decimal, with its sign. Compact mode leaves the sign off.
	pub fn rel_offset_str(&self) -> String {
		match self.sign_magnitude(24) {
			(_, mag) if self.compact => format!("{}", mag),
			(true, mag)              => format!("-{}", mag),
			(false, mag)             => format!("+{}", mag),
		}
	}

	/// The absolute address this offset points to, relative to `base`.
	pub fn rel_target(&self, base: VA) -> VA {
		base.offset(self.rel_offset())
	}

	pub fn rel_target_str(&self, base: VA) -> String {
		format!("0x{:06X}", self.rel_target(base).0)
	}

	/// `"<offset> => <target>"`, or just the target in compact mode.
	pub fn fmt_relative(&self, base: VA) -> String {
		if self.compact {
			self.rel_target_str(base)
		} else {
			format!("{} => {}", self.rel_offset_str(), self.rel_target_str(base))
		}
	}

	// --------------------------------------------------------------------------------------------
	// Floats

	/// The 32 bits reinterpreted as an IEEE-754 single.
	pub fn value_f32(&self) -> f32 {
		f32::from_bits(self.value)
	}

	pub fn fmt_f32(&self) -> String {
		self.value_f32().to_string()
	}
}

/// Builds a field out of the low `nbits` of `value`, as if they had been pushed one by one.
/// Anything past [`MAX_FIELD_BITS`] is dropped.
pub fn arg_from_bits(index: usize, value: u32, nbits: usize) -> ArgField {
	let nbits = nbits.min(MAX_FIELD_BITS);
	let mask  = ((1u64 << nbits) - 1) as u32;
	ArgField { index, nbits, value: value & mask, compact: false }
}
