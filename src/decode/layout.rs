
use smallvec::{ smallvec, SmallVec };

use crate::decode::{ ExtractError, ExtractErrorKind, ExtractResult, ArgField, MAX_ARGS, MAX_BYTES };

// ------------------------------------------------------------------------------------------------
// BitRole
// ------------------------------------------------------------------------------------------------

/// What one character of a template says about the bit in that position.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum BitRole {
	/// `o`: part of a secondary opcode (already used to look up the instruction).
	Opcode,
	/// `0`: always zero.
	Zero,
	/// `1`: always one.
	One,
	/// `u`: unused.
	Unused,
	/// `A`..`F`: the next bit of argument 0..5.
	Arg(u8),
	/// Anything else. Only reported once someone tries to extract with it.
	Bad(char),
}

impl BitRole {
	fn from_char(c: char) -> Self {
		match c {
			'o'         => BitRole::Opcode,
			'0'         => BitRole::Zero,
			'1'         => BitRole::One,
			'u'         => BitRole::Unused,
			'A' ..= 'F' => BitRole::Arg(c as u8 - b'A'),
			_           => BitRole::Bad(c),
		}
	}
}

// ------------------------------------------------------------------------------------------------
// Layout
// ------------------------------------------------------------------------------------------------

/// A parsed bit-layout template. Templates describe the bytes *after* the opcode byte, 8
/// characters per byte, and may have whitespace between the groups, e.g.
/// `"AAAAAuuu BBBBBBBB BBBBBBBB"`.
///
/// These are immutable and shared between every instruction decoded from the same template.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Layout {
	template: String,
	roles:    Vec<BitRole>,
	num_args: usize,
	byte_len: usize,
}

impl Layout {
	pub fn parse(template: &str) -> Self {
		let template: String = template.chars().filter(|c| !c.is_whitespace()).collect();
		let roles: Vec<_> = template.chars().map(BitRole::from_char).collect();

		let num_args = roles.iter()
			.filter_map(|r| match r { BitRole::Arg(i) => Some(*i as usize + 1), _ => None })
			.max()
			.unwrap_or(0);

		let byte_len = roles.len() / 8 + 1;
		Self { template, roles, num_args, byte_len }
	}

	/// The template with whitespace removed.
	pub fn template(&self) -> &str { &self.template }
	/// What each bit position is for.
	pub fn roles(&self) -> &[BitRole] { &self.roles }
	/// How many argument fields an instruction with this layout has. This assumes the letters
	/// are used starting at `A` with no gaps.
	pub fn num_args(&self) -> usize { self.num_args }
	/// How many bytes the whole instruction is, *including* the opcode byte.
	pub fn byte_len(&self) -> usize { self.byte_len }

	/// How many bits belong to argument `i`.
	pub fn arg_bits(&self, i: usize) -> usize {
		self.roles.iter().filter(|r| **r == BitRole::Arg(i as u8)).count()
	}

	/// Pulls argument bits out of `bytes` (the whole instruction, opcode byte included) into
	/// `args`, which must already have `num_args()` empty fields in it. On error, `args` is
	/// left holding whatever was extracted before the problem.
	pub fn extract(&self, bytes: &[u8], args: &mut [ArgField]) -> ExtractResult<()> {
		let operand_bytes = bytes.get(1 ..).unwrap_or(&[]);

		for (pos, role) in self.roles.iter().enumerate() {
			match *role {
				BitRole::Arg(i) => {
					let bit = bit_at(operand_bytes, pos)
						.ok_or_else(|| ExtractError::new(pos, ExtractErrorKind::OutOfBits))?;
					let arg = args.get_mut(i as usize)
						.ok_or_else(|| ExtractError::new(pos, ExtractErrorKind::NoSuchArg(i)))?;
					arg.push_bit(bit).map_err(|kind| ExtractError::new(pos, kind))?;
				}

				BitRole::Bad(c) =>
					return Err(ExtractError::new(pos, ExtractErrorKind::BadTemplateChar(c))),

				_ => {}
			}
		}

		Ok(())
	}

	/// The inverse of extraction: builds the bytes of an instruction with this layout.
	/// `secondary` supplies the `o` bits (most-significant first), `args` supplies each
	/// argument's value, truncated to however many bits the template gives it. Unused bits
	/// are zero.
	pub fn encode(&self, opcode: u8, secondary: u32, args: &[u32]) -> SmallVec<[u8; MAX_BYTES]> {
		let mut ret: SmallVec<[u8; MAX_BYTES]> = smallvec![0; self.byte_len];
		ret[0] = opcode;

		let num_sec = self.roles.iter().filter(|r| **r == BitRole::Opcode).count();
		let mut arg_left: SmallVec<[usize; MAX_ARGS]> =
			(0 .. self.num_args).map(|i| self.arg_bits(i)).collect();
		let mut sec_left = num_sec;

		// only whole groups make it into the instruction.
		for (pos, role) in self.roles.iter().enumerate().take((self.byte_len - 1) * 8) {
			let bit = match *role {
				BitRole::One => true,
				BitRole::Opcode => {
					sec_left -= 1;
					shr(secondary as u64, sec_left)
				}
				BitRole::Arg(i) => {
					let i = i as usize;
					arg_left[i] -= 1;
					shr(args.get(i).copied().unwrap_or(0) as u64, arg_left[i])
				}
				_ => false,
			};

			if bit {
				ret[1 + pos / 8] |= 0x80 >> (pos % 8);
			}
		}

		ret
	}
}

/// Bit number `pos` of `bytes`, counting from the MSB of the first byte.
fn bit_at(bytes: &[u8], pos: usize) -> Option<bool> {
	bytes.get(pos / 8).map(|b| (b >> (7 - pos % 8)) & 1 != 0)
}

/// Bit number `n` of `val`, or false if `n` is past the top.
fn shr(val: u64, n: usize) -> bool {
	val.checked_shr(n as u32).map_or(false, |v| v & 1 != 0)
}
