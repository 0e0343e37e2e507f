
use crate::arch::{ IFlagNames };
use crate::decode::{ ArgField };
use crate::memory::{ VA };
use crate::print::{ Bracket, OperandForm, OperandToken, Syntax };

// ------------------------------------------------------------------------------------------------
// Register names
// ------------------------------------------------------------------------------------------------

/// Register names. The first three letters are repeated at the end so that a run of up to 3
/// registers starting at `Y` or `Z` wraps around to `A`.
const REG_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZABC";

/// The highest register number that has a name.
pub const MAX_REG: u8 = 25;

/// Names `count` consecutive registers starting at `index`, e.g. `(1, 3)` is `BCD`. Indexes
/// past [`MAX_REG`] (or runs that fall off the end of the alphabet) come out as `count`
/// question marks.
pub fn register_name(index: u8, count: usize) -> String {
	let start = index as usize;

	match REG_ALPHABET.get(start .. start + count) {
		Some(name) if index <= MAX_REG => name.into(),
		_                              => "?".repeat(count),
	}
}

// ------------------------------------------------------------------------------------------------
// RenderCtx
// ------------------------------------------------------------------------------------------------

/// Everything about the instruction (other than the field itself) that affects how an operand
/// is printed.
#[derive(Copy, Clone)]
pub struct RenderCtx<'f> {
	/// Address of the instruction, for resolving relative offsets.
	pub va:       VA,
	/// 24-bit numbers are relative branch offsets.
	pub relative: bool,
	/// Numbers are signed.
	pub signed:   bool,
	/// 32-bit numbers are floats.
	pub float:    bool,
	pub flags:    &'f dyn IFlagNames,
}

// ------------------------------------------------------------------------------------------------
// Operand rendering
// ------------------------------------------------------------------------------------------------

/// Prints one operand token, given the field it refers to. `arg` can be `None` if bit
/// extraction failed before this field got filled in; the token is printed as-is then.
pub fn render_operand(tok: &OperandToken, arg: Option<&ArgField>, ctx: &RenderCtx) -> String {
	let arg = match (&tok.form, arg) {
		(OperandForm::Literal, _) => return tok.text.clone(),
		(_, Some(arg))            => arg,
		(_, None) => {
			log::warn!("no field for operand '{}' at {}", tok.text, ctx.va);
			return tok.text.clone();
		}
	};

	match tok.form {
		OperandForm::Register { count, bracket } =>
			bracket.wrap(&register_name(arg.value_u8(), count)),
		OperandForm::FloatRegister =>
			format!("F{}", arg.value_u8()),
		OperandForm::Number { bracket } =>
			render_number(bracket, arg, ctx),
		OperandForm::Flag =>
			ctx.flags.flag_name(arg.value_u8()),
		OperandForm::Literal =>
			tok.text.clone(),
	}
}

fn render_number(bracket: Bracket, arg: &ArgField, ctx: &RenderCtx) -> String {
	match bracket {
		Bracket::Both  => format!("({})", arg.hex_u24()),
		Bracket::Close => format!("{})", arg.signed_24()),
		Bracket::Open  => format!("({}", arg.hex_u24()),
		Bracket::None  => match arg.byte_count() {
			4 if ctx.float    => arg.fmt_f32(),
			4 if ctx.signed   => arg.signed_32(),
			4                 => arg.hex_u32(),
			3 if ctx.relative => arg.fmt_relative(ctx.va),
			3 if ctx.signed   => arg.signed_24(),
			3                 => arg.hex_u24(),
			2 if ctx.signed && arg.bit_count() == 13
			                  => arg.signed_13(),
			2 if ctx.signed   => arg.signed_16(),
			2                 => arg.hex_u16(),
			1 if ctx.signed   => arg.signed_8(),
			1                 => arg.hex_u8(),
			_                 => arg.hex_u32(),
		},
	}
}

// ------------------------------------------------------------------------------------------------
// Composition
// ------------------------------------------------------------------------------------------------

/// Prints a whole instruction: the operator, then each operand separated by `", "`, then
/// register-plus-offset pairs in parens get merged with [`merge_parens`].
pub fn compose(syntax: &Syntax, args: &[ArgField], ctx: &RenderCtx) -> String {
	if !syntax.has_operands() {
		return syntax.text().into();
	}

	let operands: Vec<String> = syntax.operands().iter()
		.map(|tok| render_operand(tok, tok.field.and_then(|i| args.get(i)), ctx))
		.collect();

	merge_parens(&format!("{} {}", syntax.operator(), operands.join(", ")))
}

/// Rewrites every `(X,Y)` (where neither X nor Y has parens or commas in it) as `(X + Y)`,
/// so a register operand and an offset operand read as one indirect address. If Y is
/// negative, it already has its own sign and goes right after X instead: `(X -5)`.
pub fn merge_parens(text: &str) -> String {
	let mut out  = String::with_capacity(text.len() + 2);
	let mut rest = text;

	while let Some(open) = rest.find('(') {
		out.push_str(&rest[..= open]);
		rest = &rest[open + 1 ..];

		if let Some((x, y, len)) = split_pair(rest) {
			out.push_str(x);

			if y.trim_start().starts_with('-') {
				out.push_str(y);
			} else {
				out.push_str(" + ");
				out.push_str(y.trim());
			}

			out.push(')');
			rest = &rest[len ..];
		}
	}

	out.push_str(rest);
	out
}

/// If `s` starts with `X,Y)`, returns X, Y, and the length of the whole thing.
fn split_pair(s: &str) -> Option<(&str, &str, usize)> {
	let is_delim = |c: char| matches!(c, '(' | ')' | ',');

	let comma = s.find(is_delim)?;

	if comma == 0 || !s[comma ..].starts_with(',') {
		return None;
	}

	let tail  = &s[comma + 1 ..];
	let close = tail.find(is_delim)?;

	if close == 0 || !tail[close ..].starts_with(')') {
		return None;
	}

	Some((&s[.. comma], &tail[.. close], comma + 1 + close + 1))
}
