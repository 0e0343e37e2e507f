
use parse_display::Display;
use smallvec::SmallVec;

use crate::decode::{ MAX_ARGS };

// ------------------------------------------------------------------------------------------------
// Bracket
// ------------------------------------------------------------------------------------------------

/// Which parentheses are glued onto an operand token, as in `(rrr)`, `(rrr`, or `rrr)`.
#[derive(Debug, Display, PartialEq, Eq, Copy, Clone)]
pub enum Bracket {
	#[display("none")]  None,
	#[display("open")]  Open,
	#[display("close")] Close,
	#[display("both")]  Both,
}

impl Bracket {
	/// Splits the brackets off a token, returning them and what's left.
	fn strip(token: &str) -> (Bracket, &str) {
		let (open, rest)  = match token.strip_prefix('(') { Some(r) => (true, r),  None => (false, token) };
		let (close, rest) = match rest.strip_suffix(')')  { Some(r) => (true, r),  None => (false, rest)  };

		let bracket = match (open, close) {
			(false, false) => Bracket::None,
			(true,  false) => Bracket::Open,
			(false, true)  => Bracket::Close,
			(true,  true)  => Bracket::Both,
		};

		(bracket, rest)
	}

	/// Puts the same brackets around `s`.
	pub fn wrap(self, s: &str) -> String {
		match self {
			Bracket::None  => s.into(),
			Bracket::Open  => format!("({}", s),
			Bracket::Close => format!("{})", s),
			Bracket::Both  => format!("({})", s),
		}
	}
}

// ------------------------------------------------------------------------------------------------
// OperandForm
// ------------------------------------------------------------------------------------------------

/// The shape of one operand token in an opcode table mnemonic. The shape (not the letters
/// themselves) decides how the matching argument field gets printed.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum OperandForm {
	/// `r`, `rr`, `(rrr)` etc: `count` consecutive registers starting at the field's value.
	Register { count: usize, bracket: Bracket },
	/// `fr`: a float register.
	FloatRegister,
	/// `n`, `nnn`, `(nnn)` etc: a number, printed according to the field's size.
	Number { bracket: Bracket },
	/// `f`: a condition flag.
	Flag,
	/// Anything else is printed as-is and doesn't use up a field.
	Literal,
}

impl OperandForm {
	/// Figures out the shape of one (already trimmed) operand token.
	pub fn classify(token: &str) -> Self {
		let (bracket, body) = Bracket::strip(token);

		if token == "fr" {
			OperandForm::FloatRegister
		} else if token.contains('r') {
			OperandForm::Register { count: body.matches('r').count(), bracket }
		} else if token.contains('n') {
			OperandForm::Number { bracket }
		} else if token.contains('f') {
			OperandForm::Flag
		} else {
			OperandForm::Literal
		}
	}

	/// Does this operand take its value from an argument field?
	pub fn uses_field(&self) -> bool {
		!matches!(self, OperandForm::Literal)
	}
}

// ------------------------------------------------------------------------------------------------
// OperandToken
// ------------------------------------------------------------------------------------------------

/// One comma-separated piece of a mnemonic's operand list.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct OperandToken {
	/// The token as written in the opcode table.
	pub text:  String,
	pub form:  OperandForm,
	/// Which argument field it reads, if any.
	pub field: Option<usize>,
}

// ------------------------------------------------------------------------------------------------
// Syntax
// ------------------------------------------------------------------------------------------------

/// A parsed opcode table mnemonic like `"LD r, (rrr, nnn)"`: the operator keyword and the
/// classified operand tokens. Parsed once per distinct mnemonic and shared.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Syntax {
	text:     String,
	operator: String,
	operands: SmallVec<[OperandToken; MAX_ARGS]>,
}

impl Syntax {
	pub fn parse(mnemonic: &str) -> Self {
		let (operator, rest) = match mnemonic.find(' ') {
			Some(i) => (&mnemonic[.. i], Some(&mnemonic[i + 1 ..])),
			None    => (mnemonic, None),
		};

		let mut operands = SmallVec::new();

		if let Some(rest) = rest {
			let mut next_field = 0;

			for text in rest.split(',').map(str::trim) {
				let form = OperandForm::classify(text);

				let field = if form.uses_field() {
					next_field += 1;
					Some(next_field - 1)
				} else {
					None
				};

				operands.push(OperandToken { text: text.into(), form, field });
			}
		}

		Self { text: mnemonic.into(), operator: operator.into(), operands }
	}

	/// The mnemonic exactly as given.
	pub fn text(&self) -> &str { &self.text }
	/// The keyword before the first space.
	pub fn operator(&self) -> &str { &self.operator }
	/// The operand tokens; empty if the mnemonic has no space in it.
	pub fn operands(&self) -> &[OperandToken] { &self.operands }
	/// Whether there's anything to render, or if the mnemonic is printed verbatim.
	pub fn has_operands(&self) -> bool { self.text.contains(' ') }
}
