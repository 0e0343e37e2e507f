//! The rules for turning argument fields into operand text. Which rule applies is decided by
//! the *shape* of each operand token in the opcode table's mnemonic (`r`, `(rrr)`, `nnn)`,
//! `fr`, `f`...), which is figured out once by [`Syntax::parse`].

// ------------------------------------------------------------------------------------------------
// Sub-modules
// ------------------------------------------------------------------------------------------------

mod form;
mod render;

pub use form::*;
pub use render::*;
