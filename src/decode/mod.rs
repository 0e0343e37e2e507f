//! Template-driven decoding: pulling operand bits out of raw instruction bytes according to
//! an opcode's bit-layout template, and the instruction type that holds the results.

// ------------------------------------------------------------------------------------------------
// Sub-modules
// ------------------------------------------------------------------------------------------------

mod arg;
mod error;
mod inst;
mod layout;

pub use arg::*;
pub use error::*;
pub use inst::*;
pub use layout::*;
