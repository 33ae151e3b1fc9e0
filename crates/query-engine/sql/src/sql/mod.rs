//! Boolean fragments, literal quoting and the low-level SQL string they are rendered into.

pub mod ast;
pub mod helpers;
pub mod string;
