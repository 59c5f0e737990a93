//! Common data shared across the compiler stages
//! (e.g. the parse tree).
pub mod ast;
