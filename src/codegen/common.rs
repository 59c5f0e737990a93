//! Lowering of statements and expressions, shared by all subroutine kinds.

pub mod expression;
pub mod literal;
pub mod statement;
pub mod subroutine_call;
pub mod term;
pub mod variable;
