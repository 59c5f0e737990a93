use thiserror::Error;

use crate::{common::ast::Span, tokenizer::Token};

/// Raised when the token sequence does not match the grammar.
///
/// The error carries the offending token (or its span) and the name of
/// the innermost production being parsed. The partially built tree is
/// dropped, as parsing of the class stops here; the span is what the
/// diagnostic annotates, so the surrounding source is shown instead.
#[derive(Debug, Clone, Error)]
pub enum SyntaxError {
    #[error("expected {expected} in {production}, found `{found}`")]
    UnexpectedToken {
        expected: String,
        found: Token,
        production: &'static str,
    },
    #[error("expected {expected} in {production}, found end of input")]
    UnexpectedEndOfInput {
        expected: String,
        production: &'static str,
        span: Span,
    },
    #[error("integer constant `{token}` is out of range")]
    IntegerOutOfRange { token: Token },
    #[error("{production} nested more than {limit} levels deep")]
    NestingTooDeep {
        production: &'static str,
        limit: usize,
        span: Span,
    },
}

impl SyntaxError {
    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedToken { found, .. } => found.span.clone(),
            Self::UnexpectedEndOfInput { span, .. } | Self::NestingTooDeep { span, .. } => {
                span.clone()
            }
            Self::IntegerOutOfRange { token } => token.span.clone(),
        }
    }

    /// Short description for the annotated source label.
    pub fn label(&self) -> String {
        match self {
            Self::UnexpectedToken { expected, .. }
            | Self::UnexpectedEndOfInput { expected, .. } => format!("expected {expected}"),
            Self::IntegerOutOfRange { .. } => String::from("integer constant too large"),
            Self::NestingTooDeep { .. } => String::from("nested too deeply"),
        }
    }
}
