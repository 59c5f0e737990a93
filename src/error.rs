//! Errors that stop the compilation of a class.

use std::io;

use ariadne::{Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::{common::ast::Span, parser::SyntaxError, tokenizer::LexicalError};

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("lexical error: {0}")]
    Lexical(#[from] LexicalError),
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
}

impl Error {
    pub fn span(&self) -> Span {
        match self {
            Self::Lexical(error) => error.span.clone(),
            Self::Syntax(error) => error.span(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Lexical(error) => error.message.clone(),
            Self::Syntax(error) => error.label(),
        }
    }

    const fn title(&self) -> &'static str {
        match self {
            Self::Lexical(_) => "Lexical error",
            Self::Syntax(_) => "Syntax error",
        }
    }
}

/// Print an annotated excerpt of `content` pointing at the error to stderr.
pub fn report(file_path: &str, content: &str, error: &Error) -> io::Result<()> {
    Report::build(ReportKind::Error, file_path, error.span().start)
        .with_message(format!("{}: {error}", error.title()))
        .with_label(Label::new((file_path, error.span())).with_message(error.label()))
        .finish()
        .eprint((file_path, Source::from(content)))
}
