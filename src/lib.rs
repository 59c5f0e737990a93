//! A compiler from `Jack` classes to Hack VM code.
//!
//! Each `.jack` file holds exactly one class and is compiled on its own:
//! the source is tokenized, parsed into a complete tree and then lowered
//! to VM instructions. Calls into other classes are not resolved here.

pub mod analyzer;
pub mod codegen;
pub mod common;
pub mod error;
pub mod fileio;
pub mod parser;
pub mod symbol_table;
pub mod tokenizer;

pub use error::Error;

use common::ast;
use parser::Parser;
use tokenizer::Tokenizer;

/// Compile the source of one class.
pub fn compile(source: &str) -> Result<codegen::vm::VMModule, Error> {
    let class = parse(source)?;

    Ok(codegen::construct_class(&class))
}

/// Render the parse tree of one class as XML.
pub fn analyze(source: &str) -> Result<String, Error> {
    let class = parse(source)?;

    Ok(analyzer::export(&class))
}

fn parse(source: &str) -> Result<ast::JackClass, Error> {
    let tokenizer = Tokenizer::new(source)?;
    let class = Parser::new(tokenizer).parse_class()?;

    Ok(class)
}
