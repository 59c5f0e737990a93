//! Lexical analysis of `Jack` source code.
//!
//! The source is first reduced to a flat list of classified [`Token`]s
//! (comments and whitespace are dropped as trivia), which a [`Tokenizer`]
//! then hands out one at a time, with a single token of lookahead.

use chumsky::prelude::*;
use phf::{phf_map, phf_set};
use thiserror::Error;

use crate::common::ast::Span;

static SYMBOLS: phf::Set<char> = phf_set! {
    '{', '}', '(', ')', '[', ']', '.', ',', ';',
    '+', '-', '*', '/', '&', '|', '<', '>', '=', '~',
};

static KEYWORDS: phf::Map<&'static str, Keyword> = phf_map! {
    "class" => Keyword::Class,
    "constructor" => Keyword::Constructor,
    "function" => Keyword::Function,
    "method" => Keyword::Method,
    "field" => Keyword::Field,
    "static" => Keyword::Static,
    "var" => Keyword::Var,
    "int" => Keyword::Int,
    "char" => Keyword::Char,
    "boolean" => Keyword::Boolean,
    "void" => Keyword::Void,
    "true" => Keyword::True,
    "false" => Keyword::False,
    "null" => Keyword::Null,
    "this" => Keyword::This,
    "let" => Keyword::Let,
    "do" => Keyword::Do,
    "if" => Keyword::If,
    "else" => Keyword::Else,
    "while" => Keyword::While,
    "return" => Keyword::Return,
};

#[derive(Debug, PartialEq, Eq, Clone, Copy, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
    Class,
    Constructor,
    Function,
    Method,
    Field,
    Static,
    Var,
    Int,
    Char,
    Boolean,
    Void,
    True,
    False,
    Null,
    This,
    Let,
    Do,
    If,
    Else,
    While,
    Return,
}

/// Token categories. The display form doubles as the
/// terminal element name in the analyzer's XML output.
#[derive(Debug, PartialEq, Eq, Clone, Copy, strum::Display)]
#[strum(serialize_all = "camelCase")]
pub enum TokenKind {
    Keyword,
    Symbol,
    IntegerConstant,
    StringConstant,
    Identifier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Token text; string constants are stored without their quotes.
    pub text: String,
    pub span: Span,
}

impl Token {
    /// Classify a run of non-symbol, non-whitespace characters.
    fn classify(text: &str) -> TokenKind {
        if KEYWORDS.contains_key(text) {
            TokenKind::Keyword
        } else if text.chars().all(|c| c.is_ascii_digit()) {
            TokenKind::IntegerConstant
        } else {
            TokenKind::Identifier
        }
    }

    pub fn keyword(&self) -> Option<Keyword> {
        if self.kind != TokenKind::Keyword {
            return None;
        }

        KEYWORDS.get(self.text.as_str()).copied()
    }

    pub fn symbol(&self) -> Option<char> {
        if self.kind != TokenKind::Symbol {
            return None;
        }

        self.text.chars().next()
    }

    pub fn identifier(&self) -> Option<&str> {
        (self.kind == TokenKind::Identifier).then_some(self.text.as_str())
    }

    /// Value of an integer constant, if it is one and fits a VM index.
    pub fn int_val(&self) -> Option<usize> {
        if self.kind != TokenKind::IntegerConstant {
            return None;
        }

        self.text.parse().ok()
    }

    pub fn string_val(&self) -> Option<&str> {
        (self.kind == TokenKind::StringConstant).then_some(self.text.as_str())
    }

    pub fn is_symbol(&self, symbol: char) -> bool {
        self.symbol() == Some(symbol)
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword() == Some(keyword)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::StringConstant => write!(f, "\"{}\"", self.text),
            _ => write!(f, "{}", self.text),
        }
    }
}

// region: Lexer

type LexParseError = Simple<char>;

/// Raised when the source cannot be split into tokens,
/// which only happens for unterminated strings and block comments.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct LexicalError {
    pub message: String,
    pub span: Span,
}

impl From<LexParseError> for LexicalError {
    fn from(error: LexParseError) -> Self {
        let message = match error.found().copied() {
            None => String::from(
                "unexpected end of input (unterminated string literal or comment)",
            ),
            Some('"') => String::from("unterminated string literal"),
            Some(c) => format!("unexpected character `{c}`"),
        };

        Self {
            message,
            span: error.span(),
        }
    }
}

fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !SYMBOLS.contains(&c)
}

/// Comments (`// ...`, `/* ... */`, `/** ... */`) and whitespace.
fn trivia() -> impl Parser<char, (), Error = LexParseError> + Clone {
    let line_comment = just("//").then(none_of('\n').repeated()).ignored();
    let block_comment = just("/*").then(take_until(just("*/"))).ignored();
    let whitespace = filter(|c: &char| c.is_whitespace()).ignored();

    line_comment
        .or(block_comment)
        .or(whitespace)
        .repeated()
        .ignored()
}

fn lexer() -> impl Parser<char, Vec<Token>, Error = LexParseError> {
    let symbol = filter(|c: &char| SYMBOLS.contains(c)).map(|c| (TokenKind::Symbol, c.to_string()));

    let string = just('"')
        .ignore_then(none_of('"').repeated())
        .then_ignore(just('"'))
        .map(|chars: Vec<char>| (TokenKind::StringConstant, chars.into_iter().collect()));

    // a quote only opens a string at the start of a token
    let word = filter(|c: &char| is_word_char(*c) && *c != '"')
        .then(filter(|c: &char| is_word_char(*c)).repeated())
        .map(|(first, rest): (char, Vec<char>)| {
            let text: String = std::iter::once(first).chain(rest).collect();
            (Token::classify(&text), text)
        });

    let token = symbol
        .or(string)
        .or(word)
        .map_with_span(|(kind, text), span| Token { kind, text, span });

    trivia()
        .ignore_then(token.then_ignore(trivia()).repeated())
        .then_ignore(end())
}

/// A terminated block comment is always consumed as trivia, so an adjacent
/// `/` `*` pair left in the token stream marks one that never ends.
fn check_unterminated_comment(tokens: &[Token], source_length: usize) -> Result<(), LexicalError> {
    let unterminated = tokens.windows(2).find(|pair| {
        pair[0].is_symbol('/') && pair[1].is_symbol('*') && pair[0].span.end == pair[1].span.start
    });

    match unterminated {
        Some(pair) => Err(LexicalError {
            message: String::from("unterminated block comment"),
            span: pair[0].span.start..source_length,
        }),
        None => Ok(()),
    }
}

/// Split source text into classified tokens, dropping comments and whitespace.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexicalError> {
    let tokens = lexer().parse(source).map_err(|errors| {
        errors.into_iter().next().map_or_else(
            || LexicalError {
                message: String::from("invalid input"),
                span: Span::default(),
            },
            LexicalError::from,
        )
    })?;

    check_unterminated_comment(&tokens, source.len())?;

    Ok(tokens)
}

// endregion

// region: Tokenizer

/// Cursor over the tokens of one compilation unit.
///
/// One token is "current" at a time; [`Tokenizer::peek`] looks at the token
/// the next [`Tokenizer::advance`] would produce without moving the cursor.
#[derive(Debug)]
pub struct Tokenizer {
    tokens: Vec<Token>,
    /// Index of the token the next `advance` will make current.
    next: usize,
    source_length: usize,
}

impl Tokenizer {
    pub fn new(source: &str) -> Result<Self, LexicalError> {
        let tokens = tokenize(source)?;
        log::trace!("Tokenized {} tokens", tokens.len());

        Ok(Self {
            tokens,
            next: 0,
            source_length: source.len(),
        })
    }

    pub fn has_more_tokens(&self) -> bool {
        self.next < self.tokens.len()
    }

    /// Make the next token current and return it,
    /// or `None` if the input is exhausted.
    pub fn advance(&mut self) -> Option<&Token> {
        if !self.has_more_tokens() {
            return None;
        }

        self.next += 1;
        self.current()
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.next)
    }

    pub fn current(&self) -> Option<&Token> {
        self.next.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    pub fn token_type(&self) -> Option<TokenKind> {
        self.current().map(|token| token.kind)
    }

    pub fn key_word(&self) -> Option<Keyword> {
        self.current().and_then(Token::keyword)
    }

    pub fn symbol(&self) -> Option<char> {
        self.current().and_then(Token::symbol)
    }

    pub fn identifier(&self) -> Option<&str> {
        self.current().and_then(Token::identifier)
    }

    pub fn int_val(&self) -> Option<usize> {
        self.current().and_then(Token::int_val)
    }

    pub fn string_val(&self) -> Option<&str> {
        self.current().and_then(Token::string_val)
    }

    /// Zero-width span at the end of the source,
    /// used to report a premature end of input.
    pub const fn end_of_input(&self) -> Span {
        self.source_length..self.source_length
    }
}

// endregion
