//! Recursive-descent parsing of `Jack` tokens into a parse tree.
//!
//! There is one `parse_*` function per grammar rule, each consuming
//! exactly the tokens of its construct. Where the grammar needs it,
//! decisions are made with a single token of lookahead.
//!
//! Terms and statement blocks may nest into themselves. Their depth
//! is capped at [`MAX_NESTING_DEPTH`], so hostile input is reported as
//! a syntax error rather than exhausting the stack.

use std::str::FromStr;

#[allow(clippy::wildcard_imports)]
use crate::common::ast::*;
use crate::tokenizer::{Keyword, Token, TokenKind, Tokenizer};

pub use error::SyntaxError;

mod error;

type ParseResult<T> = Result<T, SyntaxError>;

/// How many terms and blocks may be open at once.
pub const MAX_NESTING_DEPTH: usize = 128;

fn unexpected(expected: &str, found: Token, production: &'static str) -> SyntaxError {
    SyntaxError::UnexpectedToken {
        expected: expected.to_owned(),
        found,
        production,
    }
}

#[derive(Debug)]
pub struct Parser {
    tokenizer: Tokenizer,
    /// Terms and blocks currently being parsed.
    depth: usize,
}

impl Parser {
    pub const fn new(tokenizer: Tokenizer) -> Self {
        Self {
            tokenizer,
            depth: 0,
        }
    }

    // region: Token helpers

    fn end_of_input(&self, expected: &str, production: &'static str) -> SyntaxError {
        SyntaxError::UnexpectedEndOfInput {
            expected: expected.to_owned(),
            production,
            span: self.tokenizer.end_of_input(),
        }
    }

    fn peek_required(&self, expected: &str, production: &'static str) -> ParseResult<&Token> {
        self.tokenizer
            .peek()
            .ok_or_else(|| self.end_of_input(expected, production))
    }

    fn advance_required(&mut self, expected: &str, production: &'static str) -> ParseResult<Token> {
        match self.tokenizer.advance() {
            Some(token) => Ok(token.clone()),
            None => Err(self.end_of_input(expected, production)),
        }
    }

    fn peek_is_symbol(&self, symbol: char) -> bool {
        self.tokenizer
            .peek()
            .is_some_and(|token| token.is_symbol(symbol))
    }

    fn peek_is_keyword(&self, keyword: Keyword) -> bool {
        self.tokenizer
            .peek()
            .is_some_and(|token| token.is_keyword(keyword))
    }

    fn expect_symbol(&mut self, symbol: char, production: &'static str) -> ParseResult<Token> {
        let expected = format!("`{symbol}`");
        let token = self.advance_required(&expected, production)?;

        if token.is_symbol(symbol) {
            Ok(token)
        } else {
            Err(unexpected(&expected, token, production))
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword, production: &'static str) -> ParseResult<Token> {
        let expected = format!("`{keyword}`");
        let token = self.advance_required(&expected, production)?;

        if token.is_keyword(keyword) {
            Ok(token)
        } else {
            Err(unexpected(&expected, token, production))
        }
    }

    fn expect_identifier(&mut self, production: &'static str) -> ParseResult<JackIdentifier> {
        let token = self.advance_required("an identifier", production)?;

        if token.kind == TokenKind::Identifier {
            Ok(JackIdentifier(token.text, token.span))
        } else {
            Err(unexpected("an identifier", token, production))
        }
    }

    /// Span of the next token, or the end of input.
    fn next_span(&self) -> Span {
        self.tokenizer
            .peek()
            .map_or_else(|| self.tokenizer.end_of_input(), |token| token.span.clone())
    }

    /// Run a production that can recurse into itself one level deeper.
    fn nested<T>(
        &mut self,
        production: &'static str,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(SyntaxError::NestingTooDeep {
                production,
                limit: MAX_NESTING_DEPTH,
                span: self.next_span(),
            });
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;

        result
    }

    fn peek_binary_operator(&self) -> Option<JackBinaryOperator> {
        self.tokenizer
            .peek()
            .filter(|token| token.kind == TokenKind::Symbol)
            .and_then(|token| JackBinaryOperator::from_str(&token.text).ok())
    }

    // endregion

    // region: Program structure

    /// Parse one compilation unit. Nothing may follow the class.
    pub fn parse_class(&mut self) -> ParseResult<JackClass> {
        const PRODUCTION: &str = "class";
        const EXPECTED_MEMBER: &str = "a class variable, a subroutine declaration or `}`";

        self.expect_keyword(Keyword::Class, PRODUCTION)?;
        let name = self.expect_identifier(PRODUCTION)?;
        self.expect_symbol('{', PRODUCTION)?;

        let mut members = Vec::new();
        loop {
            let token = self.peek_required(EXPECTED_MEMBER, PRODUCTION)?;
            if token.is_symbol('}') {
                break;
            }

            match token.keyword() {
                Some(Keyword::Static | Keyword::Field) => {
                    members.push(JackClassMember::Variable(self.parse_class_var_dec()?));
                }
                Some(Keyword::Constructor | Keyword::Function | Keyword::Method) => {
                    members.push(JackClassMember::Subroutine(self.parse_subroutine_dec()?));
                }
                _ => return Err(unexpected(EXPECTED_MEMBER, token.clone(), PRODUCTION)),
            }
        }
        self.expect_symbol('}', PRODUCTION)?;

        if let Some(token) = self.tokenizer.peek() {
            return Err(unexpected("end of input", token.clone(), PRODUCTION));
        }

        log::trace!("Parsed class `{name}` with {} members", members.len());

        Ok(JackClass { name, members })
    }

    fn parse_class_var_dec(&mut self) -> ParseResult<JackClassVarDec> {
        const PRODUCTION: &str = "classVarDec";

        let token = self.advance_required("`static` or `field`", PRODUCTION)?;
        let kind = match token.keyword() {
            Some(Keyword::Static) => JackClassVarKind::Static,
            Some(Keyword::Field) => JackClassVarKind::Field,
            _ => return Err(unexpected("`static` or `field`", token, PRODUCTION)),
        };

        let var_type = self.parse_type(PRODUCTION)?;
        let names = self.parse_variable_names(PRODUCTION)?;

        Ok(JackClassVarDec {
            kind,
            var_type,
            names,
        })
    }

    fn parse_type(&mut self, production: &'static str) -> ParseResult<JackType> {
        const EXPECTED: &str = "a type";

        let token = self.advance_required(EXPECTED, production)?;
        match (token.kind, token.keyword()) {
            (_, Some(Keyword::Int)) => Ok(JackType::Int),
            (_, Some(Keyword::Char)) => Ok(JackType::Char),
            (_, Some(Keyword::Boolean)) => Ok(JackType::Boolean),
            (TokenKind::Identifier, _) => {
                Ok(JackType::Class(JackIdentifier(token.text, token.span)))
            }
            _ => Err(unexpected(EXPECTED, token, production)),
        }
    }

    /// `varName (',' varName)* ';'`
    fn parse_variable_names(
        &mut self,
        production: &'static str,
    ) -> ParseResult<Vec<JackIdentifier>> {
        let mut names = vec![self.expect_identifier(production)?];

        while self.peek_is_symbol(',') {
            self.tokenizer.advance();
            names.push(self.expect_identifier(production)?);
        }
        self.expect_symbol(';', production)?;

        Ok(names)
    }

    fn parse_subroutine_dec(&mut self) -> ParseResult<JackSubroutineDec> {
        const PRODUCTION: &str = "subroutineDec";
        const EXPECTED_KIND: &str = "`constructor`, `function` or `method`";

        let token = self.advance_required(EXPECTED_KIND, PRODUCTION)?;
        let kind = match token.keyword() {
            Some(Keyword::Constructor) => JackSubroutineKind::Constructor,
            Some(Keyword::Function) => JackSubroutineKind::Function,
            Some(Keyword::Method) => JackSubroutineKind::Method,
            _ => return Err(unexpected(EXPECTED_KIND, token, PRODUCTION)),
        };

        let return_type = if self.peek_is_keyword(Keyword::Void) {
            self.tokenizer.advance();
            JackReturnType::Void
        } else {
            JackReturnType::Type(self.parse_type(PRODUCTION)?)
        };

        let name = self.expect_identifier(PRODUCTION)?;

        self.expect_symbol('(', PRODUCTION)?;
        let parameters = self.parse_parameter_list()?;
        self.expect_symbol(')', PRODUCTION)?;

        let body = self.parse_subroutine_body()?;

        Ok(JackSubroutineDec {
            kind,
            return_type,
            name,
            parameters,
            body,
        })
    }

    fn parse_parameter_list(&mut self) -> ParseResult<JackParameterList> {
        const PRODUCTION: &str = "parameterList";

        let mut parameters = Vec::new();
        if self.peek_is_symbol(')') {
            return Ok(JackParameterList(parameters));
        }

        loop {
            let var_type = self.parse_type(PRODUCTION)?;
            let name = self.expect_identifier(PRODUCTION)?;
            parameters.push(JackParameter { var_type, name });

            if !self.peek_is_symbol(',') {
                break;
            }
            self.tokenizer.advance();
        }

        Ok(JackParameterList(parameters))
    }

    fn parse_subroutine_body(&mut self) -> ParseResult<JackSubroutineBody> {
        const PRODUCTION: &str = "subroutineBody";

        self.expect_symbol('{', PRODUCTION)?;

        let mut variables = Vec::new();
        while self.peek_is_keyword(Keyword::Var) {
            variables.push(self.parse_var_dec()?);
        }

        let statements = self.parse_statements()?;
        self.expect_symbol('}', PRODUCTION)?;

        Ok(JackSubroutineBody {
            variables,
            statements,
        })
    }

    fn parse_var_dec(&mut self) -> ParseResult<JackVarDec> {
        const PRODUCTION: &str = "varDec";

        self.expect_keyword(Keyword::Var, PRODUCTION)?;
        let var_type = self.parse_type(PRODUCTION)?;
        let names = self.parse_variable_names(PRODUCTION)?;

        Ok(JackVarDec { var_type, names })
    }

    // endregion

    // region: Statements

    /// Statements run up to (not including) the closing `}` of their block.
    fn parse_statements(&mut self) -> ParseResult<JackStatements> {
        const PRODUCTION: &str = "statements";
        const EXPECTED: &str = "a statement or `}`";

        let mut statements = Vec::new();
        loop {
            let token = self.peek_required(EXPECTED, PRODUCTION)?;
            if token.is_symbol('}') {
                break;
            }

            let statement = match token.keyword() {
                Some(Keyword::Let) => JackStatement::Let(self.parse_let()?),
                Some(Keyword::If) => JackStatement::If(self.parse_if()?),
                Some(Keyword::While) => JackStatement::While(self.parse_while()?),
                Some(Keyword::Do) => JackStatement::Do(self.parse_do()?),
                Some(Keyword::Return) => JackStatement::Return(self.parse_return()?),
                _ => return Err(unexpected(EXPECTED, token.clone(), PRODUCTION)),
            };
            statements.push(statement);
        }

        Ok(JackStatements(statements))
    }

    fn parse_let(&mut self) -> ParseResult<JackLetStatement> {
        const PRODUCTION: &str = "letStatement";

        self.expect_keyword(Keyword::Let, PRODUCTION)?;
        let target = self.expect_identifier(PRODUCTION)?;

        let index = if self.peek_is_symbol('[') {
            self.tokenizer.advance();
            let index = self.parse_expression()?;
            self.expect_symbol(']', PRODUCTION)?;
            Some(index)
        } else {
            None
        };

        self.expect_symbol('=', PRODUCTION)?;
        let value = self.parse_expression()?;
        self.expect_symbol(';', PRODUCTION)?;

        Ok(JackLetStatement {
            target,
            index,
            value,
        })
    }

    fn parse_if(&mut self) -> ParseResult<JackIfStatement> {
        const PRODUCTION: &str = "ifStatement";

        self.expect_keyword(Keyword::If, PRODUCTION)?;
        self.expect_symbol('(', PRODUCTION)?;
        let condition = self.parse_expression()?;
        self.expect_symbol(')', PRODUCTION)?;

        let then_branch = self.parse_block(PRODUCTION)?;

        let else_branch = if self.peek_is_keyword(Keyword::Else) {
            self.tokenizer.advance();
            Some(self.parse_block(PRODUCTION)?)
        } else {
            None
        };

        Ok(JackIfStatement {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn parse_while(&mut self) -> ParseResult<JackWhileStatement> {
        const PRODUCTION: &str = "whileStatement";

        self.expect_keyword(Keyword::While, PRODUCTION)?;
        self.expect_symbol('(', PRODUCTION)?;
        let condition = self.parse_expression()?;
        self.expect_symbol(')', PRODUCTION)?;

        let body = self.parse_block(PRODUCTION)?;

        Ok(JackWhileStatement { condition, body })
    }

    /// `'{' statements '}'`
    fn parse_block(&mut self, production: &'static str) -> ParseResult<JackStatements> {
        self.nested(production, |parser| {
            parser.expect_symbol('{', production)?;
            let statements = parser.parse_statements()?;
            parser.expect_symbol('}', production)?;

            Ok(statements)
        })
    }

    fn parse_do(&mut self) -> ParseResult<JackDoStatement> {
        const PRODUCTION: &str = "doStatement";

        self.expect_keyword(Keyword::Do, PRODUCTION)?;
        let name = self.expect_identifier(PRODUCTION)?;
        let call = self.parse_subroutine_call(name)?;
        self.expect_symbol(';', PRODUCTION)?;

        Ok(JackDoStatement { call })
    }

    fn parse_return(&mut self) -> ParseResult<JackReturnStatement> {
        const PRODUCTION: &str = "returnStatement";

        self.expect_keyword(Keyword::Return, PRODUCTION)?;

        let value = if self.peek_is_symbol(';') {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_symbol(';', PRODUCTION)?;

        Ok(JackReturnStatement { value })
    }

    // endregion

    // region: Expressions

    fn parse_expression(&mut self) -> ParseResult<JackExpression> {
        let first = self.parse_term()?;

        let mut rest = Vec::new();
        while let Some(operator) = self.peek_binary_operator() {
            self.tokenizer.advance();
            rest.push((operator, self.parse_term()?));
        }

        Ok(JackExpression { first, rest })
    }

    fn parse_term(&mut self) -> ParseResult<JackTerm> {
        self.nested("term", Self::parse_term_at_depth)
    }

    fn parse_term_at_depth(&mut self) -> ParseResult<JackTerm> {
        const PRODUCTION: &str = "term";
        const EXPECTED: &str = "a term";

        let token = self.advance_required(EXPECTED, PRODUCTION)?;

        match token.kind {
            TokenKind::IntegerConstant => match token.int_val() {
                Some(value) => Ok(JackTerm::IntegerConstant(JackInteger(value, token.text))),
                None => Err(SyntaxError::IntegerOutOfRange { token }),
            },
            TokenKind::StringConstant => Ok(JackTerm::StringConstant(token.text)),
            TokenKind::Keyword => match token.keyword() {
                Some(Keyword::True) => Ok(JackTerm::KeywordConstant(JackKeywordConstant::True)),
                Some(Keyword::False) => Ok(JackTerm::KeywordConstant(JackKeywordConstant::False)),
                Some(Keyword::Null) => Ok(JackTerm::KeywordConstant(JackKeywordConstant::Null)),
                Some(Keyword::This) => Ok(JackTerm::KeywordConstant(JackKeywordConstant::This)),
                _ => Err(unexpected(EXPECTED, token, PRODUCTION)),
            },
            TokenKind::Symbol if token.is_symbol('(') => {
                let expression = self.parse_expression()?;
                self.expect_symbol(')', PRODUCTION)?;
                Ok(JackTerm::Parenthesized(Box::new(expression)))
            }
            TokenKind::Symbol => match JackUnaryOperator::from_str(&token.text) {
                Ok(operator) => Ok(JackTerm::Unary(operator, Box::new(self.parse_term()?))),
                Err(_) => Err(unexpected(EXPECTED, token, PRODUCTION)),
            },
            TokenKind::Identifier => {
                let name = JackIdentifier(token.text, token.span);

                match self.tokenizer.peek().and_then(Token::symbol) {
                    Some('[') => {
                        self.tokenizer.advance();
                        let index = self.parse_expression()?;
                        self.expect_symbol(']', PRODUCTION)?;
                        Ok(JackTerm::ArrayAccess(name, Box::new(index)))
                    }
                    Some('(' | '.') => {
                        Ok(JackTerm::SubroutineCall(self.parse_subroutine_call(name)?))
                    }
                    _ => Ok(JackTerm::Variable(name)),
                }
            }
        }
    }

    /// Parse the remainder of a call whose first identifier was already consumed.
    fn parse_subroutine_call(&mut self, first: JackIdentifier) -> ParseResult<JackSubroutineCall> {
        const PRODUCTION: &str = "subroutineCall";

        let (receiver, name) = if self.peek_is_symbol('.') {
            self.tokenizer.advance();
            (Some(first), self.expect_identifier(PRODUCTION)?)
        } else {
            (None, first)
        };

        self.expect_symbol('(', PRODUCTION)?;
        let arguments = self.parse_expression_list()?;
        self.expect_symbol(')', PRODUCTION)?;

        Ok(JackSubroutineCall {
            receiver,
            name,
            arguments,
        })
    }

    fn parse_expression_list(&mut self) -> ParseResult<JackExpressionList> {
        let mut expressions = Vec::new();
        if self.peek_is_symbol(')') {
            return Ok(JackExpressionList(expressions));
        }

        loop {
            expressions.push(self.parse_expression()?);

            if !self.peek_is_symbol(',') {
                break;
            }
            self.tokenizer.advance();
        }

        Ok(JackExpressionList(expressions))
    }

    // endregion
}
