//! Export of the parse tree as the nand2tetris XML document.
//!
//! Every non-terminal becomes an element and every terminal a leaf
//! tagged with its token kind. Subroutine calls have no element
//! of their own and are written inline.

use crate::{common::ast, tokenizer::TokenKind};

const INDENT: &str = "  ";

/// Render a class as XML, one element or terminal per line.
pub fn export(class: &ast::JackClass) -> String {
    let mut writer = XmlWriter::default();
    writer.class(class);
    writer.output
}

fn escape(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '<' => String::from("&lt;"),
            '>' => String::from("&gt;"),
            '&' => String::from("&amp;"),
            '"' => String::from("&quot;"),
            c => c.to_string(),
        })
        .collect()
}

#[derive(Debug, Default)]
struct XmlWriter {
    output: String,
    depth: usize,
}

impl XmlWriter {
    // region: primitives

    fn line(&mut self, content: &str) {
        self.output.push_str(&INDENT.repeat(self.depth));
        self.output.push_str(content);
        self.output.push('\n');
    }

    fn open(&mut self, tag: &str) {
        self.line(&format!("<{tag}>"));
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth -= 1;
        self.line(&format!("</{tag}>"));
    }

    fn terminal(&mut self, kind: TokenKind, text: &str) {
        self.line(&format!("<{kind}> {} </{kind}>", escape(text)));
    }

    fn keyword(&mut self, keyword: &str) {
        self.terminal(TokenKind::Keyword, keyword);
    }

    fn symbol(&mut self, symbol: &str) {
        self.terminal(TokenKind::Symbol, symbol);
    }

    fn identifier(&mut self, identifier: &ast::JackIdentifier) {
        self.terminal(TokenKind::Identifier, &identifier.0);
    }

    // endregion

    fn class(&mut self, class: &ast::JackClass) {
        self.open("class");
        self.keyword("class");
        self.identifier(&class.name);
        self.symbol("{");

        for member in &class.members {
            match member {
                ast::JackClassMember::Variable(declaration) => self.class_var_dec(declaration),
                ast::JackClassMember::Subroutine(subroutine) => self.subroutine_dec(subroutine),
            }
        }

        self.symbol("}");
        self.close("class");
    }

    fn class_var_dec(&mut self, declaration: &ast::JackClassVarDec) {
        self.open("classVarDec");
        self.keyword(&declaration.kind.to_string());
        self.variable_names(&declaration.var_type, &declaration.names);
        self.close("classVarDec");
    }

    /// `type name (, name)* ;`
    fn variable_names(&mut self, var_type: &ast::JackType, names: &[ast::JackIdentifier]) {
        self.jack_type(var_type);

        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                self.symbol(",");
            }
            self.identifier(name);
        }

        self.symbol(";");
    }

    fn jack_type(&mut self, var_type: &ast::JackType) {
        match var_type {
            ast::JackType::Class(name) => self.identifier(name),
            primitive => self.keyword(&primitive.to_string()),
        }
    }

    fn subroutine_dec(&mut self, subroutine: &ast::JackSubroutineDec) {
        self.open("subroutineDec");
        self.keyword(&subroutine.kind.to_string());

        match &subroutine.return_type {
            ast::JackReturnType::Void => self.keyword("void"),
            ast::JackReturnType::Type(var_type) => self.jack_type(var_type),
        }

        self.identifier(&subroutine.name);
        self.symbol("(");
        self.parameter_list(&subroutine.parameters);
        self.symbol(")");
        self.subroutine_body(&subroutine.body);
        self.close("subroutineDec");
    }

    fn parameter_list(&mut self, parameters: &ast::JackParameterList) {
        self.open("parameterList");

        for (i, parameter) in parameters.0.iter().enumerate() {
            if i > 0 {
                self.symbol(",");
            }
            self.jack_type(&parameter.var_type);
            self.identifier(&parameter.name);
        }

        self.close("parameterList");
    }

    fn subroutine_body(&mut self, body: &ast::JackSubroutineBody) {
        self.open("subroutineBody");
        self.symbol("{");

        for declaration in &body.variables {
            self.open("varDec");
            self.keyword("var");
            self.variable_names(&declaration.var_type, &declaration.names);
            self.close("varDec");
        }

        self.statements(&body.statements);
        self.symbol("}");
        self.close("subroutineBody");
    }

    // region: statements

    fn statements(&mut self, statements: &ast::JackStatements) {
        self.open("statements");

        for statement in &statements.0 {
            match statement {
                ast::JackStatement::Let(statement) => self.let_statement(statement),
                ast::JackStatement::If(statement) => self.if_statement(statement),
                ast::JackStatement::While(statement) => self.while_statement(statement),
                ast::JackStatement::Do(statement) => self.do_statement(statement),
                ast::JackStatement::Return(statement) => self.return_statement(statement),
            }
        }

        self.close("statements");
    }

    /// `{ statements }`
    fn block(&mut self, statements: &ast::JackStatements) {
        self.symbol("{");
        self.statements(statements);
        self.symbol("}");
    }

    fn let_statement(&mut self, statement: &ast::JackLetStatement) {
        self.open("letStatement");
        self.keyword("let");
        self.identifier(&statement.target);

        if let Some(index) = &statement.index {
            self.symbol("[");
            self.expression(index);
            self.symbol("]");
        }

        self.symbol("=");
        self.expression(&statement.value);
        self.symbol(";");
        self.close("letStatement");
    }

    fn if_statement(&mut self, statement: &ast::JackIfStatement) {
        self.open("ifStatement");
        self.keyword("if");
        self.symbol("(");
        self.expression(&statement.condition);
        self.symbol(")");
        self.block(&statement.then_branch);

        if let Some(else_branch) = &statement.else_branch {
            self.keyword("else");
            self.block(else_branch);
        }

        self.close("ifStatement");
    }

    fn while_statement(&mut self, statement: &ast::JackWhileStatement) {
        self.open("whileStatement");
        self.keyword("while");
        self.symbol("(");
        self.expression(&statement.condition);
        self.symbol(")");
        self.block(&statement.body);
        self.close("whileStatement");
    }

    fn do_statement(&mut self, statement: &ast::JackDoStatement) {
        self.open("doStatement");
        self.keyword("do");
        self.subroutine_call(&statement.call);
        self.symbol(";");
        self.close("doStatement");
    }

    fn return_statement(&mut self, statement: &ast::JackReturnStatement) {
        self.open("returnStatement");
        self.keyword("return");

        if let Some(value) = &statement.value {
            self.expression(value);
        }

        self.symbol(";");
        self.close("returnStatement");
    }

    // endregion

    // region: expressions

    fn expression(&mut self, expression: &ast::JackExpression) {
        self.open("expression");
        self.term(&expression.first);

        for (operator, term) in &expression.rest {
            self.symbol(&operator.to_string());
            self.term(term);
        }

        self.close("expression");
    }

    fn term(&mut self, term: &ast::JackTerm) {
        self.open("term");

        match term {
            ast::JackTerm::IntegerConstant(integer) => {
                self.terminal(TokenKind::IntegerConstant, &integer.1);
            }
            ast::JackTerm::StringConstant(s) => self.terminal(TokenKind::StringConstant, s),
            ast::JackTerm::KeywordConstant(keyword) => self.keyword(&keyword.to_string()),
            ast::JackTerm::Variable(name) => self.identifier(name),
            ast::JackTerm::ArrayAccess(name, index) => {
                self.identifier(name);
                self.symbol("[");
                self.expression(index);
                self.symbol("]");
            }
            ast::JackTerm::SubroutineCall(call) => self.subroutine_call(call),
            ast::JackTerm::Parenthesized(inner) => {
                self.symbol("(");
                self.expression(inner);
                self.symbol(")");
            }
            ast::JackTerm::Unary(operator, operand) => {
                self.symbol(&operator.to_string());
                self.term(operand);
            }
        }

        self.close("term");
    }

    fn subroutine_call(&mut self, call: &ast::JackSubroutineCall) {
        if let Some(receiver) = &call.receiver {
            self.identifier(receiver);
            self.symbol(".");
        }

        self.identifier(&call.name);
        self.symbol("(");
        self.expression_list(&call.arguments);
        self.symbol(")");
    }

    fn expression_list(&mut self, expressions: &ast::JackExpressionList) {
        self.open("expressionList");

        for (i, expression) in expressions.0.iter().enumerate() {
            if i > 0 {
                self.symbol(",");
            }
            self.expression(expression);
        }

        self.close("expressionList");
    }

    // endregion
}
