//! Types representing the parse tree of a single `Jack` class.
//!
//! There is one type per grammar production, and each stores its
//! children in source order, so the original token sequence
//! can be reconstructed from the tree (see [`crate::analyzer`]).
//!
//! Note: all types are prefixed with `Jack` to avoid potential
//! name collision with existing keywords/phrases (e.g. Type).

/// Associate AST elements with their corresponding
/// source code span (for better error reporting).
pub type Span = std::ops::Range<usize>;

// region: non-terminals

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JackClass {
    pub name: JackIdentifier,
    /// Class variable and subroutine declarations, in file order.
    pub members: Vec<JackClassMember>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JackClassMember {
    Variable(JackClassVarDec),
    Subroutine(JackSubroutineDec),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JackClassVarDec {
    pub kind: JackClassVarKind,
    pub var_type: JackType,
    pub names: Vec<JackIdentifier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum JackClassVarKind {
    Static,
    Field,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JackSubroutineDec {
    pub kind: JackSubroutineKind,
    pub return_type: JackReturnType,
    pub name: JackIdentifier,
    pub parameters: JackParameterList,
    pub body: JackSubroutineBody,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum JackSubroutineKind {
    Constructor,
    Function,
    Method,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JackReturnType {
    Void,
    Type(JackType),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JackParameterList(pub Vec<JackParameter>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JackParameter {
    pub var_type: JackType,
    pub name: JackIdentifier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JackSubroutineBody {
    pub variables: Vec<JackVarDec>,
    pub statements: JackStatements,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JackVarDec {
    pub var_type: JackType,
    pub names: Vec<JackIdentifier>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JackStatements(pub Vec<JackStatement>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JackStatement {
    Let(JackLetStatement),
    If(JackIfStatement),
    While(JackWhileStatement),
    Do(JackDoStatement),
    Return(JackReturnStatement),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JackLetStatement {
    pub target: JackIdentifier,
    /// Present for array element assignment (`let a[i] = ...`).
    pub index: Option<JackExpression>,
    pub value: JackExpression,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JackIfStatement {
    pub condition: JackExpression,
    pub then_branch: JackStatements,
    pub else_branch: Option<JackStatements>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JackWhileStatement {
    pub condition: JackExpression,
    pub body: JackStatements,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JackDoStatement {
    pub call: JackSubroutineCall,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JackReturnStatement {
    pub value: Option<JackExpression>,
}

/// `term (op term)*`, kept flat: all binary operators share
/// one precedence level and associate to the left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JackExpression {
    pub first: JackTerm,
    pub rest: Vec<(JackBinaryOperator, JackTerm)>,
}

impl JackExpression {
    /// Construct an expression consisting of a single term.
    ///
    /// Most commonly used in tests.
    pub const fn term(term: JackTerm) -> Self {
        Self {
            first: term,
            rest: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JackTerm {
    IntegerConstant(JackInteger),
    StringConstant(String),
    KeywordConstant(JackKeywordConstant),
    Variable(JackIdentifier),
    ArrayAccess(JackIdentifier, Box<JackExpression>),
    SubroutineCall(JackSubroutineCall),
    Parenthesized(Box<JackExpression>),
    Unary(JackUnaryOperator, Box<JackTerm>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JackExpressionList(pub Vec<JackExpression>);

/// Either `name(args)` or `receiver.name(args)`, where the receiver
/// is a variable or a class name (decided during code generation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JackSubroutineCall {
    pub receiver: Option<JackIdentifier>,
    pub name: JackIdentifier,
    pub arguments: JackExpressionList,
}

// endregion

// region: terminals

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JackType {
    Int,
    Char,
    Boolean,
    Class(JackIdentifier),
}

impl std::fmt::Display for JackType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Char => write!(f, "char"),
            Self::Boolean => write!(f, "boolean"),
            Self::Class(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum JackKeywordConstant {
    True,
    False,
    Null,
    This,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum JackBinaryOperator {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mult,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "&")]
    And,
    #[strum(serialize = "|")]
    Or,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = "=")]
    Eq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum JackUnaryOperator {
    #[strum(serialize = "-")]
    Neg,
    #[strum(serialize = "~")]
    Not,
}

/// Value of an integer constant along with its source text
/// (which may have leading zeros).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JackInteger(pub usize, pub String);

impl From<usize> for JackInteger {
    fn from(value: usize) -> Self {
        Self(value, value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JackIdentifier(pub String, pub Span);

impl JackIdentifier {
    /// Construct an internally used Jack identifier
    /// (as opposed to a parsed one).
    ///
    /// Most commonly used in tests.
    pub fn internal(name: &str) -> Self {
        // did not come from a source file, so does not have a related span
        Self(name.to_owned(), Span::default())
    }
}

impl std::fmt::Display for JackIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// endregion
