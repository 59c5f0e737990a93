//! The Hack VM instruction vocabulary, as consumed by the VM translator.

use std::io::{self, Write};

use crate::symbol_table::SymbolKind;

/// Output of one class: the code of each subroutine, in declaration order.
#[derive(Debug, Default)]
pub struct VMModule {
    subroutines: Vec<VMInstructionBlock>,
}

impl VMModule {
    pub const fn new() -> Self {
        Self {
            subroutines: Vec::new(),
        }
    }

    pub fn add_subroutine(&mut self, code: VMInstructionBlock) {
        self.subroutines.push(code);
    }

    pub fn instructions(&self) -> impl Iterator<Item = &VMInstruction> {
        self.subroutines.iter().flat_map(|code| code.0.iter())
    }

    /// The module as text, lines separated (not terminated) by `\n`.
    pub fn compile(&self) -> String {
        self.instructions()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Write the module one instruction per line.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for instruction in self.instructions() {
            writeln!(writer, "{instruction}")?;
        }

        Ok(())
    }
}

/// A run of instructions, e.g. the code of a single subroutine.
#[derive(Debug, Default)]
pub struct VMInstructionBlock(Vec<VMInstruction>);

impl VMInstructionBlock {
    pub fn compile(&self) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<Vec<VMInstruction>> for VMInstructionBlock {
    fn from(instructions: Vec<VMInstruction>) -> Self {
        Self(instructions)
    }
}

// region: constructors

pub const fn push(segment: Segment, index: usize) -> VMInstruction {
    VMInstruction::Push(segment, index)
}

pub const fn pop(segment: Segment, index: usize) -> VMInstruction {
    VMInstruction::Pop(segment, index)
}

/// Arithmetic and logical commands.
pub const fn command(command: VMCommand) -> VMInstruction {
    VMInstruction::Command(command)
}

pub const fn vm_return() -> VMInstruction {
    VMInstruction::Command(VMCommand::Return)
}

/// `label`, `goto` or `if-goto`, depending on `action`.
pub fn label(action: LabelAction, name: impl Into<String>) -> VMInstruction {
    VMInstruction::Label(action, name.into())
}

/// Start of a subroutine that uses `local_count` locals.
pub fn function(name: impl Into<String>, local_count: usize) -> VMInstruction {
    VMInstruction::Function(name.into(), local_count)
}

/// Call of a subroutine with `argument_count` values already pushed.
pub fn call(name: impl Into<String>, argument_count: usize) -> VMInstruction {
    VMInstruction::Call(name.into(), argument_count)
}

// endregion

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VMInstruction {
    Push(Segment, usize),
    Pop(Segment, usize),
    Command(VMCommand),
    Label(LabelAction, String),
    Function(String, usize),
    Call(String, usize),
}

impl std::fmt::Display for VMInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Push(segment, index) => write!(f, "push {segment} {index}"),
            Self::Pop(segment, index) => write!(f, "pop {segment} {index}"),
            Self::Command(command) => write!(f, "{command}"),
            Self::Label(action, name) => write!(f, "{action} {name}"),
            Self::Function(name, local_count) => write!(f, "function {name} {local_count}"),
            Self::Call(name, argument_count) => write!(f, "call {name} {argument_count}"),
        }
    }
}

#[derive(Debug, strum::Display, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case")]
pub enum VMCommand {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
    Return,
}

#[derive(Debug, strum::Display, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case")]
pub enum LabelAction {
    Label,
    Goto,
    IfGoto,
}

#[derive(Debug, strum::Display, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case")]
pub enum Segment {
    Local,
    Argument,
    Static,
    Constant,
    This,
    That,
    Pointer,
    Temp,
}

impl From<SymbolKind> for Segment {
    fn from(kind: SymbolKind) -> Self {
        match kind {
            SymbolKind::Static => Self::Static,
            SymbolKind::Field => Self::This,
            SymbolKind::Argument => Self::Argument,
            SymbolKind::Local => Self::Local,
        }
    }
}
