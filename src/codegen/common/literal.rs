use crate::{codegen::vm, common::ast};

pub fn construct_integer(i: usize) -> Vec<vm::VMInstruction> {
    vec![vm::push(vm::Segment::Constant, i)]
}

/// Build a `String` object: allocate it with the final length,
/// then append the characters one by one.
pub fn construct_string(s: &str) -> Vec<vm::VMInstruction> {
    let mut instructions = vec![
        vm::push(vm::Segment::Constant, s.chars().count()),
        vm::call("String.new", 1),
    ];

    for c in s.chars() {
        // `appendChar` returns the string, keeping it on the stack
        instructions.push(vm::push(vm::Segment::Constant, to_character_code(c)));
        instructions.push(vm::call("String.appendChar", 2));
    }

    instructions
}

pub fn construct_keyword(keyword: ast::JackKeywordConstant) -> Vec<vm::VMInstruction> {
    match keyword {
        // true is all ones (-1)
        ast::JackKeywordConstant::True => vec![
            vm::push(vm::Segment::Constant, 0),
            vm::command(vm::VMCommand::Not),
        ],
        ast::JackKeywordConstant::False | ast::JackKeywordConstant::Null => {
            vec![vm::push(vm::Segment::Constant, 0)]
        }
        ast::JackKeywordConstant::This => vec![vm::push(vm::Segment::Pointer, 0)],
    }
}

fn to_character_code(c: char) -> usize {
    u32::from(c) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer() {
        assert_eq!(
            construct_integer(32767),
            vec![vm::push(vm::Segment::Constant, 32767)]
        );
    }

    #[test]
    fn test_string() {
        // "A b" keeps its space
        let expected = [
            "push constant 3",
            "call String.new 1",
            "push constant 65",
            "call String.appendChar 2",
            "push constant 32",
            "call String.appendChar 2",
            "push constant 98",
            "call String.appendChar 2",
        ]
        .join("\n");

        assert_eq!(
            vm::VMInstructionBlock::from(construct_string("A b")).compile(),
            expected
        );
    }

    #[test]
    fn test_empty_string() {
        let expected = ["push constant 0", "call String.new 1"].join("\n");

        assert_eq!(
            vm::VMInstructionBlock::from(construct_string("")).compile(),
            expected
        );
    }

    #[test]
    fn test_keyword_constants() {
        let compile = |keyword| vm::VMInstructionBlock::from(construct_keyword(keyword)).compile();

        assert_eq!(
            compile(ast::JackKeywordConstant::True),
            ["push constant 0", "not"].join("\n")
        );
        assert_eq!(compile(ast::JackKeywordConstant::False), "push constant 0");
        assert_eq!(compile(ast::JackKeywordConstant::Null), "push constant 0");
        assert_eq!(compile(ast::JackKeywordConstant::This), "push pointer 0");
    }
}
