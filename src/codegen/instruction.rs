//! Structured three-address instructions
//!
//! Instructions stay structured until the output boundary, where `Display`
//! renders each one as a single line of text. Branch targets are [`LabelRef`]s:
//! a forward branch is emitted [`LabelRef::Pending`] and patched in place once
//! its label is placed.

use crate::parser::ast::{BinOp, UnOp};
use std::fmt;

/// Compiler temporary, rendered `t<N>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Temp(pub usize);

impl fmt::Display for Temp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Opaque label handle, rendered `L<N>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelId(pub usize);

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Branch target, either still awaiting its label or patched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRef {
    Pending,
    Resolved(LabelId),
}

impl fmt::Display for LabelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelRef::Pending => f.write_str("?"),
            LabelRef::Resolved(label) => write!(f, "{}", label),
        }
    }
}

/// The name holding a computed value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    Temp(Temp),
    /// A source-level variable or array name
    Name(String),
    /// Numeric literal text, verbatim
    Literal(String),
    Bool(bool),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Temp(temp) => write!(f, "{}", temp),
            Operand::Name(name) | Operand::Literal(name) => f.write_str(name),
            Operand::Bool(value) => write!(f, "{}", value),
        }
    }
}

/// One three-address instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `dest = lhs op rhs`
    Binary {
        dest: Operand,
        lhs: Operand,
        op: BinOp,
        rhs: Operand,
    },
    /// `dest = <op>operand`
    Unary {
        dest: Operand,
        op: UnOp,
        operand: Operand,
    },
    /// `dest = src`
    Copy { dest: Operand, src: Operand },
    /// `dest = array[index]`
    IndexedLoad {
        dest: Operand,
        array: String,
        index: Operand,
    },
    /// `array[index] = src`
    IndexedStore {
        array: String,
        index: Operand,
        src: Operand,
    },
    /// `dest = call function(args...)`
    Call {
        dest: Operand,
        function: String,
        args: Vec<Operand>,
    },
    /// `if condition == value goto target`
    Branch {
        condition: Operand,
        value: Operand,
        target: LabelRef,
    },
    /// `goto target`
    Jump { target: LabelRef },
    /// `label L`
    Label(LabelId),
    /// `return [value]`
    Return(Option<Operand>),
}

impl Instruction {
    /// The operand this instruction writes, if any
    pub fn destination(&self) -> Option<&Operand> {
        match self {
            Instruction::Binary { dest, .. }
            | Instruction::Unary { dest, .. }
            | Instruction::Copy { dest, .. }
            | Instruction::IndexedLoad { dest, .. }
            | Instruction::Call { dest, .. } => Some(dest),
            _ => None,
        }
    }

    /// Branch or jump target
    pub fn target(&self) -> Option<LabelRef> {
        match self {
            Instruction::Branch { target, .. } | Instruction::Jump { target } => Some(*target),
            _ => None,
        }
    }

    /// Point a pending branch or jump at `label`.
    ///
    /// Panics if the instruction is not a pending branch: only placeholders may be rewritten.
    pub(crate) fn patch_target(&mut self, label: LabelId) {
        match self {
            Instruction::Branch { target, .. } | Instruction::Jump { target }
                if *target == LabelRef::Pending =>
            {
                *target = LabelRef::Resolved(label);
            }
            other => panic!("backpatch of {label} hit a non-pending instruction: {other}"),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Binary { dest, lhs, op, rhs } => {
                write!(f, "{} = {} {} {}", dest, lhs, op, rhs)
            }
            Instruction::Unary { dest, op, operand } => write!(f, "{} = {}{}", dest, op, operand),
            Instruction::Copy { dest, src } => write!(f, "{} = {}", dest, src),
            Instruction::IndexedLoad { dest, array, index } => {
                write!(f, "{} = {}[{}]", dest, array, index)
            }
            Instruction::IndexedStore { array, index, src } => {
                write!(f, "{}[{}] = {}", array, index, src)
            }
            Instruction::Call {
                dest,
                function,
                args,
            } => {
                let args: Vec<String> = args.iter().map(Operand::to_string).collect();
                write!(f, "{} = call {}({})", dest, function, args.join(", "))
            }
            Instruction::Branch {
                condition,
                value,
                target,
            } => write!(f, "if {} == {} goto {}", condition, value, target),
            Instruction::Jump { target } => write!(f, "goto {}", target),
            Instruction::Label(label) => write!(f, "label {}", label),
            Instruction::Return(Some(value)) => write!(f, "return {}", value),
            Instruction::Return(None) => f.write_str("return"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> Operand {
        Operand::Name(s.to_string())
    }

    #[test]
    fn test_render_forms() {
        let cases = [
            (
                Instruction::Binary {
                    dest: Operand::Temp(Temp(2)),
                    lhs: name("x"),
                    op: BinOp::Add,
                    rhs: Operand::Temp(Temp(1)),
                },
                "t2 = x + t1",
            ),
            (
                Instruction::Unary {
                    dest: Operand::Temp(Temp(1)),
                    op: UnOp::Neg,
                    operand: name("a"),
                },
                "t1 = -a",
            ),
            (
                Instruction::IndexedStore {
                    array: "arr".to_string(),
                    index: Operand::Literal("0".to_string()),
                    src: name("a"),
                },
                "arr[0] = a",
            ),
            (
                Instruction::Call {
                    dest: Operand::Temp(Temp(3)),
                    function: "f".to_string(),
                    args: vec![],
                },
                "t3 = call f()",
            ),
            (
                Instruction::Branch {
                    condition: Operand::Temp(Temp(1)),
                    value: Operand::Bool(false),
                    target: LabelRef::Resolved(LabelId(4)),
                },
                "if t1 == false goto L4",
            ),
            (Instruction::Label(LabelId(4)), "label L4"),
            (Instruction::Return(None), "return"),
        ];

        for (instruction, text) in cases {
            assert_eq!(instruction.to_string(), text);
        }
    }

    #[test]
    fn test_patch_pending_jump() {
        let mut jump = Instruction::Jump {
            target: LabelRef::Pending,
        };
        assert_eq!(jump.to_string(), "goto ?");
        jump.patch_target(LabelId(7));
        assert_eq!(jump.target(), Some(LabelRef::Resolved(LabelId(7))));
    }

    #[test]
    #[should_panic(expected = "non-pending")]
    fn test_patch_resolved_jump_panics() {
        let mut jump = Instruction::Jump {
            target: LabelRef::Resolved(LabelId(1)),
        };
        jump.patch_target(LabelId(2));
    }
}
