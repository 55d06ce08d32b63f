//! AST → three-address code
//!
//! [`TacGenerator`] walks the tree once, post-order, appending to an
//! append-only instruction log. Every node returns the operand holding its
//! value (a temporary, a variable name or a literal), or `None` for statements.
//!
//! # Control flow lowering
//!
//! ```text
//! if (c) A else B        while (c) B             a && b
//!   tc = c                 label Ls                ta = a
//!   if tc == false goto F  goto Lc                 if ta == false goto S
//!   A                      label Lc                tb = b
//!   goto E                 tc = c                  t = tb
//!   label F                if tc == false goto E   goto E
//!   B                      B                       label S
//!   label E                goto Ls                 t = false
//!                          label E                 label E
//! ```
//!
//! `||` is the same shape with `true`. Temporaries and labels are numbered in
//! allocation order, so output is deterministic for a given tree.

use super::instruction::{Instruction, LabelId, LabelRef, Operand, Temp};
use super::labels::LabelTable;
use crate::parser::ast::{AssignTarget, AstNode, BinOp, CaseNode, SourceLocation};
use std::fmt;

/// Generated code: instructions in emission order, each paired with the
/// location of the node that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TacProgram {
    instructions: Vec<Instruction>,
    locations: Vec<SourceLocation>,
}

impl TacProgram {
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn location(&self, index: usize) -> Option<SourceLocation> {
        self.locations.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// One rendered line per instruction
    pub fn lines(&self) -> Vec<String> {
        self.instructions.iter().map(|i| i.to_string()).collect()
    }

    /// Index of the `label` instruction placing `label`
    pub fn label_position(&self, label: LabelId) -> Option<usize> {
        self.instructions
            .iter()
            .position(|i| *i == Instruction::Label(label))
    }
}

impl fmt::Display for TacProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in &self.instructions {
            writeln!(f, "{}", instruction)?;
        }
        Ok(())
    }
}

/// Per-invocation generator state
#[derive(Debug, Default)]
pub struct TacGenerator {
    temp_counter: usize,
    labels: LabelTable,
    code: Vec<Instruction>,
    locations: Vec<SourceLocation>,
    current_location: SourceLocation,
}

impl TacGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate code for `node`, returning the operand holding its value
    pub fn generate(&mut self, node: &AstNode) -> Option<Operand> {
        let saved = std::mem::replace(&mut self.current_location, node.location());
        let result = self.generate_node(node);
        self.current_location = saved;
        result
    }

    /// Finish the pass and hand over the log.
    ///
    /// Panics if any branch still waits on a label that was never placed.
    pub fn finish(self) -> TacProgram {
        let unresolved = self.labels.unresolved();
        assert!(
            unresolved.is_empty(),
            "branch targets never placed: {unresolved:?}"
        );

        TacProgram {
            instructions: self.code,
            locations: self.locations,
        }
    }

    fn generate_node(&mut self, node: &AstNode) -> Option<Operand> {
        match node {
            AstNode::Program { statements, .. } | AstNode::Block { statements, .. } => {
                self.generate_all(statements);
                None
            }
            AstNode::FunctionDeclaration { body, .. } => {
                self.generate(body);
                None
            }

            AstNode::VariableDeclaration {
                name, initializer, ..
            } => {
                if let Some(init) = initializer {
                    let src = self.value(init);
                    self.emit(Instruction::Copy {
                        dest: Operand::Name(name.clone()),
                        src,
                    });
                }
                None
            }
            AstNode::ArrayDeclaration {
                name, initializer, ..
            } => {
                for (i, element) in initializer.iter().enumerate() {
                    let src = self.value(element);
                    self.emit(Instruction::IndexedStore {
                        array: name.clone(),
                        index: Operand::Literal(i.to_string()),
                        src,
                    });
                }
                None
            }

            AstNode::Assignment { target, value, .. } => {
                let src = self.value(value);
                match target {
                    AssignTarget::Variable(name) => self.emit(Instruction::Copy {
                        dest: Operand::Name(name.clone()),
                        src,
                    }),
                    AssignTarget::Element { name, index } => {
                        let index = self.value(index);
                        self.emit(Instruction::IndexedStore {
                            array: name.clone(),
                            index,
                            src,
                        });
                    }
                }
                Some(Operand::Name(target.name().to_string()))
            }

            AstNode::If {
                condition,
                then_block,
                else_block,
                ..
            } => {
                self.generate_if(condition, then_block, else_block.as_deref());
                None
            }
            AstNode::While {
                condition, body, ..
            } => {
                self.generate_while(condition, body);
                None
            }
            AstNode::Switch { expr, cases, .. } => {
                self.generate_switch(expr, cases);
                None
            }

            // No jump semantics are attached to these
            AstNode::Break { .. } | AstNode::Continue { .. } => None,

            AstNode::Return { expr, .. } => {
                let value = expr.as_deref().map(|e| self.value(e));
                self.emit(Instruction::Return(value));
                None
            }

            AstNode::BinaryOp {
                op: op @ (BinOp::And | BinOp::Or),
                left,
                right,
                ..
            } => Some(self.generate_logical(*op, left, right)),
            AstNode::BinaryOp {
                op, left, right, ..
            } => {
                let lhs = self.value(left);
                let rhs = self.value(right);
                let dest = self.new_temp();
                self.emit(Instruction::Binary {
                    dest: dest.clone(),
                    lhs,
                    op: *op,
                    rhs,
                });
                Some(dest)
            }
            AstNode::UnaryOp { op, operand, .. } => {
                let operand = self.value(operand);
                let dest = self.new_temp();
                self.emit(Instruction::Unary {
                    dest: dest.clone(),
                    op: *op,
                    operand,
                });
                Some(dest)
            }
            AstNode::FunctionCall { name, args, .. } => {
                let args: Vec<Operand> = args.iter().map(|arg| self.value(arg)).collect();
                let dest = self.new_temp();
                self.emit(Instruction::Call {
                    dest: dest.clone(),
                    function: name.clone(),
                    args,
                });
                Some(dest)
            }
            AstNode::ArrayAccess { name, index, .. } => {
                let index = self.value(index);
                let dest = self.new_temp();
                self.emit(Instruction::IndexedLoad {
                    dest: dest.clone(),
                    array: name.clone(),
                    index,
                });
                Some(dest)
            }
            AstNode::Identifier(name, _) => Some(Operand::Name(name.clone())),
            AstNode::Number(text, _) => Some(Operand::Literal(text.clone())),
        }
    }

    fn generate_all(&mut self, statements: &[AstNode]) {
        for stmt in statements {
            self.generate(stmt);
        }
    }

    /// Generate an expression and return where its value lives
    fn value(&mut self, node: &AstNode) -> Operand {
        match self.generate(node) {
            Some(operand) => operand,
            None => panic!("{:?} used where a value is required", node.kind()),
        }
    }

    fn generate_if(
        &mut self,
        condition: &AstNode,
        then_block: &AstNode,
        else_block: Option<&AstNode>,
    ) {
        let cond = self.value(condition);
        let false_label = self.labels.request_label();
        let end_label = self.labels.request_label();

        self.emit_branch(cond, Operand::Bool(false), false_label);
        self.generate(then_block);

        match else_block {
            Some(else_block) => {
                self.emit_jump(end_label);
                self.place_label(false_label);
                self.generate(else_block);
                self.place_label(end_label);
            }
            None => self.place_label(false_label),
        }
    }

    fn generate_while(&mut self, condition: &AstNode, body: &AstNode) {
        let start_label = self.labels.request_label();
        let condition_label = self.labels.request_label();
        let end_label = self.labels.request_label();

        self.place_label(start_label);
        self.emit_jump(condition_label);
        self.place_label(condition_label);

        let cond = self.value(condition);
        self.emit_branch(cond, Operand::Bool(false), end_label);

        self.generate(body);
        self.emit_jump(start_label);
        self.place_label(end_label);
    }

    /// Short-circuit `&&` / `||` with one result temporary and two labels
    fn generate_logical(&mut self, op: BinOp, left: &AstNode, right: &AstNode) -> Operand {
        // && is decided by a false left side, || by a true one
        let short_circuit = Operand::Bool(op == BinOp::Or);

        let lhs = self.value(left);
        let short_label = self.labels.request_label();
        let end_label = self.labels.request_label();

        self.emit_branch(lhs, short_circuit.clone(), short_label);

        let rhs = self.value(right);
        let result = self.new_temp();
        self.emit(Instruction::Copy {
            dest: result.clone(),
            src: rhs,
        });
        self.emit_jump(end_label);

        self.place_label(short_label);
        self.emit(Instruction::Copy {
            dest: result.clone(),
            src: short_circuit,
        });
        self.place_label(end_label);

        result
    }

    /// Case tests first, then the bodies. Case bodies jump to the end label;
    /// the default body is emitted last and falls through to it.
    fn generate_switch(&mut self, expr: &AstNode, cases: &[CaseNode]) {
        let scrutinee = self.value(expr);
        let end_label = self.labels.request_label();

        let mut case_labels = Vec::with_capacity(cases.len());
        for case in cases {
            if let CaseNode::Case { value, .. } = case {
                let label = self.labels.request_label();
                let case_value = self.value(value);
                self.emit_branch(scrutinee.clone(), case_value, label);
                case_labels.push(label);
            }
        }

        let has_default = cases.iter().any(|c| matches!(c, CaseNode::Default { .. }));
        let default_label = if has_default {
            let label = self.labels.request_label();
            self.emit_jump(label);
            Some(label)
        } else {
            None
        };

        let mut case_labels = case_labels.into_iter();
        for case in cases {
            match case {
                CaseNode::Case {
                    statements,
                    location,
                    ..
                } => {
                    if let Some(label) = case_labels.next() {
                        self.at(*location, |this| {
                            this.place_label(label);
                            this.generate_all(statements);
                            this.emit_jump(end_label);
                        });
                    }
                }
                CaseNode::Default {
                    statements,
                    location,
                } => {
                    if let Some(label) = default_label {
                        self.at(*location, |this| {
                            this.place_label(label);
                            this.generate_all(statements);
                        });
                    }
                }
            }
        }

        self.place_label(end_label);
    }

    /// Run `f` with instructions attributed to `location`
    fn at(&mut self, location: SourceLocation, f: impl FnOnce(&mut Self)) {
        let saved = std::mem::replace(&mut self.current_location, location);
        f(self);
        self.current_location = saved;
    }

    fn new_temp(&mut self) -> Operand {
        self.temp_counter += 1;
        Operand::Temp(Temp(self.temp_counter))
    }

    fn emit(&mut self, instruction: Instruction) {
        self.code.push(instruction);
        self.locations.push(self.current_location);
    }

    /// Target for a branch to `label`: direct if already placed, otherwise a
    /// pending slot recorded at the next instruction index
    fn target_for(&mut self, label: LabelId) -> LabelRef {
        if self.labels.is_resolved(label) {
            LabelRef::Resolved(label)
        } else {
            self.labels.add_pending(label, self.code.len());
            LabelRef::Pending
        }
    }

    fn emit_branch(&mut self, condition: Operand, value: Operand, label: LabelId) {
        let target = self.target_for(label);
        self.emit(Instruction::Branch {
            condition,
            value,
            target,
        });
    }

    fn emit_jump(&mut self, label: LabelId) {
        let target = self.target_for(label);
        self.emit(Instruction::Jump { target });
    }

    /// Backpatch every branch waiting on `label`, then emit `label L`
    fn place_label(&mut self, label: LabelId) {
        self.labels.resolve(label, &mut self.code);
        self.emit(Instruction::Label(label));
    }
}

/// Generate three-address code for a whole program
pub fn generate(program: &AstNode) -> TacProgram {
    let mut generator = TacGenerator::new();
    generator.generate(program);
    generator.finish()
}
