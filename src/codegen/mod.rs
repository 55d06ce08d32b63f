//! Three-address code generation
//!
//! - [`instruction`]: structured instructions and their text rendering
//! - [`labels`]: label allocation and the backpatch table
//! - [`generator`]: the AST walk producing a [`TacProgram`]
//!
//! Temporaries (`t1, t2, ...`) and labels (`L1, L2, ...`) are numbered in
//! allocation order within one generation pass.

pub mod generator;
pub mod instruction;
pub mod labels;

pub use generator::{generate, TacGenerator, TacProgram};
pub use instruction::{Instruction, LabelId, LabelRef, Operand, Temp};
