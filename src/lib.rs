//! # Introduction
//!
//! tacgen lowers a small imperative toy language to three-address code (TAC),
//! the flat intermediate form a compiler produces before register allocation.
//! The generated code can be printed or browsed side by side with its source
//! in a terminal UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → TAC generator → TacProgram → stdout / TUI
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds an AST by recursive descent.
//!    The first lexical or syntax error aborts the parse with a positioned message.
//! 2. [`codegen`]: walks the AST and emits instructions, backpatching forward
//!    jumps for `if`, `while`, `switch` and short-circuit `&&`/`||`.
//! 3. [`ui`]: ratatui-based TAC explorer; not part of the stable library API.
//!
//! ```
//! let code = tacgen::compile("int z = x + y * 2;").unwrap();
//! assert_eq!(code.lines(), vec!["t1 = y * 2", "t2 = x + t1", "z = t2"]);
//! ```

pub mod codegen;
pub mod parser;
pub mod ui;

use codegen::TacProgram;
use parser::{ParseError, Parser};

/// Parse `source` and generate its three-address code
pub fn compile(source: &str) -> Result<TacProgram, ParseError> {
    let program = Parser::from_source(source)?.parse_program()?;
    Ok(codegen::generate(&program))
}
