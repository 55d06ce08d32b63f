//! Toy-language front end
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//! - [`printer`]: Indented tree rendering of an AST
//!
//! # Supported Language
//!
//! - Types: `int`, `float`, `bool`, fixed-size arrays with optional initializer lists
//! - Statements: declarations, assignments, `if`/`else`, `while`,
//!   `switch`/`case`/`default`, `break`, `continue`, `return`, call statements
//! - Expressions: arithmetic, comparison, short-circuit logical, unary `-`/`!`,
//!   function calls, array indexing
//! - Top-level `function name(type a, ...) { ... }` declarations mixed with statements
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one method per grammar rule, driven by
//! one- and two-token lookahead. No error recovery.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
pub mod printer;
mod statements;

pub use parse::{parse, ParseError, Parser};
