//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, token helpers, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses recursive descent, one method per grammar rule:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: function, variable and array declarations
//! - `statements`: statements (if, while, switch, assignments, ...)
//! - `expressions`: the precedence chain from logical down to primary
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! There is no error recovery: the first mismatch aborts the parse.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Unscannable input, re-raised unchanged from the lexer
    #[error(transparent)]
    Lex(#[from] LexError),

    /// A grammar rule's required token was absent
    #[error(
        "Syntax error at line {}, column {}: expected {}, found {}",
        .found.location.line,
        .found.location.column,
        describe_expected(.expected),
        .found
    )]
    Syntax {
        expected: Vec<TokenKind>,
        found: Token,
    },
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Lex(err) => err.location(),
            ParseError::Syntax { found, .. } => found.location,
        }
    }
}

fn describe_expected(expected: &[TokenKind]) -> String {
    match expected {
        [] => "a statement".to_string(),
        [only] => only.to_string(),
        _ => {
            let names: Vec<String> = expected.iter().map(|k| k.to_string()).collect();
            format!("one of {}", names.join(", "))
        }
    }
}

/// Recursive descent parser for the toy language
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
}

impl Parser {
    /// Create a parser over a lexed token stream.
    ///
    /// A stream without a trailing `Eof` gets one appended so lookahead never runs off the end.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let location = tokens.last().map(|t| t.location).unwrap_or_default();
            tokens.push(Token::new(TokenKind::Eof, "", location));
        }
        Self {
            tokens,
            position: 0,
        }
    }

    /// Lex `source` and create a parser over the result
    pub fn from_source(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self::new(tokens))
    }

    /// Parse the entire program: `(functionDecl | statement)* EOF`
    pub fn parse_program(&mut self) -> Result<AstNode, ParseError> {
        let location = self.current_location();
        let mut statements = Vec::new();

        while !self.is_at_end() {
            if self.check(TokenKind::Function) {
                statements.push(self.parse_function_declaration()?);
            } else {
                statements.push(self.parse_statement()?);
            }
        }

        Ok(AstNode::Program {
            statements,
            location,
        })
    }

    // ===== Helper methods =====

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token if it is any of `kinds`
    pub(crate) fn match_any(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if kinds.contains(&self.peek().kind) {
            Some(self.advance().clone())
        } else {
            None
        }
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub(crate) fn peek(&self) -> &Token {
        // The stream always ends in Eof and `advance` never steps past it
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    /// Kind of the token `n` positions ahead; `Eof` past the end of the stream
    pub(crate) fn peek_kind_ahead(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.position + n)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    /// Error describing the current token as unexpected
    pub(crate) fn unexpected(&self, expected: &[TokenKind]) -> ParseError {
        ParseError::Syntax {
            expected: expected.to_vec(),
            found: self.peek().clone(),
        }
    }

    /// Consume a token of `kind` or fail with a syntax error
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance().clone())
        } else {
            Err(self.unexpected(&[kind]))
        }
    }

    /// Consume a token of any of `kinds` or fail with a syntax error
    pub(crate) fn expect_any(&mut self, kinds: &[TokenKind]) -> Result<Token, ParseError> {
        self.match_any(kinds).ok_or_else(|| self.unexpected(kinds))
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        Ok(self.expect(TokenKind::Ident)?.text)
    }
}

/// Parse a lexed token stream into a `Program` tree
pub fn parse(tokens: Vec<Token>) -> Result<AstNode, ParseError> {
    Parser::new(tokens).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_source(source: &str) -> Result<AstNode, ParseError> {
        Parser::from_source(source)?.parse_program()
    }

    fn program_statements(node: &AstNode) -> &[AstNode] {
        match node {
            AstNode::Program { statements, .. } => statements,
            other => panic!("Expected program, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_parse_simple_function() {
        let program = parse_source("function main() { return 0; }").unwrap();
        let statements = program_statements(&program);

        assert_eq!(statements.len(), 1);
        match &statements[0] {
            AstNode::FunctionDeclaration {
                name, params, body, ..
            } => {
                assert_eq!(name, "main");
                assert!(params.is_empty());
                assert!(matches!(
                    body.as_ref(),
                    AstNode::Block { statements, .. } if statements.len() == 1
                ));
            }
            _ => panic!("Expected function declaration"),
        }
    }

    #[test]
    fn test_parse_empty_program() {
        let program = parse_source("  // nothing here\n").unwrap();
        assert!(program_statements(&program).is_empty());
    }

    #[test]
    fn test_syntax_error_carries_position() {
        let err = parse_source("int x = 1\nint y;").unwrap_err();
        match err {
            ParseError::Syntax { expected, found } => {
                assert_eq!(expected, vec![TokenKind::Semicolon]);
                assert_eq!(found.kind, TokenKind::Int);
                assert_eq!(found.location, SourceLocation::new(2, 1));
            }
            other => panic!("Expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_syntax_error_message() {
        let err = parse_source("x = ;").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Syntax error at line 1, column 5: expected one of number, identifier, '(', found ';'"
        );
    }

    #[test]
    fn test_lex_error_is_reraised() {
        let err = parse_source("int x = 1 @ 2;").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Lex(LexError::UnexpectedCharacter { ch: '@', .. })
        ));
        assert_eq!(err.location(), SourceLocation::new(1, 11));
    }

    #[test]
    fn test_missing_eof_is_tolerated() {
        let mut tokens = crate::parser::lexer::tokenize("x = 1;").unwrap();
        tokens.pop();
        let program = parse(tokens).unwrap();
        assert_eq!(program_statements(&program).len(), 1);
    }
}
