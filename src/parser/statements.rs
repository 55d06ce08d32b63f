//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! block     ::= '{' statement* '}'
//! statement ::= varDecl | arrayDecl | ifStmt | whileStmt | switchStmt
//!             | breakStmt | continueStmt | returnStmt
//!             | ID '=' expr ';'
//!             | ID '(' args ')' ';'
//!             | ID '[' expr ']' '=' expr ';'
//!             | expr ';'
//! ```
//!
//! Statements starting with an identifier are told apart by the token after it.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a braced block
    pub(crate) fn parse_block(&mut self) -> Result<AstNode, ParseError> {
        let location = self.expect(TokenKind::LBrace)?.location;

        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        self.expect(TokenKind::RBrace)?;

        Ok(AstNode::Block {
            statements,
            location,
        })
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<AstNode, ParseError> {
        let kind = self.peek().kind;

        if kind.is_type_keyword() {
            return self.parse_declaration();
        }

        match kind {
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Switch => self.parse_switch_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Break => {
                let location = self.advance().location;
                self.expect(TokenKind::Semicolon)?;
                Ok(AstNode::Break { location })
            }
            TokenKind::Continue => {
                let location = self.advance().location;
                self.expect(TokenKind::Semicolon)?;
                Ok(AstNode::Continue { location })
            }
            TokenKind::Ident => match self.peek_kind_ahead(1) {
                TokenKind::Assign => self.parse_assignment(),
                TokenKind::LParen => {
                    let call = self.parse_call()?;
                    self.expect(TokenKind::Semicolon)?;
                    Ok(call)
                }
                TokenKind::LBracket => self.parse_array_assignment(),
                _ => self.parse_expression_statement(),
            },
            TokenKind::Number | TokenKind::LParen | TokenKind::Minus | TokenKind::Bang => {
                self.parse_expression_statement()
            }
            _ => Err(self.unexpected(&[])),
        }
    }

    fn parse_expression_statement(&mut self) -> Result<AstNode, ParseError> {
        let expr = self.parse_expression()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(expr)
    }

    /// Parse `name = expr;`
    fn parse_assignment(&mut self) -> Result<AstNode, ParseError> {
        let location = self.current_location();
        let name = self.expect_identifier()?;
        self.expect(TokenKind::Assign)?;
        let value = Box::new(self.parse_expression()?);
        self.expect(TokenKind::Semicolon)?;

        Ok(AstNode::Assignment {
            target: AssignTarget::Variable(name),
            value,
            location,
        })
    }

    /// Parse `name[index] = expr;`
    fn parse_array_assignment(&mut self) -> Result<AstNode, ParseError> {
        let location = self.current_location();
        let name = self.expect_identifier()?;
        self.expect(TokenKind::LBracket)?;
        let index = Box::new(self.parse_expression()?);
        self.expect(TokenKind::RBracket)?;
        self.expect(TokenKind::Assign)?;
        let value = Box::new(self.parse_expression()?);
        self.expect(TokenKind::Semicolon)?;

        Ok(AstNode::Assignment {
            target: AssignTarget::Element { name, index },
            value,
            location,
        })
    }

    /// Parse return statement
    fn parse_return_statement(&mut self) -> Result<AstNode, ParseError> {
        let location = self.expect(TokenKind::Return)?.location;

        let expr = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };

        self.expect(TokenKind::Semicolon)?;

        Ok(AstNode::Return { expr, location })
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<AstNode, ParseError> {
        let location = self.expect(TokenKind::If)?.location;

        self.expect(TokenKind::LParen)?;
        let condition = Box::new(self.parse_expression()?);
        self.expect(TokenKind::RParen)?;

        let then_block = Box::new(self.parse_block()?);

        let else_block = if self.match_token(TokenKind::Else) {
            Some(Box::new(self.parse_block()?))
        } else {
            None
        };

        Ok(AstNode::If {
            condition,
            then_block,
            else_block,
            location,
        })
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<AstNode, ParseError> {
        let location = self.expect(TokenKind::While)?.location;

        self.expect(TokenKind::LParen)?;
        let condition = Box::new(self.parse_expression()?);
        self.expect(TokenKind::RParen)?;

        let body = Box::new(self.parse_block()?);

        Ok(AstNode::While {
            condition,
            body,
            location,
        })
    }

    /// Parse switch statement: zero or more cases, then an optional trailing default
    fn parse_switch_statement(&mut self) -> Result<AstNode, ParseError> {
        let location = self.expect(TokenKind::Switch)?.location;

        self.expect(TokenKind::LParen)?;
        let expr = Box::new(self.parse_expression()?);
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::LBrace)?;

        let mut cases = Vec::new();

        while self.check(TokenKind::Case) {
            let case_loc = self.advance().location;
            let value = Box::new(self.parse_expression()?);
            self.expect(TokenKind::Colon)?;
            let statements = self.parse_case_statements()?;

            cases.push(CaseNode::Case {
                value,
                statements,
                location: case_loc,
            });
        }

        if self.check(TokenKind::Default) {
            let default_loc = self.advance().location;
            self.expect(TokenKind::Colon)?;
            let statements = self.parse_case_statements()?;

            cases.push(CaseNode::Default {
                statements,
                location: default_loc,
            });
        }

        self.expect(TokenKind::RBrace)?;

        Ok(AstNode::Switch {
            expr,
            cases,
            location,
        })
    }

    /// Statements of one switch arm, up to the next `case`, `default` or `}`
    fn parse_case_statements(&mut self) -> Result<Vec<AstNode>, ParseError> {
        let mut statements = Vec::new();

        while !matches!(
            self.peek().kind,
            TokenKind::Case | TokenKind::Default | TokenKind::RBrace | TokenKind::Eof
        ) {
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::TokenKind;
    use crate::parser::parse::{ParseError, Parser};

    fn parse_statements(source: &str) -> Vec<AstNode> {
        match Parser::from_source(source).unwrap().parse_program().unwrap() {
            AstNode::Program { statements, .. } => statements,
            _ => unreachable!(),
        }
    }

    fn parse_err(source: &str) -> ParseError {
        Parser::from_source(source)
            .unwrap()
            .parse_program()
            .unwrap_err()
    }

    #[test]
    fn test_identifier_lookahead_dispatch() {
        let statements = parse_statements("a = 1; f(a); arr[0] = a; a + 1;");
        let kinds: Vec<NodeKind> = statements.iter().map(AstNode::kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Assignment,
                NodeKind::FunctionCall,
                NodeKind::Assignment,
                NodeKind::BinaryOperation,
            ]
        );
        match &statements[2] {
            AstNode::Assignment { target, .. } => {
                assert_eq!(target.kind(), NodeKind::ArrayAccess)
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_if_else_shape() {
        let statements = parse_statements("if (z > 30) { int a = 5; } else { int b = 7; }");
        match &statements[0] {
            AstNode::If {
                condition,
                then_block,
                else_block,
                ..
            } => {
                assert_eq!(condition.kind(), NodeKind::ComparisonOperation);
                assert_eq!(then_block.kind(), NodeKind::Block);
                assert!(else_block.is_some());
            }
            other => panic!("Expected if statement, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_if_requires_braces() {
        let err = parse_err("if (x) y = 1;");
        assert!(matches!(
            err,
            ParseError::Syntax { ref expected, ref found }
                if expected == &vec![TokenKind::LBrace] && found.text == "y"
        ));
    }

    #[test]
    fn test_switch_arms() {
        let statements = parse_statements(
            "switch (x) { case 1: y = 1; break; case 2: default: y = 3; }",
        );
        match &statements[0] {
            AstNode::Switch { cases, .. } => {
                let kinds: Vec<NodeKind> = cases.iter().map(CaseNode::kind).collect();
                assert_eq!(
                    kinds,
                    vec![
                        NodeKind::CaseStatement,
                        NodeKind::CaseStatement,
                        NodeKind::DefaultCase
                    ]
                );
                assert_eq!(cases[0].statements().len(), 2);
                assert!(cases[1].statements().is_empty());
                assert_eq!(cases[2].statements().len(), 1);
            }
            other => panic!("Expected switch, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_case_after_default_is_rejected() {
        let err = parse_err("switch (x) { default: break; case 1: break; }");
        assert!(matches!(
            err,
            ParseError::Syntax { ref found, .. } if found.kind == TokenKind::Case
        ));
    }

    #[test]
    fn test_return_forms() {
        let statements = parse_statements("function f() { return; return a * 2; }");
        match &statements[0] {
            AstNode::FunctionDeclaration { body, .. } => match body.as_ref() {
                AstNode::Block { statements, .. } => {
                    assert!(matches!(statements[0], AstNode::Return { expr: None, .. }));
                    assert!(matches!(statements[1], AstNode::Return { expr: Some(_), .. }));
                }
                _ => unreachable!(),
            },
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_unclosed_block_reports_eof() {
        let err = parse_err("while (x) { x = x - 1;");
        assert!(matches!(
            err,
            ParseError::Syntax { ref expected, ref found }
                if expected == &vec![TokenKind::RBrace] && found.kind == TokenKind::Eof
        ));
    }

    #[test]
    fn test_stray_keyword_is_not_a_statement() {
        let err = parse_err("else { }");
        assert_eq!(
            err.to_string(),
            "Syntax error at line 1, column 1: expected a statement, found 'else'"
        );
    }
}
