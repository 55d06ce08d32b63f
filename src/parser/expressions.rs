//! Expression parsing implementation
//!
//! One method per precedence level, lowest binding first:
//!
//! ```text
//! expr           := logicalExpr
//! logicalExpr    := comparisonExpr (('&&'|'||') comparisonExpr)*
//! comparisonExpr := additiveExpr (relOp additiveExpr)?
//! additiveExpr   := multExpr (('+'|'-') multExpr)*
//! multExpr       := unaryExpr (('*'|'/') unaryExpr)*
//! unaryExpr      := ('!'|'-') unaryExpr | primary
//! primary        := NUMBER | ID | ID '(' args ')' | ID '[' expr ']' | '(' expr ')'
//! ```
//!
//! `&&` and `||` share one level and associate to the left. Comparison does not
//! chain: at most one relational operator is consumed per level, so `a < b < c`
//! leaves the second `<` for the caller to reject.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::parse::{ParseError, Parser};

const LOGICAL_OPS: [TokenKind; 2] = [TokenKind::AndAnd, TokenKind::OrOr];

const COMPARISON_OPS: [TokenKind; 6] = [
    TokenKind::EqEq,
    TokenKind::NotEq,
    TokenKind::Lt,
    TokenKind::Gt,
    TokenKind::Le,
    TokenKind::Ge,
];

const ADDITIVE_OPS: [TokenKind; 2] = [TokenKind::Plus, TokenKind::Minus];

const MULTIPLICATIVE_OPS: [TokenKind; 2] = [TokenKind::Star, TokenKind::Slash];

fn binary_op(token: &Token) -> BinOp {
    match token.kind {
        TokenKind::Plus => BinOp::Add,
        TokenKind::Minus => BinOp::Sub,
        TokenKind::Star => BinOp::Mul,
        TokenKind::Slash => BinOp::Div,
        TokenKind::EqEq => BinOp::Eq,
        TokenKind::NotEq => BinOp::Ne,
        TokenKind::Lt => BinOp::Lt,
        TokenKind::Gt => BinOp::Gt,
        TokenKind::Le => BinOp::Le,
        TokenKind::Ge => BinOp::Ge,
        TokenKind::AndAnd => BinOp::And,
        TokenKind::OrOr => BinOp::Or,
        other => unreachable!("{other} is not a binary operator"),
    }
}

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        self.parse_logical()
    }

    /// Parse logical AND/OR, left-associative at equal precedence
    fn parse_logical(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_comparison()?;

        while let Some(op) = self.match_any(&LOGICAL_OPS) {
            let right = Box::new(self.parse_comparison()?);
            left = AstNode::BinaryOp {
                op: binary_op(&op),
                left: Box::new(left),
                right,
                location: op.location,
            };
        }

        Ok(left)
    }

    /// Parse a single, non-associative comparison
    fn parse_comparison(&mut self) -> Result<AstNode, ParseError> {
        let left = self.parse_additive()?;

        if let Some(op) = self.match_any(&COMPARISON_OPS) {
            let right = Box::new(self.parse_additive()?);
            return Ok(AstNode::BinaryOp {
                op: binary_op(&op),
                left: Box::new(left),
                right,
                location: op.location,
            });
        }

        Ok(left)
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_multiplicative()?;

        while let Some(op) = self.match_any(&ADDITIVE_OPS) {
            let right = Box::new(self.parse_multiplicative()?);
            left = AstNode::BinaryOp {
                op: binary_op(&op),
                left: Box::new(left),
                right,
                location: op.location,
            };
        }

        Ok(left)
    }

    /// Parse multiplicative (* /)
    fn parse_multiplicative(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_unary()?;

        while let Some(op) = self.match_any(&MULTIPLICATIVE_OPS) {
            let right = Box::new(self.parse_unary()?);
            left = AstNode::BinaryOp {
                op: binary_op(&op),
                left: Box::new(left),
                right,
                location: op.location,
            };
        }

        Ok(left)
    }

    /// Parse unary (! -)
    fn parse_unary(&mut self) -> Result<AstNode, ParseError> {
        if let Some(op) = self.match_any(&[TokenKind::Bang, TokenKind::Minus]) {
            let operand = Box::new(self.parse_unary()?);
            let op_kind = if op.kind == TokenKind::Bang {
                UnOp::Not
            } else {
                UnOp::Neg
            };
            return Ok(AstNode::UnaryOp {
                op: op_kind,
                operand,
                location: op.location,
            });
        }

        self.parse_primary()
    }

    /// Parse primary expression
    fn parse_primary(&mut self) -> Result<AstNode, ParseError> {
        let token = self.peek().clone();

        match token.kind {
            TokenKind::Number => {
                self.advance();
                Ok(AstNode::Number(token.text, token.location))
            }
            TokenKind::Ident => match self.peek_kind_ahead(1) {
                TokenKind::LParen => self.parse_call(),
                TokenKind::LBracket => {
                    self.advance();
                    self.advance();
                    let index = Box::new(self.parse_expression()?);
                    self.expect(TokenKind::RBracket)?;
                    Ok(AstNode::ArrayAccess {
                        name: token.text,
                        index,
                        location: token.location,
                    })
                }
                _ => {
                    self.advance();
                    Ok(AstNode::Identifier(token.text, token.location))
                }
            },
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            _ => Err(self.unexpected(&[TokenKind::Number, TokenKind::Ident, TokenKind::LParen])),
        }
    }

    /// Parse `name(arg, arg, ...)` without a trailing semicolon
    pub(crate) fn parse_call(&mut self) -> Result<AstNode, ParseError> {
        let location = self.current_location();
        let name = self.expect_identifier()?;
        self.expect(TokenKind::LParen)?;

        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                args.push(self.parse_expression()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenKind::RParen)?;

        Ok(AstNode::FunctionCall {
            name,
            args,
            location,
        })
    }
}
