//! Declaration parsing implementation
//!
//! ```text
//! functionDecl := 'function' ID '(' (paramDecl (',' paramDecl)*)? ')' block
//! paramDecl    := type ID
//! varDecl      := type ID ('=' expr)? ';'
//! arrayDecl    := type ID '[' NUMBER ']' ('=' '{' (expr (',' expr)*)? '}')? ';'
//! ```

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

const TYPE_KEYWORDS: [TokenKind; 3] = [TokenKind::Int, TokenKind::Float, TokenKind::Bool];

impl Parser {
    /// Parse function declaration: function name(params) { body }
    pub(crate) fn parse_function_declaration(&mut self) -> Result<AstNode, ParseError> {
        let location = self.expect(TokenKind::Function)?.location;
        let name = self.expect_identifier()?;

        self.expect(TokenKind::LParen)?;
        let params = self.parse_parameter_list()?;
        self.expect(TokenKind::RParen)?;

        let body = Box::new(self.parse_block()?);

        Ok(AstNode::FunctionDeclaration {
            name,
            params,
            body,
            location,
        })
    }

    /// Parse parameter list: type name, type name, ...
    fn parse_parameter_list(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(params);
        }

        loop {
            let location = self.current_location();
            let param_type = self.parse_type()?;
            let name = self.expect_identifier()?;
            params.push(Param {
                name,
                param_type,
                location,
            });

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(params)
    }

    pub(crate) fn parse_type(&mut self) -> Result<BaseType, ParseError> {
        let token = self.expect_any(&TYPE_KEYWORDS)?;
        Ok(match token.kind {
            TokenKind::Float => BaseType::Float,
            TokenKind::Bool => BaseType::Bool,
            _ => BaseType::Int,
        })
    }

    /// Parse a scalar or array declaration, chosen by `type ID '['` lookahead
    pub(crate) fn parse_declaration(&mut self) -> Result<AstNode, ParseError> {
        if self.peek_kind_ahead(1) == TokenKind::Ident
            && self.peek_kind_ahead(2) == TokenKind::LBracket
        {
            self.parse_array_declaration()
        } else {
            self.parse_variable_declaration()
        }
    }

    fn parse_variable_declaration(&mut self) -> Result<AstNode, ParseError> {
        let location = self.current_location();
        let var_type = self.parse_type()?;
        let name = self.expect_identifier()?;

        let initializer = if self.match_token(TokenKind::Assign) {
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };

        self.expect(TokenKind::Semicolon)?;

        Ok(AstNode::VariableDeclaration {
            var_type,
            name,
            initializer,
            location,
        })
    }

    /// The size is kept as literal text and not checked against the initializer length
    fn parse_array_declaration(&mut self) -> Result<AstNode, ParseError> {
        let location = self.current_location();
        let elem_type = self.parse_type()?;
        let name = self.expect_identifier()?;

        self.expect(TokenKind::LBracket)?;
        let size = self.expect(TokenKind::Number)?.text;
        self.expect(TokenKind::RBracket)?;

        let mut initializer = Vec::new();
        if self.match_token(TokenKind::Assign) {
            self.expect(TokenKind::LBrace)?;
            if !self.check(TokenKind::RBrace) {
                loop {
                    initializer.push(self.parse_expression()?);
                    if !self.match_token(TokenKind::Comma) {
                        break;
                    }
                }
            }
            self.expect(TokenKind::RBrace)?;
        }

        self.expect(TokenKind::Semicolon)?;

        Ok(AstNode::ArrayDeclaration {
            elem_type,
            name,
            size,
            initializer,
            location,
        })
    }
}
