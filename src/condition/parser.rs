//! Condition expression parser
//!
//! Recursive descent over the token stream, precedence low to high:
//! `||` < `&&` < `!` < comparison (`==`, `!=`, `<`, `<=`, `>`, `>=`, `in`) < primary.
//! Comparisons do not chain: `a < b < c` is rejected. Trees deeper than
//! [`MAX_DEPTH`] are rejected so evaluating and printing them stays bounded.

use super::ast::{BinaryOp, Expression};
use super::lexer::{tokenize, Keyword, Token, TokenKind};
use crate::error::SyntaxError;

/// Maximum nesting of parentheses, `!` and operators in one condition
pub const MAX_DEPTH: usize = 128;

/// Parse a condition expression string into an AST
pub fn parse(input: &str) -> Result<Expression, SyntaxError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        nesting: 0,
    };
    let (expr, _) = parser.or()?;
    parser.expect_end()?;
    Ok(expr)
}

/// An expression together with the depth of its tree
type Parsed = (Expression, usize);

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Open parentheses and `!` operators around the current token
    nesting: usize,
}

fn too_deep(position: usize) -> SyntaxError {
    SyntaxError::new(position, "expression nested too deeply")
}

/// Depth of a node over children of depth `child`
fn node_depth(child: usize, position: usize) -> Result<usize, SyntaxError> {
    if child >= MAX_DEPTH {
        return Err(too_deep(position));
    }
    Ok(child + 1)
}

impl Parser {
    fn peek(&self) -> &Token {
        // tokenize always ends the stream with Eof
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Entering a `(` or `!` at `position`
    fn enter(&mut self, position: usize) -> Result<(), SyntaxError> {
        if self.nesting >= MAX_DEPTH {
            return Err(too_deep(position));
        }
        self.nesting += 1;
        Ok(())
    }

    fn or(&mut self) -> Result<Parsed, SyntaxError> {
        let (mut left, mut depth) = self.and()?;
        while matches!(
            self.peek().kind,
            TokenKind::OrOr | TokenKind::Keyword(Keyword::Or)
        ) {
            let op = self.advance();
            self.require_operand(BinaryOp::Or)?;
            let (right, right_depth) = self.and()?;
            depth = node_depth(depth.max(right_depth), op.position)?;
            left = Expression::binary(BinaryOp::Or, left, right);
        }
        Ok((left, depth))
    }

    fn and(&mut self) -> Result<Parsed, SyntaxError> {
        let (mut left, mut depth) = self.not()?;
        while matches!(
            self.peek().kind,
            TokenKind::AndAnd | TokenKind::Keyword(Keyword::And)
        ) {
            let op = self.advance();
            self.require_operand(BinaryOp::And)?;
            let (right, right_depth) = self.not()?;
            depth = node_depth(depth.max(right_depth), op.position)?;
            left = Expression::binary(BinaryOp::And, left, right);
        }
        Ok((left, depth))
    }

    fn not(&mut self) -> Result<Parsed, SyntaxError> {
        if matches!(
            self.peek().kind,
            TokenKind::Bang | TokenKind::Keyword(Keyword::Not)
        ) {
            let bang = self.advance();
            if !starts_operand(&self.peek().kind) {
                let next = self.peek();
                return Err(SyntaxError::new(
                    next.position,
                    format!(
                        "missing operand for '!' at position {}, found {}",
                        bang.position,
                        next.kind.describe()
                    ),
                ));
            }
            self.enter(bang.position)?;
            let (inner, depth) = self.not()?;
            self.nesting -= 1;
            return Ok((Expression::not(inner), node_depth(depth, bang.position)?));
        }
        self.comparison()
    }

    fn comparison(&mut self) -> Result<Parsed, SyntaxError> {
        let (left, left_depth) = self.primary()?;

        if self.peek().kind == TokenKind::Keyword(Keyword::In) {
            let token = self.advance();
            if !starts_operand(&self.peek().kind) {
                return Err(self.missing_right_operand("in", token.position));
            }
            let (set, set_depth) = self.primary()?;
            let depth = node_depth(left_depth.max(set_depth), token.position)?;
            return Ok((Expression::membership(left, set), depth));
        }

        let Some(op) = comparison_op(&self.peek().kind) else {
            return Ok((left, left_depth));
        };
        let token = self.advance();
        self.require_operand(op)?;
        let (right, right_depth) = self.primary()?;
        let depth = node_depth(left_depth.max(right_depth), token.position)?;
        Ok((Expression::binary(op, left, right), depth))
    }

    fn primary(&mut self) -> Result<Parsed, SyntaxError> {
        let token = self.advance();
        let leaf = match token.kind {
            TokenKind::Number(n) => Expression::number(n),
            TokenKind::Str(s) => Expression::text(s),
            TokenKind::Ident(name) => Expression::Variable(name),
            TokenKind::Keyword(Keyword::True) => Expression::boolean(true),
            TokenKind::Keyword(Keyword::False) => Expression::boolean(false),
            TokenKind::Keyword(Keyword::Stat(stat)) => Expression::Attribute(stat),
            TokenKind::Keyword(Keyword::Context(key)) => Expression::Context(key),
            TokenKind::Keyword(Keyword::Trait) => Expression::Trait,
            TokenKind::LParen => {
                self.enter(token.position)?;
                let inner = self.or()?;
                let close = self.peek().clone();
                if close.kind != TokenKind::RParen {
                    return Err(SyntaxError::new(
                        close.position,
                        format!(
                            "unbalanced parentheses: '(' at position {} is never closed, found {}",
                            token.position,
                            close.kind.describe()
                        ),
                    ));
                }
                self.advance();
                self.nesting -= 1;
                return Ok(inner);
            }
            TokenKind::RParen => {
                return Err(SyntaxError::new(
                    token.position,
                    "unbalanced parentheses: unexpected ')'",
                ))
            }
            TokenKind::Eof => {
                return Err(SyntaxError::new(
                    token.position,
                    "expected an operand, found end of input",
                ))
            }
            other => {
                return Err(SyntaxError::new(
                    token.position,
                    format!("missing left operand before {}", other.describe()),
                ))
            }
        };
        Ok((leaf, 0))
    }

    /// Fail unless the next token can start the right operand of `op`
    fn require_operand(&self, op: BinaryOp) -> Result<(), SyntaxError> {
        if starts_operand(&self.peek().kind) {
            return Ok(());
        }
        // the operator is the previous token
        let op_position = self.tokens[self.pos - 1].position;
        Err(self.missing_right_operand(&op.to_string(), op_position))
    }

    fn missing_right_operand(&self, op: &str, op_position: usize) -> SyntaxError {
        let next = self.peek();
        SyntaxError::new(
            next.position,
            format!(
                "missing right operand for '{}' at position {}, found {}",
                op,
                op_position,
                next.kind.describe()
            ),
        )
    }

    fn expect_end(&self) -> Result<(), SyntaxError> {
        let token = self.peek();
        let message = match &token.kind {
            TokenKind::Eof => return Ok(()),
            kind if comparison_op(kind).is_some() || *kind == TokenKind::Keyword(Keyword::In) => {
                format!("comparison operators cannot be chained, found {}", kind.describe())
            }
            TokenKind::RParen => "unbalanced parentheses: unexpected ')'".to_string(),
            kind @ (TokenKind::Ident(_) | TokenKind::Keyword(_)) => {
                format!("unexpected {} where an operator was expected", kind.describe())
            }
            kind => format!("unexpected {} after a complete expression", kind.describe()),
        };
        Err(SyntaxError::new(token.position, message))
    }
}

fn comparison_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::EqEq => Some(BinaryOp::Eq),
        TokenKind::NotEq => Some(BinaryOp::NotEq),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::Lte => Some(BinaryOp::Lte),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::Gte => Some(BinaryOp::Gte),
        _ => None,
    }
}

fn starts_operand(kind: &TokenKind) -> bool {
    match kind {
        TokenKind::Number(_)
        | TokenKind::Str(_)
        | TokenKind::Ident(_)
        | TokenKind::LParen
        | TokenKind::Bang => true,
        TokenKind::Keyword(k) => !matches!(k, Keyword::And | Keyword::Or | Keyword::In),
        _ => false,
    }
}
