use tracing::trace;

use crate::ast::{self, BinaryOperator, Expression};
use crate::error::Error;
use crate::lexer::Lexer;
use crate::token::{Span, Token, TokenKind};

/// Deepest nesting of parentheses, function calls and unary minus the parser accepts.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Recursive-descent parser with a single token of lookahead.
///
/// ```text
/// expr    := term (('+' | '-') term)*
/// term    := factor (('*' | '/') factor)*
/// factor  := '-' factor | atom
/// atom    := NUMBER | IDENTIFIER | FUNC '(' expr ')' | '(' expr ')'
/// FUNC    := 'log' | 'exp' | 'sqrt'
/// ```
///
/// The parser works on any token stream. A stream that runs dry is treated as if it ended with
/// [`TokenKind::End`]. Input nested deeper than [`MAX_NESTING_DEPTH`] is a syntax error.
pub struct Parser<I> {
    tokens: I,
    peeked: Option<Token>,
    position: usize,
    depth: usize,
}

impl<'source> Parser<Lexer<'source>> {
    pub fn new(source: &'source str) -> Self {
        Self::from_tokens(Lexer::new(source))
    }
}

impl<I> Parser<I>
where
    I: Iterator<Item = crate::Result<Token>>,
{
    pub fn from_tokens(tokens: I) -> Self {
        Self {
            tokens,
            peeked: None,
            position: 0,
            depth: 0,
        }
    }

    /// Parses a complete expression. Anything but the end of input after it is an error.
    pub fn parse(&mut self) -> crate::Result<Expression> {
        let expression = self.parse_expression()?;

        // Ensure we've consumed all tokens
        self.expect(|k| k == &TokenKind::End, "an operator or end of input")?;

        trace!(%expression, "parsed expression");
        Ok(expression)
    }

    fn parse_expression(&mut self) -> crate::Result<Expression> {
        let mut lhs = self.parse_term()?;

        loop {
            let op = match BinaryOperator::from_token(&self.peek()?.kind) {
                Some(op) if op.is_additive() => op,
                _ => break,
            };
            self.next_token()?;

            let rhs = self.parse_term()?;
            lhs = Expression::binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    fn parse_term(&mut self) -> crate::Result<Expression> {
        let mut lhs = self.parse_factor()?;

        loop {
            let op = match BinaryOperator::from_token(&self.peek()?.kind) {
                Some(op) if op.is_multiplicative() => op,
                _ => break,
            };
            self.next_token()?;

            let rhs = self.parse_factor()?;
            lhs = Expression::binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    // Every level of nesting passes through here once
    fn parse_factor(&mut self) -> crate::Result<Expression> {
        if self.depth == MAX_NESTING_DEPTH {
            let token = self.peek()?;
            return Err(Error::syntax(
                format!("at most {MAX_NESTING_DEPTH} levels of nesting"),
                token.kind.to_string(),
                token.span,
            ));
        }

        self.depth += 1;
        let result = self.parse_unary();
        self.depth -= 1;

        result
    }

    fn parse_unary(&mut self) -> crate::Result<Expression> {
        if self.peek()?.kind != TokenKind::Minus {
            return self.parse_atom();
        }

        self.next_token()?;
        Ok(match self.parse_factor()? {
            // Fold into the literal so that printing and re-parsing gives the same tree
            Expression::Number(value) => Expression::Number(-value),
            operand => Expression::Number(0.0) - operand,
        })
    }

    fn parse_atom(&mut self) -> crate::Result<Expression> {
        let token = self.next_token()?;

        match token.kind {
            TokenKind::Number(value) => Ok(Expression::Number(value)),
            TokenKind::Identifier(name) if name.is_empty() => Err(Error::syntax(
                "a non-empty identifier",
                "an empty identifier",
                token.span,
            )),
            TokenKind::Identifier(name) => match ast::Function::from_name(&name) {
                Some(function) => {
                    self.expect(
                        |k| k == &TokenKind::OpenParen,
                        &format!("'(' after '{name}'"),
                    )?;
                    let argument = self.parse_expression()?;
                    self.expect(|k| k == &TokenKind::CloseParen, "')'")?;

                    Ok(Expression::function(function, argument))
                }
                None => Ok(Expression::Variable(name)),
            },
            TokenKind::OpenParen => {
                let expression = self.parse_expression()?;
                self.expect(|k| k == &TokenKind::CloseParen, "')'")?;

                Ok(expression)
            }
            kind => Err(Error::syntax(
                "a number, variable, function call or '('",
                kind.to_string(),
                token.span,
            )),
        }
    }

    fn peek(&mut self) -> crate::Result<&Token> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.pull()?,
        };

        Ok(self.peeked.insert(token))
    }

    fn next_token(&mut self) -> crate::Result<Token> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.pull()?,
        };
        self.position = token.span.end;

        Ok(token)
    }

    fn expect<F>(&mut self, matcher: F, expected: &str) -> crate::Result<Token>
    where
        F: FnOnce(&TokenKind) -> bool,
    {
        let token = self.next_token()?;
        if matcher(&token.kind) {
            Ok(token)
        } else {
            Err(Error::syntax(expected, token.kind.to_string(), token.span))
        }
    }

    fn pull(&mut self) -> crate::Result<Token> {
        Ok(self.tokens.next().transpose()?.unwrap_or(Token {
            kind: TokenKind::End,
            span: Span {
                start: self.position,
                end: self.position,
            },
        }))
    }
}
