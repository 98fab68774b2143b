pub(crate) mod numbers;

use numbers::{NumberParser, ParsedNumber};

use crate::error::Error;
use crate::token::{Span, Token, TokenKind};

/// Lazily splits expression source text into tokens.
///
/// Once the input is exhausted the lexer yields a single [`TokenKind::End`] token and then stops.
/// After an error it yields nothing further.
pub struct Lexer<'source> {
    source: &'source str,
    rest: &'source [u8],
    position: usize,
    finished: bool,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            rest: source.as_bytes(),
            position: 0,
            finished: false,
        }
    }

    pub fn source(&self) -> &'source str {
        self.source
    }
}

macro_rules! token {
    ($kind:ident, $start:ident, $self:ident) => {
        return Some(Ok(Token {
            kind: TokenKind::$kind,
            span: Span {
                start: $start,
                end: $self.position,
            },
        }))
    };
}

impl Iterator for Lexer<'_> {
    type Item = crate::Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let Some((&c, rest)) = self.rest.split_first() else {
                self.finished = true;
                let position = self.position;
                token!(End, position, self);
            };
            let c_start = self.position;

            self.rest = rest;
            self.position += 1;

            let result = match c {
                b'+' => token!(Plus, c_start, self),
                b'-' => token!(Minus, c_start, self),
                b'*' => token!(Star, c_start, self),
                b'/' => token!(Slash, c_start, self),
                b'(' => token!(OpenParen, c_start, self),
                b')' => token!(CloseParen, c_start, self),

                b'a'..=b'z' | b'A'..=b'Z' | b'_' => Ok(self.parse_ident(c_start)),
                b'0'..=b'9' | b'.' => self.parse_number(c_start),

                c if c.is_ascii_whitespace() => continue,

                _ => {
                    // Everything consumed so far is ASCII, so `c_start` is a char boundary
                    let character = self.source[c_start..].chars().next().unwrap_or('\u{FFFD}');
                    Err(Error::syntax(
                        "a number, identifier, operator or parenthesis",
                        format!("'{character}'"),
                        c_start..c_start + character.len_utf8(),
                    ))
                }
            };

            if result.is_err() {
                self.finished = true;
                self.rest = &[];
            }

            break Some(result);
        }
    }
}

impl Lexer<'_> {
    fn parse_ident(&mut self, start: usize) -> Token {
        let len = self
            .rest
            .iter()
            .take_while(|c| matches!(c, b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_'))
            .count();

        self.position += len;
        self.rest = &self.rest[len..];

        Token {
            kind: TokenKind::Identifier(self.source[start..self.position].to_string()),
            span: Span {
                start,
                end: self.position,
            },
        }
    }

    fn parse_number(&mut self, start: usize) -> crate::Result<Token> {
        // next() already consumed the first character, correct for that using the whole source and
        // the position
        let slice = &self.source.as_bytes()[start..];

        let ParsedNumber { value, literal_len } =
            NumberParser::parse_number(slice).map_err(|e| {
                Error::syntax(
                    e.expected,
                    format!("'{}'", e.found),
                    start + e.span.start..start + e.span.end,
                )
            })?;

        self.position = start + literal_len;
        self.rest = &slice[literal_len..];

        Ok(Token {
            kind: TokenKind::Number(value),
            span: Span {
                start,
                end: self.position,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .map(|token| token.expect("lexing should succeed").kind)
            .collect()
    }

    #[test]
    fn test_parse_numbers() {
        for (input, expected) in [
            ("3", 3.0),
            ("345", 345.0),
            ("5e3", 5000.0),
            ("3.0", 3.0),
            #[allow(clippy::approx_constant)]
            ("3.1416", 3.1416),
            #[allow(clippy::approx_constant)]
            ("314.16e-2", 3.1416),
            #[allow(clippy::approx_constant)]
            ("0.31416E1", 3.1416),
            ("34e1", 340.0),
            ("34e+1", 340.0),
            (".5", 0.5),
            ("2.", 2.0),
        ] {
            let mut lexer = Lexer::new(input);
            let token = lexer.next().unwrap().unwrap();
            assert_eq!(token.kind, TokenKind::Number(expected), "when parsing '{input}'");
            assert_eq!(token.span, Span { start: 0, end: input.len() });
        }

        // Invalid numbers
        for input in &["3x", "1.2.3", "1e", "1e+", ".", "4_", "1e400", "1e400 + x"] {
            let mut lexer = Lexer::new(input);
            let token = lexer.next().unwrap();
            assert!(
                matches!(token, Err(Error::Syntax { .. })),
                "when parsing '{input}'"
            );
        }
    }

    #[test]
    fn overflowing_number() {
        let mut lexer = Lexer::new("1e400");
        assert_eq!(
            lexer.next().unwrap(),
            Err(Error::syntax("a finite number literal", "'1e400'", 0usize..5))
        );

        // Largest finite value is still fine
        let mut lexer = Lexer::new("1.7976931348623157e308");
        assert_eq!(
            lexer.next().unwrap().unwrap().kind,
            TokenKind::Number(f64::MAX)
        );
    }

    #[test]
    fn punctuation_and_identifiers() {
        assert_eq!(
            kinds("log ( x_1 )*-2/ y+Z"),
            vec![
                TokenKind::Identifier("log".to_string()),
                TokenKind::OpenParen,
                TokenKind::Identifier("x_1".to_string()),
                TokenKind::CloseParen,
                TokenKind::Star,
                TokenKind::Minus,
                TokenKind::Number(2.0),
                TokenKind::Slash,
                TokenKind::Identifier("y".to_string()),
                TokenKind::Plus,
                TokenKind::Identifier("Z".to_string()),
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn end_is_yielded_once() {
        let mut lexer = Lexer::new("  \n\t ");
        let token = lexer.next().unwrap().unwrap();
        assert_eq!(token.kind, TokenKind::End);
        assert_eq!(token.span, Span { start: 5, end: 5 });
        assert!(lexer.next().is_none());
    }

    #[test]
    fn unexpected_character() {
        let mut lexer = Lexer::new("x ^ 2");
        assert_eq!(
            lexer.next().unwrap().unwrap().kind,
            TokenKind::Identifier("x".to_string())
        );

        let error = lexer.next().unwrap().unwrap_err();
        assert_eq!(
            error,
            Error::syntax(
                "a number, identifier, operator or parenthesis",
                "'^'",
                2usize..3,
            )
        );

        // Nothing after an error
        assert!(lexer.next().is_none());
    }

    #[test]
    fn unexpected_multibyte_character() {
        let mut lexer = Lexer::new("π");
        match lexer.next().unwrap() {
            Err(Error::Syntax { found, span, .. }) => {
                assert_eq!(found, "'π'");
                assert_eq!(span, miette::SourceSpan::from(0..2));
            }
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }
}
