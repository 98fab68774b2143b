use crate::{
    ast::{BinaryOperator, Function},
    token::TokenKind,
};

impl BinaryOperator {
    pub(crate) fn from_token(kind: &TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Plus => Self::Add,
            TokenKind::Minus => Self::Sub,
            TokenKind::Star => Self::Mul,
            TokenKind::Slash => Self::Div,

            _ => return None,
        })
    }

    // For easier matching in the parser's precedence levels
    pub(crate) fn is_additive(self) -> bool {
        matches!(self, Self::Add | Self::Sub)
    }

    pub(crate) fn is_multiplicative(self) -> bool {
        matches!(self, Self::Mul | Self::Div)
    }
}

impl Function {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "log" => Self::Log,
            "exp" => Self::Exp,
            "sqrt" => Self::Sqrt,

            _ => return None,
        })
    }
}
