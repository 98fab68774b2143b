use std::ops;

use crate::ast::{BinaryOperator, Expression};

impl ops::Add for Expression {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Expression::binary(BinaryOperator::Add, self, other)
    }
}

impl ops::Sub for Expression {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Expression::binary(BinaryOperator::Sub, self, other)
    }
}

impl ops::Mul for Expression {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Expression::binary(BinaryOperator::Mul, self, other)
    }
}

impl ops::Div for Expression {
    type Output = Self;

    fn div(self, other: Self) -> Self {
        Expression::binary(BinaryOperator::Div, self, other)
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Expression::Number(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_build_binary_nodes() {
        let x = || Expression::variable("x");

        assert_eq!(
            x() + Expression::from(1.0),
            Expression::binary(BinaryOperator::Add, x(), Expression::Number(1.0))
        );
        assert_eq!(
            (x() - x()) * (x() / Expression::from(2.0)),
            Expression::binary(
                BinaryOperator::Mul,
                Expression::binary(BinaryOperator::Sub, x(), x()),
                Expression::binary(BinaryOperator::Div, x(), Expression::Number(2.0)),
            )
        );
    }
}
