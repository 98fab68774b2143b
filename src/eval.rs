use std::collections::HashMap;

use tracing::trace;

use crate::ast::{BinaryOperator, Expression, Function};
use crate::error::{Error, EvaluationError};

/// Variable values used by [`Expression::evaluate`].
pub type Bindings = HashMap<String, f64>;

impl Expression {
    /// Reduces the tree to a number, looking variables up in `bindings`.
    ///
    /// Fails with [`Error::UnboundVariable`] for a variable missing from `bindings`, and with
    /// [`Error::Evaluation`] for a division by exactly zero, `log` of a non-positive value or
    /// `sqrt` of a negative value. The first failure aborts the whole evaluation.
    pub fn evaluate(&self, bindings: &Bindings) -> crate::Result<f64> {
        let result = self.evaluate_node(bindings);
        trace!(expression = %self, ?result, "evaluated");
        result
    }

    fn evaluate_node(&self, bindings: &Bindings) -> crate::Result<f64> {
        match self {
            Expression::Number(value) => Ok(*value),
            Expression::Variable(name) => {
                bindings
                    .get(name)
                    .copied()
                    .ok_or_else(|| Error::UnboundVariable {
                        name: name.clone(),
                    })
            }
            Expression::Binary { op, lhs, rhs } => {
                let lhs = lhs.evaluate_node(bindings)?;
                let rhs = rhs.evaluate_node(bindings)?;
                Ok(op.apply(lhs, rhs)?)
            }
            Expression::Function { function, argument } => {
                let argument = argument.evaluate_node(bindings)?;
                Ok(function.apply(argument)?)
            }
        }
    }
}

impl BinaryOperator {
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, EvaluationError> {
        match self {
            BinaryOperator::Add => Ok(lhs + rhs),
            BinaryOperator::Sub => Ok(lhs - rhs),
            BinaryOperator::Mul => Ok(lhs * rhs),
            BinaryOperator::Div if rhs == 0.0 => Err(EvaluationError::DivisionByZero),
            BinaryOperator::Div => Ok(lhs / rhs),
        }
    }
}

impl Function {
    pub fn apply(self, argument: f64) -> Result<f64, EvaluationError> {
        match self {
            Function::Log if argument <= 0.0 => Err(EvaluationError::LogOfNonPositive(argument)),
            Function::Log => Ok(argument.ln()),
            Function::Exp => Ok(argument.exp()),
            Function::Sqrt if argument < 0.0 => Err(EvaluationError::SqrtOfNegative(argument)),
            Function::Sqrt => Ok(argument.sqrt()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&str, f64)]) -> Bindings {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    #[test]
    fn arithmetic() {
        let x = || Expression::variable("x");
        let expression = (x() + Expression::number(1.0)) * (x() - Expression::number(1.0))
            / Expression::number(4.0);

        assert_eq!(expression.evaluate(&bindings(&[("x", 3.0)])), Ok(2.0));
    }

    #[test]
    fn functions() {
        let b = bindings(&[("x", 4.0)]);

        assert_eq!(Expression::sqrt(Expression::variable("x")).evaluate(&b), Ok(2.0));
        assert_eq!(Expression::exp(Expression::number(0.0)).evaluate(&b), Ok(1.0));
        assert_eq!(Expression::log(Expression::number(1.0)).evaluate(&b), Ok(0.0));

        let round_trip = Expression::log(Expression::exp(Expression::variable("x")))
            .evaluate(&b)
            .unwrap();
        assert!((round_trip - 4.0).abs() < 1e-12);
    }

    #[test]
    fn unbound_variable() {
        assert_eq!(
            Expression::variable("y").evaluate(&Bindings::new()),
            Err(Error::UnboundVariable {
                name: "y".to_string()
            })
        );
    }

    #[test]
    fn division_by_zero() {
        let expression = Expression::number(1.0) / Expression::number(0.0);
        assert_eq!(
            expression.evaluate(&Bindings::new()),
            Err(Error::Evaluation(EvaluationError::DivisionByZero))
        );

        // Negative zero is still zero
        let expression = Expression::number(1.0) / Expression::number(-0.0);
        assert_eq!(
            expression.evaluate(&Bindings::new()),
            Err(Error::Evaluation(EvaluationError::DivisionByZero))
        );
    }

    #[test]
    fn domain_errors() {
        let b = bindings(&[("x", -1.0)]);

        assert_eq!(
            Expression::log(Expression::number(0.0)).evaluate(&b),
            Err(Error::Evaluation(EvaluationError::LogOfNonPositive(0.0)))
        );
        assert_eq!(
            Expression::log(Expression::variable("x")).evaluate(&b),
            Err(Error::Evaluation(EvaluationError::LogOfNonPositive(-1.0)))
        );
        assert_eq!(
            Expression::sqrt(Expression::variable("x")).evaluate(&b),
            Err(Error::Evaluation(EvaluationError::SqrtOfNegative(-1.0)))
        );
        assert_eq!(Expression::sqrt(Expression::number(0.0)).evaluate(&b), Ok(0.0));
    }

    #[test]
    fn errors_propagate_from_the_left_operand_first() {
        let expression = Expression::variable("missing") / Expression::number(0.0);
        assert!(matches!(
            expression.evaluate(&Bindings::new()),
            Err(Error::UnboundVariable { .. })
        ));
    }
}
