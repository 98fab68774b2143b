use tracing::debug;

use crate::ast::{BinaryOperator, Expression, Function};

impl Expression {
    /// Builds a new tree for the partial derivative of `self` with respect to `variable`.
    ///
    /// The sum, product, quotient and chain rules are applied literally and the result is not
    /// simplified, so `d/dx (2 * x)` comes out as `( ( 0 * x ) + ( 2 * 1 ) )`. The result shares no
    /// nodes with `self`; subtrees needed by the product, quotient and chain rules are cloned.
    pub fn differentiate(&self, variable: &str) -> Expression {
        debug!(expression = %self, variable, "differentiating");
        self.derivative(variable)
    }

    /// Differentiates `order` times. An order of zero returns a copy of `self`.
    pub fn nth_derivative(&self, variable: &str, order: usize) -> Expression {
        (0..order).fold(self.clone(), |expression, _| {
            expression.differentiate(variable)
        })
    }

    fn derivative(&self, variable: &str) -> Expression {
        match self {
            Expression::Number(_) => Expression::Number(0.0),
            Expression::Variable(name) if name == variable => Expression::Number(1.0),
            Expression::Variable(_) => Expression::Number(0.0),
            Expression::Binary { op, lhs, rhs } => {
                let (l, r) = (lhs.as_ref(), rhs.as_ref());
                let (dl, dr) = (l.derivative(variable), r.derivative(variable));

                match op {
                    BinaryOperator::Add => dl + dr,
                    BinaryOperator::Sub => dl - dr,
                    BinaryOperator::Mul => dl * r.clone() + l.clone() * dr,
                    BinaryOperator::Div => {
                        (dl * r.clone() - l.clone() * dr) / (r.clone() * r.clone())
                    }
                }
            }
            Expression::Function { function, argument } => {
                let da = argument.derivative(variable);
                let a = argument.as_ref().clone();

                match function {
                    Function::Log => da / a,
                    Function::Exp => Expression::exp(a) * da,
                    Function::Sqrt => da / (Expression::Number(2.0) * Expression::sqrt(a)),
                }
            }
        }
    }
}
