use std::{fmt, io};

use crate::ast::{BinaryOperator, Expression, Function};

/// Binary nodes are always fully parenthesized, e.g. `( x + ( 2 * y ) )`, and functions are written
/// as `log( x )`. The output parses back into the same tree.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(value) => write!(f, "{value}"),
            Expression::Variable(name) => write!(f, "{name}"),
            Expression::Binary { op, lhs, rhs } => write!(f, "( {lhs} {op} {rhs} )"),
            Expression::Function { function, argument } => write!(f, "{function}( {argument} )"),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Expression {
    /// Writes the same rendering as [`Display`](fmt::Display) to `dst`.
    pub fn print<W: io::Write + ?Sized>(&self, dst: &mut W) -> io::Result<()> {
        write!(dst, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_nodes_are_parenthesized() {
        let expression = Expression::number(3.0)
            + Expression::number(4.0) * Expression::variable("x");
        assert_eq!(expression.to_string(), "( 3 + ( 4 * x ) )");
    }

    #[test]
    fn functions_are_prefix() {
        let expression = Expression::sqrt(Expression::log(Expression::variable("x")))
            / Expression::exp(Expression::number(-0.5));
        assert_eq!(expression.to_string(), "( sqrt( log( x ) ) / exp( -0.5 ) )");
    }

    #[test]
    fn print_writes_to_stream() {
        let mut buffer = Vec::new();
        Expression::variable("a")
            .print(&mut buffer)
            .expect("writing to a Vec cannot fail");
        assert_eq!(buffer, b"a");
    }
}
