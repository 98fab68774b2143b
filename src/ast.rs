use std::collections::BTreeSet;

/// An arithmetic expression tree.
///
/// Every node owns its children exclusively, so a tree never shares structure with another tree.
/// Cloning is a deep copy.
#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Number(f64),
    Variable(String),
    Binary {
        op: BinaryOperator,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    Function {
        function: Function,
        argument: Box<Expression>,
    },
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Function {
    /// Natural logarithm
    Log,
    Exp,
    Sqrt,
}

impl Expression {
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// # Panics
    ///
    /// Panics if `name` is empty.
    pub fn variable(name: impl Into<String>) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "variable names must not be empty");
        Self::Variable(name)
    }

    pub fn binary(op: BinaryOperator, lhs: Expression, rhs: Expression) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn function(function: Function, argument: Expression) -> Self {
        Self::Function {
            function,
            argument: Box::new(argument),
        }
    }

    pub fn log(argument: Expression) -> Self {
        Self::function(Function::Log, argument)
    }

    pub fn exp(argument: Expression) -> Self {
        Self::function(Function::Exp, argument)
    }

    pub fn sqrt(argument: Expression) -> Self {
        Self::function(Function::Sqrt, argument)
    }

    /// Names of all variables referenced by the tree, in sorted order.
    pub fn free_variables(&self) -> BTreeSet<&str> {
        let mut variables = BTreeSet::new();
        self.collect_variables(&mut variables);
        variables
    }

    fn collect_variables<'a>(&'a self, variables: &mut BTreeSet<&'a str>) {
        match self {
            Expression::Number(_) => {}
            Expression::Variable(name) => {
                variables.insert(name);
            }
            Expression::Binary { lhs, rhs, .. } => {
                lhs.collect_variables(variables);
                rhs.collect_variables(variables);
            }
            Expression::Function { argument, .. } => argument.collect_variables(variables),
        }
    }
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
        }
    }
}

impl Function {
    pub fn name(self) -> &'static str {
        match self {
            Function::Log => "log",
            Function::Exp => "exp",
            Function::Sqrt => "sqrt",
        }
    }
}
