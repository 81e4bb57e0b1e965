//! Arithmetic expression tree and evaluation errors.

use std::fmt;

/// Errors that can occur while evaluating a formula.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormulaError {
    /// The text is not pure, well-formed arithmetic.
    #[error("invalid formula expression: {0}")]
    InvalidExpression(String),

    #[error("division by zero")]
    DivisionByZero,
}

impl FormulaError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidExpression(msg.into())
    }
}

/// A lexical token of the arithmetic grammar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Star => f.write_str("*"),
            Self::Slash => f.write_str("/"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    fn apply(self, lhs: f64, rhs: f64) -> Result<f64, FormulaError> {
        let value = match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => {
                if rhs == 0.0 {
                    return Err(FormulaError::DivisionByZero);
                }
                lhs / rhs
            }
        };
        if !value.is_finite() {
            return Err(FormulaError::invalid("result is not a finite number"));
        }
        Ok(value)
    }
}

/// Parsed arithmetic expression.
///
/// A run of same-precedence operators is stored flat in a [`Expr::Chain`],
/// so `1 + 1 + ... + 1` stays one level deep however long it is. Depth
/// only grows with parentheses and unary signs, which the parser bounds.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Neg(Box<Expr>),
    /// `first op1 e1 op2 e2 ...`, folded left to right.
    Chain {
        first: Box<Expr>,
        rest: Vec<(BinaryOp, Expr)>,
    },
}

impl Expr {
    /// Evaluates the tree.
    ///
    /// Division by an operand equal to zero fails with
    /// [`FormulaError::DivisionByZero`]; overflow to infinity fails with
    /// [`FormulaError::InvalidExpression`].
    pub fn eval(&self) -> Result<f64, FormulaError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Neg(inner) => Ok(-inner.eval()?),
            Self::Chain { first, rest } => rest
                .iter()
                .try_fold(first.eval()?, |acc, (op, rhs)| op.apply(acc, rhs.eval()?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Box<Expr> {
        Box::new(Expr::Number(n))
    }

    #[test]
    fn eval_chain() {
        let e = Expr::Chain {
            first: num(10.0),
            rest: vec![
                (BinaryOp::Sub, Expr::Neg(num(2.5))),
                (BinaryOp::Div, Expr::Number(2.0)),
            ],
        };
        assert_eq!(e.eval(), Ok(6.25));
    }

    #[test]
    fn divide_by_negative_zero() {
        let e = Expr::Chain {
            first: num(1.0),
            rest: vec![(BinaryOp::Div, Expr::Neg(num(0.0)))],
        };
        assert_eq!(e.eval(), Err(FormulaError::DivisionByZero));
    }

    #[test]
    fn overflow_is_invalid() {
        let e = Expr::Chain {
            first: num(f64::MAX),
            rest: vec![(BinaryOp::Mul, Expr::Number(10.0))],
        };
        assert!(matches!(e.eval(), Err(FormulaError::InvalidExpression(_))));
    }

    #[test]
    fn long_chain_stays_flat() {
        let e = Expr::Chain {
            first: num(0.0),
            rest: vec![(BinaryOp::Add, Expr::Number(1.0)); 200_000],
        };
        assert_eq!(e.eval(), Ok(200_000.0));
    }

    #[test]
    fn error_messages() {
        assert_eq!(FormulaError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            FormulaError::invalid("x").to_string(),
            "invalid formula expression: x"
        );
    }
}
