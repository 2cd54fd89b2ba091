//! # Expression Evaluator
//!
//! Fitness functions are written as arithmetic expressions in a single variable `x`:
//!
//! ```rust
//! use bytega::expression::{evaluate, Expression};
//!
//! assert_eq!(evaluate("(2*x/256)^2 - 5*x + 130", 0.0), 130.0);
//!
//! let expr = Expression::parse("sqrt(x) + abs(sin(x))").unwrap();
//! assert_eq!(expr.evaluate(0.0), 0.0);
//! ```
//!
//! The grammar supports `+ - * / ^` (`^` is exponentiation and binds tighter
//! than unary minus), parentheses, the constants `pi` and `e`, and a fixed table
//! of named functions. Names may carry a `Math.` prefix (`Math.sqrt(x)`).
//!
//! Evaluation never fails. An expression that does not parse, or a result that is
//! NaN or infinite, evaluates to `0.0`, so a bad expression flattens the fitness
//! landscape instead of aborting a run.

mod parser;

use std::fmt;
use std::str::FromStr;

use crate::error::{GeneticError, Result};

/// The expression used when the caller does not supply one.
pub const DEFAULT_EXPRESSION: &str = "(2*x/256)^2 - 5*x + 130";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Function {
    Sqrt,
    Cbrt,
    Abs,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Log10,
    Log2,
    Floor,
    Ceil,
    Round,
    Trunc,
    Sign,
    Pow,
    Atan2,
    Min,
    Max,
}

impl Function {
    pub(crate) fn lookup(name: &str) -> Option<Self> {
        let function = match name {
            "sqrt" => Self::Sqrt,
            "cbrt" => Self::Cbrt,
            "abs" => Self::Abs,
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "exp" => Self::Exp,
            "ln" | "log" => Self::Ln,
            "log10" => Self::Log10,
            "log2" => Self::Log2,
            "floor" => Self::Floor,
            "ceil" => Self::Ceil,
            "round" => Self::Round,
            "trunc" => Self::Trunc,
            "sign" => Self::Sign,
            "pow" => Self::Pow,
            "atan2" => Self::Atan2,
            "min" => Self::Min,
            "max" => Self::Max,
            _ => return None,
        };
        Some(function)
    }

    pub(crate) fn accepts(self, count: usize) -> bool {
        match self {
            Self::Pow | Self::Atan2 => count == 2,
            Self::Min | Self::Max => count >= 1,
            _ => count == 1,
        }
    }

    fn apply(self, args: &[f64]) -> f64 {
        let a = args.first().copied().unwrap_or(f64::NAN);
        let b = args.get(1).copied().unwrap_or(f64::NAN);
        match self {
            Self::Sqrt => a.sqrt(),
            Self::Cbrt => a.cbrt(),
            Self::Abs => a.abs(),
            Self::Sin => a.sin(),
            Self::Cos => a.cos(),
            Self::Tan => a.tan(),
            Self::Asin => a.asin(),
            Self::Acos => a.acos(),
            Self::Atan => a.atan(),
            Self::Sinh => a.sinh(),
            Self::Cosh => a.cosh(),
            Self::Tanh => a.tanh(),
            Self::Exp => a.exp(),
            Self::Ln => a.ln(),
            Self::Log10 => a.log10(),
            Self::Log2 => a.log2(),
            Self::Floor => a.floor(),
            Self::Ceil => a.ceil(),
            // Halves round towards positive infinity: round(-2.5) == -2.
            Self::Round => (a + 0.5).floor(),
            Self::Trunc => a.trunc(),
            Self::Sign => {
                if a > 0.0 {
                    1.0
                } else if a < 0.0 {
                    -1.0
                } else {
                    a
                }
            }
            Self::Pow => a.powf(b),
            Self::Atan2 => a.atan2(b),
            Self::Min => fold_nan_aware(args, f64::min),
            Self::Max => fold_nan_aware(args, f64::max),
        }
    }
}

/// `f64::min`/`max` skip NaN; a NaN argument must poison the result instead.
fn fold_nan_aware(args: &[f64], pick: fn(f64, f64) -> f64) -> f64 {
    if args.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    args.iter().copied().reduce(pick).unwrap_or(f64::NAN)
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Number(f64),
    Variable,
    Negate(Box<Node>),
    Binary {
        op: BinaryOp,
        lhs: Box<Node>,
        rhs: Box<Node>,
    },
    Call {
        function: Function,
        args: Vec<Node>,
    },
}

impl Node {
    pub(crate) fn binary(op: BinaryOp, lhs: Node, rhs: Node) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub(crate) fn eval(&self, x: f64) -> f64 {
        match self {
            Self::Number(value) => *value,
            Self::Variable => x,
            Self::Negate(inner) => -inner.eval(x),
            Self::Binary { op, lhs, rhs } => {
                let (l, r) = (lhs.eval(x), rhs.eval(x));
                match op {
                    BinaryOp::Add => l + r,
                    BinaryOp::Sub => l - r,
                    BinaryOp::Mul => l * r,
                    BinaryOp::Div => l / r,
                    BinaryOp::Pow => l.powf(r),
                }
            }
            Self::Call { function, args } => {
                let values: Vec<f64> = args.iter().map(|arg| arg.eval(x)).collect();
                function.apply(&values)
            }
        }
    }
}

/// A fitness expression compiled once and evaluated many times.
///
/// An expression built with [`Expression::compile`] from unparsable text is
/// kept around with its source but no tree, and evaluates to `0.0` everywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    ast: Option<Node>,
}

impl Expression {
    /// Parses `source`, reporting the first syntax error with its position.
    pub fn parse(source: &str) -> Result<Self> {
        let ast = parser::parse(source)?;
        Ok(Self {
            source: source.to_string(),
            ast: Some(ast),
        })
    }

    /// Parses `source`, falling back to a constant-zero expression on error.
    pub fn compile(source: &str) -> Self {
        Self::parse(source).unwrap_or_else(|err| {
            tracing::warn!(expression = source, error = %err, "fitness expression does not parse, it will evaluate to 0");
            Self::constant_zero(source)
        })
    }

    /// Like [`Expression::compile`], but reports a parse failure at debug
    /// level. Used by the one-shot helpers, which recompile on every call.
    pub(crate) fn compile_once(source: &str) -> Self {
        Self::parse(source).unwrap_or_else(|err| {
            tracing::debug!(expression = source, error = %err, "fitness expression does not parse, evaluating to 0");
            Self::constant_zero(source)
        })
    }

    fn constant_zero(source: &str) -> Self {
        Self {
            source: source.to_string(),
            ast: None,
        }
    }

    /// The text the expression was built from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns `false` when the source failed to parse.
    pub fn is_valid(&self) -> bool {
        self.ast.is_some()
    }

    /// Evaluates the expression at `x`. Non-finite results collapse to `0.0`.
    pub fn evaluate(&self, x: f64) -> f64 {
        let Some(ast) = &self.ast else {
            return 0.0;
        };
        let value = ast.eval(x);
        if value.is_finite() {
            value
        } else {
            tracing::trace!(expression = %self.source, x, value, "non-finite result replaced by 0");
            0.0
        }
    }
}

impl Default for Expression {
    fn default() -> Self {
        Self::compile(DEFAULT_EXPRESSION)
    }
}

impl FromStr for Expression {
    type Err = GeneticError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Evaluates `expression` at `x`, returning `0.0` if it does not parse or
/// produces a non-finite value.
///
/// This is a one-shot helper: it compiles the expression on every call and
/// reports parse failures only at debug level. Hold an [`Expression`] when
/// evaluating repeatedly.
pub fn evaluate(expression: &str, x: f64) -> f64 {
    Expression::compile_once(expression).evaluate(x)
}
