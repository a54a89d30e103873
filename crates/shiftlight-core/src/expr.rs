//! Arithmetic expression evaluator
//!
//! Numeric frame fields may be written as expressions over integer literals,
//! variables, `+ - * /` and parentheses:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := '(' expr ')' | NUMBER | NAME
//! ```
//!
//! Evaluation splits the expression at the rightmost operator of the lowest
//! precedence level found outside any parentheses and recurses on both
//! halves, which makes every operator left-associative. Division truncates
//! toward zero.

use crate::error::EvalError;
use crate::variables::{is_valid_name, VariableTable};

/// Evaluate `expression` against `vars`
///
/// # Example
///
/// ```
/// use shiftlight_core::{evaluate, VariableTable};
///
/// let vars = VariableTable::parse("redline=6500")?;
/// assert_eq!(evaluate("(redline - 500) / 2", &vars)?, 3000);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn evaluate(expression: &str, vars: &VariableTable) -> Result<i32, EvalError> {
    let expr = expression.trim();
    if expr.is_empty() {
        return Err(EvalError::Empty);
    }
    check_balanced(expr)?;
    eval_recursive(expr, vars)
}

impl VariableTable {
    /// Evaluate an expression against this table
    pub fn evaluate(&self, expression: &str) -> Result<i32, EvalError> {
        evaluate(expression, self)
    }
}

fn eval_recursive(expr: &str, vars: &VariableTable) -> Result<i32, EvalError> {
    let mut expr = expr.trim();
    while let Some(inner) = strip_outer_parens(expr) {
        expr = inner.trim();
    }
    if expr.is_empty() {
        return Err(EvalError::Empty);
    }

    // A whole token that is already a literal or a defined variable wins over
    // splitting, so names containing '-' stay usable.
    if let Some(value) = lookup_simple(expr, vars) {
        return Ok(value);
    }

    for ops in [&[Op::Add, Op::Sub], &[Op::Mul, Op::Div]] {
        if let Some((idx, op)) = find_operator(expr, ops) {
            let left = eval_recursive(&expr[..idx], vars)?;
            let right = eval_recursive(&expr[idx + 1..], vars)?;
            return op.apply(left, right);
        }
    }

    resolve_token(expr, vars)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'+' => Some(Self::Add),
            b'-' => Some(Self::Sub),
            b'*' => Some(Self::Mul),
            b'/' => Some(Self::Div),
            _ => None,
        }
    }

    fn apply(self, left: i32, right: i32) -> Result<i32, EvalError> {
        let result = match self {
            Self::Add => left.checked_add(right),
            Self::Sub => left.checked_sub(right),
            Self::Mul => left.checked_mul(right),
            Self::Div => {
                if right == 0 {
                    return Err(EvalError::DivisionByZero);
                }
                left.checked_div(right)
            }
        };
        result.ok_or(EvalError::Overflow)
    }
}

/// Return the inside of `expr` if one pair of parentheses wraps all of it
fn strip_outer_parens(expr: &str) -> Option<&str> {
    if !(expr.starts_with('(') && expr.ends_with(')')) {
        return None;
    }
    let last = expr.len() - 1;
    let mut depth = 0i32;
    for (i, b) in expr.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => depth -= 1,
            _ => {}
        }
        if depth == 0 && i < last {
            return None;
        }
    }
    Some(&expr[1..last])
}

/// Index of the rightmost operator from `ops` at parenthesis depth zero
///
/// An operator at index 0 is a sign, not a binary operator.
fn find_operator(expr: &str, ops: &[Op]) -> Option<(usize, Op)> {
    let mut depth = 0i32;
    let mut found = None;
    for (i, b) in expr.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => depth -= 1,
            _ if depth == 0 => {
                if let Some(op) = Op::from_byte(b).filter(|op| ops.contains(op)) {
                    found = Some((i, op));
                }
            }
            _ => {}
        }
    }
    found.filter(|&(i, _)| i > 0)
}

fn check_balanced(expr: &str) -> Result<(), EvalError> {
    let mut depth = 0i32;
    for b in expr.bytes() {
        match b {
            b'(' => depth += 1,
            b')' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            break;
        }
    }
    if depth != 0 {
        return Err(EvalError::UnbalancedParentheses(expr.to_string()));
    }
    Ok(())
}

fn lookup_simple(token: &str, vars: &VariableTable) -> Option<i32> {
    token.parse::<i32>().ok().or_else(|| vars.get(token))
}

fn resolve_token(token: &str, vars: &VariableTable) -> Result<i32, EvalError> {
    if let Some(value) = lookup_simple(token, vars) {
        return Ok(value);
    }
    if is_valid_name(token) {
        return Err(EvalError::UndefinedVariable(token.to_string()));
    }
    Err(EvalError::InvalidToken(token.to_string()))
}
