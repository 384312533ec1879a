//! Condition expression evaluator
//!
//! Comparisons against IV ranges answer "is this certainly true": `HP > 20`
//! holds only when every IV still possible for HP is above 20. Membership
//! (`in`) answers "is this still possible" instead.

use std::cmp::Ordering;

use super::ast::{BinaryOp, ContextKey, Expression};
use super::environment::Environment;
use super::value::TypedValue;
use crate::error::EvalError;
use crate::tracker::{IvRange, Nature, NatureSet, Stat};

/// Intermediate result of evaluating a node
#[derive(Debug, Clone)]
enum Operand<'env> {
    Scalar(TypedValue),
    Range(Stat, IvRange),
    Natures(&'env NatureSet),
}

impl Operand<'_> {
    fn describe(&self) -> String {
        match self {
            Operand::Scalar(TypedValue::Text(s)) => format!("text \"{}\"", s),
            Operand::Scalar(v) => format!("{} {}", v.kind_name(), v),
            Operand::Range(stat, range) => format!("IV range of {} ({})", stat, range),
            Operand::Natures(set) => format!("trait {}", set),
        }
    }
}

/// Evaluate an expression to a value
pub fn evaluate(expr: &Expression, env: &Environment) -> Result<TypedValue, EvalError> {
    match eval_operand(expr, env)? {
        Operand::Scalar(value) => Ok(value),
        Operand::Range(stat, range) => match range.determined() {
            Some(iv) => Ok(TypedValue::Number(f64::from(iv))),
            None => Err(EvalError::mismatch(format!(
                "{} is not a single value (IV {})",
                stat, range
            ))),
        },
        Operand::Natures(set) => match set.single() {
            Some(nature) => Ok(TypedValue::Text(nature.name().to_string())),
            None => Err(EvalError::mismatch(format!(
                "trait is not a single value {}",
                set
            ))),
        },
    }
}

/// Evaluate an expression that must produce a boolean
pub fn evaluate_condition(expr: &Expression, env: &Environment) -> Result<bool, EvalError> {
    match evaluate(expr, env)? {
        TypedValue::Boolean(b) => Ok(b),
        other => Err(EvalError::NotBoolean(Operand::Scalar(other).describe())),
    }
}

fn eval_operand<'env>(expr: &Expression, env: &'env Environment) -> Result<Operand<'env>, EvalError> {
    match expr {
        Expression::Literal(value) => Ok(Operand::Scalar(value.clone())),
        Expression::Variable(name) => env
            .variables
            .get(name)
            .cloned()
            .map(Operand::Scalar)
            .ok_or_else(|| EvalError::UnboundVariable(name.clone())),
        Expression::Attribute(stat) => Ok(Operand::Range(*stat, env.ranges.get(*stat))),
        Expression::Trait => Ok(Operand::Natures(&env.natures)),
        Expression::Context(ContextKey::Level) => Ok(Operand::Scalar(TypedValue::Number(env.level))),
        Expression::Context(ContextKey::Evolution) => {
            Ok(Operand::Scalar(TypedValue::Number(env.evolution)))
        }
        Expression::Not(inner) => {
            let value = expect_bool("!", eval_operand(inner, env)?)?;
            Ok(Operand::Scalar(TypedValue::Boolean(!value)))
        }
        Expression::Binary { op, left, right } => match op {
            BinaryOp::And | BinaryOp::Or => {
                let symbol = op.to_string();
                let left = expect_bool(&symbol, eval_operand(left, env)?)?;
                // short-circuit once the left operand decides the result
                if left == (*op == BinaryOp::Or) {
                    return Ok(Operand::Scalar(TypedValue::Boolean(left)));
                }
                let right = expect_bool(&symbol, eval_operand(right, env)?)?;
                Ok(Operand::Scalar(TypedValue::Boolean(right)))
            }
            _ => {
                let left = eval_operand(left, env)?;
                let right = eval_operand(right, env)?;
                compare(*op, &left, &right).map(|b| Operand::Scalar(TypedValue::Boolean(b)))
            }
        },
        Expression::Membership { value, set } => {
            let value = eval_operand(value, env)?;
            let set = eval_operand(set, env)?;
            membership(&value, &set).map(|b| Operand::Scalar(TypedValue::Boolean(b)))
        }
    }
}

fn expect_bool(op: &str, operand: Operand<'_>) -> Result<bool, EvalError> {
    match operand {
        Operand::Scalar(TypedValue::Boolean(b)) => Ok(b),
        other => Err(EvalError::mismatch(format!(
            "'{}' expects boolean operands, got {}",
            op,
            other.describe()
        ))),
    }
}

fn compare(op: BinaryOp, left: &Operand<'_>, right: &Operand<'_>) -> Result<bool, EvalError> {
    match (left, right) {
        (Operand::Scalar(a), Operand::Scalar(b)) => compare_scalars(op, a, b),
        (Operand::Range(_, range), Operand::Scalar(TypedValue::Number(n))) => {
            range_vs_number(op, range, *n)
        }
        (Operand::Scalar(TypedValue::Number(n)), Operand::Range(_, range)) => {
            range_vs_number(op.flipped(), range, *n)
        }
        (Operand::Range(_, a), Operand::Range(_, b)) => Ok(range_vs_range(op, a, b)),
        (Operand::Natures(set), Operand::Scalar(TypedValue::Text(name)))
        | (Operand::Scalar(TypedValue::Text(name)), Operand::Natures(set)) => {
            natures_vs_name(op, set, name)
        }
        _ => Err(cannot_compare(op, left, right)),
    }
}

fn cannot_compare(op: BinaryOp, left: &Operand<'_>, right: &Operand<'_>) -> EvalError {
    EvalError::mismatch(format!(
        "cannot apply '{}' to {} and {}",
        op,
        left.describe(),
        right.describe()
    ))
}

fn not_a_number() -> EvalError {
    EvalError::mismatch("comparison with a value that is not a number (NaN)")
}

fn apply_ordering(op: BinaryOp, ordering: Ordering) -> bool {
    match op {
        BinaryOp::Eq => ordering == Ordering::Equal,
        BinaryOp::NotEq => ordering != Ordering::Equal,
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::Lte => ordering != Ordering::Greater,
        BinaryOp::Gt => ordering == Ordering::Greater,
        BinaryOp::Gte => ordering != Ordering::Less,
        BinaryOp::And | BinaryOp::Or => false,
    }
}

fn compare_scalars(op: BinaryOp, a: &TypedValue, b: &TypedValue) -> Result<bool, EvalError> {
    match (a, b) {
        (TypedValue::Number(x), TypedValue::Number(y)) => x
            .partial_cmp(y)
            .map(|ordering| apply_ordering(op, ordering))
            .ok_or_else(not_a_number),
        (TypedValue::Text(x), TypedValue::Text(y)) => Ok(apply_ordering(op, x.cmp(y))),
        (TypedValue::Boolean(x), TypedValue::Boolean(y)) => match op {
            BinaryOp::Eq => Ok(x == y),
            BinaryOp::NotEq => Ok(x != y),
            _ => Err(EvalError::mismatch(format!(
                "'{}' cannot order boolean values",
                op
            ))),
        },
        _ => Err(cannot_compare(
            op,
            &Operand::Scalar(a.clone()),
            &Operand::Scalar(b.clone()),
        )),
    }
}

/// True only if `iv op n` holds for every IV in the range
fn range_vs_number(op: BinaryOp, range: &IvRange, n: f64) -> Result<bool, EvalError> {
    if n.is_nan() {
        return Err(not_a_number());
    }
    let (low, high) = (f64::from(range.low), f64::from(range.high));
    Ok(match op {
        BinaryOp::Lt => high < n,
        BinaryOp::Lte => high <= n,
        BinaryOp::Gt => low > n,
        BinaryOp::Gte => low >= n,
        BinaryOp::Eq => low == high && low == n,
        BinaryOp::NotEq => n.fract() != 0.0 || n < low || n > high,
        BinaryOp::And | BinaryOp::Or => false,
    })
}

/// True only if `a op b` holds for every pair of IVs
fn range_vs_range(op: BinaryOp, a: &IvRange, b: &IvRange) -> bool {
    match op {
        BinaryOp::Lt => a.high < b.low,
        BinaryOp::Lte => a.high <= b.low,
        BinaryOp::Gt => a.low > b.high,
        BinaryOp::Gte => a.low >= b.high,
        BinaryOp::Eq => a.determined().is_some() && a.determined() == b.determined(),
        BinaryOp::NotEq => a.high < b.low || b.high < a.low,
        BinaryOp::And | BinaryOp::Or => false,
    }
}

fn parse_nature(name: &str) -> Result<Nature, EvalError> {
    name.parse::<Nature>().map_err(EvalError::TypeMismatch)
}

/// `==` holds once the nature is certain, `!=` once it is ruled out
fn natures_vs_name(op: BinaryOp, set: &NatureSet, name: &str) -> Result<bool, EvalError> {
    let nature = parse_nature(name)?;
    match op {
        BinaryOp::Eq => Ok(set.single() == Some(nature)),
        BinaryOp::NotEq => Ok(!set.contains(nature)),
        _ => Err(EvalError::mismatch(format!("'{}' cannot order natures", op))),
    }
}

fn membership(value: &Operand<'_>, set: &Operand<'_>) -> Result<bool, EvalError> {
    match (value, set) {
        (Operand::Scalar(TypedValue::Text(name)), Operand::Natures(natures)) => {
            Ok(natures.contains(parse_nature(name)?))
        }
        (Operand::Scalar(TypedValue::Number(n)), Operand::Range(_, range)) => {
            if n.is_nan() {
                return Err(not_a_number());
            }
            Ok(n.fract() == 0.0 && f64::from(range.low) <= *n && *n <= f64::from(range.high))
        }
        _ => Err(EvalError::mismatch(format!(
            "'in' cannot test {} against {}",
            value.describe(),
            set.describe()
        ))),
    }
}
