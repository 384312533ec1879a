//! Canonical rendering of condition expressions
//!
//! Output uses operator symbols and canonical keyword spelling, with
//! parentheses only where the tree would otherwise parse differently.

use std::fmt::{self, Write};

use super::ast::{BinaryOp, Expression};
use super::value::TypedValue;

const OR: u8 = 1;
const AND: u8 = 2;
const NOT: u8 = 3;
const COMPARISON: u8 = 4;
const PRIMARY: u8 = 5;

fn precedence(expr: &Expression) -> u8 {
    match expr {
        Expression::Binary { op: BinaryOp::Or, .. } => OR,
        Expression::Binary { op: BinaryOp::And, .. } => AND,
        Expression::Not(_) => NOT,
        Expression::Binary { .. } | Expression::Membership { .. } => COMPARISON,
        _ => PRIMARY,
    }
}

/// Render an expression for display
pub fn format_condition(expr: &Expression) -> String {
    expr.to_string()
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(value) => write_literal(f, value),
            Expression::Variable(name) => f.write_str(name),
            Expression::Attribute(stat) => f.write_str(stat.name()),
            Expression::Trait => f.write_str("trait"),
            Expression::Context(key) => write!(f, "{}", key),
            Expression::Not(inner) => {
                f.write_char('!')?;
                write_child(f, inner, precedence(inner) < NOT)
            }
            Expression::Binary { op, left, right } => {
                let (left_parens, right_parens) = if op.is_comparison() {
                    (precedence(left) < PRIMARY, precedence(right) < PRIMARY)
                } else {
                    let own = precedence(self);
                    (precedence(left) < own, precedence(right) <= own)
                };
                write_child(f, left, left_parens)?;
                write!(f, " {} ", op)?;
                write_child(f, right, right_parens)
            }
            Expression::Membership { value, set } => {
                write_child(f, value, precedence(value) < PRIMARY)?;
                f.write_str(" in ")?;
                write_child(f, set, precedence(set) < PRIMARY)
            }
        }
    }
}

fn write_child(f: &mut fmt::Formatter<'_>, child: &Expression, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "({})", child)
    } else {
        write!(f, "{}", child)
    }
}

fn write_literal(f: &mut fmt::Formatter<'_>, value: &TypedValue) -> fmt::Result {
    match value {
        TypedValue::Number(n) => write!(f, "{}", n),
        TypedValue::Boolean(b) => write!(f, "{}", b),
        TypedValue::Text(s) => {
            f.write_char('"')?;
            for c in s.chars() {
                match c {
                    '"' => f.write_str("\\\"")?,
                    '\\' => f.write_str("\\\\")?,
                    '\n' => f.write_str("\\n")?,
                    '\t' => f.write_str("\\t")?,
                    c => f.write_char(c)?,
                }
            }
            f.write_char('"')
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::parser::parse;

    fn canonical(source: &str) -> String {
        format_condition(&parse(source).unwrap())
    }

    #[test]
    fn test_normalizes_whitespace_and_keywords() {
        assert_eq!(canonical("level>=16&&hp>20"), "level >= 16 && HP > 20");
        assert_eq!(canonical("NATURE == 'Bold'"), r#"trait == "Bold""#);
        assert_eq!(canonical("not a and b or c"), "!a && b || c");
    }

    #[test]
    fn test_drops_redundant_parentheses() {
        assert_eq!(canonical("((level > 3))"), "level > 3");
        assert_eq!(canonical("(a && b) || c"), "a && b || c");
        assert_eq!(canonical("!(level > 3)"), "!level > 3");
    }

    #[test]
    fn test_keeps_needed_parentheses() {
        assert_eq!(canonical("(a || b) && c"), "(a || b) && c");
        assert_eq!(canonical("a && (b && c)"), "a && (b && c)");
        assert_eq!(canonical("!(a || b)"), "!(a || b)");
        assert_eq!(canonical("(!a) == b"), "(!a) == b");
        assert_eq!(canonical("(level > 3) == true"), "(level > 3) == true");
    }

    #[test]
    fn test_membership_and_literals() {
        assert_eq!(canonical(r#"'Bold' in trait"#), r#""Bold" in trait"#);
        assert_eq!(canonical("0.50 in spe"), "0.5 in Spe");
        assert_eq!(canonical(r#"name == 'say "hi"'"#), r#"name == "say \"hi\"""#);
    }

    #[test]
    fn test_round_trip_is_structural() {
        let sources = [
            "level >= 16 && HP > 20",
            r#"trait == "Bold" || "Timid" in nature"#,
            "!(a || b) && (c || !d)",
            "a && (b && c) || d",
            "(!a) == (b != c)",
            r#"x == "tab\there" && y != 'back\\slash'"#,
            "evolution > 0 || level < 10.5 && (SpA >= 20 || !rival)",
        ];
        for source in sources {
            let expr = parse(source).unwrap();
            let reparsed = parse(&format_condition(&expr)).unwrap();
            assert_eq!(reparsed, expr, "round trip of {}", source);
        }
    }
}
