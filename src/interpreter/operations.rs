//! Operator semantics. The teacher's `infix`/`unary` functions give the
//! shape (match on an op enum, coerce operands, produce a `Value`) but
//! only cover a handful of numeric ops against a boolean-as-`f64`
//! encoding; this generalizes that shape to real `bool` values and the
//! full operator set, adding the strict (no coercion) vs loose
//! (coercing) equality distinction the teacher's language doesn't make.

use std::rc::Rc;

use crate::ast::node::{BinaryOp, UnaryOp};
use crate::error::EvalError;
use crate::interpreter::value::{to_bool, to_js_string, to_number, Value};

pub fn unary(op: UnaryOp, value: Value) -> Result<Value, EvalError> {
    Ok(match op {
        UnaryOp::Not => Value::Boolean(!to_bool(&value)),
        UnaryOp::Minus => Value::Number(-to_number(&value)),
        UnaryOp::Plus => Value::Number(to_number(&value)),
    })
}

pub fn binary(op: BinaryOp, left: Value, right: Value) -> Result<Value, EvalError> {
    Ok(match op {
        BinaryOp::Add => add(left, right),
        BinaryOp::Sub => Value::Number(to_number(&left) - to_number(&right)),
        BinaryOp::Mul => Value::Number(to_number(&left) * to_number(&right)),
        BinaryOp::Div => Value::Number(to_number(&left) / to_number(&right)),
        BinaryOp::Mod => Value::Number(to_number(&left) % to_number(&right)),
        BinaryOp::Pow => Value::Number(to_number(&left).powf(to_number(&right))),
        BinaryOp::BitAnd => Value::Number((to_i32(&left) & to_i32(&right)) as f64),
        BinaryOp::BitOr => Value::Number((to_i32(&left) | to_i32(&right)) as f64),
        BinaryOp::BitXor => Value::Number((to_i32(&left) ^ to_i32(&right)) as f64),
        BinaryOp::Shl => Value::Number(((to_i32(&left)) << (to_i32(&right) & 31)) as f64),
        BinaryOp::Shr => Value::Number(((to_i32(&left)) >> (to_i32(&right) & 31)) as f64),
        BinaryOp::Lt => Value::Boolean(compare(&left, &right) == Some(std::cmp::Ordering::Less)),
        BinaryOp::Le => Value::Boolean(matches!(
            compare(&left, &right),
            Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)
        )),
        BinaryOp::Gt => Value::Boolean(compare(&left, &right) == Some(std::cmp::Ordering::Greater)),
        BinaryOp::Ge => Value::Boolean(matches!(
            compare(&left, &right),
            Some(std::cmp::Ordering::Greater | std::cmp::Ordering::Equal)
        )),
        BinaryOp::Eq => Value::Boolean(loose_eq(&left, &right)),
        BinaryOp::Ne => Value::Boolean(!loose_eq(&left, &right)),
        BinaryOp::StrictEq => Value::Boolean(strict_eq(&left, &right)),
        BinaryOp::StrictNe => Value::Boolean(!strict_eq(&left, &right)),
    })
}

/// Polymorphic `+`: string concatenation when either operand is a
/// string, otherwise numeric addition with standard coercion.
fn add(left: Value, right: Value) -> Value {
    if matches!(left, Value::String(_)) || matches!(right, Value::String(_)) {
        Value::String(to_js_string(&left) + &to_js_string(&right))
    } else {
        Value::Number(to_number(&left) + to_number(&right))
    }
}

fn to_i32(value: &Value) -> i32 {
    let n = to_number(value);
    if !n.is_finite() {
        return 0;
    }
    n as i64 as i32
}

/// Relational ordering: lexicographic when both sides are strings
/// (matching the reference language), numeric coercion otherwise.
/// `NaN` on either side orders as incomparable.
fn compare(left: &Value, right: &Value) -> Option<std::cmp::Ordering> {
    if let (Value::String(a), Value::String(b)) = (left, right) {
        return Some(a.cmp(b));
    }
    to_number(left).partial_cmp(&to_number(right))
}

/// `===`/`!==`: same type and same value, reference equality for
/// arrays/objects/functions, no coercion.
fn strict_eq(left: &Value, right: &Value) -> bool {
    left == right
}

/// `==`/`!=`: the reference language's loose equality, a small,
/// intentionally non-exhaustive subset of the full abstract-equality
/// algorithm (null/undefined unify; number/string/boolean operands
/// coerce to number; everything else falls back to strict equality).
fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Undefined | Value::Null, Value::Undefined | Value::Null) => true,
        (Value::Boolean(_), _) => loose_eq(&Value::Number(to_number(left)), right),
        (_, Value::Boolean(_)) => loose_eq(left, &Value::Number(to_number(right))),
        (Value::Number(_), Value::String(_)) | (Value::String(_), Value::Number(_)) => {
            to_number(left) == to_number(right)
        }
        (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
        (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
        _ => strict_eq(left, right),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_polymorphic_add() {
        assert_eq!(
            binary(BinaryOp::Add, Value::Number(1.0), Value::Number(2.0)).unwrap(),
            Value::Number(3.0)
        );
        assert_eq!(
            binary(BinaryOp::Add, Value::String("a".into()), Value::Number(1.0)).unwrap(),
            Value::String("a1".into())
        );
    }

    #[test]
    fn test_strict_vs_loose_equality() {
        assert_eq!(
            binary(BinaryOp::StrictEq, Value::Number(1.0), Value::String("1".into())).unwrap(),
            Value::Boolean(false)
        );
        assert_eq!(
            binary(BinaryOp::Eq, Value::Number(1.0), Value::String("1".into())).unwrap(),
            Value::Boolean(true)
        );
        assert_eq!(
            binary(BinaryOp::Eq, Value::Null, Value::Undefined).unwrap(),
            Value::Boolean(true)
        );
    }

    #[test]
    fn test_bitwise_and_shift() {
        assert_eq!(
            binary(BinaryOp::BitAnd, Value::Number(6.0), Value::Number(3.0)).unwrap(),
            Value::Number(2.0)
        );
        assert_eq!(
            binary(BinaryOp::Shl, Value::Number(1.0), Value::Number(4.0)).unwrap(),
            Value::Number(16.0)
        );
    }

    #[test]
    fn test_string_relational_is_lexicographic() {
        assert_eq!(
            binary(BinaryOp::Lt, Value::String("a".into()), Value::String("b".into())).unwrap(),
            Value::Boolean(true)
        );
    }

    #[test]
    fn test_unary_not_and_negate() {
        assert_eq!(unary(UnaryOp::Not, Value::Number(0.0)).unwrap(), Value::Boolean(true));
        assert_eq!(unary(UnaryOp::Minus, Value::Number(3.0)).unwrap(), Value::Number(-3.0));
    }
}
