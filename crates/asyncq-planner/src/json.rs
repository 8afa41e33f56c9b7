//! Comparers and field access for `serde_json::Value` records.
//!
//! `JsonOrder` ranks values by kind (null < bool < number < string < array
//! < object) and then by content; numbers compare by value, so `1` and `1.0`
//! are equal. `JsonEquality` agrees with that order and hashes a canonical
//! form, so `equals(a, b)` always implies equal hashes.

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use asyncq_core::comparer::{EqualityComparer, OrderingComparer};
use asyncq_core::error::{Error, Result};

static NULL: Value = Value::Null;

/// Value at a dotted path (`"customer.city"`). Missing paths read as null.
pub fn field<'a>(record: &'a Value, path: &str) -> &'a Value {
    path.split('.')
        .try_fold(record, |cur, part| cur.get(part))
        .unwrap_or(&NULL)
}

/// Numeric view of a value for sum/average.
///
/// Null is always absent. Other non-numbers are absent unless `strict`, in
/// which case they fail with `InvalidArgument`.
pub fn numeric(value: &Value, path: &str, strict: bool) -> Result<Option<Decimal>> {
    let parsed = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
        }
        _ => None,
    };
    match parsed {
        Some(d) => Ok(Some(d)),
        None if strict => Err(Error::InvalidArgument(format!(
            "field `{path}` holds a non-numeric value: {value}"
        ))),
        None => Ok(None),
    }
}

fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// True when both values are of the same JSON kind.
pub fn same_kind(a: &Value, b: &Value) -> bool {
    rank(a) == rank(b)
}

/// A JSON number normalized for comparison. Integral values, including
/// integral floats such as `1.0`, compare exactly as integers.
#[derive(Clone, Copy)]
enum Num {
    Int(i128),
    Float(f64),
}

fn number(n: &serde_json::Number) -> Num {
    if let Some(i) = n.as_i64() {
        return Num::Int(i128::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Num::Int(i128::from(u));
    }
    let f = n.as_f64().unwrap_or(0.0);
    if f.fract() == 0.0 && f.abs() < 1e38 {
        // also folds -0.0 into 0
        Num::Int(f as i128)
    } else {
        Num::Float(f)
    }
}

fn compare_numbers(a: Num, b: Num) -> Ordering {
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => x.cmp(&y),
        (Num::Float(x), Num::Float(y)) => x.total_cmp(&y),
        (Num::Int(x), Num::Float(y)) => (x as f64).total_cmp(&y),
        (Num::Float(x), Num::Int(y)) => x.total_cmp(&(y as f64)),
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => compare_numbers(number(x), number(y)),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x
            .iter()
            .zip(y)
            .map(|(l, r)| compare_values(l, r))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        (Value::Object(x), Value::Object(y)) => {
            let mut xs: Vec<_> = x.iter().collect();
            let mut ys: Vec<_> = y.iter().collect();
            xs.sort_by(|l, r| l.0.cmp(r.0));
            ys.sort_by(|l, r| l.0.cmp(r.0));
            xs.iter()
                .zip(&ys)
                .map(|((lk, lv), (rk, rv))| lk.cmp(rk).then_with(|| compare_values(lv, rv)))
                .find(|o| o.is_ne())
                .unwrap_or_else(|| xs.len().cmp(&ys.len()))
        }
        _ => rank(a).cmp(&rank(b)),
    }
}

fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    rank(value).hash(state);
    match value {
        Value::Null => {}
        Value::Bool(b) => b.hash(state),
        Value::Number(n) => match number(n) {
            Num::Int(i) => (0u8, i).hash(state),
            Num::Float(f) => (1u8, f.to_bits()).hash(state),
        },
        Value::String(s) => s.hash(state),
        Value::Array(items) => {
            items.len().hash(state);
            for item in items {
                hash_value(item, state);
            }
        }
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|l, r| l.0.cmp(r.0));
            entries.len().hash(state);
            for (k, v) in entries {
                k.hash(state);
                hash_value(v, state);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOrder;

impl OrderingComparer<Value> for JsonOrder {
    fn compare(&self, a: &Value, b: &Value) -> Ordering {
        compare_values(a, b)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEquality;

impl EqualityComparer<Value> for JsonEquality {
    fn equals(&self, a: &Value, b: &Value) -> bool {
        compare_values(a, b) == Ordering::Equal
    }

    fn hash(&self, value: &Value) -> u64 {
        let mut h = DefaultHasher::new();
        hash_value(value, &mut h);
        h.finish()
    }
}

/// Record equality through one field's value.
#[derive(Debug, Clone)]
pub struct FieldEquality {
    path: String,
}

impl FieldEquality {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl EqualityComparer<Value> for FieldEquality {
    fn equals(&self, a: &Value, b: &Value) -> bool {
        JsonEquality.equals(field(a, &self.path), field(b, &self.path))
    }

    fn hash(&self, value: &Value) -> u64 {
        JsonEquality.hash(field(value, &self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn large_integers_stay_distinct() {
        let a = json!(9_007_199_254_740_993u64);
        let b = json!(9_007_199_254_740_992u64);
        assert_eq!(JsonOrder.compare(&a, &b), Ordering::Greater);
        assert!(!JsonEquality.equals(&a, &b));

        let one = json!(1);
        let one_f = json!(1.0);
        assert!(JsonEquality.equals(&one, &one_f));
        assert_eq!(JsonEquality.hash(&one), JsonEquality.hash(&one_f));
        assert_eq!(JsonOrder.compare(&json!(2), &json!(2.5)), Ordering::Less);
    }

    #[test]
    fn kinds_rank_before_content() {
        let mut values = vec![
            json!({"a": 1}),
            json!("b"),
            json!(2),
            json!(null),
            json!([1]),
            json!(true),
        ];
        values.sort_by(|a, b| JsonOrder.compare(a, b));
        assert_eq!(
            values,
            vec![json!(null), json!(true), json!(2), json!("b"), json!([1]), json!({"a": 1})]
        );
    }

    #[test]
    fn numbers_compare_by_value() {
        assert!(JsonEquality.equals(&json!(1), &json!(1.0)));
        assert_eq!(JsonEquality.hash(&json!(1)), JsonEquality.hash(&json!(1.0)));
        assert_eq!(JsonOrder.compare(&json!(2), &json!(10)), Ordering::Less);
        assert_eq!(JsonOrder.compare(&json!("10"), &json!("2")), Ordering::Less);
    }

    #[test]
    fn objects_ignore_key_order() {
        let a = json!({"x": 1, "y": [true, null]});
        let b = json!({"y": [true, null], "x": 1.0});
        assert!(JsonEquality.equals(&a, &b));
        assert_eq!(JsonEquality.hash(&a), JsonEquality.hash(&b));
    }

    #[test]
    fn dotted_paths_and_missing_fields() {
        let rec = json!({"customer": {"city": "Oslo"}, "n": 3});
        assert_eq!(field(&rec, "customer.city"), &json!("Oslo"));
        assert_eq!(field(&rec, "customer.zip"), &Value::Null);
        assert_eq!(field(&rec, "n.deeper"), &Value::Null);
    }

    #[test]
    fn numeric_rules() {
        assert_eq!(numeric(&json!(2.5), "p", true).unwrap(), Some(Decimal::new(25, 1)));
        assert_eq!(numeric(&json!(null), "p", true).unwrap(), None);
        assert_eq!(numeric(&json!("x"), "p", false).unwrap(), None);
        assert!(matches!(
            numeric(&json!("x"), "p", true),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn field_equality_projects() {
        let c = FieldEquality::new("id");
        assert!(c.equals(&json!({"id": 1, "v": "a"}), &json!({"id": 1, "v": "b"})));
        assert!(!c.equals(&json!({"id": 1}), &json!({"id": 2})));
    }
}
