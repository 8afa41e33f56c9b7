//! Terminal aggregation: folds, numeric sum/average/min/max, counting and
//! quantifiers.
//!
//! Every routine makes a single pass in source order. Numeric routines are
//! generic over `Aggregatable`, so the same code serves each width and its
//! nullable form; absent values never reach the accumulator.

use std::cmp::Ordering;

use asyncq_core::comparer::{EqualityComparer, OrderingComparer};
use asyncq_core::error::{Error, Result};
use asyncq_core::numeric::{Aggregatable, NumericKind};

/// Left fold seeded with the first element.
pub fn aggregate<T, F>(items: Vec<T>, func: F) -> Result<T>
where
    F: FnMut(T, T) -> T,
{
    let mut iter = items.into_iter();
    let seed = iter.next().ok_or(Error::EmptySequence)?;
    Ok(iter.fold(seed, func))
}

pub fn aggregate_seeded<T, A, F>(items: Vec<T>, seed: A, func: F) -> A
where
    F: FnMut(A, T) -> A,
{
    items.into_iter().fold(seed, func)
}

pub fn aggregate_with<T, A, R, F, S>(items: Vec<T>, seed: A, func: F, result: S) -> R
where
    F: FnMut(A, T) -> A,
    S: FnOnce(A) -> R,
{
    result(aggregate_seeded(items, seed, func))
}

/// Sum of the present values; zero when there are none.
pub fn sum<A, I>(values: I) -> Result<A::Kind>
where
    A: Aggregatable,
    I: IntoIterator<Item = A>,
{
    <A::Kind as NumericKind>::checked_sum(values.into_iter().filter_map(|v| v.present()))
        .ok_or(Error::Overflow)
}

/// Mean of the present values. Absent values do not count toward the divisor.
pub fn average<A, I>(values: I) -> Result<A::Mean>
where
    A: Aggregatable,
    I: IntoIterator<Item = A>,
{
    let mut total = <A::Kind as NumericKind>::wide_zero();
    let mut count = 0usize;
    for v in values.into_iter().filter_map(|v| v.present()) {
        total = <A::Kind as NumericKind>::wide_add(total, v.widen()).ok_or(Error::Overflow)?;
        count += 1;
    }
    let mean = (count > 0).then(|| <A::Kind as NumericKind>::mean(total, count));
    A::shape_mean(mean)
}

pub fn min<A, I>(values: I) -> Result<A::Extreme>
where
    A: Aggregatable,
    I: IntoIterator<Item = A>,
{
    numeric_extreme(values, Ordering::Less)
}

pub fn max<A, I>(values: I) -> Result<A::Extreme>
where
    A: Aggregatable,
    I: IntoIterator<Item = A>,
{
    numeric_extreme(values, Ordering::Greater)
}

fn numeric_extreme<A, I>(values: I, wanted: Ordering) -> Result<A::Extreme>
where
    A: Aggregatable,
    I: IntoIterator<Item = A>,
{
    let mut best: Option<A::Kind> = None;
    for v in values.into_iter().filter_map(|v| v.present()) {
        best = match best {
            Some(b) if NumericKind::compare(&v, &b) != wanted => Some(b),
            _ => Some(v),
        };
    }
    A::shape_extreme(best)
}

/// Smallest element under `comparer`; the first one wins ties.
pub fn min_with<T, I, C>(values: I, comparer: C) -> Result<T>
where
    I: IntoIterator<Item = T>,
    C: OrderingComparer<T>,
{
    extreme_with(values, &comparer, Ordering::Less)
}

/// Largest element under `comparer`; the first one wins ties.
pub fn max_with<T, I, C>(values: I, comparer: C) -> Result<T>
where
    I: IntoIterator<Item = T>,
    C: OrderingComparer<T>,
{
    extreme_with(values, &comparer, Ordering::Greater)
}

fn extreme_with<T, I, C>(values: I, comparer: &C, wanted: Ordering) -> Result<T>
where
    I: IntoIterator<Item = T>,
    C: OrderingComparer<T>,
{
    let mut iter = values.into_iter();
    let mut best = iter.next().ok_or(Error::EmptySequence)?;
    for item in iter {
        if comparer.compare(&item, &best) == wanted {
            best = item;
        }
    }
    Ok(best)
}

/// Smallest present value under `comparer`, skipping `None`; `None` when
/// nothing is present.
pub fn min_nullable_with<T, I, C>(values: I, comparer: C) -> Option<T>
where
    I: IntoIterator<Item = Option<T>>,
    C: OrderingComparer<T>,
{
    extreme_with(values.into_iter().flatten(), &comparer, Ordering::Less).ok()
}

/// Largest present value under `comparer`, skipping `None`.
pub fn max_nullable_with<T, I, C>(values: I, comparer: C) -> Option<T>
where
    I: IntoIterator<Item = Option<T>>,
    C: OrderingComparer<T>,
{
    extreme_with(values.into_iter().flatten(), &comparer, Ordering::Greater).ok()
}

pub fn count<T>(items: &[T]) -> usize {
    items.len()
}

pub fn count_where<T, P>(items: &[T], mut predicate: P) -> usize
where
    P: FnMut(&T) -> bool,
{
    items.iter().filter(|item| predicate(item)).count()
}

pub fn long_count<T>(items: &[T]) -> u64 {
    items.len() as u64
}

pub fn long_count_where<T, P>(items: &[T], predicate: P) -> u64
where
    P: FnMut(&T) -> bool,
{
    count_where(items, predicate) as u64
}

pub fn any<T>(items: &[T]) -> bool {
    !items.is_empty()
}

pub fn any_where<T, P>(items: &[T], predicate: P) -> bool
where
    P: FnMut(&T) -> bool,
{
    items.iter().any(predicate)
}

/// True for an empty sequence.
pub fn all<T, P>(items: &[T], predicate: P) -> bool
where
    P: FnMut(&T) -> bool,
{
    items.iter().all(predicate)
}

pub fn contains<T, C>(items: &[T], value: &T, comparer: C) -> bool
where
    C: EqualityComparer<T>,
{
    items.iter().any(|item| comparer.equals(item, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use asyncq_core::comparer::{by_key, DefaultEquality, NaturalOrder};
    use rust_decimal::Decimal;

    #[test]
    fn nullable_extremes_skip_absent_values() {
        let xs = vec![None, Some("b"), None, Some("a"), Some("c")];
        assert_eq!(min_nullable_with(xs.clone(), NaturalOrder), Some("a"));
        assert_eq!(max_nullable_with(xs, NaturalOrder), Some("c"));

        assert_eq!(min_nullable_with(Vec::<Option<&str>>::new(), NaturalOrder), None);
        assert_eq!(max_nullable_with(vec![None::<i32>, None], NaturalOrder), None);
    }

    #[test]
    fn sum_matches_seeded_fold() {
        let xs = vec![4, -2, 9, 13];
        let folded = aggregate_seeded(xs.clone(), 0, |acc, x| acc + x);
        assert_eq!(sum(xs).unwrap(), folded);
    }

    #[test]
    fn sum_of_empty_is_zero_for_every_width() {
        assert_eq!(sum(Vec::<i32>::new()).unwrap(), 0);
        assert_eq!(sum(Vec::<i64>::new()).unwrap(), 0);
        assert_eq!(sum(Vec::<f32>::new()).unwrap(), 0.0);
        assert_eq!(sum(vec![None::<f64>, None]).unwrap(), 0.0);
        assert_eq!(sum(Vec::<Decimal>::new()).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn nullable_sum_skips_absent() {
        assert_eq!(sum(vec![Some(2), None, Some(5)]).unwrap(), 7);
    }

    #[test]
    fn integer_sum_overflow_is_reported() {
        assert!(matches!(sum(vec![i32::MAX, 1]), Err(Error::Overflow)));
    }

    #[test]
    fn average_rules_differ_by_nullability() {
        assert!(matches!(average(Vec::<f64>::new()), Err(Error::EmptySequence)));
        assert_eq!(average(Vec::<Option<f64>>::new()).unwrap(), None);
        assert_eq!(average(vec![None::<i32>, None]).unwrap(), None);
        // Absent values do not count toward the divisor.
        assert_eq!(average(vec![Some(2), None, Some(4)]).unwrap(), Some(3.0));
        assert_eq!(average(vec![1, 2]).unwrap(), 1.5);
        assert_eq!(average(vec![1.0f32, 2.0]).unwrap(), 1.5f32);
        assert_eq!(
            average(vec![Decimal::new(1, 0), Decimal::new(2, 0)]).unwrap(),
            Decimal::new(15, 1)
        );
    }

    #[test]
    fn integer_average_does_not_overflow_i32() {
        assert_eq!(average(vec![i32::MAX, i32::MAX]).unwrap(), i32::MAX as f64);
    }

    #[test]
    fn min_max_on_empty_and_nullable() {
        assert!(matches!(min(Vec::<i64>::new()), Err(Error::EmptySequence)));
        assert!(matches!(max(Vec::<Decimal>::new()), Err(Error::EmptySequence)));
        assert_eq!(min(vec![None::<i32>]).unwrap(), None);
        assert_eq!(max(vec![Some(3), None, Some(8), Some(1)]).unwrap(), Some(8));
        assert_eq!(min(vec![Some(3), None, Some(8), Some(1)]).unwrap(), Some(1));
    }

    #[test]
    fn float_extremes_follow_nan_rules() {
        assert!(min(vec![1.0, f64::NAN, -4.0]).unwrap().is_nan());
        assert_eq!(max(vec![1.0, f64::NAN, -4.0]).unwrap(), 1.0);
        assert!(max(vec![f64::NAN, f64::NAN]).unwrap().is_nan());
    }

    #[test]
    fn comparer_extremes_keep_first_tie() {
        let words = vec!["bb", "a", "cc", "d"];
        let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
        assert_eq!(min_with(words.clone(), by_len).unwrap(), "a");
        assert_eq!(max_with(words, by_len).unwrap(), "bb");
        assert!(matches!(
            min_with(Vec::<u8>::new(), NaturalOrder),
            Err(Error::EmptySequence)
        ));
    }

    #[test]
    fn aggregate_without_seed_needs_an_element() {
        assert!(matches!(
            aggregate(Vec::<i32>::new(), |a, b| a + b),
            Err(Error::EmptySequence)
        ));
        assert_eq!(aggregate(vec![1, 2, 3], |a, b| a * 10 + b).unwrap(), 123);
        let shout = aggregate_with(vec!["a", "b"], String::new(), |acc, s| acc + s, |s| {
            s.to_uppercase()
        });
        assert_eq!(shout, "AB");
    }

    #[test]
    fn quantifiers_and_contains() {
        let xs = [1, 2, 3, 4];
        assert!(any(&xs));
        assert!(!any::<i32>(&[]));
        assert!(any_where(&xs, |x| *x > 3));
        assert!(all(&xs, |x| *x > 0));
        assert!(all::<i32, _>(&[], |_| false));
        assert_eq!(count_where(&xs, |x| x % 2 == 0), 2);
        assert_eq!(long_count(&xs), 4);
        assert!(contains(&xs, &3, DefaultEquality));
        let names = ["Ada".to_string(), "Grace".to_string()];
        assert!(contains(
            &names,
            &"grace".to_string(),
            by_key(|s: &String| s.to_lowercase())
        ));
    }
}
