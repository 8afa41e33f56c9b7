//! Numeric-kind descriptors.
//!
//! One generic aggregation routine per operator (sum/average/min/max) is
//! instantiated per width through `NumericKind`. `Aggregatable` adds the
//! nullable half: each kind `N` and its `Option<N>` map elements to
//! `Option<N>` and shape the results. Absent values are skipped entirely.
//!
//! Width rules:
//! - `i32`, `i64`: checked sums; averages accumulate in `i64` and yield `f64`.
//! - `f32`: averages accumulate in `f64` and yield `f32`.
//! - `f64`: plain IEEE sums; never overflow.
//! - `Decimal`: checked sums; averages yield `Decimal`.
//!
//! Floats order NaN below every number, so `min` sees NaN whenever one is
//! present and `max` only when every value is NaN.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::error::{Error, Result};

pub trait NumericKind: Copy + Send + Sync + 'static {
    /// Accumulator used for averages.
    type Wide: Copy;
    /// Result type of an average over this kind.
    type Mean;

    fn zero() -> Self;
    fn checked_add(self, rhs: Self) -> Option<Self>;
    fn compare(&self, other: &Self) -> Ordering;

    /// Total of `values`; `None` on overflow.
    fn checked_sum<I>(values: I) -> Option<Self>
    where
        I: Iterator<Item = Self>,
    {
        values.into_iter().try_fold(Self::zero(), Self::checked_add)
    }

    fn widen(self) -> Self::Wide;
    fn wide_zero() -> Self::Wide;
    fn wide_add(acc: Self::Wide, value: Self::Wide) -> Option<Self::Wide>;
    /// `count` is always at least one.
    fn mean(total: Self::Wide, count: usize) -> Self::Mean;
}

macro_rules! integer_kind {
    ($($t:ty),*) => {$(
        impl NumericKind for $t {
            type Wide = i64;
            type Mean = f64;

            fn zero() -> Self {
                0
            }

            fn checked_add(self, rhs: Self) -> Option<Self> {
                <$t>::checked_add(self, rhs)
            }

            fn compare(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }

            fn widen(self) -> i64 {
                i64::from(self)
            }

            fn wide_zero() -> i64 {
                0
            }

            fn wide_add(acc: i64, value: i64) -> Option<i64> {
                acc.checked_add(value)
            }

            fn mean(total: i64, count: usize) -> f64 {
                total as f64 / count as f64
            }
        }
    )*};
}

integer_kind!(i32, i64);

fn nan_least<F: PartialOrd>(a: &F, b: &F, a_nan: bool, b_nan: bool) -> Ordering {
    match (a_nan, b_nan) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
    }
}

impl NumericKind for f32 {
    type Wide = f64;
    type Mean = f32;

    fn zero() -> Self {
        0.0
    }

    fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(self + rhs)
    }

    /// Accumulates in `f64` and narrows once at the end.
    fn checked_sum<I>(values: I) -> Option<Self>
    where
        I: Iterator<Item = Self>,
    {
        Some(values.map(f64::from).sum::<f64>() as f32)
    }

    fn compare(&self, other: &Self) -> Ordering {
        nan_least(self, other, self.is_nan(), other.is_nan())
    }

    fn widen(self) -> f64 {
        f64::from(self)
    }

    fn wide_zero() -> f64 {
        0.0
    }

    fn wide_add(acc: f64, value: f64) -> Option<f64> {
        Some(acc + value)
    }

    fn mean(total: f64, count: usize) -> f32 {
        (total / count as f64) as f32
    }
}

impl NumericKind for f64 {
    type Wide = f64;
    type Mean = f64;

    fn zero() -> Self {
        0.0
    }

    fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(self + rhs)
    }

    fn compare(&self, other: &Self) -> Ordering {
        nan_least(self, other, self.is_nan(), other.is_nan())
    }

    fn widen(self) -> f64 {
        self
    }

    fn wide_zero() -> f64 {
        0.0
    }

    fn wide_add(acc: f64, value: f64) -> Option<f64> {
        Some(acc + value)
    }

    fn mean(total: f64, count: usize) -> f64 {
        total / count as f64
    }
}

impl NumericKind for Decimal {
    type Wide = Decimal;
    type Mean = Decimal;

    fn zero() -> Self {
        Decimal::ZERO
    }

    fn checked_add(self, rhs: Self) -> Option<Self> {
        Decimal::checked_add(self, rhs)
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn widen(self) -> Decimal {
        self
    }

    fn wide_zero() -> Decimal {
        Decimal::ZERO
    }

    fn wide_add(acc: Decimal, value: Decimal) -> Option<Decimal> {
        acc.checked_add(value)
    }

    fn mean(total: Decimal, count: usize) -> Decimal {
        total / Decimal::from(count as u64)
    }
}

/// Element types the numeric aggregations accept: a kind or its nullable form.
pub trait Aggregatable: Sized {
    type Kind: NumericKind;
    /// `average` result: the kind's mean, or `Option` of it when nullable.
    type Mean;
    /// `min`/`max` result: the kind, or `Option` of it when nullable.
    type Extreme;

    fn present(self) -> Option<Self::Kind>;

    /// `None` means no value was present. Non-nullable forms fail.
    fn shape_mean(mean: Option<<Self::Kind as NumericKind>::Mean>) -> Result<Self::Mean>;
    fn shape_extreme(value: Option<Self::Kind>) -> Result<Self::Extreme>;
}

macro_rules! aggregatable {
    ($($t:ty),*) => {$(
        impl Aggregatable for $t {
            type Kind = $t;
            type Mean = <$t as NumericKind>::Mean;
            type Extreme = $t;

            fn present(self) -> Option<$t> {
                Some(self)
            }

            fn shape_mean(mean: Option<<$t as NumericKind>::Mean>) -> Result<Self::Mean> {
                mean.ok_or(Error::EmptySequence)
            }

            fn shape_extreme(value: Option<$t>) -> Result<$t> {
                value.ok_or(Error::EmptySequence)
            }
        }

        impl Aggregatable for Option<$t> {
            type Kind = $t;
            type Mean = Option<<$t as NumericKind>::Mean>;
            type Extreme = Option<$t>;

            fn present(self) -> Option<$t> {
                self
            }

            fn shape_mean(mean: Option<<$t as NumericKind>::Mean>) -> Result<Self::Mean> {
                Ok(mean)
            }

            fn shape_extreme(value: Option<$t>) -> Result<Option<$t>> {
                Ok(value)
            }
        }
    )*};
}

aggregatable!(i32, i64, f32, f64, Decimal);
