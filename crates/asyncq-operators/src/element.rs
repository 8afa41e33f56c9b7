//! Element access: first, last, single and positional lookups.
//!
//! The `_or_default` forms return `None` where their strict counterparts
//! fail with `EmptySequence`. `single` is the exception to that rule: more
//! than one match is an error for both forms.

use asyncq_core::error::{Error, Result};

pub fn first<T>(items: Vec<T>) -> Result<T> {
    first_or_default(items).ok_or(Error::EmptySequence)
}

pub fn first_where<T, P>(items: Vec<T>, predicate: P) -> Result<T>
where
    P: FnMut(&T) -> bool,
{
    first_or_default_where(items, predicate).ok_or(Error::EmptySequence)
}

pub fn first_or_default<T>(items: Vec<T>) -> Option<T> {
    items.into_iter().next()
}

pub fn first_or_default_where<T, P>(items: Vec<T>, predicate: P) -> Option<T>
where
    P: FnMut(&T) -> bool,
{
    items.into_iter().find(predicate)
}

pub fn last<T>(items: Vec<T>) -> Result<T> {
    last_or_default(items).ok_or(Error::EmptySequence)
}

pub fn last_where<T, P>(items: Vec<T>, predicate: P) -> Result<T>
where
    P: FnMut(&T) -> bool,
{
    last_or_default_where(items, predicate).ok_or(Error::EmptySequence)
}

pub fn last_or_default<T>(mut items: Vec<T>) -> Option<T> {
    items.pop()
}

pub fn last_or_default_where<T, P>(items: Vec<T>, mut predicate: P) -> Option<T>
where
    P: FnMut(&T) -> bool,
{
    // Every element is tested, front to back.
    items.into_iter().filter(|item| predicate(item)).last()
}

pub fn single<T>(items: Vec<T>) -> Result<T> {
    single_or_default(items)?.ok_or(Error::EmptySequence)
}

pub fn single_where<T, P>(items: Vec<T>, predicate: P) -> Result<T>
where
    P: FnMut(&T) -> bool,
{
    single_or_default_where(items, predicate)?.ok_or(Error::EmptySequence)
}

/// `None` for an empty sequence; `MultipleMatches` for more than one element.
pub fn single_or_default<T>(items: Vec<T>) -> Result<Option<T>> {
    exactly_one(items.into_iter())
}

pub fn single_or_default_where<T, P>(items: Vec<T>, mut predicate: P) -> Result<Option<T>>
where
    P: FnMut(&T) -> bool,
{
    exactly_one(items.into_iter().filter(|item| predicate(item)))
}

fn exactly_one<T>(mut iter: impl Iterator<Item = T>) -> Result<Option<T>> {
    let found = iter.next();
    if found.is_some() && iter.next().is_some() {
        return Err(Error::MultipleMatches);
    }
    Ok(found)
}

pub fn element_at<T>(items: Vec<T>, index: usize) -> Result<T> {
    let len = items.len();
    element_at_or_default(items, index).ok_or_else(|| {
        Error::InvalidArgument(format!(
            "index {index} is out of range for a sequence of {len} elements"
        ))
    })
}

pub fn element_at_or_default<T>(items: Vec<T>, index: usize) -> Option<T> {
    items.into_iter().nth(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_distinguishes_none_one_many() {
        assert_eq!(single(vec![5]).unwrap(), 5);
        assert!(matches!(single(Vec::<i32>::new()), Err(Error::EmptySequence)));
        assert!(matches!(single(vec![1, 2]), Err(Error::MultipleMatches)));
        assert_eq!(single_or_default(Vec::<i32>::new()).unwrap(), None);
        assert!(matches!(single_or_default(vec![1, 2]), Err(Error::MultipleMatches)));
    }

    #[test]
    fn single_where_counts_only_matches() {
        let xs = vec![1, 2, 3, 4];
        assert_eq!(single_where(xs.clone(), |x| *x > 3).unwrap(), 4);
        assert!(matches!(
            single_where(xs.clone(), |x| *x > 2),
            Err(Error::MultipleMatches)
        ));
        assert!(matches!(
            single_where(xs.clone(), |x| *x > 9),
            Err(Error::EmptySequence)
        ));
        assert_eq!(single_or_default_where(xs, |x| *x > 9).unwrap(), None);
    }

    #[test]
    fn first_and_last() {
        let xs = vec!["a", "bb", "c", "dd"];
        assert_eq!(first(xs.clone()).unwrap(), "a");
        assert_eq!(last(xs.clone()).unwrap(), "dd");
        assert_eq!(first_where(xs.clone(), |s| s.len() == 2).unwrap(), "bb");
        assert_eq!(last_where(xs.clone(), |s| s.len() == 1).unwrap(), "c");
        assert_eq!(first_or_default_where(xs.clone(), |s| s.is_empty()), None);
        assert_eq!(last_or_default(Vec::<u8>::new()), None);
        assert!(matches!(
            last_where(xs, |s| s.len() > 5),
            Err(Error::EmptySequence)
        ));
    }

    #[test]
    fn last_where_tests_every_element() {
        let mut seen = 0;
        let found = last_or_default_where(vec![1, 2, 3], |x| {
            seen += 1;
            *x < 3
        });
        assert_eq!(found, Some(2));
        assert_eq!(seen, 3);
    }

    #[test]
    fn element_at_out_of_range() {
        assert_eq!(element_at(vec![10, 20, 30], 1).unwrap(), 20);
        assert!(matches!(element_at(vec![10], 1), Err(Error::InvalidArgument(_))));
        assert_eq!(element_at_or_default(vec![10], 3), None);
    }
}
