//! Sequence shaping: append/prepend/concat, reversal, empty-sequence
//! defaults and pairing.

pub fn append<T>(mut items: Vec<T>, element: T) -> Vec<T> {
    items.push(element);
    items
}

pub fn prepend<T>(items: Vec<T>, element: T) -> Vec<T> {
    std::iter::once(element).chain(items).collect()
}

pub fn concat<T, I>(mut items: Vec<T>, second: I) -> Vec<T>
where
    I: IntoIterator<Item = T>,
{
    items.extend(second);
    items
}

pub fn reverse<T>(mut items: Vec<T>) -> Vec<T> {
    items.reverse();
    items
}

pub fn default_if_empty<T: Default>(items: Vec<T>) -> Vec<T> {
    default_if_empty_with(items, T::default())
}

pub fn default_if_empty_with<T>(items: Vec<T>, value: T) -> Vec<T> {
    if items.is_empty() {
        vec![value]
    } else {
        items
    }
}

/// Pairs up to the shorter of the two lengths.
pub fn zip<T, U, I>(items: Vec<T>, second: I) -> Vec<(T, U)>
where
    I: IntoIterator<Item = U>,
{
    items.into_iter().zip(second).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ends_and_joins() {
        assert_eq!(append(vec![1, 2], 3), vec![1, 2, 3]);
        assert_eq!(prepend(vec![1, 2], 0), vec![0, 1, 2]);
        assert_eq!(concat(vec![1], [2, 3]), vec![1, 2, 3]);
        assert_eq!(reverse(vec![1, 2, 3]), vec![3, 2, 1]);
    }

    #[test]
    fn defaults_only_when_empty() {
        assert_eq!(default_if_empty(Vec::<i32>::new()), vec![0]);
        assert_eq!(default_if_empty_with(Vec::new(), "none"), vec!["none"]);
        assert_eq!(default_if_empty_with(vec!["x"], "none"), vec!["x"]);
    }

    #[test]
    fn zip_stops_at_shorter() {
        assert_eq!(zip(vec![1, 2, 3], ["a", "b"]), vec![(1, "a"), (2, "b")]);
    }
}
