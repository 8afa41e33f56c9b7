//! Predicate filtering.

pub fn filter<T, P>(items: Vec<T>, mut predicate: P) -> Vec<T>
where
    P: FnMut(&T) -> bool,
{
    items.into_iter().filter(|item| predicate(item)).collect()
}

/// Like `filter`, with the zero-based source position passed alongside.
pub fn filter_indexed<T, P>(items: Vec<T>, mut predicate: P) -> Vec<T>
where
    P: FnMut(&T, usize) -> bool,
{
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| predicate(&item, i).then_some(item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_order_of_survivors() {
        assert_eq!(filter(vec![5, 1, 8, 2, 9], |x| *x > 4), vec![5, 8, 9]);
        assert!(filter(Vec::<i32>::new(), |_| true).is_empty());
    }

    #[test]
    fn indexed_sees_source_positions() {
        let odd_slots = filter_indexed(vec!['a', 'b', 'c', 'd'], |_, i| i % 2 == 1);
        assert_eq!(odd_slots, vec!['b', 'd']);
    }
}
