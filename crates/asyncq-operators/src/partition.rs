//! Positional partitioning: skip/take from either end, and the
//! predicate-driven `while` forms.

pub fn skip<T>(items: Vec<T>, count: usize) -> Vec<T> {
    items.into_iter().skip(count).collect()
}

pub fn take<T>(mut items: Vec<T>, count: usize) -> Vec<T> {
    items.truncate(count);
    items
}

pub fn skip_last<T>(mut items: Vec<T>, count: usize) -> Vec<T> {
    let keep = items.len().saturating_sub(count);
    items.truncate(keep);
    items
}

pub fn take_last<T>(items: Vec<T>, count: usize) -> Vec<T> {
    let drop = items.len().saturating_sub(count);
    skip(items, drop)
}

/// Drop the leading run that satisfies `predicate`; everything after the
/// first failure is kept, matching or not.
pub fn skip_while<T, P>(items: Vec<T>, mut predicate: P) -> Vec<T>
where
    P: FnMut(&T) -> bool,
{
    skip_while_indexed(items, |item, _| predicate(item))
}

pub fn skip_while_indexed<T, P>(items: Vec<T>, mut predicate: P) -> Vec<T>
where
    P: FnMut(&T, usize) -> bool,
{
    let cut = leading_run(&items, &mut predicate);
    skip(items, cut)
}

pub fn take_while<T, P>(items: Vec<T>, mut predicate: P) -> Vec<T>
where
    P: FnMut(&T) -> bool,
{
    take_while_indexed(items, |item, _| predicate(item))
}

pub fn take_while_indexed<T, P>(items: Vec<T>, mut predicate: P) -> Vec<T>
where
    P: FnMut(&T, usize) -> bool,
{
    let cut = leading_run(&items, &mut predicate);
    take(items, cut)
}

fn leading_run<T, P>(items: &[T], predicate: &mut P) -> usize
where
    P: FnMut(&T, usize) -> bool,
{
    items
        .iter()
        .enumerate()
        .position(|(i, item)| !predicate(item, i))
        .unwrap_or(items.len())
}
