//! Projection: one-to-one `select` and flattening `select_many`.

pub fn select<T, U, F>(items: Vec<T>, selector: F) -> Vec<U>
where
    F: FnMut(T) -> U,
{
    items.into_iter().map(selector).collect()
}

pub fn select_indexed<T, U, F>(items: Vec<T>, mut selector: F) -> Vec<U>
where
    F: FnMut(T, usize) -> U,
{
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| selector(item, i))
        .collect()
}

pub fn select_many<T, I, F>(items: Vec<T>, selector: F) -> Vec<I::Item>
where
    I: IntoIterator,
    F: FnMut(T) -> I,
{
    items.into_iter().flat_map(selector).collect()
}

pub fn select_many_indexed<T, I, F>(items: Vec<T>, mut selector: F) -> Vec<I::Item>
where
    I: IntoIterator,
    F: FnMut(T, usize) -> I,
{
    items
        .into_iter()
        .enumerate()
        .flat_map(|(i, item)| selector(item, i))
        .collect()
}

/// Flatten through `collection`, then combine each source element with each
/// of its inner elements.
pub fn select_many_with<T, I, R, F, G>(items: Vec<T>, mut collection: F, mut result: G) -> Vec<R>
where
    I: IntoIterator,
    F: FnMut(&T) -> I,
    G: FnMut(&T, I::Item) -> R,
{
    let mut out = Vec::new();
    for item in items {
        for inner in collection(&item) {
            out.push(result(&item, inner));
        }
    }
    out
}

pub fn select_many_indexed_with<T, I, R, F, G>(
    items: Vec<T>,
    mut collection: F,
    mut result: G,
) -> Vec<R>
where
    I: IntoIterator,
    F: FnMut(&T, usize) -> I,
    G: FnMut(&T, I::Item) -> R,
{
    let mut out = Vec::new();
    for (i, item) in items.into_iter().enumerate() {
        for inner in collection(&item, i) {
            out.push(result(&item, inner));
        }
    }
    out
}
