use std::collections::BTreeMap;

/// Groups `items` by `key` and folds every group into an accumulator.
///
/// Groups come back ordered by key, which keeps chart slices and selector
/// options stable from one call to the next.
pub fn group_reduce<'a, T, K, A, KeyFn, InitFn, FoldFn>(
    items: impl IntoIterator<Item = &'a T>,
    key: KeyFn,
    init: InitFn,
    mut fold: FoldFn,
) -> BTreeMap<K, A>
where
    T: 'a,
    K: Ord,
    KeyFn: Fn(&T) -> K,
    InitFn: Fn() -> A,
    FoldFn: FnMut(&mut A, &T),
{
    let mut groups = BTreeMap::new();
    for item in items {
        let acc = groups.entry(key(item)).or_insert_with(&init);
        fold(acc, item);
    }
    groups
}

pub fn sum_by<'a, T, K>(
    items: impl IntoIterator<Item = &'a T>,
    key: impl Fn(&T) -> K,
    value: impl Fn(&T) -> u64,
) -> BTreeMap<K, u64>
where
    T: 'a,
    K: Ord,
{
    group_reduce(items, key, || 0u64, |acc, item| *acc += value(item))
}

pub fn count_by<'a, T, K>(items: impl IntoIterator<Item = &'a T>, key: impl Fn(&T) -> K) -> BTreeMap<K, u64>
where
    T: 'a,
    K: Ord,
{
    sum_by(items, key, |_| 1)
}
