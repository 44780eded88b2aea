//! Stable insertion sort for short, fixed-size slices.

/// Sorts a slice in-place by the key produced for each element, using insertion sort.
/// Elements with equal keys keep their original relative order.
pub fn stable_by_key<T, K, F>(items: &mut [T], mut key: F)
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    for i in 1..items.len() {
        let mut j = i;
        // Strict comparison: never moves an element past an equal one.
        while j > 0 && key(&items[j]) < key(&items[j - 1]) {
            items.swap(j, j - 1);
            j -= 1;
        }
    }
}
