/// Rearranges `items` into the next lexicographically greater permutation.
///
/// Returns `false` once `items` was the last (descending) permutation, after
/// resetting it to ascending order. Equal elements are permuted only once.
pub fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    let n = items.len();
    if n < 2 {
        return false;
    }

    let mut i = n - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }
    if i == 0 {
        items.reverse();
        return false;
    }

    let pivot = i - 1;
    let mut j = n - 1;
    while items[j] <= items[pivot] {
        j -= 1;
    }
    items.swap(pivot, j);
    items[i..].reverse();
    true
}
