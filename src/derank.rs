// Arg-min over the children of a heap node.
//
// A small tournament keeps comparisons independent from each other instead of
// folding left-to-right. Ties go to the left, so the result always matches
// `linear_min_index`.

/// Core comparison and index selection
#[inline(always)]
#[must_use]
fn fight<T: PartialOrd>(a: &[T], l: usize, r: usize) -> usize {
    if a[l] <= a[r] { l } else { r }
}

// 0   1   2
// *   *   *
//  \ /    |
//   *     *
//    \   /
//      *
#[inline(always)]
#[must_use]
fn derank_3<T: PartialOrd>(a: &[T]) -> usize {
    debug_assert!(a.len() == 3);
    fight(a, fight(a, 0, 1), 2)
}

// 0   1   2   3
// *   *   *   *
//  \ /     \ /
//   *       *
//    \     /
//       *
#[inline(always)]
#[must_use]
fn derank_4<T: PartialOrd>(a: &[T]) -> usize {
    debug_assert!(a.len() == 4);
    fight(a, fight(a, 0, 1), fight(a, 2, 3))
}

/// Index of the smallest element of a non-empty slice.
#[inline(always)]
#[must_use]
pub fn derank<T: PartialOrd>(a: &[T]) -> usize {
    match a.len() {
        1 => 0usize,
        2 => fight(a, 0, 1),
        3 => derank_3(a),
        4 => derank_4(a),
        _ => linear_min_index(a),
    }
}

pub fn linear_min_index<T: PartialOrd>(xs: &[T]) -> usize {
    assert!(!xs.is_empty());

    let mut min_i = 0;
    for (i, x) in xs.iter().enumerate() {
        if *x < xs[min_i] {
            min_i = i;
        }
    }
    min_i
}
