// Index arithmetic for d-ary heaps stored in a flat array.
//
// Every node ranks no worse than the nodes below it. With arity `A` the
// children of node `i` are `A*i + 1 ..= A*(i + 1)`, so a 4-ary heap is laid
// out as,
//
// ```text
//                       0
//      1           2           3           4
//  5 6 7 8    9 10 11 12  13 14 15 16  17 18 19 20
// 21 ...
// ```
//
// Only the last level is ever incomplete.

/// The parent node
///
/// ```
/// use maze_search::heap_primitives::index_parent;
/// assert_eq!(index_parent::<2>(1), 0);
/// assert_eq!(index_parent::<2>(2), 0);
/// assert_eq!(index_parent::<2>(5), 2);
/// assert_eq!(index_parent::<2>(25), 12);
/// assert_eq!(index_parent::<4>(4), 0);
/// assert_eq!(index_parent::<4>(5), 1);
/// ```
#[inline(always)]
#[must_use]
pub fn index_parent<const A: usize>(i: usize) -> usize {
    debug_assert!(i > 0, "The root has no parent");
    (i - 1) / A
}

/// The first children
///
/// ```
/// use maze_search::heap_primitives::index_first_children;
/// assert_eq!(index_first_children::<2usize>(0), 1);
/// assert_eq!(index_first_children::<2usize>(3), 7);
/// assert_eq!(index_first_children::<4usize>(0), 1);
/// assert_eq!(index_first_children::<4usize>(1), 5);
/// ```
#[inline(always)]
#[must_use]
pub fn index_first_children<const A: usize>(i: usize) -> usize {
    (A * i) + 1
}

/// The last children
///
/// ```
/// use maze_search::heap_primitives::index_last_children;
/// assert_eq!(index_last_children::<2usize>(0), 2);
/// assert_eq!(index_last_children::<2usize>(6), 14);
/// assert_eq!(index_last_children::<4usize>(0), 4);
/// assert_eq!(index_last_children::<4usize>(1), 8);
/// ```
#[inline(always)]
#[must_use]
pub fn index_last_children<const A: usize>(i: usize) -> usize {
    A * (i + 1)
}
