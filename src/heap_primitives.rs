// Index arithmetic for implicit d-ary heaps.
//
// A heap is a tree-like structure where every subtree's root has a better rank
// than all the other nodes in the subtree. It lives in an array traversed in a
// non-linear way. With arity `A = 4` the indices look like,
//
// ```text
//                                  0
//          1               2                3                 4
//   5  6  7  8      9 10 11 12      13 14 15 16       17 18 19 20
// ```
//
// The last level will often be incomplete.
//
//   - Up:          `(i-1)/A`
//   - First child: `A*i + 1`
//   - Last child:  `A*(i+1)`

/// The parent node
///
/// ```
/// use world_search::heap_primitives::index_parent;
/// assert_eq!(index_parent::<2>(1), 0);
/// assert_eq!(index_parent::<2>(2), 0);
/// assert_eq!(index_parent::<2>(25), 12);
/// assert_eq!(index_parent::<4>(4), 0);
/// assert_eq!(index_parent::<4>(5), 1);
/// assert_eq!(index_parent::<4>(20), 4);
/// ```
#[inline(always)]
#[must_use]
pub fn index_parent<const A: usize>(i: usize) -> usize {
    debug_assert!(i != 0, "The root has no parent");
    (i - 1) / A
}

/// The first (left-most) child
///
/// ```
/// use world_search::heap_primitives::index_first_child;
/// assert_eq!(index_first_child::<2>(0), 1);
/// assert_eq!(index_first_child::<2>(11), 23);
/// assert_eq!(index_first_child::<4>(0), 1);
/// assert_eq!(index_first_child::<4>(1), 5);
/// assert_eq!(index_first_child::<4>(4), 17);
/// ```
#[inline(always)]
#[must_use]
pub fn index_first_child<const A: usize>(i: usize) -> usize {
    (A * i) + 1
}

/// The last (right-most) child
///
/// ```
/// use world_search::heap_primitives::index_last_child;
/// assert_eq!(index_last_child::<2>(0), 2);
/// assert_eq!(index_last_child::<2>(6), 14);
/// assert_eq!(index_last_child::<4>(0), 4);
/// assert_eq!(index_last_child::<4>(1), 8);
/// assert_eq!(index_last_child::<4>(4), 20);
/// ```
#[inline(always)]
#[must_use]
pub fn index_last_child<const A: usize>(i: usize) -> usize {
    A * (i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_point_back_to_parent() {
        for i in 0..100 {
            for c in index_first_child::<4>(i)..=index_last_child::<4>(i) {
                assert_eq!(index_parent::<4>(c), i);
            }
            for c in index_first_child::<8>(i)..=index_last_child::<8>(i) {
                assert_eq!(index_parent::<8>(c), i);
            }
        }
    }
}
