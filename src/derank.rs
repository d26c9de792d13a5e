// Arg-min over the children of a heap node.
//
// Siblings are contiguous in the heap array, so finding the best child is an
// arg-min over a short slice. Small slices run a tournament (pairs fight, then
// winners fight) which keeps comparisons independent of each other.

/// Core comparison and index selection. Ties go to the left.
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

/// Finds the index of the smallest element, preferring the left-most one.
///
/// ```
/// use world_search::derank::derank;
/// assert_eq!(derank(&[3]), 0);
/// assert_eq!(derank(&[3, 1]), 1);
/// assert_eq!(derank(&[2, 1, 1]), 1);
/// assert_eq!(derank(&[4, 3, 2, 1]), 3);
/// assert_eq!(derank(&[5, 4, 0, 3, 0, 9]), 2);
/// ```
#[inline(always)]
#[must_use]
pub fn derank<T: PartialOrd>(a: &[T]) -> usize {
    debug_assert!(!a.is_empty(), "Can't rank an empty slice");
    match a.len() {
        1 => 0usize,
        2 => fight(a, 0, 1),
        3 => derank_3(a),
        4 => derank_4(a),
        _ => linear_min_index(a),
    }
}

#[must_use]
pub fn linear_min_index<T: PartialOrd>(xs: &[T]) -> usize {
    let mut min_i = 0;
    for (i, x) in xs.iter().enumerate().skip(1) {
        if *x < xs[min_i] {
            min_i = i;
        }
    }
    min_i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tournament_matches_linear_scan() {
        let samples: [&[u8]; 6] = [
            &[1, 2, 3, 4],
            &[4, 3, 2, 1],
            &[2, 1, 2, 1],
            &[7, 7, 7],
            &[9, 0],
            &[5, 5, 1, 1, 0, 0, 2],
        ];
        for s in samples {
            assert_eq!(derank(s), linear_min_index(s), "{s:?}");
        }
    }
}
