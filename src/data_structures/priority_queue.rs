use std::cmp::min;
use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::derank::derank;

/// Popping from an empty [`PriorityQueue`].
///
/// Searches guard every pop with an emptiness check, so seeing this error means
/// the caller broke that contract.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
#[error("Tried to pop from an empty priority queue")]
pub struct EmptyQueueError;

/// The ranking of a queue entry.
///
/// Lower priorities go first, ties are broken by insertion order so runs are
/// reproducible.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct QueueRank<P: Ord> {
    priority: P,
    sequence: u64,
}

#[derive(Debug)]
struct QueueEntry<T, P: Ord> {
    rank: QueueRank<P>,
    item: T,
}

impl<T, P: Ord> PartialEq for QueueEntry<T, P> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.rank.eq(&other.rank)
    }
}
impl<T, P: Ord> Eq for QueueEntry<T, P> {}
impl<T, P: Ord> PartialOrd for QueueEntry<T, P> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<T, P: Ord> Ord for QueueEntry<T, P> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank.cmp(&other.rank)
    }
}

const HEAP_ARITY: usize = 4usize;
#[inline(always)]
#[must_use]
fn up(i: usize) -> usize {
    crate::heap_primitives::index_parent::<HEAP_ARITY>(i)
}
#[inline(always)]
#[must_use]
fn down_left(i: usize) -> usize {
    crate::heap_primitives::index_first_child::<HEAP_ARITY>(i)
}
#[inline(always)]
#[must_use]
fn down_right(i: usize) -> usize {
    crate::heap_primitives::index_last_child::<HEAP_ARITY>(i)
}

/// A min-priority queue with decrease-key.
///
/// A d-ary heap of `(rank, item)` entries plus a map from each queued item to
/// its current heap index, so re-ranking an item finds its entry without a
/// linear search and restores the heap order in `O(log n)`.
///
/// ```
/// use world_search::data_structures::priority_queue::PriorityQueue;
///
/// let mut q = PriorityQueue::<&str, u32>::new();
/// q.push("far", 10);
/// q.push("near", 3);
/// q.update("far", 1);
/// assert_eq!(q.pop_min(), Ok("far"));
/// assert_eq!(q.pop_min(), Ok("near"));
/// assert!(q.pop_min().is_err());
/// ```
#[derive(Debug)]
pub struct PriorityQueue<T, P>
where
    T: Hash + Eq + Clone,
    P: Ord + Copy,
{
    heap: Vec<QueueEntry<T, P>>,
    /// Where each queued item lives in `heap`.
    ///
    /// ```pseudocode
    /// for (i, e) in self.heap.enumerate():
    ///   assert_eq(self.positions[e.item], i)
    /// ```
    positions: FxHashMap<T, usize>,
    next_sequence: u64,
}

impl<T, P> PriorityQueue<T, P>
where
    T: Hash + Eq + Clone,
    P: Ord + Copy,
{
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            positions: FxHashMap::default(),
            next_sequence: 0,
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.heap.len()
    }
    #[inline(always)]
    pub fn contains(&self, item: &T) -> bool {
        self.positions.contains_key(item)
    }

    /// The current priority of a queued item.
    pub fn priority(&self, item: &T) -> Option<P> {
        self.positions
            .get(item)
            .map(|&i| self.heap[i].rank.priority)
    }

    /// The best item and its priority, without removing it.
    pub fn peek(&self) -> Option<(&T, P)> {
        self.heap.first().map(|e| (&e.item, e.rank.priority))
    }

    /// Inserts a new item.
    ///
    /// Pushing an item that is already queued re-ranks it instead, exactly like
    /// [`PriorityQueue::update`].
    pub fn push(&mut self, item: T, priority: P) {
        if self.contains(&item) {
            self.update(item, priority);
            return;
        }
        self.verify_heap();

        let heap_index = self.heap.len(); // Future heap_index
        let rank = QueueRank {
            priority,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;

        self.positions.insert(item.clone(), heap_index);
        self.heap.push(QueueEntry { rank, item });
        self._unsafe_sift_up(heap_index);

        self.verify_heap();
    }

    /// Sets the priority of an item, inserting it if it's not queued.
    ///
    /// Returns whether the item was already queued. Lowering the priority
    /// sifts the entry up, raising it sifts the entry down. The entry keeps
    /// its original insertion order for tie-breaking.
    pub fn update(&mut self, item: T, priority: P) -> bool {
        let Some(&heap_index) = self.positions.get(&item) else {
            self.push(item, priority);
            return false;
        };

        let old = self.heap[heap_index].rank.priority;
        self.heap[heap_index].rank.priority = priority;
        if priority < old {
            self._unsafe_sift_up(heap_index);
        } else if priority > old {
            self._unsafe_sift_down(heap_index);
        }

        self.verify_heap();
        true
    }

    /// Removes and returns the item with the smallest priority.
    pub fn pop_min(&mut self) -> Result<T, EmptyQueueError> {
        self.pop_min_with_priority().map(|(item, _)| item)
    }

    /// Removes and returns the item with the smallest priority, along with its
    /// priority.
    pub fn pop_min_with_priority(&mut self) -> Result<(T, P), EmptyQueueError> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("Pop");

        self.verify_heap();

        let entry = match self.heap.len() {
            0 => return Err(EmptyQueueError),
            1 => self.heap.pop().ok_or(EmptyQueueError)?,
            _ => self._unsafe_pop_non_trivial_heap(),
        };
        self.positions.remove(&entry.item);

        self.verify_heap();
        Ok((entry.item, entry.rank.priority))
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    pub(crate) fn verify_heap(&self) {
        // All good... (hopefully)
    }

    #[inline(always)]
    #[cfg(feature = "verify")]
    pub(crate) fn verify_heap(&self) {
        assert_eq!(self.heap.len(), self.positions.len());
        // Every entry,
        for i in 0..self.heap.len() {
            // - Has the right index recorded.
            assert_eq!(self.positions.get(&self.heap[i].item), Some(&i));

            // - Goes after its parent entry, if any.
            if i == 0 {
                continue;
            }
            let p = up(i);
            assert!(
                self.heap[p] <= self.heap[i],
                "Entry[{p}] !<= child [{i}]. Out of heap of len={}",
                self.heap.len(),
            );
        }
    }

    // Implementation details

    /// Records the current heap index of the entry at `i`.
    #[inline(always)]
    fn reindex(&mut self, i: usize) {
        if let Some(p) = self.positions.get_mut(&self.heap[i].item) {
            *p = i;
        }
    }

    /// Pops the top entry from a heap with at least 2 entries.
    ///
    /// Works by unfairly sifting down the top entry to the last level, where it
    /// can be swapped with the very last entry of the array and popped.
    /// Temporarily breaks invariants around the entry sifting down unfairly.
    fn _unsafe_pop_non_trivial_heap(&mut self) -> QueueEntry<T, P> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("PopNonTrivial");

        let len = self.heap.len();
        debug_assert!(len >= 2, "It doesn't get easier. Why are you calling this?");
        let last = len - 1;

        // 1. Pretend there's a hole at the root, and bubble the best children up
        //    till the hole reaches the bottom.
        // 2. If the hole is not the last entry, swap it for the last one.
        // 3. Now the last entry is the one that was at the top, pop it.
        let mut hole = 0;
        loop {
            let child = down_left(hole);
            if child >= len {
                break;
            }
            debug_assert_eq!(child + HEAP_ARITY, down_right(hole) + 1);
            let best = child + derank(&self.heap[child..min(child + HEAP_ARITY, len)]);

            self._unsafe_half_swap_down(hole, best);
            hole = best;
        }
        // NOTE: So far the hole made it to the last level, but it may not be at
        // the end of the array.
        debug_assert!(hole <= last, "The hole={hole} is past last={last}");
        if hole != last {
            self._unsafe_half_swap_down(hole, last);
            self._unsafe_sift_up(hole);
        }

        self.heap.swap_remove(last)
    }

    /// Raises an entry.
    /// Returns its new index.
    #[inline(always)]
    fn _unsafe_sift_up(&mut self, index: usize) -> usize {
        debug_assert!(
            index < self.heap.len(),
            "Entry is way out of sync. Index out of bounds..."
        );

        let mut pos = index;
        while pos != 0 {
            let parent = up(pos);
            if self.heap[parent] <= self.heap[pos] {
                break;
            }
            self._unsafe_swap(parent, pos);
            pos = parent;
        }
        pos
    }

    /// Lowers an entry.
    /// Returns its new index.
    #[inline(always)]
    fn _unsafe_sift_down(&mut self, mut index: usize) -> usize {
        let len = self.heap.len();
        debug_assert!(
            index < len,
            "Entry is way out of sync. Index out of bounds..."
        );

        loop {
            // Find the best child
            let mut child = down_left(index);
            if child >= len {
                break;
            }
            child += derank(&self.heap[child..min(child + HEAP_ARITY, len)]);

            if self.heap[index] <= self.heap[child] {
                break;
            }

            self._unsafe_swap(index, child);
            index = child;
        }
        index
    }

    // Swapping primitives
    /// Swaps two entries in the heap.
    ///
    /// For consistency in calling code `l < r` is checked.
    ///
    /// Keeps the recorded positions in sync.
    #[inline(always)]
    fn _unsafe_swap(&mut self, l: usize, r: usize) {
        debug_assert!(l < r, "Swap({l}, {r}) uses wrong argument order");

        self.heap.swap(l, r);
        self.reindex(l);
        self.reindex(r);
        debug_assert!(
            self.heap[l] <= self.heap[r],
            "Swaps must locally restore the heap invariant."
        );
    }
    /// Swaps two entries in the heap.
    ///
    /// Only keeps the position of the entry going up in sync as the entry going
    /// down is removed shortly after.
    #[inline(always)]
    fn _unsafe_half_swap_down(&mut self, l: usize, r: usize) {
        debug_assert!(l < r, "HalfSwapDown({l}, {r}) is wrong");

        self.heap.swap(l, r);
        self.reindex(l);
    }
}

impl<T, P> Default for PriorityQueue<T, P>
where
    T: Hash + Eq + Clone,
    P: Ord + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::Rng;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    #[test]
    fn pop_empty_fails() {
        let mut q = PriorityQueue::<u32, u32>::new();
        assert!(q.is_empty());
        assert_eq!(q.pop_min(), Err(EmptyQueueError));
    }

    #[test]
    fn queue_sorts() {
        let mut q = PriorityQueue::<&str, u8>::new();
        for (name, p) in [("c", 3), ("e", 5), ("f", 6), ("a", 1), ("d", 4), ("b", 2)] {
            q.push(name, p);
        }
        assert_eq!(q.len(), 6);
        assert_eq!(q.peek(), Some((&"a", 1)));

        let order: Vec<&str> = std::iter::from_fn(|| q.pop_min().ok()).collect();
        assert_eq!(order, vec!["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn ties_follow_insertion_order() {
        let mut q = PriorityQueue::<char, u8>::new();
        for ch in ['x', 'a', 'm', 'b'] {
            q.push(ch, 7);
        }
        q.push('z', 1);

        let order: Vec<char> = std::iter::from_fn(|| q.pop_min().ok()).collect();
        assert_eq!(order, vec!['z', 'x', 'a', 'm', 'b']);
    }

    #[test]
    fn update_decreases_and_increases() {
        let mut q = PriorityQueue::<u32, u32>::new();
        for i in 0..20 {
            q.push(i, 100 + i);
        }

        assert!(q.update(15, 1));
        assert_eq!(q.priority(&15), Some(1));
        assert!(q.update(0, 500));
        assert!(!q.update(99, 50));
        assert!(q.contains(&99));

        assert_eq!(q.pop_min_with_priority(), Ok((15, 1)));
        assert_eq!(q.pop_min_with_priority(), Ok((99, 50)));
        assert_eq!(q.pop_min_with_priority(), Ok((1, 101)));

        let rest: Vec<u32> = std::iter::from_fn(|| q.pop_min().ok()).collect();
        assert_eq!(rest.last(), Some(&0));
        assert!(!q.contains(&0));
    }

    #[test]
    fn push_on_queued_item_reranks() {
        let mut q = PriorityQueue::<&str, i32>::new();
        q.push("a", 5);
        q.push("b", 3);
        q.push("a", 1);
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop_min(), Ok("a"));
    }

    #[test]
    fn random_operations_match_sorting() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut q = PriorityQueue::<u32, u32>::new();
        let mut expected = FxHashMap::<u32, u32>::default();

        for _ in 0..2_000 {
            let item = rng.random_range(0..300u32);
            let priority = rng.random_range(0..1_000u32);
            q.update(item, priority);
            expected.insert(item, priority);

            if rng.random_bool(0.2) {
                let (item, priority) = q.pop_min_with_priority().unwrap();
                let best = expected.values().min().copied().unwrap();
                assert_eq!(priority, best);
                assert_eq!(expected.remove(&item), Some(priority));
            }
        }

        let mut last = 0;
        while let Ok((item, priority)) = q.pop_min_with_priority() {
            assert!(last <= priority);
            assert_eq!(expected.remove(&item), Some(priority));
            last = priority;
        }
        assert!(expected.is_empty());
    }
}
