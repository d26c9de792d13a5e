//! Open lists for the uninformed searches.

use std::collections::VecDeque;

/// The discovered-but-unexpanded nodes, in the order a search expands them.
pub trait Frontier<T>: std::fmt::Debug + Default {
    fn push(&mut self, item: T);
    fn pop(&mut self) -> Option<T>;
    fn len(&self) -> usize;

    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First in, first out. Expands in discovery order.
#[derive(Debug)]
pub struct Fifo<T>(VecDeque<T>);

impl<T> Default for Fifo<T> {
    fn default() -> Self {
        Self(VecDeque::with_capacity(1024))
    }
}

impl<T> Frontier<T> for Fifo<T>
where
    T: std::fmt::Debug,
{
    #[inline(always)]
    fn push(&mut self, item: T) {
        self.0.push_back(item);
    }
    #[inline(always)]
    fn pop(&mut self) -> Option<T> {
        self.0.pop_front()
    }
    #[inline(always)]
    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Last in, first out. Expands the most recent discovery first.
#[derive(Debug)]
pub struct Lifo<T>(Vec<T>);

impl<T> Default for Lifo<T> {
    fn default() -> Self {
        Self(Vec::with_capacity(1024))
    }
}

impl<T> Frontier<T> for Lifo<T>
where
    T: std::fmt::Debug,
{
    #[inline(always)]
    fn push(&mut self, item: T) {
        self.0.push(item);
    }
    #[inline(always)]
    fn pop(&mut self) -> Option<T> {
        self.0.pop()
    }
    #[inline(always)]
    fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<F: Frontier<u8>>(mut f: F) -> Vec<u8> {
        for i in 1..=4 {
            f.push(i);
        }
        assert_eq!(f.len(), 4);
        std::iter::from_fn(|| f.pop()).collect()
    }

    #[test]
    fn fifo_order() {
        assert_eq!(drain(Fifo::default()), vec![1, 2, 3, 4]);
    }

    #[test]
    fn lifo_order() {
        assert_eq!(drain(Lifo::default()), vec![4, 3, 2, 1]);
    }

    #[test]
    fn empty() {
        let mut f = Fifo::<u8>::default();
        assert!(f.is_empty());
        assert_eq!(f.pop(), None);
    }
}
