use std::cmp::min;
use std::fmt::Debug;

use crate::derank::derank;

const HEAP_ARITY: usize = 4usize;
#[inline(always)]
#[must_use]
fn up(i: usize) -> usize {
    crate::heap_primitives::index_parent::<HEAP_ARITY>(i)
}
#[inline(always)]
#[must_use]
fn down_left(i: usize) -> usize {
    crate::heap_primitives::index_first_children::<HEAP_ARITY>(i)
}
#[inline(always)]
#[must_use]
fn down_right(i: usize) -> usize {
    crate::heap_primitives::index_last_children::<HEAP_ARITY>(i)
}

/// A min-heap of not yet expanded nodes.
///
/// The smallest element (by `Ord`) pops first. There's no decrease-key, a
/// state reached again through a better path is simply pushed again.
#[derive(Debug)]
pub struct Frontier<N>
where
    N: Debug + Ord,
{
    heap: Vec<N>,
}

impl<N> Default for Frontier<N>
where
    N: Debug + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Frontier<N>
where
    N: Debug + Ord,
{
    pub fn new() -> Self {
        Self { heap: vec![] }
    }
    pub fn with_capacity(s: usize) -> Self {
        Self {
            heap: Vec::with_capacity(s),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn peek(&self) -> Option<&N> {
        self.heap.first()
    }

    #[cfg(feature = "inspect")]
    pub fn as_slice(&self) -> &[N] {
        &self.heap
    }

    pub fn push(&mut self, n: N) {
        self.verify_heap();
        let heap_index = self.heap.len();

        self.heap.push(n);
        self.sift_up(heap_index);

        self.verify_heap();
    }

    pub fn pop(&mut self) -> Option<N> {
        self.verify_heap();

        if self.heap.len() <= 1 {
            return self.heap.pop();
        }

        let n = self.pop_non_trivial_heap();
        self.verify_heap();
        Some(n)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    pub(crate) fn verify_heap(&self) {
        // All good... (hopefully)
    }

    #[inline(always)]
    #[cfg(feature = "verify")]
    pub(crate) fn verify_heap(&self) {
        // Every node goes after its parent node, if any.
        for i in 1..self.heap.len() {
            let p = up(i);
            assert!(
                self.heap[p] <= self.heap[i],
                "Node[{p}]={:?} !<= child [{i}]={:?}. Out of heap of len={}",
                self.heap[p],
                self.heap[i],
                self.heap.len(),
            );
        }
    }

    // Implementation details

    /// Pops the top node from a Heap with at least 2 elements.
    ///
    /// The best child of every level is moved up into the hole left by the
    /// root until the hole reaches the last level. The last element then
    /// fills the hole and sifts up if needed.
    fn pop_non_trivial_heap(&mut self) -> N {
        debug_assert!(
            self.heap.len() > 1,
            "It doesn't get easier. Why are you calling this?"
        );

        // Move the root to the end of the array, it will be popped off at the
        // end. The heap is now everything before `len`.
        let len = self.heap.len() - 1;
        self.heap.swap(0, len);

        // 1. The element now at the root is the old last one. Treat the root
        //    as a hole and bubble the best children up until the hole
        //    reaches the bottom.
        let mut hole = 0;
        loop {
            let child = down_left(hole);
            if child >= len {
                break;
            }
            debug_assert_eq!(child + HEAP_ARITY, down_right(hole) + 1);
            let best = child + derank(&self.heap[child..min(child + HEAP_ARITY, len)]);

            self.heap.swap(hole, best);
            hole = best;
        }

        // 2. The old last element sits at the hole now, which may be too low.
        self.sift_up(hole);

        // 3. Remove the old root.
        let top = self.heap.pop();
        debug_assert!(top.is_some());
        top.unwrap_or_else(|| unreachable!("Popping from a heap with at least 2 elements"))
    }

    /// Raises a node
    /// Returns it's new index
    #[inline(always)]
    fn sift_up(&mut self, index: usize) -> usize {
        let mut pos = index;
        while pos > 0 {
            let parent = up(pos);
            if self.heap[parent] <= self.heap[pos] {
                break;
            }
            self.heap.swap(parent, pos);
            pos = parent;
        }
        pos
    }
}
