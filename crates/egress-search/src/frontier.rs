//! Min-priority frontier with deterministic tie-breaking.
//!
//! Entries are ordered by `(priority, seq)` where `seq` is a per-frontier
//! insertion counter, so equal priorities pop in insertion order.  The same
//! vertex may be queued several times with different priorities; the engines
//! discard the stale copies when they pop a vertex that is already settled.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use egress_core::VertexId;

#[derive(Copy, Clone, Debug)]
struct Entry {
    priority: f64,
    seq: u64,
    vertex: VertexId,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Binary-heap frontier keyed by `(priority, insertion sequence)`.
#[derive(Debug, Default)]
pub struct Frontier {
    // Reverse makes BinaryHeap (max) behave as a min-heap.
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, vertex: VertexId, priority: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { priority, seq, vertex }));
    }

    /// Remove the entry with the lowest priority (earliest inserted on ties).
    pub fn pop(&mut self) -> Option<(VertexId, f64)> {
        self.heap.pop().map(|Reverse(e)| (e.vertex, e.priority))
    }

    /// The entry [`pop`](Frontier::pop) would return next, without removing it.
    pub fn peek(&self) -> Option<(VertexId, f64)> {
        self.heap.peek().map(|Reverse(e)| (e.vertex, e.priority))
    }

    /// Number of queued entries, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Queued vertices in arbitrary order, stale entries and duplicates
    /// included.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.heap.iter().map(|Reverse(e)| e.vertex)
    }
}
