//! Ordered, bounded hand-off between the producer and the output thread.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use crate::pool::PendingBlock;

/// A FIFO of pending blocks with blocking push and pop.
///
/// Insertion order is consumption order, regardless of when the
/// underlying tasks resolve; this is what turns unordered worker
/// completion back into wire order. The bound throttles the producer:
/// `push` blocks while the queue sits at the bound and resumes once the
/// consumer drains below it. Work is only ever delayed, never dropped
/// or reordered.
#[derive(Debug)]
pub struct BlockQueue {
    blocks: Mutex<VecDeque<PendingBlock>>,
    not_empty: Condvar,
    below_bound: Condvar,
    bound: usize,
}

impl BlockQueue {
    /// Construct a queue admitting at most `bound` outstanding blocks
    /// (at least one).
    pub fn new(bound: usize) -> Self {
        Self {
            blocks: Mutex::new(VecDeque::new()),
            not_empty: Condvar::new(),
            below_bound: Condvar::new(),
            bound: bound.max(1),
        }
    }

    /// Append a block, blocking while the queue is at its bound.
    pub fn push(&self, block: PendingBlock) {
        let mut blocks = self.lock();
        while blocks.len() >= self.bound {
            blocks = self
                .below_bound
                .wait(blocks)
                .unwrap_or_else(PoisonError::into_inner);
        }
        blocks.push_back(block);
        self.not_empty.notify_one();
    }

    /// Remove the oldest block, blocking while the queue is empty.
    pub fn pop(&self) -> PendingBlock {
        let mut blocks = self.lock();
        loop {
            if let Some(block) = blocks.pop_front() {
                self.below_bound.notify_one();
                return block;
            }
            blocks = self
                .not_empty
                .wait(blocks)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Number of blocks currently queued.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// `true` when no blocks are queued.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<PendingBlock>> {
        self.blocks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
