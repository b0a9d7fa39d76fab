//! Virtual clock for every fixed delay the navigator uses.
//!
//! Nothing here sleeps. The embedder advances the clock and the navigator handles whatever
//! came due, in due-time order and then in scheduling order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use core_types::{Millis, RequestId};
use html::Id;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timer {
    /// The fade-out before a load has played; resolve content next.
    FadeOutElapsed { request_id: RequestId },
    ClearFadeIn { target: Id },
    /// A natively opened folder gets its open glyph.
    FolderIconOpen { folder: Id },
    /// Bulk collapse reached this folder.
    FolderCloseBegin { folder: Id },
    FolderCloseFinish { folder: Id },
    /// Bulk expand reached this folder.
    FolderExpand { folder: Id },
    /// Scroll a keyboard-selected entry into view.
    RevealEntry { item: Id },
}

#[derive(Debug)]
struct Entry {
    due: Millis,
    seq: u64,
    timer: Timer,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Reversed so the max-heap pops the earliest entry.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.due, other.seq).cmp(&(self.due, self.seq))
    }
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: Millis,
    seq: u64,
    queue: BinaryHeap<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn schedule(&mut self, delay: Millis, timer: Timer) -> Millis {
        let due = self.now.saturating_add(delay);
        self.seq += 1;
        self.queue.push(Entry {
            due,
            seq: self.seq,
            timer,
        });
        due
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.queue.peek().map(|e| e.due)
    }

    /// Pops the earliest timer due at or before `until` and moves the clock to its due time.
    /// Timers scheduled while handling it are seen by the next call.
    pub fn pop_due(&mut self, until: Millis) -> Option<Timer> {
        if self.next_due()? > until {
            return None;
        }
        let entry = self.queue.pop()?;
        self.now = self.now.max(entry.due);
        Some(entry.timer)
    }

    /// Moves the clock forward without firing anything; never moves it back.
    pub fn settle(&mut self, to: Millis) {
        self.now = self.now.max(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icon(n: u32) -> Timer {
        Timer::FolderIconOpen { folder: Id::new(n, 0) }
    }

    #[test]
    fn pops_in_due_order_then_insertion_order() {
        let mut s = Scheduler::new();
        s.schedule(50, icon(1));
        s.schedule(10, icon(2));
        s.schedule(50, icon(3));
        s.schedule(0, icon(4));

        let mut fired = Vec::new();
        while let Some(t) = s.pop_due(100) {
            fired.push((s.now(), t));
        }
        assert_eq!(
            fired,
            vec![(0, icon(4)), (10, icon(2)), (50, icon(1)), (50, icon(3))]
        );
    }

    #[test]
    fn keeps_future_timers_queued() {
        let mut s = Scheduler::new();
        s.schedule(200, icon(1));
        assert_eq!(s.pop_due(199), None);
        s.settle(199);
        assert_eq!(s.now(), 199);
        assert_eq!(s.next_due(), Some(200));
        assert_eq!(s.pop_due(200), Some(icon(1)));
        assert!(s.is_empty());
    }

    #[test]
    fn delays_are_relative_to_current_time() {
        let mut s = Scheduler::new();
        s.settle(1_000);
        assert_eq!(s.schedule(250, icon(1)), 1_250);
        s.settle(10);
        assert_eq!(s.now(), 1_000);
    }
}
