/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::debug;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::elevator::{Deferred, Transition};

/***************************************/
/*       Public data structures        */
/***************************************/

/// Identifies the reset generation a transition was scheduled under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    epoch: u64,
}

/// A transition that has come due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Due {
    pub at: u64,
    pub elevator: usize,
    pub transition: Transition,
}

#[derive(Debug, PartialEq, Eq)]
struct Entry {
    due: u64,
    seq: u64,
    token: Token,
    elevator: usize,
    transition: Transition,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/**
 * Queue of delayed, cancellable elevator transitions.
 *
 * Entries come out in due order, and in scheduling order for equal due times.
 * `cancel_all` invalidates every outstanding token at once and empties the
 * queue. An entry holding an invalidated token is never handed out.
 */
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<Entry>>,
    epoch: u64,
    next_seq: u64,
}

/***************************************/
/*             Public API              */
/***************************************/
impl Scheduler {
    pub fn new() -> Scheduler {
        Scheduler::default()
    }

    pub fn schedule(&mut self, now: u64, elevator: usize, deferred: Deferred) -> Token {
        let token = Token { epoch: self.epoch };
        self.next_seq += 1;
        self.queue.push(Reverse(Entry {
            due: now + deferred.delay,
            seq: self.next_seq,
            token,
            elevator,
            transition: deferred.transition,
        }));
        token
    }

    pub fn is_valid(&self, token: Token) -> bool {
        token.epoch == self.epoch
    }

    /// Invalidates every scheduled transition and drains the queue.
    pub fn cancel_all(&mut self) {
        self.epoch += 1;
        debug!(
            "Cancelled {} transition(s) up to epoch {}",
            self.queue.len(),
            self.epoch - 1
        );
        self.queue.clear();
    }

    /// Due time of the earliest live transition.
    pub fn next_deadline(&mut self) -> Option<u64> {
        self.discard_stale();
        self.queue.peek().map(|Reverse(entry)| entry.due)
    }

    /// Removes and returns the earliest live transition due at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<Due> {
        self.discard_stale();
        match self.queue.peek() {
            Some(Reverse(entry)) if entry.due <= now => {}
            _ => return None,
        }
        self.queue.pop().map(|Reverse(entry)| Due {
            at: entry.due,
            elevator: entry.elevator,
            transition: entry.transition,
        })
    }

    #[cfg(test)]
    pub fn len(&mut self) -> usize {
        self.discard_stale();
        let epoch = self.epoch;
        self.queue
            .iter()
            .filter(|Reverse(entry)| entry.token.epoch == epoch)
            .count()
    }

    #[cfg(test)]
    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    /// Entries held in the queue, stale or not.
    #[cfg(test)]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    fn discard_stale(&mut self) {
        loop {
            let stale = match self.queue.peek() {
                Some(Reverse(entry)) => !self.is_valid(entry.token),
                None => false,
            };
            if !stale {
                break;
            }
            if let Some(Reverse(entry)) = self.queue.pop() {
                debug!(
                    "Discarding stale {:?} for elevator index {}",
                    entry.transition, entry.elevator
                );
            }
        }
    }
}
