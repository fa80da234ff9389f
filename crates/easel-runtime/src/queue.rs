#![forbid(unsafe_code)]

//! Multi-producer/single-consumer operation queue with a coalesced wake.
//!
//! The notification is kept separate from the data transfer: operations
//! accumulate in a mutex-guarded buffer, while an mpsc channel carries at
//! most one pending [`Signal::Wake`] (later pushes piggyback on it). Every
//! successful push eventually causes at least one wake, but a single drain
//! may collect zero, one, or many operations.
//!
//! The same channel carries the loop's [`Signal::Stop`], so a consumer can
//! block on one receiver for both.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

use crate::op::Op;

/// What woke the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// New operations may be waiting in the queue.
    Wake,
    /// The loop must release its surface and terminate.
    Stop,
}

/// Thread-safe buffer of pending operations.
pub struct OpQueue {
    buf: Mutex<Vec<Op>>,
    wake_pending: AtomicBool,
    signal: Sender<Signal>,
}

impl OpQueue {
    /// Creates the queue and the signal receiver for its single consumer.
    pub fn new() -> (Self, Receiver<Signal>) {
        let (signal, rx) = mpsc::channel();
        let queue = OpQueue {
            buf: Mutex::new(Vec::new()),
            wake_pending: AtomicBool::new(false),
            signal,
        };
        (queue, rx)
    }

    /// Appends an operation and emits a wake unless one is already pending.
    /// Never blocks beyond the O(1) append critical section.
    pub fn push(&self, op: Op) {
        self.buf.lock().expect("op queue lock poisoned").push(op);
        if !self.wake_pending.swap(true, Ordering::AcqRel) {
            // Send fails only after the consumer is gone; the op is then
            // part of the accepted shutdown race and stays undrained.
            let _ = self.signal.send(Signal::Wake);
        }
    }

    /// Atomically takes the whole buffer in push order. Clearing the wake
    /// flag first guarantees a push racing with this drain re-signals.
    pub fn drain(&self) -> Vec<Op> {
        self.wake_pending.store(false, Ordering::Release);
        std::mem::take(&mut *self.buf.lock().expect("op queue lock poisoned"))
    }

    /// A sender for injecting loop-level signals (stop) into the same
    /// channel the wakes travel on.
    pub(crate) fn signal_sender(&self) -> Sender<Signal> {
        self.signal.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn push_signals_once_until_drained() {
        let (queue, rx) = OpQueue::new();
        queue.push(Op::Refresh);
        queue.push(Op::Reset);
        queue.push(Op::Refresh);

        assert_eq!(rx.recv_timeout(Duration::from_secs(1)).unwrap(), Signal::Wake);
        // Coalesced: the other two pushes did not queue further wakes.
        assert!(rx.try_recv().is_err());

        let ops = queue.drain();
        assert_eq!(ops, vec![Op::Refresh, Op::Reset, Op::Refresh]);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn push_after_drain_signals_again() {
        let (queue, rx) = OpQueue::new();
        queue.push(Op::Reset);
        rx.recv_timeout(Duration::from_secs(1)).unwrap();
        queue.drain();

        queue.push(Op::Refresh);
        assert_eq!(rx.recv_timeout(Duration::from_secs(1)).unwrap(), Signal::Wake);
        assert_eq!(queue.drain(), vec![Op::Refresh]);
    }

    #[test]
    fn concurrent_producers_are_observed_exactly_once_in_order() {
        const PRODUCERS: usize = 4;
        const PER_PRODUCER: usize = 100;

        let (queue, rx) = OpQueue::new();
        let queue = Arc::new(queue);

        let mut handles = Vec::new();
        for producer in 0..PRODUCERS {
            let queue = Arc::clone(&queue);
            handles.push(thread::spawn(move || {
                for seq in 0..PER_PRODUCER {
                    queue.push(Op::AddFigure {
                        x: producer as f64,
                        y: seq as f64,
                    });
                }
            }));
        }

        let mut collected = Vec::new();
        while collected.len() < PRODUCERS * PER_PRODUCER {
            rx.recv_timeout(Duration::from_secs(5)).expect("wake lost");
            collected.extend(queue.drain());
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(queue.drain().is_empty());

        // Exactly once, and each producer's own order is preserved.
        assert_eq!(collected.len(), PRODUCERS * PER_PRODUCER);
        for producer in 0..PRODUCERS {
            let seqs: Vec<f64> = collected
                .iter()
                .filter_map(|op| match op {
                    Op::AddFigure { x, y } if *x == producer as f64 => Some(*y),
                    _ => None,
                })
                .collect();
            let expected: Vec<f64> = (0..PER_PRODUCER).map(|s| s as f64).collect();
            assert_eq!(seqs, expected, "producer {producer}");
        }
    }
}
