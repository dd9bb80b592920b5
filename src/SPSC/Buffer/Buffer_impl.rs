use crossbeam_utils::CachePadded;
use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::Ordering::{AcqRel, Acquire, Relaxed, Release};
use std::sync::atomic::{AtomicU32, AtomicU64};
use std::time::Duration;

use super::Buffer::{RingBuffer, Slot};
use crate::Core::futex;

// Free and published markers never collide, even when one slot serves
// consecutive positions (capacity 1).
#[inline]
const fn free_marker(position: u64) -> u64 {
    position * 2
}

#[inline]
const fn published_marker(position: u64) -> u64 {
    position * 2 + 1
}

impl<T> RingBuffer<T> {
    /// Create a ring buffer with `capacity` slots.
    ///
    /// Slot k starts free for position k. Returns `None` for a zero capacity.
    pub fn new(capacity: usize) -> Option<Self> {
        if capacity == 0 {
            return None;
        }

        let slots = (0..capacity)
            .map(|k| Slot {
                sequence: AtomicU64::new(free_marker(k as u64)),
                value: UnsafeCell::new(MaybeUninit::uninit()),
            })
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Some(Self {
            slots,
            capacity,
            head: CachePadded::new(AtomicU64::new(0)),
            tail: CachePadded::new(AtomicU64::new(0)),
            data_signal: CachePadded::new(AtomicU32::new(0)),
            space_signal: CachePadded::new(AtomicU32::new(0)),
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    fn slot(&self, position: u64) -> &Slot<T> {
        &self.slots[(position % self.capacity as u64) as usize]
    }

    /// Number of messages currently held.
    ///
    /// Approximate under concurrent use: the two cursors are read one after
    /// the other. The result is always clamped to `0..=capacity`.
    pub fn len(&self) -> usize {
        let head = self.head.load(Acquire);
        let tail = self.tail.load(Acquire);
        (tail.saturating_sub(head) as usize).min(self.capacity)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Enqueue reserves a slot and publishes the value.
    /// Gives the value back if the ring is full.
    pub fn enqueue(&self, value: T) -> Result<(), T> {
        loop {
            let tail = self.tail.load(Relaxed);
            let slot = self.slot(tail);
            let seq = slot.sequence.load(Acquire);
            let dif = seq as i64 - free_marker(tail) as i64;

            if dif == 0 {
                if self
                    .tail
                    .compare_exchange_weak(tail, tail + 1, AcqRel, Relaxed)
                    .is_ok()
                {
                    // We own this slot now
                    unsafe {
                        (*slot.value.get()).write(value);
                    }

                    // Publish
                    slot.sequence.store(published_marker(tail), Release);
                    return Ok(());
                }
                continue;
            } else if dif < 0 {
                // full
                return Err(value);
            } else {
                // tail moved under us; retry
                std::hint::spin_loop();
                continue;
            }
        }
    }

    /// Dequeue acquires a ready slot and moves its value out.
    /// Returns None if the ring appears empty.
    pub fn dequeue(&self) -> Option<T> {
        loop {
            let head = self.head.load(Relaxed);
            let slot = self.slot(head);
            let seq = slot.sequence.load(Acquire);
            let dif = seq as i64 - published_marker(head) as i64;

            if dif == 0 {
                if self
                    .head
                    .compare_exchange_weak(head, head + 1, AcqRel, Relaxed)
                    .is_ok()
                {
                    let value = unsafe { (*slot.value.get()).assume_init_read() };

                    // free slot for future producers
                    slot.sequence.store(free_marker(head + self.capacity as u64), Release);
                    return Some(value);
                }
                continue;
            } else if dif < 0 {
                // empty
                return None;
            } else {
                // head moved under us; retry
                std::hint::spin_loop();
                continue;
            }
        }
    }

    /// Current value of the data signal word. Read before re-checking the ring.
    #[inline]
    pub fn data_epoch(&self) -> u32 {
        self.data_signal.load(Acquire)
    }

    /// Current value of the space signal word. Read before re-checking the ring.
    #[inline]
    pub fn space_epoch(&self) -> u32 {
        self.space_signal.load(Acquire)
    }

    /// Signal consumers that new data is available
    pub fn signal_consumer(&self) {
        self.data_signal.fetch_add(1, Release);
        futex::futex_wake(&self.data_signal);
    }

    /// Signal producers that a slot was freed
    pub fn signal_producer(&self) {
        self.space_signal.fetch_add(1, Release);
        futex::futex_wake(&self.space_signal);
    }

    /// Wait until data is signalled after `epoch`, at most `timeout`.
    pub fn wait_for_data(&self, epoch: u32, timeout: Duration) {
        futex::futex_wait(&self.data_signal, epoch, timeout);
    }

    /// Wait until space is signalled after `epoch`, at most `timeout`.
    pub fn wait_for_space(&self, epoch: u32, timeout: Duration) {
        futex::futex_wait(&self.space_signal, epoch, timeout);
    }
}

impl<T> Drop for RingBuffer<T> {
    fn drop(&mut self) {
        // Values still in flight are dropped with the buffer.
        while self.dequeue().is_some() {}
    }
}
