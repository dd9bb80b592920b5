// This is the bounded ring buffer behind the worker-to-worker channel

use crossbeam_utils::CachePadded;
use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicU32, AtomicU64};

/// A single slot in the ring buffer.
pub struct Slot<T> {
    /// The sequence number of the slot. This is the core of the synchronization.
    /// - A producer at position `tail` waits for the `sequence` in the target
    ///   slot to equal `2 * tail` (free for that position).
    /// - After writing, it sets the `sequence` to `2 * tail + 1`, signaling completion.
    /// - A consumer at position `head` waits for the `sequence` to equal
    ///   `2 * head + 1`, and after reading releases the slot by setting it to
    ///   `2 * (head + capacity)`.
    pub sequence: AtomicU64,

    /// The value, initialized only while the slot holds a published message.
    pub(crate) value: UnsafeCell<MaybeUninit<T>>,
}

/// A fixed-capacity FIFO ring buffer with blocking support.
///
/// ### Concurrency Design:
/// - **Enqueue**: claims a position by advancing `tail`, writes the value and
///   publishes it through the slot `sequence`.
/// - **Dequeue**: claims a position by advancing `head` once the slot at that
///   position is published, moves the value out and frees the slot.
/// - **Blocking**: two signal words count publishes and frees. A waiter reads
///   the word before re-checking the ring and then sleeps on that value, so a
///   signal that lands in between is never lost.
///
/// Capacity does not need to be a power of two.
pub struct RingBuffer<T> {
    pub(crate) slots: Box<[Slot<T>]>,

    /// The capacity of the buffer (number of slots).
    pub(crate) capacity: usize,

    /// Next position to read. Padded to prevent false sharing with `tail`.
    pub(crate) head: CachePadded<AtomicU64>,

    /// Next position to write. Padded to prevent false sharing with `head`.
    pub(crate) tail: CachePadded<AtomicU64>,

    /// Bumped after every enqueue. Consumers wait on this.
    pub(crate) data_signal: CachePadded<AtomicU32>,

    /// Bumped after every dequeue. Producers wait on this.
    pub(crate) space_signal: CachePadded<AtomicU32>,
}

// Slots are only accessed by the thread that won the position, as arbitrated
// by the sequence protocol.
unsafe impl<T: Send> Send for RingBuffer<T> {}
unsafe impl<T: Send> Sync for RingBuffer<T> {}
