// In src/SPSC/producer.rs
use crate::error::SendTimeoutError;
use crate::SPSC::Buffer::RingBuffer;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// The sending end of the channel.
pub struct Sender<T> {
    pub(crate) buffer: Arc<RingBuffer<T>>,
}

impl<T> Sender<T> {
    pub(crate) fn new(buffer: Arc<RingBuffer<T>>) -> Self {
        Self { buffer }
    }

    /// Enqueues `value` at the tail, waiting up to `timeout` for a free slot.
    ///
    /// # Returns
    /// * `Ok(())` if the value was enqueued
    /// * `Err(SendTimeoutError)` if the channel stayed full for the whole
    ///   timeout. The value is handed back and the channel is unchanged.
    pub fn send(&self, value: T, timeout: Duration) -> Result<(), SendTimeoutError<T>> {
        let deadline = Instant::now().checked_add(timeout);
        let mut value = value;

        loop {
            let epoch = self.buffer.space_epoch();

            match self.buffer.enqueue(value) {
                Ok(()) => {
                    self.buffer.signal_consumer();
                    return Ok(());
                }
                Err(rejected) => value = rejected,
            }

            let remaining = match deadline {
                Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                None => timeout,
            };
            if remaining.is_zero() {
                return Err(SendTimeoutError(value));
            }

            self.buffer.wait_for_space(epoch, remaining);
        }
    }

    /// Enqueues without waiting.
    pub fn try_send(&self, value: T) -> Result<(), SendTimeoutError<T>> {
        self.send(value, Duration::ZERO)
    }

    /// Number of messages waiting in the channel.
    ///
    /// This is an approximate read: the receiver may be running concurrently.
    pub fn pending_count(&self) -> usize {
        self.buffer.len()
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// A read-only handle for occupancy diagnostics.
    pub fn probe(&self) -> ChannelProbe<T> {
        ChannelProbe {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

/// Read-only view of a channel, for diagnostics.
pub struct ChannelProbe<T> {
    pub(crate) buffer: Arc<RingBuffer<T>>,
}

impl<T> ChannelProbe<T> {
    /// Number of messages waiting in the channel.
    ///
    /// This is an approximate read: sender and receiver may both be running
    /// concurrently, so the value can be stale by the time it is used. It is
    /// always within `0..=capacity`.
    pub fn pending_count(&self) -> usize {
        self.buffer.len()
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }
}

impl<T> Clone for ChannelProbe<T> {
    fn clone(&self) -> Self {
        Self {
            buffer: Arc::clone(&self.buffer),
        }
    }
}
