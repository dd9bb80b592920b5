// src/SPSC/consumer.rs

use super::ChannelProbe;
use crate::SPSC::Buffer::RingBuffer;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// The receiving end of the channel.
pub struct Receiver<T> {
    pub(crate) buffer: Arc<RingBuffer<T>>,
}

impl<T> Receiver<T> {
    pub(crate) fn new(buffer: Arc<RingBuffer<T>>) -> Self {
        Self { buffer }
    }

    /// Dequeues from the head if a value is available right now.
    pub fn try_receive(&self) -> Option<T> {
        let value = self.buffer.dequeue()?;
        self.buffer.signal_producer();
        Some(value)
    }

    /// Receives a value from the channel, waiting up to the specified timeout.
    ///
    /// # Returns
    /// * `Some(value)` if a value was dequeued
    /// * `None` if the timeout was reached with the channel empty; the
    ///   channel is left unchanged
    pub fn receive(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now().checked_add(timeout);

        loop {
            let epoch = self.buffer.data_epoch();

            if let Some(value) = self.try_receive() {
                return Some(value);
            }

            let remaining = match deadline {
                Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                None => timeout,
            };
            if remaining.is_zero() {
                return None;
            }

            self.buffer.wait_for_data(epoch, remaining);
        }
    }

    /// Number of messages waiting in the channel.
    ///
    /// This is an approximate read: the sender may be running concurrently.
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
