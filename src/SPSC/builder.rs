use super::{Receiver, Sender};
use crate::error::ChannelBuildError;
use crate::SPSC::Buffer::RingBuffer;
use std::sync::Arc;

/// Capacity of the worker-to-worker channel.
pub const DEFAULT_CAPACITY: usize = 10;

pub struct ChannelBuilder {
    capacity: usize,
}

impl Default for ChannelBuilder {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl ChannelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Creates the channel and splits it into its two ends.
    ///
    /// Neither end can be cloned, so there is exactly one sender and one receiver.
    pub fn build<T: Send>(self) -> Result<(Sender<T>, Receiver<T>), ChannelBuildError> {
        let buffer = RingBuffer::new(self.capacity).ok_or(ChannelBuildError::ZeroCapacity)?;
        let buffer = Arc::new(buffer);

        tracing::debug!(capacity = self.capacity, "channel created");

        Ok((Sender::new(Arc::clone(&buffer)), Receiver::new(buffer)))
    }
}
