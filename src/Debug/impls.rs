use super::StructDebug;
use crate::Harness::console::{CaptureBuffer, ConsoleSink};
use crate::Harness::coordinator::Coordinator;
use crate::Harness::counters::{CounterReader, CounterWriter};
use crate::SPSC::Buffer::RingBuffer;
use crate::SPSC::{ChannelBuilder, ChannelProbe, Receiver, Sender};
use std::fmt;

// Debug proxy implementations that call the standalone debug functions
impl<T> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        StructDebug::debug_ring_buffer(self, f)
    }
}

impl<T> fmt::Debug for Sender<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        StructDebug::debug_channel_end("Sender", &*self.buffer, f)
    }
}

impl<T> fmt::Debug for Receiver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        StructDebug::debug_channel_end("Receiver", &*self.buffer, f)
    }
}

impl<T> fmt::Debug for ChannelProbe<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        StructDebug::debug_channel_end("ChannelProbe", &*self.buffer, f)
    }
}

impl fmt::Debug for ChannelBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelBuilder")
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl fmt::Debug for ConsoleSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        StructDebug::debug_console_sink(self, f)
    }
}

impl fmt::Debug for CaptureBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureBuffer")
            .field("len", &self.contents().len())
            .finish()
    }
}

impl fmt::Debug for CounterWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        StructDebug::debug_counter_writer(self, f)
    }
}

impl fmt::Debug for CounterReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        StructDebug::debug_counter_reader(self, f)
    }
}

impl fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coordinator")
            .field("config", self.config())
            .finish_non_exhaustive()
    }
}
