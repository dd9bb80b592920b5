use std::fmt;
use crate::Harness::console::ConsoleSink;
use crate::Harness::counters::{CounterReader, CounterWriter};
use crate::SPSC::Buffer::RingBuffer;

/// Debug function for RingBuffer
///
/// Shows capacity and an approximate occupancy without touching slot contents
pub fn debug_ring_buffer<T>(buffer: &RingBuffer<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RingBuffer")
        .field("capacity", &buffer.capacity())
        .field("len", &buffer.len())
        .field("data_epoch", &buffer.data_epoch())
        .field("space_epoch", &buffer.space_epoch())
        .finish_non_exhaustive()
}

/// Debug function for the channel ends and probe
///
/// All three are views over the same RingBuffer
pub fn debug_channel_end<T>(
    name: &str,
    buffer: &RingBuffer<T>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    f.debug_struct(name)
        .field("buffer", &format_args!("{:p}", buffer as *const RingBuffer<T>))
        .field("pending", &buffer.len())
        .field("capacity", &buffer.capacity())
        .finish()
}

/// Debug function for ConsoleSink
///
/// The writer is opaque; only report whether it is currently held
pub fn debug_console_sink(sink: &ConsoleSink, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ConsoleSink")
        .field("out", &"<opaque>")
        .field("locked", &sink.out.is_locked())
        .finish()
}

/// Debug function for CounterWriter
pub fn debug_counter_writer(writer: &CounterWriter, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CounterWriter")
        .field("totals", &writer.totals())
        .finish_non_exhaustive()
}

/// Debug function for CounterReader
///
/// Shows a fresh snapshot, which carries the usual unsynchronized-read caveat
pub fn debug_counter_reader(reader: &CounterReader, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CounterReader")
        .field("snapshot", &reader.snapshot())
        .finish()
}
