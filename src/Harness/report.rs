use super::console::ConsoleSink;
use super::counters::{average, CounterSnapshot};
use std::io::{self, Write};

/// Latencies observed by the consumer, in microseconds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LatencyStats {
    pub count: u64,
    pub min_micros: u64,
    pub max_micros: u64,
    pub total_micros: u64,
}

impl LatencyStats {
    pub fn record(&mut self, latency_micros: u64) {
        if self.count == 0 {
            self.min_micros = latency_micros;
            self.max_micros = latency_micros;
        } else {
            self.min_micros = self.min_micros.min(latency_micros);
            self.max_micros = self.max_micros.max(latency_micros);
        }
        self.count += 1;
        self.total_micros = self.total_micros.saturating_add(latency_micros);
    }

    pub fn mean_micros(&self) -> u64 {
        average(self.total_micros, self.count)
    }
}

/// What Worker A hands back at its join point.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ProducerSummary {
    pub counters: CounterSnapshot,
    pub sent: u32,
    pub dropped: u32,
    pub elapsed_micros: u64,
}

/// What Worker B hands back at its join point.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ConsumerSummary {
    pub counters: CounterSnapshot,
    pub latency: LatencyStats,
    pub elapsed_micros: u64,
}

/// Aggregates reported once all workers have been joined.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FinalReport {
    pub producer: ProducerSummary,
    pub consumer: ConsumerSummary,
    pub monitor_reports: u32,
}

impl FinalReport {
    /// Writes the final results through the sink as one block.
    pub fn write_to(&self, sink: &ConsoleSink) -> io::Result<()> {
        sink.write_block(|out| self.write_lines(out))
    }

    fn write_lines(&self, out: &mut dyn Write) -> io::Result<()> {
        let producer = &self.producer;
        let consumer = &self.consumer;

        writeln!(out)?;
        writeln!(out, "=== Final Results ===")?;
        writeln!(
            out,
            "Worker 0 total iterations: {}",
            producer.counters.iterations
        )?;
        writeln!(
            out,
            "Worker 1 total iterations: {}",
            consumer.counters.iterations
        )?;
        writeln!(
            out,
            "Worker 0 average time per iteration: {} us",
            producer.counters.average_micros()
        )?;
        writeln!(
            out,
            "Worker 1 average time per iteration: {} us",
            consumer.counters.average_micros()
        )?;
        writeln!(
            out,
            "Messages sent: {} (dropped: {})",
            producer.sent, producer.dropped
        )?;
        writeln!(
            out,
            "Messages received: {} (latency min/mean/max: {}/{}/{} us)",
            consumer.latency.count,
            consumer.latency.min_micros,
            consumer.latency.mean_micros(),
            consumer.latency.max_micros
        )?;
        writeln!(out, "Monitor reports: {}", self.monitor_reports)?;
        writeln!(out)?;
        writeln!(out, "Dual-core analysis complete!")
    }
}
