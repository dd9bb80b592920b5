// Periodic low-priority reporter.

use super::config::MonitorConfig;
use super::console::ConsoleSink;
use super::counters::CounterReader;
use crate::Core::memory::MemoryProbe;
use crate::SPSC::{ChannelProbe, Message};
use std::io::{self, Write};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

pub struct Monitor {
    config: MonitorConfig,
    producer: CounterReader,
    consumer: CounterReader,
    channel: ChannelProbe<Message>,
    memory: Arc<dyn MemoryProbe>,
    sink: Arc<ConsoleSink>,
}

impl Monitor {
    pub fn new(
        config: MonitorConfig,
        producer: CounterReader,
        consumer: CounterReader,
        channel: ChannelProbe<Message>,
        memory: Arc<dyn MemoryProbe>,
        sink: Arc<ConsoleSink>,
    ) -> Self {
        Self {
            config,
            producer,
            consumer,
            channel,
            memory,
            sink,
        }
    }

    /// Reports once per period for the configured number of cycles, then returns
    /// how many reports were written.
    ///
    /// Wake-ups target absolute deadlines (`start + period * n`), so a late
    /// wake-up does not push back the following ones.
    pub fn run(self) -> u32 {
        let start = Instant::now();
        let mut reports = 0;

        for cycle in 1..=self.config.cycles {
            let Some(deadline) = deadline_for(start, self.config.period, cycle) else {
                tracing::warn!(cycle, "monitor deadline overflows the clock, stopping");
                break;
            };
            sleep_until(deadline);

            if let Err(e) = self.sink.write_block(|out| self.write_report(out, cycle)) {
                tracing::warn!(error = %e, cycle, "monitor report failed");
            }
            reports += 1;
        }

        tracing::debug!(reports, "monitor completed");
        reports
    }

    fn write_report(&self, out: &mut dyn Write, cycle: u32) -> io::Result<()> {
        // Unsynchronized reads; see `counters` for what a snapshot may show.
        let producer = self.producer.snapshot();
        let consumer = self.consumer.snapshot();

        writeln!(out)?;
        writeln!(out, "=== Performance Monitor (Cycle {cycle}) ===")?;
        writeln!(
            out,
            "Worker 0 iterations: {} (avg: {} us)",
            producer.iterations,
            producer.average_micros()
        )?;
        writeln!(
            out,
            "Worker 1 iterations: {} (avg: {} us)",
            consumer.iterations,
            consumer.average_micros()
        )?;
        writeln!(
            out,
            "Queue messages waiting: {}",
            self.channel.pending_count()
        )?;
        match self.memory.free_bytes() {
            Some(bytes) => writeln!(out, "Free memory: {bytes} bytes"),
            None => writeln!(out, "Free memory: unavailable"),
        }
    }
}

fn deadline_for(start: Instant, period: Duration, cycle: u32) -> Option<Instant> {
    start.checked_add(period.checked_mul(cycle)?)
}

fn sleep_until(deadline: Instant) {
    let now = Instant::now();
    if deadline > now {
        thread::sleep(deadline - now);
    } else {
        tracing::debug!(
            overrun_us = (now - deadline).as_micros() as u64,
            "monitor woke past its deadline"
        );
    }
}
