// Worker A: integer work on every iteration, a timestamped message every Nth.

use super::config::ProducerConfig;
use super::console::ConsoleSink;
use super::counters::CounterWriter;
use super::report::ProducerSummary;
use super::work::integer_work;
use crate::Core::clock::Timestamp;
use crate::SPSC::{Message, Sender, Structs::WorkerId};
use std::sync::Arc;
use std::thread;

pub struct ProducerWorker {
    id: WorkerId,
    config: ProducerConfig,
    sender: Sender<Message>,
    counters: CounterWriter,
    sink: Arc<ConsoleSink>,
}

impl ProducerWorker {
    pub fn new(
        id: WorkerId,
        config: ProducerConfig,
        sender: Sender<Message>,
        counters: CounterWriter,
        sink: Arc<ConsoleSink>,
    ) -> Self {
        Self {
            id,
            config,
            sender,
            counters,
            sink,
        }
    }

    /// Runs every iteration to completion. There is no early exit and no
    /// retry: a send that times out is logged and the message dropped.
    /// A `send_every` of 0 disables sending.
    pub fn run(mut self) -> ProducerSummary {
        let id = self.id;
        let started = Timestamp::now();
        let mut sent = 0u32;
        let mut dropped = 0u32;

        self.sink.emit(format_args!("{id} Task Started (producer)\n"));

        for i in 0..self.config.iterations {
            let iteration_start = Timestamp::now();

            integer_work(self.config.work_steps);

            if self.config.send_every != 0 && i % self.config.send_every == 0 {
                let message = Message::new(id, i, &format!("Hello from {id} #{i}"));

                match self.sender.send(message, self.config.send_timeout) {
                    Ok(()) => {
                        sent += 1;
                        self.sink.emit(format_args!("{id}: Sent message {i}\n"));
                    }
                    Err(_dropped) => {
                        dropped += 1;
                        tracing::warn!(
                            worker = id.0,
                            iteration = i,
                            timeout_ms = self.config.send_timeout.as_millis() as u64,
                            "channel full, message dropped"
                        );
                    }
                }
            }

            self.counters
                .record_iteration(iteration_start.elapsed_micros());

            thread::sleep(self.config.delay);
        }

        let elapsed_micros = started.elapsed_micros();
        self.sink.emit(format_args!(
            "{id} Task Completed in {} ms\n",
            elapsed_micros / 1000
        ));
        tracing::debug!(worker = id.0, sent, dropped, "producer completed");

        ProducerSummary {
            counters: self.counters.totals(),
            sent,
            dropped,
            elapsed_micros,
        }
    }
}
