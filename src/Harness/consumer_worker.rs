// Worker B: float work on every iteration followed by a short receive.

use super::config::ConsumerConfig;
use super::console::ConsoleSink;
use super::counters::CounterWriter;
use super::report::{ConsumerSummary, LatencyStats};
use super::work::float_work;
use crate::Core::clock::Timestamp;
use crate::SPSC::{Message, Receiver, Structs::WorkerId};
use std::sync::Arc;
use std::thread;

pub struct ConsumerWorker {
    id: WorkerId,
    config: ConsumerConfig,
    receiver: Receiver<Message>,
    counters: CounterWriter,
    sink: Arc<ConsoleSink>,
}

impl ConsumerWorker {
    pub fn new(
        id: WorkerId,
        config: ConsumerConfig,
        receiver: Receiver<Message>,
        counters: CounterWriter,
        sink: Arc<ConsoleSink>,
    ) -> Self {
        Self {
            id,
            config,
            receiver,
            counters,
            sink,
        }
    }

    pub fn run(mut self) -> ConsumerSummary {
        let id = self.id;
        let started = Timestamp::now();
        let mut latency = LatencyStats::default();

        self.sink.emit(format_args!("{id} Task Started (consumer)\n"));

        for i in 0..self.config.iterations {
            let iteration_start = Timestamp::now();

            float_work(self.config.work_steps);

            // A timeout just means nothing arrived this iteration.
            match self.receiver.receive(self.config.receive_timeout) {
                Some(message) => {
                    let micros = message.latency_micros(Timestamp::now());
                    latency.record(micros);
                    self.sink.emit(format_args!(
                        "{id}: Received '{}' (latency: {micros} us)\n",
                        message.payload()
                    ));
                }
                None => {
                    tracing::trace!(worker = id.0, iteration = i, "receive timed out");
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
        tracing::debug!(worker = id.0, received = latency.count, "consumer completed");

        ConsumerSummary {
            counters: self.counters.totals(),
            latency,
            elapsed_micros,
        }
    }
}
