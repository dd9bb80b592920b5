//! Creates the shared resources, starts the three workers with their
//! placement, joins them and reports the final aggregates.
//!
//! Workers are started in two phases. Each thread first applies its affinity
//! and priority and reports the outcome, then parks until the coordinator
//! releases it. If any worker cannot be placed, none of them is released and
//! the run fails before any measurement starts.

use super::config::HarnessConfig;
use super::console::ConsoleSink;
use super::consumer_worker::ConsumerWorker;
use super::counters::performance_counters;
use super::monitor::Monitor;
use super::producer_worker::ProducerWorker;
use super::report::FinalReport;
use crate::error::HarnessError;
use crate::Core::affinity::current_cpu;
use crate::Core::memory::{MemoryProbe, SystemMemory};
use crate::Core::{Affinity, Priority};
use crate::SPSC::{ChannelBuilder, Message, Structs::WorkerId};
use std::io;
use std::sync::mpsc::{sync_channel, Receiver as StartSignal, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

pub const PRODUCER_ID: WorkerId = WorkerId(0);
pub const CONSUMER_ID: WorkerId = WorkerId(1);

pub struct Coordinator {
    config: HarnessConfig,
    sink: Arc<ConsoleSink>,
    memory: Arc<dyn MemoryProbe>,
}

impl Coordinator {
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            sink: Arc::new(ConsoleSink::stdout()),
            memory: Arc::new(SystemMemory),
        }
    }

    pub fn with_sink(mut self, sink: Arc<ConsoleSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_memory_probe(mut self, memory: Arc<dyn MemoryProbe>) -> Self {
        self.memory = memory;
        self
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Runs the benchmark to completion.
    ///
    /// Fatal failures are reported through the sink before being returned.
    pub fn run(&self) -> Result<FinalReport, HarnessError> {
        let result = self.run_inner();
        if let Err(e) = &result {
            self.sink.emit(format_args!("Benchmark aborted: {e}\n"));
        }
        result
    }

    fn run_inner(&self) -> Result<FinalReport, HarnessError> {
        let config = &self.config;
        config.validate()?;

        self.sink.emit(format_args!(
            "Dual-Core Architecture Analysis\n\
             ===============================\n"
        ));

        let (sender, receiver) = ChannelBuilder::new()
            .with_capacity(config.channel_capacity)
            .build::<Message>()?;
        self.sink.emit(format_args!(
            "Created message channel (capacity {}) and console lock\n",
            config.channel_capacity
        ));

        let (producer_counters, producer_reader) = performance_counters();
        let (consumer_counters, consumer_reader) = performance_counters();

        let monitor = Monitor::new(
            config.monitor.clone(),
            producer_reader,
            consumer_reader,
            sender.probe(),
            Arc::clone(&self.memory),
            Arc::clone(&self.sink),
        );
        let producer = ProducerWorker::new(
            PRODUCER_ID,
            config.producer.clone(),
            sender,
            producer_counters,
            Arc::clone(&self.sink),
        );
        let consumer = ConsumerWorker::new(
            CONSUMER_ID,
            config.consumer.clone(),
            receiver,
            consumer_counters,
            Arc::clone(&self.sink),
        );

        self.sink.emit(format_args!("Creating workers...\n"));

        // Dropping a pending worker without starting it makes its thread exit.
        let producer = spawn_worker(
            "producer",
            config.producer.affinity,
            config.producer.priority,
            move || producer.run(),
        )?;
        let consumer = spawn_worker(
            "consumer",
            config.consumer.affinity,
            config.consumer.priority,
            move || consumer.run(),
        )?;
        let monitor = spawn_worker(
            "monitor",
            config.monitor.affinity,
            config.monitor.priority,
            move || monitor.run(),
        )?;

        let producer = producer.start();
        let consumer = consumer.start();
        let monitor = monitor.start();

        self.sink.emit(format_args!(
            "Workers created successfully. Monitoring dual-core performance...\n\n"
        ));

        // Join everything before looking at any result.
        let producer = producer.join();
        let consumer = consumer.join();
        let monitor_reports = monitor.join();

        let report = FinalReport {
            producer: producer?,
            consumer: consumer?,
            monitor_reports: monitor_reports?,
        };

        if let Err(e) = report.write_to(&self.sink) {
            tracing::warn!(error = %e, "final report could not be written");
        }

        Ok(report)
    }
}

/// A worker thread that has been placed but not yet released.
struct PendingWorker<R> {
    name: &'static str,
    handle: JoinHandle<Option<R>>,
    go: SyncSender<()>,
}

/// A running worker.
struct WorkerHandle<R> {
    name: &'static str,
    handle: JoinHandle<Option<R>>,
}

fn spawn_worker<R, F>(
    name: &'static str,
    affinity: Affinity,
    priority: Priority,
    body: F,
) -> Result<PendingWorker<R>, HarnessError>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let (ready_tx, ready_rx) = sync_channel::<io::Result<()>>(1);
    let (go_tx, go_rx) = sync_channel::<()>(1);

    let handle = thread::Builder::new()
        .name(format!("dmxp-{name}"))
        .spawn(move || run_placed(name, affinity, priority, ready_tx, go_rx, body))
        .map_err(|source| HarnessError::WorkerStart {
            worker: name,
            source,
        })?;

    let placed = ready_rx.recv().unwrap_or_else(|_| {
        Err(io::Error::other("worker thread exited before reporting placement"))
    });

    match placed {
        Ok(()) => Ok(PendingWorker {
            name,
            handle,
            go: go_tx,
        }),
        Err(source) => {
            drop(go_tx);
            let _ = handle.join();
            Err(HarnessError::WorkerStart {
                worker: name,
                source,
            })
        }
    }
}

fn run_placed<R, F>(
    name: &'static str,
    affinity: Affinity,
    priority: Priority,
    ready: SyncSender<io::Result<()>>,
    go: StartSignal<()>,
    body: F,
) -> Option<R>
where
    F: FnOnce() -> R,
{
    if let Err(e) = affinity.apply_to_current_thread() {
        let _ = ready.send(Err(e));
        return None;
    }
    // A worker that keeps its default priority still produces valid numbers.
    if let Err(e) = priority.apply_to_current_thread() {
        tracing::warn!(worker = name, error = %e, ?priority, "could not apply priority");
    }

    tracing::debug!(
        worker = name,
        %affinity,
        cpu = ?current_cpu(),
        "worker placed"
    );

    if ready.send(Ok(())).is_err() {
        return None;
    }
    // A closed channel means the run was abandoned.
    go.recv().ok()?;

    Some(body())
}

impl<R> PendingWorker<R> {
    fn start(self) -> WorkerHandle<R> {
        // The thread is parked in `recv`, so the slot is free.
        let _ = self.go.send(());
        WorkerHandle {
            name: self.name,
            handle: self.handle,
        }
    }
}

impl<R> WorkerHandle<R> {
    fn join(self) -> Result<R, HarnessError> {
        match self.handle.join() {
            Ok(Some(result)) => Ok(result),
            Ok(None) | Err(_) => Err(HarnessError::WorkerPanicked { worker: self.name }),
        }
    }
}
