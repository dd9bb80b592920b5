pub mod config;
pub mod console;
pub mod consumer_worker;
pub mod coordinator;
pub mod counters;
pub mod monitor;
pub mod producer_worker;
pub mod report;
pub mod work;

pub use config::{ConsumerConfig, HarnessConfig, MonitorConfig, ProducerConfig};
pub use console::{CaptureBuffer, ConsoleSink};
pub use consumer_worker::ConsumerWorker;
pub use coordinator::{Coordinator, CONSUMER_ID, PRODUCER_ID};
pub use counters::{performance_counters, CounterReader, CounterSnapshot, CounterWriter};
pub use monitor::Monitor;
pub use producer_worker::ProducerWorker;
pub use report::{ConsumerSummary, FinalReport, LatencyStats, ProducerSummary};
