use dmxp_corebench::Core::{FixedMemory, MemoryProbe};
use dmxp_corebench::Harness::{
    performance_counters, CaptureBuffer, ConsoleSink, ConsumerConfig, ConsumerWorker, Monitor,
    MonitorConfig, ProducerConfig, ProducerWorker, CONSUMER_ID, PRODUCER_ID,
};
use dmxp_corebench::{ChannelBuilder, Message};
use serial_test::serial;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn capture_sink() -> (CaptureBuffer, Arc<ConsoleSink>) {
    let capture = CaptureBuffer::new();
    let sink = Arc::new(ConsoleSink::new(capture.clone()));
    (capture, sink)
}

fn fast_producer(iterations: u32) -> ProducerConfig {
    ProducerConfig::default()
        .with_iterations(iterations)
        .with_delay(Duration::from_millis(1))
        .with_send_timeout(Duration::from_millis(5))
}

#[test]
#[serial]
fn producer_sends_every_tenth_iteration() {
    let (capture, sink) = capture_sink();
    let (sender, receiver) = ChannelBuilder::new().build::<Message>().unwrap();
    let (counters, reader) = performance_counters();

    let summary = ProducerWorker::new(PRODUCER_ID, fast_producer(35), sender, counters, sink).run();

    assert_eq!(summary.sent, 4);
    assert_eq!(summary.dropped, 0);
    assert_eq!(summary.counters.iterations, 35);
    assert_eq!(reader.snapshot(), summary.counters);

    let sequence: Vec<u32> = std::iter::from_fn(|| receiver.try_receive())
        .map(|m| m.sequence_id())
        .collect();
    assert_eq!(sequence, vec![0, 10, 20, 30]);

    let output = capture.contents();
    assert!(output.contains("Worker 0 Task Started"));
    for i in [0, 10, 20, 30] {
        assert!(output.contains(&format!("Worker 0: Sent message {i}\n")));
    }
    assert!(output.contains("Worker 0 Task Completed in"));
}

#[test]
#[serial]
fn producer_drops_sends_on_a_full_channel() {
    let (capture, sink) = capture_sink();
    let (sender, receiver) = ChannelBuilder::new().with_capacity(1).build::<Message>().unwrap();
    let (counters, _reader) = performance_counters();

    let summary = ProducerWorker::new(PRODUCER_ID, fast_producer(30), sender, counters, sink).run();

    assert_eq!(summary.sent, 1);
    assert_eq!(summary.dropped, 2);
    // Counters advance regardless of send outcome
    assert_eq!(summary.counters.iterations, 30);

    // The channel still holds the first message only
    assert_eq!(receiver.try_receive().map(|m| m.sequence_id()), Some(0));
    assert!(receiver.try_receive().is_none());

    let output = capture.contents();
    assert!(output.contains("Worker 0: Sent message 0\n"));
    assert!(!output.contains("Sent message 10"));
}

#[test]
#[serial]
fn producer_with_send_every_zero_only_works() {
    let (capture, sink) = capture_sink();
    let (sender, receiver) = ChannelBuilder::new().build::<Message>().unwrap();
    let (counters, _reader) = performance_counters();
    let config = fast_producer(12).with_send_every(0);
    assert_eq!(config.expected_sends(), 0);

    let summary = ProducerWorker::new(PRODUCER_ID, config, sender, counters, sink).run();

    assert_eq!(summary.sent, 0);
    assert_eq!(summary.dropped, 0);
    assert_eq!(summary.counters.iterations, 12);
    assert!(receiver.try_receive().is_none());
    assert!(!capture.contents().contains("Sent message"));
}

#[test]
#[serial]
fn consumer_reports_each_received_message() {
    let (capture, sink) = capture_sink();
    let (sender, receiver) = ChannelBuilder::new().build::<Message>().unwrap();
    let (counters, _reader) = performance_counters();

    for i in [0, 10, 20] {
        sender
            .send(Message::new(PRODUCER_ID, i, &format!("Hello from Worker 0 #{i}")), Duration::ZERO)
            .unwrap();
    }

    let config = ConsumerConfig::default()
        .with_iterations(5)
        .with_receive_timeout(Duration::from_millis(2))
        .with_delay(Duration::from_millis(1));
    let summary = ConsumerWorker::new(CONSUMER_ID, config, receiver, counters, sink).run();

    assert_eq!(summary.counters.iterations, 5);
    assert_eq!(summary.latency.count, 3);
    assert!(summary.latency.min_micros <= summary.latency.max_micros);

    let output = capture.contents();
    assert_eq!(output.matches("Worker 1: Received").count(), 3);
    assert!(output.contains("Received 'Hello from Worker 0 #20' (latency: "));
    assert!(output.contains("Worker 1 Task Completed in"));
    assert_eq!(sender.pending_count(), 0);
}

#[test]
#[serial]
fn monitor_reports_snapshot_occupancy_and_memory() {
    let (capture, sink) = capture_sink();
    let (sender, _receiver) = ChannelBuilder::new().build::<Message>().unwrap();
    sender.try_send(Message::new(PRODUCER_ID, 0, "a")).unwrap();
    sender.try_send(Message::new(PRODUCER_ID, 10, "b")).unwrap();

    let (mut producer_counters, producer_reader) = performance_counters();
    let (_consumer_counters, consumer_reader) = performance_counters();
    producer_counters.record_iteration(40);
    producer_counters.record_iteration(60);

    let memory: Arc<dyn MemoryProbe> = Arc::new(FixedMemory(Some(1234)));
    let config = MonitorConfig::default()
        .with_period(Duration::from_millis(5))
        .with_cycles(2);
    let reports = Monitor::new(
        config,
        producer_reader,
        consumer_reader,
        sender.probe(),
        memory,
        sink,
    )
    .run();

    assert_eq!(reports, 2);
    let output = capture.contents();
    assert!(output.contains("=== Performance Monitor (Cycle 1) ==="));
    assert!(output.contains("=== Performance Monitor (Cycle 2) ==="));
    assert!(output.contains("Worker 0 iterations: 2 (avg: 50 us)"));
    // No division by zero for a worker that has not run
    assert!(output.contains("Worker 1 iterations: 0 (avg: 0 us)"));
    assert!(output.contains("Queue messages waiting: 2"));
    assert!(output.contains("Free memory: 1234 bytes"));
}

#[test]
#[serial]
fn monitor_stops_after_its_cycles_and_keeps_cadence() {
    let (capture, sink) = capture_sink();
    let (sender, _receiver) = ChannelBuilder::new().build::<Message>().unwrap();
    let (_a, producer_reader) = performance_counters();
    let (_b, consumer_reader) = performance_counters();

    let period = Duration::from_millis(20);
    let config = MonitorConfig::default().with_period(period).with_cycles(5);
    let started = Instant::now();
    let reports = Monitor::new(
        config,
        producer_reader,
        consumer_reader,
        sender.probe(),
        Arc::new(FixedMemory(None)),
        sink,
    )
    .run();
    let elapsed = started.elapsed();

    assert_eq!(reports, 5);
    assert!(elapsed >= period * 5);

    let output = capture.contents();
    assert_eq!(output.matches("=== Performance Monitor").count(), 5);
    assert!(!output.contains("(Cycle 6)"));
    assert!(output.contains("Free memory: unavailable"));
}
