use dmxp_corebench::Core::{Affinity, FixedMemory};
use dmxp_corebench::Harness::{
    CaptureBuffer, ConsoleSink, ConsumerConfig, MonitorConfig, ProducerConfig,
};
use dmxp_corebench::{Coordinator, HarnessConfig, HarnessError};
use serial_test::serial;
use std::sync::Arc;
use std::time::Duration;

/// Reference iteration counts and send cadence with shortened delays.
/// The consumer outlives the producer, so every sent message is received.
fn quick_config() -> HarnessConfig {
    HarnessConfig::default()
        .with_producer(ProducerConfig::default().with_delay(Duration::from_millis(2)))
        .with_consumer(
            ConsumerConfig::default()
                .with_delay(Duration::from_millis(5))
                .with_receive_timeout(Duration::from_millis(5)),
        )
        .with_monitor(
            MonitorConfig::default()
                .with_period(Duration::from_millis(20))
                .with_cycles(3),
        )
        .unpinned()
}

fn coordinator(config: HarnessConfig) -> (CaptureBuffer, Coordinator) {
    let capture = CaptureBuffer::new();
    let coordinator = Coordinator::new(config)
        .with_sink(Arc::new(ConsoleSink::new(capture.clone())))
        .with_memory_probe(Arc::new(FixedMemory(Some(4096))));
    (capture, coordinator)
}

#[test]
#[serial]
fn end_to_end_run_delivers_every_message() {
    let (capture, coordinator) = coordinator(quick_config());

    let report = coordinator.run().unwrap();

    assert_eq!(report.producer.counters.iterations, 100);
    assert_eq!(report.consumer.counters.iterations, 150);
    assert_eq!(report.producer.sent, 10);
    assert_eq!(report.producer.dropped, 0);
    assert_eq!(report.consumer.latency.count, 10);
    assert_eq!(report.monitor_reports, 3);

    // Final averages are exact divisions of the joined totals
    assert_eq!(
        report.producer.counters.average_micros(),
        report.producer.counters.cumulative_micros / 100
    );

    let output = capture.contents();
    assert!(output.starts_with("Dual-Core Architecture Analysis\n"));
    assert!(output.contains("Created message channel (capacity 10)"));
    assert!(output.contains("Workers created successfully"));
    for i in (0..100).step_by(10) {
        assert!(output.contains(&format!("Worker 0: Sent message {i}\n")));
        assert!(output.contains(&format!("Received 'Hello from Worker 0 #{i}'")));
    }
    assert_eq!(output.matches("=== Performance Monitor").count(), 3);
    assert!(output.contains("Free memory: 4096 bytes"));
    assert!(output.contains("=== Final Results ==="));
    assert!(output.contains("Worker 0 total iterations: 100"));
    assert!(output.contains("Worker 1 total iterations: 150"));
    assert!(output.contains("Messages sent: 10 (dropped: 0)"));
    assert!(output.trim_end().ends_with("Dual-core analysis complete!"));
}

#[test]
#[serial]
fn zero_capacity_aborts_before_starting_workers() {
    let (capture, coordinator) = coordinator(quick_config().with_channel_capacity(0));

    let err = coordinator.run().unwrap_err();
    assert!(matches!(err, HarnessError::ResourceCreation { .. }));

    let output = capture.contents();
    assert!(output.contains("Benchmark aborted: failed to create message channel"));
    assert!(!output.contains("Task Started"));
}

#[test]
#[serial]
fn unplaceable_worker_aborts_before_any_work() {
    let config = quick_config().with_consumer(
        ConsumerConfig::default().with_affinity(Affinity::Pinned(1 << 20)),
    );
    let (capture, coordinator) = coordinator(config);

    let err = coordinator.run().unwrap_err();
    match err {
        HarnessError::WorkerStart { worker, .. } => assert_eq!(worker, "consumer"),
        other => panic!("unexpected error: {other}"),
    }

    let output = capture.contents();
    assert!(output.contains("Benchmark aborted: failed to start consumer"));
    // The producer was placed but never released
    assert!(!output.contains("Task Started"));
    assert!(!output.contains("Final Results"));
}

#[test]
fn invalid_config_is_rejected() {
    let config = quick_config().with_monitor(MonitorConfig::default().with_period(Duration::ZERO));
    let (_capture, coordinator) = coordinator(config);

    assert!(matches!(
        coordinator.run(),
        Err(HarnessError::InvalidConfig(_))
    ));
}
