use dmxp_corebench::Harness::performance_counters;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

#[test]
fn snapshots_during_updates_stay_plausible() {
    const ITERATIONS: u64 = 100_000;
    let (mut writer, reader) = performance_counters();
    let done = Arc::new(AtomicBool::new(false));

    let observer = {
        let reader = reader.clone();
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut last = 0;
            let mut samples = 0u64;
            loop {
                let finished = done.load(Ordering::Acquire);
                let snapshot = reader.snapshot();
                // Each counter is written by one thread only, so it never goes backwards
                assert!(snapshot.iterations >= last);
                assert!(snapshot.iterations <= ITERATIONS);
                last = snapshot.iterations;
                samples += 1;
                if finished {
                    break;
                }
            }
            samples
        })
    };

    for _ in 0..ITERATIONS {
        writer.record_iteration(3);
    }
    done.store(true, Ordering::Release);
    assert!(observer.join().unwrap() > 0);

    // Once the writer is done, totals and snapshots agree exactly
    let totals = writer.totals();
    assert_eq!(totals.iterations, ITERATIONS);
    assert_eq!(totals.cumulative_micros, 3 * ITERATIONS);
    assert_eq!(reader.snapshot(), totals);
    assert_eq!(totals.average_micros(), 3);
}

#[test]
fn readers_from_the_writer_share_the_same_cells() {
    let (mut writer, _reader) = performance_counters();
    let second = writer.reader();
    writer.record_iteration(10);
    assert_eq!(second.snapshot().iterations, 1);
    assert_eq!(second.snapshot().cumulative_micros, 10);
}
