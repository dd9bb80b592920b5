//! Per-worker performance counters.
//!
//! Each worker owns the only [`CounterWriter`] for its counters and updates
//! them with plain relaxed load + store pairs: no lock and no read-modify-write
//! instruction, matching a single-writer convention. Other parties hold
//! [`CounterReader`]s and take best-effort snapshots. The two fields are read
//! independently, so a snapshot taken while the owner is mid-update can pair a
//! new iteration count with the previous cumulative time (or the reverse).
//! The Monitor accepts that approximation; the final report uses the exact
//! totals the worker hands back when it is joined.

use crossbeam_utils::CachePadded;
use std::sync::atomic::{AtomicU64, Ordering::Relaxed};
use std::sync::Arc;

// Each field sits on its own cache line: the owner stores both on every
// iteration while the Monitor reads them.
#[derive(Default)]
pub(crate) struct CounterCells {
    iterations: CachePadded<AtomicU64>,
    cumulative_micros: CachePadded<AtomicU64>,
}

/// A point-in-time reading of one worker's counters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub iterations: u64,
    pub cumulative_micros: u64,
}

impl CounterSnapshot {
    /// Average time per iteration in microseconds, 0 if nothing ran yet.
    pub fn average_micros(&self) -> u64 {
        average(self.cumulative_micros, self.iterations)
    }
}

/// Integer average that treats an empty sample as 0.
pub fn average(total: u64, count: u64) -> u64 {
    if count == 0 {
        0
    } else {
        total / count
    }
}

/// Creates one worker's counters, returning the single writer and a reader.
pub fn performance_counters() -> (CounterWriter, CounterReader) {
    let cells = Arc::new(CounterCells::default());
    (
        CounterWriter {
            cells: Arc::clone(&cells),
            iterations: 0,
            cumulative_micros: 0,
        },
        CounterReader { cells },
    )
}

/// Write access to a worker's counters. Not cloneable: one writer per worker.
pub struct CounterWriter {
    pub(crate) cells: Arc<CounterCells>,
    // Owner-side copies, so the writer never reads back the shared cells.
    iterations: u64,
    cumulative_micros: u64,
}

impl CounterWriter {
    /// Records one completed iteration that took `elapsed_micros`.
    pub fn record_iteration(&mut self, elapsed_micros: u64) {
        self.iterations += 1;
        self.cumulative_micros = self.cumulative_micros.saturating_add(elapsed_micros);

        self.cells.iterations.store(self.iterations, Relaxed);
        self.cells
            .cumulative_micros
            .store(self.cumulative_micros, Relaxed);
    }

    /// The exact totals as seen by the owning worker.
    pub fn totals(&self) -> CounterSnapshot {
        CounterSnapshot {
            iterations: self.iterations,
            cumulative_micros: self.cumulative_micros,
        }
    }

    pub fn reader(&self) -> CounterReader {
        CounterReader {
            cells: Arc::clone(&self.cells),
        }
    }
}

/// Read access to a worker's counters.
#[derive(Clone)]
pub struct CounterReader {
    pub(crate) cells: Arc<CounterCells>,
}

impl CounterReader {
    /// Best-effort, unsynchronized reading of the counters. See the module docs.
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            iterations: self.cells.iterations.load(Relaxed),
            cumulative_micros: self.cells.cumulative_micros.load(Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_of_empty_sample_is_zero() {
        assert_eq!(average(12_345, 0), 0);
        assert_eq!(CounterSnapshot::default().average_micros(), 0);
    }

    #[test]
    fn average_is_integer_division() {
        assert_eq!(average(1_000, 100), 10);
        assert_eq!(average(1_099, 100), 10);
    }

    #[test]
    fn reader_sees_writer_updates() {
        let (mut writer, reader) = performance_counters();
        writer.record_iteration(40);
        writer.record_iteration(60);

        let snapshot = reader.snapshot();
        assert_eq!(snapshot.iterations, 2);
        assert_eq!(snapshot.cumulative_micros, 100);
        assert_eq!(snapshot.average_micros(), 50);
        assert_eq!(writer.totals(), snapshot);
    }

    #[test]
    fn counter_fields_do_not_share_a_cache_line() {
        let cells = CounterCells::default();
        let iterations = &cells.iterations as *const _ as usize;
        let cumulative = &cells.cumulative_micros as *const _ as usize;

        let line = std::mem::align_of::<CachePadded<AtomicU64>>();
        assert!(iterations.abs_diff(cumulative) >= line);
        assert_eq!(iterations % line, 0);
        assert_eq!(cumulative % line, 0);
    }
}
