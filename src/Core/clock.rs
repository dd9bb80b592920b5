use std::fmt;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

static EPOCH: OnceLock<Instant> = OnceLock::new();

fn epoch() -> Instant {
    *EPOCH.get_or_init(Instant::now)
}

/// A reading of the monotonic clock, in microseconds since a process-wide epoch.
///
/// The epoch is fixed the first time any timestamp is taken, so values from
/// different threads are directly comparable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn now() -> Self {
        let micros = epoch().elapsed().as_micros();
        Self(u64::try_from(micros).unwrap_or(u64::MAX))
    }

    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    pub const fn as_micros(self) -> u64 {
        self.0
    }

    /// Microseconds from `earlier` to `self`; zero if `earlier` is later.
    pub fn micros_since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Microseconds elapsed from `self` until now.
    pub fn elapsed_micros(self) -> u64 {
        Timestamp::now().micros_since(self)
    }

    pub fn elapsed(self) -> Duration {
        Duration::from_micros(self.elapsed_micros())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}us", self.0)
    }
}
