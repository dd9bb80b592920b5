pub mod affinity;
pub mod clock;
pub mod futex;
pub mod memory;

pub use affinity::{Affinity, Priority};
pub use clock::Timestamp;
pub use memory::{FixedMemory, MemoryProbe, SystemMemory};
