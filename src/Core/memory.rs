// Free-memory query used by the Monitor's diagnostic line.

/// Source of the free-memory metric. External to the benchmark core;
/// the Monitor only prints what it is given.
pub trait MemoryProbe: Send + Sync {
    /// Free memory in bytes, or `None` if the platform cannot tell.
    fn free_bytes(&self) -> Option<u64>;
}

/// Queries the operating system for free physical memory.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemMemory;

#[cfg(target_os = "linux")]
impl MemoryProbe for SystemMemory {
    fn free_bytes(&self) -> Option<u64> {
        let mut info: libc::sysinfo = unsafe { std::mem::zeroed() };
        let result = unsafe { libc::sysinfo(&mut info) };
        if result != 0 {
            return None;
        }
        (info.freeram as u64).checked_mul(u64::from(info.mem_unit))
    }
}

#[cfg(not(target_os = "linux"))]
impl MemoryProbe for SystemMemory {
    fn free_bytes(&self) -> Option<u64> {
        None
    }
}

/// A probe returning a fixed value; useful for deterministic output.
#[derive(Debug, Clone, Copy)]
pub struct FixedMemory(pub Option<u64>);

impl MemoryProbe for FixedMemory {
    fn free_bytes(&self) -> Option<u64> {
        self.0
    }
}
