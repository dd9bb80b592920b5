// Execution-context placement for worker threads.
// Linux uses sched_setaffinity + setpriority; other platforms only accept `Any`.

use std::fmt;
use std::io;

/// Where a worker is allowed to run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Affinity {
    /// Constrained to the execution context with this index.
    Pinned(usize),
    /// Schedulable on any execution context.
    #[default]
    Any,
}

/// Relative scheduling priority of a worker.
///
/// Data-producing workers run at `Normal`, the Monitor at `Low`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Priority {
    #[default]
    Normal,
    Low,
}

/// Niceness applied to `Priority::Low` threads.
const LOW_PRIORITY_NICE: i32 = 10;

impl fmt::Display for Affinity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Affinity::Pinned(cpu) => write!(f, "cpu {cpu}"),
            Affinity::Any => f.write_str("any cpu"),
        }
    }
}

impl Affinity {
    /// Applies this affinity to the calling thread.
    pub fn apply_to_current_thread(self) -> io::Result<()> {
        match self {
            Affinity::Any => Ok(()),
            Affinity::Pinned(cpu) => pin_current_thread(cpu),
        }
    }
}

impl Priority {
    /// Applies this priority to the calling thread.
    pub fn apply_to_current_thread(self) -> io::Result<()> {
        match self {
            Priority::Normal => Ok(()),
            Priority::Low => set_current_thread_nice(LOW_PRIORITY_NICE),
        }
    }
}

#[cfg(target_os = "linux")]
fn pin_current_thread(cpu: usize) -> io::Result<()> {
    if cpu >= libc::CPU_SETSIZE as usize {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("cpu index {cpu} exceeds CPU_SETSIZE"),
        ));
    }

    // All zeroes is a valid (empty) cpu_set_t.
    let mut cpuset: libc::cpu_set_t = unsafe { std::mem::zeroed() };
    unsafe { libc::CPU_SET(cpu, &mut cpuset) };

    // 0 means current thread.
    let result =
        unsafe { libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &cpuset) };

    if result == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(not(target_os = "linux"))]
fn pin_current_thread(cpu: usize) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!("pinning to cpu {cpu} is only supported on Linux"),
    ))
}

#[cfg(target_os = "linux")]
fn set_current_thread_nice(nice: i32) -> io::Result<()> {
    // On Linux the niceness of PRIO_PROCESS with a thread id applies to that thread only.
    let tid = unsafe { libc::syscall(libc::SYS_gettid) } as libc::id_t;
    let result = unsafe { libc::setpriority(libc::PRIO_PROCESS, tid, nice) };

    if result == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(not(target_os = "linux"))]
fn set_current_thread_nice(_nice: i32) -> io::Result<()> {
    Ok(())
}

/// The execution context the calling thread is running on, if the platform reports it.
#[cfg(target_os = "linux")]
pub fn current_cpu() -> Option<usize> {
    let cpu = unsafe { libc::sched_getcpu() };
    usize::try_from(cpu).ok()
}

#[cfg(not(target_os = "linux"))]
pub fn current_cpu() -> Option<usize> {
    None
}
