// Module naming follows project convention (SPSC = Single-Producer Single-Consumer)
#[allow(non_snake_case)]
pub mod Core;
#[allow(non_snake_case)]
pub mod SPSC;
#[allow(non_snake_case)]
pub mod Harness;
#[allow(non_snake_case)]
mod Debug;

pub mod error;
pub mod logging;

pub use error::{ChannelBuildError, HarnessError, SendTimeoutError};
pub use Harness::{Coordinator, FinalReport, HarnessConfig};
pub use SPSC::{ChannelBuilder, ChannelProbe, Message, Receiver, Sender};
