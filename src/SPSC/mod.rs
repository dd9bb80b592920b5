mod builder;
mod consumer;
mod producer;

pub use builder::{ChannelBuilder, DEFAULT_CAPACITY};
pub use consumer::Receiver;
pub use producer::{ChannelProbe, Sender};

pub mod Buffer {
    pub mod Buffer;
    pub mod Buffer_impl;
    pub use Buffer::{RingBuffer, Slot}; // re-export for stable path
}

pub mod Structs {
    pub mod Message;
    pub use Message::{Payload, WorkerId, PAYLOAD_INLINE}; // re-export for stable path
}

pub use Structs::Message::Message;
