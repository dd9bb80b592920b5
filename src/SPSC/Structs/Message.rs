// Messages carried by the channel; plain Copy values, no shared ownership.

use crate::Core::clock::Timestamp;
use std::fmt;

/// The size of the inline payload text.
pub const PAYLOAD_INLINE: usize = 32;

/// Identifies the worker a message originates from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct WorkerId(pub u32);

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Worker {}", self.0)
    }
}

/// Short text stored inline. Longer input is truncated on a char boundary.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Payload {
    len: u8,
    bytes: [u8; PAYLOAD_INLINE],
}

impl Payload {
    pub fn new(text: &str) -> Self {
        let mut end = text.len().min(PAYLOAD_INLINE);
        while !text.is_char_boundary(end) {
            end -= 1;
        }

        let mut bytes = [0u8; PAYLOAD_INLINE];
        bytes[..end].copy_from_slice(&text.as_bytes()[..end]);
        Self {
            len: end as u8,
            bytes,
        }
    }

    pub fn as_str(&self) -> &str {
        // Always valid: `new` only copies whole chars.
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A timestamped message between workers. Immutable once constructed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Message {
    origin: WorkerId,
    sequence_id: u32,
    enqueued_at: Timestamp,
    payload: Payload,
}

impl Message {
    /// Builds a message stamped with the current monotonic time.
    pub fn new(origin: WorkerId, sequence_id: u32, payload: &str) -> Self {
        Self::stamped(origin, sequence_id, Timestamp::now(), payload)
    }

    pub fn stamped(
        origin: WorkerId,
        sequence_id: u32,
        enqueued_at: Timestamp,
        payload: &str,
    ) -> Self {
        Self {
            origin,
            sequence_id,
            enqueued_at,
            payload: Payload::new(payload),
        }
    }

    pub fn origin(&self) -> WorkerId {
        self.origin
    }

    pub fn sequence_id(&self) -> u32 {
        self.sequence_id
    }

    pub fn enqueued_at(&self) -> Timestamp {
        self.enqueued_at
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Microseconds between the enqueue timestamp and `now`.
    pub fn latency_micros(&self, now: Timestamp) -> u64 {
        now.micros_since(self.enqueued_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_keeps_short_text() {
        let payload = Payload::new("Hello from Worker 0 #10");
        assert_eq!(payload.as_str(), "Hello from Worker 0 #10");
        assert_eq!(payload.len(), 23);
    }

    #[test]
    fn payload_truncates_on_char_boundary() {
        // 31 ASCII bytes followed by a two-byte char straddling the limit
        let text = format!("{}é", "a".repeat(31));
        let payload = Payload::new(&text);
        assert_eq!(payload.len(), 31);
        assert_eq!(payload.as_str(), "a".repeat(31));
    }

    #[test]
    fn latency_never_underflows() {
        let msg = Message::stamped(WorkerId(0), 0, Timestamp::from_micros(500), "x");
        assert_eq!(msg.latency_micros(Timestamp::from_micros(800)), 300);
        assert_eq!(msg.latency_micros(Timestamp::from_micros(100)), 0);
    }
}
