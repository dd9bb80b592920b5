use crate::error::HarnessError;
use crate::Core::{Affinity, Priority};
use crate::SPSC::DEFAULT_CAPACITY;
use std::time::Duration;

/// Worker A: integer work, periodic sends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProducerConfig {
    pub iterations: u32,
    /// A message is sent on every iteration index divisible by this.
    pub send_every: u32,
    pub send_timeout: Duration,
    pub delay: Duration,
    pub work_steps: u32,
    pub affinity: Affinity,
    pub priority: Priority,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            send_every: 10,
            send_timeout: Duration::from_millis(100),
            delay: Duration::from_millis(50),
            work_steps: 1000,
            affinity: Affinity::Pinned(0),
            priority: Priority::Normal,
        }
    }
}

impl ProducerConfig {
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_send_every(mut self, send_every: u32) -> Self {
        self.send_every = send_every;
        self
    }

    pub fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = timeout;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_affinity(mut self, affinity: Affinity) -> Self {
        self.affinity = affinity;
        self
    }

    /// Number of iterations on which a send is attempted.
    pub fn expected_sends(&self) -> u32 {
        if self.send_every == 0 {
            return 0;
        }
        self.iterations.div_ceil(self.send_every)
    }
}

/// Worker B: float work, short receives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsumerConfig {
    pub iterations: u32,
    pub receive_timeout: Duration,
    pub delay: Duration,
    pub work_steps: u32,
    pub affinity: Affinity,
    pub priority: Priority,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            iterations: 150,
            receive_timeout: Duration::from_millis(10),
            delay: Duration::from_millis(30),
            work_steps: 500,
            affinity: Affinity::Pinned(1),
            priority: Priority::Normal,
        }
    }
}

impl ConsumerConfig {
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_receive_timeout(mut self, timeout: Duration) -> Self {
        self.receive_timeout = timeout;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_affinity(mut self, affinity: Affinity) -> Self {
        self.affinity = affinity;
        self
    }
}

/// The periodic reporter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonitorConfig {
    pub period: Duration,
    pub cycles: u32,
    pub affinity: Affinity,
    pub priority: Priority,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
            cycles: 10,
            affinity: Affinity::Any,
            priority: Priority::Low,
        }
    }
}

impl MonitorConfig {
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn with_cycles(mut self, cycles: u32) -> Self {
        self.cycles = cycles;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarnessConfig {
    pub channel_capacity: usize,
    pub producer: ProducerConfig,
    pub consumer: ConsumerConfig,
    pub monitor: MonitorConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CAPACITY,
            producer: ProducerConfig::default(),
            consumer: ConsumerConfig::default(),
            monitor: MonitorConfig::default(),
        }
    }
}

impl HarnessConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    pub fn with_producer(mut self, producer: ProducerConfig) -> Self {
        self.producer = producer;
        self
    }

    pub fn with_consumer(mut self, consumer: ConsumerConfig) -> Self {
        self.consumer = consumer;
        self
    }

    pub fn with_monitor(mut self, monitor: MonitorConfig) -> Self {
        self.monitor = monitor;
        self
    }

    /// Every worker may run on any execution context.
    pub fn unpinned(mut self) -> Self {
        self.producer.affinity = Affinity::Any;
        self.consumer.affinity = Affinity::Any;
        self.monitor.affinity = Affinity::Any;
        self
    }

    /// Divides every delay, timeout and period by `factor`. Iteration counts are kept.
    pub fn time_scaled(mut self, factor: u32) -> Self {
        let factor = factor.max(1);
        self.producer.send_timeout /= factor;
        self.producer.delay /= factor;
        self.consumer.receive_timeout /= factor;
        self.consumer.delay /= factor;
        self.monitor.period /= factor;
        self
    }

    /// Rejects settings the workers cannot run with.
    ///
    /// A zero channel capacity is left to channel creation, which reports it
    /// as a resource failure.
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.producer.iterations == 0 {
            return Err(HarnessError::InvalidConfig(
                "producer iterations must be at least 1".into(),
            ));
        }
        if self.producer.send_every == 0 {
            return Err(HarnessError::InvalidConfig(
                "producer send interval must be at least 1".into(),
            ));
        }
        if self.consumer.iterations == 0 {
            return Err(HarnessError::InvalidConfig(
                "consumer iterations must be at least 1".into(),
            ));
        }
        if self.monitor.period.is_zero() {
            return Err(HarnessError::InvalidConfig(
                "monitor period must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_reference_setup() {
        let config = HarnessConfig::default();
        assert_eq!(config.channel_capacity, 10);
        assert_eq!(config.producer.iterations, 100);
        assert_eq!(config.producer.expected_sends(), 10);
        assert_eq!(config.producer.affinity, Affinity::Pinned(0));
        assert_eq!(config.consumer.iterations, 150);
        assert_eq!(config.consumer.affinity, Affinity::Pinned(1));
        assert_eq!(config.monitor.cycles, 10);
        assert_eq!(config.monitor.priority, Priority::Low);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn time_scaling_keeps_iteration_counts() {
        let config = HarnessConfig::default().time_scaled(10);
        assert_eq!(config.producer.delay, Duration::from_millis(5));
        assert_eq!(config.monitor.period, Duration::from_millis(100));
        assert_eq!(config.producer.iterations, 100);
    }

    #[test]
    fn zero_send_interval_is_rejected() {
        let config = HarnessConfig::default()
            .with_producer(ProducerConfig::default().with_send_every(0));
        assert!(matches!(
            config.validate(),
            Err(HarnessError::InvalidConfig(_))
        ));
    }
}
