//! Fixed-period tick driver for the physics thread.
//!
//! The driver owns at most one `crossbeam_channel::tick` receiver. Arming always drops the
//! previous receiver before installing a new one, so there is never more than one ticker
//! feeding the worker loop, however often `start` is repeated. Disarming drops it.
//!
//! Cadence is best effort: a tick channel holds at most one pending tick, so a slow step
//! delays the next tick instead of queueing a burst.

use crossbeam_channel::Receiver;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct TickDriver {
    interval: Duration,
    ticker: Option<Receiver<Instant>>,
    /// Number of times the driver was armed, for diagnostics.
    arms: u64,
}

impl TickDriver {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            ticker: None,
            arms: 0,
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Cancels any running ticker, then starts a fresh one.
    pub fn arm(&mut self) {
        self.ticker = None;
        self.ticker = Some(crossbeam_channel::tick(self.interval));
        self.arms += 1;
    }

    /// Cancels the running ticker. Returns whether one was running.
    pub fn disarm(&mut self) -> bool {
        self.ticker.take().is_some()
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.ticker.is_some()
    }

    #[inline]
    pub fn arms(&self) -> u64 {
        self.arms
    }

    /// The live ticker, if armed.
    #[inline]
    pub fn receiver(&self) -> Option<&Receiver<Instant>> {
        self.ticker.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disarmed() {
        let driver = TickDriver::new(Duration::from_millis(16));
        assert!(!driver.is_armed());
        assert!(driver.receiver().is_none());
        assert_eq!(driver.arms(), 0);
    }

    #[test]
    fn rearming_replaces_the_ticker() {
        let mut driver = TickDriver::new(Duration::from_millis(5));
        driver.arm();
        let first = driver.receiver().cloned().unwrap();
        driver.arm();
        let second = driver.receiver().cloned().unwrap();

        assert!(driver.is_armed());
        assert_eq!(driver.arms(), 2);
        assert!(!first.same_channel(&second));

        // Only the latest ticker is reachable from the driver.
        assert!(driver.receiver().unwrap().same_channel(&second));
    }

    #[test]
    fn armed_driver_ticks_and_disarm_stops_it() {
        let mut driver = TickDriver::new(Duration::from_millis(5));
        driver.arm();

        let tick = driver
            .receiver()
            .unwrap()
            .recv_timeout(Duration::from_secs(1));
        assert!(tick.is_ok());

        assert!(driver.disarm());
        assert!(!driver.is_armed());
        assert!(!driver.disarm());
    }
}
