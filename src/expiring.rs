//! A value that stops being visible after a fixed dwell time.
//!
//! The view polls [`Expiring::get`]; nothing here spawns timers.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expiring<T> {
    value: T,
    expires_at: Instant,
}

impl<T> Expiring<T> {
    #[must_use]
    pub fn new(value: T, ttl: Duration) -> Self {
        Self::new_at(value, ttl, Instant::now())
    }

    /// Internal clock variant, for deterministic tests.
    #[must_use]
    pub fn new_at(value: T, ttl: Duration, now: Instant) -> Self {
        Self { value, expires_at: now + ttl }
    }

    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.get_at(Instant::now())
    }

    #[must_use]
    pub fn get_at(&self, now: Instant) -> Option<&T> {
        (!self.is_expired_at(now)).then_some(&self.value)
    }

    #[must_use]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    #[must_use]
    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }
}

#[cfg(test)]
#[path = "expiring_test.rs"]
mod tests;
