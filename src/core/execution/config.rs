//! Configuration for running scripted shifts
//!
//! A shift drives one `Kitchen` with a scripted line cook for a fixed span
//! of simulated time. Batches of shifts can be spread over a Rayon pool.

use crate::core::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// How a batch of shifts is executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConcurrencyMode {
    /// One shift after another on the calling thread
    #[default]
    Sequential,
    /// Shifts run concurrently on a Rayon thread pool
    Rayon,
}

/// Settings for one shift (or each shift of a batch)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftConfig {
    /// Simulated shift length in seconds
    pub duration: f64,
    /// Fixed time step per tick
    pub dt: f64,
    /// Seed of the first shift; shift `i` of a batch uses `seed + i`
    pub seed: u64,
    pub concurrency_mode: ConcurrencyMode,
    /// Worker count for Rayon mode; the global pool is used when unset
    pub thread_pool_size: Option<usize>,
    /// Standard deviation of the line cook's press timing error, in seconds
    pub cook_skill_sigma: f64,
    /// Seconds the line cook waits before pulling another ticket while busy
    pub order_interval: f64,
}

impl ShiftConfig {
    /// Default shift: ten simulated minutes at 20 ticks per second
    pub fn new() -> Self {
        Self {
            duration: 600.0,
            dt: 0.05,
            seed: 42,
            concurrency_mode: ConcurrencyMode::default(),
            thread_pool_size: None,
            cook_skill_sigma: 0.01,
            order_interval: 30.0,
        }
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }

    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_concurrency(mut self, mode: ConcurrencyMode) -> Self {
        self.concurrency_mode = mode;
        self
    }

    /// Only affects execution when `concurrency_mode` is Rayon
    pub fn with_thread_pool_size(mut self, size: usize) -> Self {
        self.thread_pool_size = Some(size);
        self
    }

    pub fn with_cook_skill_sigma(mut self, sigma: f64) -> Self {
        self.cook_skill_sigma = sigma;
        self
    }

    pub fn with_order_interval(mut self, seconds: f64) -> Self {
        self.order_interval = seconds;
        self
    }

    /// Number of ticks a shift runs for
    pub fn tick_count(&self) -> u64 {
        // tolerance keeps 600 / 0.05 from rounding up to an extra tick
        (self.duration / self.dt - 1e-9).ceil() as u64
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.duration > 0.0) {
            return Err(ConfigError::NonPositiveDuration("shift duration".to_string()));
        }
        if !(self.dt > 0.0) {
            return Err(ConfigError::NonPositiveDuration("shift time step".to_string()));
        }
        if self.dt > self.duration {
            return Err(ConfigError::InvalidRange(format!(
                "time step {} exceeds shift duration {}",
                self.dt, self.duration
            )));
        }
        if !(self.cook_skill_sigma >= 0.0) || !self.cook_skill_sigma.is_finite() {
            return Err(ConfigError::NegativeValue("cook skill sigma".to_string()));
        }
        if !(self.order_interval >= 0.0) {
            return Err(ConfigError::NegativeValue("order interval".to_string()));
        }
        if self.thread_pool_size == Some(0) {
            return Err(ConfigError::InvalidCount("thread pool needs at least one worker".to_string()));
        }
        Ok(())
    }
}

impl Default for ShiftConfig {
    fn default() -> Self {
        Self::new()
    }
}
