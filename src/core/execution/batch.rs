use super::config::{ConcurrencyMode, ShiftConfig};
use super::shift::{run_shift, ShiftReport};
use crate::core::config::KitchenConfig;
use crate::core::errors::ConfigError;
use log::{debug, info};
use rayon::prelude::*;

/// Run `count` independent shifts, shift `i` seeded with `seed + i`
///
/// Each shift owns its kitchen, so Rayon mode shares nothing between
/// workers and returns the same reports, in the same order, as Sequential.
pub fn run_shifts(
    kitchen_config: &KitchenConfig,
    shift: &ShiftConfig,
    count: usize,
) -> Result<Vec<ShiftReport>, ConfigError> {
    shift.validate()?;
    kitchen_config.validate()?;

    let shifts: Vec<ShiftConfig> = (0..count as u64)
        .map(|i| shift.clone().with_seed(shift.seed.wrapping_add(i)))
        .collect();

    info!(
        "[Batch] Running {} shifts ({:?}, seeds {}..)",
        count, shift.concurrency_mode, shift.seed
    );

    match shift.concurrency_mode {
        ConcurrencyMode::Sequential => shifts
            .iter()
            .map(|s| run_shift(kitchen_config, s))
            .collect(),
        ConcurrencyMode::Rayon => {
            let run = || {
                shifts
                    .par_iter()
                    .map(|s| run_shift(kitchen_config, s))
                    .collect::<Result<Vec<_>, _>>()
            };
            match shift.thread_pool_size {
                Some(size) => {
                    debug!("[Batch] Building pool with {} workers", size);
                    let pool = rayon::ThreadPoolBuilder::new()
                        .num_threads(size)
                        .build()
                        .map_err(|e| ConfigError::InvalidCount(format!("thread pool: {}", e)))?;
                    pool.install(run)
                }
                None => run(),
            }
        }
    }
}

/// Mean wallet across a batch, or zero for an empty batch
pub fn average_earnings(reports: &[ShiftReport]) -> f64 {
    if reports.is_empty() {
        return 0.0;
    }
    reports.iter().map(|r| r.wallet).sum::<f64>() / reports.len() as f64
}
