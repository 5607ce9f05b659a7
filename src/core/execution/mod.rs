pub mod batch;
pub mod config;
pub mod line_cook;
pub mod shift;

// Re-export commonly used types
pub use batch::{average_earnings, run_shifts};
pub use config::{ConcurrencyMode, ShiftConfig};
pub use line_cook::{CookTally, LineCook};
pub use shift::{run_shift, ShiftReport};
