pub mod dish;
pub mod tray;

// Re-export commonly used types
pub use dish::{LayerItem, PlatedDish};
pub use tray::{CookedFries, ServingTray};
