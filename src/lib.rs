pub mod core;

// Re-export commonly used types
pub use crate::core::config::{
    CookProfile, FlipConfig, KitchenConfig, OrderGenerationConfig, PaymentConfig, SaltingConfig,
};
pub use crate::core::cooking::{CookableItem, CookingState, FlipOutcome, FlipSession};
pub use crate::core::errors::ConfigError;
pub use crate::core::execution::{run_shift, run_shifts, ConcurrencyMode, ShiftConfig, ShiftReport};
pub use crate::core::kitchen::{Kitchen, KitchenObserver, ServeReceipt, Station, TickReport};
pub use crate::core::orders::{OrderBook, OrderTicket};
pub use crate::core::payment::{PaymentBreakdown, PaymentEngine, TipTier};
pub use crate::core::plating::{LayerItem, PlatedDish, ServingTray};
pub use crate::core::stats::{CareerStats, Grade};
pub use crate::core::types::{FoodKind, ItemId, OrderId};
