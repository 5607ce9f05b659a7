use crate::core::types::OrderId;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest quantity of either item a single ticket may ask for
pub const MAX_ITEMS_PER_ORDER: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Active,
    Completed,
    Expired,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "Pending"),
            OrderStatus::Active => write!(f, "Active"),
            OrderStatus::Completed => write!(f, "Completed"),
            OrderStatus::Expired => write!(f, "Expired"),
        }
    }
}

/// A timed customer request for burgers and fries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTicket {
    id: OrderId,
    burgers_wanted: u32,
    fries_wanted: u32,
    burger_unit_price: f64,
    fries_unit_price: f64,
    time_limit: f64,
    time_remaining: f64,
    status: OrderStatus,
}

impl OrderTicket {
    /// Create a pending ticket; quantities above the per-order cap are clamped
    pub fn new(
        id: OrderId,
        burgers: u32,
        fries: u32,
        time_limit: f64,
        burger_unit_price: f64,
        fries_unit_price: f64,
    ) -> Self {
        assert!(time_limit > 0.0, "time_limit must be positive, got {}", time_limit);
        Self {
            id,
            burgers_wanted: burgers.min(MAX_ITEMS_PER_ORDER),
            fries_wanted: fries.min(MAX_ITEMS_PER_ORDER),
            burger_unit_price,
            fries_unit_price,
            time_limit,
            time_remaining: time_limit,
            status: OrderStatus::Pending,
        }
    }

    /// Start the clock; has no effect unless the ticket is pending
    pub fn activate(&mut self) {
        if self.status == OrderStatus::Pending {
            self.status = OrderStatus::Active;
            info!("[Order {}] Activated: {}", self.id, self.description());
        }
    }

    /// Count the clock down; returns true on the tick that expires the ticket
    pub fn update_timer(&mut self, dt: f64) -> bool {
        if self.status != OrderStatus::Active {
            return false;
        }
        self.time_remaining -= dt;
        if self.time_remaining <= 0.0 {
            self.time_remaining = 0.0;
            self.status = OrderStatus::Expired;
            info!("[Order {}] Expired", self.id);
            return true;
        }
        false
    }

    pub fn complete(&mut self) -> bool {
        if self.status != OrderStatus::Active {
            return false;
        }
        self.status = OrderStatus::Completed;
        info!("[Order {}] Completed, payment ${:.2}", self.id, self.total_payment());
        true
    }

    /// Exact quantity match, no partial credit
    pub fn matches_delivery(&self, burgers: u32, fries: u32) -> bool {
        self.burgers_wanted == burgers && self.fries_wanted == fries
    }

    pub fn total_payment(&self) -> f64 {
        self.burgers_wanted as f64 * self.burger_unit_price
            + self.fries_wanted as f64 * self.fries_unit_price
    }

    /// Fraction of the time limit still left, in [0, 1]
    pub fn time_progress(&self) -> f64 {
        (self.time_remaining / self.time_limit).clamp(0.0, 1.0)
    }

    pub fn elapsed(&self) -> f64 {
        self.time_limit - self.time_remaining
    }

    pub fn description(&self) -> String {
        match (self.burgers_wanted, self.fries_wanted) {
            (0, 0) => "Empty Order".to_string(),
            (b, 0) if b > 1 => format!("{}x Burgers", b),
            (b, 0) => format!("{}x Burger", b),
            (0, f) => format!("{}x Fries", f),
            (b, f) => format!("{}x Burger + {}x Fries", b, f),
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn burgers_wanted(&self) -> u32 {
        self.burgers_wanted
    }

    pub fn fries_wanted(&self) -> u32 {
        self.fries_wanted
    }

    pub fn time_limit(&self) -> f64 {
        self.time_limit
    }

    pub fn time_remaining(&self) -> f64 {
        self.time_remaining
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == OrderStatus::Active
    }

    pub fn is_expired(&self) -> bool {
        self.status == OrderStatus::Expired
    }
}
