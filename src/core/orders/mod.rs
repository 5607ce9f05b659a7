pub mod book;
pub mod ticket;

// Re-export commonly used types
pub use book::OrderBook;
pub use ticket::{OrderStatus, OrderTicket, MAX_ITEMS_PER_ORDER};
