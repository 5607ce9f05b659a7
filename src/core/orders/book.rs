use super::ticket::OrderTicket;
use crate::core::config::OrderGenerationConfig;
use crate::core::types::OrderId;
use log::{debug, info, warn};
use rand::Rng;
use rand_distr::{Distribution, WeightedIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OrderShape {
    BurgerOnly,
    FriesOnly,
    Mixed,
}

const SHAPES: [OrderShape; 3] = [OrderShape::BurgerOnly, OrderShape::FriesOnly, OrderShape::Mixed];

/// The rail of tickets the cook is currently working on
#[derive(Debug, Clone)]
pub struct OrderBook {
    config: OrderGenerationConfig,
    active_orders: Vec<OrderTicket>,
}

impl OrderBook {
    /// Create an empty rail
    pub fn new(config: OrderGenerationConfig) -> Self {
        Self {
            config,
            active_orders: Vec::new(),
        }
    }

    /// Generate and activate a new ticket
    ///
    /// # Arguments
    /// * `rng` - Source for the order shape, quantities and ticket id
    ///
    /// # Returns
    /// The new ticket, or `None` when the rail is full or every shape
    /// weight is zero
    pub fn take_new_order<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&OrderTicket> {
        if !self.has_capacity() {
            debug!(
                "[OrderBook] No capacity ({}/{})",
                self.active_orders.len(),
                self.config.max_active_orders
            );
            return None;
        }

        let shape = self.draw_shape(rng)?;
        let (burgers, fries) = match shape {
            OrderShape::BurgerOnly => (self.draw_burgers(rng), 0),
            OrderShape::FriesOnly => (0, self.draw_fries(rng)),
            OrderShape::Mixed => (self.draw_burgers(rng), self.draw_fries(rng)),
        };

        let mut ticket = OrderTicket::new(
            OrderId::generate(rng),
            burgers,
            fries,
            self.config.time_limit,
            self.config.burger_unit_price,
            self.config.fries_unit_price,
        );
        ticket.activate();
        info!("[OrderBook] New order: {}", ticket.description());
        self.active_orders.push(ticket);
        self.active_orders.last()
    }

    /// Hand over the first active ticket matching the delivery exactly
    ///
    /// # Arguments
    /// * `burgers` - Burgers on the delivered tray
    /// * `fries` - Fries on the delivered tray
    ///
    /// # Returns
    /// The completed ticket, removed from the rail, or `None` if no ticket
    /// wants exactly that delivery
    pub fn submit_delivery(&mut self, burgers: u32, fries: u32) -> Option<OrderTicket> {
        let index = self
            .active_orders
            .iter()
            .position(|t| t.is_active() && t.matches_delivery(burgers, fries))?;
        let mut ticket = self.active_orders.remove(index);
        ticket.complete();
        Some(ticket)
    }

    /// Run every ticket's clock and sweep out the ones that expired
    pub fn tick(&mut self, dt: f64) -> Vec<OrderTicket> {
        for ticket in &mut self.active_orders {
            ticket.update_timer(dt);
        }

        let (expired, active): (Vec<_>, Vec<_>) = self
            .active_orders
            .drain(..)
            .partition(OrderTicket::is_expired);
        self.active_orders = active;

        for ticket in &expired {
            warn!("[OrderBook] Order expired: {}", ticket.description());
        }
        expired
    }

    pub fn active_orders(&self) -> &[OrderTicket] {
        &self.active_orders
    }

    pub fn len(&self) -> usize {
        self.active_orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active_orders.is_empty()
    }

    pub fn has_capacity(&self) -> bool {
        self.active_orders.len() < self.config.max_active_orders
    }

    pub fn config(&self) -> &OrderGenerationConfig {
        &self.config
    }

    fn draw_shape<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<OrderShape> {
        let weights = [
            self.config.burger_only_weight,
            self.config.fries_only_weight,
            self.config.mixed_weight,
        ];
        match WeightedIndex::new(weights) {
            Ok(dist) => Some(SHAPES[dist.sample(rng)]),
            Err(e) => {
                warn!("[OrderBook] Cannot pick an order shape: {}", e);
                None
            }
        }
    }

    fn draw_burgers<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        draw_quantity(rng, self.config.min_burgers, self.config.max_burgers)
    }

    fn draw_fries<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        draw_quantity(rng, self.config.min_fries, self.config.max_fries)
    }
}

/// Uniform draw in `[min, max]`; an inverted range yields `min`
fn draw_quantity<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    let quantity = if min < max { rng.gen_range(min..=max) } else { min };
    quantity.clamp(1, super::ticket::MAX_ITEMS_PER_ORDER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn book(max: usize) -> OrderBook {
        OrderBook::new(OrderGenerationConfig::default().with_max_active_orders(max))
    }

    #[test]
    fn test_capacity_cycle() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut book = book(1);

        let (burgers, fries) = {
            let ticket = book.take_new_order(&mut rng).unwrap();
            assert!(ticket.is_active());
            (ticket.burgers_wanted(), ticket.fries_wanted())
        };
        assert!(book.take_new_order(&mut rng).is_none());

        let completed = book.submit_delivery(burgers, fries).unwrap();
        assert!(!completed.is_active());
        assert!(book.is_empty());
        assert!(book.take_new_order(&mut rng).is_some());
    }

    #[test]
    fn test_zero_capacity_never_generates() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut book = book(0);
        for _ in 0..5 {
            assert!(book.take_new_order(&mut rng).is_none());
        }
    }

    #[test]
    fn test_generated_quantities_follow_shape() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = OrderGenerationConfig::default()
            .with_max_active_orders(500)
            .with_shape_weights(1.0, 0.0, 0.0);
        let mut book = OrderBook::new(config);
        for _ in 0..50 {
            let t = book.take_new_order(&mut rng).unwrap();
            assert!((1..=3).contains(&t.burgers_wanted()));
            assert_eq!(t.fries_wanted(), 0);
        }

        let config = OrderGenerationConfig::default()
            .with_max_active_orders(500)
            .with_shape_weights(0.0, 0.0, 1.0)
            .with_fries_range(2, 2);
        let mut book = OrderBook::new(config);
        for _ in 0..50 {
            let t = book.take_new_order(&mut rng).unwrap();
            assert!(t.burgers_wanted() >= 1);
            assert_eq!(t.fries_wanted(), 2);
        }
    }

    #[test]
    fn test_zero_weights_degrade_to_no_order() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = OrderGenerationConfig::default().with_shape_weights(0.0, 0.0, 0.0);
        let mut book = OrderBook::new(config);
        assert!(book.take_new_order(&mut rng).is_none());
        assert!(book.is_empty());
    }

    #[test]
    fn test_first_match_wins() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = OrderGenerationConfig::default()
            .with_shape_weights(1.0, 0.0, 0.0)
            .with_burger_range(2, 2);
        let mut book = OrderBook::new(config);
        let first = book.take_new_order(&mut rng).unwrap().id();
        let second = book.take_new_order(&mut rng).unwrap().id();
        assert_ne!(first, second);

        assert!(book.submit_delivery(1, 0).is_none());
        assert_eq!(book.len(), 2);
        assert_eq!(book.submit_delivery(2, 0).unwrap().id(), first);
        assert_eq!(book.active_orders()[0].id(), second);
    }

    #[test]
    fn test_expired_orders_swept_once() {
        let mut rng = StdRng::seed_from_u64(5);
        let config = OrderGenerationConfig::default().with_time_limit(10.0);
        let mut book = OrderBook::new(config);
        book.take_new_order(&mut rng).unwrap();

        assert!(book.tick(9.0).is_empty());
        let expired = book.tick(2.0);
        assert_eq!(expired.len(), 1);
        assert!(expired[0].is_expired());
        assert!(book.is_empty());
        assert!(book.tick(2.0).is_empty());
    }

    #[test]
    fn test_inverted_range_uses_min() {
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(draw_quantity(&mut rng, 2, 1), 2);
        assert_eq!(draw_quantity(&mut rng, 0, 0), 1);
        assert_eq!(draw_quantity(&mut rng, 5, 7), 3);
    }
}
