//! The kitchen host loop
//!
//! `Kitchen` owns every station and manager for one shift and advances them
//! together with `tick`. Interaction layers (a player, a scripted line cook,
//! tests) call its methods between ticks.

use crate::core::config::KitchenConfig;
use crate::core::cooking::container::Container;
use crate::core::cooking::cookable::{CookableItem, CookingState};
use crate::core::cooking::flip::{apply_outcome, FlipOutcome, FlipRejection, FlipSession, HitGrade};
use crate::core::errors::ConfigError;
use crate::core::holdable::{Hands, Trashed};
use crate::core::orders::book::OrderBook;
use crate::core::orders::ticket::OrderTicket;
use crate::core::payment::{PaymentBreakdown, PaymentEngine, PaymentRequest};
use crate::core::plating::dish::PlatedDish;
use crate::core::plating::tray::ServingTray;
use crate::core::stats::CareerStats;
use crate::core::types::FoodKind;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A heated slot in the kitchen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Station {
    Burner(usize),
    Fryer(usize),
}

/// Observer trait for kitchen events
pub trait KitchenObserver {
    fn on_order_taken(&mut self, _ticket: &OrderTicket) {}

    fn on_order_expired(&mut self, _ticket: &OrderTicket) {}

    fn on_food_burnt(&mut self, _station: Station, _kind: FoodKind) {}

    fn on_flip_resolved(&mut self, _burner: usize, _outcome: &FlipOutcome) {}

    fn on_served(&mut self, _receipt: &ServeReceipt) {}
}

/// Everything that happened during one `tick`
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub expired_orders: Vec<OrderTicket>,
    pub burnt: Vec<(Station, FoodKind)>,
    pub flip_outcome: Option<(usize, FlipOutcome)>,
}

/// Result of handing a tray through the ticket window
#[derive(Debug, Clone)]
pub struct ServeReceipt {
    /// The ticket the tray completed, if any matched
    pub ticket: Option<OrderTicket>,
    pub burgers: u32,
    pub fries: u32,
    pub payment: PaymentBreakdown,
}

impl ServeReceipt {
    pub fn is_match(&self) -> bool {
        self.ticket.is_some()
    }
}

struct ActiveFlip {
    burner: usize,
    session: FlipSession,
}

/// One kitchen: burners, fryer baskets, the cook's hands and the ticket rail
///
/// Everything advances through `tick`. Randomness comes from a single
/// seeded generator, so two kitchens built with the same config and seed
/// and driven the same way end up in the same state.
pub struct Kitchen {
    config: KitchenConfig,
    burners: Vec<Container>,
    baskets: Vec<Container>,
    hands: Hands,
    flip: Option<ActiveFlip>,
    orders: OrderBook,
    payment: PaymentEngine,
    stats: CareerStats,
    wallet: f64,
    elapsed: f64,
    rng: StdRng,
    observers: Vec<Box<dyn KitchenObserver>>,
}

impl Kitchen {
    /// Build a kitchen with hot pans on every burner and baskets in the fryer
    ///
    /// # Arguments
    /// * `config` - Station counts, cook profiles, order and payment settings
    /// * `seed` - Seed for order generation and tip rolls
    ///
    /// # Returns
    /// The kitchen, or the first `ConfigError` found in `config`
    pub fn new(config: KitchenConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let burners = (0..config.burners)
            .map(|_| {
                let mut pan = Container::pan();
                pan.set_on_heat_source(true);
                pan
            })
            .collect();
        let baskets = (0..config.fryer_baskets)
            .map(|_| {
                let mut basket = Container::basket();
                basket.set_on_heat_source(true);
                basket
            })
            .collect();

        info!(
            "[Kitchen] Opened with {} burners, {} fryer baskets (seed {})",
            config.burners, config.fryer_baskets, seed
        );

        Ok(Self {
            orders: OrderBook::new(config.orders.clone()),
            payment: PaymentEngine::new(
                config.payment.clone(),
                config.orders.burger_unit_price,
                config.orders.fries_unit_price,
            ),
            config,
            burners,
            baskets,
            hands: Hands::new(),
            flip: None,
            stats: CareerStats::new(),
            wallet: 0.0,
            elapsed: 0.0,
            rng: StdRng::seed_from_u64(seed),
            observers: Vec::new(),
        })
    }

    pub fn add_observer(&mut self, observer: Box<dyn KitchenObserver>) {
        self.observers.push(observer);
    }

    /// Pull the next ticket from the window, if the rail has room
    pub fn take_new_order(&mut self) -> Option<&OrderTicket> {
        let ticket = self.orders.take_new_order(&mut self.rng)?;
        for observer in &mut self.observers {
            observer.on_order_taken(ticket);
        }
        Some(ticket)
    }

    /// Put food in the pan on burner `index`; it comes back if the pan is full
    pub fn add_to_burner(&mut self, index: usize, item: CookableItem) -> Result<(), CookableItem> {
        match self.burners.get_mut(index) {
            Some(pan) => pan.try_add(item),
            None => Err(item),
        }
    }

    /// Take the food out of the pan on burner `index`
    ///
    /// Removing the item a flip round is playing on abandons the round.
    pub fn remove_from_burner(&mut self, index: usize) -> Option<CookableItem> {
        let item = self.burners.get_mut(index)?.remove()?;
        if self.flip.as_ref().map(|f| f.burner) == Some(index) {
            warn!("[Burner {}] Food removed mid-flip, round abandoned", index);
            self.flip = None;
        }
        Some(item)
    }

    pub fn add_to_fryer(&mut self, index: usize, item: CookableItem) -> Result<(), CookableItem> {
        match self.baskets.get_mut(index) {
            Some(basket) => basket.try_add(item),
            None => Err(item),
        }
    }

    pub fn remove_from_fryer(&mut self, index: usize) -> Option<CookableItem> {
        self.baskets.get_mut(index)?.remove()
    }

    pub fn burner(&self, index: usize) -> Option<&Container> {
        self.burners.get(index)
    }

    pub fn basket(&self, index: usize) -> Option<&Container> {
        self.baskets.get(index)
    }

    pub fn burners(&self) -> &[Container] {
        &self.burners
    }

    pub fn baskets(&self) -> &[Container] {
        &self.baskets
    }

    /// Start the flip minigame on the patty at burner `index`
    ///
    /// Only one round may run at a time and the cook needs empty hands.
    pub fn start_flip(&mut self, index: usize) -> Result<(), FlipRejection> {
        if self.flip.is_some() {
            return Err(FlipRejection::AlreadyActive);
        }
        let item = self
            .burners
            .get(index)
            .and_then(Container::contents)
            .ok_or(FlipRejection::EmptyStation)?;
        let session = FlipSession::start(item, &self.config.flip, !self.hands.is_empty())?;
        info!("[Burner {}] Flip round started on {}", index, item.name());
        self.flip = Some(ActiveFlip { burner: index, session });
        Ok(())
    }

    /// Press during the active flip round
    pub fn press_flip(&mut self) -> Option<HitGrade> {
        self.flip.as_mut()?.session.press()
    }

    pub fn flip_session(&self) -> Option<&FlipSession> {
        self.flip.as_ref().map(|f| &f.session)
    }

    pub fn flip_burner(&self) -> Option<usize> {
        self.flip.as_ref().map(|f| f.burner)
    }

    pub fn is_flipping(&self) -> bool {
        self.flip.is_some()
    }

    /// Advance every station, the flip round and the order rail by `dt`
    ///
    /// # Arguments
    /// * `dt` - Simulated seconds to advance; must not be negative
    ///
    /// # Returns
    /// What happened during the tick: expired tickets, food that burnt and
    /// the flip outcome if a round resolved
    ///
    /// # Panics
    /// Panics on a negative `dt`.
    pub fn tick(&mut self, dt: f64) -> TickReport {
        assert!(dt >= 0.0, "tick delta must not be negative, got {}", dt);
        let mut report = TickReport::default();

        for (index, pan) in self.burners.iter_mut().enumerate() {
            if tick_station(pan, dt) {
                report.burnt.push((Station::Burner(index), food_kind(pan)));
            }
        }
        for (index, basket) in self.baskets.iter_mut().enumerate() {
            if tick_station(basket, dt) {
                report.burnt.push((Station::Fryer(index), food_kind(basket)));
            }
        }

        if let Some(resolved) = self.advance_flip(dt) {
            let (burner, outcome) = resolved;
            if let Some(item) = self.burners.get_mut(burner).and_then(Container::contents_mut) {
                let was_burnt = item.is_burnt();
                apply_outcome(item, &outcome);
                if !was_burnt && item.is_burnt() {
                    report.burnt.push((Station::Burner(burner), item.kind()));
                }
            }
            report.flip_outcome = Some(resolved);
        }

        self.hands.tick(dt);

        report.expired_orders = self.orders.tick(dt);
        for ticket in &report.expired_orders {
            self.stats.record_expired();
            for observer in &mut self.observers {
                observer.on_order_expired(ticket);
            }
        }

        for (station, kind) in &report.burnt {
            self.stats.record_burnt_food(*kind);
            for observer in &mut self.observers {
                observer.on_food_burnt(*station, *kind);
            }
        }
        if let Some((burner, outcome)) = &report.flip_outcome {
            for observer in &mut self.observers {
                observer.on_flip_resolved(*burner, outcome);
            }
        }

        self.elapsed += dt;
        report
    }

    fn advance_flip(&mut self, dt: f64) -> Option<(usize, FlipOutcome)> {
        let active = self.flip.as_mut()?;
        let outcome = active.session.tick(dt)?;
        let burner = active.burner;
        self.flip = None;
        info!(
            "[Burner {}] Flip round {}: {} perfect, {} good, {:.1}s bonus",
            burner,
            if outcome.success { "passed" } else { "failed" },
            outcome.perfect_hits,
            outcome.good_hits,
            outcome.bonus_seconds
        );
        Some((burner, outcome))
    }

    /// Hand a tray through the ticket window
    ///
    /// A tray matching an active ticket completes it and is paid with the
    /// time bonus. Anything else is paid at unit prices and counts as a
    /// failed order; the tickets stay on the rail.
    ///
    /// # Arguments
    /// * `tray` - The tray to deliver; the window keeps it once accepted
    ///
    /// # Returns
    /// The receipt, or `Err(tray)` for an empty tray, which the window
    /// refuses without touching the wallet or stats
    pub fn serve_tray(&mut self, tray: ServingTray) -> Result<ServeReceipt, ServingTray> {
        if tray.is_empty() {
            debug!("[Kitchen] Refusing empty tray");
            return Err(tray);
        }
        let burgers = tray.burger_count() as u32;
        let fries = tray.fries_count() as u32;
        let ticket = self.orders.submit_delivery(burgers, fries);

        let payment = self.payment.compute_payment(
            PaymentRequest::Order {
                ticket: ticket.as_ref(),
                burgers,
                fries,
            },
            &mut self.rng,
        );

        match &ticket {
            Some(t) => self
                .stats
                .record_completed(payment.total, payment.tip, burgers, fries, t.elapsed()),
            None => {
                warn!("[Kitchen] Tray ({} burgers, {} fries) matches no order", burgers, fries);
                self.stats.record_failed(burgers, fries);
            }
        }
        self.wallet += payment.total;
        info!("[Kitchen] Earned ${:.2}, wallet ${:.2}", payment.total, self.wallet);

        let receipt = ServeReceipt {
            ticket,
            burgers,
            fries,
            payment,
        };
        for observer in &mut self.observers {
            observer.on_served(&receipt);
        }
        Ok(receipt)
    }

    /// Sell a single assembled burger at the window
    pub fn serve_dish(&mut self, dish: PlatedDish) -> Result<PaymentBreakdown, PlatedDish> {
        if !dish.is_complete() {
            debug!("[Kitchen] Refusing incomplete dish: {}", dish.name());
            return Err(dish);
        }
        let payment = self.payment.dish_payment(&dish, &mut self.rng);
        self.wallet += payment.total;
        info!("[Kitchen] Dish sold for ${:.2}, wallet ${:.2}", payment.total, self.wallet);
        Ok(payment)
    }

    pub fn hands(&self) -> &Hands {
        &self.hands
    }

    pub fn hands_mut(&mut self) -> &mut Hands {
        &mut self.hands
    }

    /// Use the trash can with whatever the cook is holding
    pub fn trash_held(&mut self) -> Option<Trashed> {
        self.hands.trash()
    }

    pub fn stats(&self) -> &CareerStats {
        &self.stats
    }

    pub fn orders(&self) -> &OrderBook {
        &self.orders
    }

    pub fn wallet(&self) -> f64 {
        self.wallet
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn config(&self) -> &KitchenConfig {
        &self.config
    }

    /// Seeded generator shared by everything random in this kitchen
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

/// Tick one station; true when its food burnt during this tick
fn tick_station(container: &mut Container, dt: f64) -> bool {
    let before = container.contents().map(CookableItem::state);
    container.tick(dt);
    let after = container.contents().map(CookableItem::state);
    before != Some(CookingState::Burnt) && after == Some(CookingState::Burnt)
}

fn food_kind(container: &Container) -> FoodKind {
    container
        .contents()
        .map(CookableItem::kind)
        .unwrap_or(FoodKind::Patty)
}
