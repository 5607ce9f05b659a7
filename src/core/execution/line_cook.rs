//! Scripted line cook
//!
//! `LineCook` plays a shift the way a competent player would. It pulls
//! tickets, cooks only what the current ticket still needs, plays the flip
//! minigame with a normally distributed timing error, salts fries and serves
//! the tray once it matches. Flipping and salting are modal: while either
//! runs the cook does nothing else.

use super::config::ShiftConfig;
use crate::core::cooking::cookable::{CookableItem, CookingState};
use crate::core::cooking::flip::FlipSession;
use crate::core::cooking::ingredients::RawIngredient;
use crate::core::cooking::salting::{SaltingSession, SaltingStatus, ShakeSide};
use crate::core::errors::ConfigError;
use crate::core::holdable::Holdable;
use crate::core::kitchen::Kitchen;
use crate::core::plating::dish::{LayerItem, PlatedDish};
use crate::core::plating::tray::{CookedFries, ServingTray};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Seconds between salt shakes, well inside the shake timeout
const SHAKE_INTERVAL: f64 = 0.25;

/// Offset separating the cook's generator from the kitchen's
const COOK_SEED_OFFSET: u64 = 0x5eed_c00c;

/// What the line cook did during a shift
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CookTally {
    pub flips_passed: u32,
    pub flips_failed: u32,
    pub fries_salted: u32,
    pub items_trashed: u32,
    pub trays_served: u32,
    pub trays_dumped: u32,
}

struct SaltingJob {
    session: SaltingSession,
    fries: CookedFries,
    next_side: ShakeSide,
    since_last_shake: f64,
}

pub struct LineCook {
    timing_error: Normal<f64>,
    rng: StdRng,
    order_interval: f64,
    since_last_order: f64,
    tray: ServingTray,
    salting: Option<SaltingJob>,
    pending_press: Option<f64>,
    tally: CookTally,
}

impl LineCook {
    pub fn new(shift: &ShiftConfig, tray: ServingTray) -> Result<Self, ConfigError> {
        let timing_error = Normal::new(0.0, shift.cook_skill_sigma)
            .map_err(|e| ConfigError::NegativeValue(format!("cook skill sigma: {}", e)))?;
        Ok(Self {
            timing_error,
            rng: StdRng::seed_from_u64(shift.seed.wrapping_add(COOK_SEED_OFFSET)),
            order_interval: shift.order_interval,
            since_last_order: 0.0,
            tray,
            salting: None,
            pending_press: None,
            tally: CookTally::default(),
        })
    }

    pub fn tally(&self) -> &CookTally {
        &self.tally
    }

    pub fn tray(&self) -> &ServingTray {
        &self.tray
    }

    /// Act, then advance the kitchen by exactly `dt`
    pub fn step(&mut self, kitchen: &mut Kitchen, dt: f64) {
        if kitchen.is_flipping() {
            self.play_flip(kitchen, dt);
        } else if self.salting.is_some() {
            self.salt(kitchen, dt);
        } else {
            self.work_line(kitchen);
            if kitchen.is_flipping() {
                self.play_flip(kitchen, dt);
            } else {
                self.advance(kitchen, dt);
            }
        }
    }

    fn advance(&mut self, kitchen: &mut Kitchen, dt: f64) {
        let report = kitchen.tick(dt);
        self.since_last_order += dt;
        if let Some((_, outcome)) = report.flip_outcome {
            if outcome.success {
                self.tally.flips_passed += 1;
            } else {
                self.tally.flips_failed += 1;
            }
        }
    }

    fn work_line(&mut self, kitchen: &mut Kitchen) {
        self.take_orders(kitchen);
        let target = self.target(kitchen);

        self.collect_patties(kitchen, target);
        self.collect_fries(kitchen, target);
        if self.salting.is_some() {
            return;
        }

        let Some((burgers, fries)) = target else {
            return;
        };
        if self.tray.burger_count() as u32 == burgers && self.tray.fries_count() as u32 == fries {
            let tray = std::mem::replace(&mut self.tray, empty_tray_like(kitchen));
            match kitchen.serve_tray(tray) {
                Ok(_) => self.tally.trays_served += 1,
                Err(tray) => self.tray = tray,
            }
            return;
        }

        if let Some(burner) = flippable_burner(kitchen) {
            if kitchen.start_flip(burner).is_ok() {
                return;
            }
        }
        self.start_patties(kitchen, burgers);
        if flippable_burner(kitchen).is_none() {
            self.start_fries(kitchen, fries);
        }
    }

    fn take_orders(&mut self, kitchen: &mut Kitchen) {
        let idle = kitchen.orders().is_empty();
        if idle || self.since_last_order >= self.order_interval {
            if kitchen.take_new_order().is_some() {
                self.since_last_order = 0.0;
            }
        }
    }

    /// First ticket the tray can still grow into; dumps a tray nobody wants
    fn target(&mut self, kitchen: &Kitchen) -> Option<(u32, u32)> {
        let on_tray = (self.tray.burger_count() as u32, self.tray.fries_count() as u32);
        let target = kitchen
            .orders()
            .active_orders()
            .iter()
            .map(|t| (t.burgers_wanted(), t.fries_wanted()))
            .find(|(b, f)| on_tray.0 <= *b && on_tray.1 <= *f);

        if target.is_none() && !self.tray.is_empty() && !kitchen.orders().is_empty() {
            info!("[LineCook] Tray fits no open order, dumping {}", self.tray.name());
            self.tray.clear();
            self.tally.trays_dumped += 1;
        }
        target
    }

    fn collect_patties(&mut self, kitchen: &mut Kitchen, target: Option<(u32, u32)>) {
        for burner in 0..kitchen.burners().len() {
            let done = kitchen
                .burner(burner)
                .and_then(|pan| pan.contents())
                .map_or(false, |p| matches!(p.state(), CookingState::Cooked | CookingState::Burnt));
            if !done {
                continue;
            }
            let Some(patty) = kitchen.remove_from_burner(burner) else {
                continue;
            };

            let wanted = target.map_or(true, |(b, _)| (self.tray.burger_count() as u32) < b);
            if patty.is_burnt() || !wanted {
                self.discard(kitchen, patty);
                continue;
            }

            let mut dish = PlatedDish::new();
            dish.add_layer(LayerItem::BottomBun);
            dish.add_layer(LayerItem::Cookable(patty));
            dish.add_layer(LayerItem::TopBun);
            if let Err(dish) = self.tray.try_add_burger(dish) {
                debug!("[LineCook] No room for {}", dish.name());
                self.tally.items_trashed += 1;
            }
        }
    }

    fn collect_fries(&mut self, kitchen: &mut Kitchen, target: Option<(u32, u32)>) {
        for basket in 0..kitchen.baskets().len() {
            if self.salting.is_some() {
                return;
            }
            let done = kitchen
                .basket(basket)
                .and_then(|b| b.contents())
                .map_or(false, |f| matches!(f.state(), CookingState::Cooked | CookingState::Burnt));
            if !done {
                continue;
            }
            let Some(item) = kitchen.remove_from_fryer(basket) else {
                continue;
            };

            let wanted = target.map_or(true, |(_, f)| (self.tray.fries_count() as u32) < f);
            match CookedFries::from_cookable(item) {
                Ok(fries) if !fries.is_burnt() && wanted => {
                    match SaltingSession::start(&fries, &kitchen.config().salting) {
                        Ok(session) => {
                            self.salting = Some(SaltingJob {
                                session,
                                fries,
                                next_side: ShakeSide::Left,
                                since_last_shake: 0.0,
                            });
                        }
                        Err(_) => self.plate_fries(kitchen, fries),
                    }
                }
                Ok(fries) => {
                    if kitchen.hands_mut().pick_up(Holdable::Fries(fries)).is_ok() {
                        kitchen.trash_held();
                    }
                    self.tally.items_trashed += 1;
                }
                Err(item) => self.discard(kitchen, item),
            }
        }
    }

    fn start_patties(&mut self, kitchen: &mut Kitchen, burgers: u32) {
        let cooking = kitchen
            .burners()
            .iter()
            .filter(|pan| pan.contents().map_or(false, |p| !p.is_burnt()))
            .count() as u32;
        let mut needed = burgers.saturating_sub(self.tray.burger_count() as u32 + cooking);

        for burner in 0..kitchen.burners().len() {
            if needed == 0 {
                break;
            }
            if kitchen.burner(burner).map_or(false, |pan| pan.is_empty()) {
                let patty = RawIngredient::Meat.prepare(kitchen.config());
                if kitchen.add_to_burner(burner, patty).is_ok() {
                    needed -= 1;
                }
            }
        }
    }

    fn start_fries(&mut self, kitchen: &mut Kitchen, fries: u32) {
        let cooking = kitchen
            .baskets()
            .iter()
            .filter(|basket| basket.contents().map_or(false, |f| !f.is_burnt()))
            .count() as u32;
        let mut needed = fries.saturating_sub(self.tray.fries_count() as u32 + cooking);

        for basket in 0..kitchen.baskets().len() {
            if needed == 0 {
                break;
            }
            if kitchen.basket(basket).map_or(false, |b| b.is_empty()) {
                let potato = RawIngredient::Potato.prepare(kitchen.config());
                if kitchen.add_to_fryer(basket, potato).is_ok() {
                    needed -= 1;
                }
            }
        }
    }

    /// Play the flip round, pressing at sub-tick precision
    fn play_flip(&mut self, kitchen: &mut Kitchen, dt: f64) {
        let half_track = kitchen.config().flip.track_length / 2.0;
        let mut left = dt;

        while left > 0.0 {
            let wait = match kitchen.flip_session() {
                Some(session) if session.is_playing() && !session.pressed_this_sweep() => {
                    match self.pending_press {
                        Some(wait) => wait,
                        None => self.plan_press(session, half_track),
                    }
                }
                _ => {
                    self.pending_press = None;
                    self.advance(kitchen, left);
                    return;
                }
            };

            if wait <= left {
                self.advance(kitchen, wait);
                kitchen.press_flip();
                self.pending_press = None;
                left -= wait;
            } else {
                self.advance(kitchen, left);
                self.pending_press = Some(wait - left);
                left = 0.0;
            }
        }
    }

    /// Seconds until the cook presses during the current sweep
    fn plan_press(&mut self, session: &FlipSession, half_track: f64) -> f64 {
        let speed = session.speed();
        let to_target = ((session.target_position() - session.marker_position()) / speed).max(0.0);
        let to_wrap = ((half_track - session.marker_position()) / speed).max(0.0);
        let error = self.timing_error.sample(&mut self.rng);
        (to_target + error).clamp(0.0, to_wrap * 0.99)
    }

    fn salt(&mut self, kitchen: &mut Kitchen, dt: f64) {
        self.advance(kitchen, dt);
        let Some(job) = self.salting.as_mut() else {
            return;
        };

        job.since_last_shake += dt;
        if job.since_last_shake >= SHAKE_INTERVAL {
            job.session.shake(job.next_side);
            job.next_side = match job.next_side {
                ShakeSide::Left => ShakeSide::Right,
                ShakeSide::Right => ShakeSide::Left,
            };
            job.since_last_shake = 0.0;
        }
        if job.session.tick(dt) == SaltingStatus::InProgress {
            return;
        }

        if let Some(mut job) = self.salting.take() {
            if job.session.finish(&mut job.fries) {
                self.tally.fries_salted += 1;
            }
            self.plate_fries(kitchen, job.fries);
        }
    }

    fn plate_fries(&mut self, kitchen: &mut Kitchen, fries: CookedFries) {
        if let Err(fries) = self.tray.try_add_fries(fries) {
            if kitchen.hands_mut().pick_up(Holdable::Fries(fries)).is_ok() {
                kitchen.trash_held();
            }
            self.tally.items_trashed += 1;
        }
    }

    fn discard(&mut self, kitchen: &mut Kitchen, item: CookableItem) {
        let held = Holdable::LooseFood(LayerItem::Cookable(item));
        if kitchen.hands_mut().pick_up(held).is_ok() {
            kitchen.trash_held();
        }
        self.tally.items_trashed += 1;
    }
}

fn flippable_burner(kitchen: &Kitchen) -> Option<usize> {
    kitchen.burners().iter().position(|pan| {
        pan.contents().map_or(false, |p| {
            p.is_on_heat() && p.state() == CookingState::Cooking && !p.has_been_flipped()
        })
    })
}

fn empty_tray_like(kitchen: &Kitchen) -> ServingTray {
    let config = kitchen.config();
    ServingTray::new(config.tray_max_burgers, config.tray_max_fries)
}
