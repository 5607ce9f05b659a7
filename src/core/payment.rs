//! Payment and tip calculation
//!
//! Two pricing policies exist. The per-dish policy rolls a weighted tip tier
//! whose odds improve with the perfect flip hits on the food. The per-order
//! policy pays the ticket's quoted total plus a tip that shrinks as the
//! ticket's clock runs down. Randomness is always injected by the caller.

use crate::core::config::PaymentConfig;
use crate::core::orders::ticket::OrderTicket;
use crate::core::plating::dish::PlatedDish;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Rarity tier of a per-dish tip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipTier {
    Common,
    Uncommon,
    Rare,
    VeryRare,
    Jackpot,
}

impl TipTier {
    /// Range the tip amount is drawn from
    pub fn tip_range(&self) -> Range<f64> {
        match self {
            TipTier::Common => 0.0..1.0,
            TipTier::Uncommon => 2.0..9.0,
            TipTier::Rare => 24.0..49.0,
            TipTier::VeryRare => 99.0..249.0,
            TipTier::Jackpot => 499.0..999.0,
        }
    }
}

impl fmt::Display for TipTier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TipTier::Common => write!(f, "Common"),
            TipTier::Uncommon => write!(f, "Uncommon"),
            TipTier::Rare => write!(f, "Rare"),
            TipTier::VeryRare => write!(f, "Very Rare"),
            TipTier::Jackpot => write!(f, "Jackpot"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentPolicy {
    /// Single plated dish at the window
    PerDish,
    /// Tray matched against an order ticket
    PerOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub policy: PaymentPolicy,
    pub base: f64,
    pub tip: f64,
    pub total: f64,
    pub tier: Option<TipTier>,
}

impl PaymentBreakdown {
    fn new(policy: PaymentPolicy, base: f64, tip: f64, tier: Option<TipTier>) -> Self {
        Self {
            policy,
            base,
            tip,
            total: base + tip,
            tier,
        }
    }
}

/// What is being paid for
#[derive(Debug, Clone, Copy)]
pub enum PaymentRequest<'a> {
    Dish {
        burnt: bool,
        perfect_hits: u32,
    },
    /// `ticket` is the matched ticket, or `None` for a delivery nobody ordered
    Order {
        ticket: Option<&'a OrderTicket>,
        burgers: u32,
        fries: u32,
    },
}

/// Downward shift of the tier thresholds earned by perfect hits
pub fn rarity_bonus(perfect_hits: u32) -> f64 {
    match perfect_hits {
        0 => 0.0,
        1 => 1.0,
        2 => 5.0,
        3 => 10.0,
        _ => 15.0,
    }
}

/// Classify a roll in `[0, 100)` into a tip tier
pub fn classify_roll(roll: f64, perfect_hits: u32) -> TipTier {
    let bonus = rarity_bonus(perfect_hits);
    if roll < 90.0 - bonus {
        TipTier::Common
    } else if roll < 95.0 - 0.6 * bonus {
        TipTier::Uncommon
    } else if roll < 97.5 - 0.3 * bonus {
        TipTier::Rare
    } else if roll < 98.5 - 0.2 * bonus {
        TipTier::VeryRare
    } else {
        TipTier::Jackpot
    }
}

/// Tip as a fraction of the order total, from the share of time left
pub fn tip_fraction(time_progress: f64) -> f64 {
    if time_progress >= 0.9 {
        0.5
    } else if time_progress >= 0.75 {
        0.35
    } else if time_progress >= 0.5 {
        0.20
    } else if time_progress >= 0.25 {
        0.10
    } else {
        0.0
    }
}

/// Prices dishes and trays
#[derive(Debug, Clone)]
pub struct PaymentEngine {
    config: PaymentConfig,
    burger_unit_price: f64,
    fries_unit_price: f64,
}

impl PaymentEngine {
    pub fn new(config: PaymentConfig, burger_unit_price: f64, fries_unit_price: f64) -> Self {
        Self {
            config,
            burger_unit_price,
            fries_unit_price,
        }
    }

    /// Price one delivery
    ///
    /// # Arguments
    /// * `request` - A single dish (per-dish policy) or a tray with the
    ///   ticket it matched, if any (per-order policy)
    /// * `rng` - Source for the rarity roll and tip amount; only the
    ///   per-dish policy draws from it
    ///
    /// # Returns
    /// The base, tip and total. Burnt dishes pay the fixed burnt rate with
    /// no tip; unmatched trays pay unit prices with no tip.
    pub fn compute_payment<R: Rng + ?Sized>(&self, request: PaymentRequest<'_>, rng: &mut R) -> PaymentBreakdown {
        let breakdown = match request {
            PaymentRequest::Dish { burnt: true, .. } => {
                PaymentBreakdown::new(PaymentPolicy::PerDish, self.config.burnt_payment, 0.0, None)
            }
            PaymentRequest::Dish { burnt: false, perfect_hits } => {
                let roll = rng.gen_range(0.0..100.0);
                let tier = classify_roll(roll, perfect_hits);
                let tip = rng.gen_range(tier.tip_range());
                debug!("[Payment] Roll {:.2} with {} perfect hits -> {} tip", roll, perfect_hits, tier);
                PaymentBreakdown::new(PaymentPolicy::PerDish, self.config.base_payment, tip, Some(tier))
            }
            PaymentRequest::Order { ticket: Some(ticket), .. } => {
                let base = ticket.total_payment();
                let tip = base * tip_fraction(ticket.time_progress());
                PaymentBreakdown::new(PaymentPolicy::PerOrder, base, tip, None)
            }
            PaymentRequest::Order { ticket: None, burgers, fries } => {
                let base = burgers as f64 * self.burger_unit_price + fries as f64 * self.fries_unit_price;
                PaymentBreakdown::new(PaymentPolicy::PerOrder, base, 0.0, None)
            }
        };
        debug!(
            "[Payment] {:?}: base ${:.2} + tip ${:.2} = ${:.2}",
            breakdown.policy, breakdown.base, breakdown.tip, breakdown.total
        );
        breakdown
    }

    /// Price a single plated dish
    pub fn dish_payment<R: Rng + ?Sized>(&self, dish: &PlatedDish, rng: &mut R) -> PaymentBreakdown {
        self.compute_payment(
            PaymentRequest::Dish {
                burnt: dish.has_burnt_food(),
                perfect_hits: dish.best_perfect_hits(),
            },
            rng,
        )
    }

    /// Fixed per-dish payouts
    pub fn config(&self) -> &PaymentConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CookProfile;
    use crate::core::cooking::cookable::CookableItem;
    use crate::core::plating::dish::LayerItem;
    use crate::core::types::OrderId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine() -> PaymentEngine {
        PaymentEngine::new(PaymentConfig::default(), 1.0, 0.5)
    }

    #[test]
    fn test_rarity_bonus_table() {
        let bonuses: Vec<f64> = (0..6).map(rarity_bonus).collect();
        assert_eq!(bonuses, vec![0.0, 1.0, 5.0, 10.0, 15.0, 15.0]);
    }

    #[test]
    fn test_tier_classification() {
        assert_eq!(classify_roll(50.0, 0), TipTier::Common);
        assert_eq!(classify_roll(99.9, 4), TipTier::Jackpot);
        assert_eq!(classify_roll(89.9, 0), TipTier::Common);
        assert_eq!(classify_roll(90.0, 0), TipTier::Uncommon);
        // bonus 15 moves the cutoffs to 75 / 86 / 93 / 95.5
        assert_eq!(classify_roll(80.0, 4), TipTier::Uncommon);
        assert_eq!(classify_roll(90.0, 4), TipTier::Rare);
        assert_eq!(classify_roll(95.0, 4), TipTier::VeryRare);
        assert_eq!(classify_roll(96.0, 4), TipTier::Jackpot);
    }

    #[test]
    fn test_thresholds_shrink_with_hits() {
        for roll in [75.0, 89.0, 94.0, 97.0, 98.0] {
            let low = classify_roll(roll, 0) as u8;
            let high = classify_roll(roll, 4) as u8;
            assert!(high >= low, "roll {} got rarer tier without bonus", roll);
        }
    }

    #[test]
    fn test_tip_lands_in_tier_range() {
        let engine = engine();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let payment = engine.compute_payment(PaymentRequest::Dish { burnt: false, perfect_hits: 2 }, &mut rng);
            let tier = payment.tier.unwrap();
            assert!(tier.tip_range().contains(&payment.tip));
            assert_eq!(payment.base, 1.0);
            assert_eq!(payment.total, payment.base + payment.tip);
        }
    }

    #[test]
    fn test_burnt_dish_pays_fixed_rate() {
        let mut patty = CookableItem::patty(&CookProfile::patty());
        patty.mark_burnt();
        let mut dish = PlatedDish::new();
        dish.add_layer(LayerItem::BottomBun);
        dish.add_layer(LayerItem::Cookable(patty));
        dish.add_layer(LayerItem::TopBun);

        let engine = engine();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let payment = engine.dish_payment(&dish, &mut rng);
            assert_eq!(payment.total, 0.5);
            assert_eq!(payment.tip, 0.0);
            assert_eq!(payment.tier, None);
        }
    }

    #[test]
    fn test_order_time_bonus() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut ticket = OrderTicket::new(OrderId::generate(&mut rng), 2, 2, 100.0, 1.0, 0.5);
        ticket.activate();
        ticket.update_timer(5.0);

        let engine = engine();
        let request = PaymentRequest::Order { ticket: Some(&ticket), burgers: 2, fries: 2 };
        let fast = engine.compute_payment(request, &mut rng);
        assert_eq!(fast.base, 3.0);
        assert_eq!(fast.tip, 1.5);
        assert_eq!(fast.total, 4.5);

        ticket.update_timer(60.0);
        let request = PaymentRequest::Order { ticket: Some(&ticket), burgers: 2, fries: 2 };
        let slow = engine.compute_payment(request, &mut rng);
        assert!((slow.tip - 0.3).abs() < 1e-9);

        ticket.update_timer(30.0);
        let request = PaymentRequest::Order { ticket: Some(&ticket), burgers: 2, fries: 2 };
        assert_eq!(engine.compute_payment(request, &mut rng).tip, 0.0);
    }

    #[test]
    fn test_unmatched_delivery_priced_at_unit_rates() {
        let mut rng = StdRng::seed_from_u64(0);
        let request = PaymentRequest::Order { ticket: None, burgers: 1, fries: 3 };
        let payment = engine().compute_payment(request, &mut rng);
        assert_eq!(payment.base, 2.5);
        assert_eq!(payment.tip, 0.0);
        assert_eq!(payment.policy, PaymentPolicy::PerOrder);
    }

    #[test]
    fn test_tip_fraction_steps() {
        assert_eq!(tip_fraction(1.0), 0.5);
        assert_eq!(tip_fraction(0.9), 0.5);
        assert_eq!(tip_fraction(0.8), 0.35);
        assert_eq!(tip_fraction(0.5), 0.20);
        assert_eq!(tip_fraction(0.3), 0.10);
        assert_eq!(tip_fraction(0.1), 0.0);
    }
}
