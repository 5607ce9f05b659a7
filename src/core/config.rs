//! Kitchen configuration
//!
//! Plain data structs with `Default` values taken from the shipped game
//! tuning, chained `with_*` builders and a `validate()` pass that the
//! `Kitchen` runs before it accepts a configuration.

use crate::core::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Cooking timings for one kind of food
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CookProfile {
    /// Seconds on heat before the item is cooked
    pub cook_duration: f64,
    /// Seconds a cooked item survives on heat before burning
    pub burn_duration: f64,
    /// Default burn protection granted by a plain flip
    pub flip_bonus: f64,
    /// Cook time added to the clock when the item is flipped
    pub flip_cook_penalty: f64,
}

impl CookProfile {
    /// Burger patty timings
    pub fn patty() -> Self {
        Self {
            cook_duration: 5.0,
            burn_duration: 3.0,
            flip_bonus: 3.0,
            flip_cook_penalty: 0.0,
        }
    }

    /// Fryer timings; fries are never flipped
    pub fn fries() -> Self {
        Self {
            cook_duration: 4.0,
            burn_duration: 2.0,
            flip_bonus: 0.0,
            flip_cook_penalty: 0.0,
        }
    }

    pub fn with_cook_duration(mut self, seconds: f64) -> Self {
        self.cook_duration = seconds;
        self
    }

    pub fn with_burn_duration(mut self, seconds: f64) -> Self {
        self.burn_duration = seconds;
        self
    }

    pub fn with_flip_cook_penalty(mut self, seconds: f64) -> Self {
        self.flip_cook_penalty = seconds;
        self
    }

    pub fn validate(&self, label: &str) -> Result<(), ConfigError> {
        if self.cook_duration <= 0.0 {
            return Err(ConfigError::NonPositiveDuration(format!("{} cook duration", label)));
        }
        if self.burn_duration <= 0.0 {
            return Err(ConfigError::NonPositiveDuration(format!("{} burn duration", label)));
        }
        if self.flip_bonus < 0.0 || self.flip_cook_penalty < 0.0 {
            return Err(ConfigError::NegativeValue(format!("{} flip timings", label)));
        }
        Ok(())
    }
}

/// Tuning for the flip timing minigame
///
/// Track positions are in abstract track units; the marker sweeps from
/// `-track_length / 2` to `+track_length / 2` and wraps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlipConfig {
    /// Starting marker speed in track units per second
    pub indicator_speed: f64,
    /// Speed gained on a perfect hit (half of it on a good hit)
    pub speed_increase: f64,
    /// Number of attempts in one round
    pub flips_required: u32,
    pub track_length: f64,
    /// Position of the perfect line
    pub target_position: f64,
    /// Centre of the good zone
    pub good_zone_center: f64,
    pub good_zone_half_width: f64,
    pub indicator_half_width: f64,
    pub perfect_tolerance: f64,
    /// Burn protection seconds per perfect hit
    pub perfect_bonus: f64,
    /// Burn protection seconds per good hit
    pub good_bonus: f64,
    /// Fraction of attempts that must hit for the round to succeed
    pub success_ratio: f64,
    /// Seconds the result is shown before it is applied
    pub resolve_delay: f64,
}

impl Default for FlipConfig {
    fn default() -> Self {
        Self {
            indicator_speed: 400.0,
            speed_increase: 75.0,
            flips_required: 4,
            track_length: 600.0,
            target_position: 0.0,
            good_zone_center: 0.0,
            good_zone_half_width: 60.0,
            indicator_half_width: 10.0,
            perfect_tolerance: 15.0,
            perfect_bonus: 2.0,
            good_bonus: 1.0,
            success_ratio: 0.75,
            resolve_delay: 2.0,
        }
    }
}

impl FlipConfig {
    pub fn with_flips_required(mut self, flips: u32) -> Self {
        self.flips_required = flips;
        self
    }

    pub fn with_resolve_delay(mut self, seconds: f64) -> Self {
        self.resolve_delay = seconds;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.flips_required == 0 {
            return Err(ConfigError::InvalidCount("flips required must be at least 1".to_string()));
        }
        if self.indicator_speed <= 0.0 || self.track_length <= 0.0 {
            return Err(ConfigError::NonPositiveDuration("flip marker speed and track length".to_string()));
        }
        if self.speed_increase < 0.0
            || self.perfect_tolerance < 0.0
            || self.good_zone_half_width < 0.0
            || self.indicator_half_width < 0.0
            || self.perfect_bonus < 0.0
            || self.good_bonus < 0.0
            || self.resolve_delay < 0.0
        {
            return Err(ConfigError::NegativeValue("flip minigame tuning".to_string()));
        }
        if !(0.0..=1.0).contains(&self.success_ratio) {
            return Err(ConfigError::InvalidRange(format!("flip success ratio {}", self.success_ratio)));
        }
        Ok(())
    }
}

/// Tuning for the fry salting minigame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaltingConfig {
    pub shakes_required: u32,
    /// Longest allowed pause between shakes once salting has begun
    pub shake_timeout: f64,
}

impl Default for SaltingConfig {
    fn default() -> Self {
        Self {
            shakes_required: 10,
            shake_timeout: 0.8,
        }
    }
}

impl SaltingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shakes_required == 0 {
            return Err(ConfigError::InvalidCount("shakes required must be at least 1".to_string()));
        }
        if self.shake_timeout <= 0.0 {
            return Err(ConfigError::NonPositiveDuration("shake timeout".to_string()));
        }
        Ok(())
    }
}

/// How the order book draws new tickets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderGenerationConfig {
    pub max_active_orders: usize,
    pub min_burgers: u32,
    pub max_burgers: u32,
    pub min_fries: u32,
    pub max_fries: u32,
    /// Relative weight of burger-only orders
    pub burger_only_weight: f64,
    /// Relative weight of fries-only orders
    pub fries_only_weight: f64,
    /// Relative weight of burgers-and-fries orders
    pub mixed_weight: f64,
    pub time_limit: f64,
    pub burger_unit_price: f64,
    pub fries_unit_price: f64,
}

impl Default for OrderGenerationConfig {
    fn default() -> Self {
        Self {
            max_active_orders: 3,
            min_burgers: 1,
            max_burgers: 3,
            min_fries: 1,
            max_fries: 3,
            burger_only_weight: 0.4,
            fries_only_weight: 0.2,
            mixed_weight: 0.4,
            time_limit: 180.0,
            burger_unit_price: 1.00,
            fries_unit_price: 0.50,
        }
    }
}

impl OrderGenerationConfig {
    pub fn with_max_active_orders(mut self, max: usize) -> Self {
        self.max_active_orders = max;
        self
    }

    pub fn with_burger_range(mut self, min: u32, max: u32) -> Self {
        self.min_burgers = min;
        self.max_burgers = max;
        self
    }

    pub fn with_fries_range(mut self, min: u32, max: u32) -> Self {
        self.min_fries = min;
        self.max_fries = max;
        self
    }

    /// Set the burger-only / fries-only / mixed weights
    pub fn with_shape_weights(mut self, burger_only: f64, fries_only: f64, mixed: f64) -> Self {
        self.burger_only_weight = burger_only;
        self.fries_only_weight = fries_only;
        self.mixed_weight = mixed;
        self
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = seconds;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_burgers > self.max_burgers {
            return Err(ConfigError::InvalidRange(format!(
                "burger quantity {}..{}",
                self.min_burgers, self.max_burgers
            )));
        }
        if self.min_fries > self.max_fries {
            return Err(ConfigError::InvalidRange(format!(
                "fries quantity {}..{}",
                self.min_fries, self.max_fries
            )));
        }
        if self.max_burgers > 3 || self.max_fries > 3 {
            return Err(ConfigError::InvalidCount("orders ask for at most 3 of each item".to_string()));
        }
        let weights = [self.burger_only_weight, self.fries_only_weight, self.mixed_weight];
        if weights.iter().any(|w| *w < 0.0 || !w.is_finite()) {
            return Err(ConfigError::InvalidWeights("order shape weights must be finite and non-negative".to_string()));
        }
        if weights.iter().all(|w| *w == 0.0) {
            return Err(ConfigError::InvalidWeights("at least one order shape needs a weight".to_string()));
        }
        if self.time_limit <= 0.0 {
            return Err(ConfigError::NonPositiveDuration("order time limit".to_string()));
        }
        if self.burger_unit_price < 0.0 || self.fries_unit_price < 0.0 {
            return Err(ConfigError::NegativeValue("unit prices".to_string()));
        }
        Ok(())
    }
}

/// Fixed payouts used by the per-dish payment policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentConfig {
    pub base_payment: f64,
    pub burnt_payment: f64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            base_payment: 1.00,
            burnt_payment: 0.50,
        }
    }
}

impl PaymentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_payment < 0.0 || self.burnt_payment < 0.0 {
            return Err(ConfigError::NegativeValue("payments".to_string()));
        }
        Ok(())
    }
}

/// Complete configuration for one kitchen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenConfig {
    /// Number of grill burners, each holding one pan
    pub burners: usize,
    /// Number of fryer baskets
    pub fryer_baskets: usize,
    pub tray_max_burgers: usize,
    pub tray_max_fries: usize,
    pub patty: CookProfile,
    pub fries: CookProfile,
    pub flip: FlipConfig,
    pub salting: SaltingConfig,
    pub orders: OrderGenerationConfig,
    pub payment: PaymentConfig,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            burners: 2,
            fryer_baskets: 1,
            tray_max_burgers: 3,
            tray_max_fries: 3,
            patty: CookProfile::patty(),
            fries: CookProfile::fries(),
            flip: FlipConfig::default(),
            salting: SaltingConfig::default(),
            orders: OrderGenerationConfig::default(),
            payment: PaymentConfig::default(),
        }
    }
}

impl KitchenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_burners(mut self, burners: usize) -> Self {
        self.burners = burners;
        self
    }

    pub fn with_fryer_baskets(mut self, baskets: usize) -> Self {
        self.fryer_baskets = baskets;
        self
    }

    pub fn with_patty_profile(mut self, profile: CookProfile) -> Self {
        self.patty = profile;
        self
    }

    pub fn with_fries_profile(mut self, profile: CookProfile) -> Self {
        self.fries = profile;
        self
    }

    pub fn with_flip_config(mut self, flip: FlipConfig) -> Self {
        self.flip = flip;
        self
    }

    pub fn with_order_generation(mut self, orders: OrderGenerationConfig) -> Self {
        self.orders = orders;
        self
    }

    pub fn with_max_active_orders(mut self, max: usize) -> Self {
        self.orders.max_active_orders = max;
        self
    }

    pub fn with_payment(mut self, payment: PaymentConfig) -> Self {
        self.payment = payment;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.burners == 0 {
            return Err(ConfigError::InvalidCount("kitchen needs at least one burner".to_string()));
        }
        if self.fryer_baskets == 0 {
            return Err(ConfigError::InvalidCount("kitchen needs at least one fryer basket".to_string()));
        }
        if self.tray_max_burgers == 0 && self.tray_max_fries == 0 {
            return Err(ConfigError::InvalidCount("serving tray cannot hold anything".to_string()));
        }
        self.patty.validate("patty")?;
        self.fries.validate("fries")?;
        self.flip.validate()?;
        self.salting.validate()?;
        self.orders.validate()?;
        self.payment.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KitchenConfig::default();
        assert_eq!(config.burners, 2);
        assert_eq!(config.patty.cook_duration, 5.0);
        assert_eq!(config.patty.burn_duration, 3.0);
        assert_eq!(config.fries.cook_duration, 4.0);
        assert_eq!(config.flip.flips_required, 4);
        assert_eq!(config.orders.time_limit, 180.0);
        assert_eq!(config.payment.burnt_payment, 0.50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = KitchenConfig::new()
            .with_burners(4)
            .with_max_active_orders(1)
            .with_patty_profile(CookProfile::patty().with_cook_duration(8.0));

        assert_eq!(config.burners, 4);
        assert_eq!(config.orders.max_active_orders, 1);
        assert_eq!(config.patty.cook_duration, 8.0);
    }

    #[test]
    fn test_validation() {
        let mut config = KitchenConfig::default();
        config.patty.cook_duration = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::NonPositiveDuration(_))));

        let config = KitchenConfig::default()
            .with_order_generation(OrderGenerationConfig::default().with_burger_range(3, 1));
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRange(_))));

        let config = KitchenConfig::default()
            .with_order_generation(OrderGenerationConfig::default().with_shape_weights(0.0, 0.0, 0.0));
        assert!(matches!(config.validate(), Err(ConfigError::InvalidWeights(_))));
    }

    #[test]
    fn test_zero_order_capacity_is_valid() {
        let config = KitchenConfig::default().with_max_active_orders(0);
        assert!(config.validate().is_ok());
    }
}
