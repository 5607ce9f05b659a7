use crate::core::config::CookProfile;
use crate::core::types::{FoodKind, ItemId};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Cooking states for food items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CookingState {
    Raw,
    /// Smashed or cut and ready for heat
    Prepared,
    Cooking,
    Cooked,
    Burnt,
}

impl std::fmt::Display for CookingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CookingState::Raw => "Raw",
            CookingState::Prepared => "Prepared",
            CookingState::Cooking => "Cooking",
            CookingState::Cooked => "Cooked",
            CookingState::Burnt => "Burnt",
        };
        write!(f, "{}", label)
    }
}

/// A single food unit with its cooking clock
///
/// The clock only advances while the item is on heat. Taking the item off
/// heat freezes `elapsed_cook_time`; putting it back resumes from the frozen
/// value. Once cooked the clock restarts from zero and measures time towards
/// burning, which a successful flip pushes back.
#[derive(Debug, Clone)]
pub struct CookableItem {
    id: ItemId,
    name: String,
    kind: FoodKind,
    state: CookingState,
    cook_duration: f64,
    burn_duration: f64,
    flip_bonus_duration: f64,
    flip_cook_penalty: f64,
    elapsed_cook_time: f64,
    on_heat: bool,
    has_been_flipped: bool,
    flip_bonus_remaining: f64,
    flip_bonus_granted: f64,
    perfect_hit_count: u32,
}

impl CookableItem {
    /// Create a raw item from a cooking profile
    ///
    /// # Panics
    /// Panics if the profile has a non-positive cook or burn duration.
    pub fn new(name: impl Into<String>, kind: FoodKind, profile: &CookProfile) -> Self {
        assert!(profile.cook_duration > 0.0, "cook duration must be positive");
        assert!(profile.burn_duration > 0.0, "burn duration must be positive");
        assert!(profile.flip_bonus >= 0.0, "flip bonus must not be negative");

        Self {
            id: ItemId::new(),
            name: name.into(),
            kind,
            state: CookingState::Raw,
            cook_duration: profile.cook_duration,
            burn_duration: profile.burn_duration,
            flip_bonus_duration: profile.flip_bonus,
            flip_cook_penalty: profile.flip_cook_penalty,
            elapsed_cook_time: 0.0,
            on_heat: false,
            has_been_flipped: false,
            flip_bonus_remaining: 0.0,
            flip_bonus_granted: 0.0,
            perfect_hit_count: 0,
        }
    }

    /// A smashed patty, ready for the pan
    pub fn patty(profile: &CookProfile) -> Self {
        let mut patty = Self::new("Burger Patty", FoodKind::Patty, profile);
        patty.state = CookingState::Prepared;
        patty
    }

    /// Freshly cut fries, ready for the basket
    pub fn fries(profile: &CookProfile) -> Self {
        Self::new("French Fries", FoodKind::Fries, profile)
    }

    /// Advance the item by `dt` seconds
    ///
    /// # Panics
    /// Panics on a negative `dt`.
    pub fn tick(&mut self, dt: f64) {
        assert!(dt >= 0.0, "tick delta must not be negative, got {}", dt);

        if self.on_heat && self.state != CookingState::Burnt {
            self.advance_cooking(dt);
        }

        // Flip protection counts down on or off heat
        if self.flip_bonus_remaining > 0.0 {
            self.flip_bonus_remaining = (self.flip_bonus_remaining - dt).max(0.0);
        }
    }

    fn advance_cooking(&mut self, dt: f64) {
        self.elapsed_cook_time += dt;

        if matches!(self.state, CookingState::Raw | CookingState::Prepared) {
            self.state = CookingState::Cooking;
            debug!("[{} {}] Started cooking", self.name, self.id);
        }

        match self.state {
            CookingState::Cooking => {
                if self.elapsed_cook_time >= self.cook_duration {
                    self.state = CookingState::Cooked;
                    self.elapsed_cook_time = 0.0;
                    info!("[{} {}] Cooked", self.name, self.id);
                }
            }
            CookingState::Cooked => {
                if self.elapsed_cook_time >= self.burn_window() {
                    self.state = CookingState::Burnt;
                    info!("[{} {}] Burnt", self.name, self.id);
                }
            }
            _ => {}
        }
    }

    /// Burn deadline for a cooked item, including flip protection
    pub fn burn_window(&self) -> f64 {
        self.burn_duration + self.flip_bonus_granted
    }

    /// Put the item on or take it off heat; the clock is preserved either way
    pub fn set_on_heat(&mut self, on_heat: bool) {
        if self.on_heat != on_heat {
            debug!(
                "[{} {}] {} heat at {:.2}s",
                self.name,
                self.id,
                if on_heat { "On" } else { "Off" },
                self.elapsed_cook_time
            );
        }
        self.on_heat = on_heat;
    }

    /// Extend the burn deadline by `bonus_seconds`
    ///
    /// An item can only be flipped once. Returns `false` and leaves the item
    /// untouched when it was already flipped or is burnt.
    pub fn apply_flip_bonus(&mut self, bonus_seconds: f64) -> bool {
        assert!(bonus_seconds >= 0.0, "flip bonus must not be negative");

        if self.has_been_flipped || self.state == CookingState::Burnt {
            debug!("[{} {}] Flip bonus refused in state {}", self.name, self.id, self.state);
            return false;
        }

        self.has_been_flipped = true;
        self.flip_bonus_granted += bonus_seconds;
        self.flip_bonus_remaining += bonus_seconds;
        self.elapsed_cook_time += self.flip_cook_penalty;
        info!("[{} {}] Flipped: {:.1}s burn protection", self.name, self.id, bonus_seconds);
        true
    }

    /// Apply the profile's default flip bonus
    pub fn flip(&mut self) -> bool {
        self.apply_flip_bonus(self.flip_bonus_duration)
    }

    /// Force the item into its terminal burnt state
    pub fn mark_burnt(&mut self) {
        if self.state != CookingState::Burnt {
            self.state = CookingState::Burnt;
            info!("[{} {}] Ruined", self.name, self.id);
        }
    }

    pub fn set_perfect_hit_count(&mut self, hits: u32) {
        self.perfect_hit_count = hits;
    }

    /// Cooking progress in `[0, 1]`
    ///
    /// Only raw and cooking items report a fraction. A prepared patty that
    /// has not touched heat yet reads as full, like a finished one.
    pub fn cook_progress(&self) -> f64 {
        match self.state {
            CookingState::Raw | CookingState::Cooking => {
                (self.elapsed_cook_time / self.cook_duration).clamp(0.0, 1.0)
            }
            _ => 1.0,
        }
    }

    /// Progress towards burning in `[0, 1]`; 0.0 unless cooked
    pub fn burn_progress(&self) -> f64 {
        if self.state == CookingState::Cooked {
            (self.elapsed_cook_time / self.burn_window()).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FoodKind {
        self.kind
    }

    pub fn state(&self) -> CookingState {
        self.state
    }

    pub fn cook_duration(&self) -> f64 {
        self.cook_duration
    }

    pub fn burn_duration(&self) -> f64 {
        self.burn_duration
    }

    pub fn elapsed_cook_time(&self) -> f64 {
        self.elapsed_cook_time
    }

    pub fn is_on_heat(&self) -> bool {
        self.on_heat
    }

    pub fn has_been_flipped(&self) -> bool {
        self.has_been_flipped
    }

    pub fn flip_bonus_remaining(&self) -> f64 {
        self.flip_bonus_remaining
    }

    /// Base burn protection a successful flip grants before hit bonuses
    pub fn flip_bonus_duration(&self) -> f64 {
        self.flip_bonus_duration
    }

    pub fn flip_bonus_granted(&self) -> f64 {
        self.flip_bonus_granted
    }

    pub fn perfect_hit_count(&self) -> u32 {
        self.perfect_hit_count
    }

    pub fn is_edible(&self) -> bool {
        self.state == CookingState::Cooked
    }

    pub fn is_burnt(&self) -> bool {
        self.state == CookingState::Burnt
    }
}
