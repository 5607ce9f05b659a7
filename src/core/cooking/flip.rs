//! Flip timing minigame
//!
//! A marker sweeps along a track at increasing speed. Each press is graded
//! against the perfect line and the good zone; a sweep with no press counts
//! as a miss. After a fixed number of attempts the round ends and the
//! outcome is held for a short display delay before it is handed back.

use super::cookable::{CookableItem, CookingState};
use crate::core::config::FlipConfig;
use crate::core::types::ItemId;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Grade of one flip attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitGrade {
    Perfect,
    Good,
    Miss,
}

/// Why a flip could not be started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipRejection {
    NotOnHeat,
    WrongState(CookingState),
    AlreadyFlipped,
    /// The cook is holding something or otherwise occupied
    AgentBusy,
    /// Another flip round is still running
    AlreadyActive,
    /// The station has no food to flip
    EmptyStation,
}

impl std::fmt::Display for FlipRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlipRejection::NotOnHeat => write!(f, "Not on heat"),
            FlipRejection::WrongState(state) => write!(f, "Wrong state: {}", state),
            FlipRejection::AlreadyFlipped => write!(f, "Already flipped"),
            FlipRejection::AgentBusy => write!(f, "Hands not empty"),
            FlipRejection::AlreadyActive => write!(f, "Flip already in progress"),
            FlipRejection::EmptyStation => write!(f, "No food"),
        }
    }
}

impl std::error::Error for FlipRejection {}

/// Result of a finished flip round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlipOutcome {
    pub success: bool,
    pub perfect_hits: u32,
    pub good_hits: u32,
    pub misses: u32,
    /// Burn protection earned; zero on failure
    pub bonus_seconds: f64,
}

/// Scripted input for [`FlipSession::play`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlipInput {
    Wait(f64),
    Press,
}

#[derive(Debug, Clone, PartialEq)]
enum FlipPhase {
    Playing,
    Resolving { remaining: f64, outcome: FlipOutcome },
    Finished,
}

/// One round of the flip minigame for a single item
#[derive(Debug, Clone)]
pub struct FlipSession {
    config: FlipConfig,
    item_id: ItemId,
    phase: FlipPhase,
    marker: f64,
    speed: f64,
    attempts: u32,
    perfect_hits: u32,
    good_hits: u32,
    misses: u32,
    sweep_index: u32,
    pressed_this_sweep: bool,
}

impl FlipSession {
    /// Start a round for `item` if it can be flipped right now
    pub fn start(item: &CookableItem, config: &FlipConfig, agent_busy: bool) -> Result<Self, FlipRejection> {
        if !item.is_on_heat() {
            return Err(FlipRejection::NotOnHeat);
        }
        if item.has_been_flipped() {
            return Err(FlipRejection::AlreadyFlipped);
        }
        if item.state() != CookingState::Cooking {
            return Err(FlipRejection::WrongState(item.state()));
        }
        if agent_busy {
            return Err(FlipRejection::AgentBusy);
        }

        info!(
            "[FlipSession {}] Started: {} attempts required",
            item.id(),
            config.flips_required
        );

        Ok(Self {
            config: config.clone(),
            item_id: item.id(),
            phase: FlipPhase::Playing,
            marker: -config.track_length / 2.0,
            speed: config.indicator_speed,
            attempts: 0,
            perfect_hits: 0,
            good_hits: 0,
            misses: 0,
            sweep_index: 0,
            pressed_this_sweep: false,
        })
    }

    /// Advance the marker or the result display timer
    ///
    /// Returns the outcome exactly once, when the display delay has run out.
    pub fn tick(&mut self, dt: f64) -> Option<FlipOutcome> {
        assert!(dt >= 0.0, "tick delta must not be negative, got {}", dt);

        if self.phase == FlipPhase::Finished {
            return None;
        }
        if self.phase == FlipPhase::Playing {
            self.advance_marker(dt);
        } else if let FlipPhase::Resolving { remaining, .. } = &mut self.phase {
            *remaining -= dt;
        }

        if let FlipPhase::Resolving { remaining, outcome } = &self.phase {
            if *remaining <= 0.0 {
                let outcome = *outcome;
                self.phase = FlipPhase::Finished;
                return Some(outcome);
            }
        }
        None
    }

    fn advance_marker(&mut self, dt: f64) {
        let half = self.config.track_length / 2.0;
        self.marker += self.speed * dt;

        while self.marker > half && self.phase == FlipPhase::Playing {
            self.marker -= self.config.track_length;
            if !self.pressed_this_sweep {
                debug!("[FlipSession {}] Sweep {} passed without a press", self.item_id, self.sweep_index);
                self.register_attempt(HitGrade::Miss);
            }
            self.sweep_index += 1;
            self.pressed_this_sweep = false;
        }
    }

    /// Register a press at the current marker position
    ///
    /// Returns `None` when the round is no longer accepting input.
    pub fn press(&mut self) -> Option<HitGrade> {
        if self.phase != FlipPhase::Playing {
            return None;
        }
        let grade = self.grade_marker();
        self.pressed_this_sweep = true;
        self.register_attempt(grade);
        Some(grade)
    }

    fn grade_marker(&self) -> HitGrade {
        let distance = (self.marker - self.config.target_position).abs();
        if distance <= self.config.perfect_tolerance {
            return HitGrade::Perfect;
        }

        let marker_low = self.marker - self.config.indicator_half_width;
        let marker_high = self.marker + self.config.indicator_half_width;
        let zone_low = self.config.good_zone_center - self.config.good_zone_half_width;
        let zone_high = self.config.good_zone_center + self.config.good_zone_half_width;
        if is_overlapping(marker_low, marker_high, zone_low, zone_high) {
            HitGrade::Good
        } else {
            HitGrade::Miss
        }
    }

    fn register_attempt(&mut self, grade: HitGrade) {
        self.attempts += 1;
        match grade {
            HitGrade::Perfect => {
                self.perfect_hits += 1;
                self.speed += self.config.speed_increase;
            }
            HitGrade::Good => {
                self.good_hits += 1;
                self.speed += self.config.speed_increase * 0.5;
            }
            HitGrade::Miss => self.misses += 1,
        }
        debug!(
            "[FlipSession {}] {:?} ({}/{})",
            self.item_id, grade, self.attempts, self.config.flips_required
        );

        if self.attempts >= self.config.flips_required {
            self.end_round();
        }
    }

    fn end_round(&mut self) {
        let hits = self.perfect_hits + self.good_hits;
        let success_rate = hits as f64 / self.config.flips_required as f64;
        let success = success_rate >= self.config.success_ratio;
        let bonus_seconds = if success {
            self.perfect_hits as f64 * self.config.perfect_bonus + self.good_hits as f64 * self.config.good_bonus
        } else {
            0.0
        };

        info!(
            "[FlipSession {}] Round over: {} ({}/{} hits, {} perfect)",
            self.item_id,
            if success { "success" } else { "failed" },
            hits,
            self.config.flips_required,
            self.perfect_hits
        );

        self.phase = FlipPhase::Resolving {
            remaining: self.config.resolve_delay,
            outcome: FlipOutcome {
                success,
                perfect_hits: self.perfect_hits,
                good_hits: self.good_hits,
                misses: self.misses,
                bonus_seconds,
            },
        };
    }

    /// Run a scripted input stream until the outcome resolves
    pub fn play<I>(&mut self, inputs: I) -> Option<FlipOutcome>
    where
        I: IntoIterator<Item = FlipInput>,
    {
        for input in inputs {
            match input {
                FlipInput::Wait(dt) => {
                    if let Some(outcome) = self.tick(dt) {
                        return Some(outcome);
                    }
                }
                FlipInput::Press => {
                    self.press();
                }
            }
        }
        None
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn marker_position(&self) -> f64 {
        self.marker
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn perfect_hits(&self) -> u32 {
        self.perfect_hits
    }

    pub fn good_hits(&self) -> u32 {
        self.good_hits
    }

    /// Number of the current sweep, counting from zero
    pub fn sweep_index(&self) -> u32 {
        self.sweep_index
    }

    pub fn pressed_this_sweep(&self) -> bool {
        self.pressed_this_sweep
    }

    pub fn target_position(&self) -> f64 {
        self.config.target_position
    }

    /// Whether presses are still accepted
    pub fn is_playing(&self) -> bool {
        self.phase == FlipPhase::Playing
    }

    pub fn is_finished(&self) -> bool {
        self.phase == FlipPhase::Finished
    }
}

fn is_overlapping(a1: f64, a2: f64, b1: f64, b2: f64) -> bool {
    !(a2 < b1 || b2 < a1)
}

/// Apply a resolved round to the flipped item
///
/// A successful round extends the burn deadline by the item's base flip
/// bonus plus the hit bonuses, and records the perfect hits for payment.
/// A failed round ruins the item.
pub fn apply_outcome(item: &mut CookableItem, outcome: &FlipOutcome) {
    if outcome.success {
        item.apply_flip_bonus(item.flip_bonus_duration() + outcome.bonus_seconds);
        item.set_perfect_hit_count(outcome.perfect_hits);
    } else {
        item.mark_burnt();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CookProfile;

    fn cooking_patty() -> CookableItem {
        let mut patty = CookableItem::patty(&CookProfile::patty());
        patty.set_on_heat(true);
        patty.tick(0.5);
        patty
    }

    /// Tick until the marker sits on the target in a fresh sweep, then press
    fn press_on_target(session: &mut FlipSession) -> HitGrade {
        loop {
            session.tick(0.01);
            let marker = session.marker_position();
            if !session.pressed_this_sweep() && (-5.0..10.0).contains(&marker) {
                return session.press().unwrap();
            }
        }
    }

    #[test]
    fn test_start_preconditions() {
        let config = FlipConfig::default();
        let raw = CookableItem::patty(&CookProfile::patty());
        assert_eq!(FlipSession::start(&raw, &config, false).unwrap_err(), FlipRejection::NotOnHeat);

        let mut patty = cooking_patty();
        assert_eq!(FlipSession::start(&patty, &config, true).unwrap_err(), FlipRejection::AgentBusy);

        patty.flip();
        assert_eq!(FlipSession::start(&patty, &config, false).unwrap_err(), FlipRejection::AlreadyFlipped);

        let mut cooked = cooking_patty();
        cooked.tick(5.0);
        assert_eq!(
            FlipSession::start(&cooked, &config, false).unwrap_err(),
            FlipRejection::WrongState(CookingState::Cooked)
        );
    }

    #[test]
    fn test_perfect_round_succeeds_after_delay() {
        let patty = cooking_patty();
        let mut session = FlipSession::start(&patty, &FlipConfig::default(), false).unwrap();

        for _ in 0..4 {
            assert_eq!(press_on_target(&mut session), HitGrade::Perfect);
        }
        assert!(!session.is_playing());
        assert_eq!(session.speed(), 400.0 + 4.0 * 75.0);

        assert!(session.tick(1.0).is_none());
        let outcome = session.tick(1.0).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.perfect_hits, 4);
        assert_eq!(outcome.bonus_seconds, 8.0);

        assert!(session.tick(1.0).is_none());
        assert!(session.is_finished());
    }

    #[test]
    fn test_grading_zones() {
        let patty = cooking_patty();
        let mut session = FlipSession::start(&patty, &FlipConfig::default(), false).unwrap();
        // Marker starts at -300, far outside the good zone
        assert_eq!(session.press(), Some(HitGrade::Miss));

        // 0.65s at 400 units/s puts the marker at -40: inside the good zone
        session.tick(0.65);
        assert_eq!(session.press(), Some(HitGrade::Good));
        assert_eq!(session.speed(), 400.0 + 37.5);
    }

    #[test]
    fn test_unpressed_sweeps_count_as_misses() {
        let patty = cooking_patty();
        let config = FlipConfig::default().with_resolve_delay(0.0);
        let mut session = FlipSession::start(&patty, &config, false).unwrap();

        let mut outcome = None;
        for _ in 0..1000 {
            outcome = session.tick(0.1);
            if outcome.is_some() {
                break;
            }
        }
        let outcome = outcome.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.misses, 4);
        assert_eq!(outcome.bonus_seconds, 0.0);
    }

    #[test]
    fn test_three_of_four_is_enough() {
        let patty = cooking_patty();
        let mut session = FlipSession::start(&patty, &FlipConfig::default(), false).unwrap();
        session.press();
        for _ in 0..3 {
            press_on_target(&mut session);
        }
        let outcome = session.play([FlipInput::Wait(2.0)]).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.misses, 1);
    }

    #[test]
    fn test_scripted_play() {
        let patty = cooking_patty();
        let mut session = FlipSession::start(&patty, &FlipConfig::default(), false).unwrap();
        let outcome = session
            .play([
                FlipInput::Press,
                FlipInput::Press,
                FlipInput::Press,
                FlipInput::Press,
                FlipInput::Press,
                FlipInput::Wait(2.0),
            ])
            .unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.misses, 4);
    }

    #[test]
    fn test_apply_outcome() {
        let mut patty = cooking_patty();
        let success = FlipOutcome {
            success: true,
            perfect_hits: 2,
            good_hits: 1,
            misses: 1,
            bonus_seconds: 5.0,
        };
        apply_outcome(&mut patty, &success);
        // 3s patty base plus 5s from hits
        assert_eq!(patty.flip_bonus_granted(), 8.0);
        assert_eq!(patty.perfect_hit_count(), 2);

        let mut fair = cooking_patty();
        let all_good = FlipOutcome {
            success: true,
            perfect_hits: 0,
            good_hits: 4,
            misses: 0,
            bonus_seconds: 4.0,
        };
        apply_outcome(&mut fair, &all_good);
        assert_eq!(fair.flip_bonus_granted(), 7.0);
        assert_eq!(fair.burn_window(), 10.0);

        let mut other = cooking_patty();
        apply_outcome(&mut other, &FlipOutcome { success: false, bonus_seconds: 0.0, ..success });
        assert!(other.is_burnt());
    }
}
