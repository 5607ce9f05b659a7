use crate::core::config::SaltingConfig;
use crate::core::plating::tray::CookedFries;
use log::{debug, info};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShakeSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaltingRejection {
    Burnt,
    AlreadySalted,
}

impl fmt::Display for SaltingRejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SaltingRejection::Burnt => write!(f, "Cannot salt burnt fries"),
            SaltingRejection::AlreadySalted => write!(f, "Fries are already salted"),
        }
    }
}

impl std::error::Error for SaltingRejection {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaltingStatus {
    InProgress,
    Succeeded,
    Failed,
}

/// Alternating left/right shake round over a portion of fries
#[derive(Debug, Clone)]
pub struct SaltingSession {
    shakes_required: u32,
    shake_timeout: f64,
    shakes: u32,
    last_side: Option<ShakeSide>,
    time_since_last_shake: f64,
    status: SaltingStatus,
}

impl SaltingSession {
    pub fn start(fries: &CookedFries, config: &SaltingConfig) -> Result<Self, SaltingRejection> {
        if fries.is_burnt() {
            return Err(SaltingRejection::Burnt);
        }
        if fries.is_salted() {
            return Err(SaltingRejection::AlreadySalted);
        }
        debug!("[Salting] Round started, {} shakes needed", config.shakes_required);
        Ok(Self {
            shakes_required: config.shakes_required,
            shake_timeout: config.shake_timeout,
            shakes: 0,
            last_side: None,
            time_since_last_shake: 0.0,
            status: SaltingStatus::InProgress,
        })
    }

    /// Register one shake; the same side twice in a row ends the round
    pub fn shake(&mut self, side: ShakeSide) -> SaltingStatus {
        if self.status != SaltingStatus::InProgress {
            return self.status;
        }
        if self.last_side == Some(side) {
            info!("[Salting] Shook {:?} twice in a row", side);
            self.status = SaltingStatus::Failed;
            return self.status;
        }

        self.last_side = Some(side);
        self.shakes += 1;
        self.time_since_last_shake = 0.0;
        if self.shakes >= self.shakes_required {
            info!("[Salting] Fries salted after {} shakes", self.shakes);
            self.status = SaltingStatus::Succeeded;
        }
        self.status
    }

    pub fn tick(&mut self, dt: f64) -> SaltingStatus {
        assert!(dt >= 0.0, "dt must be non-negative, got {}", dt);
        if self.status != SaltingStatus::InProgress {
            return self.status;
        }
        self.time_since_last_shake += dt;
        if self.time_since_last_shake >= self.shake_timeout {
            info!("[Salting] Too slow, {:.2}s without a shake", self.time_since_last_shake);
            self.status = SaltingStatus::Failed;
        }
        self.status
    }

    /// Apply the result to the fries; returns true when they were salted
    pub fn finish(&self, fries: &mut CookedFries) -> bool {
        if self.status == SaltingStatus::Succeeded {
            fries.mark_salted();
            true
        } else {
            false
        }
    }

    pub fn status(&self) -> SaltingStatus {
        self.status
    }

    pub fn shakes(&self) -> u32 {
        self.shakes
    }

    pub fn progress(&self) -> f64 {
        self.shakes as f64 / self.shakes_required as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CookProfile;
    use crate::core::cooking::cookable::CookableItem;

    fn fries(burn: bool) -> CookedFries {
        let mut item = CookableItem::fries(&CookProfile::fries());
        item.set_on_heat(true);
        item.tick(4.0);
        if burn {
            item.tick(2.0);
        }
        CookedFries::from_cookable(item).unwrap()
    }

    fn alternate(session: &mut SaltingSession, count: u32) {
        for i in 0..count {
            let side = if i % 2 == 0 { ShakeSide::Left } else { ShakeSide::Right };
            session.tick(0.25);
            session.shake(side);
        }
    }

    #[test]
    fn test_alternating_shakes_salt_the_fries() {
        let mut portion = fries(false);
        let mut session = SaltingSession::start(&portion, &SaltingConfig::default()).unwrap();
        alternate(&mut session, 9);
        assert_eq!(session.status(), SaltingStatus::InProgress);
        alternate(&mut session, 1);
        // ninth shake was Left, the tenth restarts at Left
        assert_eq!(session.status(), SaltingStatus::Failed);

        let mut session = SaltingSession::start(&portion, &SaltingConfig::default()).unwrap();
        alternate(&mut session, 10);
        assert_eq!(session.status(), SaltingStatus::Succeeded);
        assert!(session.finish(&mut portion));
        assert!(portion.is_salted());
        assert_eq!(portion.name(), "Salted Fries");
        assert_eq!(
            SaltingSession::start(&portion, &SaltingConfig::default()).unwrap_err(),
            SaltingRejection::AlreadySalted
        );
    }

    #[test]
    fn test_timeout_fails_round() {
        let mut portion = fries(false);
        let mut session = SaltingSession::start(&portion, &SaltingConfig::default()).unwrap();
        session.shake(ShakeSide::Left);
        assert_eq!(session.tick(0.5), SaltingStatus::InProgress);
        assert_eq!(session.tick(0.5), SaltingStatus::Failed);
        assert_eq!(session.shake(ShakeSide::Right), SaltingStatus::Failed);
        assert!(!session.finish(&mut portion));
        assert!(!portion.is_salted());
    }

    #[test]
    fn test_timer_runs_before_first_shake() {
        let portion = fries(false);
        let mut session = SaltingSession::start(&portion, &SaltingConfig::default()).unwrap();
        assert_eq!(session.tick(1.0), SaltingStatus::Failed);
    }

    #[test]
    fn test_burnt_fries_rejected() {
        assert_eq!(
            SaltingSession::start(&fries(true), &SaltingConfig::default()).unwrap_err(),
            SaltingRejection::Burnt
        );
    }
}
