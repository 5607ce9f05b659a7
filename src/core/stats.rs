use crate::core::types::FoodKind;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter grade from the share of tipped orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Grade for a perfection rate given in percent
    pub fn from_rate(rate: f64) -> Self {
        if rate >= 95.0 {
            Grade::S
        } else if rate >= 85.0 {
            Grade::A
        } else if rate >= 75.0 {
            Grade::B
        } else if rate >= 65.0 {
            Grade::C
        } else if rate >= 50.0 {
            Grade::D
        } else {
            Grade::F
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let letter = match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        write!(f, "{}", letter)
    }
}

/// Running performance record for the fry cook job
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CareerStats {
    pub orders_completed: u32,
    pub orders_failed: u32,
    pub orders_expired: u32,
    /// Completed orders that earned a tip
    pub perfect_orders: u32,
    pub total_earned: f64,
    pub total_tips: f64,
    pub average_order_time: f64,
    pub current_streak: u32,
    pub best_streak: u32,
    pub burgers_served: u32,
    pub fries_served: u32,
    pub burgers_burnt: u32,
    pub fries_burnt: u32,
}

impl CareerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_completed(&mut self, payment: f64, tip: f64, burgers: u32, fries: u32, time_taken: f64) {
        self.orders_completed += 1;
        self.total_earned += payment;
        self.total_tips += tip;
        self.burgers_served += burgers;
        self.fries_served += fries;

        let n = self.orders_completed as f64;
        self.average_order_time = (self.average_order_time * (n - 1.0) + time_taken) / n;

        if tip > 0.0 {
            self.perfect_orders += 1;
            self.current_streak += 1;
            self.best_streak = self.best_streak.max(self.current_streak);
        } else {
            self.current_streak = 0;
        }

        info!(
            "[Stats] Order completed, total {} perfect {} streak {}",
            self.orders_completed, self.perfect_orders, self.current_streak
        );
    }

    /// Wrong delivery; the items still count as served
    pub fn record_failed(&mut self, burgers: u32, fries: u32) {
        self.orders_failed += 1;
        self.current_streak = 0;
        self.burgers_served += burgers;
        self.fries_served += fries;
        info!("[Stats] Order failed, total failures {}", self.orders_failed);
    }

    pub fn record_expired(&mut self) {
        self.orders_expired += 1;
        self.current_streak = 0;
        info!("[Stats] Order expired, total expired {}", self.orders_expired);
    }

    pub fn record_burnt_food(&mut self, kind: FoodKind) {
        match kind {
            FoodKind::Patty => self.burgers_burnt += 1,
            FoodKind::Fries => self.fries_burnt += 1,
        }
    }

    /// Completed share of completed plus failed orders, in percent
    pub fn success_rate(&self) -> f64 {
        let total = self.orders_completed + self.orders_failed;
        if total == 0 {
            return 0.0;
        }
        self.orders_completed as f64 / total as f64 * 100.0
    }

    /// Tipped share of completed orders, in percent
    pub fn perfection_rate(&self) -> f64 {
        if self.orders_completed == 0 {
            return 0.0;
        }
        self.perfect_orders as f64 / self.orders_completed as f64 * 100.0
    }

    pub fn average_tips(&self) -> f64 {
        if self.orders_completed == 0 {
            return 0.0;
        }
        self.total_tips / self.orders_completed as f64
    }

    /// No completed orders grades as F
    pub fn grade(&self) -> Grade {
        Grade::from_rate(self.perfection_rate())
    }

    pub fn summary_text(&self) -> String {
        let heavy = "═".repeat(35);
        let light = "─".repeat(33);
        [
            heavy.clone(),
            "FRY COOK PERFORMANCE".to_string(),
            heavy.clone(),
            format!("Orders Completed: {}", self.orders_completed),
            format!("Orders Failed: {}", self.orders_failed),
            format!("Orders Expired: {}", self.orders_expired),
            format!("Success Rate: {:.1}%", self.success_rate()),
            format!("Perfect Orders: {} ({:.1}%)", self.perfect_orders, self.perfection_rate()),
            format!("Current Streak: {}", self.current_streak),
            format!("Best Streak: {}", self.best_streak),
            format!("Grade: {}", self.grade()),
            light.clone(),
            format!("Total Earned: ${:.2}", self.total_earned),
            format!("Total Tips: ${:.2}", self.total_tips),
            format!("Avg Tips/Order: ${:.2}", self.average_tips()),
            format!("Avg Order Time: {:.1}s", self.average_order_time),
            light,
            format!("Burgers Served: {}", self.burgers_served),
            format!("Fries Served: {}", self.fries_served),
            format!("Burgers Burnt: {}", self.burgers_burnt),
            format!("Fries Burnt: {}", self.fries_burnt),
            heavy,
        ]
        .join("\n")
    }

    pub fn reset(&mut self) {
        *self = Self::default();
        info!("[Stats] Reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streaks() {
        let mut stats = CareerStats::new();
        stats.record_completed(3.0, 1.0, 1, 1, 10.0);
        stats.record_completed(3.0, 1.0, 1, 1, 20.0);
        assert_eq!(stats.current_streak, 2);
        stats.record_completed(2.0, 0.0, 1, 0, 30.0);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.best_streak, 2);

        stats.record_completed(3.0, 1.0, 1, 1, 40.0);
        stats.record_failed(2, 0);
        assert_eq!(stats.current_streak, 0);
        stats.record_completed(3.0, 1.0, 1, 1, 50.0);
        stats.record_expired();
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.best_streak, 2);
        assert_eq!(stats.orders_expired, 1);
    }

    #[test]
    fn test_running_average_and_totals() {
        let mut stats = CareerStats::new();
        stats.record_completed(2.0, 0.5, 2, 0, 30.0);
        stats.record_completed(1.0, 0.0, 0, 2, 60.0);
        stats.record_failed(1, 1);
        assert_eq!(stats.average_order_time, 45.0);
        assert_eq!(stats.total_earned, 3.0);
        assert_eq!(stats.total_tips, 0.5);
        assert_eq!(stats.average_tips(), 0.25);
        assert_eq!(stats.burgers_served, 3);
        assert_eq!(stats.fries_served, 3);
        assert_eq!(stats.perfection_rate(), 50.0);
    }

    #[test]
    fn test_grades() {
        let mut stats = CareerStats::new();
        assert_eq!(stats.grade(), Grade::F);
        assert_eq!(stats.success_rate(), 0.0);

        for _ in 0..19 {
            stats.record_completed(1.0, 0.5, 1, 0, 10.0);
        }
        stats.record_completed(1.0, 0.0, 1, 0, 10.0);
        assert_eq!(stats.grade(), Grade::S);

        assert_eq!(Grade::from_rate(85.0), Grade::A);
        assert_eq!(Grade::from_rate(80.0), Grade::B);
        assert_eq!(Grade::from_rate(65.0), Grade::C);
        assert_eq!(Grade::from_rate(50.0), Grade::D);
        assert_eq!(Grade::from_rate(49.9), Grade::F);
    }

    #[test]
    fn test_burnt_tallies_and_reset() {
        let mut stats = CareerStats::new();
        stats.record_burnt_food(FoodKind::Patty);
        stats.record_burnt_food(FoodKind::Fries);
        stats.record_burnt_food(FoodKind::Fries);
        assert_eq!(stats.burgers_burnt, 1);
        assert_eq!(stats.fries_burnt, 2);
        stats.reset();
        assert_eq!(stats, CareerStats::default());
    }

    #[test]
    fn test_summary_text() {
        let mut stats = CareerStats::new();
        stats.record_completed(4.5, 1.5, 2, 2, 12.0);
        let text = stats.summary_text();
        assert!(text.starts_with("═══"));
        assert!(text.contains("FRY COOK PERFORMANCE"));
        assert!(text.contains("Perfect Orders: 1 (100.0%)"));
        assert!(text.contains("Grade: S"));
        assert!(text.contains("Total Earned: $4.50"));
        assert!(text.contains("Avg Order Time: 12.0s"));
    }
}
