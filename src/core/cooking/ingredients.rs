use super::cookable::CookableItem;
use crate::core::config::KitchenConfig;
use serde::{Deserialize, Serialize};

/// Raw precursors pulled from storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawIngredient {
    /// From the meat freezer; smashed into a patty
    Meat,
    /// From potato storage; cut into fries
    Potato,
}

impl RawIngredient {
    /// Smash or cut the ingredient into something that can be cooked
    pub fn prepare(self, config: &KitchenConfig) -> CookableItem {
        match self {
            RawIngredient::Meat => CookableItem::patty(&config.patty),
            RawIngredient::Potato => CookableItem::fries(&config.fries),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RawIngredient::Meat => "Raw Meat",
            RawIngredient::Potato => "Potato",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cooking::cookable::CookingState;
    use crate::core::types::FoodKind;

    #[test]
    fn test_preparation() {
        let config = KitchenConfig::default();
        let patty = RawIngredient::Meat.prepare(&config);
        assert_eq!(patty.kind(), FoodKind::Patty);
        assert_eq!(patty.state(), CookingState::Prepared);

        let fries = RawIngredient::Potato.prepare(&config);
        assert_eq!(fries.kind(), FoodKind::Fries);
        assert_eq!(fries.state(), CookingState::Raw);
        assert_eq!(fries.cook_duration(), 4.0);
    }
}
