use super::dish::PlatedDish;
use crate::core::cooking::cookable::{CookableItem, CookingState};
use crate::core::types::FoodKind;
use log::{debug, warn};

/// A portion of fried fries, ready for the tray
#[derive(Debug, Clone, PartialEq)]
pub struct CookedFries {
    burnt: bool,
    salted: bool,
}

impl CookedFries {
    /// Turn a finished fryer item into a servable portion
    ///
    /// Only fries that are cooked or burnt qualify; anything else is handed
    /// back unchanged.
    pub fn from_cookable(item: CookableItem) -> Result<Self, CookableItem> {
        if item.kind() != FoodKind::Fries {
            return Err(item);
        }
        match item.state() {
            CookingState::Cooked => Ok(Self { burnt: false, salted: false }),
            CookingState::Burnt => Ok(Self { burnt: true, salted: false }),
            _ => Err(item),
        }
    }

    pub fn is_burnt(&self) -> bool {
        self.burnt
    }

    pub fn is_salted(&self) -> bool {
        self.salted
    }

    pub(crate) fn mark_salted(&mut self) {
        self.salted = true;
    }

    pub fn name(&self) -> &'static str {
        match (self.burnt, self.salted) {
            (true, _) => "Burnt Fries",
            (false, true) => "Salted Fries",
            (false, false) => "French Fries",
        }
    }
}

/// Tray carried to the ticket window
#[derive(Debug, Clone)]
pub struct ServingTray {
    max_burgers: usize,
    max_fries: usize,
    burgers: Vec<PlatedDish>,
    fries: Vec<CookedFries>,
}

impl Default for ServingTray {
    fn default() -> Self {
        Self::new(3, 3)
    }
}

impl ServingTray {
    pub fn new(max_burgers: usize, max_fries: usize) -> Self {
        Self {
            max_burgers,
            max_fries,
            burgers: Vec::new(),
            fries: Vec::new(),
        }
    }

    /// Add an assembled burger; incomplete burgers and a full tray refuse it
    pub fn try_add_burger(&mut self, dish: PlatedDish) -> Result<(), PlatedDish> {
        if self.burgers.len() >= self.max_burgers {
            warn!("[Tray] Full, already holding {} burgers", self.max_burgers);
            return Err(dish);
        }
        if !dish.is_complete() {
            warn!("[Tray] Refusing incomplete burger: {}", dish.name());
            return Err(dish);
        }
        self.burgers.push(dish);
        debug!("[Tray] Added burger ({}/{})", self.burgers.len(), self.max_burgers);
        Ok(())
    }

    /// Add fries; burnt fries and a full tray refuse them
    pub fn try_add_fries(&mut self, fries: CookedFries) -> Result<(), CookedFries> {
        if self.fries.len() >= self.max_fries {
            warn!("[Tray] Full, already holding {} fries", self.max_fries);
            return Err(fries);
        }
        if fries.is_burnt() {
            warn!("[Tray] Refusing burnt fries");
            return Err(fries);
        }
        self.fries.push(fries);
        debug!("[Tray] Added fries ({}/{})", self.fries.len(), self.max_fries);
        Ok(())
    }

    pub fn remove_burger(&mut self) -> Option<PlatedDish> {
        self.burgers.pop()
    }

    pub fn remove_fries(&mut self) -> Option<CookedFries> {
        self.fries.pop()
    }

    pub fn clear(&mut self) {
        self.burgers.clear();
        self.fries.clear();
    }

    pub fn burger_count(&self) -> usize {
        self.burgers.len()
    }

    pub fn fries_count(&self) -> usize {
        self.fries.len()
    }

    pub fn burgers(&self) -> &[PlatedDish] {
        &self.burgers
    }

    pub fn fries(&self) -> &[CookedFries] {
        &self.fries
    }

    pub fn is_empty(&self) -> bool {
        self.burgers.is_empty() && self.fries.is_empty()
    }

    pub fn tick(&mut self, dt: f64) {
        for dish in &mut self.burgers {
            dish.tick(dt);
        }
    }

    pub fn name(&self) -> String {
        match (self.burgers.len(), self.fries.len()) {
            (0, 0) => "Empty Tray".to_string(),
            (b, 0) => format!("Tray ({}x Burger)", b),
            (0, f) => format!("Tray ({}x Fries)", f),
            (b, f) => format!("Tray ({}x Burger, {}x Fries)", b, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CookProfile;
    use crate::core::plating::dish::LayerItem;

    fn fried(seconds: f64) -> CookableItem {
        let mut fries = CookableItem::fries(&CookProfile::fries());
        fries.set_on_heat(true);
        fries.tick(seconds);
        fries
    }

    fn burger() -> PlatedDish {
        let mut patty = CookableItem::patty(&CookProfile::patty());
        patty.set_on_heat(true);
        patty.tick(5.0);
        let mut dish = PlatedDish::new();
        dish.add_layer(LayerItem::BottomBun);
        dish.add_layer(LayerItem::Cookable(patty));
        dish.add_layer(LayerItem::TopBun);
        dish
    }

    #[test]
    fn test_fries_conversion() {
        assert!(CookedFries::from_cookable(fried(1.0)).is_err());
        let cooked = CookedFries::from_cookable(fried(4.0)).unwrap();
        assert!(!cooked.is_burnt());

        let mut burnt = fried(4.0);
        burnt.tick(2.0);
        assert!(CookedFries::from_cookable(burnt).unwrap().is_burnt());

        let patty = CookableItem::patty(&CookProfile::patty());
        assert!(CookedFries::from_cookable(patty).is_err());
    }

    #[test]
    fn test_tray_capacity() {
        let mut tray = ServingTray::new(1, 1);
        assert!(tray.try_add_burger(burger()).is_ok());
        assert!(tray.try_add_burger(burger()).is_err());

        let fries = CookedFries::from_cookable(fried(4.0)).unwrap();
        assert!(tray.try_add_fries(fries.clone()).is_ok());
        assert!(tray.try_add_fries(fries).is_err());
        assert_eq!(tray.name(), "Tray (1x Burger, 1x Fries)");
    }

    #[test]
    fn test_tray_rejects_bad_food() {
        let mut tray = ServingTray::default();
        let mut incomplete = PlatedDish::new();
        incomplete.add_layer(LayerItem::BottomBun);
        assert!(tray.try_add_burger(incomplete).is_err());

        let mut burnt = fried(4.0);
        burnt.tick(2.0);
        let burnt = CookedFries::from_cookable(burnt).unwrap();
        assert!(tray.try_add_fries(burnt).is_err());
        assert!(tray.is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut tray = ServingTray::default();
        tray.try_add_burger(burger()).unwrap();
        tray.try_add_burger(burger()).unwrap();
        assert!(tray.remove_burger().is_some());
        assert_eq!(tray.burger_count(), 1);
        tray.clear();
        assert_eq!(tray.name(), "Empty Tray");
        assert!(tray.remove_fries().is_none());
    }
}
