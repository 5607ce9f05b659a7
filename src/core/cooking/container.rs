use super::cookable::CookableItem;
use log::debug;
use serde::{Deserialize, Serialize};

/// What kind of vessel a container is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerKind {
    /// Frying pan that sits on a grill burner
    Pan,
    /// Basket that drops into the fryer
    Basket,
}

/// Pan or fryer basket holding at most one item
#[derive(Debug, Clone)]
pub struct Container {
    kind: ContainerKind,
    contents: Option<CookableItem>,
    on_heat_source: bool,
}

impl Container {
    pub fn new(kind: ContainerKind) -> Self {
        Self {
            kind,
            contents: None,
            on_heat_source: false,
        }
    }

    pub fn pan() -> Self {
        Self::new(ContainerKind::Pan)
    }

    pub fn basket() -> Self {
        Self::new(ContainerKind::Basket)
    }

    /// Put an item in the container
    ///
    /// Fails when the container is occupied, handing the item back to the
    /// caller. The item picks up the container's heat state.
    pub fn try_add(&mut self, mut item: CookableItem) -> Result<(), CookableItem> {
        if self.contents.is_some() {
            debug!("[{:?}] Occupied, refusing {}", self.kind, item.name());
            return Err(item);
        }
        item.set_on_heat(self.on_heat_source);
        debug!("[{:?}] Holding {}", self.kind, item.name());
        self.contents = Some(item);
        Ok(())
    }

    /// Take the item out; it leaves the heat with its clock preserved
    pub fn remove(&mut self) -> Option<CookableItem> {
        let mut item = self.contents.take()?;
        item.set_on_heat(false);
        Some(item)
    }

    /// Place the container on or lift it off a heat source
    pub fn set_on_heat_source(&mut self, on_heat: bool) {
        self.on_heat_source = on_heat;
        if let Some(item) = self.contents.as_mut() {
            item.set_on_heat(on_heat);
        }
    }

    /// Advance the contained item, if any
    pub fn tick(&mut self, dt: f64) {
        if let Some(item) = self.contents.as_mut() {
            item.tick(dt);
        }
    }

    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    pub fn contents(&self) -> Option<&CookableItem> {
        self.contents.as_ref()
    }

    pub fn contents_mut(&mut self) -> Option<&mut CookableItem> {
        self.contents.as_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_none()
    }

    pub fn is_on_heat_source(&self) -> bool {
        self.on_heat_source
    }

    pub fn name(&self) -> String {
        let vessel = match self.kind {
            ContainerKind::Pan => "Pan",
            ContainerKind::Basket => "Fryer Basket",
        };
        match &self.contents {
            Some(item) => format!("{} ({} - {})", vessel, item.name(), item.state()),
            None => format!("Empty {}", vessel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CookProfile;
    use crate::core::cooking::cookable::CookingState;

    #[test]
    fn test_occupied_container_refuses() {
        let profile = CookProfile::patty();
        let mut pan = Container::pan();
        let first = CookableItem::patty(&profile);
        let first_id = first.id();
        assert!(pan.try_add(first).is_ok());

        let second = CookableItem::patty(&profile);
        let second_id = second.id();
        let rejected = pan.try_add(second).unwrap_err();
        assert_eq!(rejected.id(), second_id);
        assert_eq!(pan.contents().map(|item| item.id()), Some(first_id));
    }

    #[test]
    fn test_heat_is_forwarded() {
        let mut pan = Container::pan();
        pan.try_add(CookableItem::patty(&CookProfile::patty())).unwrap();
        assert!(!pan.contents().unwrap().is_on_heat());

        pan.tick(1.0);
        assert_eq!(pan.contents().unwrap().state(), CookingState::Prepared);

        pan.set_on_heat_source(true);
        pan.tick(1.0);
        assert_eq!(pan.contents().unwrap().state(), CookingState::Cooking);

        pan.set_on_heat_source(false);
        pan.tick(10.0);
        assert_eq!(pan.contents().unwrap().elapsed_cook_time(), 1.0);
    }

    #[test]
    fn test_item_added_to_hot_container_starts_cooking() {
        let mut basket = Container::basket();
        basket.set_on_heat_source(true);
        basket.try_add(CookableItem::fries(&CookProfile::fries())).unwrap();
        basket.tick(4.0);
        assert!(basket.contents().unwrap().is_edible());
    }

    #[test]
    fn test_remove_takes_item_off_heat() {
        let mut pan = Container::pan();
        pan.set_on_heat_source(true);
        pan.try_add(CookableItem::patty(&CookProfile::patty())).unwrap();
        pan.tick(2.0);

        let item = pan.remove().unwrap();
        assert!(!item.is_on_heat());
        assert_eq!(item.elapsed_cook_time(), 2.0);
        assert!(pan.is_empty());
        assert!(pan.remove().is_none());
    }
}
