use crate::core::cooking::container::{Container, ContainerKind};
use crate::core::cooking::cookable::CookableItem;
use crate::core::plating::dish::{LayerItem, PlatedDish};
use crate::core::plating::tray::{CookedFries, ServingTray};
use log::{debug, info};

/// Coarse category of a held object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldableKind {
    Pan,
    Basket,
    Plate,
    Tray,
    LooseFood,
}

/// Everything the cook can carry
#[derive(Debug, Clone)]
pub enum Holdable {
    Pan(Container),
    Basket(Container),
    Plate(PlatedDish),
    Tray(ServingTray),
    LooseFood(LayerItem),
    Fries(CookedFries),
}

impl Holdable {
    /// Wrap a container under the matching variant
    pub fn from_container(container: Container) -> Self {
        match container.kind() {
            ContainerKind::Pan => Holdable::Pan(container),
            ContainerKind::Basket => Holdable::Basket(container),
        }
    }

    pub fn kind(&self) -> HoldableKind {
        match self {
            Holdable::Pan(_) => HoldableKind::Pan,
            Holdable::Basket(_) => HoldableKind::Basket,
            Holdable::Plate(_) => HoldableKind::Plate,
            Holdable::Tray(_) => HoldableKind::Tray,
            Holdable::LooseFood(_) | Holdable::Fries(_) => HoldableKind::LooseFood,
        }
    }

    pub fn name(&self) -> String {
        match self {
            Holdable::Pan(c) | Holdable::Basket(c) => c.name(),
            Holdable::Plate(dish) => dish.name(),
            Holdable::Tray(tray) => tray.name(),
            Holdable::LooseFood(layer) => layer.name(),
            Holdable::Fries(fries) => fries.name().to_string(),
        }
    }

    /// Advance held food; nothing in hand sits on heat
    pub fn tick(&mut self, dt: f64) {
        match self {
            Holdable::Pan(c) | Holdable::Basket(c) => c.tick(dt),
            Holdable::Plate(dish) => dish.tick(dt),
            Holdable::Tray(tray) => tray.tick(dt),
            Holdable::LooseFood(LayerItem::Cookable(item)) => item.tick(dt),
            Holdable::LooseFood(_) | Holdable::Fries(_) => {}
        }
    }
}

/// What a trip to the trash can threw away
#[derive(Debug, Clone)]
pub enum Trashed {
    /// Top layer scraped off a plate; the plate stays in hand
    Layer(LayerItem),
    /// Food dumped out of a pan or basket; the container stays in hand
    Food(CookableItem),
    /// The held object itself
    Item(Holdable),
}

/// The cook's single hand slot
#[derive(Debug, Default)]
pub struct Hands {
    held: Option<Holdable>,
}

impl Hands {
    pub fn new() -> Self {
        Self { held: None }
    }

    /// Pick something up; a full hand gives it straight back
    pub fn pick_up(&mut self, mut item: Holdable) -> Result<(), Holdable> {
        if self.held.is_some() {
            return Err(item);
        }
        if let Holdable::Pan(c) | Holdable::Basket(c) = &mut item {
            c.set_on_heat_source(false);
        }
        if let Holdable::LooseFood(LayerItem::Cookable(food)) = &mut item {
            food.set_on_heat(false);
        }
        debug!("[Hands] Picked up {}", item.name());
        self.held = Some(item);
        Ok(())
    }

    pub fn take(&mut self) -> Option<Holdable> {
        self.held.take()
    }

    pub fn held(&self) -> Option<&Holdable> {
        self.held.as_ref()
    }

    pub fn held_mut(&mut self) -> Option<&mut Holdable> {
        self.held.as_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_none()
    }

    pub fn tick(&mut self, dt: f64) {
        if let Some(item) = &mut self.held {
            item.tick(dt);
        }
    }

    /// Use the trash can with whatever is in hand
    ///
    /// A plate with layers loses only its top layer and a pan or basket
    /// with food loses only the food. Anything else is thrown away whole.
    pub fn trash(&mut self) -> Option<Trashed> {
        let trashed = match self.held.as_mut()? {
            Holdable::Plate(dish) if !dish.is_empty() => dish.remove_top_layer().map(Trashed::Layer),
            Holdable::Pan(c) | Holdable::Basket(c) if !c.is_empty() => c.remove().map(Trashed::Food),
            _ => self.held.take().map(Trashed::Item),
        };
        if let Some(t) = &trashed {
            let name = match t {
                Trashed::Layer(layer) => layer.name(),
                Trashed::Food(food) => food.name().to_string(),
                Trashed::Item(item) => item.name(),
            };
            info!("[Trash] Threw away {}", name);
        }
        trashed
    }
}
