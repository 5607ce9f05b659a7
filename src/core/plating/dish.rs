use crate::core::cooking::cookable::CookableItem;
use log::debug;

/// One layer of an assembled burger
#[derive(Debug, Clone)]
pub enum LayerItem {
    BottomBun,
    TopBun,
    Cookable(CookableItem),
    Condiment(String),
}

impl LayerItem {
    /// Stacking rank, bottom to top
    fn priority(&self) -> u8 {
        match self {
            LayerItem::BottomBun => 0,
            LayerItem::Cookable(_) => 1,
            LayerItem::Condiment(_) => 2,
            LayerItem::TopBun => 3,
        }
    }

    pub fn name(&self) -> String {
        match self {
            LayerItem::BottomBun => "Bottom Bun".to_string(),
            LayerItem::TopBun => "Top Bun".to_string(),
            LayerItem::Cookable(item) => item.name().to_string(),
            LayerItem::Condiment(name) => name.clone(),
        }
    }

    pub fn as_cookable(&self) -> Option<&CookableItem> {
        match self {
            LayerItem::Cookable(item) => Some(item),
            _ => None,
        }
    }
}

/// A plate of burger layers, always kept in canonical stacking order
///
/// Layers are re-sorted by rank after every insertion (bottom bun, cooked
/// food, condiments, top bun). The sort is stable, so layers of the same
/// rank keep their insertion order.
#[derive(Debug, Clone, Default)]
pub struct PlatedDish {
    layers: Vec<LayerItem>,
}

impl PlatedDish {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Add a layer; food placed on a plate stops cooking
    pub fn add_layer(&mut self, layer: LayerItem) -> bool {
        let layer = match layer {
            LayerItem::Cookable(mut item) => {
                item.set_on_heat(false);
                LayerItem::Cookable(item)
            }
            other => other,
        };
        debug!("[Plate] Added {} (layer {})", layer.name(), self.layers.len() + 1);
        self.layers.push(layer);
        self.layers.sort_by_key(LayerItem::priority);
        true
    }

    /// Remove the layer currently on top
    pub fn remove_top_layer(&mut self) -> Option<LayerItem> {
        let layer = self.layers.pop()?;
        debug!("[Plate] Removed {}", layer.name());
        Some(layer)
    }

    /// Bottom bun, at least one cooked item and a top bun
    pub fn is_complete(&self) -> bool {
        let has_bottom = self.layers.iter().any(|l| matches!(l, LayerItem::BottomBun));
        let has_food = self.layers.iter().any(|l| matches!(l, LayerItem::Cookable(_)));
        let has_top = self.layers.iter().any(|l| matches!(l, LayerItem::TopBun));
        has_bottom && has_food && has_top
    }

    pub fn has_burnt_food(&self) -> bool {
        self.cookables().any(CookableItem::is_burnt)
    }

    /// Highest perfect-hit count among the food layers
    pub fn best_perfect_hits(&self) -> u32 {
        self.cookables().map(CookableItem::perfect_hit_count).max().unwrap_or(0)
    }

    pub fn cookables(&self) -> impl Iterator<Item = &CookableItem> {
        self.layers.iter().filter_map(LayerItem::as_cookable)
    }

    pub fn layers(&self) -> &[LayerItem] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn name(&self) -> String {
        if self.layers.is_empty() {
            "Empty Plate".to_string()
        } else {
            format!("Plate ({} layers)", self.layers.len())
        }
    }

    /// Tick food on the plate; it is off heat so only flip timers move
    pub fn tick(&mut self, dt: f64) {
        for layer in &mut self.layers {
            if let LayerItem::Cookable(item) = layer {
                item.tick(dt);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CookProfile;

    fn cooked_patty() -> CookableItem {
        let mut patty = CookableItem::patty(&CookProfile::patty());
        patty.set_on_heat(true);
        patty.tick(5.0);
        patty
    }

    #[test]
    fn test_complete_regardless_of_order() {
        let mut dish = PlatedDish::new();
        dish.add_layer(LayerItem::TopBun);
        assert!(!dish.is_complete());
        dish.add_layer(LayerItem::Cookable(cooked_patty()));
        assert!(!dish.is_complete());
        dish.add_layer(LayerItem::BottomBun);
        assert!(dish.is_complete());

        assert!(matches!(dish.layers()[0], LayerItem::BottomBun));
        assert!(matches!(dish.layers()[1], LayerItem::Cookable(_)));
        assert!(matches!(dish.layers()[2], LayerItem::TopBun));
    }

    #[test]
    fn test_buns_alone_are_incomplete() {
        let mut dish = PlatedDish::new();
        dish.add_layer(LayerItem::BottomBun);
        dish.add_layer(LayerItem::Condiment("Ketchup".to_string()));
        dish.add_layer(LayerItem::TopBun);
        assert!(!dish.is_complete());
    }

    #[test]
    fn test_remove_top_layer_after_sort() {
        let mut dish = PlatedDish::new();
        dish.add_layer(LayerItem::TopBun);
        dish.add_layer(LayerItem::Condiment("Pickles".to_string()));
        dish.add_layer(LayerItem::BottomBun);

        assert!(matches!(dish.remove_top_layer(), Some(LayerItem::TopBun)));
        assert_eq!(dish.remove_top_layer().map(|l| l.name()), Some("Pickles".to_string()));
        assert!(matches!(dish.remove_top_layer(), Some(LayerItem::BottomBun)));
        assert!(dish.remove_top_layer().is_none());
        assert_eq!(dish.name(), "Empty Plate");
    }

    #[test]
    fn test_food_stops_cooking_on_plate() {
        let mut dish = PlatedDish::new();
        dish.add_layer(LayerItem::Cookable(cooked_patty()));
        dish.tick(60.0);
        let patty = dish.cookables().next().unwrap();
        assert!(!patty.is_on_heat());
        assert!(patty.is_edible());
        assert!(!dish.has_burnt_food());
    }

    #[test]
    fn test_quality_queries() {
        let mut best = cooked_patty();
        best.set_perfect_hit_count(3);
        let mut burnt = cooked_patty();
        burnt.mark_burnt();

        let mut dish = PlatedDish::new();
        dish.add_layer(LayerItem::Cookable(best));
        dish.add_layer(LayerItem::Cookable(burnt));
        assert_eq!(dish.best_perfect_hits(), 3);
        assert!(dish.has_burnt_food());
    }
}
