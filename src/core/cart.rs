use crate::domain::model::MenuItem;
use std::collections::HashMap;

/// Per-item quantity state for the currently loaded menu.
///
/// Counts are unsigned and every adjustment saturates at zero, so no
/// sequence of operations can drive a quantity negative. Every installed
/// menu item has an entry; ids the menu does not know are ignored.
#[derive(Debug, Default)]
pub struct Cart {
    menu: Vec<MenuItem>,
    quantities: HashMap<String, u32>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the menu and zero-initializes one quantity entry per item.
    /// Selections made against a previous menu are discarded.
    pub fn install(&mut self, items: Vec<MenuItem>) {
        self.quantities = items.iter().map(|item| (item.id.clone(), 0)).collect();
        self.menu = items;
    }

    pub fn menu(&self) -> &[MenuItem] {
        &self.menu
    }

    pub fn quantity(&self, item_id: &str) -> u32 {
        self.quantities.get(item_id).copied().unwrap_or(0)
    }

    /// Adjusts the count for `item_id` by `delta`, clamped at zero. There is
    /// no upper bound.
    pub fn adjust(&mut self, item_id: &str, delta: i32) {
        if let Some(count) = self.quantities.get_mut(item_id) {
            *count = if delta.is_negative() {
                count.saturating_sub(delta.unsigned_abs())
            } else {
                count.saturating_add(delta as u32)
            };
        }
    }

    pub fn remove(&mut self, item_id: &str) {
        if let Some(count) = self.quantities.get_mut(item_id) {
            *count = 0;
        }
    }

    /// Zeroes every entry, keeping the menu in place.
    pub fn reset(&mut self) {
        for count in self.quantities.values_mut() {
            *count = 0;
        }
    }

    /// Selected items with quantity > 0, in menu order.
    pub fn selected(&self) -> impl Iterator<Item = (&MenuItem, u32)> {
        self.menu.iter().filter_map(|item| {
            let quantity = self.quantity(&item.id);
            (quantity > 0).then_some((item, quantity))
        })
    }

    pub fn has_selection(&self) -> bool {
        self.quantities.values().any(|&count| count > 0)
    }
}
