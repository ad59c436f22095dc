//! Insertion-ordered set of collected objects.

use super::catalog::Catalog;
use crate::gfx::scene::ObjectId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    pub object: ObjectId,
    pub name: String,
}

/// One rendered line of the inventory overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryLine {
    pub name: String,
    pub description: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: Vec<InventoryItem>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, object: ObjectId) -> bool {
        self.items.iter().any(|item| item.object == object)
    }

    /// Appends the object unless it is already held. Returns whether it was added.
    pub fn add(&mut self, object: ObjectId, name: &str) -> bool {
        if self.contains(object) {
            return false;
        }
        self.items.push(InventoryItem {
            object,
            name: name.to_string(),
        });
        true
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Overlay contents, in collection order
    pub fn lines(&self, catalog: &Catalog) -> Vec<InventoryLine> {
        self.items
            .iter()
            .map(|item| InventoryLine {
                name: item.name.clone(),
                description: catalog.description(&item.name).to_string(),
                image: catalog.image(&item.name).map(str::to_string),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_idempotent_per_object() {
        let mut inventory = Inventory::new();
        assert!(inventory.add(ObjectId(3), "Cube"));
        assert!(!inventory.add(ObjectId(3), "Cube"));
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn test_same_name_different_objects_both_kept() {
        let mut inventory = Inventory::new();
        inventory.add(ObjectId(1), "Cube");
        inventory.add(ObjectId(2), "Cube");
        assert_eq!(inventory.names(), vec!["Cube", "Cube"]);
    }

    #[test]
    fn test_lines_follow_collection_order() {
        let catalog = Catalog::room_defaults();
        let mut inventory = Inventory::new();
        inventory.add(ObjectId(1), "Chair");
        inventory.add(ObjectId(0), "Cube");

        let lines = inventory.lines(&catalog);
        assert_eq!(lines[0].name, "Chair");
        assert_eq!(lines[0].image.as_deref(), Some("images/chair.png"));
        assert_eq!(lines[1].name, "Cube");
    }
}
