//! Static descriptions and image references for collectable objects, keyed by name.

use std::collections::HashMap;

const FALLBACK_DESCRIPTION: &str = "Nothing is known about this object.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub description: String,
    /// Path or URL of a picture of the object
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The props of the raycast room
    pub fn room_defaults() -> Self {
        Self::new()
            .with_entry(
                "Chair",
                "A wooden chair. Someone was sitting here not long ago.",
                Some("images/chair.png"),
            )
            .with_entry(
                "Cube",
                "A perfectly ordinary cube, slightly warm to the touch.",
                Some("images/cube.png"),
            )
    }

    pub fn with_entry(mut self, name: &str, description: &str, image: Option<&str>) -> Self {
        self.insert(name, description, image);
        self
    }

    pub fn insert(&mut self, name: &str, description: &str, image: Option<&str>) {
        self.entries.insert(
            name.to_string(),
            CatalogEntry {
                description: description.to_string(),
                image: image.map(str::to_string),
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    pub fn description(&self, name: &str) -> &str {
        self.get(name)
            .map(|entry| entry.description.as_str())
            .unwrap_or(FALLBACK_DESCRIPTION)
    }

    pub fn image(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|entry| entry.image.as_deref())
    }

    /// Every image path in the catalog, for preloading
    pub fn images(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries
            .values()
            .filter_map(|entry| entry.image.as_deref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_fallback() {
        let catalog = Catalog::room_defaults();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.image("Chair"), Some("images/chair.png"));
        assert!(catalog.description("Cube").contains("cube"));

        assert_eq!(catalog.description("Lamp"), FALLBACK_DESCRIPTION);
        assert_eq!(catalog.image("Lamp"), None);
    }

    #[test]
    fn test_images_lists_only_entries_with_pictures() {
        let catalog = Catalog::room_defaults().with_entry("Lamp", "A lamp.", None);
        let mut images: Vec<&str> = catalog.images().collect();
        images.sort();
        assert_eq!(images, vec!["images/chair.png", "images/cube.png"]);
    }

    #[test]
    fn test_insert_replaces_entry() {
        let mut catalog = Catalog::new().with_entry("Cube", "old", None);
        catalog.insert("Cube", "new", Some("cube.jpg"));
        assert_eq!(catalog.description("Cube"), "new");
        assert_eq!(catalog.image("Cube"), Some("cube.jpg"));
    }
}
