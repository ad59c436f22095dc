//! Tracks the single highlighted object straight ahead.
//!
//! Transitions are driven only by a change in the forward probe's result
//! identity. The emissive colour an object had before being highlighted is
//! restored when the highlight moves away.

use log::debug;

use crate::gfx::scene::{ObjectId, Scene};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HighlightChange {
    /// Probe result identity did not change
    Unchanged,
    /// Probe result changed; the old highlight (if any) was cleared and
    /// `current` (if any) is now highlighted
    Changed {
        previous: Option<ObjectId>,
        current: Option<ObjectId>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HighlightManager {
    emissive: [f32; 3],
    /// Identity of the last probe result, named or not
    last_probed: Option<ObjectId>,
    /// Highlighted object and the emissive it had before
    current: Option<(ObjectId, [f32; 3])>,
}

impl HighlightManager {
    pub fn new(emissive: [f32; 3]) -> Self {
        Self {
            emissive,
            last_probed: None,
            current: None,
        }
    }

    pub fn current(&self) -> Option<ObjectId> {
        self.current.map(|(id, _)| id)
    }

    /// Feeds this frame's forward probe result
    pub fn update(&mut self, scene: &mut Scene, probed: Option<ObjectId>) -> HighlightChange {
        if probed == self.last_probed {
            return HighlightChange::Unchanged;
        }
        self.last_probed = probed;

        let previous = self.clear(scene);

        let interactable = probed.filter(|&id| scene.get(id).is_some_and(|o| o.is_interactable()));
        if let Some(id) = interactable {
            if let Some(saved) = scene.set_emissive(id, self.emissive) {
                self.current = Some((id, saved));
                debug!("Highlighting '{}'", scene.name_of(id).unwrap_or_default());
            }
        }

        HighlightChange::Changed {
            previous,
            current: self.current(),
        }
    }

    /// Removes the marker from the highlighted object, if any
    pub fn clear(&mut self, scene: &mut Scene) -> Option<ObjectId> {
        let (id, saved) = self.current.take()?;
        scene.set_emissive(id, saved);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::Object;

    const GLOW: [f32; 3] = [0.5, 0.5, 0.5];

    fn scene() -> (Scene, ObjectId, ObjectId, ObjectId) {
        let mut scene = Scene::new();
        let cube = scene.add(Object::group().with_name("Cube"));
        let chair = scene.add(Object::group().with_name("Chair"));
        let wall = scene.add(Object::group());
        (scene, cube, chair, wall)
    }

    #[test]
    fn test_highlight_sets_and_restores_emissive() {
        let (mut scene, cube, chair, _) = scene();
        scene.set_emissive(cube, [0.1, 0.0, 0.0]);
        let mut highlight = HighlightManager::new(GLOW);

        highlight.update(&mut scene, Some(cube));
        assert_eq!(highlight.current(), Some(cube));
        assert_eq!(scene.get(cube).unwrap().emissive, GLOW);

        let change = highlight.update(&mut scene, Some(chair));
        assert_eq!(
            change,
            HighlightChange::Changed {
                previous: Some(cube),
                current: Some(chair)
            }
        );
        assert_eq!(scene.get(cube).unwrap().emissive, [0.1, 0.0, 0.0]);
        assert_eq!(scene.get(chair).unwrap().emissive, GLOW);
    }

    #[test]
    fn test_same_object_does_not_retrigger() {
        let (mut scene, cube, _, _) = scene();
        let mut highlight = HighlightManager::new(GLOW);
        highlight.update(&mut scene, Some(cube));

        // Tamper with the marker; an unchanged probe must not touch it again
        scene.set_emissive(cube, [0.9, 0.9, 0.9]);
        for _ in 0..5 {
            assert_eq!(highlight.update(&mut scene, Some(cube)), HighlightChange::Unchanged);
        }
        assert_eq!(scene.get(cube).unwrap().emissive, [0.9, 0.9, 0.9]);
    }

    #[test]
    fn test_unnamed_object_is_never_highlighted() {
        let (mut scene, cube, _, wall) = scene();
        let mut highlight = HighlightManager::new(GLOW);
        highlight.update(&mut scene, Some(cube));

        let change = highlight.update(&mut scene, Some(wall));
        assert_eq!(
            change,
            HighlightChange::Changed {
                previous: Some(cube),
                current: None
            }
        );
        assert_eq!(highlight.current(), None);
        assert_eq!(scene.get(wall).unwrap().emissive, [0.0; 3]);
        assert_eq!(highlight.update(&mut scene, Some(wall)), HighlightChange::Unchanged);
    }

    #[test]
    fn test_nothing_ahead_clears() {
        let (mut scene, cube, _, _) = scene();
        let mut highlight = HighlightManager::new(GLOW);
        highlight.update(&mut scene, Some(cube));
        highlight.update(&mut scene, None);
        assert_eq!(highlight.current(), None);
        assert_eq!(scene.get(cube).unwrap().emissive, [0.0; 3]);
    }
}
