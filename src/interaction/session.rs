use std::time::Duration;

use log::info;

use super::{
    catalog::Catalog,
    highlight::{HighlightChange, HighlightManager},
    input::{InputEvent, InputState},
    inventory::{Inventory, InventoryLine},
    movement::{Displacement, MovementController},
    notification::Notification,
    probe::{Direction, Obstructions, Probe},
};
use crate::{
    config::SessionConfig,
    gfx::{
        camera::FirstPersonCamera,
        scene::{ObjectId, Scene},
    },
};

/// Result of a pointer press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectOutcome {
    Collected {
        name: String,
        found: usize,
        remaining: usize,
    },
    AlreadyCollected,
    NotLocked,
    NothingHighlighted,
}

/// What one call to [`Session::frame`] did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub obstructions: Obstructions,
    pub displacement: Displacement,
    pub highlight: HighlightChange,
}

/// All mutable interaction state for one play session.
///
/// The window layer feeds it [`InputEvent`]s and calls [`Session::frame`] once
/// per rendered frame; nothing here touches the window or the GPU.
pub struct Session {
    config: SessionConfig,
    input: InputState,
    probe: Probe,
    movement: MovementController,
    highlight: HighlightManager,
    inventory: Inventory,
    notification: Notification,
    catalog: Catalog,
}

impl Session {
    pub fn new(config: SessionConfig, catalog: Catalog) -> Self {
        Self {
            input: InputState::new(),
            probe: Probe::new(config.probe_near, config.probe_threshold),
            movement: MovementController::new(&config),
            highlight: HighlightManager::new(config.highlight_emissive),
            inventory: Inventory::new(),
            notification: Notification::new(config.notification_duration),
            catalog,
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn is_locked(&self) -> bool {
        self.input.locked
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    pub fn highlighted(&self) -> Option<ObjectId> {
        self.highlight.current()
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.text()
    }

    pub fn inventory_visible(&self) -> bool {
        self.input.inventory_visible
    }

    pub fn inventory_lines(&self) -> Vec<InventoryLine> {
        self.inventory.lines(&self.catalog)
    }

    /// Applies an input transition; a pointer press also attempts a collection
    pub fn handle_event(&mut self, event: InputEvent, scene: &Scene) -> Option<CollectOutcome> {
        match event {
            InputEvent::PointerDown => Some(self.try_collect(scene)),
            InputEvent::Lock | InputEvent::Unlock => {
                self.input.apply(event);
                info!("Pointer {}", if self.input.locked { "locked" } else { "unlocked" });
                None
            }
            _ => {
                self.input.apply(event);
                None
            }
        }
    }

    /// Moves the highlighted object into the inventory.
    ///
    /// Only effective while locked and while something is highlighted;
    /// collecting an object twice changes nothing.
    pub fn try_collect(&mut self, scene: &Scene) -> CollectOutcome {
        if !self.input.locked {
            return CollectOutcome::NotLocked;
        }
        let Some((id, name)) = self
            .highlight
            .current()
            .and_then(|id| scene.name_of(id).map(|name| (id, name)))
        else {
            return CollectOutcome::NothingHighlighted;
        };
        if !self.inventory.add(id, name) {
            return CollectOutcome::AlreadyCollected;
        }

        let found = self.inventory.len();
        let remaining = scene.interactable_count().saturating_sub(found);
        self.notification
            .show(format!("Found: {found}. Remaining: {remaining}."));
        info!("Collected '{name}' ({found} found, {remaining} remaining)");

        CollectOutcome::Collected {
            name: name.to_string(),
            found,
            remaining,
        }
    }

    /// Per-frame update: probe, move, re-probe ahead, update highlight, tick timers.
    ///
    /// The four movement probes use the camera's horizontal forward vector, so
    /// pitch is ignored for them: looking at the floor never blocks walking
    /// forward. The highlight probe that follows uses the full look direction.
    ///
    /// # Arguments
    /// * `scene` - The room; highlighting changes object emissive colours
    /// * `camera` - Moved by this frame's displacement
    /// * `dt` - Measured frame time. Notifications count it in full; movement
    ///   caps it at [`MAX_STEP_DT`](super::movement::MAX_STEP_DT)
    ///
    /// # Returns
    /// What the probes saw, how far the camera moved and whether the highlight changed
    pub fn frame(
        &mut self,
        scene: &mut Scene,
        camera: &mut FirstPersonCamera,
        dt: Duration,
    ) -> FrameReport {
        let obstructions =
            self.probe
                .cast_all(scene, camera.position, camera.horizontal_forward(), camera.up);
        let displacement = self
            .movement
            .update(&self.input, &obstructions, dt.as_secs_f32());
        displacement.apply_to(camera);

        let ahead = self
            .probe
            .cast(scene, camera.position, camera.forward(), camera.up, Direction::Forward)
            .map(|hit| hit.object);
        let highlight = self.highlight.update(scene, ahead);

        self.notification.tick(dt);

        FrameReport {
            obstructions,
            displacement,
            highlight,
        }
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{InnerSpace, Vector3, Zero};

    use super::*;
    use crate::{
        config::MovementMode,
        gfx::{
            geometry::{generate_box, generate_cube},
            scene::Object,
        },
    };

    const FRAME: Duration = Duration::from_millis(16);

    fn looking_down_z() -> FirstPersonCamera {
        FirstPersonCamera::new(Vector3::zero(), -std::f32::consts::FRAC_PI_2, 0.0, 1.0)
    }

    fn cube(name: Option<&str>, at: Vector3<f32>) -> Object {
        let object = Object::new(vec![generate_cube().into_mesh()]).with_translation(at);
        match name {
            Some(name) => object.with_name(name),
            None => object,
        }
    }

    /// "Cube" straight ahead (-Z), "Chair" to the right (+X)
    fn room() -> (Scene, ObjectId, ObjectId) {
        let mut scene = Scene::new();
        let cube_id = scene.add(cube(Some("Cube"), Vector3::new(0.0, 0.0, -2.0)));
        let chair_id = scene.add(cube(Some("Chair"), Vector3::new(2.0, 0.0, 0.0)));
        (scene, cube_id, chair_id)
    }

    fn session() -> Session {
        Session::new(SessionConfig::default(), Catalog::room_defaults())
    }

    #[test]
    fn test_unobstructed_direction_moves_exactly_one_step() {
        for direction in Direction::ALL {
            let mut scene = Scene::new();
            let mut camera = looking_down_z();
            let mut session = session();
            let expected = direction.vector(camera.horizontal_forward(), camera.up) * 0.1;

            session.handle_event(InputEvent::KeyDown(direction), &scene);
            let report = session.frame(&mut scene, &mut camera, FRAME);

            assert!(!report.obstructions.is_blocked(direction));
            assert!((camera.position - expected).magnitude() < 1e-6, "{direction:?}");
        }
    }

    #[test]
    fn test_obstructed_direction_does_not_move() {
        let (mut scene, _, _) = room();
        let mut camera = looking_down_z();
        let mut session = session();

        session.handle_event(InputEvent::KeyDown(Direction::Forward), &scene);
        let report = session.frame(&mut scene, &mut camera, FRAME);

        assert!(report.obstructions.is_blocked(Direction::Forward));
        assert_eq!(camera.position, Vector3::zero());
    }

    #[test]
    fn test_highlight_does_not_retrigger_on_same_object() {
        let (mut scene, cube_id, _) = room();
        let mut camera = looking_down_z();
        let mut session = session();

        let first = session.frame(&mut scene, &mut camera, FRAME);
        assert_eq!(
            first.highlight,
            HighlightChange::Changed {
                previous: None,
                current: Some(cube_id)
            }
        );
        for _ in 0..3 {
            let again = session.frame(&mut scene, &mut camera, FRAME);
            assert_eq!(again.highlight, HighlightChange::Unchanged);
        }
        assert_eq!(session.highlighted(), Some(cube_id));
    }

    #[test]
    fn test_collect_two_objects_in_order() {
        let (mut scene, _, chair_id) = room();
        let mut camera = looking_down_z();
        let mut session = session();
        session.handle_event(InputEvent::Lock, &scene);

        session.frame(&mut scene, &mut camera, FRAME);
        session.handle_event(InputEvent::PointerDown, &scene);

        camera.yaw = 0.0;
        session.frame(&mut scene, &mut camera, FRAME);
        assert_eq!(session.highlighted(), Some(chair_id));
        let outcome = session.handle_event(InputEvent::PointerDown, &scene);

        assert_eq!(
            outcome,
            Some(CollectOutcome::Collected {
                name: "Chair".to_string(),
                found: 2,
                remaining: 0
            })
        );
        assert_eq!(session.inventory().names(), vec!["Cube", "Chair"]);
        assert_eq!(session.notification(), Some("Found: 2. Remaining: 0."));
    }

    #[test]
    fn test_collecting_twice_keeps_length() {
        let (mut scene, _, _) = room();
        let mut camera = looking_down_z();
        let mut session = session();
        session.handle_event(InputEvent::Lock, &scene);
        session.frame(&mut scene, &mut camera, FRAME);

        session.handle_event(InputEvent::PointerDown, &scene);
        let second = session.handle_event(InputEvent::PointerDown, &scene);

        assert_eq!(second, Some(CollectOutcome::AlreadyCollected));
        assert_eq!(session.inventory().len(), 1);
        assert_eq!(session.notification(), Some("Found: 1. Remaining: 1."));
    }

    #[test]
    fn test_collect_while_unlocked_is_a_no_op() {
        let (mut scene, cube_id, _) = room();
        let mut camera = looking_down_z();
        let mut session = session();
        session.frame(&mut scene, &mut camera, FRAME);

        let outcome = session.handle_event(InputEvent::PointerDown, &scene);

        assert_eq!(outcome, Some(CollectOutcome::NotLocked));
        assert!(session.inventory().is_empty());
        assert_eq!(session.highlighted(), Some(cube_id));
        assert_eq!(session.notification(), None);
    }

    #[test]
    fn test_unnamed_nearest_object_is_not_highlightable() {
        let mut scene = Scene::new();
        let wall = scene.add(cube(None, Vector3::new(0.0, 0.0, -1.5)));
        scene.add(cube(Some("Cube"), Vector3::new(0.0, 0.0, -2.5)));
        let mut camera = looking_down_z();
        let mut session = session();
        session.handle_event(InputEvent::Lock, &scene);

        let report = session.frame(&mut scene, &mut camera, FRAME);

        assert_eq!(
            report.highlight,
            HighlightChange::Changed {
                previous: None,
                current: None
            }
        );
        assert_eq!(session.highlighted(), None);
        assert_eq!(scene.get(wall).unwrap().emissive, [0.0; 3]);
        assert_eq!(
            session.handle_event(InputEvent::PointerDown, &scene),
            Some(CollectOutcome::NothingHighlighted)
        );
    }

    #[test]
    fn test_notification_expires_with_frame_time() {
        let (mut scene, _, _) = room();
        let mut camera = looking_down_z();
        let mut session = session();
        session.handle_event(InputEvent::Lock, &scene);
        session.frame(&mut scene, &mut camera, FRAME);
        session.handle_event(InputEvent::PointerDown, &scene);
        assert!(session.notification().is_some());

        session.frame(&mut scene, &mut camera, Duration::from_secs(2));
        assert_eq!(session.notification(), None);
    }

    #[test]
    fn test_damped_walk_at_low_frame_rate_stops_at_wall() {
        let mut scene = Scene::new();
        // 0.5 thick, near face at z = -36
        scene.add(
            Object::new(vec![generate_box(50.0, 30.0, 0.5).into_mesh()])
                .with_translation(Vector3::new(0.0, 0.0, -36.25)),
        );
        let mut camera = looking_down_z();
        let mut session = Session::new(
            SessionConfig {
                movement_mode: MovementMode::Damped,
                ..Default::default()
            },
            Catalog::new(),
        );
        session.handle_event(InputEvent::KeyDown(Direction::Forward), &scene);

        for _ in 0..60 {
            session.frame(&mut scene, &mut camera, Duration::from_millis(250));
            assert!(camera.position.z > -36.0, "walked into the wall: {:?}", camera.position);
        }
        // It did reach the wall rather than stalling somewhere in the room
        assert!(camera.position.z < -32.9);
    }

    #[test]
    fn test_stalled_frames_count_fully_toward_notification() {
        let (mut scene, _, _) = room();
        let mut camera = looking_down_z();
        let mut session = session();
        session.handle_event(InputEvent::Lock, &scene);
        session.frame(&mut scene, &mut camera, FRAME);
        session.handle_event(InputEvent::PointerDown, &scene);

        session.frame(&mut scene, &mut camera, Duration::from_millis(1200));
        assert!(session.notification().is_some());
        session.frame(&mut scene, &mut camera, Duration::from_millis(1200));
        assert_eq!(session.notification(), None);
    }

    #[test]
    fn test_inventory_overlay_lines() {
        let (mut scene, _, _) = room();
        let mut camera = looking_down_z();
        let mut session = session();
        session.handle_event(InputEvent::Lock, &scene);
        session.handle_event(InputEvent::ToggleInventory, &scene);
        session.frame(&mut scene, &mut camera, FRAME);
        session.handle_event(InputEvent::PointerDown, &scene);

        assert!(session.inventory_visible());
        let lines = session.inventory_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name, "Cube");
        assert_eq!(lines[0].image.as_deref(), Some("images/cube.png"));
    }
}
