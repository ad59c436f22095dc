//! Input state as explicit transitions.
//!
//! Window callbacks translate raw events into [`InputEvent`]s; the record
//! below only changes through [`InputState::apply`], so movement and
//! collection can be driven without a window.

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use super::probe::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Direction),
    KeyUp(Direction),
    ToggleInventory,
    /// Primary pointer button pressed
    PointerDown,
    /// Pointer captured; mouse look and collection become active
    Lock,
    /// Pointer released
    Unlock,
}

/// Currently held movement keys plus lock and overlay flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub locked: bool,
    pub inventory_visible: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Forward => self.forward,
            Direction::Backward => self.backward,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn set_held(&mut self, direction: Direction, held: bool) {
        let flag = match direction {
            Direction::Forward => &mut self.forward,
            Direction::Backward => &mut self.backward,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        };
        *flag = held;
    }

    pub fn any_held(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Applies one transition. `PointerDown` carries no state of its own.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(direction) => self.set_held(direction, true),
            InputEvent::KeyUp(direction) => self.set_held(direction, false),
            InputEvent::ToggleInventory => self.inventory_visible = !self.inventory_visible,
            InputEvent::Lock => self.locked = true,
            InputEvent::Unlock => {
                self.locked = false;
                // Key-up events are lost once focus leaves the pointer lock
                self.forward = false;
                self.backward = false;
                self.left = false;
                self.right = false;
            }
            InputEvent::PointerDown => {}
        }
    }
}

/// Keyboard layout: W/ArrowUp, S/ArrowDown, A/ArrowLeft, D/ArrowRight, plus a
/// configurable inventory key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub inventory: KeyCode,
}

impl KeyBindings {
    pub fn new(inventory: KeyCode) -> Self {
        Self { inventory }
    }

    /// Translates a winit key event; keys outside the layout yield `None`
    pub fn map_key_event(&self, event: &KeyEvent) -> Option<InputEvent> {
        let PhysicalKey::Code(code) = event.physical_key else {
            return None;
        };
        self.map_key(code, event.state, event.repeat)
    }

    /// Movement keys report both edges; the inventory key toggles on a fresh press only
    pub fn map_key(&self, code: KeyCode, state: ElementState, repeat: bool) -> Option<InputEvent> {
        if let Some(direction) = direction_for_key(code) {
            return Some(match state {
                ElementState::Pressed => InputEvent::KeyDown(direction),
                ElementState::Released => InputEvent::KeyUp(direction),
            });
        }

        (code == self.inventory && state == ElementState::Pressed && !repeat)
            .then_some(InputEvent::ToggleInventory)
    }
}

pub fn direction_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::KeyW | KeyCode::ArrowUp => Some(Direction::Forward),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(Direction::Backward),
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(Direction::Left),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(Direction::Right),
        _ => None,
    }
}
