//! # Interaction
//!
//! Window-independent gameplay state for walking a room and collecting props:
//!
//! - [`probe`] casts bounded rays in the four movement directions
//! - [`movement`] turns held keys into camera displacement, unless a probe is blocked
//! - [`highlight`] marks the named object straight ahead
//! - [`inventory`], [`catalog`] and [`notification`] track what has been collected
//! - [`session`] ties them together and is what the app drives every frame

pub mod catalog;
pub mod highlight;
pub mod input;
pub mod inventory;
pub mod movement;
pub mod notification;
pub mod probe;
pub mod session;

pub use catalog::{Catalog, CatalogEntry};
pub use highlight::{HighlightChange, HighlightManager};
pub use input::{InputEvent, InputState, KeyBindings};
pub use inventory::{Inventory, InventoryItem, InventoryLine};
pub use movement::{Displacement, MovementController};
pub use notification::Notification;
pub use probe::{Direction, Obstructions, Probe};
pub use session::{CollectOutcome, FrameReport, Session};
