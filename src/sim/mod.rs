//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod entity;
pub mod geom;
pub mod spawn;
pub mod sprites;
pub mod state;
pub mod tick;

pub use entity::{ContactEvent, EnemyClass, Entity, EntityKind, FireOrder};
pub use geom::{overlaps, wrap_coord, wrap_distance};
pub use sprites::{SpriteKind, GUMMI_COLORS};
pub use state::{GamePhase, GameState};
pub use tick::{InputState, tick};
