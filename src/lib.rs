//! Gateroids - a toroidal-playfield arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collision sweep)
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: User preferences

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions in logical units; positions wrap at every edge
    pub const FIELD_WIDTH: f32 = 600.0;
    pub const FIELD_HEIGHT: f32 = 800.0;

    /// Ship thrust (units/s²) along the current heading
    pub const SHIP_ACCELERATION: f32 = 70.0;
    /// Ship turn rate (degrees/s)
    pub const SHIP_TURN_RATE: f32 = 90.0;
    /// Shared weapon cooldown (seconds); the laser wins when both triggers are held
    pub const FIRE_COOLDOWN: f32 = 0.3;

    /// Enemy velocity components are integer units/s drawn below this bound
    pub const ENEMY_SPEED: i32 = 60;
    /// Lower bound for axial enemy velocity components
    pub const ENEMY_SPEED_MIN: i32 = 10;
    /// Drifter spin bound, degrees per simulation tick (not per second)
    pub const ENEMY_SPIN: i32 = 4;

    /// Muzzle speeds (units/s, added on top of the ship's velocity)
    pub const LASER_SPEED: f32 = 100.0;
    pub const GUMMI_SPEED: f32 = 120.0;

    /// Projectile and debris lifetimes (seconds)
    pub const LASER_FUSE: f32 = 5.0;
    pub const GUMMI_FUSE: f32 = 3.0;
    pub const WRECKAGE_FUSE: f32 = 1.0;
}

/// Unit vector for a heading in degrees (math convention, 0° along +x)
#[inline]
pub fn vec_from_degrees(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}
