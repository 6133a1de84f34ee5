//! Fixed timestep simulation tick
//!
//! Advances every entity, then runs the pairwise overlap sweep, then
//! applies the buffered outcomes. Nothing is removed or spawned mid-scan;
//! a projectile fired this tick first moves and collides on the next one.

use glam::Vec2;

use super::entity::{ContactEvent, EntityKind, FireOrder};
use super::spawn;
use super::state::{GamePhase, GameState};

/// Held-key state for a single tick, owned by the shell
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Counterclockwise turn (Left arrow)
    pub rotate_left: bool,
    /// Clockwise turn (Right arrow)
    pub rotate_right: bool,
    /// Accelerate along the current heading (Up arrow)
    pub thrust: bool,
    /// Accelerate against the current heading (Down arrow)
    pub reverse: bool,
    /// Fire the laser (Space); wins over the gummi when both are held
    pub fire_laser: bool,
    /// Fire a gummi bear (G)
    pub fire_gummi: bool,
    /// Pause toggle; one-shot, cleared by the shell after each tick
    pub pause: bool,
}

/// Advance the game state by one timestep
pub fn tick(state: &mut GameState, input: &InputState, dt: f32) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }
    if state.phase == GamePhase::Paused {
        return;
    }

    state.time_ticks += 1;
    let bounds = state.bounds;

    // Advance pass: steer, spin, integrate, burn fuses. Weapon fire and
    // lifetime expiries are buffered; the entity list itself stays intact
    // until the sweep has seen the whole frame.
    let mut fired: Vec<FireOrder> = Vec::new();
    let mut despawn: Vec<u32> = Vec::new();
    {
        let GameState { entities, rng, .. } = state;
        for entity in entities.iter_mut() {
            match entity.kind {
                EntityKind::Ship { .. } => {
                    if let Some(order) = entity.pilot(input, dt, rng) {
                        fired.push(order);
                    }
                    entity.integrate(dt, bounds);
                }
                EntityKind::Enemy { spin, .. } => {
                    // Fixed per-tick step, deliberately independent of dt
                    entity.rotation += spin;
                    entity.integrate(dt, bounds);
                }
                EntityKind::Laser { .. } | EntityKind::GummiBear { .. } => {
                    entity.integrate(dt, bounds);
                    if entity.burn_fuse(dt) {
                        despawn.push(entity.id);
                    }
                }
                EntityKind::Wreckage { .. } => {
                    // Wreckage stays put; it only burns down
                    if entity.burn_fuse(dt) {
                        despawn.push(entity.id);
                    }
                }
            }
        }
    }

    // Sweep pass: the ship probes everything, each enemy probes everything.
    // The probed entity decides the reaction through its hit_by_* hook, and
    // reactions are buffered so the scan never observes a half-applied frame.
    let mut events: Vec<ContactEvent> = Vec::new();
    for scanner in &state.entities {
        match scanner.kind {
            EntityKind::Ship { .. } => {
                for other in &state.entities {
                    if other.id == scanner.id || !scanner.touches(other, bounds) {
                        continue;
                    }
                    if let Some(event) = other.hit_by_ship(scanner) {
                        events.push(event);
                    }
                }
            }
            EntityKind::Enemy { .. } => {
                for other in &state.entities {
                    if other.id == scanner.id || !scanner.touches(other, bounds) {
                        continue;
                    }
                    if let Some(event) = other.hit_by_laser(scanner) {
                        events.push(event);
                    }
                    if let Some(event) = other.hit_by_gummibear(scanner) {
                        events.push(event);
                    }
                }
            }
            _ => {}
        }
    }

    // Apply pass. Despawns are dedup'd so a doubly-claimed entity goes away
    // exactly once; the ship can only be destroyed once per frame.
    let mut crash_site: Option<Vec2> = None;
    for event in &events {
        match *event {
            ContactEvent::ShipDown { ship, wreckage_at } => {
                if crash_site.is_none() {
                    crash_site = Some(wreckage_at);
                    despawn.push(ship);
                    state.phase = GamePhase::GameOver;
                }
            }
            ContactEvent::EnemyShot { enemy, laser } => {
                despawn.push(enemy);
                despawn.push(laser);
            }
            ContactEvent::EnemySlowed { enemy, gummi } => {
                if let Some(target) = state.entities.iter_mut().find(|e| e.id == enemy) {
                    target.halve_speed();
                }
                despawn.push(gummi);
            }
        }
    }

    despawn.sort_unstable();
    despawn.dedup();
    state.entities.retain(|e| !despawn.contains(&e.id));

    if let Some(at) = crash_site {
        let id = state.next_entity_id();
        state.entities.push(spawn::wreckage(id, at));
    }
    for order in fired {
        let id = state.next_entity_id();
        state.entities.push(spawn::projectile(id, order, bounds));
    }
}
