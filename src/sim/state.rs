//! Game state container
//!
//! Everything a deterministic run needs lives here: the live entity list,
//! the phase, and the seeded RNG every random draw goes through.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{EnemyClass, Entity, EntityKind};
use super::spawn;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation frozen
    Paused,
    /// The ship is gone; the world keeps drifting behind the overlay
    GameOver,
}

/// Complete game state (deterministic)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Playfield dimensions; positions wrap at every edge
    pub bounds: Vec2,
    /// Live entities in spawn order
    pub entities: Vec<Entity>,
    /// World RNG; spawning and weapon fire advance it
    pub rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// A fresh world: the ship plus one enemy of each class.
    ///
    /// Axial classes spawn without spin; drifters pick a random integer
    /// spin step.
    pub fn new(seed: u64) -> Self {
        let bounds = Vec2::new(FIELD_WIDTH, FIELD_HEIGHT);
        let mut state = Self {
            seed,
            phase: GamePhase::Playing,
            time_ticks: 0,
            bounds,
            entities: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };

        let id = state.next_entity_id();
        state.entities.push(spawn::ship(id, bounds));
        for class in EnemyClass::ALL {
            state.spawn_enemy(class);
        }

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn one enemy of the given class at a playfield edge
    pub fn spawn_enemy(&mut self, class: EnemyClass) {
        let spin = if class.drifts() {
            self.rng.random_range(-ENEMY_SPIN..ENEMY_SPIN) as f32
        } else {
            0.0
        };
        let id = self.next_entity_id();
        let enemy = spawn::enemy(id, class, spin, self.bounds, &mut self.rng);
        self.entities.push(enemy);
    }

    /// The player's ship, while it is alive
    pub fn ship(&self) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|e| matches!(e.kind, EntityKind::Ship { .. }))
    }

    /// Live enemy count, for the HUD
    pub fn enemy_count(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::Enemy { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_roster() {
        let state = GameState::new(7);
        assert_eq!(state.entities.len(), 5);
        assert_eq!(state.enemy_count(), 4);
        assert!(state.ship().is_some());
        assert_eq!(state.phase, GamePhase::Playing);

        // One enemy of each class, in class order after the ship
        let classes: Vec<EnemyClass> = state
            .entities
            .iter()
            .filter_map(|e| match e.kind {
                EntityKind::Enemy { class, .. } => Some(class),
                _ => None,
            })
            .collect();
        assert_eq!(classes, EnemyClass::ALL);
    }

    #[test]
    fn test_new_world_spin_rules() {
        for seed in 0..32 {
            let state = GameState::new(seed);
            for e in &state.entities {
                if let EntityKind::Enemy { class, spin } = e.kind {
                    if class.drifts() {
                        assert!((-4.0..4.0).contains(&spin));
                        assert_eq!(spin.fract(), 0.0);
                    } else {
                        assert_eq!(spin, 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_entity_ids_are_unique_and_ordered() {
        let mut state = GameState::new(1);
        let ids: Vec<u32> = state.entities.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(state.next_entity_id(), 6);
    }
}
