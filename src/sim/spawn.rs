//! Entity construction: the ship, edge spawns for enemies, projectiles
//! and wreckage
//!
//! Enemy velocity components and headings are sampled as integers, the
//! field's native tuning grain.

use glam::Vec2;
use rand::Rng;

use super::entity::{EnemyClass, Entity, EntityKind, FireOrder};
use super::geom::wrap_coord;
use super::sprites::SpriteKind;
use crate::consts::*;

/// Which playfield edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Right,
    Top,
}

/// The player's ship, parked in the lower half of the field facing up
pub fn ship(id: u32, bounds: Vec2) -> Entity {
    Entity::new(
        id,
        SpriteKind::Ship,
        Vec2::new(bounds.x / 2.0, bounds.y / 4.0),
        Vec2::ZERO,
        90.0,
        SpriteKind::Ship.collision_radius(),
        EntityKind::Ship { cooldown: 0.0 },
    )
}

/// One enemy of the given class entering from a random edge.
///
/// Axial classes (Dart, Raider) fly one of the four cardinal headings with
/// both velocity components sharing the heading's sign. Drifters take any
/// heading and any component mix, possibly near-zero.
pub fn enemy(id: u32, class: EnemyClass, spin: f32, bounds: Vec2, rng: &mut impl Rng) -> Entity {
    let edge = if rng.random_bool(0.5) {
        Edge::Right
    } else {
        Edge::Top
    };
    let pos = edge_position(edge, bounds, rng);

    let (rotation, vel) = if class.drifts() {
        let rotation = rng.random_range(0..360) as f32;
        let vel = Vec2::new(
            rng.random_range(-ENEMY_SPEED..ENEMY_SPEED) as f32,
            rng.random_range(-ENEMY_SPEED..ENEMY_SPEED) as f32,
        );
        (rotation, vel)
    } else {
        let positive = rng.random_bool(0.5);
        let rotation = match (edge, positive) {
            (Edge::Right, true) => 0.0,
            (Edge::Right, false) => 180.0,
            (Edge::Top, true) => 90.0,
            (Edge::Top, false) => 270.0,
        };
        let band = if positive {
            ENEMY_SPEED_MIN..ENEMY_SPEED
        } else {
            -ENEMY_SPEED..-ENEMY_SPEED_MIN
        };
        let vel = Vec2::new(
            rng.random_range(band.clone()) as f32,
            rng.random_range(band) as f32,
        );
        (rotation, vel)
    };

    Entity::new(
        id,
        class.sprite(),
        pos,
        vel,
        rotation,
        class.sprite().collision_radius(),
        EntityKind::Enemy { class, spin },
    )
}

/// A projectile from a [`FireOrder`], wrapped onto the field in case the
/// muzzle offset pokes past an edge
pub fn projectile(id: u32, order: FireOrder, bounds: Vec2) -> Entity {
    let kind = match order.sprite {
        SpriteKind::Laser => EntityKind::Laser { fuse: LASER_FUSE },
        _ => EntityKind::GummiBear { fuse: GUMMI_FUSE },
    };
    let pos = Vec2::new(
        wrap_coord(order.pos.x, bounds.x),
        wrap_coord(order.pos.y, bounds.y),
    );
    Entity::new(
        id,
        order.sprite,
        pos,
        order.vel,
        order.rotation,
        order.sprite.collision_radius(),
        kind,
    )
}

/// Stationary debris where the ship went down. Radius zero: wreckage is
/// scenery, nothing collides with it.
pub fn wreckage(id: u32, pos: Vec2) -> Entity {
    Entity::new(
        id,
        SpriteKind::Wreckage,
        pos,
        Vec2::ZERO,
        0.0,
        0.0,
        EntityKind::Wreckage {
            fuse: WRECKAGE_FUSE,
        },
    )
}

/// Entry point on the chosen edge. Both far edges are the same torus line
/// as the near ones, so coordinates land on the canonical seam.
fn edge_position(edge: Edge, bounds: Vec2, rng: &mut impl Rng) -> Vec2 {
    match edge {
        Edge::Right => Vec2::new(
            wrap_coord(bounds.x, bounds.x),
            rng.random_range(0..bounds.y as i32) as f32,
        ),
        Edge::Top => Vec2::new(rng.random_range(0..bounds.x as i32) as f32, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BOUNDS: Vec2 = Vec2::new(600.0, 800.0);

    #[test]
    fn test_ship_spawn_pose() {
        let s = ship(1, BOUNDS);
        assert!((s.pos.x - 300.0).abs() < 0.001);
        assert!((s.pos.y - 200.0).abs() < 0.001);
        assert!((s.rotation - 90.0).abs() < 0.001);
        assert_eq!(s.vel, Vec2::ZERO);
        assert!(matches!(s.kind, EntityKind::Ship { cooldown } if cooldown == 0.0));
    }

    #[test]
    fn test_axial_enemies_fly_cardinal_headings() {
        for seed in 0..64 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let e = enemy(1, EnemyClass::Dart, 0.0, BOUNDS, &mut rng);

            assert!([0.0, 90.0, 180.0, 270.0].contains(&e.rotation));
            // Both components share a sign and sit inside the speed band
            if e.rotation == 0.0 || e.rotation == 90.0 {
                assert!(e.vel.x >= 10.0 && e.vel.x < 60.0);
                assert!(e.vel.y >= 10.0 && e.vel.y < 60.0);
            } else {
                assert!(e.vel.x >= -60.0 && e.vel.x < -10.0);
                assert!(e.vel.y >= -60.0 && e.vel.y < -10.0);
            }
            // Integer sampling
            assert_eq!(e.vel.x.fract(), 0.0);
            assert_eq!(e.vel.y.fract(), 0.0);
        }
    }

    #[test]
    fn test_drifters_take_any_heading_and_mixed_components() {
        let mut rng = Pcg32::seed_from_u64(99);
        let mut saw_mixed_signs = false;
        for id in 0..64 {
            let e = enemy(id, EnemyClass::Mothership, 1.0, BOUNDS, &mut rng);
            assert!(e.rotation >= 0.0 && e.rotation < 360.0);
            assert!(e.vel.x >= -60.0 && e.vel.x < 60.0);
            assert!(e.vel.y >= -60.0 && e.vel.y < 60.0);
            if e.vel.x.signum() != e.vel.y.signum() {
                saw_mixed_signs = true;
            }
        }
        // Unlike axial craft, drifter components are sampled independently
        assert!(saw_mixed_signs);
    }

    #[test]
    fn test_enemies_enter_on_a_seam() {
        let mut rng = Pcg32::seed_from_u64(3);
        for id in 0..32 {
            let e = enemy(id, EnemyClass::Warship, 0.0, BOUNDS, &mut rng);
            // Right edge canonicalizes to the x = 0 seam, top edge to y = 0
            assert!(e.pos.x == 0.0 || e.pos.y == 0.0);
            assert!(e.pos.x >= 0.0 && e.pos.x < 600.0);
            assert!(e.pos.y >= 0.0 && e.pos.y < 800.0);
        }
    }

    #[test]
    fn test_projectile_takes_order_kinematics() {
        let order = FireOrder {
            sprite: SpriteKind::Laser,
            pos: Vec2::new(599.5, 100.0),
            vel: Vec2::new(100.0, 5.0),
            rotation: 0.0,
        };
        let p = projectile(9, order, BOUNDS);
        assert!(matches!(p.kind, EntityKind::Laser { fuse } if (fuse - 5.0).abs() < 0.001));
        assert!((p.pos.x - 599.5).abs() < 0.001);
        assert!((p.vel.x - 100.0).abs() < 0.001);

        let poked = FireOrder {
            pos: Vec2::new(600.5, 100.0),
            ..order
        };
        let p = projectile(10, poked, BOUNDS);
        // Muzzle offset past the edge wraps back in
        assert!((p.pos.x - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_wreckage_is_inert_scenery() {
        let w = wreckage(4, Vec2::new(123.0, 456.0));
        assert_eq!(w.radius, 0.0);
        assert_eq!(w.vel, Vec2::ZERO);
        assert!(matches!(w.kind, EntityKind::Wreckage { fuse } if (fuse - 1.0).abs() < 0.001));
    }
}
