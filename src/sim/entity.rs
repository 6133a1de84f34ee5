//! The moving objects of the game
//!
//! One struct carries the shared kinematic state; a closed `EntityKind`
//! union carries what differs per variant. Collision reactions are the
//! three `hit_by_*` hooks: they return `None` for variants that do not
//! care, and a buffered [`ContactEvent`] for the one that does.

use glam::Vec2;
use rand::Rng;

use super::geom::{overlaps, wrap_coord};
use super::sprites::{GUMMI_COLORS, SpriteKind};
use super::tick::InputState;
use crate::consts::*;
use crate::vec_from_degrees;

/// Which of the four enemy classes an enemy belongs to.
///
/// Dart and Raider enter on cardinal headings; Mothership and Warship
/// drift on a random heading and spin as they go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyClass {
    Dart,
    Raider,
    Mothership,
    Warship,
}

impl EnemyClass {
    pub const ALL: [EnemyClass; 4] = [
        EnemyClass::Dart,
        EnemyClass::Raider,
        EnemyClass::Mothership,
        EnemyClass::Warship,
    ];

    /// Drifters get a random heading and a per-tick spin
    pub fn drifts(self) -> bool {
        matches!(self, EnemyClass::Mothership | EnemyClass::Warship)
    }

    pub fn sprite(self) -> SpriteKind {
        match self {
            EnemyClass::Dart => SpriteKind::Dart,
            EnemyClass::Raider => SpriteKind::Raider,
            EnemyClass::Mothership => SpriteKind::Mothership,
            EnemyClass::Warship => SpriteKind::Warship,
        }
    }
}

/// Per-variant entity state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    /// The player. `cooldown` is the shared weapon timer; firing is
    /// possible whenever it has run out.
    Ship { cooldown: f32 },
    /// A drifting enemy craft. `spin` is a fixed rotation step applied
    /// once per tick, not scaled by dt.
    Enemy { class: EnemyClass, spin: f32 },
    /// Laser bolt, self-despawns when the fuse runs below zero
    Laser { fuse: f32 },
    /// Slowing projectile, same lifecycle as the laser
    GummiBear { fuse: f32 },
    /// Stationary debris left where the ship died; purely cosmetic
    Wreckage { fuse: f32 },
}

/// Buffered outcome of the collision sweep, applied after the scan completes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactEvent {
    /// An enemy rammed the ship; wreckage appears where the enemy was
    ShipDown { ship: u32, wreckage_at: Vec2 },
    /// A laser connected with an enemy; both are gone
    EnemyShot { enemy: u32, laser: u32 },
    /// A gummi bear stuck to an enemy; the enemy keeps half its velocity
    EnemySlowed { enemy: u32, gummi: u32 },
}

/// A projectile queued during the advance pass and spawned after the sweep,
/// so it first moves and collides on the next tick.
#[derive(Debug, Clone, Copy)]
pub struct FireOrder {
    pub sprite: SpriteKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
}

/// A moving object on the playfield
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: u32,
    pub sprite: SpriteKind,
    /// Position in field units, kept in `[0, W) x [0, H)` by `integrate`
    pub pos: Vec2,
    /// Velocity in field units per second
    pub vel: Vec2,
    /// Heading in degrees, math convention (0° along +x, counterclockwise)
    pub rotation: f32,
    /// Collision radius; zero means the entity never collides into anything
    pub radius: f32,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(
        id: u32,
        sprite: SpriteKind,
        pos: Vec2,
        vel: Vec2,
        rotation: f32,
        radius: f32,
        kind: EntityKind,
    ) -> Self {
        Self {
            id,
            sprite,
            pos,
            vel,
            rotation,
            radius,
            kind,
        }
    }

    /// Advance position by one step and wrap back onto the field.
    pub fn integrate(&mut self, dt: f32, bounds: Vec2) {
        self.pos += dt * self.vel;
        self.pos.x = wrap_coord(self.pos.x, bounds.x);
        self.pos.y = wrap_coord(self.pos.y, bounds.y);
    }

    /// Heading in sprite space (clockwise from straight up), for the renderer
    #[inline]
    pub fn sprite_rotation(&self) -> f32 {
        90.0 - self.rotation
    }

    /// True iff this entity's circle overlaps the other's on the torus
    #[inline]
    pub fn touches(&self, other: &Entity, bounds: Vec2) -> bool {
        overlaps(self.pos, self.radius, other.pos, other.radius, bounds)
    }

    /// Ship controls for one tick: cooldown, steering, thrust, weapon fire.
    /// Returns a projectile order when a weapon fires. No-op for non-ships.
    pub fn pilot(
        &mut self,
        input: &InputState,
        dt: f32,
        rng: &mut impl Rng,
    ) -> Option<FireOrder> {
        let EntityKind::Ship { cooldown } = &mut self.kind else {
            return None;
        };
        *cooldown -= dt;

        if input.rotate_left {
            self.rotation += dt * SHIP_TURN_RATE;
        }
        if input.rotate_right {
            self.rotation -= dt * SHIP_TURN_RATE;
        }
        // Heading after this tick's turn; thrust and fire both use it
        let heading = vec_from_degrees(self.rotation);
        if input.thrust {
            self.vel += dt * SHIP_ACCELERATION * heading;
        }
        if input.reverse {
            self.vel -= dt * SHIP_ACCELERATION * heading;
        }

        let mut order = None;
        if input.fire_laser && *cooldown <= 0.0 {
            order = Some(FireOrder {
                sprite: SpriteKind::Laser,
                pos: self.pos + heading,
                vel: self.vel + LASER_SPEED * heading,
                rotation: self.rotation,
            });
            *cooldown = FIRE_COOLDOWN;
        }
        if input.fire_gummi && *cooldown <= 0.0 {
            let sprite = GUMMI_COLORS[rng.random_range(0..GUMMI_COLORS.len())];
            order = Some(FireOrder {
                sprite,
                pos: self.pos + heading,
                vel: self.vel + GUMMI_SPEED * heading,
                rotation: self.rotation,
            });
            *cooldown = FIRE_COOLDOWN;
        }
        order
    }

    /// Burn down a lifetime fuse. Returns true once the entity is spent.
    ///
    /// Projectiles expire strictly below zero; wreckage already at zero.
    pub fn burn_fuse(&mut self, dt: f32) -> bool {
        match &mut self.kind {
            EntityKind::Laser { fuse } | EntityKind::GummiBear { fuse } => {
                *fuse -= dt;
                *fuse < 0.0
            }
            EntityKind::Wreckage { fuse } => {
                *fuse -= dt;
                *fuse <= 0.0
            }
            _ => false,
        }
    }

    /// Halve both velocity components (gummi bear hit)
    pub fn halve_speed(&mut self) {
        self.vel *= 0.5;
    }

    /// Reaction when the ship overlaps this entity. Enemies destroy the
    /// ship and leave wreckage behind at their own position.
    pub fn hit_by_ship(&self, ship: &Entity) -> Option<ContactEvent> {
        match self.kind {
            EntityKind::Enemy { .. } => Some(ContactEvent::ShipDown {
                ship: ship.id,
                wreckage_at: self.pos,
            }),
            _ => None,
        }
    }

    /// Reaction when an enemy overlaps this entity. Lasers take the enemy
    /// down and are spent.
    pub fn hit_by_laser(&self, enemy: &Entity) -> Option<ContactEvent> {
        match self.kind {
            EntityKind::Laser { .. } => Some(ContactEvent::EnemyShot {
                enemy: enemy.id,
                laser: self.id,
            }),
            _ => None,
        }
    }

    /// Reaction when an enemy overlaps this entity. Gummi bears slow the
    /// enemy and are spent.
    pub fn hit_by_gummibear(&self, enemy: &Entity) -> Option<ContactEvent> {
        match self.kind {
            EntityKind::GummiBear { .. } => Some(ContactEvent::EnemySlowed {
                enemy: enemy.id,
                gummi: self.id,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BOUNDS: Vec2 = Vec2::new(600.0, 800.0);

    fn test_ship(pos: Vec2, rotation: f32) -> Entity {
        Entity::new(
            1,
            SpriteKind::Ship,
            pos,
            Vec2::ZERO,
            rotation,
            SpriteKind::Ship.collision_radius(),
            EntityKind::Ship { cooldown: 0.0 },
        )
    }

    #[test]
    fn test_integrate_moves_and_wraps() {
        let mut e = test_ship(Vec2::new(595.0, 10.0), 0.0);
        e.vel = Vec2::new(100.0, -300.0);
        e.integrate(0.1, BOUNDS);
        assert!((e.pos.x - 5.0).abs() < 0.001);
        assert!((e.pos.y - 780.0).abs() < 0.001);
    }

    #[test]
    fn test_sprite_rotation_is_clockwise_from_up() {
        let e = test_ship(Vec2::ZERO, 90.0);
        assert!((e.sprite_rotation() - 0.0).abs() < 0.001);
        let e = test_ship(Vec2::ZERO, 0.0);
        assert!((e.sprite_rotation() - 90.0).abs() < 0.001);
    }

    #[test]
    fn test_pilot_turns_and_thrusts() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut ship = test_ship(Vec2::new(300.0, 200.0), 0.0);
        let input = InputState {
            rotate_left: true,
            thrust: true,
            ..Default::default()
        };
        ship.pilot(&input, 1.0, &mut rng);
        // One second of turning is 90 degrees; thrust follows the new heading
        assert!((ship.rotation - 90.0).abs() < 0.001);
        assert!(ship.vel.x.abs() < 0.001);
        assert!((ship.vel.y - 70.0).abs() < 0.001);
    }

    #[test]
    fn test_pilot_reverse_thrust_backs_up() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut ship = test_ship(Vec2::new(300.0, 200.0), 0.0);
        let input = InputState {
            reverse: true,
            ..Default::default()
        };
        ship.pilot(&input, 0.5, &mut rng);
        assert!((ship.vel.x + 35.0).abs() < 0.001);
    }

    #[test]
    fn test_pilot_fire_respects_cooldown() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut ship = test_ship(Vec2::new(300.0, 200.0), 90.0);
        let input = InputState {
            fire_laser: true,
            ..Default::default()
        };
        let first = ship.pilot(&input, 1.0 / 120.0, &mut rng);
        assert!(first.is_some());
        // Cooldown just reset; the very next tick must not fire
        let second = ship.pilot(&input, 1.0 / 120.0, &mut rng);
        assert!(second.is_none());
    }

    #[test]
    fn test_pilot_laser_wins_over_gummi() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut ship = test_ship(Vec2::new(300.0, 200.0), 90.0);
        let input = InputState {
            fire_laser: true,
            fire_gummi: true,
            ..Default::default()
        };
        let order = ship.pilot(&input, 1.0 / 120.0, &mut rng).unwrap();
        assert_eq!(order.sprite, SpriteKind::Laser);
    }

    #[test]
    fn test_pilot_gummi_muzzle_velocity() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut ship = test_ship(Vec2::new(300.0, 200.0), 0.0);
        ship.vel = Vec2::new(10.0, 0.0);
        let input = InputState {
            fire_gummi: true,
            ..Default::default()
        };
        let order = ship.pilot(&input, 1.0 / 120.0, &mut rng).unwrap();
        assert!(GUMMI_COLORS.contains(&order.sprite));
        // Ship velocity plus muzzle speed along the heading
        assert!((order.vel.x - 130.0).abs() < 0.001);
        assert!(order.vel.y.abs() < 0.001);
        // Spawns one unit ahead of the ship
        assert!((order.pos.x - 301.0).abs() < 0.001);
    }

    #[test]
    fn test_burn_fuse_projectiles_outlive_zero() {
        let mut laser = Entity::new(
            2,
            SpriteKind::Laser,
            Vec2::ZERO,
            Vec2::ZERO,
            0.0,
            SpriteKind::Laser.collision_radius(),
            EntityKind::Laser { fuse: 0.01 },
        );
        // Strictly-below-zero rule: landing exactly on zero is still alive
        assert!(!laser.burn_fuse(0.01));
        assert!(laser.burn_fuse(0.01));
    }

    #[test]
    fn test_burn_fuse_wreckage_dies_at_zero() {
        let mut mess = Entity::new(
            3,
            SpriteKind::Wreckage,
            Vec2::ZERO,
            Vec2::ZERO,
            0.0,
            0.0,
            EntityKind::Wreckage { fuse: 0.5 },
        );
        assert!(!mess.burn_fuse(0.25));
        assert!(mess.burn_fuse(0.25));
    }

    #[test]
    fn test_hooks_fire_for_the_right_variants() {
        let ship = test_ship(Vec2::new(10.0, 10.0), 90.0);
        let enemy = Entity::new(
            4,
            SpriteKind::Dart,
            Vec2::new(12.0, 10.0),
            Vec2::ZERO,
            0.0,
            SpriteKind::Dart.collision_radius(),
            EntityKind::Enemy {
                class: EnemyClass::Dart,
                spin: 0.0,
            },
        );
        let laser = Entity::new(
            5,
            SpriteKind::Laser,
            Vec2::new(12.0, 10.0),
            Vec2::ZERO,
            0.0,
            SpriteKind::Laser.collision_radius(),
            EntityKind::Laser { fuse: 5.0 },
        );

        assert_eq!(
            enemy.hit_by_ship(&ship),
            Some(ContactEvent::ShipDown {
                ship: 1,
                wreckage_at: enemy.pos
            })
        );
        assert_eq!(
            laser.hit_by_laser(&enemy),
            Some(ContactEvent::EnemyShot { enemy: 4, laser: 5 })
        );
        // Everything else shrugs
        assert_eq!(laser.hit_by_ship(&ship), None);
        assert_eq!(enemy.hit_by_laser(&ship), None);
        assert_eq!(laser.hit_by_gummibear(&enemy), None);
    }

    #[test]
    fn test_halve_speed() {
        let mut enemy = test_ship(Vec2::ZERO, 0.0);
        enemy.vel = Vec2::new(40.0, -40.0);
        enemy.halve_speed();
        assert!((enemy.vel.x - 20.0).abs() < 0.001);
        assert!((enemy.vel.y + 20.0).abs() < 0.001);
    }

    proptest! {
        #[test]
        fn prop_integrate_keeps_position_on_the_field(
            px in 0.0f32..600.0, py in 0.0f32..800.0,
            vx in -500.0f32..500.0, vy in -500.0f32..500.0,
            dt in 0.0f32..0.5,
        ) {
            let mut e = test_ship(Vec2::new(px, py), 0.0);
            e.vel = Vec2::new(vx, vy);
            e.integrate(dt, BOUNDS);
            prop_assert!(e.pos.x >= 0.0 && e.pos.x < 600.0);
            prop_assert!(e.pos.y >= 0.0 && e.pos.y < 800.0);
        }
    }
}
