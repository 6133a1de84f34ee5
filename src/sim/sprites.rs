//! Sprite footprints and collision radii
//!
//! Shapes are drawn procedurally by the SDF renderer. Collision uses the
//! circle circumscribing each sprite's square footprint.

/// Every drawable sprite in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Ship,
    Dart,
    Raider,
    Mothership,
    Warship,
    Laser,
    GummiRed,
    GummiYellow,
    GummiGreen,
    Wreckage,
}

/// The three gummi bear colorways, picked at fire time
pub const GUMMI_COLORS: [SpriteKind; 3] = [
    SpriteKind::GummiRed,
    SpriteKind::GummiYellow,
    SpriteKind::GummiGreen,
];

impl SpriteKind {
    /// Nominal square footprint width, in logical units
    pub fn footprint(self) -> f32 {
        match self {
            SpriteKind::Ship => 36.0,
            SpriteKind::Dart => 32.0,
            SpriteKind::Raider => 36.0,
            SpriteKind::Mothership => 48.0,
            SpriteKind::Warship => 48.0,
            SpriteKind::Laser => 8.0,
            SpriteKind::GummiRed | SpriteKind::GummiYellow | SpriteKind::GummiGreen => 12.0,
            SpriteKind::Wreckage => 48.0,
        }
    }

    /// Radius of the circle circumscribing the footprint square
    pub fn collision_radius(self) -> f32 {
        self.footprint() * std::f32::consts::FRAC_1_SQRT_2
    }

    /// Shape index for the SDF shader
    pub fn shape_index(self) -> u32 {
        match self {
            SpriteKind::Ship => 0,
            SpriteKind::Dart => 1,
            SpriteKind::Raider => 2,
            SpriteKind::Mothership => 3,
            SpriteKind::Warship => 4,
            SpriteKind::Laser => 5,
            SpriteKind::GummiRed => 6,
            SpriteKind::GummiYellow => 7,
            SpriteKind::GummiGreen => 8,
            SpriteKind::Wreckage => 9,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_radius_circumscribes_footprint() {
        // sqrt((w/2)^2 + (w/2)^2) for a square of width w
        let r = SpriteKind::Ship.collision_radius();
        assert!((r - 25.4558).abs() < 0.001);
        // Half the diagonal always exceeds half the width
        for kind in [SpriteKind::Dart, SpriteKind::Laser, SpriteKind::GummiRed] {
            assert!(kind.collision_radius() > kind.footprint() / 2.0);
        }
    }

    #[test]
    fn test_gummi_colors_share_a_footprint() {
        for color in GUMMI_COLORS {
            assert_eq!(color.footprint(), SpriteKind::GummiRed.footprint());
        }
    }
}
