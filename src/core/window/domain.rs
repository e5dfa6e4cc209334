//=========================================================================
// Domains & Physics Objects
//=========================================================================
//
// A window's domain is its physical regime. The domain decides the
// gravity, air friction and restitution its members feel, plus the
// background the renderer paints behind them.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::core::physics::{BodyHandle, BodyShape};

//=== Domain ==============================================================

/// Physical regime of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Low gravity, air drag, half bounce.
    Lunar,

    /// Weightless, frictionless, perfectly elastic.
    Void,
}

impl Domain {
    /// Physics coefficients applied to members of this domain.
    pub fn profile(&self) -> PhysicsProfile {
        match self {
            Self::Lunar => PhysicsProfile {
                gravity: Vec2::new(0.0, 0.0005),
                friction_air: 0.05,
                restitution: 0.5,
            },
            Self::Void => PhysicsProfile {
                gravity: Vec2::ZERO,
                friction_air: 0.0,
                restitution: 1.0,
            },
        }
    }

    pub fn background(&self) -> Background {
        match self {
            Self::Lunar => Background::Grid,
            Self::Void => Background::Starless,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Lunar => "lunar",
            Self::Void => "void",
        }
    }
}

//=== PhysicsProfile ======================================================

/// Per-domain physics coefficients.
///
/// Gravity is applied as `F = gravity * mass` every tick, so it is an
/// acceleration independent of the member's mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsProfile {
    pub gravity: Vec2,
    pub friction_air: f32,
    pub restitution: f32,
}

//=== Background ==========================================================

/// Background identity handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Background {
    /// Light surface with a faint grid.
    Grid,

    /// Flat black.
    Starless,
}

//=== Object Shape & Label ================================================

/// Shape kinds a window can spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectShape {
    Cube,
    Sphere,
    Triangle,
}

impl ObjectShape {
    pub fn body_shape(&self) -> BodyShape {
        match self {
            Self::Cube => BodyShape::Rectangle { width: 25.0, height: 25.0 },
            Self::Sphere => BodyShape::Circle { radius: 12.0 },
            Self::Triangle => BodyShape::Polygon { sides: 3, radius: 15.0 },
        }
    }
}

/// Semantic label carried by an object for its whole lifetime.
///
/// Labels select sound and visual treatment and take part in the alchemy
/// check; they never change on transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectLabel {
    Mass,
    Void,
}

impl ObjectLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mass => "mass",
            Self::Void => "void",
        }
    }
}

//=== PhysicsObject =======================================================

/// Annotated reference to a member body.
///
/// Position, velocity and angle live in the physics engine; this only
/// records what the core needs to reason about the body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsObject {
    pub handle: BodyHandle,
    pub shape: ObjectShape,
    pub label: ObjectLabel,

    /// Domain of the window that currently owns the object.
    pub domain: Domain,
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lunar_and_void_profiles() {
        let lunar = Domain::Lunar.profile();
        assert_eq!(lunar.gravity, Vec2::new(0.0, 0.0005));
        assert_eq!(lunar.friction_air, 0.05);
        assert_eq!(lunar.restitution, 0.5);

        let void = Domain::Void.profile();
        assert_eq!(void.gravity, Vec2::ZERO);
        assert_eq!(void.friction_air, 0.0);
        assert_eq!(void.restitution, 1.0);
    }

    #[test]
    fn shapes_map_to_fixed_sizes() {
        assert_eq!(
            ObjectShape::Cube.body_shape(),
            BodyShape::Rectangle { width: 25.0, height: 25.0 }
        );
        assert_eq!(ObjectShape::Sphere.body_shape(), BodyShape::Circle { radius: 12.0 });
        assert_eq!(
            ObjectShape::Triangle.body_shape(),
            BodyShape::Polygon { sides: 3, radius: 15.0 }
        );
    }
}
