//=========================================================================
// Physics Engine Boundary
//=========================================================================
//
// The rigid-body solver is an external collaborator. The core talks to it
// only through the `PhysicsEngine` trait: create/destroy bodies, mutate
// forces and coefficients, step, read collision-start events and run
// point queries for hit-testing.
//
// Architecture:
//   Window / TransferCoordinator / PropertyEditor
//            ↓ (&mut dyn PhysicsEngine)
//   PhysicsEngine ── SimpleWorld (bundled reference solver)
//
// Ownership: bodies are referenced by opaque `BodyHandle`s. Whoever
// created a body (a Window) is responsible for removing it.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::core::geometry::Rect;

//=== Module Declarations =================================================

mod simple_world;

//=== Public API ==========================================================

pub use simple_world::SimpleWorld;

//=== Handles & Groups ====================================================

/// Opaque reference to a body owned by a physics engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) u64);

impl BodyHandle {
    /// Raw numeric id, stable for the body's lifetime.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Collision group tag.
///
/// Static bodies only collide with dynamic bodies of the same group, so a
/// window's walls contain only that window's members. Dynamic bodies
/// collide with each other regardless of group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CollisionGroup(pub u32);

//=== Body Description ====================================================

/// Collision shape of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    /// Axis-aligned box (walls, cubes).
    Rectangle { width: f32, height: f32 },

    /// Disc.
    Circle { radius: f32 },

    /// Regular polygon with circumradius `radius`.
    Polygon { sides: u32, radius: f32 },
}

impl BodyShape {
    /// Surface area, used for density-based mass.
    pub fn area(&self) -> f32 {
        match *self {
            Self::Rectangle { width, height } => width * height,
            Self::Circle { radius } => std::f32::consts::PI * radius * radius,
            Self::Polygon { sides, radius } => {
                let n = sides.max(3) as f32;
                0.5 * n * radius * radius * (std::f32::consts::TAU / n).sin()
            }
        }
    }

    /// Radius of the largest circle centred on the body that fits inside it.
    pub fn inscribed_radius(&self) -> f32 {
        match *self {
            Self::Rectangle { width, height } => width.min(height) / 2.0,
            Self::Circle { radius } => radius,
            Self::Polygon { sides, radius } => {
                let n = sides.max(3) as f32;
                radius * (std::f32::consts::PI / n).cos()
            }
        }
    }

    /// Half extents of the shape's bounding box.
    pub fn half_extents(&self) -> Vec2 {
        match *self {
            Self::Rectangle { width, height } => Vec2::new(width / 2.0, height / 2.0),
            Self::Circle { radius } | Self::Polygon { radius, .. } => Vec2::splat(radius),
        }
    }
}

/// Everything needed to create a body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDesc {
    pub position: Vec2,
    pub shape: BodyShape,
    pub label: &'static str,
    pub is_static: bool,
    pub friction_air: f32,
    pub restitution: f32,
    pub group: CollisionGroup,
}

impl BodyDesc {
    /// Dynamic body with no air friction and no bounce.
    pub fn dynamic(position: Vec2, shape: BodyShape, label: &'static str) -> Self {
        Self {
            position,
            shape,
            label,
            is_static: false,
            friction_air: 0.0,
            restitution: 0.0,
            group: CollisionGroup::default(),
        }
    }

    /// Static, collision-only box.
    pub fn wall(center: Vec2, width: f32, height: f32, group: CollisionGroup) -> Self {
        Self {
            position: center,
            shape: BodyShape::Rectangle { width, height },
            label: "wall",
            is_static: true,
            friction_air: 0.0,
            restitution: 0.0,
            group,
        }
    }

    pub fn with_friction_air(mut self, friction_air: f32) -> Self {
        self.friction_air = friction_air;
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_group(mut self, group: CollisionGroup) -> Self {
        self.group = group;
        self
    }
}

//=== Body State ==========================================================

/// Read-only snapshot of a body's simulated state.
///
/// Velocity is displacement per nominal 60 Hz step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f32,
    pub mass: f32,
    pub friction_air: f32,
    pub restitution: f32,
    pub is_static: bool,
}

//=== Collision Event =====================================================

/// A pair of bodies that started touching during the last step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub a: BodyHandle,
    pub b: BodyHandle,

    /// Magnitude of `velocity(a) - velocity(b)` just before resolution.
    pub relative_speed: f32,
}

impl CollisionEvent {
    /// Returns the other body of the pair, if `handle` is one of them.
    pub fn other(&self, handle: BodyHandle) -> Option<BodyHandle> {
        if self.a == handle {
            Some(self.b)
        } else if self.b == handle {
            Some(self.a)
        } else {
            None
        }
    }
}

//=== PhysicsEngine Trait =================================================

/// Rigid-body simulation as seen by the puzzle core.
///
/// Mutators on unknown handles are silent no-ops; queries return `None`.
/// Implementations must be `Send` because the session runs on the logic
/// thread.
pub trait PhysicsEngine: Send {
    /// Adds a body to the world and returns its handle.
    fn create_body(&mut self, desc: BodyDesc) -> BodyHandle;

    /// Removes a body. Returns `false` if it did not exist.
    fn remove_body(&mut self, handle: BodyHandle) -> bool;

    /// True while the body exists in the world.
    fn contains(&self, handle: BodyHandle) -> bool;

    /// Accumulates a force applied at the body's centre for the next step.
    fn apply_force(&mut self, handle: BodyHandle, force: Vec2);

    fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2);

    fn set_friction_air(&mut self, handle: BodyHandle, friction_air: f32);

    fn set_restitution(&mut self, handle: BodyHandle, restitution: f32);

    fn set_mass(&mut self, handle: BodyHandle, mass: f32);

    fn set_collision_group(&mut self, handle: BodyHandle, group: CollisionGroup);

    /// Current simulated state of the body.
    fn body(&self, handle: BodyHandle) -> Option<BodyState>;

    /// World-space bounding box of the body.
    fn bounds(&self, handle: BodyHandle) -> Option<Rect>;

    /// Advances the simulation by `dt_ms` milliseconds.
    fn step(&mut self, dt_ms: f32);

    /// Returns and clears the collision-start events of the last step(s).
    fn drain_collisions(&mut self) -> Vec<CollisionEvent>;

    /// All bodies whose shape contains `point`, static ones included.
    fn query_point(&self, point: Vec2) -> Vec<BodyHandle>;

    /// Number of bodies in the world.
    fn body_count(&self) -> usize;
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_areas() {
        let cube = BodyShape::Rectangle { width: 25.0, height: 25.0 };
        assert_eq!(cube.area(), 625.0);

        let triangle = BodyShape::Polygon { sides: 3, radius: 15.0 };
        let expected = 0.5 * 3.0 * 225.0 * (std::f32::consts::TAU / 3.0).sin();
        assert!((triangle.area() - expected).abs() < 1e-3);
    }

    #[test]
    fn inscribed_radius_fits_inside_shape() {
        let cube = BodyShape::Rectangle { width: 24.0, height: 30.0 };
        assert_eq!(cube.inscribed_radius(), 12.0);

        let sphere = BodyShape::Circle { radius: 12.0 };
        assert_eq!(sphere.inscribed_radius(), 12.0);

        let triangle = BodyShape::Polygon { sides: 3, radius: 15.0 };
        assert!((triangle.inscribed_radius() - 7.5).abs() < 1e-4);
    }

    #[test]
    fn collision_event_other() {
        let event = CollisionEvent {
            a: BodyHandle(1),
            b: BodyHandle(2),
            relative_speed: 3.0,
        };
        assert_eq!(event.other(BodyHandle(1)), Some(BodyHandle(2)));
        assert_eq!(event.other(BodyHandle(2)), Some(BodyHandle(1)));
        assert_eq!(event.other(BodyHandle(3)), None);
    }
}
