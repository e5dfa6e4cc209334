//=========================================================================
// SimpleWorld
//=========================================================================
//
// Small reference implementation of `PhysicsEngine`.
//
// Pipeline (step):
//   1. Integrate dynamic bodies (forces → velocity → position)
//   2. Resolve dynamic-vs-static contacts (same collision group only)
//   3. Resolve dynamic-vs-dynamic contacts
//   4. Emit collision-start events for contact pairs new this step
//
// Dynamic bodies collide as circles of their inscribed radius, static
// bodies as axis-aligned boxes. Velocity is stored as displacement per
// nominal 60 Hz step so coefficients read like a typical 2-D web engine.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use log::trace;

//=== Internal Dependencies ===============================================

use super::{
    BodyDesc, BodyHandle, BodyShape, BodyState, CollisionEvent, CollisionGroup, PhysicsEngine,
};
use crate::core::geometry::Rect;

//=== Constants ===========================================================

/// Nominal step length velocities are expressed against.
const BASE_DT_MS: f32 = 1000.0 / 60.0;

/// Longest step integrated at once; larger deltas are clamped.
const MAX_DT_MS: f32 = 1000.0 / 30.0;

/// Mass per unit area.
const DENSITY: f32 = 0.001;

//=== Body ================================================================

#[derive(Debug, Clone)]
struct Body {
    handle: BodyHandle,
    label: &'static str,
    shape: BodyShape,
    position: Vec2,
    velocity: Vec2,
    force: Vec2,
    angle: f32,
    mass: f32,
    friction_air: f32,
    restitution: f32,
    is_static: bool,
    group: CollisionGroup,
}

impl Body {
    fn radius(&self) -> f32 {
        self.shape.inscribed_radius()
    }

    fn aabb(&self) -> Rect {
        let half = self.shape.half_extents();
        Rect::new(
            self.position.x - half.x,
            self.position.y - half.y,
            half.x * 2.0,
            half.y * 2.0,
        )
    }

    fn contains_point(&self, point: Vec2) -> bool {
        match self.shape {
            BodyShape::Rectangle { .. } => self.aabb().contains(point),
            BodyShape::Circle { radius } | BodyShape::Polygon { radius, .. } => {
                self.position.distance(point) <= radius
            }
        }
    }

    fn state(&self) -> BodyState {
        BodyState {
            position: self.position,
            velocity: self.velocity,
            angle: self.angle,
            mass: self.mass,
            friction_air: self.friction_air,
            restitution: self.restitution,
            is_static: self.is_static,
        }
    }
}

//=== SimpleWorld =========================================================

/// Deterministic impulse-based world used by the session host and tests.
pub struct SimpleWorld {
    bodies: Vec<Body>,
    next_id: u64,
    contacts: HashSet<(BodyHandle, BodyHandle)>,
    pending_events: Vec<CollisionEvent>,
}

impl SimpleWorld {
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            next_id: 1,
            contacts: HashSet::new(),
            pending_events: Vec::new(),
        }
    }

    /// Moves a body without going through integration.
    #[cfg(test)]
    pub(crate) fn teleport(&mut self, handle: BodyHandle, position: Vec2) {
        if let Some(body) = self.get_mut(handle) {
            body.position = position;
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn index_of(&self, handle: BodyHandle) -> Option<usize> {
        self.bodies.iter().position(|b| b.handle == handle)
    }

    fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.handle == handle)
    }

    fn get(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.iter().find(|b| b.handle == handle)
    }

    fn integrate(&mut self, dt: f32) {
        let scale = dt / BASE_DT_MS;
        let dt2 = dt * dt;

        for body in self.bodies.iter_mut().filter(|b| !b.is_static) {
            let damping = (1.0 - body.friction_air * scale).max(0.0);
            let accel = body.force / body.mass;
            body.velocity = body.velocity * damping + accel * dt2;
            body.position += body.velocity * scale;
            body.force = Vec2::ZERO;
        }
    }

    /// Pushes dynamic circles out of static boxes of their own group.
    fn solve_static_contacts(&mut self, touching: &mut HashMap<(BodyHandle, BodyHandle), f32>) {
        let walls: Vec<(BodyHandle, Rect, f32, CollisionGroup)> = self
            .bodies
            .iter()
            .filter(|b| b.is_static)
            .map(|b| (b.handle, b.aabb(), b.restitution, b.group))
            .collect();

        for body in self.bodies.iter_mut().filter(|b| !b.is_static) {
            let radius = body.radius();

            for &(wall, rect, wall_restitution, group) in &walls {
                if group != body.group {
                    continue;
                }

                let closest = Vec2::new(
                    body.position.x.clamp(rect.x, rect.right()),
                    body.position.y.clamp(rect.y, rect.bottom()),
                );
                let delta = body.position - closest;
                let dist_sq = delta.length_squared();
                if dist_sq >= radius * radius {
                    continue;
                }

                touching
                    .entry(ordered(body.handle, wall))
                    .or_insert(body.velocity.length());

                let (normal, push) = if dist_sq < 1e-4 {
                    // Centre inside the box: leave through the nearest edge
                    let edges = [
                        (body.position.x - rect.x, Vec2::NEG_X),
                        (rect.right() - body.position.x, Vec2::X),
                        (body.position.y - rect.y, Vec2::NEG_Y),
                        (rect.bottom() - body.position.y, Vec2::Y),
                    ];
                    let (depth, normal) = edges
                        .into_iter()
                        .fold((f32::MAX, Vec2::X), |best, e| if e.0 < best.0 { e } else { best });
                    (normal, depth + radius)
                } else {
                    let dist = dist_sq.sqrt();
                    (delta / dist, radius - dist)
                };

                body.position += normal * push;

                let vn = body.velocity.dot(normal);
                if vn < 0.0 {
                    let e = body.restitution.max(wall_restitution);
                    body.velocity -= normal * vn * (1.0 + e);
                }
            }
        }
    }

    fn solve_dynamic_contacts(&mut self, touching: &mut HashMap<(BodyHandle, BodyHandle), f32>) {
        let dynamic: Vec<usize> = (0..self.bodies.len())
            .filter(|&i| !self.bodies[i].is_static)
            .collect();

        for (n, &i) in dynamic.iter().enumerate() {
            for &j in &dynamic[n + 1..] {
                let (left, right) = self.bodies.split_at_mut(j);
                let a = &mut left[i];
                let b = &mut right[0];

                let delta = b.position - a.position;
                let dist = delta.length();
                let reach = a.radius() + b.radius();
                if dist >= reach {
                    continue;
                }

                touching
                    .entry(ordered(a.handle, b.handle))
                    .or_insert((a.velocity - b.velocity).length());

                let normal = if dist > 1e-6 { delta / dist } else { Vec2::X };
                let inv_a = 1.0 / a.mass;
                let inv_b = 1.0 / b.mass;
                let inv_sum = inv_a + inv_b;

                let overlap = reach - dist;
                a.position -= normal * overlap * (inv_a / inv_sum);
                b.position += normal * overlap * (inv_b / inv_sum);

                let closing = (b.velocity - a.velocity).dot(normal);
                if closing < 0.0 {
                    let e = a.restitution.max(b.restitution);
                    let impulse = -(1.0 + e) * closing / inv_sum;
                    a.velocity -= normal * impulse * inv_a;
                    b.velocity += normal * impulse * inv_b;
                }
            }
        }
    }
}

impl Default for SimpleWorld {
    fn default() -> Self {
        Self::new()
    }
}

fn ordered(a: BodyHandle, b: BodyHandle) -> (BodyHandle, BodyHandle) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

//=== PhysicsEngine Implementation ========================================

impl PhysicsEngine for SimpleWorld {
    fn create_body(&mut self, desc: BodyDesc) -> BodyHandle {
        let handle = BodyHandle(self.next_id);
        self.next_id += 1;

        let mass = if desc.is_static {
            f32::INFINITY
        } else {
            (desc.shape.area() * DENSITY).max(f32::EPSILON)
        };

        self.bodies.push(Body {
            handle,
            label: desc.label,
            shape: desc.shape,
            position: desc.position,
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
            angle: 0.0,
            mass,
            friction_air: desc.friction_air,
            restitution: desc.restitution,
            is_static: desc.is_static,
            group: desc.group,
        });

        trace!("created body {:?} ({})", handle, desc.label);
        handle
    }

    fn remove_body(&mut self, handle: BodyHandle) -> bool {
        match self.index_of(handle) {
            Some(index) => {
                self.bodies.remove(index);
                self.contacts.retain(|&(a, b)| a != handle && b != handle);
                true
            }
            None => false,
        }
    }

    fn contains(&self, handle: BodyHandle) -> bool {
        self.index_of(handle).is_some()
    }

    fn apply_force(&mut self, handle: BodyHandle, force: Vec2) {
        if let Some(body) = self.get_mut(handle) {
            if !body.is_static {
                body.force += force;
            }
        }
    }

    fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2) {
        if let Some(body) = self.get_mut(handle) {
            if !body.is_static {
                body.velocity = velocity;
            }
        }
    }

    fn set_friction_air(&mut self, handle: BodyHandle, friction_air: f32) {
        if let Some(body) = self.get_mut(handle) {
            body.friction_air = friction_air;
        }
    }

    fn set_restitution(&mut self, handle: BodyHandle, restitution: f32) {
        if let Some(body) = self.get_mut(handle) {
            body.restitution = restitution;
        }
    }

    fn set_mass(&mut self, handle: BodyHandle, mass: f32) {
        if let Some(body) = self.get_mut(handle) {
            if !body.is_static {
                body.mass = mass.max(f32::EPSILON);
            }
        }
    }

    fn set_collision_group(&mut self, handle: BodyHandle, group: CollisionGroup) {
        if let Some(body) = self.get_mut(handle) {
            body.group = group;
        }
    }

    fn body(&self, handle: BodyHandle) -> Option<BodyState> {
        self.get(handle).map(Body::state)
    }

    fn bounds(&self, handle: BodyHandle) -> Option<Rect> {
        self.get(handle).map(Body::aabb)
    }

    fn step(&mut self, dt_ms: f32) {
        let dt = dt_ms.clamp(0.0, MAX_DT_MS);
        if dt <= 0.0 {
            return;
        }

        self.integrate(dt);

        let mut touching = HashMap::new();
        self.solve_static_contacts(&mut touching);
        self.solve_dynamic_contacts(&mut touching);

        let mut started: Vec<CollisionEvent> = touching
            .iter()
            .filter(|(pair, _)| !self.contacts.contains(pair))
            .map(|(&(a, b), &relative_speed)| CollisionEvent { a, b, relative_speed })
            .collect();
        started.sort_by_key(|e| (e.a, e.b));

        self.contacts = touching.into_keys().collect();
        self.pending_events.extend(started);
    }

    fn drain_collisions(&mut self) -> Vec<CollisionEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn query_point(&self, point: Vec2) -> Vec<BodyHandle> {
        self.bodies
            .iter()
            .filter(|b| b.contains_point(point))
            .map(|b| b.handle)
            .collect()
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(world: &mut SimpleWorld, at: Vec2) -> BodyHandle {
        world.create_body(BodyDesc::dynamic(at, BodyShape::Circle { radius: 10.0 }, "ball"))
    }

    //--- Integration ------------------------------------------------------

    #[test]
    fn velocity_moves_body_one_unit_per_nominal_step() {
        let mut world = SimpleWorld::new();
        let body = ball(&mut world, Vec2::new(100.0, 100.0));
        world.set_velocity(body, Vec2::new(2.0, 0.0));

        world.step(BASE_DT_MS);

        let state = world.body(body).unwrap();
        assert!((state.position.x - 102.0).abs() < 1e-3);
    }

    #[test]
    fn force_is_consumed_by_step() {
        let mut world = SimpleWorld::new();
        let body = ball(&mut world, Vec2::ZERO);
        let mass = world.body(body).unwrap().mass;
        world.apply_force(body, Vec2::new(0.0, 0.0005 * mass));

        world.step(BASE_DT_MS);
        let v1 = world.body(body).unwrap().velocity.y;
        world.step(BASE_DT_MS);
        let v2 = world.body(body).unwrap().velocity.y;

        assert!(v1 > 0.0);
        assert!((v2 - v1).abs() < 1e-6, "force must not persist across steps");
    }

    #[test]
    fn air_friction_damps_velocity() {
        let mut world = SimpleWorld::new();
        let body = ball(&mut world, Vec2::ZERO);
        world.set_friction_air(body, 0.05);
        world.set_velocity(body, Vec2::new(1.0, 0.0));

        world.step(BASE_DT_MS);

        let v = world.body(body).unwrap().velocity.x;
        assert!((v - 0.95).abs() < 1e-4);
    }

    #[test]
    fn zero_dt_is_noop() {
        let mut world = SimpleWorld::new();
        let body = ball(&mut world, Vec2::ZERO);
        world.set_velocity(body, Vec2::ONE);
        world.step(0.0);
        assert_eq!(world.body(body).unwrap().position, Vec2::ZERO);
    }

    //--- Static Contacts --------------------------------------------------

    #[test]
    fn wall_of_same_group_reflects_body() {
        let mut world = SimpleWorld::new();
        let group = CollisionGroup(7);
        world.create_body(BodyDesc::wall(Vec2::new(125.0, 100.0), 10.0, 200.0, group));
        let body = world.create_body(
            BodyDesc::dynamic(Vec2::new(111.0, 100.0), BodyShape::Circle { radius: 10.0 }, "ball")
                .with_restitution(1.0)
                .with_group(group),
        );
        world.set_velocity(body, Vec2::new(5.0, 0.0));

        world.step(BASE_DT_MS);

        let state = world.body(body).unwrap();
        assert!(state.velocity.x < 0.0, "velocity should be reflected");
        assert!(state.position.x <= 110.0 + 1e-3);
        assert_eq!(world.drain_collisions().len(), 1);
    }

    #[test]
    fn wall_of_other_group_is_ignored() {
        let mut world = SimpleWorld::new();
        world.create_body(BodyDesc::wall(Vec2::new(125.0, 100.0), 10.0, 200.0, CollisionGroup(1)));
        let body = world.create_body(
            BodyDesc::dynamic(Vec2::new(111.0, 100.0), BodyShape::Circle { radius: 10.0 }, "ball")
                .with_group(CollisionGroup(2)),
        );
        world.set_velocity(body, Vec2::new(5.0, 0.0));

        world.step(BASE_DT_MS);

        assert!(world.body(body).unwrap().velocity.x > 0.0);
        assert!(world.drain_collisions().is_empty());
    }

    //--- Dynamic Contacts -------------------------------------------------

    #[test]
    fn collision_start_fires_once_per_contact() {
        let mut world = SimpleWorld::new();
        let a = ball(&mut world, Vec2::new(0.0, 0.0));
        let b = ball(&mut world, Vec2::new(19.0, 0.0));

        world.step(BASE_DT_MS);
        let events = world.drain_collisions();
        assert_eq!(events.len(), 1);
        assert_eq!((events[0].a, events[0].b), (a, b));

        // Pushed apart: no contact, then re-touching fires again
        world.step(BASE_DT_MS);
        assert!(world.drain_collisions().is_empty());
    }

    #[test]
    fn relative_speed_is_measured_before_resolution() {
        let mut world = SimpleWorld::new();
        let a = ball(&mut world, Vec2::new(0.0, 0.0));
        let b = ball(&mut world, Vec2::new(30.0, 0.0));
        world.set_velocity(a, Vec2::new(6.0, 0.0));
        world.set_velocity(b, Vec2::new(-6.0, 0.0));

        world.step(BASE_DT_MS);

        let events = world.drain_collisions();
        assert_eq!(events.len(), 1);
        assert!((events[0].relative_speed - 12.0).abs() < 1e-3);
    }

    //--- Queries ----------------------------------------------------------

    #[test]
    fn query_point_and_removal() {
        let mut world = SimpleWorld::new();
        let body = ball(&mut world, Vec2::new(50.0, 50.0));

        assert_eq!(world.query_point(Vec2::new(55.0, 50.0)), vec![body]);
        assert!(world.query_point(Vec2::new(70.0, 50.0)).is_empty());

        assert!(world.remove_body(body));
        assert!(!world.remove_body(body));
        assert!(!world.contains(body));
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn bounds_of_wall() {
        let mut world = SimpleWorld::new();
        let wall = world.create_body(BodyDesc::wall(Vec2::new(50.0, 5.0), 100.0, 10.0, CollisionGroup(0)));
        assert_eq!(world.bounds(wall), Some(Rect::new(0.0, 0.0, 100.0, 10.0)));
        assert!(world.body(wall).unwrap().is_static);
    }
}
