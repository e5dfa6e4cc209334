//=========================================================================
// Window Registry
//=========================================================================
//
// Windows keyed by named role instead of position in a list.
//
// Architecture:
//   WindowRegistry
//     └─ windows: Vec<Window>   (z-order, back → front)
//
// At most one window per role. Inserting a role that already exists
// destroys the previous window first, so no walls or members leak.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{HitZone, PhysicsObject, Window};
use crate::core::physics::{BodyHandle, CollisionGroup, PhysicsEngine};

//=== WindowRole ==========================================================

/// Stage-assigned identity of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowRole {
    /// "SYSTEM.exe", the window moved and expanded during the tutorial.
    Tutorial,

    /// "STATION.exe", the lunar window of stage 1 onwards.
    Station,

    /// "VOID.exe", the weightless window of stage 2 onwards.
    Void,
}

impl WindowRole {
    /// Collision group reserved for this role's walls and members.
    pub fn group(&self) -> CollisionGroup {
        match self {
            Self::Tutorial => CollisionGroup(1),
            Self::Station => CollisionGroup(2),
            Self::Void => CollisionGroup(3),
        }
    }
}

//=== WindowRegistry ======================================================

/// Role-keyed, z-ordered set of live windows.
#[derive(Debug, Default)]
pub struct WindowRegistry {
    windows: Vec<Window>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self { windows: Vec::new() }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Registers the window's walls and places it on top.
    ///
    /// Replaces (and destroys) any existing window with the same role.
    pub fn insert(&mut self, engine: &mut dyn PhysicsEngine, mut window: Window) {
        let role = window.role();
        if self.remove(engine, role) {
            warn!(target: "window", "{:?} window replaced", role);
        }

        window.spawn_into(engine);
        self.windows.push(window);
    }

    /// Destroys and removes the window with `role`. Returns `false` if
    /// none exists.
    pub fn remove(&mut self, engine: &mut dyn PhysicsEngine, role: WindowRole) -> bool {
        let Some(index) = self.index_of(role) else {
            return false;
        };

        let mut window = self.windows.remove(index);
        window.destroy(engine);
        true
    }

    /// Destroys every window.
    pub fn clear(&mut self, engine: &mut dyn PhysicsEngine) {
        for mut window in self.windows.drain(..) {
            window.destroy(engine);
        }
    }

    /// Moves the window to the top of the z-order.
    pub fn bring_to_front(&mut self, role: WindowRole) {
        if let Some(index) = self.index_of(role) {
            let window = self.windows.remove(index);
            self.windows.push(window);
            debug!(target: "window", "{:?} brought to front", role);
        }
    }

    //--- Lookup -----------------------------------------------------------

    pub fn get(&self, role: WindowRole) -> Option<&Window> {
        self.windows.iter().find(|w| w.role() == role)
    }

    pub fn get_mut(&mut self, role: WindowRole) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| w.role() == role)
    }

    pub fn contains(&self, role: WindowRole) -> bool {
        self.index_of(role).is_some()
    }

    /// Role of the window that owns `handle`.
    pub fn role_of(&self, handle: BodyHandle) -> Option<WindowRole> {
        self.find_member(handle).map(|(role, _)| role)
    }

    /// Owning role and annotation of a member body.
    pub fn find_member(&self, handle: BodyHandle) -> Option<(WindowRole, PhysicsObject)> {
        self.windows.iter().find_map(|w| {
            w.members()
                .iter()
                .find(|o| o.handle == handle)
                .map(|o| (w.role(), *o))
        })
    }

    /// Front-most window under `point` and the zone that was hit.
    pub fn topmost_hit(&self, point: Vec2) -> Option<(WindowRole, HitZone)> {
        self.windows
            .iter()
            .rev()
            .find_map(|w| w.hit_test(point).map(|zone| (w.role(), zone)))
    }

    //--- Iteration --------------------------------------------------------

    /// Windows back to front.
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// Mutable slice for passes that need pairwise access.
    pub fn windows_mut(&mut self) -> &mut [Window] {
        &mut self.windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn total_members(&self) -> usize {
        self.windows.iter().map(Window::member_count).sum()
    }

    fn index_of(&self, role: WindowRole) -> Option<usize> {
        self.windows.iter().position(|w| w.role() == role)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Rect;
    use crate::core::physics::{PhysicsEngine, SimpleWorld};
    use crate::core::window::{Domain, ObjectLabel, ObjectShape};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn window(role: WindowRole, rect: Rect) -> Window {
        Window::new(role, "TEST.exe", rect, Domain::Lunar, role.group())
    }

    #[test]
    fn insert_spawns_walls() {
        let mut world = SimpleWorld::new();
        let mut registry = WindowRegistry::new();

        registry.insert(&mut world, window(WindowRole::Station, Rect::new(0.0, 0.0, 200.0, 150.0)));

        assert!(registry.contains(WindowRole::Station));
        assert_eq!(world.body_count(), 4);
    }

    #[test]
    fn insert_same_role_replaces_previous() {
        let mut world = SimpleWorld::new();
        let mut rng = StdRng::seed_from_u64(0);
        let mut registry = WindowRegistry::new();

        registry.insert(&mut world, window(WindowRole::Station, Rect::new(0.0, 0.0, 200.0, 150.0)));
        registry
            .get_mut(WindowRole::Station)
            .unwrap()
            .spawn_object(&mut world, &mut rng, ObjectLabel::Mass, ObjectShape::Cube);

        registry.insert(&mut world, window(WindowRole::Station, Rect::new(50.0, 50.0, 200.0, 150.0)));

        assert_eq!(registry.len(), 1);
        assert_eq!(world.body_count(), 4, "old walls and members destroyed");
        assert_eq!(registry.get(WindowRole::Station).unwrap().rect().x, 50.0);
    }

    #[test]
    fn remove_missing_role_is_noop() {
        let mut world = SimpleWorld::new();
        let mut registry = WindowRegistry::new();
        assert!(!registry.remove(&mut world, WindowRole::Void));
    }

    #[test]
    fn topmost_hit_respects_z_order() {
        let mut world = SimpleWorld::new();
        let mut registry = WindowRegistry::new();
        registry.insert(&mut world, window(WindowRole::Station, Rect::new(0.0, 0.0, 200.0, 150.0)));
        registry.insert(&mut world, window(WindowRole::Void, Rect::new(100.0, 0.0, 200.0, 150.0)));

        let point = Vec2::new(150.0, 10.0);
        assert_eq!(registry.topmost_hit(point), Some((WindowRole::Void, HitZone::TitleBar)));

        registry.bring_to_front(WindowRole::Station);
        assert_eq!(registry.topmost_hit(point), Some((WindowRole::Station, HitZone::TitleBar)));
        assert_eq!(registry.windows().last().unwrap().role(), WindowRole::Station);
    }

    #[test]
    fn find_member_reports_owner() {
        let mut world = SimpleWorld::new();
        let mut rng = StdRng::seed_from_u64(0);
        let mut registry = WindowRegistry::new();
        registry.insert(&mut world, window(WindowRole::Void, Rect::new(0.0, 0.0, 200.0, 150.0)));

        let handle = registry
            .get_mut(WindowRole::Void)
            .unwrap()
            .spawn_object(&mut world, &mut rng, ObjectLabel::Void, ObjectShape::Sphere);

        assert_eq!(registry.role_of(handle), Some(WindowRole::Void));
        assert_eq!(registry.total_members(), 1);

        registry.clear(&mut world);
        assert_eq!(registry.role_of(handle), None);
        assert_eq!(world.body_count(), 0);
    }
}
