//=========================================================================
// Property Editor
//=========================================================================
//
// Right-click inspector for window members.
//
// The editor never owns bodies. Deletion goes through the owning
// window's `remove_member`, so the window's member set and the world
// agree, and is announced with `ObjectDeleted`.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::message_bus::MessageBus;
use crate::core::physics::{BodyHandle, PhysicsEngine};
use crate::core::window::{ObjectDeleted, ObjectLabel, PhysicsObject, WindowRegistry, WindowRole};

//=== Slider Ranges =======================================================

pub const MASS_RANGE: (f32, f32) = (1.0, 100.0);
pub const FRICTION_AIR_RANGE: (f32, f32) = (0.0, 0.5);
pub const RESTITUTION_RANGE: (f32, f32) = (0.0, 1.5);

//=== SelectionView =======================================================

/// Current values of the selected body, for the editor panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionView {
    pub handle: BodyHandle,
    pub role: WindowRole,
    pub label: ObjectLabel,
    pub position: Vec2,
    pub mass: f32,
    pub friction_air: f32,
    pub restitution: f32,
}

//=== PropertyEditor ======================================================

#[derive(Debug, Default)]
pub struct PropertyEditor {
    unlocked: bool,
    selected: Option<BodyHandle>,
}

impl PropertyEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unlock(&mut self) {
        if !self.unlocked {
            debug!(target: "session", "property editor unlocked");
        }
        self.unlocked = true;
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn selected(&self) -> Option<BodyHandle> {
        self.selected
    }

    //--- Selection --------------------------------------------------------

    /// Selects the first dynamic window member under `point`.
    ///
    /// Does nothing while locked. Replaces any previous selection, or
    /// clears it when nothing selectable is hit.
    pub fn select_at(
        &mut self,
        point: Vec2,
        registry: &WindowRegistry,
        engine: &dyn PhysicsEngine,
    ) -> Option<BodyHandle> {
        if !self.unlocked {
            return None;
        }

        self.selected = engine.query_point(point).into_iter().find(|&handle| {
            let is_dynamic = engine.body(handle).is_some_and(|state| !state.is_static);
            is_dynamic && registry.role_of(handle).is_some()
        });

        if let Some(handle) = self.selected {
            debug!(target: "session", "editor selected {:?}", handle);
        }
        self.selected
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Drops the selection once its body has left every window.
    pub fn refresh(&mut self, registry: &WindowRegistry) {
        if let Some(handle) = self.selected {
            if registry.role_of(handle).is_none() {
                self.selected = None;
            }
        }
    }

    //--- Operations -------------------------------------------------------

    /// Removes the selected body through its owning window.
    pub fn delete_selected(
        &mut self,
        registry: &mut WindowRegistry,
        engine: &mut dyn PhysicsEngine,
        bus: &mut MessageBus,
    ) -> Option<PhysicsObject> {
        let handle = self.selected.take()?;
        let role = registry.role_of(handle)?;
        let object = registry.get_mut(role)?.remove_member(engine, handle)?;

        debug!(target: "session", "editor deleted {} {:?}", object.label.as_str(), handle);
        bus.push(ObjectDeleted { role, object });
        Some(object)
    }

    /// Returns the applied (clamped) value, or `None` without a selection.
    pub fn set_mass(&mut self, engine: &mut dyn PhysicsEngine, mass: f32) -> Option<f32> {
        let handle = self.selected?;
        let mass = mass.clamp(MASS_RANGE.0, MASS_RANGE.1);
        engine.set_mass(handle, mass);
        Some(mass)
    }

    pub fn set_friction_air(&mut self, engine: &mut dyn PhysicsEngine, friction_air: f32) -> Option<f32> {
        let handle = self.selected?;
        let friction_air = friction_air.clamp(FRICTION_AIR_RANGE.0, FRICTION_AIR_RANGE.1);
        engine.set_friction_air(handle, friction_air);
        Some(friction_air)
    }

    pub fn set_restitution(&mut self, engine: &mut dyn PhysicsEngine, restitution: f32) -> Option<f32> {
        let handle = self.selected?;
        let restitution = restitution.clamp(RESTITUTION_RANGE.0, RESTITUTION_RANGE.1);
        engine.set_restitution(handle, restitution);
        Some(restitution)
    }

    //--- View -------------------------------------------------------------

    pub fn view(&self, registry: &WindowRegistry, engine: &dyn PhysicsEngine) -> Option<SelectionView> {
        let handle = self.selected?;
        let (role, object) = registry.find_member(handle)?;
        let state = engine.body(handle)?;

        Some(SelectionView {
            handle,
            role,
            label: object.label,
            position: state.position,
            mass: state.mass,
            friction_air: state.friction_air,
            restitution: state.restitution,
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Rect;
    use crate::core::physics::SimpleWorld;
    use crate::core::window::{Domain, ObjectShape, Window};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn void_window_with_sphere(world: &mut SimpleWorld) -> (WindowRegistry, BodyHandle, Vec2) {
        let mut registry = WindowRegistry::new();
        let window = Window::new(
            WindowRole::Void,
            "VOID.exe",
            Rect::new(340.0, 120.0, 200.0, 150.0),
            Domain::Void,
            WindowRole::Void.group(),
        );
        registry.insert(world, window);

        let mut rng = StdRng::seed_from_u64(3);
        let handle = registry
            .get_mut(WindowRole::Void)
            .map(|w| w.spawn_object(world, &mut rng, ObjectLabel::Void, ObjectShape::Sphere))
            .unwrap();
        let position = world.body(handle).unwrap().position;
        (registry, handle, position)
    }

    #[test]
    fn locked_editor_ignores_clicks() {
        let mut world = SimpleWorld::new();
        let (registry, _, at) = void_window_with_sphere(&mut world);
        let mut editor = PropertyEditor::new();

        assert_eq!(editor.select_at(at, &registry, &world), None);
        assert_eq!(editor.selected(), None);
    }

    #[test]
    fn selects_member_and_skips_walls() {
        let mut world = SimpleWorld::new();
        let (registry, handle, at) = void_window_with_sphere(&mut world);
        let mut editor = PropertyEditor::new();
        editor.unlock();

        assert_eq!(editor.select_at(at, &registry, &world), Some(handle));

        // Right on the left wall.
        let wall_point = Vec2::new(registry.get(WindowRole::Void).unwrap().content_rect().x - 2.0, at.y);
        assert_eq!(editor.select_at(wall_point, &registry, &world), None);
    }

    #[test]
    fn delete_goes_through_window_and_publishes() {
        let mut world = SimpleWorld::new();
        let (mut registry, handle, at) = void_window_with_sphere(&mut world);
        let mut bus = MessageBus::new();
        let mut editor = PropertyEditor::new();
        editor.unlock();
        editor.select_at(at, &registry, &world);

        let deleted = editor.delete_selected(&mut registry, &mut world, &mut bus).unwrap();

        assert_eq!(deleted.handle, handle);
        assert_eq!(registry.get(WindowRole::Void).unwrap().member_count(), 0);
        assert!(!world.contains(handle));
        assert_eq!(bus.read::<ObjectDeleted>()[0].role, WindowRole::Void);
        assert_eq!(editor.selected(), None);
    }

    #[test]
    fn property_values_are_clamped() {
        let mut world = SimpleWorld::new();
        let (registry, handle, at) = void_window_with_sphere(&mut world);
        let mut editor = PropertyEditor::new();
        editor.unlock();
        editor.select_at(at, &registry, &world);

        assert_eq!(editor.set_mass(&mut world, 500.0), Some(100.0));
        assert_eq!(editor.set_friction_air(&mut world, -1.0), Some(0.0));
        assert_eq!(editor.set_restitution(&mut world, 1.2), Some(1.2));

        let view = editor.view(&registry, &world).unwrap();
        assert_eq!(view.handle, handle);
        assert_eq!(view.mass, 100.0);
        assert_eq!(view.restitution, 1.2);
    }

    #[test]
    fn refresh_drops_removed_selection() {
        let mut world = SimpleWorld::new();
        let (mut registry, handle, at) = void_window_with_sphere(&mut world);
        let mut editor = PropertyEditor::new();
        editor.unlock();
        editor.select_at(at, &registry, &world);

        registry.get_mut(WindowRole::Void).unwrap().remove_member(&mut world, handle);
        editor.refresh(&registry);

        assert_eq!(editor.selected(), None);
        assert_eq!(editor.set_mass(&mut world, 10.0), None);
    }
}
