//=========================================================================
// Window
//=========================================================================
//
// A draggable, resizable screen region that acts as its own local
// physics sandbox.
//
// Architecture:
//   Window
//     ├─ rect + domain profile (gravity, air friction, restitution)
//     ├─ walls: 4 static bodies around the content area (own group)
//     └─ members: insertion-ordered PhysicsObjects
//
// Geometry:
//   ┌──────────────── title bar (20) ───────────────┐
//   │┌─────────────────────────────────────────────┐│
//   ││               content area                  ││ border (3)
//   │└─────────────────────────────────────────────┘│
//   └───────────────────────────────────────────[◢]─┘ resize handle
//
// Every geometry mutation rebuilds the walls before returning, so the
// walls never lag the displayed rectangle.
//
//=========================================================================

//=== Module Declarations =================================================

mod domain;
mod registry;

//=== Public API ==========================================================

pub use domain::{Background, Domain, ObjectLabel, ObjectShape, PhysicsObject, PhysicsProfile};
pub use registry::{WindowRegistry, WindowRole};

//=== External Dependencies ===============================================

use glam::Vec2;
use log::{debug, warn};
use rand::Rng;

//=== Internal Dependencies ===============================================

use crate::core::geometry::{
    Rect, BORDER_WIDTH, LOSS_MARGIN, MIN_HEIGHT, MIN_WIDTH, RENDER_HEIGHT, RENDER_WIDTH,
    RESIZE_HANDLE_SIZE, TITLE_BAR_HEIGHT, WALL_THICKNESS,
};
use crate::core::message_bus::MessageBus;
use crate::core::physics::{BodyDesc, BodyHandle, CollisionGroup, PhysicsEngine};

//=== Messages ============================================================

/// A member drifted beyond its window's loss margin and was destroyed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectLost {
    pub role: WindowRole,
    pub object: PhysicsObject,
}

/// A member was removed on purpose (property editor delete action).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectDeleted {
    pub role: WindowRole,
    pub object: PhysicsObject,
}

//=== Hit Zones ===========================================================

/// Part of a window under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitZone {
    /// Bottom-right corner; starts a resize.
    ResizeHandle,

    /// Top strip; starts a drag.
    TitleBar,

    /// Anywhere else inside the frame.
    Body,
}

//=== Interaction State ===================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Interaction {
    Idle,
    Dragging { offset: Vec2 },
    Resizing { pointer_start: Vec2, size_start: Vec2 },
}

//=== Window ==============================================================

/// Screen region with its own physics profile, walls and members.
///
/// A body is a member of at most one window. Members enter through
/// [`Window::spawn_object`] or [`Window::adopt_member`] and leave through
/// [`Window::on_member_lost`], [`Window::remove_member`],
/// [`Window::take_member`] or [`Window::clear_objects`].
#[derive(Debug)]
pub struct Window {
    role: WindowRole,
    title: &'static str,
    rect: Rect,
    domain: Domain,
    profile: PhysicsProfile,
    group: CollisionGroup,

    members: Vec<PhysicsObject>,
    walls: Vec<BodyHandle>,
    spawned: bool,

    interaction: Interaction,
    stage_timer_ms: f32,
    content_alpha: f32,
}

impl Window {
    //--- Construction -----------------------------------------------------

    /// Creates a window; the rectangle is clamped to the minimum size and
    /// into the render surface. Walls are registered by [`Window::spawn_into`].
    pub fn new(
        role: WindowRole,
        title: &'static str,
        rect: Rect,
        domain: Domain,
        group: CollisionGroup,
    ) -> Self {
        let width = rect.width.max(MIN_WIDTH).min(RENDER_WIDTH);
        let height = rect.height.max(MIN_HEIGHT).min(RENDER_HEIGHT);
        let x = rect.x.clamp(0.0, RENDER_WIDTH - width);
        let y = rect.y.clamp(0.0, RENDER_HEIGHT - height);

        Self {
            role,
            title,
            rect: Rect::new(x, y, width, height),
            domain,
            profile: domain.profile(),
            group,
            members: Vec::new(),
            walls: Vec::with_capacity(4),
            spawned: false,
            interaction: Interaction::Idle,
            stage_timer_ms: 0.0,
            content_alpha: 1.0,
        }
    }

    //--- Physics Registration ---------------------------------------------

    /// Registers the boundary walls with the engine.
    ///
    /// Safe to call repeatedly: existing walls are removed first.
    pub fn spawn_into(&mut self, engine: &mut dyn PhysicsEngine) {
        self.spawned = true;
        self.update_boundaries(engine);
        debug!(target: "window", "{} spawned at {:?}", self.title, self.rect);
    }

    /// Rebuilds the four walls around the current content rectangle.
    pub fn update_boundaries(&mut self, engine: &mut dyn PhysicsEngine) {
        for wall in self.walls.drain(..) {
            engine.remove_body(wall);
        }

        if !self.spawned {
            return;
        }

        let content = self.content_rect();
        let t = WALL_THICKNESS;
        let cx = content.x + content.width / 2.0;
        let cy = content.y + content.height / 2.0;

        let walls = [
            (Vec2::new(cx, content.y - t / 2.0), content.width + t * 2.0, t),
            (Vec2::new(cx, content.bottom() + t / 2.0), content.width + t * 2.0, t),
            (Vec2::new(content.x - t / 2.0, cy), t, content.height),
            (Vec2::new(content.right() + t / 2.0, cy), t, content.height),
        ];

        for (center, width, height) in walls {
            let desc = BodyDesc::wall(center, width, height, self.group)
                .with_restitution(self.profile.restitution);
            self.walls.push(engine.create_body(desc));
        }
    }

    /// Removes walls and members from the engine. The window is inert
    /// afterwards until `spawn_into` is called again.
    pub fn destroy(&mut self, engine: &mut dyn PhysicsEngine) {
        for object in self.members.drain(..) {
            engine.remove_body(object.handle);
        }
        self.spawned = false;
        self.update_boundaries(engine);
        debug!(target: "window", "{} destroyed", self.title);
    }

    //--- Object Lifecycle -------------------------------------------------

    /// Creates a body at the centre of the content area with this window's
    /// profile and adds it to the member set.
    ///
    /// Void-domain objects get a small random drift on both axes: nonzero
    /// and below one unit per step.
    pub fn spawn_object<R: Rng + ?Sized>(
        &mut self,
        engine: &mut dyn PhysicsEngine,
        rng: &mut R,
        label: ObjectLabel,
        shape: ObjectShape,
    ) -> BodyHandle {
        let desc = BodyDesc::dynamic(self.content_rect().center(), shape.body_shape(), label.as_str())
            .with_friction_air(self.profile.friction_air)
            .with_restitution(self.profile.restitution)
            .with_group(self.group);
        let handle = engine.create_body(desc);

        if self.domain == Domain::Void {
            let mut drift = || {
                let magnitude: f32 = rng.gen_range(0.1..1.0);
                if rng.gen_bool(0.5) { magnitude } else { -magnitude }
            };
            let velocity = Vec2::new(drift(), drift());
            engine.set_velocity(handle, velocity);
        }

        self.members.push(PhysicsObject {
            handle,
            shape,
            label,
            domain: self.domain,
        });

        debug!(target: "window", "{} spawned {} {:?}", self.title, label.as_str(), handle);
        handle
    }

    /// Applies `F = gravity * mass` to every member and returns those whose
    /// position is beyond the content area expanded by the loss margin.
    ///
    /// Flagged members are not removed here; the caller resolves them
    /// after the transfer pass through [`Window::on_member_lost`].
    pub fn apply_domain_forces(&mut self, engine: &mut dyn PhysicsEngine) -> Vec<BodyHandle> {
        let bounds = self.content_rect().expanded(LOSS_MARGIN);
        let gravity = self.profile.gravity;
        let mut lost = Vec::new();

        self.members.retain(|object| {
            let Some(state) = engine.body(object.handle) else {
                warn!(target: "window", "member {:?} missing from physics world", object.handle);
                return false;
            };

            if gravity != Vec2::ZERO {
                engine.apply_force(object.handle, gravity * state.mass);
            }
            if !bounds.contains(state.position) {
                lost.push(object.handle);
            }
            true
        });

        lost
    }

    /// Removes a lost member from the window and the world and reports it
    /// on the bus. Returns `None` if it is not (or no longer) a member.
    pub fn on_member_lost(
        &mut self,
        engine: &mut dyn PhysicsEngine,
        bus: &mut MessageBus,
        handle: BodyHandle,
    ) -> Option<PhysicsObject> {
        let object = self.remove_member(engine, handle)?;
        debug!(target: "window", "{} lost {} {:?}", self.title, object.label.as_str(), handle);
        bus.push(ObjectLost { role: self.role, object });
        Some(object)
    }

    /// Removes a member from the window and destroys its body.
    pub fn remove_member(
        &mut self,
        engine: &mut dyn PhysicsEngine,
        handle: BodyHandle,
    ) -> Option<PhysicsObject> {
        let object = self.take_member(handle)?;
        engine.remove_body(handle);
        Some(object)
    }

    /// Destroys every member and resets the stage timer.
    pub fn clear_objects(&mut self, engine: &mut dyn PhysicsEngine) {
        for object in self.members.drain(..) {
            engine.remove_body(object.handle);
        }
        self.stage_timer_ms = 0.0;
    }

    //--- Ownership Transfer -----------------------------------------------

    /// Detaches a member without touching its body.
    pub fn take_member(&mut self, handle: BodyHandle) -> Option<PhysicsObject> {
        let index = self.members.iter().position(|o| o.handle == handle)?;
        Some(self.members.remove(index))
    }

    /// Takes ownership of a body from another window: domain tag, air
    /// friction, restitution and collision group switch to this window's.
    /// Position and velocity are left untouched.
    pub fn adopt_member(&mut self, engine: &mut dyn PhysicsEngine, mut object: PhysicsObject) {
        engine.set_friction_air(object.handle, self.profile.friction_air);
        engine.set_restitution(object.handle, self.profile.restitution);
        engine.set_collision_group(object.handle, self.group);
        object.domain = self.domain;
        self.members.push(object);
    }

    //--- Hit Testing ------------------------------------------------------

    /// Title bar strip, edges inclusive.
    pub fn hit_test_title_bar(&self, point: Vec2) -> bool {
        Rect::new(self.rect.x, self.rect.y, self.rect.width, TITLE_BAR_HEIGHT).contains(point)
    }

    /// Resize handle square in the bottom-right corner, edges inclusive.
    pub fn hit_test_resize(&self, point: Vec2) -> bool {
        Rect::new(
            self.rect.right() - RESIZE_HANDLE_SIZE,
            self.rect.bottom() - RESIZE_HANDLE_SIZE,
            RESIZE_HANDLE_SIZE,
            RESIZE_HANDLE_SIZE,
        )
        .contains(point)
    }

    /// Classifies `point`; the resize handle wins over the title bar.
    pub fn hit_test(&self, point: Vec2) -> Option<HitZone> {
        if self.hit_test_resize(point) {
            Some(HitZone::ResizeHandle)
        } else if self.hit_test_title_bar(point) {
            Some(HitZone::TitleBar)
        } else if self.rect.contains(point) {
            Some(HitZone::Body)
        } else {
            None
        }
    }

    //--- Drag -------------------------------------------------------------

    pub fn start_drag(&mut self, pointer: Vec2) {
        self.interaction = Interaction::Dragging {
            offset: pointer - Vec2::new(self.rect.x, self.rect.y),
        };
    }

    /// Moves the top-left to `pointer - offset`, clamped fully inside the
    /// render surface. No-op unless a drag is in progress.
    pub fn on_drag(&mut self, engine: &mut dyn PhysicsEngine, pointer: Vec2) {
        let Interaction::Dragging { offset } = self.interaction else {
            return;
        };

        let target = pointer - offset;
        self.rect.x = target.x.clamp(0.0, RENDER_WIDTH - self.rect.width);
        self.rect.y = target.y.clamp(0.0, RENDER_HEIGHT - self.rect.height);
        self.update_boundaries(engine);
    }

    pub fn end_drag(&mut self) {
        if matches!(self.interaction, Interaction::Dragging { .. }) {
            self.interaction = Interaction::Idle;
        }
    }

    //--- Resize -----------------------------------------------------------

    pub fn start_resize(&mut self, pointer: Vec2) {
        self.interaction = Interaction::Resizing {
            pointer_start: pointer,
            size_start: Vec2::new(self.rect.width, self.rect.height),
        };
    }

    /// Grows or shrinks from the resize-start snapshot by the pointer
    /// delta, clamped to the minimum size and the surface's right/bottom
    /// edges. No-op unless a resize is in progress.
    pub fn on_resize(&mut self, engine: &mut dyn PhysicsEngine, pointer: Vec2) {
        let Interaction::Resizing { pointer_start, size_start } = self.interaction else {
            return;
        };

        let delta = pointer - pointer_start;
        self.rect.width = (size_start.x + delta.x)
            .max(MIN_WIDTH)
            .min(RENDER_WIDTH - self.rect.x);
        self.rect.height = (size_start.y + delta.y)
            .max(MIN_HEIGHT)
            .min(RENDER_HEIGHT - self.rect.y);
        self.update_boundaries(engine);
    }

    pub fn end_resize(&mut self) {
        if matches!(self.interaction, Interaction::Resizing { .. }) {
            self.interaction = Interaction::Idle;
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.interaction, Interaction::Dragging { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.interaction, Interaction::Resizing { .. })
    }

    //--- Stage Timer ------------------------------------------------------

    /// Accumulates time since the member set was last cleared.
    pub fn advance_timer(&mut self, dt_ms: f32) {
        self.stage_timer_ms += dt_ms;
    }

    pub fn stage_timer_ms(&self) -> f32 {
        self.stage_timer_ms
    }

    //--- Accessors --------------------------------------------------------

    pub fn role(&self) -> WindowRole {
        self.role
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The rectangle the walls enclose: the frame minus title bar and
    /// borders.
    pub fn content_rect(&self) -> Rect {
        Rect::new(
            self.rect.x + BORDER_WIDTH,
            self.rect.y + TITLE_BAR_HEIGHT,
            self.rect.width - BORDER_WIDTH * 2.0,
            self.rect.height - TITLE_BAR_HEIGHT - BORDER_WIDTH,
        )
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn profile(&self) -> PhysicsProfile {
        self.profile
    }

    pub fn background(&self) -> Background {
        self.domain.background()
    }

    pub fn group(&self) -> CollisionGroup {
        self.group
    }

    pub fn members(&self) -> &[PhysicsObject] {
        &self.members
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn contains_member(&self, handle: BodyHandle) -> bool {
        self.members.iter().any(|o| o.handle == handle)
    }

    pub fn walls(&self) -> &[BodyHandle] {
        &self.walls
    }

    pub fn content_alpha(&self) -> f32 {
        self.content_alpha
    }

    pub fn set_content_alpha(&mut self, alpha: f32) {
        self.content_alpha = alpha.clamp(0.0, 1.0);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::physics::SimpleWorld;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn lunar(rect: Rect) -> Window {
        Window::new(WindowRole::Station, "TEST.exe", rect, Domain::Lunar, CollisionGroup(1))
    }

    /// Content rectangle recovered from the inner faces of the four walls.
    fn enclosed_by_walls(window: &Window, world: &SimpleWorld) -> Rect {
        let b: Vec<Rect> = window.walls().iter().map(|w| world.bounds(*w).unwrap()).collect();
        let (top, bottom, left, right) = (b[0], b[1], b[2], b[3]);
        Rect::new(left.right(), top.bottom(), right.x - left.right(), bottom.y - top.bottom())
    }

    fn assert_rect_eq(a: Rect, b: Rect) {
        assert!((a.x - b.x).abs() < 1e-3, "{:?} != {:?}", a, b);
        assert!((a.y - b.y).abs() < 1e-3, "{:?} != {:?}", a, b);
        assert!((a.width - b.width).abs() < 1e-3, "{:?} != {:?}", a, b);
        assert!((a.height - b.height).abs() < 1e-3, "{:?} != {:?}", a, b);
    }

    //--- Construction & Walls ---------------------------------------------

    #[test]
    fn new_clamps_to_minimum_and_surface() {
        let window = lunar(Rect::new(600.0, 340.0, 10.0, 10.0));
        assert_eq!(window.rect(), Rect::new(540.0, 280.0, MIN_WIDTH, MIN_HEIGHT));
    }

    #[test]
    fn walls_enclose_content_rect() {
        let mut world = SimpleWorld::new();
        let mut window = lunar(Rect::new(100.0, 80.0, 200.0, 150.0));
        window.spawn_into(&mut world);

        assert_eq!(window.walls().len(), 4);
        assert_rect_eq(enclosed_by_walls(&window, &world), window.content_rect());
        assert_eq!(window.content_rect(), Rect::new(103.0, 100.0, 194.0, 127.0));
    }

    #[test]
    fn spawn_into_twice_does_not_leak_walls() {
        let mut world = SimpleWorld::new();
        let mut window = lunar(Rect::new(0.0, 0.0, 200.0, 150.0));
        window.spawn_into(&mut world);
        window.spawn_into(&mut world);
        assert_eq!(world.body_count(), 4);
    }

    #[test]
    fn walls_track_every_drag_and_resize() {
        let mut world = SimpleWorld::new();
        let mut window = lunar(Rect::new(100.0, 80.0, 200.0, 150.0));
        window.spawn_into(&mut world);

        for to in [Vec2::new(700.0, -50.0), Vec2::new(35.0, 42.0)] {
            let grab = Vec2::new(window.rect().x + 10.0, window.rect().y + 5.0);
            window.start_drag(grab);
            window.on_drag(&mut world, to);
            window.end_drag();
            assert_rect_eq(enclosed_by_walls(&window, &world), window.content_rect());

            let corner = Vec2::new(window.rect().right(), window.rect().bottom());
            window.start_resize(corner);
            window.on_resize(&mut world, corner + to);
            window.end_resize();
            assert_rect_eq(enclosed_by_walls(&window, &world), window.content_rect());
            assert!(window.rect().is_within(&Rect::surface()));
        }
        assert_eq!(world.body_count(), 4);
    }

    #[test]
    fn destroy_removes_walls_and_members() {
        let mut world = SimpleWorld::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut window = lunar(Rect::new(100.0, 80.0, 200.0, 150.0));
        window.spawn_into(&mut world);
        window.spawn_object(&mut world, &mut rng, ObjectLabel::Mass, ObjectShape::Cube);

        window.destroy(&mut world);

        assert_eq!(world.body_count(), 0);
        assert_eq!(window.member_count(), 0);
        assert!(window.walls().is_empty());
    }

    //--- Drag & Resize ----------------------------------------------------

    #[test]
    fn drag_keeps_pointer_offset() {
        let mut world = SimpleWorld::new();
        let mut window = lunar(Rect::new(100.0, 80.0, 200.0, 150.0));
        window.spawn_into(&mut world);

        window.start_drag(Vec2::new(110.0, 90.0));
        window.on_drag(&mut world, Vec2::new(60.0, 50.0));

        assert_eq!(window.rect(), Rect::new(50.0, 40.0, 200.0, 150.0));
        assert!(window.is_dragging());
    }

    #[test]
    fn drag_off_surface_is_clamped() {
        let mut world = SimpleWorld::new();
        let mut window = lunar(Rect::new(100.0, 80.0, 200.0, 150.0));
        window.spawn_into(&mut world);

        window.start_drag(Vec2::new(100.0, 80.0));
        window.on_drag(&mut world, Vec2::new(-500.0, 9000.0));
        assert_eq!(window.rect(), Rect::new(0.0, 210.0, 200.0, 150.0));

        window.on_drag(&mut world, Vec2::new(9000.0, -500.0));
        assert_eq!(window.rect(), Rect::new(440.0, 0.0, 200.0, 150.0));
    }

    #[test]
    fn drag_without_start_is_noop() {
        let mut world = SimpleWorld::new();
        let mut window = lunar(Rect::new(100.0, 80.0, 200.0, 150.0));
        window.on_drag(&mut world, Vec2::new(0.0, 0.0));
        assert_eq!(window.rect().x, 100.0);
    }

    #[test]
    fn resize_respects_minimum_and_surface() {
        let mut world = SimpleWorld::new();
        let mut window = lunar(Rect::new(100.0, 80.0, 200.0, 150.0));
        window.spawn_into(&mut world);

        window.start_resize(Vec2::new(300.0, 230.0));
        window.on_resize(&mut world, Vec2::new(0.0, 0.0));
        assert_eq!((window.rect().width, window.rect().height), (MIN_WIDTH, MIN_HEIGHT));

        window.on_resize(&mut world, Vec2::new(5000.0, 5000.0));
        assert_eq!(window.rect().right(), RENDER_WIDTH);
        assert_eq!(window.rect().bottom(), RENDER_HEIGHT);

        window.end_resize();
        assert!(!window.is_resizing());
    }

    #[test]
    fn hit_test_prefers_resize_handle() {
        let window = lunar(Rect::new(100.0, 80.0, 200.0, 150.0));

        assert_eq!(window.hit_test(Vec2::new(295.0, 225.0)), Some(HitZone::ResizeHandle));
        assert_eq!(window.hit_test(Vec2::new(150.0, 90.0)), Some(HitZone::TitleBar));
        assert_eq!(window.hit_test(Vec2::new(150.0, 150.0)), Some(HitZone::Body));
        assert_eq!(window.hit_test(Vec2::new(50.0, 50.0)), None);
    }

    //--- Objects ----------------------------------------------------------

    #[test]
    fn spawn_object_centres_body_with_profile() {
        let mut world = SimpleWorld::new();
        let mut rng = StdRng::seed_from_u64(3);
        let mut window = lunar(Rect::new(100.0, 80.0, 200.0, 150.0));
        window.spawn_into(&mut world);

        let handle = window.spawn_object(&mut world, &mut rng, ObjectLabel::Mass, ObjectShape::Cube);
        let state = world.body(handle).unwrap();

        assert_eq!(state.position, window.content_rect().center());
        assert_eq!(state.velocity, Vec2::ZERO);
        assert_eq!(state.friction_air, 0.05);
        assert_eq!(state.restitution, 0.5);
        assert_eq!(window.members()[0].domain, Domain::Lunar);
    }

    #[test]
    fn void_objects_drift_slowly() {
        let mut world = SimpleWorld::new();
        let mut rng = StdRng::seed_from_u64(7);
        let mut window = Window::new(
            WindowRole::Void,
            "VOID.exe",
            Rect::new(340.0, 120.0, 200.0, 150.0),
            Domain::Void,
            CollisionGroup(2),
        );
        window.spawn_into(&mut world);

        for _ in 0..20 {
            let handle = window.spawn_object(&mut world, &mut rng, ObjectLabel::Void, ObjectShape::Sphere);
            let v = world.body(handle).unwrap().velocity;
            assert!(v.x != 0.0 && v.x.abs() < 1.0);
            assert!(v.y != 0.0 && v.y.abs() < 1.0);
        }
    }

    #[test]
    fn member_on_content_edge_is_not_lost() {
        let mut world = SimpleWorld::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut window = lunar(Rect::new(100.0, 80.0, 200.0, 150.0));
        let handle = window.spawn_object(&mut world, &mut rng, ObjectLabel::Mass, ObjectShape::Cube);
        let content = window.content_rect();

        world.teleport(handle, Vec2::new(content.right() + LOSS_MARGIN, content.y));
        assert!(window.apply_domain_forces(&mut world).is_empty());

        world.teleport(handle, Vec2::new(content.right() + LOSS_MARGIN + 0.5, content.y));
        assert_eq!(window.apply_domain_forces(&mut world), vec![handle]);
        assert_eq!(window.member_count(), 1, "flagging does not remove");
    }

    #[test]
    fn on_member_lost_reports_on_bus() {
        let mut world = SimpleWorld::new();
        let mut bus = MessageBus::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut window = lunar(Rect::new(100.0, 80.0, 200.0, 150.0));
        let handle = window.spawn_object(&mut world, &mut rng, ObjectLabel::Mass, ObjectShape::Cube);

        assert!(window.on_member_lost(&mut world, &mut bus, handle).is_some());
        assert!(window.on_member_lost(&mut world, &mut bus, handle).is_none());

        assert!(!world.contains(handle));
        assert_eq!(bus.count::<ObjectLost>(), 1);
        assert_eq!(bus.read::<ObjectLost>()[0].object.label, ObjectLabel::Mass);
    }

    #[test]
    fn gravity_pulls_lunar_members_down() {
        let mut world = SimpleWorld::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut window = lunar(Rect::new(100.0, 80.0, 200.0, 150.0));
        window.spawn_into(&mut world);
        let handle = window.spawn_object(&mut world, &mut rng, ObjectLabel::Mass, ObjectShape::Cube);

        window.apply_domain_forces(&mut world);
        world.step(1000.0 / 60.0);

        assert!(world.body(handle).unwrap().velocity.y > 0.0);
    }

    #[test]
    fn clear_objects_resets_timer() {
        let mut world = SimpleWorld::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut window = lunar(Rect::new(100.0, 80.0, 200.0, 150.0));
        window.spawn_object(&mut world, &mut rng, ObjectLabel::Mass, ObjectShape::Cube);
        window.advance_timer(500.0);

        window.clear_objects(&mut world);

        assert_eq!(window.stage_timer_ms(), 0.0);
        assert_eq!(window.member_count(), 0);
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn adopt_member_switches_profile_and_group() {
        let mut world = SimpleWorld::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut from = lunar(Rect::new(0.0, 0.0, 200.0, 150.0));
        let mut to = Window::new(
            WindowRole::Void,
            "VOID.exe",
            Rect::new(100.0, 0.0, 200.0, 150.0),
            Domain::Void,
            CollisionGroup(9),
        );
        let handle = from.spawn_object(&mut world, &mut rng, ObjectLabel::Mass, ObjectShape::Cube);

        let object = from.take_member(handle).unwrap();
        to.adopt_member(&mut world, object);

        let state = world.body(handle).unwrap();
        assert_eq!(state.friction_air, 0.0);
        assert_eq!(state.restitution, 1.0);
        assert_eq!(to.members()[0].domain, Domain::Void);
        assert_eq!(to.members()[0].label, ObjectLabel::Mass);
        assert!(!from.contains_member(handle));
    }
}
