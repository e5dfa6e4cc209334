//=========================================================================
// Render Boundary
//=========================================================================
//
// The core never draws. Each tick the controller captures a
// `FrameSnapshot` of everything visible and hands it to a `FrameSink`.
//
// Snapshot layout:
//   FrameSnapshot
//     ├─ windows (z-order, back → front)
//     │    └─ members (insertion order)
//     ├─ overlay (dialogue, console, hint, effects, stage)
//     └─ selection (property editor panel)
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::director::Overlay;
use crate::core::editor::SelectionView;
use crate::core::geometry::{Rect, RENDER_HEIGHT, RENDER_WIDTH};
use crate::core::physics::{BodyHandle, PhysicsEngine};
use crate::core::window::{Background, Domain, ObjectLabel, ObjectShape, WindowRegistry, WindowRole};

//=== Views ===============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct MemberView {
    pub handle: BodyHandle,
    pub shape: ObjectShape,
    pub label: ObjectLabel,
    pub domain: Domain,
    pub position: Vec2,
    pub angle: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowView {
    pub role: WindowRole,
    pub title: &'static str,
    pub rect: Rect,
    pub content_rect: Rect,
    pub domain: Domain,
    pub background: Background,
    pub content_alpha: f32,
    pub members: Vec<MemberView>,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub surface: Vec2,
    pub windows: Vec<WindowView>,
    pub overlay: Overlay,
    pub selection: Option<SelectionView>,
}

impl FrameSnapshot {
    pub fn capture(
        tick: u64,
        registry: &WindowRegistry,
        engine: &dyn PhysicsEngine,
        overlay: &Overlay,
        selection: Option<SelectionView>,
    ) -> Self {
        let windows = registry
            .windows()
            .iter()
            .map(|window| WindowView {
                role: window.role(),
                title: window.title(),
                rect: window.rect(),
                content_rect: window.content_rect(),
                domain: window.domain(),
                background: window.background(),
                content_alpha: window.content_alpha(),
                members: window
                    .members()
                    .iter()
                    .filter_map(|object| {
                        let state = engine.body(object.handle)?;
                        Some(MemberView {
                            handle: object.handle,
                            shape: object.shape,
                            label: object.label,
                            domain: object.domain,
                            position: state.position,
                            angle: state.angle,
                        })
                    })
                    .collect(),
            })
            .collect();

        Self {
            tick,
            surface: Vec2::new(RENDER_WIDTH, RENDER_HEIGHT),
            windows,
            overlay: overlay.clone(),
            selection,
        }
    }

    pub fn window(&self, role: WindowRole) -> Option<&WindowView> {
        self.windows.iter().find(|view| view.role == role)
    }
}

//=== FrameSink ===========================================================

/// Consumer of frame snapshots, e.g. a renderer on another thread.
pub trait FrameSink: Send {
    fn present(&mut self, frame: &FrameSnapshot);
}

/// Default sink: traces a one-line summary per frame.
#[derive(Debug, Default)]
pub struct LogFrameSink;

impl FrameSink for LogFrameSink {
    fn present(&mut self, frame: &FrameSnapshot) {
        trace!(
            target: "session",
            "frame {} {:?}: {} windows, {} members",
            frame.tick,
            frame.overlay.stage,
            frame.windows.len(),
            frame.windows.iter().map(|w| w.members.len()).sum::<usize>()
        );
    }
}

/// Keeps the latest snapshot, for headless drivers and tests.
#[derive(Debug, Default, Clone)]
pub struct LatestFrameSink {
    latest: std::sync::Arc<std::sync::Mutex<Option<FrameSnapshot>>>,
}

impl LatestFrameSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<FrameSnapshot> {
        self.latest.lock().ok().and_then(|frame| frame.clone())
    }
}

impl FrameSink for LatestFrameSink {
    fn present(&mut self, frame: &FrameSnapshot) {
        if let Ok(mut latest) = self.latest.lock() {
            *latest = Some(frame.clone());
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::physics::SimpleWorld;
    use crate::core::window::Window;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn capture_lists_windows_and_members_in_order() {
        let mut world = SimpleWorld::new();
        let mut rng = StdRng::seed_from_u64(5);
        let mut registry = WindowRegistry::new();
        registry.insert(
            &mut world,
            Window::new(WindowRole::Station, "STATION.exe", Rect::new(0.0, 0.0, 200.0, 150.0), Domain::Lunar, WindowRole::Station.group()),
        );
        registry.insert(
            &mut world,
            Window::new(WindowRole::Void, "VOID.exe", Rect::new(300.0, 0.0, 200.0, 150.0), Domain::Void, WindowRole::Void.group()),
        );
        let cube = registry
            .get_mut(WindowRole::Station)
            .unwrap()
            .spawn_object(&mut world, &mut rng, ObjectLabel::Mass, ObjectShape::Cube);

        let frame = FrameSnapshot::capture(7, &registry, &world, &Overlay::default(), None);

        assert_eq!(frame.tick, 7);
        assert_eq!(frame.surface, Vec2::new(640.0, 360.0));
        let roles: Vec<WindowRole> = frame.windows.iter().map(|w| w.role).collect();
        assert_eq!(roles, vec![WindowRole::Station, WindowRole::Void]);

        let station = frame.window(WindowRole::Station).unwrap();
        assert_eq!(station.members.len(), 1);
        assert_eq!(station.members[0].handle, cube);
        assert_eq!(station.background, Background::Grid);
        assert_eq!(frame.window(WindowRole::Void).unwrap().background, Background::Starless);
    }

    #[test]
    fn latest_sink_keeps_last_frame() {
        let probe = LatestFrameSink::new();
        let mut sink: Box<dyn FrameSink> = Box::new(probe.clone());
        let world = SimpleWorld::new();
        let registry = WindowRegistry::new();

        for tick in 0..3 {
            sink.present(&FrameSnapshot::capture(tick, &registry, &world, &Overlay::default(), None));
        }

        assert_eq!(probe.latest().map(|frame| frame.tick), Some(2));
    }
}
