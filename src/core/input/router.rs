//=========================================================================
// Input Router
//=========================================================================
//
// Turns pointer and key events into window interactions, property
// editor operations and session signals.
//
// Routing:
//   Left down    → skip signal (cinematic) | resize / drag topmost window
//   Pointer move → active drag or resize target
//   Left up      → ends every interaction
//   Right down   → property editor selection
//   Delete key   → property editor delete
//   Skip keys    → skip signal (cinematic)
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, MouseButton};
use super::state_tracker::StateTracker;
use crate::core::runtime::SessionContext;
use crate::core::window::{HitZone, WindowRole};

//=== SessionSignal =======================================================

/// Session-level requests raised by input, consumed by the director.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    SkipCinematic,
}

//=== InputRouter =========================================================

#[derive(Debug, Default)]
pub struct InputRouter {
    tracker: StateTracker,
    target: Option<WindowRole>,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes one batch in order. While `in_cinematic`, left clicks and
    /// skip keys only raise [`SessionSignal::SkipCinematic`].
    pub fn route(&mut self, events: &[InputEvent], context: &mut SessionContext, in_cinematic: bool) {
        if !events.is_empty() {
            trace!(target: "session", "routing {} input events", events.len());
        }

        for event in events {
            let transition = self.tracker.process_event(event);
            match *event {
                InputEvent::MouseMoved { .. } => self.on_pointer_moved(context),

                InputEvent::MouseButtonDown { button: MouseButton::Left, .. } if transition => {
                    if in_cinematic {
                        context.bus.push(SessionSignal::SkipCinematic);
                    } else {
                        self.on_left_down(context);
                    }
                }
                InputEvent::MouseButtonUp { button: MouseButton::Left, .. } => self.on_left_up(context),

                InputEvent::MouseButtonDown { button: MouseButton::Right, .. } if transition && !in_cinematic => {
                    let pointer = self.tracker.pointer();
                    context.editor.select_at(pointer, &context.registry, context.engine.as_ref());
                }

                InputEvent::KeyDown { key, .. } if transition => {
                    if in_cinematic && key.skips_cinematic() {
                        context.bus.push(SessionSignal::SkipCinematic);
                    } else if key.deletes_selection() {
                        context
                            .editor
                            .delete_selected(&mut context.registry, context.engine.as_mut(), &mut context.bus);
                    }
                }

                _ => {}
            }
        }
    }

    /// Window currently being dragged or resized.
    pub fn target(&self) -> Option<WindowRole> {
        self.target
    }

    pub fn tracker(&self) -> &StateTracker {
        &self.tracker
    }

    //--- Handlers ---------------------------------------------------------

    fn on_left_down(&mut self, context: &mut SessionContext) {
        let pointer = self.tracker.pointer();
        context.editor.clear_selection();

        let Some((role, zone)) = context.registry.topmost_hit(pointer) else {
            return;
        };
        let Some(window) = context.registry.get_mut(role) else {
            return;
        };

        match zone {
            HitZone::ResizeHandle => window.start_resize(pointer),
            HitZone::TitleBar => window.start_drag(pointer),
            HitZone::Body => return,
        }

        debug!(target: "session", "{:?} {:?} grabbed", role, zone);
        context.registry.bring_to_front(role);
        self.target = Some(role);
    }

    fn on_pointer_moved(&mut self, context: &mut SessionContext) {
        let Some(role) = self.target else {
            return;
        };
        let pointer = self.tracker.pointer();

        match context.registry.get_mut(role) {
            Some(window) if window.is_dragging() => window.on_drag(context.engine.as_mut(), pointer),
            Some(window) if window.is_resizing() => window.on_resize(context.engine.as_mut(), pointer),
            Some(_) => {}
            // Window was closed mid-gesture.
            None => self.target = None,
        }
    }

    fn on_left_up(&mut self, context: &mut SessionContext) {
        for window in context.registry.windows_mut() {
            window.end_drag();
            window.end_resize();
        }
        self.target = None;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Rect;
    use crate::core::input::event::{KeyCode, Modifiers};
    use crate::core::physics::SimpleWorld;
    use crate::core::tuning::Tuning;
    use crate::core::window::{Domain, ObjectLabel, ObjectShape, Window};
    use glam::Vec2;

    fn context_with(roles: &[(WindowRole, Rect)]) -> SessionContext {
        let mut ctx = SessionContext::new(Box::new(SimpleWorld::new()), Tuning::default(), Some(1));
        for &(role, rect) in roles {
            let window = Window::new(role, "TEST.exe", rect, Domain::Lunar, role.group());
            ctx.registry.insert(ctx.engine.as_mut(), window);
        }
        ctx
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::MouseMoved { x, y }
    }

    fn down(button: MouseButton) -> InputEvent {
        InputEvent::MouseButtonDown { button, modifiers: Modifiers::NONE }
    }

    fn up(button: MouseButton) -> InputEvent {
        InputEvent::MouseButtonUp { button, modifiers: Modifiers::NONE }
    }

    fn key(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    #[test]
    fn title_bar_drag_moves_window() {
        let mut ctx = context_with(&[(WindowRole::Station, Rect::new(100.0, 80.0, 200.0, 150.0))]);
        let mut router = InputRouter::new();

        router.route(
            &[moved(150.0, 90.0), down(MouseButton::Left), moved(170.0, 200.0), up(MouseButton::Left)],
            &mut ctx,
            false,
        );

        let rect = ctx.registry.get(WindowRole::Station).unwrap().rect();
        assert_eq!((rect.x, rect.y), (120.0, 190.0));
        assert_eq!(router.target(), None);
    }

    #[test]
    fn resize_handle_wins_and_raises_window() {
        let mut ctx = context_with(&[
            (WindowRole::Station, Rect::new(0.0, 0.0, 200.0, 150.0)),
            (WindowRole::Void, Rect::new(300.0, 0.0, 200.0, 150.0)),
        ]);
        let mut router = InputRouter::new();

        router.route(&[moved(198.0, 148.0), down(MouseButton::Left), moved(248.0, 168.0)], &mut ctx, false);

        let station = ctx.registry.get(WindowRole::Station).unwrap();
        assert_eq!((station.rect().width, station.rect().height), (250.0, 170.0));
        assert_eq!(ctx.registry.windows().last().unwrap().role(), WindowRole::Station);
        assert_eq!(router.target(), Some(WindowRole::Station));
    }

    #[test]
    fn moves_after_release_do_nothing() {
        let mut ctx = context_with(&[(WindowRole::Station, Rect::new(100.0, 80.0, 200.0, 150.0))]);
        let mut router = InputRouter::new();

        router.route(&[moved(150.0, 90.0), down(MouseButton::Left), up(MouseButton::Left)], &mut ctx, false);
        router.route(&[moved(400.0, 300.0)], &mut ctx, false);

        assert_eq!(ctx.registry.get(WindowRole::Station).unwrap().rect().x, 100.0);
    }

    #[test]
    fn cinematic_turns_clicks_and_keys_into_skips() {
        let mut ctx = context_with(&[(WindowRole::Station, Rect::new(100.0, 80.0, 200.0, 150.0))]);
        let mut router = InputRouter::new();

        router.route(
            &[moved(150.0, 90.0), down(MouseButton::Left), up(MouseButton::Left), key(KeyCode::Enter)],
            &mut ctx,
            true,
        );

        assert_eq!(ctx.bus.count::<SessionSignal>(), 2);
        assert!(!ctx.registry.get(WindowRole::Station).unwrap().is_dragging());
    }

    #[test]
    fn right_click_selects_and_delete_removes() {
        let mut ctx = context_with(&[(WindowRole::Station, Rect::new(100.0, 80.0, 200.0, 150.0))]);
        ctx.editor.unlock();
        let handle = {
            let window = ctx.registry.get_mut(WindowRole::Station).unwrap();
            window.spawn_object(ctx.engine.as_mut(), &mut ctx.rng, ObjectLabel::Mass, ObjectShape::Cube)
        };
        let at = ctx.engine.body(handle).unwrap().position;
        let mut router = InputRouter::new();

        router.route(&[moved(at.x, at.y), down(MouseButton::Right)], &mut ctx, false);
        assert_eq!(ctx.editor.selected(), Some(handle));

        router.route(&[key(KeyCode::Delete)], &mut ctx, false);
        assert_eq!(ctx.registry.get(WindowRole::Station).unwrap().member_count(), 0);
    }

    #[test]
    fn left_click_on_empty_surface_clears_selection() {
        let mut ctx = context_with(&[(WindowRole::Station, Rect::new(100.0, 80.0, 200.0, 150.0))]);
        ctx.editor.unlock();
        let at = {
            let window = ctx.registry.get_mut(WindowRole::Station).unwrap();
            let handle =
                window.spawn_object(ctx.engine.as_mut(), &mut ctx.rng, ObjectLabel::Mass, ObjectShape::Cube);
            ctx.engine.body(handle).unwrap().position
        };
        let mut router = InputRouter::new();

        router.route(&[moved(at.x, at.y), down(MouseButton::Right), up(MouseButton::Right)], &mut ctx, false);
        router.route(&[moved(600.0, 340.0), down(MouseButton::Left)], &mut ctx, false);

        assert_eq!(ctx.editor.selected(), None);
        assert_eq!(router.tracker().pointer(), Vec2::new(600.0, 340.0));
    }
}
