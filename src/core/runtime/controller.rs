//=========================================================================
// Session Controller
//=========================================================================
//
// Owns one session and advances it one tick at a time.
//
// Tick order:
//   input → physics step → per-window forces + loss flags → transfers
//         → loss resolution → editor refresh → director → frame + cues
//
// Losses are flagged before the transfer pass but resolved after it, so
// a body that crossed into a neighbouring window during this tick is
// never reported lost by the window it left.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use super::SessionContext;
use crate::core::audio::{AudioSink, Cue};
use crate::core::director::{Director, Stage};
use crate::core::input::{InputEvent, InputRouter};
use crate::core::physics::BodyHandle;
use crate::core::platform_bridge::TickControl;
use crate::core::render::{FrameSink, FrameSnapshot};
use crate::core::transfer::TransferCoordinator;
use crate::core::window::WindowRole;

//=== SessionController ===================================================

pub struct SessionController {
    context: SessionContext,
    director: Director,
    router: InputRouter,
    transfer: TransferCoordinator,
    frame_sink: Box<dyn FrameSink>,
    audio_sink: Box<dyn AudioSink>,
    tick: u64,
}

impl SessionController {
    /// Wraps `context` and starts the boot cinematic.
    pub fn new(
        context: SessionContext,
        frame_sink: Box<dyn FrameSink>,
        audio_sink: Box<dyn AudioSink>,
    ) -> Self {
        let mut director = Director::new();
        director.start();

        Self {
            context,
            director,
            router: InputRouter::new(),
            transfer: TransferCoordinator::new(),
            frame_sink,
            audio_sink,
            tick: 0,
        }
    }

    //--- Input ------------------------------------------------------------

    /// Routes one batch of input. Effects land on the bus and are seen by
    /// the director on the next [`tick`](Self::tick).
    pub fn handle_input(&mut self, events: &[InputEvent]) {
        let in_cinematic = self.director.stage() == Stage::Cinematic;
        self.router.route(events, &mut self.context, in_cinematic);
    }

    //--- Tick -------------------------------------------------------------

    /// Advances the session by `dt_ms` and presents the resulting frame.
    pub fn tick(&mut self, dt_ms: f32) -> TickControl {
        if self.director.is_finished() {
            return TickControl::Exit;
        }
        self.tick += 1;

        let context = &mut self.context;
        context.engine.step(dt_ms);
        let collisions = context.engine.drain_collisions();

        let mut flagged: Vec<(WindowRole, BodyHandle)> = Vec::new();
        for window in context.registry.windows_mut() {
            window.advance_timer(dt_ms);
            let role = window.role();
            flagged.extend(
                window
                    .apply_domain_forces(context.engine.as_mut())
                    .into_iter()
                    .map(|handle| (role, handle)),
            );
        }

        let transfers = self
            .transfer
            .reconcile(context.registry.windows_mut(), context.engine.as_mut());
        if !transfers.is_empty() {
            trace!(target: "session", "tick {}: {} transfers", self.tick, transfers.len());
        }

        for (role, handle) in flagged {
            let Some(window) = context.registry.get_mut(role) else {
                continue;
            };
            // Moved to another window by the transfer pass.
            if !window.contains_member(handle) {
                continue;
            }
            window.on_member_lost(context.engine.as_mut(), &mut context.bus, handle);
        }

        context.editor.refresh(&context.registry);
        self.director.update(context, dt_ms, &collisions);

        let selection = context.editor.view(&context.registry, context.engine.as_ref());
        let frame = FrameSnapshot::capture(
            self.tick,
            &context.registry,
            context.engine.as_ref(),
            self.director.overlay(),
            selection,
        );
        self.frame_sink.present(&frame);

        for cue in context.bus.take::<Cue>() {
            self.audio_sink.play(cue);
        }
        context.bus.clear_all();

        if self.director.is_finished() {
            info!(target: "session", "session finished after {} ticks", self.tick);
            TickControl::Exit
        } else {
            TickControl::Continue
        }
    }

    //--- Property Editor --------------------------------------------------

    /// Sets the selected body's mass; returns the clamped value applied.
    pub fn set_selected_mass(&mut self, mass: f32) -> Option<f32> {
        let applied = self.context.editor.set_mass(self.context.engine.as_mut(), mass);
        debug!(target: "session", "set mass {} -> {:?}", mass, applied);
        applied
    }

    pub fn set_selected_friction_air(&mut self, friction_air: f32) -> Option<f32> {
        self.context
            .editor
            .set_friction_air(self.context.engine.as_mut(), friction_air)
    }

    pub fn set_selected_restitution(&mut self, restitution: f32) -> Option<f32> {
        self.context
            .editor
            .set_restitution(self.context.engine.as_mut(), restitution)
    }

    //--- Accessors --------------------------------------------------------

    pub fn stage(&self) -> Stage {
        self.director.stage()
    }

    pub fn director(&self) -> &Director {
        &self.director
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Direct access for tools and tests, e.g. placing bodies.
    pub fn context_mut(&mut self) -> &mut SessionContext {
        &mut self.context
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.tick
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audio::RecordingAudioSink;
    use crate::core::geometry::Rect;
    use crate::core::input::{KeyCode, Modifiers};
    use crate::core::physics::SimpleWorld;
    use crate::core::render::LatestFrameSink;
    use crate::core::tuning::Tuning;
    use crate::core::window::{Domain, ObjectLabel, ObjectShape, Window};
    use glam::Vec2;

    const DT: f32 = 1000.0 / 60.0;

    fn controller() -> (SessionController, LatestFrameSink, RecordingAudioSink) {
        let frames = LatestFrameSink::new();
        let audio = RecordingAudioSink::new();
        let context = SessionContext::new(Box::new(SimpleWorld::new()), Tuning::default(), Some(3));
        let controller = SessionController::new(context, Box::new(frames.clone()), Box::new(audio.clone()));
        (controller, frames, audio)
    }

    fn run(controller: &mut SessionController, ms: f32) {
        let mut elapsed = 0.0;
        while elapsed < ms {
            controller.tick(DT);
            elapsed += DT;
        }
    }

    fn skip(controller: &mut SessionController) {
        controller.handle_input(&[InputEvent::KeyDown { key: KeyCode::Space, modifiers: Modifiers::NONE }]);
        run(controller, 1500.0);
    }

    //=====================================================================
    // Tick Pipeline
    //=====================================================================

    #[test]
    fn ticks_present_frames_and_play_cues() {
        let (mut controller, frames, audio) = controller();

        run(&mut controller, 1000.0);

        let frame = frames.latest().expect("frame presented");
        assert_eq!(frame.tick, controller.ticks());
        assert_eq!(frame.overlay.stage, Stage::Cinematic);
        assert!(audio.played().contains(&Cue::Type));
    }

    #[test]
    fn skip_key_reaches_tutorial() {
        let (mut controller, frames, _) = controller();

        skip(&mut controller);

        assert_eq!(controller.stage(), Stage::TutorialMove);
        let frame = frames.latest().unwrap();
        assert!(frame.window(WindowRole::Tutorial).is_some());
    }

    #[test]
    fn bus_is_empty_between_ticks() {
        let (mut controller, _, _) = controller();
        run(&mut controller, 500.0);

        assert!(!controller.context().bus.has_messages::<Cue>());
    }

    //=====================================================================
    // Loss and Transfer Ordering
    //=====================================================================

    #[test]
    fn body_outside_margin_is_lost_and_raises_mood() {
        let (mut controller, _, audio) = controller();
        skip(&mut controller);

        let handle = {
            let ctx = controller.context_mut();
            let window = Window::new(
                WindowRole::Station,
                "STATION.exe",
                Rect::new(300.0, 100.0, 200.0, 150.0),
                Domain::Void,
                WindowRole::Station.group(),
            );
            ctx.registry.insert(ctx.engine.as_mut(), window);
            let window = ctx.registry.get_mut(WindowRole::Station).unwrap();
            window.spawn_object(ctx.engine.as_mut(), &mut ctx.rng, ObjectLabel::Mass, ObjectShape::Cube)
        };
        // Drag the window away; the body stays behind.
        {
            let ctx = controller.context_mut();
            let window = ctx.registry.get_mut(WindowRole::Station).unwrap();
            window.start_drag(Vec2::new(310.0, 110.0));
            window.on_drag(ctx.engine.as_mut(), Vec2::new(10.0, 310.0));
            window.end_drag();
        }

        controller.tick(DT);

        let ctx = controller.context();
        assert!(!ctx.engine.contains(handle));
        assert_eq!(ctx.mood.value(), 10);
        assert_eq!(controller.director().losses(), 1);
        assert!(audio.played().contains(&Cue::Error));
    }

    #[test]
    fn editor_setters_need_a_selection() {
        let (mut controller, _, _) = controller();

        assert_eq!(controller.set_selected_mass(50.0), None);
        assert_eq!(controller.set_selected_friction_air(0.1), None);
        assert_eq!(controller.set_selected_restitution(1.0), None);
    }
}
