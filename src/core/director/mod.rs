//=========================================================================
// Director
//=========================================================================
//
// Stage sequencing: the session's finite state machine.
//
// Architecture:
//   Director
//     ├─ stage + sub-state (monotonic, see `Stage`)
//     ├─ ConsoleTyper    (boot cinematic)
//     ├─ DialogueQueue   (typed narration, continuations on fade-out)
//     ├─ Schedule        (delayed continuations, tagged by owner stage)
//     └─ Overlay         (what the renderer draws on top)
//
// Per tick:
//   signals → losses → collisions → narration → due schedule entries
//           → stage monitor → overlay
//
// Continuations never run inline from where they are produced. They are
// queued on `pending` and drained in order, so entering a stage from a
// continuation cannot re-enter the director.
//
//=========================================================================

//=== Module Declarations =================================================

mod console;
mod dialogue;
mod overlay;
mod schedule;
mod script;
mod stage;

//=== Public API ==========================================================

pub use dialogue::{DialogueQueue, DialogueUpdate};
pub use overlay::{DialogueView, Effects, Overlay};
pub use schedule::{Continuation, Schedule};
pub use stage::{Stage, SubState};

//=== External Dependencies ===============================================

use std::collections::VecDeque;

use glam::Vec2;
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::audio::Cue;
use crate::core::geometry::{Rect, RENDER_HEIGHT};
use crate::core::input::SessionSignal;
use crate::core::physics::CollisionEvent;
use crate::core::runtime::SessionContext;
use crate::core::window::{
    Domain, ObjectDeleted, ObjectLabel, ObjectLost, ObjectShape, Window, WindowRole,
};
use console::ConsoleTyper;
use script::*;

//=== Stage Windows =======================================================

fn stage_window(role: WindowRole) -> Window {
    let (title, rect, domain) = match role {
        WindowRole::Tutorial => ("SYSTEM.exe", Rect::new(270.0, 140.0, 200.0, 150.0), Domain::Lunar),
        WindowRole::Station => ("STATION.exe", Rect::new(100.0, 80.0, 200.0, 150.0), Domain::Lunar),
        WindowRole::Void => ("VOID.exe", Rect::new(340.0, 120.0, 200.0, 150.0), Domain::Void),
    };
    Window::new(role, title, rect, domain, role.group())
}

/// Object each stage window is seeded with.
fn stage_object(role: WindowRole) -> (ObjectLabel, ObjectShape) {
    match role {
        WindowRole::Void => (ObjectLabel::Void, ObjectShape::Sphere),
        WindowRole::Tutorial | WindowRole::Station => (ObjectLabel::Mass, ObjectShape::Cube),
    }
}

/// Idle hint lines alternate on and off, one period each.
fn even_period(timer_ms: f32, period_ms: f32) -> bool {
    (timer_ms / period_ms).floor() as u64 % 2 == 0
}

//=== Director ============================================================

pub struct Director {
    stage: Stage,
    sub_state: SubState,

    clock_ms: f64,
    stage_elapsed_ms: f32,
    next_hint_line_ms: f32,
    last_percent: Option<u32>,
    stage_spawned: bool,
    /// Stage windows with a respawn already on the schedule.
    restocking: Vec<WindowRole>,
    losses: u32,

    console: ConsoleTyper,
    console_fading: bool,
    dialogue: DialogueQueue,
    schedule: Schedule,
    pending: VecDeque<Continuation>,

    overlay: Overlay,
    finished: bool,
}

impl Director {
    pub fn new() -> Self {
        Self {
            stage: Stage::Cinematic,
            sub_state: SubState::Start,
            clock_ms: 0.0,
            stage_elapsed_ms: 0.0,
            next_hint_line_ms: 0.0,
            last_percent: None,
            stage_spawned: false,
            restocking: Vec::new(),
            losses: 0,
            console: ConsoleTyper::new(BOOT_CONSOLE),
            console_fading: false,
            dialogue: DialogueQueue::new(),
            schedule: Schedule::new(),
            pending: VecDeque::new(),
            overlay: Overlay::default(),
            finished: false,
        }
    }

    /// Begins the boot cinematic. Called once before the first tick.
    pub fn start(&mut self) {
        info!(target: "director", "session started");
        self.console.begin_next_line();
        self.sub_state = SubState::Active;
        self.refresh_overlay();
    }

    //--- Update Loop ------------------------------------------------------

    /// Advances the director by `dt_ms`.
    ///
    /// Expects this tick's physics step, loss evaluation and transfer pass
    /// to have run already; `collisions` are the collision starts of that
    /// step.
    pub fn update(&mut self, context: &mut SessionContext, dt_ms: f32, collisions: &[CollisionEvent]) {
        if self.finished {
            return;
        }

        self.clock_ms += dt_ms as f64;
        self.stage_elapsed_ms += dt_ms;
        self.overlay.effects.flicker = 0;

        self.process_signals(context);
        self.process_removals(context);
        self.process_collisions(context, collisions);

        self.update_narration(context, dt_ms);
        for (owner, action) in self.schedule.take_due(self.clock_ms) {
            if owner == self.stage {
                self.pending.push_back(action);
            } else {
                debug!(target: "director", "dropped stale {:?} queued by {:?}", action, owner);
            }
        }
        self.run_pending(context);

        if self.sub_state == SubState::Active {
            self.monitor(context);
            self.run_pending(context);
        }

        self.refresh_overlay();
    }

    //--- Event Processing -------------------------------------------------

    fn process_signals(&mut self, context: &mut SessionContext) {
        let skip = context.bus.read::<SessionSignal>().contains(&SessionSignal::SkipCinematic);
        if skip && self.stage == Stage::Cinematic {
            debug!(target: "director", "cinematic skipped");
            self.finish_cinematic();
        }
    }

    fn process_removals(&mut self, context: &mut SessionContext) {
        for deleted in context.bus.read::<ObjectDeleted>() {
            debug!(
                target: "director",
                "{} deleted from {:?}",
                deleted.object.label.as_str(),
                deleted.role
            );
        }

        let lost: Vec<ObjectLost> = context.bus.read::<ObjectLost>().to_vec();
        for event in lost {
            self.handle_loss(context, event);
        }
    }

    /// Raises the mood; at the ceiling the current stage is soft-reset.
    fn handle_loss(&mut self, context: &mut SessionContext, event: ObjectLost) {
        self.losses += 1;
        let mood = context.mood.report_loss();
        context.bus.push(Cue::Error);
        self.overlay.effects.corona_speed = context.mood.corona_speed();

        debug!(
            target: "director",
            "{} lost from {:?} (mood {})",
            event.object.label.as_str(),
            event.role,
            mood
        );

        if mood >= context.tuning.mood_ceiling {
            self.soft_reset(context);
        }
    }

    fn soft_reset(&mut self, context: &mut SessionContext) {
        info!(target: "director", "mood ceiling reached, resetting {:?}", self.stage);

        let engine = context.engine.as_mut();
        for window in context.registry.windows_mut() {
            window.clear_objects(engine);
        }
        context.mood.set(context.tuning.mood_after_reset);
        context.editor.clear_selection();

        let roles: &[WindowRole] = match self.stage {
            Stage::Stage1 => &[WindowRole::Station],
            Stage::Stage2 => &[WindowRole::Void],
            Stage::Stage3 | Stage::Finale => &[WindowRole::Station, WindowRole::Void],
            _ => &[],
        };
        for &role in roles {
            self.spawn_stage_object(context, role);
        }
    }

    fn process_collisions(&mut self, context: &mut SessionContext, collisions: &[CollisionEvent]) {
        let light = context.tuning.collision_cue_threshold;
        let heavy = context.tuning.heavy_collision_threshold;
        let alchemy = context.tuning.alchemy_force;

        for event in collisions {
            if event.relative_speed > heavy {
                context.bus.push(Cue::CollisionHeavy);
            } else if event.relative_speed > light {
                context.bus.push(Cue::CollisionLight);
            }

            let armed = self.stage == Stage::Stage3 && self.sub_state == SubState::Active;
            if armed && event.relative_speed > alchemy && self.try_alchemy(context, event) {
                self.sub_state = SubState::Complete;
                self.enter_stage(context, Stage::Finale);
            }
        }
    }

    /// Consumes a mass/void pair. Both bodies leave through their windows.
    fn try_alchemy(&mut self, context: &mut SessionContext, event: &CollisionEvent) -> bool {
        let (Some((role_a, a)), Some((role_b, b))) = (
            context.registry.find_member(event.a),
            context.registry.find_member(event.b),
        ) else {
            return false;
        };

        let labels = (a.label, b.label);
        if labels != (ObjectLabel::Mass, ObjectLabel::Void) && labels != (ObjectLabel::Void, ObjectLabel::Mass) {
            return false;
        }

        for (role, handle) in [(role_a, a.handle), (role_b, b.handle)] {
            if let Some(window) = context.registry.get_mut(role) {
                window.remove_member(context.engine.as_mut(), handle);
            }
        }

        info!(target: "director", "alchemy at relative speed {:.2}", event.relative_speed);
        true
    }

    //--- Narration --------------------------------------------------------

    fn update_narration(&mut self, context: &mut SessionContext, dt_ms: f32) {
        let mut typed = 0;

        if self.stage == Stage::Cinematic {
            if self.console.is_typing() {
                let update = self.console.update(dt_ms);
                typed += update.typed;
                if update.line_finished {
                    if self.console.is_exhausted() {
                        self.finish_cinematic();
                    } else {
                        self.schedule_in(CONSOLE_LINE_GAP_MS, Continuation::NextConsoleLine);
                    }
                }
            }
            if self.console_fading {
                let alpha = self.overlay.effects.console_alpha - dt_ms / CONSOLE_FADE_MS;
                self.overlay.effects.console_alpha = alpha.max(0.0);
            }
        }

        let update = self.dialogue.update(dt_ms);
        typed += update.typed;
        self.pending.extend(update.finished);

        if typed > 0 {
            context.bus.push(Cue::Type);
        }
    }

    fn finish_cinematic(&mut self) {
        if self.console_fading {
            return;
        }
        self.sub_state = SubState::Complete;
        self.console_fading = true;
        self.schedule_in(CONSOLE_FADE_MS, Continuation::BeginTutorial);
    }

    fn say(&mut self, text: &'static str, duration_ms: f32, then: Option<Continuation>) {
        debug!(target: "director", "say {:?}", text);
        self.dialogue.say(text, duration_ms, then);
    }

    //--- Continuations ----------------------------------------------------

    fn schedule_in(&mut self, delay_ms: f32, action: Continuation) {
        self.schedule.push(self.clock_ms + delay_ms as f64, self.stage, action);
    }

    fn run_pending(&mut self, context: &mut SessionContext) {
        while let Some(action) = self.pending.pop_front() {
            self.run(context, action);
        }
    }

    fn run(&mut self, context: &mut SessionContext, action: Continuation) {
        match action {
            Continuation::NextConsoleLine => {
                if self.stage == Stage::Cinematic && !self.console_fading && !self.console.begin_next_line() {
                    self.finish_cinematic();
                }
            }
            Continuation::BeginTutorial => self.enter_stage(context, Stage::TutorialMove),
            Continuation::SpawnObject { role, label, shape, line } => {
                let Some(window) = context.registry.get_mut(role) else {
                    warn!(target: "director", "spawn into missing {:?} window", role);
                    return;
                };
                let restock = self.restocking.contains(&role);
                self.restocking.retain(|&queued| queued != role);
                // A soft reset may have refilled the window in the meantime.
                if !(restock && window.member_count() > 0) {
                    window.spawn_object(context.engine.as_mut(), &mut context.rng, label, shape);
                }
                self.stage_spawned = true;
                if let Some(line) = line {
                    self.say(line, LINE_MS, None);
                }
            }
            Continuation::EnterStage(stage) => self.enter_stage(context, stage),
            Continuation::Glitch => self.overlay.effects.glitch_intensity = 1.0,
            Continuation::JumpScare => {
                self.overlay.effects.jump_scare = true;
                context.bus.push(Cue::Error);
            }
            Continuation::EndSession => {
                info!(target: "director", "session ended");
                self.finished = true;
            }
        }
    }

    //--- Stage Transitions ------------------------------------------------

    /// Moves to a later stage and runs its entry actions. Requests for the
    /// current or an earlier stage are ignored.
    fn enter_stage(&mut self, context: &mut SessionContext, next: Stage) {
        if next <= self.stage {
            warn!(target: "director", "ignored transition {:?} -> {:?}", self.stage, next);
            return;
        }

        info!(target: "director", "{:?} -> {:?}", self.stage, next);
        self.stage = next;
        self.sub_state = SubState::Start;
        self.stage_elapsed_ms = 0.0;
        self.next_hint_line_ms = 0.0;
        self.last_percent = None;
        self.stage_spawned = false;
        self.restocking.clear();
        self.overlay.hint = None;
        let orphaned = self.dialogue.clear();
        self.pending.extend(orphaned);

        match next {
            Stage::Cinematic => {}
            Stage::TutorialMove => {
                self.overlay.effects.console_alpha = 0.0;
                self.overlay.effects.host_visible = true;
                self.overlay.effects.corona_speed = CORONA_IDLE;
                self.open_window(context, WindowRole::Tutorial);
                self.say(MOVE_INTRO, MOVE_INTRO_MS, None);
            }
            Stage::TutorialExpand => {
                context.bus.push(Cue::Success);
                self.say(MOVE_DONE, MOVE_DONE_MS, None);
            }
            Stage::Stage1 => {
                self.overlay.effects.flicker = 2;
                context.registry.remove(context.engine.as_mut(), WindowRole::Tutorial);
                self.open_window(context, WindowRole::Station);
                self.schedule_spawn(context, WindowRole::Station, Some(STAGE1_SPAWN));
            }
            Stage::Stage2 => {
                self.open_window(context, WindowRole::Void);
                context.editor.unlock();
                self.schedule_spawn(context, WindowRole::Void, Some(STAGE2_SPAWN));
            }
            Stage::Stage3 => {
                self.overlay.effects.corona_speed = CORONA_STAGE3;
                self.say(STAGE3_INTRO, LINE_MS, None);
                // The void sphere was deleted to clear stage 2, and the cube
                // may have been lost on the way.
                if !self.restock_stage3(context, Some(STAGE3_TASK)) {
                    self.say(STAGE3_TASK, LINE_MS, None);
                }
            }
            Stage::Finale => {
                self.overlay.effects.corona_speed = CORONA_FINALE;
                self.say(FINALE_TASK, LINE_MS, None);
            }
            Stage::Crash => {
                self.overlay.effects.corona_speed = CORONA_CRASH;
                self.schedule_in(CRASH_GLITCH_MS, Continuation::Glitch);
                self.schedule_in(CRASH_JUMP_SCARE_MS, Continuation::JumpScare);
                self.schedule_in(CRASH_END_MS, Continuation::EndSession);
            }
        }

        self.sub_state = SubState::Active;
    }

    fn open_window(&mut self, context: &mut SessionContext, role: WindowRole) {
        if !context.registry.contains(role) {
            context.registry.insert(context.engine.as_mut(), stage_window(role));
        }
    }

    fn schedule_spawn(&mut self, context: &SessionContext, role: WindowRole, line: Option<&'static str>) {
        let (label, shape) = stage_object(role);
        let delay = context.tuning.spawn_delay_ms;
        self.schedule_in(delay, Continuation::SpawnObject { role, label, shape, line });
    }

    /// Schedules a respawn for every empty stage-3 window that has none
    /// queued yet. `line` goes with the last one. Returns whether anything
    /// was scheduled.
    fn restock_stage3(&mut self, context: &SessionContext, line: Option<&'static str>) -> bool {
        let empty: Vec<WindowRole> = [WindowRole::Station, WindowRole::Void]
            .into_iter()
            .filter(|role| !self.restocking.contains(role))
            .filter(|&role| {
                context
                    .registry
                    .get(role)
                    .is_some_and(|window| window.member_count() == 0)
            })
            .collect();

        for (index, &role) in empty.iter().enumerate() {
            debug!(target: "director", "restocking empty {:?} window", role);
            let line = if index + 1 == empty.len() { line } else { None };
            self.schedule_spawn(context, role, line);
            self.restocking.push(role);
        }
        !empty.is_empty()
    }

    fn spawn_stage_object(&mut self, context: &mut SessionContext, role: WindowRole) {
        let (label, shape) = stage_object(role);
        match context.registry.get_mut(role) {
            Some(window) => {
                window.spawn_object(context.engine.as_mut(), &mut context.rng, label, shape);
            }
            None => warn!(target: "director", "respawn into missing {:?} window", role),
        }
    }

    //--- Stage Monitors ---------------------------------------------------

    fn monitor(&mut self, context: &mut SessionContext) {
        match self.stage {
            Stage::TutorialMove => self.monitor_move(context),
            Stage::TutorialExpand => self.monitor_expand(context),
            Stage::Stage1 => self.monitor_stage1(context),
            Stage::Stage2 => self.monitor_stage2(context),
            Stage::Stage3 => {
                self.restock_stage3(context, None);
            }
            Stage::Finale => self.monitor_finale(context),
            Stage::Cinematic | Stage::Crash => {}
        }
    }

    fn monitor_move(&mut self, context: &mut SessionContext) {
        let Some(rect) = context.registry.get(WindowRole::Tutorial).map(Window::rect) else {
            return;
        };
        let tuning = &context.tuning;

        if rect.x < tuning.move_threshold.x && rect.y < tuning.move_threshold.y {
            self.sub_state = SubState::Complete;
            self.enter_stage(context, Stage::TutorialExpand);
            return;
        }

        if self.stage_elapsed_ms > tuning.move_hint_delay_ms {
            self.overlay.hint = Some(tuning.move_hint_position);
            if self.stage_elapsed_ms >= self.next_hint_line_ms && !self.dialogue.is_busy() {
                self.next_hint_line_ms = self.stage_elapsed_ms + tuning.move_hint_interval_ms;
                self.say(MOVE_HINT, HINT_MS, None);
            }
        }
    }

    fn monitor_expand(&mut self, context: &mut SessionContext) {
        let Some(window) = context.registry.get_mut(WindowRole::Tutorial) else {
            return;
        };
        let rect = window.rect();
        let coverage = rect.area() / Rect::surface().area();
        window.set_content_alpha(context.tuning.content_alpha(coverage));

        let percent = (coverage * 100.0).floor() as u32;
        if self.last_percent != Some(percent) {
            self.last_percent = Some(percent);
            self.dialogue.flash(loading_line(percent), LOADING_FLASH_MS);
        }

        let tuning = &context.tuning;
        self.overlay.hint = (self.stage_elapsed_ms > tuning.expand_hint_delay_ms
            && coverage < tuning.expand_hint_max_coverage)
            .then(|| Vec2::new(rect.right() - 10.0, rect.bottom() - 10.0));

        if coverage > tuning.expand_completion {
            self.sub_state = SubState::Complete;
            let orphaned = self.dialogue.clear();
            self.pending.extend(orphaned);
            context.bus.push(Cue::Success);
            self.enter_stage(context, Stage::Stage1);
        }
    }

    fn monitor_stage1(&mut self, context: &mut SessionContext) {
        let Some(window) = context.registry.get(WindowRole::Station) else {
            return;
        };
        let rect = window.rect();
        let timer = window.stage_timer_ms();
        let tuning = &context.tuning;
        let target_y = RENDER_HEIGHT - rect.height - tuning.stage1_bottom_margin;

        if rect.y > target_y - tuning.stage1_completion_window {
            self.sub_state = SubState::Complete;
            self.overlay.hint = None;
            context.mood.set(context.tuning.mood_after_stage1);
            context.bus.push(Cue::CollisionHeavy);
            self.say(STAGE1_DONE, MOVE_DONE_MS, Some(Continuation::EnterStage(Stage::Stage2)));
            return;
        }

        if timer > tuning.stage1_hint_delay_ms && rect.y < target_y - tuning.stage1_hint_window {
            self.overlay.hint = Some(Vec2::new(rect.x + rect.width / 2.0, rect.bottom() + 30.0));
            if even_period(timer, tuning.stage1_hint_period_ms) && !self.dialogue.is_busy() {
                self.say(STAGE1_HINT, HINT_MS, None);
            }
        } else {
            self.overlay.hint = None;
        }
    }

    fn monitor_stage2(&mut self, context: &mut SessionContext) {
        if !self.stage_spawned {
            return;
        }
        let Some(window) = context.registry.get(WindowRole::Void) else {
            return;
        };

        if window.member_count() == 0 {
            self.sub_state = SubState::Complete;
            self.overlay.hint = None;
            context.bus.push(Cue::Success);
            self.say(STAGE2_DONE, LINE_MS, Some(Continuation::EnterStage(Stage::Stage3)));
            return;
        }

        let timer = window.stage_timer_ms();
        if timer > context.tuning.stage2_hint_delay_ms {
            let first = window.members()[0].handle;
            self.overlay.hint = context.engine.body(first).map(|state| state.position);
            if even_period(timer, context.tuning.stage2_hint_period_ms) && !self.dialogue.is_busy() {
                self.say(STAGE2_HINT, HINT_MS, None);
            }
        } else {
            self.overlay.hint = None;
        }
    }

    fn monitor_finale(&mut self, context: &mut SessionContext) {
        let (Some(station), Some(void)) = (
            context.registry.get(WindowRole::Station),
            context.registry.get(WindowRole::Void),
        ) else {
            return;
        };

        let (a, b) = (station.rect(), void.rect());
        let Some(overlap) = a.intersection(&b) else {
            return;
        };
        let smaller = a.area().min(b.area());

        if smaller > 0.0 && overlap.area() / smaller > context.tuning.finale_overlap {
            self.sub_state = SubState::Complete;
            self.enter_stage(context, Stage::Crash);
        }
    }

    //--- Overlay ----------------------------------------------------------

    fn refresh_overlay(&mut self) {
        self.overlay.stage = self.stage;
        self.overlay.console_lines = if self.overlay.effects.console_alpha > 0.0 {
            self.console.lines()
        } else {
            Vec::new()
        };
        self.overlay.dialogue = self.dialogue.visible().map(|(text, alpha)| DialogueView {
            text: text.to_string(),
            alpha,
        });
    }

    //--- Accessors --------------------------------------------------------

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn sub_state(&self) -> SubState {
        self.sub_state
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Lost objects reported this session.
    pub fn losses(&self) -> u32 {
        self.losses
    }

    /// Session time in milliseconds.
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    /// The crash sequence has run to completion.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Default for Director {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
