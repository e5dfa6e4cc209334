//=========================================================================
// Transfer Coordinator
//=========================================================================
//
// Hands members over between overlapping windows.
//
// Per unordered window pair:
//   1. overlap = (A inset by title bar) ∩ (B inset by title bar)
//   2. no overlap → skip the pair
//   3. A → B: members of A inside overlap, moving toward B's centre
//   4. B → A: same, reversed
//
// A transfer switches the body's domain tag, air friction, restitution
// and collision group. Position and velocity are never touched. Each body
// moves at most once per reconcile call.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::geometry::{Rect, TITLE_BAR_HEIGHT};
use crate::core::physics::{BodyHandle, PhysicsEngine};
use crate::core::window::{Window, WindowRole};

//=== Transfer ============================================================

/// One completed hand-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub handle: BodyHandle,
    pub from: WindowRole,
    pub to: WindowRole,
}

//=== Overlap Region ======================================================

/// Intersection of two windows' rectangles after dropping their title
/// bars. `None` when the result has no area.
pub fn overlap_region(a: &Window, b: &Window) -> Option<Rect> {
    below_title_bar(a.rect()).intersection(&below_title_bar(b.rect()))
}

fn below_title_bar(rect: Rect) -> Rect {
    Rect::new(rect.x, rect.y + TITLE_BAR_HEIGHT, rect.width, rect.height - TITLE_BAR_HEIGHT)
}

//=== TransferCoordinator =================================================

/// Per-tick pass run after the physics step and before losses are
/// resolved. `moved` is reset on each call.
#[derive(Debug, Default)]
pub struct TransferCoordinator {
    moved: HashSet<BodyHandle>,
}

impl TransferCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Migrates qualifying members between every overlapping pair and
    /// returns the transfers performed.
    pub fn reconcile(
        &mut self,
        windows: &mut [Window],
        engine: &mut dyn PhysicsEngine,
    ) -> Vec<Transfer> {
        self.moved.clear();
        let mut transfers = Vec::new();

        for j in 1..windows.len() {
            for i in 0..j {
                let (left, right) = windows.split_at_mut(j);
                let a = &mut left[i];
                let b = &mut right[0];

                let Some(overlap) = overlap_region(a, b) else {
                    continue;
                };

                self.transfer_toward(a, b, overlap, engine, &mut transfers);
                self.transfer_toward(b, a, overlap, engine, &mut transfers);
            }
        }

        transfers
    }

    fn transfer_toward(
        &mut self,
        source: &mut Window,
        dest: &mut Window,
        overlap: Rect,
        engine: &mut dyn PhysicsEngine,
        transfers: &mut Vec<Transfer>,
    ) {
        let target = dest.rect().center();

        let leaving: Vec<BodyHandle> = source
            .members()
            .iter()
            .filter(|o| !self.moved.contains(&o.handle))
            .filter_map(|o| engine.body(o.handle).map(|state| (o.handle, state)))
            .filter(|(_, state)| {
                overlap.contains(state.position)
                    && state.velocity.dot(target - state.position) > 0.0
            })
            .map(|(handle, _)| handle)
            .collect();

        for handle in leaving {
            let Some(object) = source.take_member(handle) else {
                continue;
            };
            dest.adopt_member(engine, object);
            self.moved.insert(handle);

            debug!(
                target: "transfer",
                "{} {:?}: {} -> {}",
                object.label.as_str(),
                handle,
                source.title(),
                dest.title()
            );
            transfers.push(Transfer {
                handle,
                from: source.role(),
                to: dest.role(),
            });
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
