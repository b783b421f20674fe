//! Per-tick orchestration
//!
//! One handler per lifecycle variant. Within a running tick the order is
//! fixed: obstacle prune/refill, then physics, then collision, then
//! scoring; the compositor observes the post-scoring state.

use super::collision::{Cell, detect_collisions};
use super::obstacles;
use super::physics;
use super::state::{GameState, Lifecycle};
use crate::consts::*;
use crate::render::{self, Frame};

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Did the player flap at all this tick
    pub flapped: bool,
}

impl TickInput {
    /// The driver reports how many items were selected; any positive count
    /// counts as one flap.
    pub fn from_selection_count(count: u32) -> Self {
        Self { flapped: count > 0 }
    }
}

/// Advance the game state by one tick and compose the resulting frame.
///
/// Panics if `state` violates its invariants; such a state indicates a
/// corrupted snapshot from the persistence layer, not a runtime condition
/// to recover from.
pub fn tick(state: &mut GameState, input: &TickInput) -> Frame {
    state.validate();

    let hits = match state.lifecycle {
        Lifecycle::Waiting => {
            // no idle tick: the first call transitions and simulates
            state.lifecycle = Lifecycle::Ticking;
            log::info!("run started (seed {})", state.seed);
            running_tick(state, input.flapped)
        }
        Lifecycle::Ticking => running_tick(state, input.flapped),
        Lifecycle::Dying | Lifecycle::Dead => settle_tick(state),
    };

    let frame = render::compose(state, &hits);
    state.frame += 1;
    frame
}

/// Running-tick logic for Waiting/Ticking. Returns the collision set so
/// the compositor can highlight the struck cells.
fn running_tick(state: &mut GameState, flapped: bool) -> Vec<Cell> {
    obstacles::advance(state);
    physics::step(state, flapped);

    let hits = detect_collisions(state);
    if hits.is_empty() {
        // nearest pair is always first; score the tick its leading edge
        // lines up with the player column
        if state.obstacles[0].screen_x(state.frame) == PLAYER_X as i32 {
            state.score += 1;
            log::debug!("score {} at frame {}", state.score, state.frame);
        }
    } else {
        state.lifecycle = Lifecycle::Dying;
        log::info!("collision at frame {}, {} cells struck", state.frame, hits.len());
    }
    state.high_score = state.high_score.max(state.score);
    hits
}

/// Scripted fall to the ground. Ignores flap input; idempotent once the
/// anchor row is pinned at the ground line.
fn settle_tick(state: &mut GameState) -> Vec<Cell> {
    state.fall_speed = MAX_FALL_SPEED;
    state.player_y = (state.player_y + MAX_FALL_SPEED).min(GROUND_ROW);
    if state.lifecycle == Lifecycle::Dying && state.player_y == GROUND_ROW {
        state.lifecycle = Lifecycle::Dead;
        log::info!("run over, final score {}", state.score);
    }
    state.high_score = state.high_score.max(state.score);
    Vec::new()
}
