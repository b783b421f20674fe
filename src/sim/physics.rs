//! Player vertical physics
//!
//! Asymmetric control: rapid flapping gives strong, increasingly responsive
//! lift; releasing gives gravity acceleration capped at terminal velocity.

use super::state::GameState;
use crate::consts::*;

/// Advance the player's row and fall speed by one tick.
///
/// A flap resets velocity to `FLAP_SPEED` and moves the player up by one
/// row, or two if the previous tick was also a flap. Otherwise gravity adds
/// to the fall speed (capped at `MAX_FALL_SPEED`) and the player drops by
/// the current speed, clamped to the grid.
pub fn step(state: &mut GameState, flapped: bool) {
    if flapped {
        state.fall_speed = FLAP_SPEED;
        let movement = if state.flapped_on_prior_frame { 2 } else { 1 };
        state.player_y = (state.player_y - movement).max(0);
    } else {
        state.fall_speed = (state.fall_speed + GRAVITY).min(MAX_FALL_SPEED);
        state.player_y = (state.player_y + state.fall_speed).clamp(0, HEIGHT as i32 - 1);
    }
    state.flapped_on_prior_frame = flapped;
}
