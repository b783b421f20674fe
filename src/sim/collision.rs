//! Collision detection
//!
//! Returns the set of grid cells where the player's footprint intersects
//! obstacle or ground cells, not merely a boolean. The compositor uses the
//! set to highlight the struck cells.

use super::state::GameState;
use crate::consts::*;

/// A visible grid cell as (column, row)
pub type Cell = (usize, usize);

/// The fixed 2x2 footprint anchored at `(PLAYER_X, player_y)`: the anchor,
/// one column left, one row down, and down-left. The lower row is clipped
/// at the grid edge.
pub fn player_footprint(player_y: i32) -> Vec<Cell> {
    let y = player_y as usize;
    let mut cells = vec![(PLAYER_X, y), (PLAYER_X - 1, y)];
    if player_y < HEIGHT as i32 - 1 {
        cells.push((PLAYER_X, y + 1));
        cells.push((PLAYER_X - 1, y + 1));
    }
    cells
}

/// Every footprint cell that coincides with an obstacle cell, plus every
/// footprint cell at or below the ground line. Empty means no collision.
pub fn detect_collisions(state: &GameState) -> Vec<Cell> {
    player_footprint(state.player_y)
        .into_iter()
        .filter(|&(col, row)| {
            row as i32 >= GROUND_ROW
                || state
                    .obstacles
                    .iter()
                    .any(|o| o.occupies(col, row, state.frame))
        })
        .collect()
}
