//! Procedural obstacle stream
//!
//! The stream holds a constant number of pairs in ascending-x order. Each
//! tick, pairs whose trailing edge has scrolled past column 0 are pruned
//! and the stream is topped back up with freshly drawn pairs that enter
//! one column beyond the visible area.

use rand::Rng;

use super::state::{GameState, ObstaclePair, RngState};
use crate::consts::*;

/// Fixed pairs every run starts with
pub const STARTING_OBSTACLES: [ObstaclePair; OBSTACLE_COUNT] = [
    ObstaclePair {
        x: 10,
        midpoint: 8,
        gap: 6,
    },
    ObstaclePair {
        x: 24,
        midpoint: 6,
        gap: 7,
    },
];

/// Draw a new pair that enters one column beyond the visible area
pub fn spawn_obstacle(rng_state: &mut RngState, frame: u32) -> ObstaclePair {
    let mut rng = rng_state.next_rng();
    ObstaclePair {
        x: WIDTH as i32 + 1 + frame as i32,
        midpoint: rng.random_range(MIDPOINT_MIN..=MIDPOINT_MAX),
        gap: rng.random_range(GAP_MIN..=GAP_MAX),
    }
}

/// Prune scrolled-out pairs and refill the stream to its fixed count.
///
/// Appending freshly spawned pairs preserves ascending-x order because a
/// new pair always enters beyond the visible area.
pub fn advance(state: &mut GameState) {
    let frame = state.frame;
    state.obstacles.retain(|o| o.trailing_edge(frame) > 0);
    while state.obstacles.len() < OBSTACLE_COUNT {
        let pair = spawn_obstacle(&mut state.rng_state, frame);
        log::debug!("spawned obstacle at x={} (frame {})", pair.x, frame);
        state.obstacles.push(pair);
    }
}
