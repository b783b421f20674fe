//! Game state and core simulation types
//!
//! All state that must be persisted between driver invocations lives here.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of gameplay. Transitions are one-directional:
/// Waiting → Ticking → Dying → Dead, never backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Fresh state, no tick has run yet
    Waiting,
    /// Active gameplay
    Ticking,
    /// Collision happened; scripted fall to the ground
    Dying,
    /// Settled on the ground, run over
    Dead,
}

impl Lifecycle {
    /// True once a collision has ended the run
    pub fn is_over(self) -> bool {
        matches!(self, Lifecycle::Dying | Lifecycle::Dead)
    }
}

/// One of the two output surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceId {
    A,
    B,
}

impl SurfaceId {
    pub fn other(self) -> Self {
        match self {
            SurfaceId::A => SurfaceId::B,
            SurfaceId::B => SurfaceId::A,
        }
    }
}

/// A top/bottom obstacle segment pair sharing one horizontal position
/// and a vertical gap.
///
/// `x` is the leading-edge column at generation time; the current screen
/// column is `x - frame`. Segment heights are derived, not stored: the gap
/// splits as `gap / 2` rows below the midpoint and the remainder above,
/// with the bottom segment truncated at the ground line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstaclePair {
    pub x: i32,
    pub midpoint: i32,
    pub gap: i32,
}

impl ObstaclePair {
    /// Current column of the leading edge
    pub fn screen_x(&self, frame: u32) -> i32 {
        self.x - frame as i32
    }

    /// One past the current column of the trailing edge
    pub fn trailing_edge(&self, frame: u32) -> i32 {
        self.screen_x(frame) + PIPE_WIDTH
    }

    /// Rows `[0, top_height)` belong to the top segment
    pub fn top_height(&self) -> i32 {
        let above = self.gap - self.gap / 2;
        (self.midpoint - above).max(0)
    }

    /// First row of the bottom segment; it extends down to the ground line
    pub fn bottom_start(&self) -> i32 {
        (self.midpoint + self.gap / 2).min(GROUND_ROW)
    }

    /// Whether this pair occupies the given visible grid cell
    pub fn occupies(&self, col: usize, row: usize, frame: u32) -> bool {
        let x = self.screen_x(frame);
        let col = col as i32;
        let row = row as i32;
        if col < x || col >= x + PIPE_WIDTH {
            return false;
        }
        row < self.top_height() || (row >= self.bottom_start() && row < GROUND_ROW)
    }
}

/// RNG state wrapper for serialization.
///
/// Each obstacle draw gets its own Pcg32 stream so a reloaded snapshot
/// replays the exact sequence the live run would have produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Hand out the generator for the next draw and advance the stream
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }
}

/// Complete game state (deterministic, serializable).
///
/// Owned exclusively by the driver between invocations and mutated exactly
/// once per tick. Never shared concurrently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG state for obstacle draws
    pub rng_state: RngState,
    /// Tick counter since this run started
    pub frame: u32,
    /// Current phase
    pub lifecycle: Lifecycle,
    /// Row of the player's anchor cell, always in `[0, HEIGHT - 1]`
    pub player_y: i32,
    /// Signed vertical velocity, clamped to `[-MAX_FALL_SPEED, MAX_FALL_SPEED]`
    pub fall_speed: i32,
    /// A consecutive flap gets a larger upward movement than the first
    pub flapped_on_prior_frame: bool,
    /// Obstacle pairs in ascending-x order; the nearest is always first
    pub obstacles: Vec<ObstaclePair>,
    /// Pipes passed this run
    pub score: u32,
    /// Best score across the persisted lifetime; never decreases
    pub high_score: u32,
    /// Which surface is the current staging target
    pub active_surface: SurfaceId,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng_state: RngState::new(seed),
            frame: 0,
            lifecycle: Lifecycle::Waiting,
            player_y: PLAYER_START_Y,
            fall_speed: 0,
            flapped_on_prior_frame: false,
            obstacles: super::obstacles::STARTING_OBSTACLES.to_vec(),
            score: 0,
            high_score: 0,
            active_surface: SurfaceId::A,
        }
    }

    /// Fresh run that keeps the best score from a prior snapshot
    pub fn with_high_score(seed: u64, high_score: u32) -> Self {
        Self {
            high_score,
            ..Self::new(seed)
        }
    }

    /// Fail fast on a corrupted snapshot. A state that violates these
    /// invariants came from outside the core and cannot be repaired.
    pub fn validate(&self) {
        assert!(
            (0..HEIGHT as i32).contains(&self.player_y),
            "player_y {} outside grid",
            self.player_y
        );
        if !self.lifecycle.is_over() {
            assert!(
                !self.obstacles.is_empty(),
                "empty obstacle stream in {:?}",
                self.lifecycle
            );
        }
        assert!(self.score <= self.high_score || self.frame == 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_invariants() {
        let state = GameState::new(7);
        state.validate();
        assert_eq!(state.lifecycle, Lifecycle::Waiting);
        assert_eq!(state.frame, 0);
        assert_eq!(state.obstacles.len(), OBSTACLE_COUNT);
        assert_eq!(state.player_y, PLAYER_START_Y);
    }

    #[test]
    fn test_with_high_score_carries_best() {
        let state = GameState::with_high_score(7, 12);
        assert_eq!(state.high_score, 12);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_gap_split() {
        // gap 5 splits as 2 below the midpoint, 3 above
        let pair = ObstaclePair {
            x: 20,
            midpoint: 8,
            gap: 5,
        };
        assert_eq!(pair.top_height(), 5);
        assert_eq!(pair.bottom_start(), 10);

        // even gap splits evenly
        let pair = ObstaclePair {
            x: 20,
            midpoint: 8,
            gap: 6,
        };
        assert_eq!(pair.top_height(), 5);
        assert_eq!(pair.bottom_start(), 11);
    }

    #[test]
    fn test_bottom_segment_stops_at_ground() {
        let pair = ObstaclePair {
            x: 20,
            midpoint: 12,
            gap: 8,
        };
        assert!(pair.bottom_start() <= GROUND_ROW);
        // the row just above the ground belongs to the ground check, not the pipe
        assert!(!pair.occupies(20, GROUND_ROW as usize, 0));
    }

    #[test]
    fn test_occupies_respects_scroll() {
        let pair = ObstaclePair {
            x: 10,
            midpoint: 8,
            gap: 6,
        };
        // at frame 0 the pair covers columns 10..13
        assert!(pair.occupies(10, 0, 0));
        assert!(pair.occupies(12, 0, 0));
        assert!(!pair.occupies(13, 0, 0));
        // four frames later it has scrolled four columns left
        assert!(pair.occupies(6, 0, 4));
        assert!(!pair.occupies(10, 0, 4));
        // gap rows are clear
        assert!(!pair.occupies(10, 6, 0));
    }

    #[test]
    fn test_rng_state_replays() {
        let mut a = RngState::new(42);
        let mut b = RngState::new(42);
        let _ = a.next_rng();
        let _ = b.next_rng();
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic]
    fn test_validate_rejects_out_of_range_player() {
        let mut state = GameState::new(1);
        state.player_y = HEIGHT as i32;
        state.validate();
    }

    #[test]
    #[should_panic]
    fn test_validate_rejects_empty_stream() {
        let mut state = GameState::new(1);
        state.obstacles.clear();
        state.validate();
    }
}
