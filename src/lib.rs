//! Foldy Bird - a flappy-bird style simulation advanced one tick at a time
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game state)
//! - `render`: Grid compositor that layers state into a frame of cell glyphs
//! - `swap`: Double-buffer surface protocol (live/staging flip)
//! - `persistence`: Snapshot save/load between driver invocations
//! - `sink`: Directory-relabeling display backend

pub mod persistence;
pub mod render;
pub mod sim;
pub mod sink;
pub mod swap;

pub use persistence::{Snapshot, load_snapshot, save_snapshot};
pub use render::Frame;
pub use sim::{GameState, Lifecycle, ObstaclePair, SurfaceId, TickInput, tick};
pub use swap::SwapChain;

/// Game configuration constants
pub mod consts {
    /// Visible grid width in cells
    pub const WIDTH: usize = 15;
    /// Visible grid height in cells
    pub const HEIGHT: usize = 15;
    /// Rows of ground at the bottom of the grid
    pub const GROUND_HEIGHT: usize = 2;
    /// First grid row occupied by ground
    pub const GROUND_ROW: i32 = (HEIGHT - GROUND_HEIGHT) as i32;

    /// Horizontal extent of an obstacle in cells
    pub const PIPE_WIDTH: i32 = 3;
    /// Fixed column of the player's anchor cell
    pub const PLAYER_X: usize = 3;
    /// Player's starting row
    pub const PLAYER_START_Y: i32 = 5;

    /// Obstacles kept alive at all times
    pub const OBSTACLE_COUNT: usize = 2;
    /// Inclusive range the gap midpoint is drawn from
    pub const MIDPOINT_MIN: i32 = 5;
    pub const MIDPOINT_MAX: i32 = 12;
    /// Inclusive range the gap size is drawn from
    pub const GAP_MIN: i32 = 5;
    pub const GAP_MAX: i32 = 8;

    /// Downward acceleration per non-flap tick
    pub const GRAVITY: i32 = 1;
    /// Vertical velocity set by a flap
    pub const FLAP_SPEED: i32 = -2;
    /// Terminal velocity (rows per tick, either direction)
    pub const MAX_FALL_SPEED: i32 = 2;

    /// Frame counter cap; the pacing collaborator ends the run here
    pub const FRAME_CAP: u32 = 40;
    /// Tick rate held by the pacing step
    pub const TARGET_FPS: u32 = 4;

    /// Banner characters revealed per frame
    pub const BANNER_REVEAL_RATE: u32 = 1;
}
