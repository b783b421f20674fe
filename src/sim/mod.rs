//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete tick per call, driven externally
//! - Seeded RNG only
//! - Obstacles kept in ascending-x order (the nearest obstacle is always first)
//! - No rendering or platform dependencies beyond composing the output frame

pub mod collision;
pub mod obstacles;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{Cell, detect_collisions, player_footprint};
pub use obstacles::{STARTING_OBSTACLES, spawn_obstacle};
pub use state::{GameState, Lifecycle, ObstaclePair, RngState, SurfaceId};
pub use tick::{TickInput, tick};
