//! Grid compositor
//!
//! Layers the post-tick state into a `HEIGHT` x `WIDTH` grid of cell
//! glyphs, in a fixed order: background, obstacles, player, score readout.
//! A directive line is appended below the grid and the marquee banner is
//! prepended above it. Later layers overwrite earlier ones.

pub mod banner;

use crate::consts::*;
use crate::sim::collision::Cell;
use crate::sim::state::{GameState, Lifecycle};

pub const SKY: &str = "🟦";
pub const GROUND: &str = "🟨";
pub const PIPE: &str = "🟩";
pub const PIPE_CAP: &str = "🟫";
pub const EYES: &str = "👀";
pub const WING: &str = "⬜️";
pub const BODY: &str = "🟧";
pub const BELLY: &str = "🟨";
pub const STRUCK: &str = "💥";
pub const DEAD_TINT: &str = "⬛";
pub const SCORE_ICON: &str = "⭐";
pub const HIGH_SCORE_ICON: &str = "🏆";

pub const DIGITS: [&str; 10] = ["0️⃣", "1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣", "6️⃣", "7️⃣", "8️⃣", "9️⃣"];

/// One composed frame: banner line, grid rows, directive line.
///
/// Returned fresh from every `compose` call; the compositor keeps no
/// buffer between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Marquee tokens, one per logical character
    pub banner: Vec<String>,
    /// `HEIGHT` rows of `WIDTH` cell glyphs
    pub rows: Vec<Vec<&'static str>>,
    /// Instruction text shown below the grid
    pub directive: &'static str,
}

impl Frame {
    /// Total display rows a frame occupies in the sink
    pub const DISPLAY_ROWS: usize = HEIGHT + 2;

    /// Flatten into display order: banner, grid rows, directive
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(Self::DISPLAY_ROWS);
        lines.push(self.banner.concat());
        for row in &self.rows {
            lines.push(row.concat());
        }
        lines.push(self.directive.to_string());
        lines
    }
}

/// Compose the current state into a frame. `hits` is the collision set
/// from this tick; those footprint cells render as struck.
pub fn compose(state: &GameState, hits: &[Cell]) -> Frame {
    let mut rows = vec![vec![SKY; WIDTH]; HEIGHT];

    // background: ground under the ground line
    for row in rows.iter_mut().skip(GROUND_ROW as usize) {
        row.fill(GROUND);
    }

    add_obstacles(&mut rows, state);
    add_player(&mut rows, state, hits);
    add_readout(&mut rows, 0, SCORE_ICON, state.score);
    add_readout(&mut rows, 1, HIGH_SCORE_ICON, state.high_score);

    Frame {
        banner: banner::marquee(state.frame),
        rows,
        directive: directive(state),
    }
}

/// Obstacle layer. The cell of each column nearest the gap gets the cap
/// glyph.
fn add_obstacles(rows: &mut [Vec<&'static str>], state: &GameState) {
    for pair in &state.obstacles {
        let x = pair.screen_x(state.frame);
        let top = pair.top_height();
        let bottom = pair.bottom_start();
        for col in x.max(0)..(x + PIPE_WIDTH).min(WIDTH as i32) {
            for row in 0..top {
                rows[row as usize][col as usize] = if row == top - 1 { PIPE_CAP } else { PIPE };
            }
            for row in bottom..GROUND_ROW {
                rows[row as usize][col as usize] = if row == bottom { PIPE_CAP } else { PIPE };
            }
        }
    }
}

/// Player layer: the 2x2 footprint, with struck cells marked and non-eye
/// cells tinted once the run is over.
fn add_player(rows: &mut [Vec<&'static str>], state: &GameState, hits: &[Cell]) {
    let y = state.player_y as usize;
    let mut cells = vec![(PLAYER_X, y, EYES), (PLAYER_X - 1, y, WING)];
    if y + 1 < HEIGHT {
        cells.push((PLAYER_X, y + 1, BODY));
        cells.push((PLAYER_X - 1, y + 1, BELLY));
    }

    for (col, row, glyph) in cells {
        let glyph = if hits.contains(&(col, row)) {
            STRUCK
        } else if state.lifecycle.is_over() && glyph != EYES {
            DEAD_TINT
        } else {
            glyph
        };
        rows[row][col] = glyph;
    }
}

/// Score readout: right-aligned digit glyphs prefixed by a row icon
fn add_readout(rows: &mut [Vec<&'static str>], row: usize, icon: &'static str, value: u32) {
    let digits: Vec<usize> = value
        .to_string()
        .bytes()
        .map(|b| (b - b'0') as usize)
        .collect();
    let start = WIDTH - digits.len();
    rows[row][start - 1] = icon;
    for (i, d) in digits.into_iter().enumerate() {
        rows[row][start + i] = DIGITS[d];
    }
}

/// Instruction text for the current phase
fn directive(state: &GameState) -> &'static str {
    match state.lifecycle {
        Lifecycle::Waiting if state.frame == 0 => "double click to start",
        Lifecycle::Waiting | Lifecycle::Ticking => "click to flap",
        Lifecycle::Dying => "game over",
        Lifecycle::Dead => "double click to restart",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObstaclePair;

    #[test]
    fn test_background_layers() {
        let state = GameState::new(0);
        let frame = compose(&state, &[]);
        assert_eq!(frame.rows.len(), HEIGHT);
        assert!(frame.rows.iter().all(|r| r.len() == WIDTH));
        // a cell no other layer touches
        assert_eq!(frame.rows[8][8], SKY);
        assert_eq!(frame.rows[GROUND_ROW as usize][0], GROUND);
        assert_eq!(frame.rows[HEIGHT - 1][WIDTH - 1], GROUND);
    }

    #[test]
    fn test_pipe_caps_face_the_gap() {
        let mut state = GameState::new(0);
        state.obstacles = vec![ObstaclePair {
            x: 8,
            midpoint: 8,
            gap: 6,
        }];
        let frame = compose(&state, &[]);

        // top segment rows 0..5, cap at 4; bottom rows 11..13, cap at 11
        assert_eq!(frame.rows[0][8], PIPE);
        assert_eq!(frame.rows[4][8], PIPE_CAP);
        assert_eq!(frame.rows[5][8], SKY);
        assert_eq!(frame.rows[10][8], SKY);
        assert_eq!(frame.rows[11][8], PIPE_CAP);
        assert_eq!(frame.rows[12][8], PIPE);
    }

    #[test]
    fn test_player_footprint_glyphs() {
        let state = GameState::new(0);
        let frame = compose(&state, &[]);
        let y = PLAYER_START_Y as usize;
        assert_eq!(frame.rows[y][PLAYER_X], EYES);
        assert_eq!(frame.rows[y][PLAYER_X - 1], WING);
        assert_eq!(frame.rows[y + 1][PLAYER_X], BODY);
        assert_eq!(frame.rows[y + 1][PLAYER_X - 1], BELLY);
    }

    #[test]
    fn test_struck_cells_marked() {
        let state = GameState::new(0);
        let y = PLAYER_START_Y as usize;
        let frame = compose(&state, &[(PLAYER_X, y)]);
        assert_eq!(frame.rows[y][PLAYER_X], STRUCK);
        assert_eq!(frame.rows[y][PLAYER_X - 1], WING);
    }

    #[test]
    fn test_dead_tint_spares_the_eyes() {
        let mut state = GameState::new(0);
        state.lifecycle = Lifecycle::Dead;
        let y = state.player_y as usize;
        let frame = compose(&state, &[]);
        assert_eq!(frame.rows[y][PLAYER_X], EYES);
        assert_eq!(frame.rows[y][PLAYER_X - 1], DEAD_TINT);
        assert_eq!(frame.rows[y + 1][PLAYER_X], DEAD_TINT);
    }

    #[test]
    fn test_readout_right_aligned() {
        let mut state = GameState::new(0);
        state.score = 7;
        state.high_score = 12;
        let frame = compose(&state, &[]);

        assert_eq!(frame.rows[0][WIDTH - 1], DIGITS[7]);
        assert_eq!(frame.rows[0][WIDTH - 2], SCORE_ICON);
        assert_eq!(frame.rows[1][WIDTH - 1], DIGITS[2]);
        assert_eq!(frame.rows[1][WIDTH - 2], DIGITS[1]);
        assert_eq!(frame.rows[1][WIDTH - 3], HIGH_SCORE_ICON);
    }

    #[test]
    fn test_directive_follows_lifecycle() {
        let mut state = GameState::new(0);
        assert_eq!(directive(&state), "double click to start");
        state.frame = 3;
        assert_eq!(directive(&state), "click to flap");
        state.lifecycle = Lifecycle::Ticking;
        assert_eq!(directive(&state), "click to flap");
        state.lifecycle = Lifecycle::Dying;
        assert_eq!(directive(&state), "game over");
        state.lifecycle = Lifecycle::Dead;
        assert_eq!(directive(&state), "double click to restart");
    }

    #[test]
    fn test_lines_in_display_order() {
        let state = GameState::new(0);
        let frame = compose(&state, &[]);
        let lines = frame.lines();
        assert_eq!(lines.len(), Frame::DISPLAY_ROWS);
        assert_eq!(lines[0], frame.banner.concat());
        assert_eq!(lines[Frame::DISPLAY_ROWS - 1], frame.directive);
    }
}
