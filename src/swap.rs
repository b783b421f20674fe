//! Double-buffer swap protocol
//!
//! Two named surfaces; exactly one is live (assumed visible to the
//! external viewer) and one is staging. A frame is presented by writing
//! every row into the staging surface, then flipping the roles. The viewer
//! must never observe a partially written frame as live, so the flip
//! happens only after the write completes.

use crate::render::Frame;
use crate::sim::state::{GameState, SurfaceId};

/// One row of a surface. The label embeds the row's ordinal so the
/// external sink can reconstruct row order deterministically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceRow {
    pub text: String,
    pub ordinal: usize,
}

impl SurfaceRow {
    /// Sink-facing label: row text followed by its trailing ordinal
    pub fn label(&self) -> String {
        format!("{} {}", self.text, self.ordinal)
    }
}

/// An output surface and its write history
#[derive(Debug, Clone)]
pub struct Surface {
    pub id: SurfaceId,
    pub rows: Vec<SurfaceRow>,
    /// Monotone write counter; the sink uses it to refresh its sort order
    pub touches: u64,
}

impl Surface {
    fn new(id: SurfaceId) -> Self {
        Self {
            id,
            rows: Vec::new(),
            touches: 0,
        }
    }
}

/// The pair of surfaces and the presentation flip
#[derive(Debug, Clone)]
pub struct SwapChain {
    a: Surface,
    b: Surface,
}

impl Default for SwapChain {
    fn default() -> Self {
        Self::new()
    }
}

impl SwapChain {
    pub fn new() -> Self {
        Self {
            a: Surface::new(SurfaceId::A),
            b: Surface::new(SurfaceId::B),
        }
    }

    pub fn surface(&self, id: SurfaceId) -> &Surface {
        match id {
            SurfaceId::A => &self.a,
            SurfaceId::B => &self.b,
        }
    }

    fn surface_mut(&mut self, id: SurfaceId) -> &mut Surface {
        match id {
            SurfaceId::A => &mut self.a,
            SurfaceId::B => &mut self.b,
        }
    }

    /// The surface the viewer is assumed to be displaying
    pub fn live(&self, state: &GameState) -> &Surface {
        self.surface(state.active_surface.other())
    }

    /// The surface the next frame will be written into
    pub fn staging(&self, state: &GameState) -> &Surface {
        self.surface(state.active_surface)
    }

    /// Write the frame's rows, in row order, into the staging surface,
    /// then flip the roles. Returns the id of the surface that just became
    /// live.
    pub fn present(&mut self, state: &mut GameState, frame: &Frame) -> SurfaceId {
        let target = state.active_surface;
        let surface = self.surface_mut(target);
        surface.rows = frame
            .lines()
            .into_iter()
            .enumerate()
            .map(|(ordinal, text)| SurfaceRow { text, ordinal })
            .collect();
        surface.touches += 1;

        // complete write first, flip second
        state.active_surface = target.other();
        log::debug!("presented frame on surface {:?}", target);
        target
    }
}
