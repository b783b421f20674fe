//! Directory display sink
//!
//! The viewer is a file browser pointed at one of two buffer directories.
//! Each display row is a file whose name is the row's cell glyphs followed
//! by a trailing ordinal (the browser's sort key). Presenting a frame
//! renames every row file of the staging directory; unchanged rows get
//! their mtime bumped so the browser refreshes its sort.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use thiserror::Error;

use crate::render::Frame;
use crate::sim::SurfaceId;
use crate::swap::Surface;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("sink I/O error")]
    Io(#[from] std::io::Error),
    #[error("row file {0:?} has no trailing ordinal")]
    Label(String),
    #[error("buffer holds {found} row files, expected {expected}")]
    RowCount { found: usize, expected: usize },
}

/// Maps surfaces to buffer directories under a root
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory name the viewer flips to for this surface
    pub fn buffer_name(id: SurfaceId) -> &'static str {
        match id {
            SurfaceId::A => "buf1",
            SurfaceId::B => "buf2",
        }
    }

    pub fn buffer_dir(&self, id: SurfaceId) -> PathBuf {
        self.root.join(Self::buffer_name(id))
    }

    /// Create both buffer directories, clear stale row files, and seed one
    /// placeholder row file per display row.
    pub fn initialize(&self) -> Result<(), SinkError> {
        for id in [SurfaceId::A, SurfaceId::B] {
            let dir = self.buffer_dir(id);
            fs::create_dir_all(&dir)?;
            for entry in visible_entries(&dir)? {
                fs::remove_file(entry)?;
            }
            for ordinal in 0..Frame::DISPLAY_ROWS {
                fs::write(dir.join(ordinal.to_string()), b"")?;
            }
            log::info!("initialized {}", dir.display());
        }
        Ok(())
    }

    /// Relabel the surface's directory to show its rows, in row order
    pub fn write_surface(&self, surface: &Surface) -> Result<(), SinkError> {
        let dir = self.buffer_dir(surface.id);
        let mut files = visible_entries(&dir)?;
        if files.len() != surface.rows.len() {
            return Err(SinkError::RowCount {
                found: files.len(),
                expected: surface.rows.len(),
            });
        }
        sort_by_ordinal(&mut files)?;

        for (file, row) in files.iter().zip(&surface.rows) {
            let target = dir.join(row.label());
            if *file != target {
                fs::rename(file, &target)?;
            } else {
                // same label as last frame; bump the mtime so the
                // viewer's sort order still refreshes
                let handle = fs::OpenOptions::new().write(true).open(&target)?;
                handle.set_modified(SystemTime::now())?;
            }
        }
        Ok(())
    }
}

/// Non-hidden files in the directory
fn visible_entries(dir: &Path) -> Result<Vec<PathBuf>, SinkError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if !name.starts_with('.') {
            files.push(path);
        }
    }
    Ok(files)
}

/// Sort row files by the trailing ordinal embedded in their name
fn sort_by_ordinal(files: &mut [PathBuf]) -> Result<(), SinkError> {
    let mut keyed = files
        .iter()
        .map(|path| trailing_ordinal(path).map(|n| (n, path.clone())))
        .collect::<Result<Vec<_>, _>>()?;
    keyed.sort_by_key(|(n, _)| *n);
    for (slot, (_, path)) in files.iter_mut().zip(keyed) {
        *slot = path;
    }
    Ok(())
}

fn trailing_ordinal(path: &Path) -> Result<usize, SinkError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    name.rsplit(' ')
        .next()
        .and_then(|tail| tail.parse().ok())
        .ok_or_else(|| SinkError::Label(name.to_string()))
}
