//! Text and pixel frames of the grid.

use crate::grid::{Cell, Direction, Grid, Pos};
use crate::observation::view_cells;
use crate::EnvError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Write a text frame to stdout on every `render` call.
    Human,
    /// Keep the latest text frame in memory.
    Ansi,
    /// Keep the latest RGB frame in memory.
    RgbArray,
    /// Rendering is a no-op.
    #[default]
    None,
}

/// Largest accepted agent view window.
pub const MAX_AGENT_VIEW_SIZE: usize = 31;
/// Largest accepted tile edge in pixels.
pub const MAX_TILE_SIZE: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Pixels per grid cell in RGB frames.
    pub tile_size: usize,
    /// Render only the agent's view window instead of the whole grid.
    pub agent_pov: bool,
    /// Side length of the agent's view window.
    pub agent_view_size: usize,
    /// Target window size for interactive front-ends.
    pub screen_size: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { tile_size: 32, agent_pov: false, agent_view_size: 7, screen_size: 640 }
    }
}

impl RenderOptions {
    /// # Errors
    ///
    /// Returns [`EnvError::InvalidConfig`] for an agent view that is even or
    /// outside `3..=MAX_AGENT_VIEW_SIZE`, and for a tile size outside
    /// `1..=MAX_TILE_SIZE`.
    pub fn validate(&self) -> Result<(), EnvError> {
        let view = self.agent_view_size;
        if !(3..=MAX_AGENT_VIEW_SIZE).contains(&view) || view % 2 == 0 {
            return Err(EnvError::InvalidConfig(format!(
                "agent view size must be odd and within 3..={MAX_AGENT_VIEW_SIZE}, got {view}"
            )));
        }
        if !(1..=MAX_TILE_SIZE).contains(&self.tile_size) {
            return Err(EnvError::InvalidConfig(format!(
                "tile size must be within 1..={MAX_TILE_SIZE}, got {}",
                self.tile_size
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Text(String),
    Pixels { width: usize, height: usize, data: Vec<u8> },
}

/// Row-major cells to draw and where the agent sits among them.
struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    agent: Pos,
    heading: Direction,
}

impl Canvas {
    fn new(grid: &Grid, agent: Pos, dir: Direction, opts: &RenderOptions) -> Self {
        if opts.agent_pov {
            let n = opts.agent_view_size;
            Self {
                width: n,
                height: n,
                cells: view_cells(grid, agent, dir, n),
                agent: (n / 2, n - 1),
                heading: Direction::North,
            }
        } else {
            let mut cells = Vec::with_capacity(grid.width() * grid.height());
            for y in 0..grid.height() {
                for x in 0..grid.width() {
                    cells.push(grid.get((x, y)).unwrap_or(Cell::Wall));
                }
            }
            Self { width: grid.width(), height: grid.height(), cells, agent, heading: dir }
        }
    }
}

/// One line per grid row; the agent is drawn as an arrow of its heading.
#[must_use]
pub fn text_frame(grid: &Grid, agent: Pos, dir: Direction, opts: &RenderOptions) -> String {
    let canvas = Canvas::new(grid, agent, dir, opts);
    let mut out = String::with_capacity((canvas.width + 1) * canvas.height);
    for y in 0..canvas.height {
        for x in 0..canvas.width {
            if (x, y) == canvas.agent {
                out.push(canvas.heading.glyph());
            } else {
                out.push(canvas.cells[y * canvas.width + x].glyph());
            }
        }
        out.push('\n');
    }
    out
}

const AGENT_RGB: [u8; 3] = [255, 0, 0];
const GRID_LINE_RGB: [u8; 3] = [40, 40, 40];

/// RGB frame, `tile_size` pixels per cell, 3 bytes per pixel.
#[must_use]
pub fn pixel_frame(grid: &Grid, agent: Pos, dir: Direction, opts: &RenderOptions) -> Frame {
    let canvas = Canvas::new(grid, agent, dir, opts);
    let tile = opts.tile_size.max(1);
    let width = canvas.width * tile;
    let height = canvas.height * tile;
    let mut data = vec![0u8; width * height * 3];

    for cy in 0..canvas.height {
        for cx in 0..canvas.width {
            let cell = canvas.cells[cy * canvas.width + cx];
            let is_agent = (cx, cy) == canvas.agent;
            for py in 0..tile {
                for px in 0..tile {
                    let rgb = if px == 0 || py == 0 {
                        GRID_LINE_RGB
                    } else if is_agent && in_arrow(px, py, tile, canvas.heading) {
                        AGENT_RGB
                    } else {
                        cell.rgb()
                    };
                    let i = ((cy * tile + py) * width + cx * tile + px) * 3;
                    data[i..i + 3].copy_from_slice(&rgb);
                }
            }
        }
    }
    Frame::Pixels { width, height, data }
}

/// Whether pixel `(px, py)` of a tile lies inside the triangle pointing along `heading`.
fn in_arrow(px: usize, py: usize, tile: usize, heading: Direction) -> bool {
    let t = tile as f32;
    let (x, y) = (px as f32 / t, py as f32 / t);
    // Depth along the heading and lateral offset from the tile centre line.
    let (depth, lateral) = match heading {
        Direction::East => (x, y - 0.5),
        Direction::West => (1.0 - x, y - 0.5),
        Direction::South => (y, x - 0.5),
        Direction::North => (1.0 - y, x - 0.5),
    };
    (0.12..=0.88).contains(&depth) && lateral.abs() <= 0.38 * (0.88 - depth) / 0.76
}
