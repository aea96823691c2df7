//! Egocentric partial observations.

use crate::grid::{Cell, Direction, Grid, Pos};

/// What the agent sees: a square window in front of it, encoded the way
/// MiniGrid encodes its image observations (`object, color, state` per cell).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// `view_size * view_size * 3` bytes, row-major, farthest row first.
    pub image: Vec<u8>,
    pub view_size: usize,
    pub direction: Direction,
}

impl Observation {
    #[must_use]
    pub fn capture(grid: &Grid, agent: Pos, dir: Direction, view_size: usize) -> Self {
        let image = view_cells(grid, agent, dir, view_size)
            .into_iter()
            .flat_map(Cell::encode)
            .collect();
        Self { image, view_size, direction: dir }
    }

    /// Encoded triple at view coordinate `(vx, vy)`; the agent sits at
    /// `(view_size / 2, view_size - 1)` facing up.
    #[must_use]
    pub fn cell(&self, vx: usize, vy: usize) -> Option<[u8; 3]> {
        if vx >= self.view_size || vy >= self.view_size {
            return None;
        }
        let i = (vy * self.view_size + vx) * 3;
        Some([self.image[i], self.image[i + 1], self.image[i + 2]])
    }
}

/// Cells of the agent's view window, rotated so the agent faces up.
///
/// Rows run from farthest (`0`) to the agent's own row (`view_size - 1`).
/// Positions outside the grid read as walls.
#[must_use]
pub fn view_cells(grid: &Grid, (ax, ay): Pos, dir: Direction, view_size: usize) -> Vec<Cell> {
    let (fx, fy) = dir.delta();
    let (rx, ry) = dir.right().delta();
    let half = (view_size / 2) as i64;
    let last = view_size as i64 - 1;
    let mut cells = Vec::with_capacity(view_size * view_size);
    for vy in 0..view_size as i64 {
        let ahead = last - vy;
        for vx in 0..view_size as i64 {
            let side = vx - half;
            let x = ax as i64 + fx * ahead + rx * side;
            let y = ay as i64 + fy * ahead + ry * side;
            cells.push(grid.get_or_wall(x, y));
        }
    }
    cells
}
