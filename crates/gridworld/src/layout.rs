//! Procedural layouts for the supported grid-world families.

use crate::grid::{Cell, Direction, DoorState, Grid, Pos};
use crate::EnvError;

/// Smallest side length every layout can be generated at.
pub const MIN_SIZE: usize = 5;
/// Largest side length accepted for a grid.
pub const MAX_SIZE: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Open room with the goal in the far corner.
    Empty,
    /// Open room with balls that wander every step; bumping into one ends the episode.
    DynamicObstacles { obstacles: usize },
    /// Two rooms split by a wall; the door is locked and the key lies in the start room.
    DoorKey,
    /// Vertical strip of lava with a single gap to pass through.
    LavaGap,
}

/// Freshly generated episode start.
#[derive(Debug, Clone)]
pub struct Generated {
    pub grid: Grid,
    pub agent_pos: Pos,
    pub agent_dir: Direction,
    pub obstacles: Vec<Pos>,
}

impl Layout {
    /// Number of actions exposed by environments of this family.
    #[must_use]
    pub const fn action_count(self) -> usize {
        match self {
            // turn left, turn right, forward
            Layout::DynamicObstacles { .. } => 3,
            _ => 7,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Layout::Empty => "Empty",
            Layout::DynamicObstacles { .. } => "Dynamic-Obstacles",
            Layout::DoorKey => "DoorKey",
            Layout::LavaGap => "LavaGap",
        }
    }

    /// Build the grid for a new episode of side length `size`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::InvalidConfig`] when `size` lies outside
    /// `MIN_SIZE..=MAX_SIZE` or the room has no space left for a random placement.
    pub fn generate(self, size: usize, rng: &mut fastrand::Rng) -> Result<Generated, EnvError> {
        check_size(size)?;
        let mut grid = Grid::walled(size, size);
        let goal = (size - 2, size - 2);
        let start = (1, 1);

        match self {
            Layout::Empty => {
                grid.set(goal, Cell::Goal);
                Ok(Generated { grid, agent_pos: start, agent_dir: Direction::East, obstacles: Vec::new() })
            }
            Layout::DynamicObstacles { obstacles } => {
                grid.set(goal, Cell::Goal);
                let mut placed = Vec::with_capacity(obstacles);
                for _ in 0..obstacles {
                    let pos = random_empty(&grid, rng, 1..size - 1, 1..size - 1, &[start])?;
                    grid.set(pos, Cell::Ball);
                    placed.push(pos);
                }
                Ok(Generated { grid, agent_pos: start, agent_dir: Direction::East, obstacles: placed })
            }
            Layout::DoorKey => {
                grid.set(goal, Cell::Goal);
                let split = rng.usize(2..size - 2);
                grid.vert_wall(split, 0, size);
                let agent_pos = random_empty(&grid, rng, 1..split, 1..size - 1, &[])?;
                let agent_dir = Direction::from_index(rng.usize(..4));
                let door_y = rng.usize(1..size - 2);
                grid.set((split, door_y), Cell::Door(DoorState::Locked));
                let key = random_empty(&grid, rng, 1..split, 1..size - 1, &[agent_pos])?;
                grid.set(key, Cell::Key);
                Ok(Generated { grid, agent_pos, agent_dir, obstacles: Vec::new() })
            }
            Layout::LavaGap => {
                grid.set(goal, Cell::Goal);
                let gap = (rng.usize(2..size - 2), rng.usize(1..size - 1));
                for y in 1..size - 1 {
                    grid.set((gap.0, y), Cell::Lava);
                }
                grid.set(gap, Cell::Empty);
                Ok(Generated { grid, agent_pos: start, agent_dir: Direction::East, obstacles: Vec::new() })
            }
        }
    }
}

/// Rejects side lengths outside `MIN_SIZE..=MAX_SIZE`.
///
/// # Errors
///
/// Returns [`EnvError::InvalidConfig`] naming the accepted range.
pub fn check_size(size: usize) -> Result<(), EnvError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(EnvError::InvalidConfig(format!(
            "grid size {size} is outside {MIN_SIZE}..={MAX_SIZE}"
        )))
    }
}

/// Picks a uniformly random empty cell inside the given ranges, skipping `exclude`.
pub(crate) fn random_empty(
    grid: &Grid,
    rng: &mut fastrand::Rng,
    xs: std::ops::Range<usize>,
    ys: std::ops::Range<usize>,
    exclude: &[Pos],
) -> Result<Pos, EnvError> {
    let candidates: Vec<Pos> = grid
        .empty_cells()
        .filter(|(x, y)| xs.contains(x) && ys.contains(y))
        .filter(|p| !exclude.contains(p))
        .collect();
    if candidates.is_empty() {
        return Err(EnvError::InvalidConfig("no free cell left for placement".into()));
    }
    Ok(candidates[rng.usize(..candidates.len())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn door_key_has_exactly_one_locked_door_and_key() {
        let mut rng = fastrand::Rng::with_seed(11);
        let g = Layout::DoorKey.generate(8, &mut rng).unwrap();
        let mut doors = 0;
        let mut keys = 0;
        for y in 0..8 {
            for x in 0..8 {
                match g.grid.get((x, y)).unwrap() {
                    Cell::Door(DoorState::Locked) => doors += 1,
                    Cell::Key => keys += 1,
                    _ => {}
                }
            }
        }
        assert_eq!((doors, keys), (1, 1));
        assert_eq!(g.grid.get(g.agent_pos), Some(Cell::Empty));
    }

    #[test]
    fn lava_gap_leaves_a_single_passage() {
        let mut rng = fastrand::Rng::with_seed(5);
        let g = Layout::LavaGap.generate(7, &mut rng).unwrap();
        let lava_column = (1..6)
            .find(|&x| (1..6).any(|y| g.grid.get((x, y)) == Some(Cell::Lava)))
            .unwrap();
        let gaps = (1..6)
            .filter(|&y| g.grid.get((lava_column, y)) == Some(Cell::Empty))
            .count();
        assert_eq!(gaps, 1);
    }

    #[test]
    fn rejects_grids_outside_size_range() {
        let mut rng = fastrand::Rng::with_seed(0);
        for size in [0, 4, MAX_SIZE + 1, usize::MAX] {
            assert!(
                matches!(Layout::Empty.generate(size, &mut rng), Err(EnvError::InvalidConfig(_))),
                "size {size} accepted"
            );
        }
        assert!(Layout::DoorKey.generate(MAX_SIZE, &mut rng).is_ok());
    }
}
