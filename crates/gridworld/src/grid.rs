//! Cell grid and agent orientation.

/// `(x, y)` grid coordinate, `x` growing east and `y` growing south.
pub type Pos = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorState {
    Open,
    Closed,
    Locked,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Goal,
    Lava,
    Key,
    Ball,
    Door(DoorState),
}

// MiniGrid object/color/state indices used by the observation encoding.
const OBJ_EMPTY: u8 = 1;
const OBJ_WALL: u8 = 2;
const OBJ_DOOR: u8 = 4;
const OBJ_KEY: u8 = 5;
const OBJ_BALL: u8 = 6;
const OBJ_GOAL: u8 = 8;
const OBJ_LAVA: u8 = 9;

const COLOR_RED: u8 = 0;
const COLOR_GREEN: u8 = 1;
const COLOR_BLUE: u8 = 2;
const COLOR_YELLOW: u8 = 4;
const COLOR_GREY: u8 = 5;

impl Cell {
    /// Whether the agent may stand on this cell.
    #[must_use]
    pub const fn can_overlap(self) -> bool {
        matches!(
            self,
            Cell::Empty | Cell::Goal | Cell::Lava | Cell::Door(DoorState::Open)
        )
    }

    #[must_use]
    pub const fn can_pickup(self) -> bool {
        matches!(self, Cell::Key | Cell::Ball)
    }

    /// `(object, color, state)` triple in MiniGrid's encoding.
    #[must_use]
    pub const fn encode(self) -> [u8; 3] {
        match self {
            Cell::Empty => [OBJ_EMPTY, 0, 0],
            Cell::Wall => [OBJ_WALL, COLOR_GREY, 0],
            Cell::Goal => [OBJ_GOAL, COLOR_GREEN, 0],
            Cell::Lava => [OBJ_LAVA, COLOR_RED, 0],
            Cell::Key => [OBJ_KEY, COLOR_YELLOW, 0],
            Cell::Ball => [OBJ_BALL, COLOR_BLUE, 0],
            Cell::Door(state) => {
                let s = match state {
                    DoorState::Open => 0,
                    DoorState::Closed => 1,
                    DoorState::Locked => 2,
                };
                [OBJ_DOOR, COLOR_YELLOW, s]
            }
        }
    }

    /// Single-character glyph used by text frames.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Wall => '#',
            Cell::Goal => 'G',
            Cell::Lava => '~',
            Cell::Key => 'k',
            Cell::Ball => 'o',
            Cell::Door(DoorState::Open) => '/',
            Cell::Door(DoorState::Closed) => '+',
            Cell::Door(DoorState::Locked) => 'D',
        }
    }

    /// RGB fill used by pixel frames.
    #[must_use]
    pub const fn rgb(self) -> [u8; 3] {
        match self {
            Cell::Empty => [0, 0, 0],
            Cell::Wall => [100, 100, 100],
            Cell::Goal => [0, 255, 0],
            Cell::Lava => [255, 128, 0],
            Cell::Key | Cell::Door(_) => [255, 255, 0],
            Cell::Ball => [0, 0, 255],
        }
    }
}

/// Agent heading. Turning right moves clockwise through east, south, west and north.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    East,
    South,
    West,
    North,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::North,
    ];

    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    #[must_use]
    pub fn left(self) -> Self {
        Self::from_index(self.index() as usize + 3)
    }

    #[must_use]
    pub fn right(self) -> Self {
        Self::from_index(self.index() as usize + 1)
    }

    /// Unit step `(dx, dy)` in grid coordinates.
    #[must_use]
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::North => (0, -1),
        }
    }

    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Direction::East => '>',
            Direction::South => 'v',
            Direction::West => '<',
            Direction::North => '^',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    /// Empty grid surrounded by a wall border.
    #[must_use]
    pub fn walled(width: usize, height: usize) -> Self {
        let mut grid = Self::new(width, height);
        grid.horz_wall(0, 0, width);
        grid.horz_wall(0, height.saturating_sub(1), width);
        grid.vert_wall(0, 0, height);
        grid.vert_wall(width.saturating_sub(1), 0, height);
        grid
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn get(&self, (x, y): Pos) -> Option<Cell> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Signed lookup; anything outside the grid reads as a wall.
    #[must_use]
    pub fn get_or_wall(&self, x: i64, y: i64) -> Cell {
        match (usize::try_from(x), usize::try_from(y)) {
            (Ok(x), Ok(y)) => self.get((x, y)).unwrap_or(Cell::Wall),
            _ => Cell::Wall,
        }
    }

    /// Writes `cell` at `pos`. Out-of-range writes are ignored.
    pub fn set(&mut self, (x, y): Pos, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    pub fn horz_wall(&mut self, x: usize, y: usize, len: usize) {
        for i in x..(x + len).min(self.width) {
            self.set((i, y), Cell::Wall);
        }
    }

    pub fn vert_wall(&mut self, x: usize, y: usize, len: usize) {
        for j in y..(y + len).min(self.height) {
            self.set((x, j), Cell::Wall);
        }
    }

    /// The neighbour of `pos` in direction `dir`, if it lies inside the grid.
    #[must_use]
    pub fn offset(&self, (x, y): Pos, dir: Direction) -> Option<Pos> {
        let (dx, dy) = dir.delta();
        let nx = usize::try_from(x as i64 + dx).ok()?;
        let ny = usize::try_from(y as i64 + dy).ok()?;
        (nx < self.width && ny < self.height).then_some((nx, ny))
    }

    /// All positions holding `Cell::Empty`, in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Empty)
            .map(|(i, _)| (i % self.width, i / self.width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walled_grid_has_solid_border() {
        let g = Grid::walled(5, 4);
        for x in 0..5 {
            assert_eq!(g.get((x, 0)), Some(Cell::Wall));
            assert_eq!(g.get((x, 3)), Some(Cell::Wall));
        }
        for y in 0..4 {
            assert_eq!(g.get((0, y)), Some(Cell::Wall));
            assert_eq!(g.get((4, y)), Some(Cell::Wall));
        }
        assert_eq!(g.get((2, 2)), Some(Cell::Empty));
        assert_eq!(g.empty_cells().count(), 3 * 2);
    }

    #[test]
    fn turning_cycles_through_headings() {
        let mut d = Direction::East;
        for expected in [Direction::South, Direction::West, Direction::North, Direction::East] {
            d = d.right();
            assert_eq!(d, expected);
        }
        assert_eq!(Direction::East.left(), Direction::North);
    }

    #[test]
    fn offset_rejects_positions_outside_grid() {
        let g = Grid::new(3, 3);
        assert_eq!(g.offset((0, 0), Direction::West), None);
        assert_eq!(g.offset((0, 0), Direction::South), Some((0, 1)));
        assert_eq!(g.get_or_wall(-1, 2), Cell::Wall);
    }
}
