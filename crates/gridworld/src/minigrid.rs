//! MiniGrid-style environment.

use std::io::Write;

use crate::grid::{Cell, Direction, DoorState, Grid, Pos};
use crate::layout::Layout;
use crate::observation::Observation;
use crate::render::{pixel_frame, text_frame, Frame, RenderMode, RenderOptions};
use crate::{Action, Env, EnvError, Step, StepInfo};

/// Single-agent grid world with MiniGrid's movement and reward rules.
pub struct GridEnv {
    id: String,
    layout: Layout,
    size: usize,
    max_steps: u32,
    render_mode: RenderMode,
    options: RenderOptions,
    slot: Option<u32>,
    rng: fastrand::Rng,
    grid: Grid,
    agent_pos: Pos,
    agent_dir: Direction,
    carrying: Option<Cell>,
    obstacles: Vec<Pos>,
    step_count: u32,
    last_frame: Option<Frame>,
    closed: bool,
}

impl GridEnv {
    /// Creates an environment; the first episode is generated by [`Env::reset`].
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        layout: Layout,
        size: usize,
        render_mode: RenderMode,
        options: RenderOptions,
    ) -> Self {
        let size_u32 = u32::try_from(size).unwrap_or(u32::MAX);
        Self {
            id: id.into(),
            layout,
            size,
            max_steps: 4u32.saturating_mul(size_u32).saturating_mul(size_u32),
            render_mode,
            options,
            slot: None,
            rng: fastrand::Rng::new(),
            grid: Grid::new(0, 0),
            agent_pos: (1, 1),
            agent_dir: Direction::East,
            carrying: None,
            obstacles: Vec::new(),
            step_count: 0,
            last_frame: None,
            closed: false,
        }
    }

    /// Tags the environment with the manual-control slot it was built for.
    #[must_use]
    pub fn with_slot(mut self, slot: u32) -> Self {
        self.slot = Some(slot);
        self
    }

    #[must_use]
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn slot(&self) -> Option<u32> {
        self.slot
    }

    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn agent_pos(&self) -> Pos {
        self.agent_pos
    }

    #[must_use]
    pub fn agent_dir(&self) -> Direction {
        self.agent_dir
    }

    #[must_use]
    pub fn carrying(&self) -> Option<Cell> {
        self.carrying
    }

    #[must_use]
    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Frame produced by the latest `render` in `Ansi` or `RgbArray` mode.
    #[must_use]
    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    /// Places the agent explicitly. Intended for scripted scenarios.
    pub fn place_agent(&mut self, pos: Pos, dir: Direction) {
        self.agent_pos = pos;
        self.agent_dir = dir;
    }

    pub fn set_cell(&mut self, pos: Pos, cell: Cell) {
        self.grid.set(pos, cell);
    }

    fn front_pos(&self) -> Option<Pos> {
        self.grid.offset(self.agent_pos, self.agent_dir)
    }

    fn observe(&self) -> Observation {
        Observation::capture(&self.grid, self.agent_pos, self.agent_dir, self.options.agent_view_size)
    }

    fn reward(&self) -> f32 {
        1.0 - 0.9 * (self.step_count as f32 / self.max_steps.max(1) as f32)
    }

    /// Moves every obstacle to a random free cell of the 3x3 box around it,
    /// diagonals included. An obstacle with no free neighbour stays put.
    fn move_obstacles(&mut self) {
        for i in 0..self.obstacles.len() {
            let (fx, fy) = self.obstacles[i];
            let free: Vec<Pos> = (-1isize..=1)
                .flat_map(|dy| (-1isize..=1).map(move |dx| (dx, dy)))
                .filter(|&d| d != (0, 0))
                .filter_map(|(dx, dy)| Some((fx.checked_add_signed(dx)?, fy.checked_add_signed(dy)?)))
                .filter(|&p| p != self.agent_pos && self.grid.get(p) == Some(Cell::Empty))
                .collect();
            if free.is_empty() {
                continue;
            }
            let to = free[self.rng.usize(..free.len())];
            self.grid.set((fx, fy), Cell::Empty);
            self.grid.set(to, Cell::Ball);
            self.obstacles[i] = to;
        }
    }

    fn ensure_open(&self) -> Result<(), EnvError> {
        if self.closed {
            Err(EnvError::Closed)
        } else {
            Ok(())
        }
    }
}

impl Env for GridEnv {
    type Observation = Observation;

    fn reset(&mut self, seed: Option<u64>) -> Result<Observation, EnvError> {
        self.ensure_open()?;
        if let Some(seed) = seed {
            self.rng.seed(seed);
        }
        let generated = self.layout.generate(self.size, &mut self.rng)?;
        self.grid = generated.grid;
        self.agent_pos = generated.agent_pos;
        self.agent_dir = generated.agent_dir;
        self.obstacles = generated.obstacles;
        self.carrying = None;
        self.step_count = 0;
        tracing::debug!(env = %self.id, ?seed, "episode reset");
        Ok(self.observe())
    }

    fn step(&mut self, action: Action) -> Result<Step<Observation>, EnvError> {
        self.ensure_open()?;
        self.step_count += 1;

        let mut reward = 0.0;
        let mut terminated = false;
        let mut info = StepInfo::default();

        // Obstacles react before the agent's move, but collisions are judged
        // against what was in front of the agent when it chose to act.
        let blocked_before = matches!(self.layout, Layout::DynamicObstacles { .. })
            && self
                .front_pos()
                .and_then(|p| self.grid.get(p))
                .is_some_and(|c| !matches!(c, Cell::Empty | Cell::Goal));
        if matches!(self.layout, Layout::DynamicObstacles { .. }) {
            self.move_obstacles();
        }

        let front = self.front_pos();
        let front_cell = front.and_then(|p| self.grid.get(p));

        match action {
            Action::Left => self.agent_dir = self.agent_dir.left(),
            Action::Right => self.agent_dir = self.agent_dir.right(),
            Action::Forward => {
                if let (Some(pos), Some(cell)) = (front, front_cell) {
                    if cell.can_overlap() {
                        self.agent_pos = pos;
                    }
                    match cell {
                        Cell::Goal => {
                            terminated = true;
                            reward = self.reward();
                        }
                        Cell::Lava => {
                            terminated = true;
                            info.cost = 1.0;
                        }
                        _ => {}
                    }
                }
            }
            Action::Pickup => {
                if let (Some(pos), Some(cell)) = (front, front_cell) {
                    if cell.can_pickup() && self.carrying.is_none() {
                        self.carrying = Some(cell);
                        self.grid.set(pos, Cell::Empty);
                    }
                }
            }
            Action::Drop => {
                if let (Some(pos), Some(Cell::Empty), Some(carried)) = (front, front_cell, self.carrying) {
                    self.grid.set(pos, carried);
                    self.carrying = None;
                }
            }
            Action::Toggle => {
                if let (Some(pos), Some(Cell::Door(state))) = (front, front_cell) {
                    let next = match state {
                        DoorState::Locked if self.carrying == Some(Cell::Key) => DoorState::Open,
                        DoorState::Locked => DoorState::Locked,
                        DoorState::Closed => DoorState::Open,
                        DoorState::Open => DoorState::Closed,
                    };
                    self.grid.set(pos, Cell::Door(next));
                }
            }
            Action::Done => {}
        }

        if action == Action::Forward && blocked_before {
            reward = -1.0;
            terminated = true;
            info.cost = 1.0;
        }

        let truncated = self.step_count >= self.max_steps;
        Ok(Step { observation: self.observe(), reward, terminated, truncated, info })
    }

    fn render(&mut self) -> Result<(), EnvError> {
        match self.render_mode {
            RenderMode::None => {}
            RenderMode::Human => {
                let frame = text_frame(&self.grid, self.agent_pos, self.agent_dir, &self.options);
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{}  step {}/{}", self.id, self.step_count, self.max_steps)?;
                stdout.write_all(frame.as_bytes())?;
                stdout.flush()?;
            }
            RenderMode::Ansi => {
                let frame = text_frame(&self.grid, self.agent_pos, self.agent_dir, &self.options);
                self.last_frame = Some(Frame::Text(frame));
            }
            RenderMode::RgbArray => {
                self.last_frame = Some(pixel_frame(&self.grid, self.agent_pos, self.agent_dir, &self.options));
            }
        }
        Ok(())
    }

    fn close(&mut self) {
        if !self.closed {
            tracing::debug!(env = %self.id, "environment closed");
        }
        self.closed = true;
    }

    fn step_count(&self) -> u32 {
        self.step_count
    }

    fn action_count(&self) -> usize {
        self.layout.action_count()
    }
}
