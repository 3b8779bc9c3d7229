use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::Bernoulli;
use strum::{EnumCount, EnumIter, FromRepr};

use crate::error::{Error, Result};

/// Position coordinates in the grid as `(row, col)`
pub type Pos = (usize, usize);

/// The kind of a single grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty = 0,
    Mine = 1,
}

/// A move by one cell in one of the four cardinal directions
#[derive(EnumCount, EnumIter, FromRepr, Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Action {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Action {
    /// The `(row, col)` delta this action applies to a position
    pub fn delta(self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Right => (0, 1),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
        }
    }
}

impl TryFrom<usize> for Action {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Action::from_repr(value).ok_or(Error::InvalidAction(value))
    }
}

/// A square gridworld where hidden mines separate the start corner from the
/// goal corner
///
/// The agent starts at `(0, 0)` and must reach `(size - 1, size - 1)`. Each
/// move costs a small penalty, walking off the board costs a larger one and
/// goes nowhere, and the episode terminates on the goal (reward) or a mine
/// (punishment). States are exposed to agents as the flat index
/// `row * size + col`.
///
/// The board is regenerated by [`reset`](Minefield::reset) and fixed for the
/// duration of an episode. Termination is sticky: after the episode ends,
/// further steps are no-ops until the next reset.
pub struct Minefield {
    size: usize,
    grid: Vec<Cell>,
    pos: Pos,
    goal: Pos,
    done: bool,
    rng: StdRng,
}

impl Minefield {
    /// Construct an environment with an entropy-seeded mine generator
    ///
    /// The board is undefined until the first [`reset`](Minefield::reset).
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Construct an environment with a reproducible mine generator
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            size: 0,
            grid: Vec::new(),
            pos: (0, 0),
            goal: (0, 0),
            done: false,
            rng,
        }
    }

    /// Regenerate the board and start a new episode
    ///
    /// Every cell except the start and goal corners is independently marked as
    /// a mine with probability `mine_probability`, so a board may hold zero or
    /// many mines and a clear path is not guaranteed.
    ///
    /// **Returns** the initial state, which is always `0`
    pub fn reset(&mut self, size: usize, mine_probability: f64) -> Result<usize> {
        if size < 2 {
            return Err(Error::GridTooSmall(size));
        }
        if !(0.0..=1.0).contains(&mine_probability) {
            return Err(Error::MineProbability(mine_probability));
        }

        let mines = Bernoulli::new(mine_probability).expect("`mine_probability` is within [0, 1]");
        self.size = size;
        self.goal = (size - 1, size - 1);
        self.grid = vec![Cell::Empty; size * size];
        for row in 0..size {
            for col in 0..size {
                if (row, col) != (0, 0) && (row, col) != self.goal && self.rng.sample(mines) {
                    self.grid[row * size + col] = Cell::Mine;
                }
            }
        }

        self.pos = (0, 0);
        self.done = false;
        Ok(self.state())
    }

    /// Apply an action and observe the outcome
    ///
    /// **Returns** `(state, reward, done)`:
    /// - a move off the board goes nowhere and costs `-5`
    /// - stepping on a mine costs `-100` and terminates the episode
    /// - reaching the goal yields `+100` and terminates the episode
    /// - any other move costs `-1`
    /// - once terminated, every further step returns `(state, 0, true)`
    pub fn step(&mut self, action: Action) -> Result<(usize, f32, bool)> {
        if self.grid.is_empty() {
            return Err(Error::NotReset);
        }
        if self.done {
            return Ok((self.state(), 0.0, true));
        }

        let (dr, dc) = action.delta();
        let row = self.pos.0 as isize + dr;
        let col = self.pos.1 as isize + dc;
        if row < 0 || col < 0 || row >= self.size as isize || col >= self.size as isize {
            return Ok((self.state(), -5.0, false));
        }

        self.pos = (row as usize, col as usize);
        let (reward, done) = if self.grid[self.state()] == Cell::Mine {
            (-100.0, true)
        } else if self.pos == self.goal {
            (100.0, true)
        } else {
            (-1.0, false)
        };

        self.done = done;
        Ok((self.state(), reward, done))
    }

    /// The side length of the board, `0` before the first reset
    pub fn size(&self) -> usize {
        self.size
    }

    /// The flat state index of the current position
    pub fn state(&self) -> usize {
        self.pos.0 * self.size + self.pos.1
    }

    /// The agent's current position
    pub fn position(&self) -> Pos {
        self.pos
    }

    /// The goal position
    pub fn goal(&self) -> Pos {
        self.goal
    }

    /// Whether the current episode has terminated
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// The kind of the cell at `(row, col)`, or `None` outside the board
    ///
    /// Mines are visible to observers at all times. A renderer that wants fog
    /// of war has to hide them itself.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.size && col < self.size {
            Some(self.grid[row * self.size + col])
        } else {
            None
        }
    }

    /// The number of mines on the board
    pub fn mines(&self) -> usize {
        self.grid.iter().filter(|&&c| c == Cell::Mine).count()
    }
}
