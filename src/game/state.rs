use super::action::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta, wrapping each axis around a square grid of `grid_size`
    pub fn wrapped_by(&self, dx: i32, dy: i32, grid_size: usize) -> Self {
        let size = grid_size as i32;
        Self {
            x: (self.x + dx).rem_euclid(size),
            y: (self.y + dy).rem_euclid(size),
        }
    }

    /// Neighbouring cell in a direction on a toroidal grid
    pub fn stepped(&self, direction: Direction, grid_size: usize) -> Self {
        let (dx, dy) = direction.delta();
        self.wrapped_by(dx, dy, grid_size)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Cell>,
}

impl Snake {
    /// Create a straight snake with its head at `head`, body trailing away from `facing`
    pub fn new(head: Cell, facing: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dy) = facing.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(Cell::new(prev.x + back_dx, prev.y + back_dy));
        }

        Self { body }
    }

    /// Build a snake from explicit segments, head first.
    /// Returns `None` for an empty segment list.
    pub fn from_cells(cells: Vec<Cell>) -> Option<Self> {
        if cells.is_empty() {
            None
        } else {
            Some(Self { body: cells })
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// All segments, head first
    pub fn cells(&self) -> &[Cell] {
        &self.body
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Push a new head, dropping the tail unless `grow` is set
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a constructed snake
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Built but not started yet
    Idle,
    /// Accepting ticks and direction changes
    Running,
    /// Frozen until the next start/reset
    GameOver,
}

/// Complete simulation state, owned by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Cell,
    /// Heading applied on the most recent tick
    pub direction: Direction,
    /// Most recent accepted request, applied on the next tick
    pub pending_direction: Option<Direction>,
    pub status: GameStatus,
    pub score: u32,
    /// Best score reached at any game over during the engine's lifetime
    pub high_score: u32,
}

impl GameState {
    pub fn new(snake: Snake, food: Cell, direction: Direction) -> Self {
        Self {
            snake,
            food,
            direction,
            pending_direction: None,
            status: GameStatus::Idle,
            score: 0,
            high_score: 0,
        }
    }

    /// Heading the next tick will use
    pub fn effective_direction(&self) -> Direction {
        self.pending_direction.unwrap_or(self.direction)
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }
}
