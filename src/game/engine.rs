use super::{
    action::Direction,
    config::GameConfig,
    state::{Cell, GameState, GameStatus, Snake},
};
use anyhow::Result;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::time::Duration;

/// Random draws per grid cell before food placement falls back to
/// enumerating the free cells.
const SAMPLE_ATTEMPTS_PER_CELL: usize = 4;

/// What a call to [`GameEngine::advance_tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game was not running; nothing changed
    Ignored,
    /// The snake moved one cell
    Moved,
    /// The snake moved onto the food and grew
    AteFood,
    /// The new head hit the snake's own body; the game is over
    Collided,
    /// The snake grew to cover every cell, leaving nowhere for food; the game is over
    BoardFilled,
}

impl TickOutcome {
    pub fn ended_game(&self) -> bool {
        matches!(self, TickOutcome::Collided | TickOutcome::BoardFilled)
    }
}

/// The game engine that owns and advances the simulation.
///
/// Driven from outside: a timing loop calls [`advance_tick`](Self::advance_tick)
/// every [`tick_interval`](Self::tick_interval), and an input adapter calls
/// [`request_direction`](Self::request_direction). Both must be serialized by
/// the caller; the engine does no scheduling of its own.
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    tick_interval: Duration,
    rng: StdRng,
}

impl GameEngine {
    /// Create an idle engine seeded from OS entropy
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an idle engine with reproducible food placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Result<Self> {
        config.validate()?;

        let state = initial_state(&config, &mut rng);
        let tick_interval = config.speed.interval_for(state.snake.len());

        Ok(Self {
            config,
            state,
            tick_interval,
            rng,
        })
    }

    /// Begin a fresh game. The high score is kept.
    pub fn start(&mut self) {
        let high_score = self.state.high_score;

        self.state = initial_state(&self.config, &mut self.rng);
        self.state.high_score = high_score;
        self.state.status = GameStatus::Running;
        self.tick_interval = self.config.speed.interval_for(self.state.snake.len());

        log::info!("game started (high score {})", high_score);
    }

    /// Replay after a game over; identical to [`start`](Self::start)
    pub fn reset(&mut self) {
        self.start();
    }

    /// Queue a heading change for the next tick.
    ///
    /// Returns `false` when the request was dropped: the game is not running,
    /// or `direction` would reverse either the queued heading or the heading
    /// applied on the last tick.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if !self.state.is_running() {
            return false;
        }

        if direction.is_opposite(self.state.effective_direction())
            || direction.is_opposite(self.state.direction)
        {
            return false;
        }

        self.state.pending_direction = Some(direction);
        true
    }

    /// Execute one step of the game
    pub fn advance_tick(&mut self) -> TickOutcome {
        if !self.state.is_running() {
            return TickOutcome::Ignored;
        }

        let direction = self.state.effective_direction();
        self.state.direction = direction;
        self.state.pending_direction = None;

        let new_head = self
            .state
            .snake
            .head()
            .stepped(direction, self.config.grid_size);

        // Checked against the pre-move body, so the tail cell counts
        if self.state.snake.contains(new_head) {
            self.end_game();
            return TickOutcome::Collided;
        }

        let ate_food = new_head == self.state.food;
        self.state.snake.advance(new_head, ate_food);

        let outcome = if ate_food {
            self.state.score = self.state.score.saturating_add(self.config.food_score);
            log::debug!(
                "food eaten at ({}, {}), score {}",
                new_head.x,
                new_head.y,
                self.state.score
            );

            match place_food(&mut self.rng, &self.state.snake, self.config.grid_size) {
                Some(food) => {
                    self.state.food = food;
                    TickOutcome::AteFood
                }
                None => {
                    self.end_game();
                    TickOutcome::BoardFilled
                }
            }
        } else {
            TickOutcome::Moved
        };

        self.tick_interval = self.config.speed.interval_for(self.state.snake.len());
        outcome
    }

    fn end_game(&mut self) {
        self.state.status = GameStatus::GameOver;
        self.state.high_score = self.state.high_score.max(self.state.score);

        log::info!(
            "game over: score {}, high score {}, length {}",
            self.state.score,
            self.state.high_score,
            self.state.snake.len()
        );
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Segments, head first
    pub fn snake(&self) -> &[Cell] {
        self.state.snake.cells()
    }

    pub fn food(&self) -> Cell {
        self.state.food
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn high_score(&self) -> u32 {
        self.state.high_score
    }

    /// Heading applied on the most recent tick
    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.state.pending_direction
    }

    /// Delay the driver should wait before the next tick
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn grid_size(&self) -> usize {
        self.config.grid_size
    }
}

/// Fresh idle state: straight snake facing right, food somewhere free
fn initial_state(config: &GameConfig, rng: &mut StdRng) -> GameState {
    let (x, y) = config.initial_head();
    let head = Cell::new(x, y);
    let snake = Snake::new(head, Direction::Right, config.initial_snake_length);

    // The cell ahead of a fresh snake is free for any validated config
    let food = place_food(rng, &snake, config.grid_size)
        .unwrap_or_else(|| head.stepped(Direction::Right, config.grid_size));

    GameState::new(snake, food, Direction::Right)
}

/// Pick a uniformly random cell not covered by the snake, or `None` if the
/// snake covers the whole grid.
fn place_food(rng: &mut StdRng, snake: &Snake, grid_size: usize) -> Option<Cell> {
    let area = grid_size * grid_size;
    if snake.len() >= area {
        return None;
    }

    for _ in 0..area * SAMPLE_ATTEMPTS_PER_CELL {
        let x = rng.gen_range(0..grid_size) as i32;
        let y = rng.gen_range(0..grid_size) as i32;
        let cell = Cell::new(x, y);

        if !snake.contains(cell) {
            return Some(cell);
        }
    }

    let free: Vec<Cell> = (0..grid_size as i32)
        .flat_map(|y| (0..grid_size as i32).map(move |x| Cell::new(x, y)))
        .filter(|cell| !snake.contains(*cell))
        .collect();

    log::debug!(
        "rejection sampling missed, choosing among {} free cells",
        free.len()
    );
    free.choose(rng).copied()
}
