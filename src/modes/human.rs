use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use super::clock::TickClock;
use crate::game::{GameEngine, GameStatus};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Keyboard-driven game in the terminal.
///
/// Input, ticks and rendering all run on one task inside a single `select!`,
/// so engine calls never overlap.
pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    paused: bool,
}

impl HumanMode {
    pub fn new(engine: GameEngine) -> Self {
        Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            paused: false,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Re-armed after every tick from the engine's current speed
        let mut clock = TickClock::new();
        if self.engine.status() == GameStatus::Running {
            clock.arm(self.engine.tick_interval());
        }

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event, &mut clock),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = clock.wait() => {
                    self.on_tick(&mut clock);
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.engine, &self.metrics, self.paused);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event, clock: &mut TickClock) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply(action, clock);
        }
    }

    fn apply(&mut self, action: KeyAction, clock: &mut TickClock) {
        match action {
            KeyAction::Steer(direction) => {
                if !self.paused {
                    self.engine.request_direction(direction);
                }
            }
            KeyAction::Start => match self.engine.status() {
                GameStatus::Idle | GameStatus::GameOver => self.start_game(clock),
                GameStatus::Running => {
                    if self.paused {
                        self.set_paused(false, clock);
                    }
                }
            },
            KeyAction::Restart => self.start_game(clock),
            KeyAction::TogglePause => {
                if self.engine.status() == GameStatus::Running {
                    self.set_paused(!self.paused, clock);
                }
            }
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn on_tick(&mut self, clock: &mut TickClock) {
        let outcome = self.engine.advance_tick();

        if outcome.ended_game() {
            self.metrics.on_game_over();
            clock.disarm();
        } else if self.engine.status() == GameStatus::Running && !self.paused {
            clock.arm(self.engine.tick_interval());
        } else {
            clock.disarm();
        }
    }

    fn start_game(&mut self, clock: &mut TickClock) {
        self.engine.start();
        self.metrics.on_game_start();
        self.paused = false;
        clock.arm(self.engine.tick_interval());
    }

    fn set_paused(&mut self, paused: bool, clock: &mut TickClock) {
        self.paused = paused;

        if paused {
            clock.disarm();
            self.metrics.pause();
            log::debug!("paused at score {}", self.engine.score());
        } else {
            clock.arm(self.engine.tick_interval());
            self.metrics.resume();
            log::debug!("resumed");
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig};

    fn mode() -> HumanMode {
        HumanMode::new(GameEngine::with_seed(GameConfig::default(), 5).unwrap())
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.engine().status(), GameStatus::Idle);
        assert_eq!(mode.engine().score(), 0);
        assert!(!mode.paused);
    }

    #[test]
    fn test_start_arms_clock() {
        let mut mode = mode();
        let mut clock = TickClock::new();

        mode.apply(KeyAction::Steer(Direction::Up), &mut clock);
        assert_eq!(mode.engine().pending_direction(), None);
        assert!(!clock.is_armed());

        mode.apply(KeyAction::Start, &mut clock);
        assert_eq!(mode.engine().status(), GameStatus::Running);
        assert!(clock.is_armed());
        assert!(mode.metrics().is_clock_running());
    }

    #[test]
    fn test_pause_stops_ticks_and_steering() {
        let mut mode = mode();
        let mut clock = TickClock::new();
        mode.apply(KeyAction::Start, &mut clock);

        mode.apply(KeyAction::TogglePause, &mut clock);
        assert!(mode.paused);
        assert!(!clock.is_armed());
        assert_eq!(mode.engine().status(), GameStatus::Running);

        mode.apply(KeyAction::Steer(Direction::Up), &mut clock);
        assert_eq!(mode.engine().pending_direction(), None);

        mode.apply(KeyAction::TogglePause, &mut clock);
        assert!(!mode.paused);
        assert!(clock.is_armed());
    }

    #[test]
    fn test_space_resumes_paused_game() {
        let mut mode = mode();
        let mut clock = TickClock::new();
        mode.apply(KeyAction::Start, &mut clock);
        mode.apply(KeyAction::TogglePause, &mut clock);

        mode.apply(KeyAction::Start, &mut clock);
        assert!(!mode.paused);
        assert!(clock.is_armed());
    }

    #[test]
    fn test_tick_rearms_until_game_over() {
        let config = GameConfig {
            initial_snake_length: 4,
            ..Default::default()
        };
        let mut mode = HumanMode::new(GameEngine::with_seed(config, 5).unwrap());
        let mut clock = TickClock::new();
        mode.apply(KeyAction::Start, &mut clock);

        mode.on_tick(&mut clock);
        assert_eq!(mode.engine().status(), GameStatus::Running);
        assert!(clock.is_armed());

        // Loop back into the body
        for direction in [Direction::Up, Direction::Left, Direction::Down] {
            mode.apply(KeyAction::Steer(direction), &mut clock);
            mode.on_tick(&mut clock);
        }
        assert_eq!(mode.engine().status(), GameStatus::GameOver);
        assert!(!clock.is_armed());
        assert_eq!(mode.metrics().games_played, 1);

        mode.apply(KeyAction::Start, &mut clock);
        assert_eq!(mode.engine().status(), GameStatus::Running);
        assert_eq!(mode.engine().score(), 0);
        assert!(clock.is_armed());
    }

    #[test]
    fn test_quit() {
        let mut mode = mode();
        let mut clock = TickClock::new();
        mode.apply(KeyAction::Quit, &mut clock);
        assert!(mode.should_quit);
    }
}
