use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, GameEngine, GameStatus};
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        engine: &GameEngine,
        metrics: &GameMetrics,
        paused: bool,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(engine, metrics);
        frame.render_widget(stats, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let body = match engine.status() {
            GameStatus::Idle => self.render_idle(),
            GameStatus::Running => self.render_grid(engine, paused),
            GameStatus::GameOver => self.render_game_over(engine),
        };
        frame.render_widget(body, game_area);

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, engine: &GameEngine, paused: bool) -> Paragraph<'_> {
        let size = engine.grid_size() as i32;
        let snake = engine.snake();
        let mut lines = Vec::with_capacity(engine.grid_size());

        for y in 0..size {
            let mut spans = Vec::with_capacity(engine.grid_size());

            for x in 0..size {
                let cell = Cell::new(x, y);

                let span = if cell == snake[0] {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snake.contains(&cell) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if cell == engine.food() {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        let (title, border) = if paused {
            (" Paused - press P to resume ", Color::Yellow)
        } else {
            (" Snake ", Color::White)
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, engine: &GameEngine, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(engine.score().to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("High: ", label),
            Span::styled(
                engine.high_score().to_string(),
                Style::default().fg(Color::Magenta),
            ),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(engine.snake().len().to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Games: ", label),
            Span::styled(metrics.games_played.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_idle(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from("Eat the food, avoid your own tail."),
            Line::from("The edges wrap around."),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Space",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_game_over(&self, engine: &GameEngine) -> Paragraph<'_> {
        let reason = if engine.snake().len() >= engine.config().area() {
            "The board is full!"
        } else {
            "You ran into yourself."
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(reason),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    engine.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    engine.high_score().to_string(),
                    Style::default().fg(Color::Magenta),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Space",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Yellow)),
            Span::raw(" pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction as Heading, GameConfig};
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(engine: &GameEngine, paused: bool) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let renderer = Renderer::new();
        let metrics = GameMetrics::new();

        terminal
            .draw(|frame| renderer.render(frame, engine, &metrics, paused))
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_idle_screen() {
        let engine = GameEngine::with_seed(GameConfig::default(), 1).unwrap();
        let screen = draw(&engine, false);
        assert!(screen.contains("SNAKE"));
        assert!(screen.contains("to start"));
    }

    #[test]
    fn test_running_grid_shows_snake_and_food() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1).unwrap();
        engine.start();
        let screen = draw(&engine, false);
        assert_eq!(screen.matches('■').count(), 1);
        assert_eq!(screen.matches('□').count(), 2);
        assert!(screen.contains('O'));
        assert!(screen.contains("Score: 0"));
    }

    #[test]
    fn test_paused_title() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1).unwrap();
        engine.start();
        let screen = draw(&engine, true);
        assert!(screen.contains("Paused"));
    }

    #[test]
    fn test_game_over_screen() {
        let config = GameConfig {
            initial_snake_length: 4,
            ..Default::default()
        };
        let mut engine = GameEngine::with_seed(config, 1).unwrap();
        engine.start();
        // Circle back into the body: up, left, down
        engine.request_direction(Heading::Up);
        engine.advance_tick();
        engine.request_direction(Heading::Left);
        engine.advance_tick();
        engine.request_direction(Heading::Down);
        engine.advance_tick();
        assert_eq!(engine.status(), GameStatus::GameOver);

        let screen = draw(&engine, false);
        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("You ran into yourself."));
    }
}
