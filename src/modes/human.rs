use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use super::timers::GameTimers;
use crate::game::{Difficulty, GameEngine, GameEvent, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;

/// What woke the game loop up
enum Wake {
    Terminal(Event),
    Tick,
    SpawnBigFood,
    Render,
    Quit,
}

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    difficulty: Difficulty,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(mut engine: GameEngine, difficulty: Difficulty) -> Self {
        let state = engine.reset();

        Self {
            engine,
            state,
            difficulty,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
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
        let mut timers = GameTimers::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        while !self.should_quit {
            timers.sync(
                self.state.phase,
                self.difficulty.tick_period(),
                self.engine.config().big_food_interval(),
            );

            let wake = tokio::select! {
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => Wake::Terminal(event),
                    Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                    None => Wake::Quit,
                },
                _ = GameTimers::wait(&mut timers.tick) => Wake::Tick,
                _ = GameTimers::wait(&mut timers.big_food) => Wake::SpawnBigFood,
                _ = render_timer.tick() => Wake::Render,
                _ = tokio::signal::ctrl_c() => Wake::Quit,
            };

            match wake {
                Wake::Terminal(event) => self.handle_event(event),
                Wake::Tick => self.dispatch(GameEvent::Tick),
                Wake::SpawnBigFood => self.dispatch(GameEvent::SpawnBigFood),
                Wake::Render => {
                    terminal
                        .draw(|frame| {
                            self.renderer.render(frame, &self.state, self.difficulty);
                        })
                        .context("Failed to draw frame")?;
                }
                Wake::Quit => self.should_quit = true,
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::GameAction(event) => self.dispatch(event),
                KeyAction::SetDifficulty(difficulty) => {
                    info!("Difficulty set to {}", difficulty.label());
                    self.difficulty = difficulty;
                }
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn dispatch(&mut self, event: GameEvent) {
        self.engine.apply(&mut self.state, event);
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
