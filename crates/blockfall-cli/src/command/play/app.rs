use blockfall_engine::Engine;
use crossterm::event::Event;
use ratatui::Frame;

use crate::{
    input::Intent,
    tui::{App, Runtime},
    ui::widgets::GameDisplay,
};

/// Routes player intents and timer ticks to the engine.
#[derive(Debug)]
pub struct PlayApp {
    engine: Engine,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            is_exiting: false,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Applies `intent` and returns whether the fall timer should restart.
    ///
    /// After game over only `Quit` has an effect.
    fn perform(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Quit => {
                self.is_exiting = true;
                false
            }
            _ if self.engine.is_game_over() => false,
            Intent::MoveLeft => {
                _ = self.engine.try_move_left();
                false
            }
            Intent::MoveRight => {
                _ = self.engine.try_move_right();
                false
            }
            Intent::Rotate => {
                _ = self.engine.try_rotate();
                false
            }
            Intent::SoftDrop => {
                _ = self.engine.tick();
                true
            }
            Intent::HardDrop => {
                _ = self.engine.hard_drop();
                _ = self.engine.tick();
                true
            }
        }
    }

    fn stop_ticking_if_over(&self, runtime: &mut Runtime) {
        if self.engine.is_game_over() {
            runtime.set_tick_interval(None);
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        let timing = self.engine.config().timing;
        runtime.set_render_interval(timing.frame_interval());
        runtime.set_tick_interval(Some(timing.fall_interval()));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) {
        let Some(intent) = Intent::from_event(event) else {
            return;
        };
        if self.perform(intent) {
            runtime.reset_tick();
        }
        self.stop_ticking_if_over(runtime);
    }

    fn draw(&self, frame: &mut Frame) {
        frame.render_widget(GameDisplay::new(&self.engine), frame.area());
    }

    fn update(&mut self, runtime: &mut Runtime) {
        if !self.engine.is_game_over() {
            _ = self.engine.tick();
        }
        self.stop_ticking_if_over(runtime);
    }
}
