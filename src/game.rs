use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use log::{debug, info, warn};
use rand::{rngs::ThreadRng, Rng};

use crate::clock::FixedStep;
use crate::error::Result;
use crate::leaderboard::{Leaderboard, MAX_NAME_CHARS};
use crate::render::{Frame, GameView, TermGrid};
use crate::snake::{Direction::{*, self}, MoveResult::*, Snake};
use crate::store::KeyValueStore;
use crate::term::is_ctrl_c;

pub const TICK_INTERVAL: Duration = Duration::from_millis(100);
const INPUT_POLL: Duration = Duration::from_millis(5);

#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Intro,
    Running,
    /// Crashed, waiting for the player's name.
    NamePrompt(String),
    Over,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The snake screen: game phases and key handling on top of a [`Snake`].
/// Drawing goes through `V`, scores are kept in `S`.
pub struct SnakeGame<V: GameView, S: KeyValueStore, G: Rng> {
    view: V,
    snake: Snake,
    ticker: FixedStep,
    leaderboard: Leaderboard<S>,
    phase: Phase,
    paused: bool,
    won: bool,
    rng: G,
}

impl<V: GameView, S: KeyValueStore, G: Rng> SnakeGame<V, S, G> {
    pub fn new(view: V, leaderboard: Leaderboard<S>, mut rng: G) -> Self {
        let snake = Snake::new(&mut rng);
        SnakeGame {
            view,
            snake,
            ticker: FixedStep::new(TICK_INTERVAL),
            leaderboard,
            phase: Phase::Intro,
            paused: false,
            won: false,
            rng,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_armed()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn leaderboard(&self) -> &Leaderboard<S> {
        &self.leaderboard
    }

    /// Draws the idle board, the scores and the controls.
    pub fn open(&mut self) -> Result<()> {
        self.view.draw(&Frame::of(&self.snake))?;
        self.draw_scores()?;
        self.view.show_message(&[
            "Arrow keys or WASD to move",
            "Esc to pause",
            "q or CTRL+C to quit",
            "",
            "Press Space to begin",
        ])
    }

    /// Lets `dt` of game time pass, stepping the snake when a tick is due.
    pub fn update(&mut self, dt: Duration) -> Result<()> {
        if self.paused || !self.ticker.advance(dt) {
            return Ok(());
        }
        self.step()
    }

    pub fn handle_key(&mut self, ev: &KeyEvent) -> Result<Flow> {
        if is_ctrl_c(ev) {
            return Ok(Flow::Quit);
        }

        if let Phase::NamePrompt(name) = &mut self.phase {
            match ev.code {
                KeyCode::Enter => {
                    let name = name.clone();
                    self.submit(&name)?;
                }
                KeyCode::Esc => self.finish_prompt()?,
                KeyCode::Backspace => {
                    name.pop();
                    self.show_prompt()?;
                }
                KeyCode::Char(ch) if name.chars().count() < MAX_NAME_CHARS => {
                    name.push(ch);
                    self.show_prompt()?;
                }
                _ => {}
            }
            return Ok(Flow::Continue);
        }

        match ev.code {
            KeyCode::Char('q') => return Ok(Flow::Quit),
            KeyCode::Char('n') => self.start()?,
            KeyCode::Char(' ') if self.phase != Phase::Running => self.start()?,
            KeyCode::Char('c') if self.phase != Phase::Running => self.clear_scores()?,
            KeyCode::Esc if self.phase == Phase::Running => self.toggle_pause()?,
            code => {
                if let (Some(dir), Phase::Running) = (direction_for(code), &self.phase) {
                    self.snake.change_direction(dir);
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn start(&mut self) -> Result<()> {
        self.snake = Snake::new(&mut self.rng);
        self.phase = Phase::Running;
        self.paused = false;
        self.won = false;
        self.ticker.start();
        info!("new game, food at {:?}", self.snake.food());

        self.view.hide_message()?;
        self.view.draw(&Frame::of(&self.snake))
    }

    fn step(&mut self) -> Result<()> {
        let res = self.snake.move_step(&mut self.rng);
        match &res {
            Halted => return Ok(()),
            Crashed(_) | Filled => {
                self.won = res == Filled;
                self.ticker.cancel();
                self.phase = Phase::NamePrompt(String::new());
                self.view.draw(&Frame::of(&self.snake))?;
                return self.show_prompt();
            }
            Moved { .. } | Ate { .. } => debug!("{:?}", res),
        }
        self.view.draw(&Frame::of(&self.snake))
    }

    fn show_prompt(&mut self) -> Result<()> {
        let name = match &self.phase {
            Phase::NamePrompt(name) => name.clone(),
            _ => return Ok(()),
        };
        let title = if self.won {"You won!"} else {"Game over!"};
        self.view.show_message(&[
            title,
            &*format!("Score: {}", self.snake.score()),
            "",
            &*format!("Name: {:<width$}", format!("{}_", name), width = MAX_NAME_CHARS + 1),
            "",
            "Enter to save, Esc to skip",
        ])
    }

    fn submit(&mut self, name: &str) -> Result<()> {
        if let Err(e) = self.leaderboard.submit(name, self.snake.score()) {
            warn!("could not save score: {}", e);
        }
        self.finish_prompt()
    }

    fn finish_prompt(&mut self) -> Result<()> {
        self.phase = Phase::Over;
        self.draw_scores()?;
        self.view.show_message(&["Press Space to play again,", "or q to quit."])
    }

    fn clear_scores(&mut self) -> Result<()> {
        if let Err(e) = self.leaderboard.clear() {
            warn!("could not clear scores: {}", e);
        }
        self.draw_scores()
    }

    fn draw_scores(&mut self) -> Result<()> {
        let lines = self.leaderboard.render();
        self.view.draw_scores(&lines)
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            self.view.show_message(&["Paused", "Press Esc to resume", "or q to quit"])?;
        } else {
            self.view.hide_message()?;
        }

        self.paused = !self.paused;
        Ok(())
    }
}

impl<S: KeyValueStore> SnakeGame<TermGrid, S, ThreadRng> {
    pub fn run(&mut self) -> Result<()> {
        self.view.term().setup()?;
        let res = self.event_loop();
        self.view.term().restore()?;
        res
    }

    fn event_loop(&mut self) -> Result<()> {
        self.view.term().clear()?;
        self.open()?;

        let mut last = Instant::now();
        loop {
            for key_ev in self.view.term().read_key_events_queue(INPUT_POLL)? {
                if let Flow::Quit = self.handle_key(&key_ev)? {
                    return Ok(());
                }
            }

            let now = Instant::now();
            self.update(now - last)?;
            last = now;
        }
    }
}

pub fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Right),
        _ => None,
    }
}
