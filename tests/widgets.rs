use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::{rngs::StdRng, SeedableRng};

use snakecalc::calculator::{Calculator, Command, Operator};
use snakecalc::clock::FixedStep;
use snakecalc::game::{Phase, SnakeGame, TICK_INTERVAL};
use snakecalc::leaderboard::{Leaderboard, STORAGE_KEY};
use snakecalc::render::{Frame, GameView, GridRenderer};
use snakecalc::snake::{Direction, MoveResult, Snake, COLS, FOOD_REWARD};
use snakecalc::store::{FileStore, KeyValueStore, MemoryStore};
use snakecalc::Result;

#[derive(Default)]
struct Recorder {
    frames: Vec<Frame>,
    scores: Vec<String>,
}

impl GridRenderer for Recorder {
    fn draw(&mut self, frame: &Frame) -> Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

impl GameView for Recorder {
    fn show_message(&mut self, _lines: &[&str]) -> Result<()> {
        Ok(())
    }

    fn hide_message(&mut self) -> Result<()> {
        Ok(())
    }

    fn draw_scores(&mut self, lines: &[String]) -> Result<()> {
        self.scores = lines.to_vec();
        Ok(())
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent { code, modifiers: KeyModifiers::NONE }
}

#[test]
fn keypad_session() {
    let mut calc = Calculator::new();
    let presses = [
        Command::Digit('5'),
        Command::Operator(Operator::Add),
        Command::Digit('3'),
        Command::Equals,
    ];
    for p in presses.iter() {
        calc.apply(*p);
    }
    assert_eq!(calc.display(), "8");
    assert_eq!(calc.apply(Command::Equals), "8");
    assert_eq!(calc.apply(Command::Operator(Operator::Div)), "8");
    calc.apply(Command::Digit('0'));
    assert_eq!(calc.apply(Command::Equals), "NaN");
    assert_eq!(calc.apply(Command::Clear), "0");
}

// Plays until the snake runs into the right wall, drives time through the
// fixed stepper and records the score.
#[test]
fn game_to_leaderboard() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut snake = Snake::new(&mut rng);
    let mut ticker = FixedStep::new(TICK_INTERVAL);
    let mut renderer = Recorder::default();
    ticker.start();

    snake.change_direction(Direction::Left);
    assert_eq!(snake.pending_direction(), Direction::Right);

    let mut outcome = None;
    for _ in 0..100 {
        if !ticker.advance(TICK_INTERVAL / 2) {
            continue;
        }
        let res = snake.move_step(&mut rng);
        renderer.draw(&Frame::of(&snake)).unwrap();
        if let MoveResult::Crashed(_) = res {
            ticker.cancel();
            outcome = Some(res);
            break;
        }
    }

    assert!(outcome.is_some());
    assert!(snake.is_over());
    assert!(!ticker.is_armed());
    assert_eq!(snake.head().0, COLS - 1);
    assert_eq!(snake.score() % FOOD_REWARD, 0);
    assert_eq!(renderer.frames.last().map(|f| f.over), Some(true));

    let dir = tempfile::tempdir().unwrap();
    let mut board = Leaderboard::new(FileStore::new(dir.path()));
    let lines = board.submit("  tester  ", snake.score()).unwrap();
    assert_eq!(lines, vec![format!("1. tester — {}", snake.score())]);

    // A fresh handle on the same directory sees the saved list.
    let reopened = Leaderboard::new(FileStore::new(dir.path()));
    assert_eq!(reopened.load().len(), 1);

    let mut store = FileStore::new(dir.path());
    store.set(STORAGE_KEY, "garbage").unwrap();
    assert!(Leaderboard::new(store).load().is_empty());
}

#[test]
fn two_games_on_the_snake_screen() {
    let board = Leaderboard::new(MemoryStore::new());
    let mut game = SnakeGame::new(Recorder::default(), board, StdRng::seed_from_u64(9));
    game.open().unwrap();

    for (round, name) in ["ann", "ben"].iter().enumerate() {
        game.handle_key(&key(KeyCode::Char(' '))).unwrap();
        assert_eq!(game.phase(), &Phase::Running);
        // Up runs into the top wall within a grid height.
        game.handle_key(&key(KeyCode::Up)).unwrap();
        for _ in 0..30 {
            game.update(TICK_INTERVAL).unwrap();
        }
        assert_eq!(game.phase(), &Phase::NamePrompt(String::new()));
        assert!(!game.is_ticking());
        assert_eq!(game.snake().head().1, 0);

        for ch in name.chars() {
            game.handle_key(&key(KeyCode::Char(ch))).unwrap();
        }
        game.handle_key(&key(KeyCode::Enter)).unwrap();
        assert_eq!(game.phase(), &Phase::Over);
        assert_eq!(game.leaderboard().load().len(), round + 1);
        assert_eq!(game.view().scores.len(), round + 1);
    }
}
