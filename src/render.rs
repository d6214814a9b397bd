use crate::error::Result;
use crate::snake::{Cell, Direction, Snake, COLS, ROWS};
use crate::term::{Coords, TermInt, TermManager};

const CELL_WIDTH: usize = 2;
const EMPTY_CELL: [char; CELL_WIDTH] = [' ', ' '];
const SNAKE_BODY: [char; CELL_WIDTH] = ['█', '█'];
const FOOD: [char; CELL_WIDTH] = ['(', ')'];
const DEAD_SNAKE: [char; CELL_WIDTH] = ['X', 'X'];
const PANEL_WIDTH: TermInt = 34;
const PANEL_HEIGHT: TermInt = 12;

/// Everything needed to draw one picture of the board.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub cols: i16,
    pub rows: i16,
    /// Head first.
    pub segments: Vec<Cell>,
    pub food: Cell,
    pub direction: Direction,
    pub score: u32,
    pub over: bool,
}

impl Frame {
    pub fn of(snake: &Snake) -> Self {
        Frame {
            cols: COLS,
            rows: ROWS,
            segments: snake.body().iter().copied().collect(),
            food: snake.food(),
            direction: snake.get_direction(),
            score: snake.score(),
            over: snake.is_over(),
        }
    }

    /// One string per grid row, each cell `CELL_WIDTH` characters wide.
    pub fn to_lines(&self) -> Vec<String> {
        let width = self.cols.max(0) as usize;
        let mut grid = vec![vec![EMPTY_CELL; width]; self.rows.max(0) as usize];

        let mut put = |pos: Cell, glyph: [char; CELL_WIDTH]| {
            if pos.0 >= 0 && pos.1 >= 0 && pos.0 < self.cols && pos.1 < self.rows {
                grid[pos.1 as usize][pos.0 as usize] = glyph;
            }
        };

        put(self.food, FOOD);
        for (i, pos) in self.segments.iter().enumerate().rev() {
            let glyph = if self.over {
                DEAD_SNAKE
            } else if i == 0 {
                let ch = head_char(self.direction);
                [ch, ch]
            } else {
                SNAKE_BODY
            };
            put(*pos, glyph);
        }

        grid.iter().map(|row| row.iter().flatten().collect()).collect()
    }
}

pub fn head_char(direction: Direction) -> char {
    match direction {
        Direction::Up => '^',
        Direction::Down => 'v',
        Direction::Left => '<',
        Direction::Right => '>',
    }
}

/// Sink for board pictures. Drawing never feeds back into the game.
pub trait GridRenderer {
    fn draw(&mut self, frame: &Frame) -> Result<()>;
}

/// Everything else the snake screen shows around the board.
pub trait GameView: GridRenderer {
    fn show_message(&mut self, lines: &[&str]) -> Result<()>;
    fn hide_message(&mut self) -> Result<()>;
    /// Replaces the high score panel with `lines`, best first.
    fn draw_scores(&mut self, lines: &[String]) -> Result<()>;
}

/// Draws the board inside a frame with its top left corner at `origin`.
pub struct TermGrid {
    term: TermManager,
    origin: Coords,
}

impl TermGrid {
    pub fn new(term: TermManager, origin: Coords) -> Self {
        TermGrid { term, origin }
    }

    pub fn term(&mut self) -> &mut TermManager {
        &mut self.term
    }

    /// Outer size of the board, border included.
    pub fn size() -> Coords {
        ((COLS as usize * CELL_WIDTH) as TermInt + 2, ROWS as TermInt + 2)
    }
}

impl GridRenderer for TermGrid {
    fn draw(&mut self, frame: &Frame) -> Result<()> {
        let (x0, y0) = self.origin;
        self.term.draw_box(self.origin, Self::size());
        for (dy, line) in frame.to_lines().iter().enumerate() {
            self.term.print_str_at((x0 + 1, y0 + 1 + dy as TermInt), line);
        }
        self.term.print_str_at((x0, y0 + Self::size().1), &format!("Score: {:<6}", frame.score));
        self.term.flush()
    }
}

impl GameView for TermGrid {
    fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        self.term.show_message(lines)
    }

    fn hide_message(&mut self) -> Result<()> {
        self.term.hide_message()
    }

    fn draw_scores(&mut self, lines: &[String]) -> Result<()> {
        let x = self.origin.0 + Self::size().0 + 2;
        let y0 = self.origin.1;

        let blank = " ".repeat(PANEL_WIDTH as usize);
        for y in 0..PANEL_HEIGHT {
            self.term.print_str_at((x, y0 + y), &blank);
        }
        self.term.print_str_at((x, y0), "High scores (c to clear)");
        for (i, line) in lines.iter().enumerate() {
            self.term.print_str_at((x, y0 + 2 + i as TermInt), line);
        }
        self.term.flush()
    }
}
