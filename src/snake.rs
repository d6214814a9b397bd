use std::collections::VecDeque;

use log::{debug, info};
use rand::Rng;

use Direction::*;
use MoveResult::*;

pub const COLS: i16 = 20;
pub const ROWS: i16 = 20;
pub const FOOD_REWARD: u32 = 10;

/// A grid position, `(x, y)`, with the origin in the top left corner.
pub type Cell = (i16, i16);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn vector(self) -> Cell {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Cell, old_tail: Cell },
    Ate { new_head: Cell, food: Cell },
    Crashed(Collision),
    /// The snake ate the last free cell, there is nowhere left to put food.
    Filled,
    /// The game is already over, nothing moved.
    Halted,
}

#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    pending_direction: Direction,
    food: Cell,
    score: u32,
    over: bool,
}

impl Snake {
    /// A one-segment snake in the middle of the grid heading right.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut snake = Snake {
            body: VecDeque::from(vec![(COLS / 2, ROWS / 2)]),
            direction: Right,
            pending_direction: Right,
            food: (0, 0),
            score: 0,
            over: false,
        };
        // A lone segment always leaves free cells.
        if let Some(food) = snake.spawn_food(rng) {
            snake.food = food;
        }
        snake
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Queues a turn for the next step. Turning back onto the committed
    /// direction is ignored, even if another turn is already queued.
    pub fn change_direction(&mut self, new_direction: Direction) {
        if new_direction == self.direction.opposite() {
            return;
        }
        self.pending_direction = new_direction;
    }

    pub fn move_step<R: Rng>(&mut self, rng: &mut R) -> MoveResult {
        if self.over {
            return Halted;
        }

        self.direction = self.pending_direction;
        let old_head = self.head();
        let diff = self.direction.vector();
        let new_head = (old_head.0 + diff.0, old_head.1 + diff.1);

        if !in_bounds(new_head) {
            return self.crash(Collision::Wall);
        }
        if self.body.contains(&new_head) {
            return self.crash(Collision::Body);
        }

        self.body.push_front(new_head);

        if new_head != self.food {
            let old_tail = self.body.pop_back().unwrap_or(new_head);
            return Moved { new_head, old_tail };
        }

        self.score += FOOD_REWARD;
        let eaten = self.food;
        match self.spawn_food(rng) {
            Some(food) => {
                self.food = food;
                debug!("ate {:?}, score {}, next food at {:?}", eaten, self.score, food);
                Ate { new_head, food }
            }
            None => {
                self.over = true;
                info!("grid filled with score {}", self.score);
                Filled
            }
        }
    }

    fn crash(&mut self, collision: Collision) -> MoveResult {
        self.over = true;
        info!("crashed into {:?} with score {}", collision, self.score);
        Crashed(collision)
    }

    // Rejection sampling over the whole grid. Only gives up when every cell is taken.
    fn spawn_food<R: Rng>(&self, rng: &mut R) -> Option<Cell> {
        if self.body.len() >= (COLS as usize) * (ROWS as usize) {
            return None;
        }
        loop {
            let candidate = (rng.gen_range(0..COLS), rng.gen_range(0..ROWS));
            if !self.body.contains(&candidate) {
                return Some(candidate);
            }
        }
    }
}

fn in_bounds(pos: Cell) -> bool {
    pos.0 >= 0 && pos.1 >= 0 && pos.0 < COLS && pos.1 < ROWS
}
