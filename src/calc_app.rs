use crossterm::event::{KeyCode, KeyEvent};
use log::info;

use crate::calculator::{Calculator, Command, Operator};
use crate::error::Result;
use crate::term::{is_ctrl_c, TermInt, TermManager};

const DISPLAY_WIDTH: usize = 24;
const BOX_SIZE: (TermInt, TermInt) = (DISPLAY_WIDTH as TermInt + 4, 3);

const KEYPAD: &[&str] = &[
    "[7] [8] [9] [/]",
    "[4] [5] [6] [*]",
    "[1] [2] [3] [-]",
    "[0] [.] [=] [+]",
    "",
    "Esc: clear   q: quit",
];

pub struct CalculatorApp {
    term: TermManager,
    calc: Calculator,
}

impl CalculatorApp {
    pub fn new(term: TermManager) -> Self {
        CalculatorApp { term, calc: Calculator::new() }
    }

    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;
        let res = self.event_loop();
        self.term.restore()?;
        res
    }

    fn event_loop(&mut self) -> Result<()> {
        self.term.clear()?;
        self.draw_keypad();
        self.draw_display()?;
        info!("calculator ready");

        loop {
            let ev = self.term.read_key_blocking()?;
            if is_ctrl_c(&ev) || ev.code == KeyCode::Char('q') {
                return Ok(());
            }
            if let Some(command) = command_for(&ev) {
                self.calc.apply(command);
                self.draw_display()?;
            }
        }
    }

    fn draw_keypad(&mut self) {
        for (i, line) in KEYPAD.iter().enumerate() {
            self.term.print_str_at((2, BOX_SIZE.1 + 1 + i as TermInt), line);
        }
    }

    fn draw_display(&mut self) -> Result<()> {
        self.term.draw_box((0, 0), BOX_SIZE);
        let shown = fit_display(self.calc.display(), DISPLAY_WIDTH);
        self.term.print_str_at((2, 1), &format!("{:>width$}", shown, width = DISPLAY_WIDTH));
        self.term.flush()
    }
}

pub fn command_for(ev: &KeyEvent) -> Option<Command> {
    match ev.code {
        KeyCode::Char(d) if d.is_ascii_digit() => Some(Command::Digit(d)),
        KeyCode::Char('.') | KeyCode::Char(',') => Some(Command::Decimal),
        KeyCode::Char(op @ '+') | KeyCode::Char(op @ '-') | KeyCode::Char(op @ '*') | KeyCode::Char(op @ '/') => {
            Some(Command::Operator(Operator::from(op)))
        }
        KeyCode::Char('x') => Some(Command::Operator(Operator::Mul)),
        KeyCode::Enter | KeyCode::Char('=') => Some(Command::Equals),
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('c') => Some(Command::Clear),
        _ => None,
    }
}

/// Keeps the most significant end of numbers too long for the display.
fn fit_display(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
