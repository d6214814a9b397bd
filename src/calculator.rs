//! Four-function accumulator behind the calculator keypad.
//!
//! The display string is also the operand buffer: digits are appended to it
//! and it is parsed back into a number whenever an operator or equals is
//! pressed. Number <-> text conversions follow the browser's `String(x)` and
//! `parseFloat` so the displayed results match the keypad's original host.

use log::debug;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    /// A symbol no button should send. It computes to the right operand.
    Unknown(char),
}

impl From<char> for Operator {
    fn from(symbol: char) -> Self {
        match symbol {
            '+' => Operator::Add,
            '-' => Operator::Sub,
            '*' => Operator::Mul,
            '/' => Operator::Div,
            other => Operator::Unknown(other),
        }
    }
}

/// A keypad press.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Digit(char),
    Decimal,
    Clear,
    Operator(Operator),
    Equals,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Calculator {
    first: Option<f64>,
    operator: Option<Operator>,
    waiting_second: bool,
    display: String,
}

impl Default for Calculator {
    fn default() -> Self {
        Calculator { first: None, operator: None, waiting_second: false, display: String::from("0") }
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn first_operand(&self) -> Option<f64> {
        self.first
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.operator
    }

    pub fn is_waiting_for_second_operand(&self) -> bool {
        self.waiting_second
    }

    pub fn apply(&mut self, command: Command) -> &str {
        match command {
            Command::Digit(d) => self.input_digit(d),
            Command::Decimal => self.input_decimal(),
            Command::Clear => self.clear_all(),
            Command::Operator(op) => self.set_operator(op),
            Command::Equals => self.equals(),
        }
        debug!("calculator {:?} -> {:?}", command, self);
        &self.display
    }

    pub fn input_digit(&mut self, d: char) {
        if self.waiting_second {
            self.display = d.to_string();
            self.waiting_second = false;
        } else if self.display == "0" {
            self.display = d.to_string();
        } else {
            self.display.push(d);
        }
    }

    pub fn input_decimal(&mut self) {
        if self.waiting_second {
            self.display = String::from("0.");
            self.waiting_second = false;
            return;
        }
        if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    pub fn set_operator(&mut self, op: Operator) {
        let current = parse_display(&self.display);

        // Two operators in a row only swap the pending one.
        if self.operator.is_some() && self.waiting_second {
            self.operator = Some(op);
            return;
        }

        match (self.first, self.operator) {
            (None, _) => self.first = Some(current),
            (Some(first), Some(pending)) => {
                let result = compute(first, current, pending);
                self.display = format_number(result);
                self.first = Some(result);
            }
            (Some(_), None) => {}
        }

        self.operator = Some(op);
        self.waiting_second = true;
    }

    pub fn equals(&mut self) {
        let current = parse_display(&self.display);
        let (first, op) = match (self.first, self.operator) {
            (Some(first), Some(op)) => (first, op),
            _ => return,
        };

        let result = compute(first, current, op);
        self.display = format_number(result);
        self.first = Some(result);
        self.operator = None;
        self.waiting_second = true;
    }
}

pub fn compute(a: f64, b: f64, op: Operator) -> f64 {
    match op {
        Operator::Add => a + b,
        Operator::Sub => a - b,
        Operator::Mul => a * b,
        Operator::Div if b == 0.0 => f64::NAN,
        Operator::Div => a / b,
        Operator::Unknown(_) => b,
    }
}

/// Renders `value` the way `String(value)` does in a browser.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return String::from("NaN");
    }
    if value.is_infinite() {
        return String::from(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if value == 0.0 {
        return String::from("0");
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let exp = format!("{:e}", value);
        match exp.find('e') {
            Some(idx) if !exp[idx + 1..].starts_with('-') => format!("{}e+{}", &exp[..idx], &exp[idx + 1..]),
            _ => exp,
        }
    } else {
        format!("{}", value)
    }
}

/// Reads the longest numeric prefix of `text`, like `parseFloat`. Text with no
/// numeric prefix reads as NaN.
pub fn parse_display(text: &str) -> f64 {
    let text = text.trim_start();
    (1..=text.len())
        .rev()
        .filter(|&end| text.is_char_boundary(end))
        .map(|end| &text[..end])
        .filter(|prefix| is_js_numeric(prefix))
        .find_map(|prefix| prefix.parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

// Rust's float grammar also admits "inf", "nan" and friends, parseFloat only
// knows "Infinity".
fn is_js_numeric(prefix: &str) -> bool {
    let unsigned = prefix.trim_start_matches(|c: char| c == '+' || c == '-');
    if unsigned.len() + 1 < prefix.len() {
        return false;
    }
    unsigned == "Infinity" || unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn press(calc: &mut Calculator, keys: &str) -> String {
        for key in keys.chars() {
            let command = match key {
                '0'..='9' => Command::Digit(key),
                '.' => Command::Decimal,
                'C' => Command::Clear,
                '=' => Command::Equals,
                op => Command::Operator(Operator::from(op)),
            };
            calc.apply(command);
        }
        calc.display().to_string()
    }

    #[test]
    fn starts_at_zero() {
        let calc = Calculator::new();
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.first_operand(), None);
        assert_eq!(calc.pending_operator(), None);
        assert!(!calc.is_waiting_for_second_operand());
    }

    #[test]
    fn leading_zero_is_replaced() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, "05"), "5");
        assert_eq!(press(&mut calc, "0"), "50");
    }

    #[test]
    fn repeated_decimal_from_zero() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, "..."), "0.");
        assert_eq!(press(&mut calc, "5."), "0.5");
    }

    #[test]
    fn repeated_decimal_while_waiting_for_operand() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, "5+."), "0.");
        assert!(!calc.is_waiting_for_second_operand());
        assert_eq!(press(&mut calc, "."), "0.");
        assert!(!calc.is_waiting_for_second_operand());
        assert_eq!(calc.pending_operator(), Some(Operator::Add));
        assert_eq!(press(&mut calc, "5="), "5.5");
    }

    #[test]
    fn decimal_after_operator_starts_fresh() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, "7+."), "0.");
        assert_eq!(press(&mut calc, "5="), "7.5");
    }

    #[test]
    fn simple_sum_then_repeated_equals_is_noop() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, "5+3="), "8");
        assert_eq!(press(&mut calc, "="), "8");
        assert_eq!(calc.first_operand(), Some(8.0));
        assert_eq!(calc.pending_operator(), None);
    }

    #[test]
    fn operator_then_equals_reuses_first_operand() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, "5+="), "10");
        calc.clear_all();
        assert_eq!(press(&mut calc, "6*="), "36");
    }

    #[test]
    fn consecutive_operators_replace_pending_one() {
        let mut calc = Calculator::new();
        press(&mut calc, "9+-*");
        assert_eq!(calc.pending_operator(), Some(Operator::Mul));
        assert_eq!(calc.display(), "9");
        assert_eq!(press(&mut calc, "2="), "18");
    }

    #[test]
    fn chained_operators_compute_eagerly() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, "2+3*"), "5");
        assert_eq!(press(&mut calc, "4="), "20");
    }

    #[test]
    fn operator_after_equals_chains_from_result() {
        let mut calc = Calculator::new();
        press(&mut calc, "5+3=");
        assert_eq!(press(&mut calc, "-2="), "6");
    }

    #[test]
    fn digit_after_equals_keeps_result_as_left_operand() {
        let mut calc = Calculator::new();
        press(&mut calc, "5+3=");
        assert_eq!(press(&mut calc, "4"), "4");
        // No operator is pending, so the stored 8 stays as the left operand.
        assert_eq!(press(&mut calc, "+1="), "9");
    }

    #[test]
    fn equals_without_operator_does_nothing() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, "42="), "42");
        assert_eq!(calc.first_operand(), None);
        assert!(!calc.is_waiting_for_second_operand());
    }

    #[test]
    fn division_by_zero_shows_nan_and_propagates() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, "7/0="), "NaN");
        assert_eq!(press(&mut calc, "+1="), "NaN");
        assert_eq!(press(&mut calc, "C"), "0");
        assert_eq!(press(&mut calc, "1/4="), "0.25");
    }

    #[test]
    fn float_artifacts_are_kept() {
        let mut calc = Calculator::new();
        assert_eq!(press(&mut calc, ".1+.2="), "0.30000000000000004");
    }

    #[test]
    fn clear_resets_everything() {
        let mut calc = Calculator::new();
        press(&mut calc, "12+3");
        calc.apply(Command::Clear);
        assert_eq!(calc, Calculator::new());
    }

    #[test]
    fn compute_handles_each_operator() {
        assert_eq!(compute(6.0, 3.0, Operator::Add), 9.0);
        assert_eq!(compute(6.0, 3.0, Operator::Sub), 3.0);
        assert_eq!(compute(6.0, 3.0, Operator::Mul), 18.0);
        assert_eq!(compute(6.0, 3.0, Operator::Div), 2.0);
        assert_eq!(compute(6.0, 3.0, Operator::Unknown('%')), 3.0);
        assert!(compute(0.0, 0.0, Operator::Div).is_nan());
        assert!(compute(1.0, -0.0, Operator::Div).is_nan());
    }

    #[test]
    fn formats_like_a_browser() {
        assert_eq!(format_number(8.0), "8");
        assert_eq!(format_number(-2.5), "-2.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(123456789012345680000.0), "123456789012345680000");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(0.000001), "0.000001");
    }

    #[test]
    fn parses_like_parse_float() {
        assert_eq!(parse_display("0."), 0.0);
        assert_eq!(parse_display("12.5"), 12.5);
        assert_eq!(parse_display("-3"), -3.0);
        assert_eq!(parse_display("1e+21"), 1e21);
        assert_eq!(parse_display("1e+21."), 1e21);
        assert_eq!(parse_display("Infinity"), f64::INFINITY);
        assert_eq!(parse_display("-Infinity5"), f64::NEG_INFINITY);
        assert!(parse_display("NaN").is_nan());
        assert!(parse_display("NaN.").is_nan());
        assert!(parse_display("inf").is_nan());
    }

    proptest! {
        #[test]
        fn digits_never_leave_a_leading_zero(digits in proptest::collection::vec(0u32..10, 1..12)) {
            let mut calc = Calculator::new();
            for d in &digits {
                calc.input_digit(std::char::from_digit(*d, 10).unwrap());
            }
            let shown = calc.display();
            prop_assert!(shown == "0" || !shown.starts_with('0'));
        }

        #[test]
        fn repeated_decimal_is_idempotent(keys in "([0-9]{0,4}[-+*/])?[0-9]{0,4}", presses in 1usize..5) {
            let mut once = Calculator::new();
            let mut many = Calculator::new();
            press(&mut once, &keys);
            press(&mut many, &keys);
            once.input_decimal();
            for _ in 0..presses {
                many.input_decimal();
            }
            prop_assert_eq!(once, many);
        }

        #[test]
        fn dividing_by_zero_is_always_nan(a in proptest::num::f64::ANY) {
            prop_assert!(compute(a, 0.0, Operator::Div).is_nan());
        }
    }
}
