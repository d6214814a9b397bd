use std::{env, process::exit};

use env_logger::{Env, Target};
use log::error;

use snakecalc::calc_app::CalculatorApp;
use snakecalc::config::Config;
use snakecalc::game::SnakeGame;
use snakecalc::leaderboard::Leaderboard;
use snakecalc::render::TermGrid;
use snakecalc::store::FileStore;
use snakecalc::term::TermManager;
use snakecalc::{AppError, Result};

fn main() {
    let config = Config::from_env();
    init_logging(&config);

    let widget = env::args().nth(1).unwrap_or_else(|| String::from("snake"));
    if let Err(e) = run(&widget, &config) {
        error!("{}", e);
        eprintln!("snakecalc: {}", e);
        if let AppError::UnknownWidget(_) = e {
            eprintln!("usage: snakecalc [snake|calc]");
            exit(2);
        }
        exit(1);
    }
}

fn run(widget: &str, config: &Config) -> Result<()> {
    match widget {
        "snake" => {
            let leaderboard = Leaderboard::new(FileStore::new(&config.data_dir));
            let grid = TermGrid::new(TermManager::new()?, (0, 0));
            SnakeGame::new(grid, leaderboard, rand::thread_rng()).run()
        }
        "calc" => CalculatorApp::new(TermManager::new()?).run(),
        other => Err(AppError::UnknownWidget(other.to_string())),
    }
}

// The terminal is in raw mode while a widget runs, so log lines go to a file.
fn init_logging(config: &Config) {
    let file = match config.open_log() {
        Ok(file) => file,
        Err(e) => {
            eprintln!("snakecalc: logging disabled, could not open {}: {}", config.log_path.display(), e);
            return;
        }
    };

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
}
