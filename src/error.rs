use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Terminal error: {source}")]
    TerminalError {
        #[from]
        source: crossterm::ErrorKind,
    },
    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
    #[error("Could not encode data: {source}")]
    EncodingError {
        #[from]
        source: serde_json::Error,
    },
    #[error("Unknown widget `{0}`, expected `snake` or `calc`")]
    UnknownWidget(String),
}
