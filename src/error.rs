//! Error types for the engine and its front-end.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config file error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("{0}")]
    Options(#[from] getopts::Fail),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
