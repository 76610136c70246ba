//! Error types for the scaling benchmark

use haar::HaarError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("unitary generation failed: {0}")]
    Haar(#[from] HaarError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid schedule: {0}")]
    Schedule(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("worker: {0}")]
    Worker(String),
}

pub type Result<T> = std::result::Result<T, BenchError>;
