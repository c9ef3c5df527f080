use serde_json;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

// Enum for handling various application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Character error: {0}")]
    Character(#[from] CharacterError),

    #[error("Save error: {0}")]
    Save(#[from] SaveError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error), // Errors related to data serialization.

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error), // Input/output errors.

    #[error("Input closed")]
    InputClosed, // The player's input stream reached its end.
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CharacterError {
    #[error("Invalid name format! Latin letters only, from 3 to 15 characters")]
    InvalidName(String),

    #[error("No option number {0}")]
    InvalidChoice(usize),
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Cannot save a game without a character name!")]
    MissingName,

    #[error("The save folder is a file: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Cannot create the save folder {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Save not found: {0}")]
    NotFound(String),

    #[error("Corrupted save {name}: {source}")]
    Corrupted {
        name: String,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
