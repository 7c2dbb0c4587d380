use alloc::string::String;
use thiserror::Error;

use crate::CardId;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("No card with id {0} in this deck")]
    UnknownCard(CardId),
    #[error("Card {0} is already face up or out of play")]
    CardUnavailable(CardId),
    #[error("Two cards are already face up, waiting for them to resolve")]
    PendingResolution,
    #[error("Game is paused")]
    Paused,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Game is not in progress")]
    NotPlaying,
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Could not encode record: {0}")]
    Serialize(String),
}
