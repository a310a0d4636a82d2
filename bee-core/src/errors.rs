use thiserror::Error;

/// Failures caught locally, before anything is sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Words must be at least 4 letters.")]
    WordTooShort,
    #[error("Please enter a player name.")]
    EmptyPlayerName,
    #[error("Please enter a game code.")]
    EmptyGameCode,
    #[error("No game in progress.")]
    NoActiveGame,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LetterError {
    #[error("expected {expected} outer letters, got {actual}")]
    WrongOuterCount { expected: usize, actual: usize },
}
