use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Snapshot blob is not a two-field cache structure")]
    MalformedBlob,
    #[error("More than one dormant snapshot resolves to the same cell")]
    DuplicateUnloadedCache,
}

pub type Result<T> = core::result::Result<T, GameError>;
