use thiserror::Error;

/// Domain error taxonomy. Anything outside these three is wrapped in
/// `anyhow` context at the service layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EloCampError {
    #[error("invalid set token '{token}'; use A-B or A-B[kind], e.g. 6-3, 7-6, 10-8[tiebreak]")]
    InvalidSetToken { token: String },

    #[error("player '{name}' already exists")]
    DuplicatePlayer { name: String },

    #[error("player '{name}' not found")]
    PlayerNotFound { name: String },
}
