#[derive(Debug, thiserror::Error)]
pub enum KogitoError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid text: {0}")]
    Text(#[from] kogito_types::TextError),
    #[error("unknown section: {0}")]
    InvalidSection(String),
    #[error("entry source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("entry sink rejected save: {0}")]
    SinkRejected(String),
}

pub type KogitoResult<T> = std::result::Result<T, KogitoError>;
