use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum StoreErrKind {
    #[error("io failure: {0}")]
    IoFailed(String),
    #[error("snapshot corrupt: {0}")]
    Corrupt(String),
    #[error("invalid snapshot key: {0}")]
    InvalidKey(String),
}

#[derive(Clone, Debug, Error)]
#[error(transparent)]
pub struct StoreError(pub StoreErrKind);

impl StoreError {
    pub fn new(kind: StoreErrKind) -> Self {
        Self(kind)
    }

    pub fn kind(&self) -> &StoreErrKind {
        &self.0
    }

    pub fn io(err: impl std::fmt::Display) -> Self {
        Self(StoreErrKind::IoFailed(err.to_string()))
    }

    pub fn corrupt(err: impl std::fmt::Display) -> Self {
        Self(StoreErrKind::Corrupt(err.to_string()))
    }
}

impl From<StoreErrKind> for StoreError {
    fn from(kind: StoreErrKind) -> Self {
        StoreError(kind)
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::io(err)
    }
}
