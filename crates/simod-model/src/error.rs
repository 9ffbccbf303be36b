use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("case identifier must not be empty")]
    EmptyCaseId,
    #[error("activity label must not be empty")]
    EmptyActivity,
}

pub type Result<T> = std::result::Result<T, ModelError>;
