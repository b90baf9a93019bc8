use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("declared state dimension {declared} does not match encoder output size {actual}")]
    DimensionMismatch { declared: usize, actual: usize },

    #[error("lane-group index {group} out of range ({group_count} groups declared)")]
    GroupOutOfRange { group: usize, group_count: usize },
}

pub type StateResult<T> = Result<T, StateError>;
