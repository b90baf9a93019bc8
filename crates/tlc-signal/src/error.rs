use thiserror::Error;

use tlc_core::TlcError;

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("yellow_duration ({yellow}) must be strictly less than green_duration ({green})")]
    YellowNotShorterThanGreen { yellow: u32, green: u32 },

    #[error(transparent)]
    Core(#[from] TlcError),
}

pub type SignalResult<T> = Result<T, SignalError>;
