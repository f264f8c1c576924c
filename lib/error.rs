//! Error type shared by all engines and constructors.
//!
//! Every variant describes a contract violation that is detected before any
//! numerical work is done. Numerical degeneracies (zero fields, vanishing
//! travel times) are never reported here; they propagate as ordinary
//! floating-point values.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HhgError {
    #[error("unsupported number of field dimensions {0}; expected 1, 2, or 3")]
    UnsupportedDims(usize),

    #[error("dipole elements built for {model} dimension(s) but the field has {field}")]
    DimsMismatch { model: usize, field: usize },

    #[error("the trajectory model supports only one-dimensional fields, got {0}")]
    TrajectoryDims(usize),

    #[error("{what} has length {len}; expected {expected}")]
    LengthMismatch { what: &'static str, len: usize, expected: usize },

    #[error("weights have length {len}; expected between 1 and {max}")]
    WeightsLength { len: usize, max: usize },

    #[error("time axis is empty")]
    EmptyTimeAxis,

    #[error("time axis is not strictly increasing at index {0}")]
    NonIncreasingTime(usize),

    #[error("invalid momentum grid: {0}")]
    InvalidGrid(String),

    #[error("unknown quantity '{0}'")]
    UnknownQuantity(String),

    #[error("unknown unit target '{0}'; must be SI or SAU")]
    UnknownTarget(String),

    #[error("wavelength must be positive and finite, got {0}")]
    InvalidWavelength(f64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type HhgResult<T> = Result<T, HhgError>;
