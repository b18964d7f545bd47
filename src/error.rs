use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop a run or a training session before any computation.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("invalid network topology: {0}")]
    InvalidTopology(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("weights file {} does not exist, running/training will not be executed", .0.display())]
    WeightFileMissing(PathBuf),

    #[error("loaded weights {found:?} do not match the network configuration {expected:?}")]
    WeightTopologyMismatch { expected: Vec<usize>, found: Vec<i32> },

    #[error("case file {} does not exist, running/training will not be executed", .0.display())]
    CaseFileMissing(PathBuf),

    #[error("{file}:{line}: {reason}")]
    MalformedCase {
        file: String,
        line: usize,
        reason: String,
    },

    #[error("{file} holds {found} cases, expected {expected}")]
    TooFewCases {
        file: String,
        expected: usize,
        found: usize,
    },

    #[error("the number of test cases must be positive")]
    InvalidCaseCount,

    #[error("training requires expected outputs for every case")]
    MissingExpectedOutputs,

    #[error("value {0} cannot be represented by the network item type")]
    NumericConversion(f64),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
