//! Errors
//!
//! Custom error types used throughout the `sapling` crate.
use thiserror::Error;

/// Errors that can occur while building or querying a decision tree.
#[derive(Debug, Error, PartialEq)]
pub enum SaplingError {
    /// An argument violates the documented preconditions of the call.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// A record does not carry a feature that is needed.
    #[error("Feature {0} is missing from the record.")]
    MissingFeature(String),
    /// A statistic was requested over zero rows.
    #[error("Unable to compute the {0} of an empty set of records.")]
    EmptyResult(String),
    /// Invalid value parsing.
    #[error("Invalid value {0} passed for {1}, expected one of {2}.")]
    ParseString(String, String, String),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
    /// The training thread pool could not be created.
    #[error("Unable to build the training thread pool: {0}")]
    ThreadPool(String),
    /// Unable to read a configuration.
    #[error("Unable to read configuration: {0}")]
    UnableToRead(String),
    /// Unable to write a configuration.
    #[error("Unable to write configuration: {0}")]
    UnableToWrite(String),
}
