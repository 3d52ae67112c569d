//! Generic error types for SDK queries.

use std::time::Duration;

use meridian_core::string_encoding::DecodeError;
use thiserror::Error;

/// The standard Result type that query dispatchers return.
pub type Result<T> = std::result::Result<T, Error>;

/// General error interface for anything that may go wrong while shaping or
/// dispatching a query.
///
/// Exactly one of the three kinds is ever produced per call: a parameter was
/// rejected before the network was touched, the call's deadline elapsed, or
/// the channel reported a failure. Nothing is retried or swallowed here;
/// retry policy belongs to the embedding session.
#[derive(Error, Debug)]
pub enum Error {
    /// A supplied parameter failed validation; no request was sent
    #[error("Invalid query parameter: {0}")]
    Validation(#[from] ValidationError),
    /// The call's deadline elapsed before the node answered
    #[error("{0}")]
    Timeout(#[from] TimeoutError),
    /// Errors reported by the remote procedure channel
    #[error("Querying error: {0}")]
    Query(#[from] QueryError),
}

/// Errors raised strictly before any network access.
///
/// Always recoverable by the caller: fix the input and retry.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// An address parameter failed decoding for its namespace
    #[error("Invalid address in `{param}`: {error}")]
    Address {
        /// Name of the rejected parameter.
        param: &'static str,
        /// The underlying decode failure.
        error: DecodeError,
    },
    /// A height parameter referenced the unaddressable block 0
    #[error("Invalid height in `{param}`: block 0 is not addressable")]
    ZeroHeight {
        /// Name of the rejected parameter.
        param: &'static str,
    },
}

/// The execution scope's deadline elapsed before the remote call completed.
///
/// The in-flight call was signalled to abort; it is not retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("The query timed out after {timeout:?}")]
pub struct TimeoutError {
    /// The timeout the call was configured with.
    pub timeout: Duration,
}

/// Errors that deal with querying the remote node.
#[derive(Error, Debug, Clone)]
pub enum QueryError {
    /// Error that corresponds to not receiving any response
    #[error("No response given in the query: {0}")]
    NoResponse(String),
    /// Error that corresponds to a general error
    #[error("Error in the query: {0}")]
    General(String),
}
