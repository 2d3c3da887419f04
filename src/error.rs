//! Error types for the rhythm analysis library
//!
//! Failures are grouped by pipeline stage so callers can tell a bad argument
//! from a decode problem or an analysis-backend failure. The C boundary
//! collapses all of these to a 0/1 status; the Rust API keeps them intact.

use thiserror::Error;

/// Errors produced by the analysis engine and its plumbing
#[derive(Error, Debug)]
pub enum AnalyzeError {
    /// Analysis was requested before the library was initialized
    #[error("analysis engine not initialized")]
    NotInitialized,

    /// Caller-supplied input rejected before any work was done
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Audio file could not be opened, probed, or decoded
    #[error("audio decode error: {0}")]
    Decode(String),

    /// Sample rate conversion to the analysis rate failed
    #[error("resample error: {0}")]
    Resample(String),

    /// The rhythm extraction backend reported a failure
    #[error("rhythm analysis error: {0}")]
    Analysis(String),
}
