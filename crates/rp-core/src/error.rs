use thiserror::Error;

/// Everything that can end one generation attempt early.
///
/// Each variant's `Display` form is the user-facing message; nothing is
/// retried automatically within an attempt.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The uploaded file could not be decoded or re-encoded.
    #[error("{0}")]
    InvalidImage(String),

    /// The relay or provider rejected job creation.
    #[error("{0}")]
    Submission(String),

    /// A status check failed at the transport level; polling stops.
    #[error("{0}")]
    PollingTransport(String),

    /// The provider reported the job as failed.
    #[error("{0}")]
    JobFailed(String),

    #[error("Processing was canceled")]
    Canceled,

    /// Terminal success without a result reference.
    #[error("No output received from AI")]
    NoOutput,

    /// Polling budget exhausted before a terminal state.
    #[error("Processing timed out. Please try again with a different image.")]
    Timeout,
}
