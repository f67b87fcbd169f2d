use std::time::Duration;
use thiserror::Error;

/// Errors a [`Sink`] may report from [`Sink::emit`].
///
/// The bridge hands them back to the caller of [`LogBridge::handle`] as they
/// were returned; it neither retries nor rewrites them.
///
/// [`Sink`]: crate::sink::Sink
/// [`Sink::emit`]: crate::sink::Sink::emit
/// [`LogBridge::handle`]: crate::LogBridge::handle
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EmitError {
    /// The sink has been shut down and no longer accepts records.
    #[error("Sink already shutdown")]
    AlreadyShutdown,

    /// The sink did not accept the record in time.
    #[error("Emit timed out after {} ms", .0.as_millis())]
    Timeout(Duration),

    /// Emitting failed for a reason described by the message.
    #[error("Emit failed: {0}")]
    InternalFailure(String),

    /// Any other error raised by the sink.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// Result of [`Sink::emit`] and [`LogBridge::handle`].
///
/// [`Sink::emit`]: crate::sink::Sink::emit
/// [`LogBridge::handle`]: crate::LogBridge::handle
pub type EmitResult = Result<(), EmitError>;
