use thiserror::Error;

use crate::options::OptionError;
use crate::uri::UriError;

/// Represents the type of error an RTMFP session encountered.
///
/// Any of these raised during open aborts the open entirely; no partial
/// session is left usable. None are retried internally. The group to unicast
/// fallback in particular belongs to the transport engine, driven by the
/// `fallbacktimeout` option.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Encountered when an option is unknown, unparsable or out of bounds
    #[error("Invalid session option: {0}")]
    Config(#[from] OptionError),

    /// Encountered when the connection URI cannot be split into an
    /// application and a publication
    #[error("The connection URI could not be resolved: {0}")]
    InvalidUri(#[from] UriError),

    /// Encountered when the transport engine refuses to start connecting
    #[error("The transport engine failed to start a connection")]
    ConnectFailed,

    /// Encountered when the connected event is never observed
    #[error("The transport engine never reported the connection as established")]
    ConnectTimeout,

    /// Encountered when the caller's interrupt fires during a blocking wait.
    /// Kept distinct from the other errors so callers can tell a user abort
    /// from a transport failure.
    #[error("The operation was interrupted by the caller")]
    Interrupted,

    /// Encountered when the selected delivery mode fails to start
    #[error("The '{mode}' delivery mode failed to start")]
    ModeStartFailed { mode: String },

    /// Encountered when the transport engine reports a read or write failure
    #[error("The transport engine reported an I/O failure")]
    IoFailed,
}
