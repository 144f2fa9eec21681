//! Error taxonomy shared by the core and the platform backends

use thiserror::Error;

/// Windowing errors
///
/// Callers can distinguish user-input problems (`InvalidTitle`) from
/// resource exhaustion (`OutOfMemory`) and from failures inside the host
/// platform or graphics driver.
#[derive(Error, Debug)]
pub enum SashError {
    /// A buffer reservation failed. Queue contents are preserved when this
    /// is returned from a growth attempt.
    #[error("allocation failed: {0}")]
    OutOfMemory(#[from] std::collections::TryReserveError),

    /// The requested window title contains an interior NUL byte and cannot
    /// cross the native string boundary.
    #[error("window title contains an interior nul byte")]
    InvalidTitle,

    /// The host windowing system reported a failure.
    #[error("platform error: {0}")]
    Platform(String),

    /// The graphics layer reported a failure.
    #[error("graphics error: {0}")]
    Graphics(String),
}

/// Convenience alias used throughout the crate
pub type SashResult<T> = Result<T, SashError>;
