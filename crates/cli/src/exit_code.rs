//! Process exit codes for s3t
//!
//! Scripts depend on these values. Never renumber an existing code.

/// Exit codes for the s3t binary.
///
/// A task that declines to proceed (an existing object or local file, a
/// refused confirmation) still exits non-zero so scripts can tell it apart
/// from success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,

    /// General/unspecified error, including a declined confirmation
    GeneralError = 1,

    /// Invalid arguments, path, pattern or style
    UsageError = 2,

    /// Remote service or network failure
    NetworkError = 3,

    /// Authentication or permission failure
    AuthError = 4,

    /// Bucket, object, local file or profile does not exist
    NotFound = 5,

    /// Refused to overwrite an existing object, local file or profile
    Conflict = 6,

    /// Ctrl+C
    Interrupted = 130,
}

impl ExitCode {
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<&s3t_core::Error> for ExitCode {
    fn from(err: &s3t_core::Error) -> Self {
        match err.exit_code() {
            2 => Self::UsageError,
            3 => Self::NetworkError,
            4 => Self::AuthError,
            5 => Self::NotFound,
            6 => Self::Conflict,
            _ => Self::GeneralError,
        }
    }
}
