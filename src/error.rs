//! Error type for mounting and rendering.
//!
//! Rejected keystrokes are not errors: the widget silently declines to
//! propose a new code. Errors only come from invalid props and terminal I/O.

use thiserror::Error;

/// Errors raised while mounting or rendering OTP components.
#[derive(Debug, Error)]
pub enum OtpError {
    /// A field count of zero was requested.
    #[error("an OTP input needs at least one field (got {0})")]
    InvalidLength(usize),

    /// Writing to the terminal failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = OtpError::InvalidLength(0);
        assert_eq!(err.to_string(), "an OTP input needs at least one field (got 0)");

        let io = std::io::Error::other("closed");
        let err: OtpError = io.into();
        assert!(matches!(err, OtpError::Io(_)));
        assert!(err.to_string().contains("closed"));
    }
}
