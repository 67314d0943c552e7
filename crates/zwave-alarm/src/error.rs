//! Protocol error types.

use thiserror::Error;

/// Errors that can occur when encoding or decoding Alarm command class frames.
///
/// None of these is fatal at the dispatch layer: the command class turns each
/// one into a log record and a "handled / not handled" result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlarmError {
    /// Frame is too short for the fields being read.
    #[error("frame too short: expected at least {expected} bytes, got {actual}")]
    FrameTooShort {
        /// Expected minimum length.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// First byte does not name a command this class understands.
    #[error("unknown alarm command: 0x{0:02X}")]
    UnknownCommand(u8),

    /// Notification type byte outside the known table.
    #[error("unknown notification type: {0}")]
    UnknownNotificationType(u8),

    /// The command is not defined for the negotiated version.
    #[error("{command} is not defined for command class version {version}")]
    UnsupportedVersion {
        /// Human-readable command name.
        command: &'static str,
        /// Negotiated command class version.
        version: u8,
    },
}

impl AlarmError {
    /// Whether the error only means "this frame belongs to someone else".
    pub fn is_unhandled(&self) -> bool {
        matches!(self, AlarmError::UnknownCommand(_))
    }
}

/// Result type alias for Alarm command class operations.
pub type AlarmResult<T> = Result<T, AlarmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AlarmError::FrameTooShort {
            expected: 3,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "frame too short: expected at least 3 bytes, got 1"
        );
        assert_eq!(
            AlarmError::UnknownCommand(0x42).to_string(),
            "unknown alarm command: 0x42"
        );
    }

    #[test]
    fn test_is_unhandled() {
        assert!(AlarmError::UnknownCommand(0x10).is_unhandled());
        assert!(!AlarmError::UnknownNotificationType(20).is_unhandled());
    }
}
