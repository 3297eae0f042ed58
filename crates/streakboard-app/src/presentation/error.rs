use serde::{Deserialize, Serialize};
use streakboard_domain::shared::{DomainError, ErrorCode, ErrorSeverity};

/// Structured error reported by the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandError {
    /// Numeric error code (2xxx-6xxx range)
    pub code: u16,

    pub message: String,

    pub severity: ErrorSeverity,

    /// Whether the operation can be retried
    pub recoverable: bool,
}

impl CommandError {
    pub fn from_code(error_code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: error_code.code(),
            message: message.into(),
            severity: error_code.severity(),
            recoverable: error_code.is_recoverable(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::InfrastructureError, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::InvalidInput, message)
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self.code {
            2000..=2999 => 3,
            3000..=3999 => 4,
            6000..=6999 => 2,
            _ => 1,
        }
    }
}

impl From<DomainError> for CommandError {
    fn from(err: DomainError) -> Self {
        Self {
            code: err.code().code(),
            message: err.to_string(),
            severity: err.severity(),
            recoverable: err.is_recoverable(),
        }
    }
}

impl From<anyhow::Error> for CommandError {
    fn from(err: anyhow::Error) -> Self {
        Self::infrastructure(format!("{:#}", err))
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        Self::from_code(ErrorCode::SerializationError, err.to_string())
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for CommandError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_domain_error_keeps_code() {
        let err: CommandError = DomainError::AlreadyCompleted("Read".to_string()).into();

        assert_eq!(err.code, 3001);
        assert_eq!(err.severity, ErrorSeverity::Warning);
        assert!(!err.recoverable);
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().starts_with("[3001] "));
    }

    #[test]
    fn test_infrastructure_error_is_recoverable() {
        let err = CommandError::infrastructure("disk gone");

        assert_eq!(err.code, 5001);
        assert!(err.recoverable);
        assert_eq!(err.exit_code(), 1);
    }
}
