use streakboard_domain::shared::DomainError;

/// Extension trait for Result types to simplify error handling
pub trait ResultExt<T, E> {
    /// Convert error to DomainError::Infrastructure
    fn to_infra_err(self) -> Result<T, DomainError>;

    /// Convert error to DomainError::Repository prefixed with what was being done
    fn with_context(self, context: &str) -> Result<T, DomainError>;
}

impl<T, E: std::fmt::Display> ResultExt<T, E> for Result<T, E> {
    fn to_infra_err(self) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Infrastructure(e.to_string()))
    }

    fn with_context(self, context: &str) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Repository(format!("{}: {}", context, e)))
    }
}
