//! Result type alias for Redactor

use super::errors::RedactorError;

/// Result type alias for Redactor operations
///
/// # Examples
///
/// ```
/// use redactor::domain::result::Result;
/// use redactor::domain::errors::RedactorError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(RedactorError::InvalidInput("empty document".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, RedactorError>;
