//! Input checks applied before any create or update

use super::error::ValidationError;

/// Reject empty or whitespace-only `name`, then `content` when given
pub fn validate(name: &str, content: Option<&str>) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if let Some(content) = content {
        if content.trim().is_empty() {
            return Err(ValidationError::EmptyContent);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name() {
        assert_eq!(validate("", Some("x")), Err(ValidationError::EmptyName));
        assert_eq!(validate("   ", Some("x")), Err(ValidationError::EmptyName));
        assert_eq!(validate("\n\t", None), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(validate("x", Some("")), Err(ValidationError::EmptyContent));
        assert_eq!(validate("x", Some("  \n")), Err(ValidationError::EmptyContent));
    }

    #[test]
    fn test_name_checked_before_content() {
        assert_eq!(validate("", Some("")), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_valid() {
        assert_eq!(validate("list", Some("ls -la")), Ok(()));
        assert_eq!(validate("Docker", None), Ok(()));
    }
}
