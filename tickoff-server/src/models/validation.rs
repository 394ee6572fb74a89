//! Validation error types

/// Validation error for user-supplied fields
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Field is outside its allowed character count (after trimming)
    #[error("{field} must be between {min} and {max} characters.")]
    Length {
        field: &'static str,
        min: usize,
        max: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::Length {
            field: "The list title",
            min: 1,
            max: 100,
        };
        assert_eq!(
            err.to_string(),
            "The list title must be between 1 and 100 characters."
        );
    }
}
