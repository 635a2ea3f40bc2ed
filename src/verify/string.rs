use crate::verify::error::VerifyError;

/// Check that a string has non-whitespace content
pub fn is_not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Fail with `InvalidArgument` naming `name` if the string is blank
pub fn ensure_not_blank(value: &str, name: &'static str) -> Result<(), VerifyError> {
    if is_not_blank(value) {
        Ok(())
    } else {
        Err(VerifyError::invalid(name, "must not be empty or whitespace"))
    }
}
