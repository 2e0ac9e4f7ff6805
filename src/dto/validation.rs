//! Validation helpers for DTOs.

use validator::ValidationError;

const MAX_IDENTIFIER_LEN: usize = 128;

/// Validates a show or question identifier.
///
/// Identifiers end up in document ids and file keys, so they are restricted to
/// ASCII letters, digits, `_` and `-`.
///
/// # Examples
///
/// ```ignore
/// validate_identifier("detectivul_din_canapea") // Ok
/// validate_identifier("q-12")                   // Ok
/// validate_identifier("")                       // Err - empty
/// validate_identifier("show::q1")               // Err - separator
/// ```
pub fn validate_identifier(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() || id.len() > MAX_IDENTIFIER_LEN {
        let mut err = ValidationError::new("identifier_length");
        err.message = Some(
            format!("Identifier must be 1 to {MAX_IDENTIFIER_LEN} characters (got {})", id.len())
                .into(),
        );
        return Err(err);
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        let mut err = ValidationError::new("identifier_format");
        err.message =
            Some("Identifier must contain only ASCII letters, digits, '_' or '-'".into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier_valid() {
        assert!(validate_identifier("detectivul_din_canapea").is_ok());
        assert!(validate_identifier("q1").is_ok());
        assert!(validate_identifier("master-chef-2").is_ok());
    }

    #[test]
    fn test_validate_identifier_invalid_length() {
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier(&"a".repeat(MAX_IDENTIFIER_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_identifier_invalid_format() {
        assert!(validate_identifier("show::q1").is_err()); // couch separator
        assert!(validate_identifier("q 1").is_err()); // space
        assert!(validate_identifier("../etc").is_err()); // path
        assert!(validate_identifier("întrebare").is_err()); // non ascii
    }
}
