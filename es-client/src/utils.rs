//! Name validation shared by the facade.
//!
//! Elasticsearch enforces these rules itself; checking them locally turns an empty or
//! malformed name into a `ValidationError` instead of a confusing remote failure.

use crate::errors::SearchClientError;

/// Characters Elasticsearch forbids in index and alias names.
const FORBIDDEN_NAME_CHARS: &[char] = &['\\', '/', '*', '?', '"', '<', '>', '|', ' ', ',', '#', ':'];

/// Maximum length of an index or alias name in bytes.
const MAX_NAME_BYTES: usize = 255;

/// Validate an index name, alias name or index-pattern prefix.
///
/// Names must be non-empty lowercase strings of at most 255 bytes that do not start
/// with `-`, `_` or `+`, are not `.` or `..`, and contain none of
/// `\ / * ? " < > | , # :` or spaces.
///
/// # Example
///
/// ```
/// use es_client::validate_index_name;
///
/// assert!(validate_index_name("index", "orders-2024").is_ok());
/// assert!(validate_index_name("index", "Orders").is_err());
/// ```
pub fn validate_index_name(field_name: &str, value: &str) -> Result<(), SearchClientError> {
    if value.is_empty() {
        return Err(SearchClientError::validation(format!(
            "{} is required",
            field_name
        )));
    }
    if value.len() > MAX_NAME_BYTES {
        return Err(SearchClientError::validation(format!(
            "{} must be at most {} bytes",
            field_name, MAX_NAME_BYTES
        )));
    }
    if value == "." || value == ".." {
        return Err(SearchClientError::validation(format!(
            "{} cannot be '{}'",
            field_name, value
        )));
    }
    if value.starts_with(['-', '_', '+']) {
        return Err(SearchClientError::validation(format!(
            "{} '{}' cannot start with '-', '_' or '+'",
            field_name, value
        )));
    }
    if value.chars().any(|c| c.is_uppercase()) {
        return Err(SearchClientError::validation(format!(
            "{} '{}' must be lowercase",
            field_name, value
        )));
    }
    if let Some(c) = value.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
        return Err(SearchClientError::validation(format!(
            "{} '{}' contains invalid character '{}'",
            field_name, value, c
        )));
    }
    Ok(())
}

/// Validate an index template name.
///
/// Template names may contain uppercase letters but must be non-empty and free of
/// path separators, wildcards and whitespace.
pub fn validate_template_name(value: &str) -> Result<(), SearchClientError> {
    if value.is_empty() {
        return Err(SearchClientError::validation("template name is required"));
    }
    if let Some(c) = value
        .chars()
        .find(|c| c.is_whitespace() || FORBIDDEN_NAME_CHARS.contains(c))
    {
        return Err(SearchClientError::validation(format!(
            "template name '{}' contains invalid character '{}'",
            value, c
        )));
    }
    Ok(())
}
