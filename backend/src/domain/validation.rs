use super::error::{LedgerError, LedgerResult};

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 256;

/// Trim and check a display name; `entity` is used in the error message
pub fn validate_name(name: &str, entity: &str) -> LedgerResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::validation(format!("{} name cannot be empty", entity)));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(LedgerError::validation(format!(
            "{} name cannot exceed {} characters",
            entity, MAX_NAME_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional free-text description; blank becomes `None`
pub fn normalize_description(description: Option<String>) -> LedgerResult<Option<String>> {
    let Some(text) = description else {
        return Ok(None);
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(LedgerError::validation(format!(
            "Description cannot exceed {} characters",
            MAX_DESCRIPTION_LENGTH
        )));
    }
    Ok(Some(trimmed.to_string()))
}
