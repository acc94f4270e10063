//! Input validation for configuration values and credential fields.

use crate::error::{CliError, StoreError};

/// Validate that a server URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments("URL cannot be empty".to_string()).into());
    }

    // Server URL only; credential URLs are free text
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        ))
        .into());
    }

    Ok(())
}

/// Validate the username of a credential entry
pub fn validate_username(username: &str) -> Result<(), StoreError> {
    if username.trim().is_empty() {
        return Err(StoreError::Validation {
            field: "username".to_string(),
            message: "Username cannot be empty".to_string(),
        });
    }
    Ok(())
}

/// Validate an endpoint path from the configuration
pub fn validate_endpoint_path(path: &str) -> crate::Result<()> {
    if !path.starts_with('/') {
        return Err(CliError::InvalidArguments(format!(
            "Invalid endpoint '{}': path must start with '/'",
            path
        ))
        .into());
    }
    Ok(())
}
