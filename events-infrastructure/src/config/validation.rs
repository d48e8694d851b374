use anyhow::{anyhow, Result};

/// Table names are 3 to 255 characters of `[A-Za-z0-9_.-]`.
pub fn validate_table_name(value: &str) -> Result<()> {
    let len = value.chars().count();
    if !(3..=255).contains(&len) {
        return Err(anyhow!("table_name must be 3 to 255 characters, got {}", len));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
    {
        return Err(anyhow!("table_name contains invalid characters: {}", value));
    }
    Ok(())
}

pub fn validate_region(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("region must not be empty"));
    }
    Ok(())
}
