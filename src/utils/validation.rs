use crate::utils::error::{PrepError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PrepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PrepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        match std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(extension) if allowed_set.contains(extension) => {}
            Some(extension) => {
                return Err(PrepError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
            None => {
                return Err(PrepError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: "File has no extension or invalid filename".to_string(),
                });
            }
        }
    }

    Ok(())
}

pub fn validate_window_hours(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 || value > 8760.0 {
        return Err(PrepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Window must be a positive number of hours, at most one year (8760)"
                .to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PrepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("hypocenters", "data/hypocenters.csv").is_ok());
        assert!(validate_path("hypocenters", "").is_err());
        assert!(validate_path("hypocenters", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_file_extensions() {
        let files = vec!["hypocenters.csv".to_string(), "eruptions.csv".to_string()];
        assert!(validate_file_extensions("sources", &files, &["csv"]).is_ok());

        let invalid_files = vec!["hypocenters.xlsx".to_string()];
        assert!(validate_file_extensions("sources", &invalid_files, &["csv"]).is_err());

        let no_extension = vec!["hypocenters".to_string()];
        assert!(validate_file_extensions("sources", &no_extension, &["csv"]).is_err());
    }

    #[test]
    fn test_validate_window_hours() {
        assert!(validate_window_hours("window_hours", 168.0).is_ok());
        assert!(validate_window_hours("window_hours", 0.0).is_err());
        assert!(validate_window_hours("window_hours", -24.0).is_err());
        assert!(validate_window_hours("window_hours", f64::NAN).is_err());
        assert!(validate_window_hours("window_hours", 10000.0).is_err());
    }
}
