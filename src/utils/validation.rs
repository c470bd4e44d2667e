use crate::utils::error::{Result, ShelfError};
use std::path::{Component, Path, PathBuf};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let raw = path.to_string_lossy();

    if raw.is_empty() {
        return Err(ShelfError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: raw.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if raw.contains('\0') {
        return Err(ShelfError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: raw.replace('\0', "\\0"),
            reason: "Path contains null bytes".to_string(),
        });
    }

    // ${VAR} 未被替換，代表環境變數不存在
    if raw.contains("${") {
        return Err(ShelfError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: raw.to_string(),
            reason: "Path references an environment variable that is not set".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ShelfError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_threshold(field_name: &str, megabytes: f64) -> Result<()> {
    if !megabytes.is_finite() || megabytes <= 0.0 {
        return Err(ShelfError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: megabytes.to_string(),
            reason: "Threshold must be a positive number of megabytes".to_string(),
        });
    }
    Ok(())
}

/// 存在的路徑取 canonical 形式，否則只去掉 `.` 並解析 `..`
fn normalize_dir(path: &Path) -> PathBuf {
    if let Ok(canonical) = std::fs::canonicalize(path) {
        return canonical;
    }

    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

pub fn validate_distinct_dirs(source: &Path, destination: &Path) -> Result<()> {
    if normalize_dir(source) == normalize_dir(destination) {
        return Err(ShelfError::ConfigValidationError {
            field: "destination".to_string(),
            message: format!(
                "Destination must differ from source ({})",
                source.display()
            ),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ShelfError::MissingConfigError {
        field: field_name.to_string(),
    })
}
