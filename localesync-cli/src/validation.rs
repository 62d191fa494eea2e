use std::path::Path;

/// Validate directory path exists and is a directory
pub fn validate_dir_path(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("Directory does not exist: {}", path.display()));
    }

    if !path.is_dir() {
        return Err(format!("Path is not a directory: {}", path.display()));
    }

    Ok(())
}

/// Validate output directory exists or can be created
pub fn validate_output_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if let Some(parent) = path_obj.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Cannot create output directory: {}", e))?;
    }

    Ok(())
}

/// Validate language code format (BCP 47, same rules as the lib crate)
pub fn validate_language_code(lang: &str) -> Result<(), String> {
    localesync::types::validate_language_code(lang).map_err(|e| e.to_string())
}
