//! Reason template snapshot loading
//!
//! The snapshot is a JSON array of templates, the shape the club backend
//! exports:
//!
//! ```json
//! [
//!   {"id": "late", "description": "Late to training", "amount": 5.0, "importance": "high"}
//! ]
//! ```
//!
//! Legacy exports name the description `reason`; that key is accepted too.

use crate::types::{FineError, ReasonTemplate};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Load a template snapshot from a JSON file
///
/// # Errors
///
/// * `FineError::FileNotFound` if nothing exists at `path`
/// * `FineError::IoError` if the file cannot be read
/// * `FineError::ParseError` if the JSON is invalid, including negative
///   amounts and unknown importance values
pub fn load_templates(path: &Path) -> Result<Vec<ReasonTemplate>, FineError> {
    if !path.exists() {
        return Err(FineError::file_not_found(&path.display().to_string()));
    }

    let file = File::open(path)?;
    let templates: Vec<ReasonTemplate> = serde_json::from_reader(BufReader::new(file))?;

    debug!(
        "Loaded {} reason templates from {}",
        templates.len(),
        path.display()
    );

    Ok(templates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Amount, Importance};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_load_templates() {
        let file = create_temp_json(
            r#"[
                {"id": "late", "description": "Late", "amount": 5.5, "importance": "high"},
                {"id": "shirt", "reason": "Forgot shirt", "amount": 1, "importance": "low"}
            ]"#,
        );

        let templates = load_templates(file.path()).unwrap();
        assert_eq!(templates.len(), 2);
        assert_eq!(templates[0].amount, Amount::new(5, 50));
        assert_eq!(templates[0].importance, Importance::High);
        assert_eq!(templates[1].description, "Forgot shirt");
        assert_eq!(templates[1].amount, Amount::new(1, 0));
    }

    #[test]
    fn test_load_templates_missing_file() {
        let result = load_templates(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(FineError::FileNotFound { .. })));
    }

    #[test]
    fn test_load_templates_rejects_negative_amount() {
        let file = create_temp_json(
            r#"[{"id": "late", "description": "Late", "amount": -1.0, "importance": "high"}]"#,
        );
        let result = load_templates(file.path());
        assert!(matches!(result, Err(FineError::ParseError { .. })));
    }

    #[test]
    fn test_load_templates_invalid_json() {
        let file = create_temp_json("{not json");
        assert!(matches!(
            load_templates(file.path()),
            Err(FineError::ParseError { line: Some(1), .. })
        ));
    }
}
