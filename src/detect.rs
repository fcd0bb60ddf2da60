//! Input format detection.

use crate::error::{Error, Result};
use std::path::Path;

/// Top-level keys every structured document must carry.
pub const REQUIRED_KEYS: [&str; 5] = ["body", "groups", "texts", "pictures", "tables"];

/// Information about a detected structured document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocFormat {
    /// Schema name (e.g., "DoclingDocument"), if declared
    pub schema_name: Option<String>,
    /// Schema version (e.g., "1.3.0"), if declared
    pub version: Option<String>,
}

impl std::fmt::Display for DocFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self.schema_name.as_deref().unwrap_or("structured document");
        match self.version {
            Some(ref version) => write!(f, "{} {}", name, version),
            None => f.write_str(name),
        }
    }
}

/// Detect the document format from a file path.
///
/// # Example
/// ```no_run
/// use docpair::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("report.json").unwrap();
/// println!("Schema: {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<DocFormat> {
    let data = std::fs::read(path)?;
    detect_format_from_bytes(&data)
}

/// Detect the document format from bytes.
///
/// # Returns
/// * `Ok(DocFormat)` if the data is a JSON object with every required key
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<DocFormat> {
    let value: serde_json::Value =
        serde_json::from_slice(data).map_err(|_| Error::UnknownFormat)?;
    let object = value.as_object().ok_or(Error::UnknownFormat)?;

    if !REQUIRED_KEYS.iter().all(|key| object.contains_key(*key)) {
        return Err(Error::UnknownFormat);
    }

    let string_field = |key: &str| {
        object
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::to_string)
    };

    Ok(DocFormat {
        schema_name: string_field("schema_name"),
        version: string_field("version"),
    })
}

/// Check if a file is a structured document.
pub fn is_document<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes represent a structured document.
pub fn is_document_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r##"{"schema_name":"DoclingDocument","version":"1.3.0",
        "body":{"self_ref":"#/body"},"groups":[],"texts":[],"pictures":[],"tables":[]}"##;

    #[test]
    fn test_detect_valid_document() {
        let format = detect_format_from_bytes(VALID.as_bytes()).unwrap();
        assert_eq!(format.schema_name.as_deref(), Some("DoclingDocument"));
        assert_eq!(format.version.as_deref(), Some("1.3.0"));
        assert_eq!(format.to_string(), "DoclingDocument 1.3.0");
    }

    #[test]
    fn test_detect_without_schema_name() {
        let data = br##"{"body":{},"groups":[],"texts":[],"pictures":[],"tables":[]}"##;
        let format = detect_format_from_bytes(data).unwrap();
        assert_eq!(format.schema_name, None);
        assert_eq!(format.to_string(), "structured document");
    }

    #[test]
    fn test_detect_missing_key() {
        let data = br#"{"body":{},"groups":[],"texts":[],"pictures":[]}"#;
        assert!(matches!(
            detect_format_from_bytes(data),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_detect_invalid_format() {
        assert!(matches!(
            detect_format_from_bytes(b"%PDF-1.7"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(
            detect_format_from_bytes(b"[1,2]"),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_is_document_bytes() {
        assert!(is_document_bytes(VALID.as_bytes()));
        assert!(!is_document_bytes(b"Not JSON"));
    }
}
