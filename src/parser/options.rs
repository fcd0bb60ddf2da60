//! Loading options and configuration.

/// Options for loading structured documents.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Normalize display text to Unicode NFC
    pub normalize_text: bool,
}

impl LoadOptions {
    /// Create new load options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable strict mode (reject duplicate or misplaced references).
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Enable lenient mode (log inconsistencies and continue).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable NFC normalization of text.
    pub fn with_normalize_text(mut self, normalize: bool) -> Self {
        self.normalize_text = normalize;
        self
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            normalize_text: true,
        }
    }
}

/// Error handling mode during loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on duplicate or misplaced references
    Strict,
    /// Log inconsistencies and continue
    #[default]
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_options_builder() {
        let options = LoadOptions::new().strict().with_normalize_text(false);

        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert!(!options.normalize_text);
    }

    #[test]
    fn test_default_options() {
        let options = LoadOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(options.normalize_text);
    }
}
