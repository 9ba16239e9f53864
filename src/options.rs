//! Analysis options and configuration.

/// Options for analyzing a manuscript.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Whether to scan sentences in parallel
    pub parallel: bool,

    /// Normalize input to Unicode NFC before scanning
    pub normalize_unicode: bool,

    /// Characters of surrounding text kept with each citation (0 = none)
    pub context_chars: usize,
}

impl AnalyzeOptions {
    /// Create new analyze options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable NFC normalization.
    pub fn with_normalize_unicode(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Set how many characters of context to keep around each citation.
    pub fn with_context_chars(mut self, chars: usize) -> Self {
        self.context_chars = chars;
        self
    }
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            normalize_unicode: true,
            context_chars: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_options_builder() {
        let options = AnalyzeOptions::new()
            .sequential()
            .with_normalize_unicode(false)
            .with_context_chars(0);

        assert!(!options.parallel);
        assert!(!options.normalize_unicode);
        assert_eq!(options.context_chars, 0);
    }

    #[test]
    fn test_default_options() {
        let options = AnalyzeOptions::default();
        assert!(options.parallel);
        assert!(options.normalize_unicode);
        assert_eq!(options.context_chars, 50);
    }
}
