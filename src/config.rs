//! Scanner configuration
//!
//! The scanner has no external configuration surface; these knobs decide the
//! behaviors that are left to the embedding application: whether whitespace
//! runs are reported, whether parenthesis balance is enforced, and what to do
//! with characters no sub-scanner claims.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// What the scanner does with a character it has no rule for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnrecognizedRune {
    /// Emit it as a single-character `Char` token
    #[default]
    Char,
    /// Stop the scan with an error token
    Error,
}

/// Options for a single scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Emit runs of spaces and tabs as `Space` tokens
    pub emit_space: bool,
    /// Report unbalanced parentheses as error tokens
    pub check_parens: bool,
    /// Handling of characters outside the grammar
    pub unrecognized: UnrecognizedRune,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            emit_space: true,
            check_parens: false,
            unrecognized: UnrecognizedRune::Char,
        }
    }
}

impl ScanConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_emit_space(mut self, emit_space: bool) -> Self {
        self.emit_space = emit_space;
        self
    }

    pub fn with_check_parens(mut self, check_parens: bool) -> Self {
        self.check_parens = check_parens;
        self
    }

    pub fn with_unrecognized(mut self, unrecognized: UnrecognizedRune) -> Self {
        self.unrecognized = unrecognized;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::default();
        assert!(config.emit_space);
        assert!(!config.check_parens);
        assert_eq!(config.unrecognized, UnrecognizedRune::Char);
    }

    #[test]
    fn test_from_json_partial() {
        let config = ScanConfig::from_json(r#"{"check_parens": true, "unrecognized": "error"}"#)
            .unwrap();
        assert!(config.emit_space);
        assert!(config.check_parens);
        assert_eq!(config.unrecognized, UnrecognizedRune::Error);
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        let err = ScanConfig::from_json(r#"{"unrecognized": "explode"}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_builder() {
        let config = ScanConfig::default()
            .with_emit_space(false)
            .with_check_parens(true)
            .with_unrecognized(UnrecognizedRune::Error);
        assert!(!config.emit_space);
        assert!(config.check_parens);
        assert_eq!(config.unrecognized, UnrecognizedRune::Error);
    }
}
