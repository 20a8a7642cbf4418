//! Output types for verex commands
//!
//! All output structures are designed to be JSON-first.

use serde::Serialize;

use verex::Match;

/// Result of `verex build`
#[derive(Debug, Clone, Serialize)]
pub struct BuildResult {
    /// Prefix, body and suffix
    pub pattern: String,
    /// `^` or empty
    pub prefix: String,
    /// Body between the anchors
    pub source: String,
    /// `$` or empty
    pub suffix: String,
    /// Modifier letters
    pub flags: String,
    /// Literal notation, `/pattern/flags`
    pub display: String,
    /// Capture groups opened but not closed
    pub open_captures: usize,
    /// Whether the engine accepted the pattern
    pub valid: bool,
    /// Engine that compiled the pattern
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    /// The engine's error message when compilation failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of `verex test`
#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    /// The pattern that was tested
    pub pattern: String,
    /// Modifier letters
    pub flags: String,
    /// Which engine was used (regex or fancy-regex)
    pub engine: String,
    /// Length of input in bytes
    pub input_length: usize,
    /// Whether any match was found
    pub matched: bool,
    /// Number of matches found
    pub match_count: usize,
    /// All matches when global, otherwise the first
    pub matches: Vec<Match>,
}

/// Result of `verex replace`
#[derive(Debug, Clone, Serialize)]
pub struct ReplaceResult {
    /// The pattern that was used
    pub pattern: String,
    /// Modifier letters
    pub flags: String,
    /// The replacement string
    pub replacement: String,
    /// Original input
    pub original: String,
    /// Result after replacement
    pub result: String,
    /// Whether every match was replaced
    pub global: bool,
    /// Number of matches that were replaced
    pub replacements_made: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Always true for errors
    pub error: bool,
    /// Error code
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: true,
            code: code.into(),
            message: message.into(),
        }
    }
}
