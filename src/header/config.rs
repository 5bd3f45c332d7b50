//! Scraper configuration
//!
//! The in-house header style is enforced through allow-lists rather than a
//! C++ grammar: macros that look like calls but are not methods, and
//! modifier keywords that are skipped when reading declaration prefixes.
//! Configurations can be loaded from JSON so build scripts can extend them.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Set of names with the ahash hasher
pub type NameSet = HashSet<String, ahash::RandomState>;

/// Default maximum nesting depth of class/struct/namespace bodies
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

/// Row prefix that marks a tabular X-macro body
pub const DEFAULT_XMACRO_PREFIX: &str = "_(";

/// Macros that take parentheses inside class bodies but are not methods
pub const DEFAULT_KNOWN_MACROS: &[&str] = &[
    "NO_COPY_SEMANTIC",
    "NO_MOVE_SEMANTIC",
    "DEFAULT_COPY_SEMANTIC",
    "DEFAULT_MOVE_SEMANTIC",
    "DEFAULT_NOEXCEPT_MOVE_SEMANTIC",
    "NO_COPY_OPERATOR",
    "NO_MOVE_OPERATOR",
    "DEFAULT_COPY_CTOR",
    "DEFAULT_MOVE_CTOR",
    "PANDA_PUBLIC_API",
];

/// Modifier keywords skipped when scanning declaration prefixes
pub const DEFAULT_MODIFIERS: &[&str] = &[
    "const",
    "constexpr",
    "explicit",
    "static",
    "virtual",
    "inline",
    "extern",
    "mutable",
    "volatile",
    "friend",
    "override",
    "final",
    "noexcept",
    "[[maybe_unused]]",
    "[[nodiscard]]",
    "[[noreturn]]",
];

/// Configuration for a scraping run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Macro names never treated as methods when called in a body
    pub known_macros: NameSet,

    /// Modifier keywords recognized in declaration prefixes
    pub modifiers: NameSet,

    /// Prefix of the first continued macro line that marks an X-macro
    pub xmacro_prefix: String,

    /// Maximum nesting depth of class/struct/namespace bodies
    pub max_nesting_depth: usize,

    /// File that failed parses are appended to
    pub error_log: Option<PathBuf>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            known_macros: DEFAULT_KNOWN_MACROS.iter().map(|s| s.to_string()).collect(),
            modifiers: DEFAULT_MODIFIERS.iter().map(|s| s.to_string()).collect(),
            xmacro_prefix: DEFAULT_XMACRO_PREFIX.to_string(),
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            error_log: None,
        }
    }
}

impl ScraperConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a macro to the known-macro allow-list
    pub fn with_known_macro(mut self, name: impl Into<String>) -> Self {
        self.known_macros.insert(name.into());
        self
    }

    /// Add a modifier keyword
    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.insert(modifier.into());
        self
    }

    /// Set the X-macro row prefix
    pub fn with_xmacro_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.xmacro_prefix = prefix.into();
        self
    }

    /// Set the maximum nesting depth
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Set the persistent error log location
    pub fn with_error_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.error_log = Some(path.into());
        self
    }

    /// Whether `name` is an allow-listed macro
    #[inline]
    pub fn is_known_macro(&self, name: &str) -> bool {
        self.known_macros.contains(name)
    }

    /// Whether `word` is a recognized modifier
    #[inline]
    pub fn is_modifier(&self, word: &str) -> bool {
        self.modifiers.contains(word)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON; missing fields take their defaults
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allow_lists() {
        let config = ScraperConfig::default();
        assert!(config.is_known_macro("NO_COPY_SEMANTIC"));
        assert!(!config.is_known_macro("GetName"));
        assert!(config.is_modifier("[[nodiscard]]"));
        assert!(config.is_modifier("constexpr"));
        assert_eq!(config.xmacro_prefix, "_(");
        assert_eq!(config.max_nesting_depth, DEFAULT_MAX_NESTING_DEPTH);
    }

    #[test]
    fn test_builder() {
        let config = ScraperConfig::new()
            .with_known_macro("ACCESSORS")
            .with_modifier("PANDA_EXPORT")
            .with_xmacro_prefix("X(")
            .with_max_nesting_depth(8)
            .with_error_log("/tmp/errors.log");

        assert!(config.is_known_macro("ACCESSORS"));
        assert!(config.is_modifier("PANDA_EXPORT"));
        assert_eq!(config.xmacro_prefix, "X(");
        assert_eq!(config.max_nesting_depth, 8);
        assert_eq!(config.error_log, Some(PathBuf::from("/tmp/errors.log")));
    }

    #[test]
    fn test_json_partial_uses_defaults() {
        let config = ScraperConfig::from_json(r#"{"max_nesting_depth": 4}"#).unwrap();
        assert_eq!(config.max_nesting_depth, 4);
        assert!(config.is_known_macro("NO_MOVE_SEMANTIC"));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = ScraperConfig::new().with_known_macro("FOO");
        let json = config.to_json().unwrap();
        assert_eq!(ScraperConfig::from_json(&json).unwrap(), config);
    }
}
