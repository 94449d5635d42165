use crate::ConfigError;
use regex::Regex;

/// Compiles `pattern` so that it only matches a whole input, never a substring
///
/// # Examples
///
/// ```
/// use wordtide::url::compile_full_match;
///
/// let re = compile_full_match("https://example\\.com/a.*").unwrap();
/// assert!(re.is_match("https://example.com/about"));
/// assert!(!re.is_match("xhttps://example.com/about"));
/// ```
pub fn compile_full_match(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(&format!("^(?:{})$", pattern))
        .map_err(|e| ConfigError::InvalidPattern(format!("'{}': {}", pattern, e)))
}

/// A set of regular expressions tested with full-match semantics
///
/// Used both for ignored URLs and for ignored words: an input is suppressed only when some
/// pattern matches the entire input.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compiles every pattern, failing on the first invalid one
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ConfigError> {
        let patterns = patterns
            .iter()
            .map(|p| compile_full_match(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Returns true if any pattern matches all of `candidate`
    pub fn matches(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(candidate))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}
