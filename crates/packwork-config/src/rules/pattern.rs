use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// File pattern of a rule.
///
/// Two spellings are accepted:
///
/// - globs starting with `*.` (`*.css`, `*.module.css`) match the file name
///   suffix, with `*` standing for any run of characters except `/`;
/// - anything else is a regular expression searched in the full path
///   (`\.(jpe?g|png|gif)$`).
///
/// Matching ignores ASCII case in both spellings.
///
/// ```
/// use packwork_config::MatchPattern;
///
/// let pattern = MatchPattern::new("*.module.css").unwrap();
/// assert!(pattern.matches("src/button.module.css"));
/// assert!(!pattern.matches("src/button.css"));
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MatchPattern {
    source: String,
    regex: Regex,
}

impl MatchPattern {
    pub fn new(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let expr = if is_glob(&source) {
            glob_to_regex(&source)
        } else {
            source.clone()
        };

        let regex = RegexBuilder::new(&expr)
            .case_insensitive(true)
            .build()
            .map_err(|err| ConfigError::InvalidPattern {
                pattern: source.clone(),
                message: err.to_string(),
            })?;

        Ok(Self { source, regex })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_glob(&self) -> bool {
        is_glob(&self.source)
    }

    /// Test a path. Backslash separators are treated as `/`.
    pub fn matches(&self, path: &str) -> bool {
        if path.contains('\\') {
            self.regex.is_match(&path.replace('\\', "/"))
        } else {
            self.regex.is_match(path)
        }
    }
}

fn is_glob(source: &str) -> bool {
    source.starts_with("*.")
}

fn glob_to_regex(glob: &str) -> String {
    let mut expr = String::with_capacity(glob.len() + 16);
    expr.push_str("(?:^|/)");
    for ch in glob.chars() {
        match ch {
            '*' => expr.push_str("[^/]*"),
            '?' => expr.push_str("[^/]"),
            other => expr.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    expr.push('$');
    expr
}

impl PartialEq for MatchPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for MatchPattern {}

impl fmt::Debug for MatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MatchPattern").field(&self.source).finish()
    }
}

impl fmt::Display for MatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl TryFrom<String> for MatchPattern {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self> {
        MatchPattern::new(value)
    }
}

impl From<MatchPattern> for String {
    fn from(pattern: MatchPattern) -> Self {
        pattern.source
    }
}
