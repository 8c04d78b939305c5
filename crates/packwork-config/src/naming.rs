//! Output file naming.
//!
//! Names are produced from templates such as `[name].[chunkhash].js` by
//! substituting bracketed tokens. Recognized tokens:
//!
//! | token           | value                                        |
//! |-----------------|----------------------------------------------|
//! | `[name]`        | entry or file stem                           |
//! | `[ext]`         | extension without the dot                    |
//! | `[path]`        | source directory with a trailing `/`         |
//! | `[id]`          | chunk id                                     |
//! | `[hash]`        | build hash                                   |
//! | `[chunkhash]`   | hash of the chunk                            |
//! | `[contenthash]` | hash of the emitted content                  |
//!
//! Hash tokens take an optional length, `[contenthash:8]`. A length that
//! does not fit in a `usize` leaves the token as written.
//!
//! Unknown tokens, and known tokens the context has no value for, are left
//! in the output as written. Templates may therefore contain literal
//! bracketed text.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use sha2::{Digest, Sha256};

static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([a-z]+)(?::([0-9]+))?\]").expect("token pattern is valid")
});

/// Values available to [`render_name`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameContext {
    pub name: Option<String>,
    pub ext: Option<String>,
    pub path: Option<String>,
    pub id: Option<String>,
    pub hash: Option<String>,
    pub chunkhash: Option<String>,
    pub contenthash: Option<String>,
}

impl NameContext {
    /// Empty context; every token is left as written.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for emitting a source file: `name`, `ext`, `path` and
    /// `contenthash` are filled from the path and the file bytes.
    ///
    /// ```
    /// use packwork_config::{render_name, NameContext};
    ///
    /// let ctx = NameContext::for_asset("src/images/slack.jpg", b"jpeg bytes");
    /// assert_eq!(render_name("[path][name].[ext]", &ctx), "src/images/slack.jpg");
    /// ```
    pub fn for_asset(path: impl AsRef<Path>, content: &[u8]) -> Self {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned());
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned());
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                format!("{}/", parent.to_string_lossy().replace('\\', "/"))
            }
            _ => String::new(),
        };

        Self {
            name,
            ext,
            path: Some(dir),
            contenthash: Some(content_hash(content)),
            ..Self::default()
        }
    }

    /// Set the `[name]` value.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the `[ext]` value.
    pub fn with_ext(mut self, ext: impl Into<String>) -> Self {
        self.ext = Some(ext.into());
        self
    }

    /// Set the `[id]` value.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the `[hash]` value.
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    /// Set the `[chunkhash]` value.
    pub fn with_chunkhash(mut self, hash: impl Into<String>) -> Self {
        self.chunkhash = Some(hash.into());
        self
    }

    /// Set the `[contenthash]` value.
    pub fn with_contenthash(mut self, hash: impl Into<String>) -> Self {
        self.contenthash = Some(hash.into());
        self
    }

    fn lookup(&self, token: &str, length: Option<usize>) -> Option<String> {
        let (value, truncatable) = match token {
            "name" => (&self.name, false),
            "ext" => (&self.ext, false),
            "path" => (&self.path, false),
            "id" => (&self.id, false),
            "hash" => (&self.hash, true),
            "chunkhash" => (&self.chunkhash, true),
            "contenthash" => (&self.contenthash, true),
            _ => return None,
        };
        let value = value.as_deref()?;

        match length {
            None => Some(value.to_string()),
            Some(len) if truncatable => Some(value.chars().take(len).collect()),
            Some(_) => None,
        }
    }
}

/// Substitute the tokens of `template` from `context`.
///
/// ```
/// use packwork_config::{render_name, NameContext};
///
/// let ctx = NameContext::new().with_contenthash("abcd1234");
/// assert_eq!(render_name("[contenthash].css", &ctx), "abcd1234.css");
/// assert_eq!(render_name("[unknown].js", &ctx), "[unknown].js");
/// ```
pub fn render_name(template: &str, context: &NameContext) -> String {
    TOKEN
        .replace_all(template, |caps: &Captures<'_>| {
            let literal = || caps[0].to_string();
            let length = match caps.get(2).map(|len| len.as_str().parse::<usize>()) {
                None => None,
                Some(Ok(len)) => Some(len),
                Some(Err(_)) => return literal(),
            };
            context.lookup(&caps[1], length).unwrap_or_else(literal)
        })
        .into_owned()
}

/// Hex-encoded SHA-256 of `content`.
pub fn content_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}
