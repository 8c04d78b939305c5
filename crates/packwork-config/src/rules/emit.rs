use serde::{Deserialize, Serialize};

/// Emission options attached to a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitOptions {
    /// Naming template for the emitted file (e.g. `[contenthash].[ext]`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Prefix used when referencing the emitted file from code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,

    /// Directory, relative to the output directory, to write the file into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,

    /// Files strictly smaller than this many bytes are inlined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_limit: Option<u64>,
}

/// Outcome of [`EmitOptions::emission`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    /// Embed the file as a data URL
    Inline,
    /// Write the file to the output directory
    File,
}

impl EmitOptions {
    /// Options that inline files below `limit` bytes.
    pub fn inline_below(limit: u64) -> Self {
        Self {
            inline_limit: Some(limit),
            ..Self::default()
        }
    }

    /// Decide how a file of `size` bytes leaves the build.
    ///
    /// Without an inline limit every file is written out.
    pub fn emission(&self, size: u64) -> Emission {
        match self.inline_limit {
            Some(limit) if size < limit => Emission::Inline,
            _ => Emission::File,
        }
    }

    /// Public URL for an emitted file name.
    pub fn public_url(&self, file_name: &str) -> String {
        match self.public_path.as_deref().or(self.output_path.as_deref()) {
            Some(prefix) if !prefix.is_empty() => {
                format!("{}/{}", prefix.trim_end_matches('/'), file_name)
            }
            _ => file_name.to_string(),
        }
    }

    /// Path of an emitted file relative to the output directory.
    pub fn output_file(&self, file_name: &str) -> String {
        match self.output_path.as_deref() {
            Some(dir) if !dir.is_empty() => format!("{}/{}", dir.trim_end_matches('/'), file_name),
            _ => file_name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_limit_is_exclusive() {
        let emit = EmitOptions::inline_below(8192);
        assert_eq!(emit.emission(0), Emission::Inline);
        assert_eq!(emit.emission(8191), Emission::Inline);
        assert_eq!(emit.emission(8192), Emission::File);
        assert_eq!(EmitOptions::default().emission(1), Emission::File);
    }

    #[test]
    fn public_url_joins_prefix() {
        let emit = EmitOptions {
            public_path: Some("assets/".into()),
            output_path: Some("assets/".into()),
            ..EmitOptions::default()
        };
        assert_eq!(emit.public_url("abcd.jpg"), "assets/abcd.jpg");
        assert_eq!(emit.output_file("abcd.jpg"), "assets/abcd.jpg");
        assert_eq!(EmitOptions::default().public_url("a.svg"), "a.svg");
    }
}
