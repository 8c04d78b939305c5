//! Configuration values: base, overlay and the merged effective config.
//!
//! For composition see the `merge` module; for file loading see
//! `discovery`.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::naming::{render_name, NameContext};
use crate::plugin::PluginSpec;
use crate::rules::{RuleMatch, RuleTable};
use crate::server::ServerOptions;

/// Build mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// No mode-specific defaults
    #[default]
    None,
    Development,
    Production,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::None => "none",
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime environment the bundle targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Browser bundle
    #[default]
    Web,
    /// Node.js bundle
    Node,
}

/// Configuration shared by every profile.
///
/// `entry_point` and `output_template` are required by
/// [`merge`](crate::merge::merge) but optional here so that a partial base
/// can be represented and rejected with a precise error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<PathBuf>,

    /// Naming template of the entry bundle (e.g. `[name].[chunkhash].js`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_template: Option<String>,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub target: Target,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,

    #[serde(default)]
    pub rules: RuleTable,

    #[serde(default)]
    pub plugins: Vec<PluginSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerOptions>,
}

impl Default for BaseConfig {
    fn default() -> Self {
        Self {
            entry_point: None,
            output_template: None,
            output_dir: default_output_dir(),
            target: Target::default(),
            mode: None,
            rules: RuleTable::default(),
            plugins: Vec::new(),
            server: None,
        }
    }
}

impl BaseConfig {
    /// Base with the two required fields set.
    pub fn new(entry_point: impl Into<PathBuf>, output_template: impl Into<String>) -> Self {
        Self {
            entry_point: Some(entry_point.into()),
            output_template: Some(output_template.into()),
            ..Self::default()
        }
    }
}

/// Environment-specific fragment merged onto a [`BaseConfig`].
///
/// Nothing is required; an empty overlay leaves the base unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_template: Option<String>,

    /// Appended after the base rules
    #[serde(default, rename = "rules")]
    pub extra_rules: RuleTable,

    /// Appended after the base plugins
    #[serde(default, rename = "plugins")]
    pub extra_plugins: Vec<PluginSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerOptions>,
}

impl Overlay {
    /// Overlay that only sets the mode.
    pub fn with_mode(mode: Mode) -> Self {
        Self {
            mode: Some(mode),
            ..Self::default()
        }
    }
}

/// Final configuration handed to the build driver.
///
/// Only produced by [`merge`](crate::merge::merge) and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveConfig {
    pub(crate) entry_point: PathBuf,
    pub(crate) output_template: String,
    pub(crate) output_dir: PathBuf,
    pub(crate) target: Target,
    pub(crate) mode: Mode,
    pub(crate) rules: RuleTable,
    pub(crate) plugins: Vec<PluginSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) server: Option<ServerOptions>,
}

impl EffectiveConfig {
    /// Entry module of the build.
    pub fn entry_point(&self) -> &Path {
        &self.entry_point
    }

    /// Naming template of the entry bundle.
    pub fn output_template(&self) -> &str {
        &self.output_template
    }

    /// Directory emitted files are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Runtime environment of the bundle.
    pub fn target(&self) -> Target {
        self.target
    }

    /// Resolved build mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Base rules followed by overlay rules.
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Base plugins followed by overlay plugins.
    pub fn plugins(&self) -> &[PluginSpec] {
        &self.plugins
    }

    /// Dev-server options, when either side set any.
    pub fn server(&self) -> Option<&ServerOptions> {
        self.server.as_ref()
    }

    /// Shorthand for classifying against the effective rule table.
    pub fn classify(&self, path: impl AsRef<Path>) -> Option<RuleMatch<'_>> {
        self.rules.classify(path)
    }

    /// Name of the entry bundle.
    pub fn output_name(&self, context: &NameContext) -> String {
        render_name(&self.output_template, context)
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}
