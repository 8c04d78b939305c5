//! Output-producing plugins.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A plugin in the build's plugin list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "plugin", rename_all = "snake_case")]
pub enum PluginSpec {
    /// Generate the HTML page from a template
    Html(HtmlPluginOptions),

    /// Collect extracted CSS into standalone files
    ExtractCss {
        /// Naming template of the emitted stylesheet
        filename: String,
    },

    /// Empty the output directory before emitting
    Clean,

    /// Replace identifiers with compile-time constants
    Define {
        #[serde(default)]
        definitions: IndexMap<String, Value>,
    },
}

impl PluginSpec {
    pub fn name(&self) -> &'static str {
        match self {
            PluginSpec::Html(_) => "html",
            PluginSpec::ExtractCss { .. } => "extract_css",
            PluginSpec::Clean => "clean",
            PluginSpec::Define { .. } => "define",
        }
    }

    /// Name template of the file the plugin emits, if any.
    pub fn output_template(&self) -> Option<&str> {
        match self {
            PluginSpec::Html(options) => Some(&options.filename),
            PluginSpec::ExtractCss { filename } => Some(filename),
            PluginSpec::Clean | PluginSpec::Define { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtmlPluginOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Template the page is rendered from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    #[serde(default = "default_html_filename")]
    pub filename: String,

    /// `<meta>` tags, in insertion order
    #[serde(default)]
    pub meta: IndexMap<String, String>,

    /// HTML minification; `None` leaves the markup untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minify: Option<HtmlMinifyOptions>,
}

impl Default for HtmlPluginOptions {
    fn default() -> Self {
        Self {
            title: None,
            template: None,
            filename: default_html_filename(),
            meta: IndexMap::new(),
            minify: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlMinifyOptions {
    #[serde(default)]
    pub collapse_whitespace: bool,

    #[serde(default)]
    pub use_short_doctype: bool,
}

fn default_html_filename() -> String {
    "index.html".to_string()
}
