use serde::{Deserialize, Serialize};

/// One step of a transform chain.
///
/// Each step carries its own closed set of options. Steps are listed in the
/// order they appear in a rule, which is the order a build driver reports
/// them in; the driver is free to apply them last-to-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "loader", rename_all = "snake_case")]
pub enum TransformStep {
    /// Hand compiled CSS over to the CSS extraction plugin
    Extract,

    /// Inject compiled CSS into the document through `<style>` tags
    Style {
        #[serde(default)]
        inject: StyleInjection,
    },

    /// Resolve `@import` and `url()` in CSS
    Css {
        /// Scope class names to the importing module (CSS modules)
        #[serde(default)]
        modules: bool,
    },

    /// Compile Sass/SCSS to CSS
    Sass,

    /// Compile Handlebars templates
    Handlebars,

    /// Emit the file as a standalone asset
    File,

    /// Inline the file as a data URL below the rule's inline limit,
    /// otherwise emit it like [`TransformStep::File`]
    Url,
}

/// How [`TransformStep::Style`] injects CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleInjection {
    /// One `<style>` tag per module
    #[default]
    StyleTag,
    /// All modules share one `<style>` tag
    SingletonStyleTag,
}

impl TransformStep {
    pub fn css_modules() -> Self {
        TransformStep::Css { modules: true }
    }

    /// Loader name of the step.
    pub fn name(&self) -> &'static str {
        match self {
            TransformStep::Extract => "extract",
            TransformStep::Style { .. } => "style",
            TransformStep::Css { .. } => "css",
            TransformStep::Sass => "sass",
            TransformStep::Handlebars => "handlebars",
            TransformStep::File => "file",
            TransformStep::Url => "url",
        }
    }

    /// Whether the step writes the matched file to the output directory.
    pub fn emits_file(&self) -> bool {
        matches!(self, TransformStep::File | TransformStep::Url)
    }
}
