//! The project's own build configurations.
//!
//! Two bases exist side by side: the shared base used with the
//! development overlay, and the standalone asset-pipeline base. Their rule
//! tables differ, and each is kept as written rather than reconciled.

use indexmap::IndexMap;
use serde_json::Value;

use crate::config::{BaseConfig, EffectiveConfig, Mode, Overlay, Target};
use crate::error::Result;
use crate::merge::merge;
use crate::plugin::{HtmlMinifyOptions, HtmlPluginOptions, PluginSpec};
use crate::profile::Profile;
use crate::rules::{EmitOptions, MatchPattern, RuleEntry, RuleTable, TransformStep};
use crate::server::{HistoryApiFallback, Rewrite, ServerOptions};

const STYLE_PATTERN: &str = r"\.css$";
const TEMPLATE_PATTERN: &str = r"\.hbs$";
const IMAGE_PATTERN: &str = r"\.(jpe?g|png|gif)$";
const SVG_PATTERN: &str = r"\.svg$";

/// Files below this size are inlined by the svg rule.
pub const SVG_INLINE_LIMIT: u64 = 8192;

pub const DEV_SERVER_PORT: u16 = 3000;

/// Shared base: entry `./index.js`, emitted as `bundle.[hash].js`.
pub fn common_base() -> Result<BaseConfig> {
    Ok(BaseConfig {
        entry_point: Some("./index.js".into()),
        output_template: Some("bundle.[hash].js".into()),
        target: Target::Web,
        mode: Some(Mode::None),
        rules: RuleTable::new(vec![style_rule()?, template_rule()?]),
        plugins: vec![
            html_plugin(None),
            extract_css_plugin(),
            PluginSpec::Clean,
        ],
        ..BaseConfig::default()
    })
}

/// Standalone base with the image pipeline. Image naming, HTML
/// minification and the `IS_PRODUCTION` constant depend on `profile`.
pub fn standalone_base(profile: Profile) -> Result<BaseConfig> {
    let image_name = if profile.is_production() {
        "[contenthash].[ext]"
    } else {
        "[path][name].[ext]"
    };
    let minify = profile.is_production().then_some(HtmlMinifyOptions {
        collapse_whitespace: true,
        use_short_doctype: true,
    });

    let mut definitions = IndexMap::new();
    definitions.insert(
        "IS_PRODUCTION".to_string(),
        Value::Bool(profile.is_production()),
    );

    Ok(BaseConfig {
        entry_point: Some("./src/index.js".into()),
        output_template: Some("[name].[chunkhash].js".into()),
        rules: RuleTable::new(vec![
            style_rule()?,
            template_rule()?,
            RuleEntry::new(IMAGE_PATTERN, [TransformStep::File])?.with_emit(EmitOptions {
                name: Some(image_name.to_string()),
                public_path: Some("assets/".to_string()),
                output_path: Some("assets/".to_string()),
                inline_limit: None,
            }),
            RuleEntry::new(SVG_PATTERN, [TransformStep::Url])?
                .with_emit(EmitOptions::inline_below(SVG_INLINE_LIMIT)),
        ]),
        plugins: vec![
            html_plugin(minify),
            extract_css_plugin(),
            PluginSpec::Clean,
            PluginSpec::Define { definitions },
        ],
        ..BaseConfig::default()
    })
}

/// Development overlay: dev server on port 3000 with history fallback.
pub fn development_overlay() -> Result<Overlay> {
    Ok(Overlay {
        mode: Some(Mode::Development),
        server: Some(ServerOptions {
            open: Some(true),
            overlay: Some(true),
            port: Some(DEV_SERVER_PORT),
            host: None,
            history_api_fallback: Some(HistoryApiFallback {
                rewrites: vec![
                    Rewrite {
                        from: MatchPattern::new("^/subpage$")?,
                        to: "subpage.html".to_string(),
                    },
                    Rewrite {
                        from: MatchPattern::new(".")?,
                        to: "404.html".to_string(),
                    },
                ],
            }),
        }),
        ..Overlay::default()
    })
}

pub fn production_overlay() -> Overlay {
    Overlay::with_mode(Mode::Production)
}

pub fn overlay(profile: Profile) -> Result<Overlay> {
    match profile {
        Profile::Development => development_overlay(),
        Profile::Production => Ok(production_overlay()),
    }
}

/// Effective configuration of `profile`.
pub fn resolve(profile: Profile) -> Result<EffectiveConfig> {
    tracing::debug!(%profile, "resolving preset configuration");
    merge(&standalone_base(profile)?, &overlay(profile)?)
}

fn style_rule() -> Result<RuleEntry> {
    RuleEntry::new(
        STYLE_PATTERN,
        [TransformStep::Extract, TransformStep::css_modules()],
    )
}

fn template_rule() -> Result<RuleEntry> {
    RuleEntry::new(TEMPLATE_PATTERN, [TransformStep::Handlebars])
}

fn html_plugin(minify: Option<HtmlMinifyOptions>) -> PluginSpec {
    let mut meta = IndexMap::new();
    meta.insert("charset".to_string(), "UTF-8".to_string());
    meta.insert(
        "viewport".to_string(),
        "width=device-width, initial-scale=1.0".to_string(),
    );

    PluginSpec::Html(HtmlPluginOptions {
        title: Some("Webpack".to_string()),
        template: Some("./template.hbs".to_string()),
        meta,
        minify,
        ..HtmlPluginOptions::default()
    })
}

fn extract_css_plugin() -> PluginSpec {
    PluginSpec::ExtractCss {
        filename: "[contenthash].css".to_string(),
    }
}

/// Shared base merged with the development overlay, as served by the
/// dev server.
pub fn resolve_common() -> Result<EffectiveConfig> {
    merge(&common_base()?, &development_overlay()?)
}
