//! Composition of a base configuration with an environment overlay.

use crate::config::{BaseConfig, EffectiveConfig, Overlay};
use crate::error::{ConfigError, Result};
use crate::server::ServerOptions;

/// Merge `overlay` onto `base`.
///
/// - `entry_point`, `output_template` and `mode`: the overlay value replaces
///   the base value when set.
/// - `rules` and `plugins`: overlay entries are appended after the base
///   entries. Nothing is de-duplicated.
/// - `server`: merged key by key, overlay first.
///
/// # Errors
///
/// [`ConfigError::MissingField`] when the base has no `entry_point` or no
/// `output_template`. The overlay cannot stand in for a missing base field.
///
/// # Example
///
/// ```
/// use packwork_config::{merge, BaseConfig, Mode, Overlay};
///
/// let base = BaseConfig::new("./src/index.js", "[name].[chunkhash].js");
/// let effective = merge(&base, &Overlay::with_mode(Mode::Production)).unwrap();
/// assert_eq!(effective.mode(), Mode::Production);
/// ```
pub fn merge(base: &BaseConfig, overlay: &Overlay) -> Result<EffectiveConfig> {
    let base_entry = base
        .entry_point
        .as_ref()
        .ok_or_else(|| ConfigError::missing("entry_point"))?;
    let base_template = base
        .output_template
        .as_ref()
        .ok_or_else(|| ConfigError::missing("output_template"))?;

    let mut rules = base.rules.clone();
    rules.extend(overlay.extra_rules.entries().iter().cloned());

    let mut plugins = Vec::with_capacity(base.plugins.len() + overlay.extra_plugins.len());
    plugins.extend(base.plugins.iter().cloned());
    plugins.extend(overlay.extra_plugins.iter().cloned());

    let effective = EffectiveConfig {
        entry_point: overlay.entry_point.as_ref().unwrap_or(base_entry).clone(),
        output_template: overlay
            .output_template
            .as_ref()
            .unwrap_or(base_template)
            .clone(),
        output_dir: base.output_dir.clone(),
        target: base.target,
        mode: overlay.mode.or(base.mode).unwrap_or_default(),
        rules,
        plugins,
        server: ServerOptions::merged(base.server.as_ref(), overlay.server.as_ref()),
    };

    tracing::debug!(
        mode = %effective.mode,
        entry = %effective.entry_point.display(),
        rules = effective.rules.len(),
        plugins = effective.plugins.len(),
        "merged configuration"
    );

    Ok(effective)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use crate::plugin::PluginSpec;
    use crate::rules::{RuleEntry, TransformStep};
    use std::path::Path;

    fn base() -> BaseConfig {
        let mut base = BaseConfig::new("./src/index.js", "[name].[chunkhash].js");
        base.rules.push(RuleEntry::new("*.hbs", [TransformStep::Handlebars]).unwrap());
        base.plugins.push(PluginSpec::Clean);
        base
    }

    #[test]
    fn empty_overlay_keeps_base() {
        let effective = merge(&base(), &Overlay::default()).unwrap();
        assert_eq!(effective.entry_point(), Path::new("./src/index.js"));
        assert_eq!(effective.output_template(), "[name].[chunkhash].js");
        assert_eq!(effective.mode(), Mode::None);
        assert_eq!(effective.rules().len(), 1);
        assert_eq!(effective.plugins(), &[PluginSpec::Clean]);
        assert!(effective.server().is_none());
    }

    #[test]
    fn overlay_scalars_win() {
        let mut base = base();
        base.mode = Some(Mode::Development);
        let overlay = Overlay {
            mode: Some(Mode::Production),
            output_template: Some("bundle.[hash].js".into()),
            ..Overlay::default()
        };

        let effective = merge(&base, &overlay).unwrap();
        assert_eq!(effective.mode(), Mode::Production);
        assert_eq!(effective.output_template(), "bundle.[hash].js");
        assert_eq!(effective.entry_point(), Path::new("./src/index.js"));
    }

    #[test]
    fn unset_overlay_mode_keeps_base_mode() {
        let mut base = base();
        base.mode = Some(Mode::Development);
        let effective = merge(&base, &Overlay::default()).unwrap();
        assert_eq!(effective.mode(), Mode::Development);
    }

    #[test]
    fn lists_are_appended_without_dedup() {
        let overlay = Overlay {
            extra_plugins: vec![PluginSpec::Clean],
            extra_rules: [RuleEntry::new("*.hbs", [TransformStep::File]).unwrap()]
                .into_iter()
                .collect(),
            ..Overlay::default()
        };

        let effective = merge(&base(), &overlay).unwrap();
        assert_eq!(effective.plugins(), &[PluginSpec::Clean, PluginSpec::Clean]);
        assert_eq!(effective.rules().len(), 2);
        // The base rule still shadows the appended one.
        let matched = effective.classify("template.hbs").unwrap();
        assert_eq!(matched.chain, &[TransformStep::Handlebars]);
    }

    #[test]
    fn missing_entry_point_is_an_error() {
        let base = BaseConfig {
            output_template: Some("x".into()),
            ..BaseConfig::default()
        };
        let err = merge(&base, &Overlay::default()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingField {
                field: "entry_point"
            }
        ));
    }

    #[test]
    fn missing_output_template_is_an_error() {
        let base = BaseConfig {
            entry_point: Some("./index.js".into()),
            ..BaseConfig::default()
        };
        let overlay = Overlay {
            output_template: Some("bundle.js".into()),
            ..Overlay::default()
        };
        let err = merge(&base, &overlay).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingField {
                field: "output_template"
            }
        ));
    }
}
