//! Merge semantics across whole configurations.

use packwork_config::{
    merge, render_name, BaseConfig, ConfigError, HistoryApiFallback, MatchPattern, Mode,
    NameContext, Overlay, PluginSpec, Rewrite, RuleEntry, ServerOptions, TransformStep,
};
use proptest::prelude::*;

fn css_base() -> BaseConfig {
    let mut base = BaseConfig::new("./src/index.js", "[name].[chunkhash].js");
    base.rules.push(
        RuleEntry::new("*.css", [TransformStep::Extract, TransformStep::Css { modules: false }])
            .unwrap(),
    );
    base
}

#[test]
fn production_scenario_end_to_end() {
    let base = css_base();
    let effective = merge(&base, &Overlay::with_mode(Mode::Production)).unwrap();

    assert_eq!(effective.mode(), Mode::Production);
    assert_eq!(effective.rules(), &base.rules);
    assert_eq!(
        effective.classify("index.css").unwrap().loader_names(),
        vec!["extract", "css"]
    );

    let ctx = NameContext::new().with_contenthash("abcd1234");
    assert_eq!(render_name("[contenthash].css", &ctx), "abcd1234.css");
}

#[test]
fn overlay_without_fields_is_identity_on_base_values() {
    let mut base = css_base();
    base.mode = Some(Mode::Development);
    base.plugins = vec![PluginSpec::Clean];

    let effective = merge(&base, &Overlay::default()).unwrap();
    assert_eq!(effective.mode(), Mode::Development);
    assert_eq!(effective.plugins(), base.plugins.as_slice());
    assert_eq!(effective.output_template(), "[name].[chunkhash].js");
}

#[test]
fn server_options_are_merged_shallowly() {
    let mut base = css_base();
    base.server = Some(ServerOptions {
        host: Some("0.0.0.0".into()),
        port: Some(8080),
        history_api_fallback: Some(HistoryApiFallback {
            rewrites: vec![Rewrite {
                from: MatchPattern::new("^/a$").unwrap(),
                to: "a.html".into(),
            }],
        }),
        ..ServerOptions::default()
    });
    let overlay = Overlay {
        server: Some(ServerOptions {
            port: Some(3000),
            history_api_fallback: Some(HistoryApiFallback::default()),
            ..ServerOptions::default()
        }),
        ..Overlay::default()
    };

    let effective = merge(&base, &overlay).unwrap();
    let server = effective.server().unwrap();
    assert_eq!(server.host.as_deref(), Some("0.0.0.0"));
    assert_eq!(server.port, Some(3000));
    // Nested values are replaced, not merged.
    assert!(server.history_api_fallback.as_ref().unwrap().rewrites.is_empty());
}

#[test]
fn overlay_cannot_supply_missing_entry() {
    let base = BaseConfig {
        output_template: Some("x".into()),
        ..BaseConfig::default()
    };
    let overlay = Overlay {
        entry_point: Some("./index.js".into()),
        ..Overlay::default()
    };
    assert!(matches!(
        merge(&base, &overlay),
        Err(ConfigError::MissingField { field: "entry_point" })
    ));
}

#[test]
fn effective_config_renders_output_name() {
    let effective = merge(&css_base(), &Overlay::default()).unwrap();
    let ctx = NameContext::new().with_name("main").with_chunkhash("c0ffee");
    assert_eq!(effective.output_name(&ctx), "main.c0ffee.js");
}

fn plugin_strategy() -> impl Strategy<Value = PluginSpec> {
    prop_oneof![
        Just(PluginSpec::Clean),
        "[a-z]{1,8}\\.css".prop_map(|filename| PluginSpec::ExtractCss { filename }),
    ]
}

fn mode_strategy() -> impl Strategy<Value = Option<Mode>> {
    prop_oneof![
        Just(None),
        Just(Some(Mode::None)),
        Just(Some(Mode::Development)),
        Just(Some(Mode::Production)),
    ]
}

fn rule_strategy() -> impl Strategy<Value = RuleEntry> {
    ("[a-z]{1,5}", prop::bool::ANY).prop_map(|(ext, modules)| {
        RuleEntry::new(format!("*.{ext}"), [TransformStep::Css { modules }]).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn merge_is_deterministic(
        base_plugins in prop::collection::vec(plugin_strategy(), 0..6),
        extra_plugins in prop::collection::vec(plugin_strategy(), 0..6),
        base_mode in mode_strategy(),
        overlay_mode in mode_strategy(),
    ) {
        let mut base = css_base();
        base.plugins = base_plugins;
        base.mode = base_mode;
        let overlay = Overlay { mode: overlay_mode, extra_plugins, ..Overlay::default() };

        let first = merge(&base, &overlay).unwrap();
        let second = merge(&base.clone(), &overlay.clone()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn lists_are_length_additive_and_ordered(
        base_plugins in prop::collection::vec(plugin_strategy(), 0..6),
        extra_plugins in prop::collection::vec(plugin_strategy(), 0..6),
        extra_rules in prop::collection::vec(rule_strategy(), 0..4),
    ) {
        let mut base = css_base();
        base.plugins = base_plugins.clone();
        let overlay = Overlay {
            extra_plugins: extra_plugins.clone(),
            extra_rules: extra_rules.iter().cloned().collect(),
            ..Overlay::default()
        };

        let effective = merge(&base, &overlay).unwrap();
        prop_assert_eq!(effective.plugins().len(), base_plugins.len() + extra_plugins.len());
        prop_assert_eq!(&effective.plugins()[..base_plugins.len()], base_plugins.as_slice());
        prop_assert_eq!(&effective.plugins()[base_plugins.len()..], extra_plugins.as_slice());
        prop_assert_eq!(effective.rules().len(), base.rules.len() + extra_rules.len());
        prop_assert_eq!(&effective.rules().entries()[base.rules.len()..], extra_rules.as_slice());
    }

    #[test]
    fn overlay_mode_takes_precedence(base_mode in mode_strategy(), overlay_mode in mode_strategy()) {
        let mut base = css_base();
        base.mode = base_mode;
        let overlay = Overlay { mode: overlay_mode, ..Overlay::default() };

        let effective = merge(&base, &overlay).unwrap();
        let expected = overlay_mode.or(base_mode).unwrap_or_default();
        prop_assert_eq!(effective.mode(), expected);
    }
}
