//! Command implementations.
//!
//! Each command writes its result to the given writer so that tests can
//! capture it.

use std::io::Write;

use packwork_config::{
    presets, render_name, ConfigDiscovery, EffectiveConfig, NameContext, Profile,
};
use tracing::{debug, warn};

use crate::cli::{ClassifyArgs, ConfigArgs, NameArgs, SourceArgs};
use crate::error::{CliError, Result};

/// Resolve the effective configuration selected by `source`.
pub fn resolve(source: &SourceArgs) -> Result<EffectiveConfig> {
    let profile = source.profile.unwrap_or_else(Profile::from_env);

    let config = match &source.config {
        Some(dir) => {
            debug!(dir = %dir.display(), %profile, "loading project config");
            ConfigDiscovery::new(dir).load()?.materialize_profile(profile)?
        }
        None => {
            debug!(%profile, "using built-in presets");
            presets::resolve(profile)?
        }
    };

    Ok(config)
}

pub fn config_execute(args: ConfigArgs, out: &mut impl Write) -> Result<()> {
    let config = if args.common {
        presets::resolve_common()?
    } else {
        resolve(&args.source)?
    };

    serde_json::to_writer_pretty(&mut *out, &config)?;
    writeln!(out)?;
    Ok(())
}

pub fn classify_execute(args: ClassifyArgs, out: &mut impl Write) -> Result<()> {
    let config = resolve(&args.source)?;
    let mut unmatched = Vec::new();

    for file in &args.files {
        let shown = file.display().to_string();
        match config.classify(file) {
            Some(rule) => {
                let mut line = format!("{shown}: {}", rule.loader_names().join(" -> "));
                if let Some(target) = rule.emitted_file() {
                    line.push_str(&format!(" [emit {target}]"));
                }
                if let Some(limit) = rule.emit.inline_limit {
                    line.push_str(&format!(" [inline < {limit} bytes]"));
                }
                writeln!(out, "{line}")?;
            }
            None => {
                warn!(file = %shown, "no rule matches");
                writeln!(out, "{shown}: (no rule)")?;
                unmatched.push(shown);
            }
        }
    }

    if args.strict && !unmatched.is_empty() {
        return Err(CliError::Unmatched(unmatched));
    }
    Ok(())
}

pub fn name_execute(args: NameArgs, out: &mut impl Write) -> Result<()> {
    let mut context = match &args.file {
        Some(path) => {
            let bytes = std::fs::read(path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            })?;
            NameContext::for_asset(path, &bytes)
        }
        None => NameContext::new(),
    };

    let overrides = [
        (&mut context.name, args.name),
        (&mut context.ext, args.ext),
        (&mut context.id, args.id),
        (&mut context.hash, args.hash),
        (&mut context.chunkhash, args.chunkhash),
        (&mut context.contenthash, args.contenthash),
    ];
    for (slot, value) in overrides {
        if value.is_some() {
            *slot = value;
        }
    }

    writeln!(out, "{}", render_name(&args.template, &context))?;
    Ok(())
}
