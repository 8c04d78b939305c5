//! Build-configuration composition for packwork.
//!
//! A build is described by a [`BaseConfig`] and an environment [`Overlay`].
//! [`merge`] combines them into an immutable [`EffectiveConfig`], whose
//! [`RuleTable`] routes input files to transform chains and whose output
//! template is rendered with [`render_name`].
//!
//! ```
//! use packwork_config::{merge, render_name, BaseConfig, Mode, NameContext, Overlay, RuleEntry, TransformStep};
//!
//! let mut base = BaseConfig::new("./src/index.js", "[name].[chunkhash].js");
//! base.rules.push(RuleEntry::new("*.css", [TransformStep::Extract, TransformStep::css_modules()]).unwrap());
//!
//! let effective = merge(&base, &Overlay::with_mode(Mode::Production)).unwrap();
//! assert_eq!(effective.mode(), Mode::Production);
//! assert_eq!(effective.classify("index.css").unwrap().loader_names(), ["extract", "css"]);
//!
//! let ctx = NameContext::new().with_contenthash("abcd1234");
//! assert_eq!(render_name("[contenthash].css", &ctx), "abcd1234.css");
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod merge;
pub mod naming;
pub mod plugin;
pub mod presets;
pub mod profile;
pub mod rules;
pub mod server;

pub use config::*;
pub use error::*;
pub use merge::merge;
pub use naming::{content_hash, render_name, NameContext};
pub use plugin::*;
pub use profile::{Profile, PRODUCTION_FLAG_VAR, PRODUCTION_SENTINEL};
pub use rules::*;
pub use server::*;

pub use discovery::{ConfigDiscovery, ProjectConfig, CONFIG_FILE_NAME};
