//! Development server options.

use serde::{Deserialize, Serialize};

use crate::rules::MatchPattern;

/// Dev-server settings. Every field is optional so that a base and an
/// overlay can be merged key by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerOptions {
    /// Open the browser once the server is listening
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<bool>,

    /// Show build errors as an in-page overlay
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_api_fallback: Option<HistoryApiFallback>,
}

impl ServerOptions {
    /// Shallow merge: each key set in `overlay` replaces the base key.
    ///
    /// Nested values such as the fallback rewrites are replaced wholesale.
    pub fn merged(base: Option<&ServerOptions>, overlay: Option<&ServerOptions>) -> Option<Self> {
        match (base, overlay) {
            (None, None) => None,
            (Some(base), None) => Some(base.clone()),
            (None, Some(overlay)) => Some(overlay.clone()),
            (Some(base), Some(overlay)) => Some(Self {
                open: overlay.open.or(base.open),
                overlay: overlay.overlay.or(base.overlay),
                host: overlay.host.clone().or_else(|| base.host.clone()),
                port: overlay.port.or(base.port),
                history_api_fallback: overlay
                    .history_api_fallback
                    .clone()
                    .or_else(|| base.history_api_fallback.clone()),
            }),
        }
    }
}

/// Rewrites applied to requests that match no emitted file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryApiFallback {
    #[serde(default)]
    pub rewrites: Vec<Rewrite>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewrite {
    pub from: MatchPattern,
    pub to: String,
}

impl HistoryApiFallback {
    /// Target page for a request path; the first matching rewrite wins.
    pub fn resolve(&self, request_path: &str) -> Option<&str> {
        self.rewrites
            .iter()
            .find(|rewrite| rewrite.from.matches(request_path))
            .map(|rewrite| rewrite.to.as_str())
    }
}
