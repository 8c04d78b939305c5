//! Rule table: routes input files to transform chains.
//!
//! A [`RuleTable`] is an ordered list of [`RuleEntry`] values. Classifying a
//! file scans the table in declaration order and stops at the first entry
//! whose pattern matches. Specificity is never considered, so a
//! `*.module.css` rule must be declared before a generic `*.css` rule to
//! take effect.

mod emit;
mod pattern;
mod transform;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use emit::{Emission, EmitOptions};
pub use pattern::MatchPattern;
pub use transform::{StyleInjection, TransformStep};

/// A single rule: pattern, transform chain and emission options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub pattern: MatchPattern,

    #[serde(default)]
    pub chain: Vec<TransformStep>,

    #[serde(default)]
    pub emit: EmitOptions,
}

impl RuleEntry {
    /// Build a rule with default emission options.
    ///
    /// # Example
    ///
    /// ```
    /// use packwork_config::{RuleEntry, TransformStep};
    ///
    /// let rule = RuleEntry::new("*.hbs", [TransformStep::Handlebars]).unwrap();
    /// assert_eq!(rule.pattern.as_str(), "*.hbs");
    /// ```
    pub fn new(
        pattern: impl Into<String>,
        chain: impl IntoIterator<Item = TransformStep>,
    ) -> Result<Self> {
        Ok(Self {
            pattern: MatchPattern::new(pattern)?,
            chain: chain.into_iter().collect(),
            emit: EmitOptions::default(),
        })
    }

    pub fn with_emit(mut self, emit: EmitOptions) -> Self {
        self.emit = emit;
        self
    }
}

/// Result of a successful classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch<'a> {
    /// Position of the matching entry in the table
    pub index: usize,
    pub chain: &'a [TransformStep],
    pub emit: &'a EmitOptions,
}

impl RuleMatch<'_> {
    /// Loader names of the chain, in declaration order.
    pub fn loader_names(&self) -> Vec<&'static str> {
        self.chain.iter().map(TransformStep::name).collect()
    }

    /// Naming template of the written file, under the rule's output path.
    ///
    /// `None` when no step of the chain emits a file or the rule has no
    /// `emit.name`.
    pub fn emitted_file(&self) -> Option<String> {
        if !self.chain.iter().any(TransformStep::emits_file) {
            return None;
        }
        self.emit.name.as_deref().map(|name| self.emit.output_file(name))
    }
}

/// Ordered rule list. First match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable {
    entries: Vec<RuleEntry>,
}

impl RuleTable {
    /// Create a table from entries in declaration order.
    pub fn new(entries: Vec<RuleEntry>) -> Self {
        Self { entries }
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[RuleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry; it matches after every existing one.
    pub fn push(&mut self, entry: RuleEntry) {
        self.entries.push(entry);
    }

    /// Classify a file path.
    ///
    /// Returns `None` when no rule matches; whether that is fatal is up to
    /// the caller.
    ///
    /// # Example
    ///
    /// ```
    /// use packwork_config::{RuleEntry, RuleTable, TransformStep};
    ///
    /// let table = RuleTable::new(vec![
    ///     RuleEntry::new("*.module.css", [TransformStep::css_modules()]).unwrap(),
    ///     RuleEntry::new("*.css", [TransformStep::Css { modules: false }]).unwrap(),
    /// ]);
    ///
    /// let matched = table.classify("foo.module.css").unwrap();
    /// assert_eq!(matched.index, 0);
    /// assert!(table.classify("foo.js").is_none());
    /// ```
    pub fn classify(&self, path: impl AsRef<Path>) -> Option<RuleMatch<'_>> {
        let path = path.as_ref().to_string_lossy();
        let found = self
            .entries
            .iter()
            .enumerate()
            .find(|(_, entry)| entry.pattern.matches(&path))
            .map(|(index, entry)| RuleMatch {
                index,
                chain: &entry.chain,
                emit: &entry.emit,
            });

        match &found {
            Some(rule) => tracing::trace!(
                path = %path,
                rule = rule.index,
                loaders = ?rule.loader_names(),
                "classified file"
            ),
            None => tracing::trace!(path = %path, "no rule matched"),
        }

        found
    }
}

impl FromIterator<RuleEntry> for RuleTable {
    fn from_iter<I: IntoIterator<Item = RuleEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Extend<RuleEntry> for RuleTable {
    fn extend<I: IntoIterator<Item = RuleEntry>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a RuleEntry;
    type IntoIter = std::slice::Iter<'a, RuleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn style_table() -> RuleTable {
        RuleTable::new(vec![
            RuleEntry::new(
                "*.module.css",
                [TransformStep::Extract, TransformStep::css_modules()],
            )
            .unwrap(),
            RuleEntry::new(
                "*.css",
                [
                    TransformStep::Style {
                        inject: StyleInjection::SingletonStyleTag,
                    },
                    TransformStep::Css { modules: false },
                ],
            )
            .unwrap(),
        ])
    }

    #[test]
    fn first_declared_rule_wins() {
        let table = style_table();

        let module = table.classify("src/foo.module.css").unwrap();
        assert_eq!(module.index, 0);
        assert_eq!(module.loader_names(), vec!["extract", "css"]);

        let plain = table.classify("src/foo.css").unwrap();
        assert_eq!(plain.index, 1);
        assert_eq!(plain.loader_names(), vec!["style", "css"]);
    }

    #[test]
    fn order_not_specificity_decides() {
        let mut entries = style_table().entries().to_vec();
        entries.reverse();
        let table = RuleTable::new(entries);

        // The generic rule now shadows the module rule.
        let matched = table.classify("foo.module.css").unwrap();
        assert_eq!(matched.index, 0);
        assert_eq!(matched.loader_names(), vec!["style", "css"]);
    }

    #[test]
    fn unmatched_file_is_none() {
        assert!(style_table().classify("index.js").is_none());
        assert!(RuleTable::default().classify("index.css").is_none());
    }

    #[test]
    fn match_carries_emit_options() {
        let table: RuleTable = [RuleEntry::new("*.svg", [TransformStep::Url])
            .unwrap()
            .with_emit(EmitOptions::inline_below(8192))]
        .into_iter()
        .collect();

        let matched = table.classify("images/sample.svg").unwrap();
        assert_eq!(matched.emit.inline_limit, Some(8192));
    }

    #[test]
    fn table_deserializes_as_list() {
        let table: RuleTable = serde_json::from_value(json!([
            { "pattern": "*.hbs", "chain": [{ "loader": "handlebars" }] },
            {
                "pattern": "\\.(jpe?g|png|gif)$",
                "chain": [{ "loader": "file" }],
                "emit": { "name": "[contenthash].[ext]", "output_path": "assets/" }
            }
        ]))
        .unwrap();

        assert_eq!(table.len(), 2);
        let image = table.classify("slack.jpg").unwrap();
        assert_eq!(image.index, 1);
        assert_eq!(image.emit.name.as_deref(), Some("[contenthash].[ext]"));
        assert_eq!(image.emitted_file().as_deref(), Some("assets/[contenthash].[ext]"));
    }

    #[test]
    fn emitted_file_needs_an_emitting_step() {
        let named = EmitOptions {
            name: Some("[name].[ext]".into()),
            ..EmitOptions::default()
        };
        let table = RuleTable::new(vec![
            RuleEntry::new("*.hbs", [TransformStep::Handlebars])
                .unwrap()
                .with_emit(named.clone()),
            RuleEntry::new("*.png", [TransformStep::File])
                .unwrap()
                .with_emit(named),
            RuleEntry::new("*.svg", [TransformStep::Url]).unwrap(),
        ]);

        assert_eq!(table.classify("page.hbs").unwrap().emitted_file(), None);
        assert_eq!(
            table.classify("logo.png").unwrap().emitted_file().as_deref(),
            Some("[name].[ext]")
        );
        assert_eq!(table.classify("icon.svg").unwrap().emitted_file(), None);
    }
}
