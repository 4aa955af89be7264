//! Named lookup into an externally supplied rule set.
//!
//! The dev-server configuration this preset can reuse exposes its rules as an
//! ordered list. Reaching into that list by array position breaks silently
//! the moment the upstream order changes, so reuse goes through a small
//! capability map instead: each reusable rule is addressed by its purpose,
//! resolved by stable rule name, and a missing rule fails loudly at
//! configuration-build time.

use crate::error::Error;
use crate::rules::{DispatchRule, DispatchTable};
use serde::Serialize;
use std::collections::BTreeMap;

/// The purposes a consumer may borrow from the base rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RulePurpose {
    /// Raster images with the inline-or-emit threshold.
    ImageAssets,
    /// The leaner script chain for vendored code.
    DependencyScripts,
    /// The plain stylesheet chain carrying the vendor-prefixing stage.
    VendorPrefix,
    /// The scoped-CSS chain with deterministic local identifiers.
    ScopedCss,
}

impl RulePurpose {
    /// Stable name of the rule expected to serve this purpose.
    #[must_use]
    pub fn rule_name(self) -> &'static str {
        match self {
            Self::ImageAssets => "image-assets",
            Self::DependencyScripts => "dependency-scripts",
            Self::VendorPrefix => "plain-css",
            Self::ScopedCss => "scoped-css",
        }
    }

    /// All purposes, in declaration order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::ImageAssets,
            Self::DependencyScripts,
            Self::VendorPrefix,
            Self::ScopedCss,
        ]
    }
}

impl std::fmt::Display for RulePurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Self::ImageAssets => "image-assets",
            Self::DependencyScripts => "dependency-scripts",
            Self::VendorPrefix => "vendor-prefix",
            Self::ScopedCss => "scoped-css",
        };
        write!(f, "{tag}")
    }
}

/// Purpose-addressed view of an external rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BaseRuleSet {
    rules: BTreeMap<RulePurpose, DispatchRule>,
}

impl BaseRuleSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a rule table by purpose, keeping only the rules whose stable
    /// names are recognized. Unrecognized rules are simply not reusable;
    /// absence is reported at lookup time, not here.
    #[must_use]
    pub fn from_table(table: &DispatchTable) -> Self {
        let mut rules = BTreeMap::new();
        for purpose in RulePurpose::all() {
            if let Some(rule) = table.rule(purpose.rule_name()) {
                rules.insert(*purpose, rule.clone());
            }
        }
        Self { rules }
    }

    /// Register a rule for a purpose.
    pub fn insert(&mut self, purpose: RulePurpose, rule: DispatchRule) {
        self.rules.insert(purpose, rule);
    }

    /// Look up the rule serving `purpose`, failing loudly when it is absent.
    pub fn get(&self, purpose: RulePurpose) -> Result<&DispatchRule, Error> {
        self.rules.get(&purpose).ok_or(Error::MissingBaseRule {
            purpose,
            expected: purpose.rule_name(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::ProjectPaths;

    fn base() -> BaseRuleSet {
        let table = DispatchTable::standard(&ProjectPaths::from_root("/proj"));
        BaseRuleSet::from_table(&table)
    }

    #[test]
    fn test_every_purpose_resolves_from_standard_table() {
        let base = base();
        for purpose in RulePurpose::all() {
            let rule = base.get(*purpose).unwrap();
            assert_eq!(rule.name, purpose.rule_name());
        }
    }

    #[test]
    fn test_missing_purpose_fails_loudly() {
        let base = BaseRuleSet::new();
        let err = base.get(RulePurpose::ScopedCss).unwrap_err();
        let Error::MissingBaseRule { purpose, expected } = err;
        assert_eq!(purpose, RulePurpose::ScopedCss);
        assert_eq!(expected, "scoped-css");
    }

    #[test]
    fn test_from_table_tolerates_partial_tables() {
        let table = DispatchTable::from_rules(vec![crate::rules::image_assets_rule()]);
        let base = BaseRuleSet::from_table(&table);
        assert!(base.get(RulePurpose::ImageAssets).is_ok());
        assert!(base.get(RulePurpose::VendorPrefix).is_err());
    }
}
