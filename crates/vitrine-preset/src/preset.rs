//! Preset composition: the configuration values handed to the host runtime.
//!
//! Both entry points are pure: they read the project layout (plus one
//! memoized existence check for the type config artifact) and return a new
//! [`PartialConfig`]; nothing passed in is mutated. Building twice against
//! identical filesystem state yields structurally identical output.

use crate::base::{BaseRuleSet, RulePurpose};
use crate::error::Error;
use crate::extensions::ExtensionResolver;
use crate::paths::ProjectPaths;
use crate::rules::{self, DispatchRule, DispatchTable};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Build environment the host runtime reports.
///
/// Accepted and logged as part of the composition contract; it binds no rule
/// behavior and never changes rule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    #[must_use]
    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The two fields this preset contributes to the host configuration: the
/// ordered rule list and the ordered candidate-extension list. The host
/// merges them into its own config; nothing else is touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartialConfig {
    pub rules: Vec<DispatchRule>,
    pub resolve_extensions: Vec<String>,
}

impl PartialConfig {
    /// Dispatch view over the rule list.
    #[must_use]
    pub fn dispatch_table(&self) -> DispatchTable {
        DispatchTable::from_rules(self.rules.clone())
    }
}

/// Compose the story-rendering configuration: the full standard rule table
/// plus the resolved candidate extensions.
#[must_use]
pub fn compose(paths: &ProjectPaths, env: Environment) -> PartialConfig {
    let resolver = ExtensionResolver::new(paths.clone());
    let resolve_extensions = resolver.candidates();
    debug!(
        env = %env,
        typed = resolver.type_system_available(),
        "composing sandbox preset"
    );

    PartialConfig {
        rules: DispatchTable::standard(paths).into_rules(),
        resolve_extensions,
    }
}

/// Compose the variant that reuses the dev-server configuration.
///
/// Four rules are borrowed from `base` by purpose (never by position); a
/// missing rule is a configuration-build error. The app-script and
/// static-fallthrough rules are always built fresh because their scope
/// depends on the sandbox's own project layout.
///
/// Divergence note: unlike [`compose`], this variant registers no Sass
/// family, matching the dev-server rule set it mirrors. The gap is kept
/// visible rather than papered over.
pub fn compose_from_dev(
    base: &BaseRuleSet,
    paths: &ProjectPaths,
    env: Environment,
) -> Result<PartialConfig, Error> {
    let resolver = ExtensionResolver::new(paths.clone());
    let resolve_extensions = resolver.candidates();

    let rules = vec![
        base.get(RulePurpose::ImageAssets)?.clone(),
        rules::app_scripts_rule(paths),
        base.get(RulePurpose::DependencyScripts)?.clone(),
        base.get(RulePurpose::VendorPrefix)?.clone(),
        base.get(RulePurpose::ScopedCss)?.clone(),
        rules::static_fallthrough_rule(),
    ];
    debug!(env = %env, rules = rules.len(), "composed preset from dev rule set");

    Ok(PartialConfig {
        rules,
        resolve_extensions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    #[test]
    fn test_compose_sets_exactly_two_fields() {
        let dir = tempdir().unwrap();
        let config = compose(&ProjectPaths::from_root(dir.path()), Environment::Development);

        assert_eq!(config.rules.len(), 8);
        assert!(!config.resolve_extensions.is_empty());

        // The serialized contract carries the two fields and nothing else.
        let value = serde_json::to_value(&config).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["resolve_extensions", "rules"]);
    }

    #[test]
    fn test_compose_respects_type_config() {
        let dir = tempdir().unwrap();
        let paths = ProjectPaths::from_root(dir.path());

        let without = compose(&paths, Environment::Development);
        assert!(!without.resolve_extensions.iter().any(|s| s == ".tsx"));

        fs::write(dir.path().join("tsconfig.json"), "{}").unwrap();
        let with = compose(&paths, Environment::Development);
        assert!(with.resolve_extensions.iter().any(|s| s == ".tsx"));
    }

    #[test]
    fn test_compose_is_environment_invariant() {
        let dir = tempdir().unwrap();
        let paths = ProjectPaths::from_root(dir.path());

        let dev = compose(&paths, Environment::Development);
        let prod = compose(&paths, Environment::Production);
        assert_eq!(dev, prod);
    }

    #[test]
    fn test_compose_does_not_mutate_inputs() {
        let dir = tempdir().unwrap();
        let paths = ProjectPaths::from_root(dir.path());
        let before = paths.clone();
        let _ = compose(&paths, Environment::Production);
        assert_eq!(paths, before);
    }

    #[test]
    fn test_compose_from_dev_borrows_named_rules() {
        let dir = tempdir().unwrap();
        let paths = ProjectPaths::from_root(dir.path());
        let base = BaseRuleSet::from_table(&DispatchTable::standard(&paths));

        let config = compose_from_dev(&base, &paths, Environment::Development).unwrap();
        let names: Vec<&str> = config.rules.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            [
                "image-assets",
                "app-scripts",
                "dependency-scripts",
                "plain-css",
                "scoped-css",
                "static-fallthrough",
            ]
        );
    }

    #[test]
    fn test_compose_from_dev_omits_sass_family() {
        let dir = tempdir().unwrap();
        let paths = ProjectPaths::from_root(dir.path());
        let base = BaseRuleSet::from_table(&DispatchTable::standard(&paths));

        let config = compose_from_dev(&base, &paths, Environment::Development).unwrap();
        let table = config.dispatch_table();

        // With no Sass rules registered, a .scss file drops through to the
        // static catch-all and is emitted as a plain hashed file.
        let scss = paths.app_src.join("theme.scss");
        assert_eq!(table.dispatch(&scss).unwrap().name, "static-fallthrough");
    }

    #[test]
    fn test_compose_from_dev_fails_fast_on_missing_rule() {
        let dir = tempdir().unwrap();
        let paths = ProjectPaths::from_root(dir.path());
        let base = BaseRuleSet::new();

        let err = compose_from_dev(&base, &paths, Environment::Development).unwrap_err();
        assert!(matches!(err, Error::MissingBaseRule { .. }));
    }

    #[test]
    fn test_dispatch_table_view_round_trips() {
        let dir = tempdir().unwrap();
        let paths = ProjectPaths::from_root(dir.path());
        let config = compose(&paths, Environment::Development);
        let table = config.dispatch_table();

        let app = paths.app_src.join("App.tsx");
        assert_eq!(table.dispatch(&app).unwrap().name, "app-scripts");
        assert!(table.dispatch(Path::new("/elsewhere/readme.md")).is_some());
    }
}
