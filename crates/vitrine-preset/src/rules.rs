//! Transform dispatch: ordered, first-match-wins rules mapping path
//! predicates to transform chains or asset policies.
//!
//! Rule order is load-bearing because several predicates overlap (a `.js`
//! file under `src/` matches both script rules); the table is a plain
//! ordered list and dispatch is a linear scan that stops at the first rule
//! whose predicate and scope both admit the path. A path matching no rule is
//! handed back to the host runtime's own defaults, never raised as an error.

use crate::assets::AssetPolicy;
use crate::chain::{TransformChain, TransformStep};
use crate::paths::ProjectPaths;
use crate::style::{build_style_chain, StyleOptions};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Script suffixes compiled by the app chain.
pub const SCRIPT_SUFFIXES: &[&str] = &[".js", ".mjs", ".jsx", ".ts", ".tsx"];

/// Plain script/module suffixes compiled by the dependency chain.
pub const DEPENDENCY_SUFFIXES: &[&str] = &[".js", ".mjs"];

/// Raster-image suffixes covered by the inline-or-emit policy.
pub const IMAGE_SUFFIXES: &[&str] = &[".bmp", ".gif", ".jpg", ".jpeg", ".png"];

/// Suffixes the catch-all never claims: scripts, markup, JSON, templates.
pub const FALLTHROUGH_EXCLUDED: &[&str] = &[
    ".js", ".mjs", ".jsx", ".ts", ".tsx", ".html", ".json", ".ejs",
];

/// Vendored runtime-helper path fragment excluded from the dependency chain.
pub const RUNTIME_HELPERS_FRAGMENT: &str = "/runtime-helpers/";

/// Path predicate for a dispatch rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathPattern {
    /// Matches when the path ends with any of the listed suffixes.
    AnySuffix(&'static [&'static str]),
    /// Stylesheet with any of the listed extensions, excluding the scoped
    /// `*.module.<ext>` variant.
    PlainStyle(&'static [&'static str]),
    /// Scoped stylesheet: `*.module.<ext>` only.
    ScopedStyle(&'static [&'static str]),
    /// Catch-all: matches anything whose suffix is not in the list.
    ExceptSuffix(&'static [&'static str]),
}

impl PathPattern {
    /// Whether the predicate admits `path`.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        let normalized = normalize(path);
        match self {
            Self::AnySuffix(suffixes) => suffixes.iter().any(|s| normalized.ends_with(s)),
            Self::PlainStyle(exts) => exts.iter().any(|ext| {
                normalized.ends_with(&format!(".{ext}"))
                    && !normalized.ends_with(&format!(".module.{ext}"))
            }),
            Self::ScopedStyle(exts) => exts
                .iter()
                .any(|ext| normalized.ends_with(&format!(".module.{ext}"))),
            Self::ExceptSuffix(suffixes) => !suffixes.iter().any(|s| normalized.ends_with(s)),
        }
    }
}

/// A scope filter excluding part of the tree from a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeFilter {
    /// Everything under a directory.
    Dir(PathBuf),
    /// Any path containing the slash-normalized fragment.
    Fragment(String),
}

impl ScopeFilter {
    fn matches(&self, path: &Path) -> bool {
        match self {
            Self::Dir(dir) => path.starts_with(dir),
            Self::Fragment(fragment) => normalize(path).contains(fragment.as_str()),
        }
    }
}

/// Include/exclude scope attached to a rule.
///
/// An empty include list admits any location; exclusions always win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleScope {
    pub include: Vec<PathBuf>,
    pub exclude: Vec<ScopeFilter>,
}

impl RuleScope {
    /// Whether the scope admits `path`.
    #[must_use]
    pub fn admits(&self, path: &Path) -> bool {
        let included = self.include.is_empty() || self.include.iter().any(|d| path.starts_with(d));
        included && !self.exclude.iter().any(|f| f.matches(path))
    }
}

/// What a matching rule does with the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "config", rename_all = "lowercase")]
pub enum RuleAction {
    /// Single-parameter inline-or-emit policy, no chain of steps.
    Asset(AssetPolicy),
    /// An ordered transform chain.
    Chain(TransformChain),
}

impl RuleAction {
    /// The transform chain, when the action is one.
    #[must_use]
    pub fn chain(&self) -> Option<&TransformChain> {
        match self {
            Self::Chain(chain) => Some(chain),
            Self::Asset(_) => None,
        }
    }

    /// The asset policy, when the action is one.
    #[must_use]
    pub fn asset_policy(&self) -> Option<&AssetPolicy> {
        match self {
            Self::Asset(policy) => Some(policy),
            Self::Chain(_) => None,
        }
    }
}

/// One dispatch rule: a named (predicate, scope, action) triple.
///
/// The name is the rule's stable identity; consumers that reuse individual
/// rules look them up by name, never by position in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchRule {
    pub name: &'static str,
    pub predicate: PathPattern,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<RuleScope>,
    pub action: RuleAction,
}

impl DispatchRule {
    /// Whether this rule fires for `path`.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        if !self.predicate.matches(path) {
            return false;
        }
        match &self.scope {
            Some(scope) => scope.admits(path),
            None => true,
        }
    }
}

/// The ordered rule list, evaluated first-match-wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DispatchTable {
    rules: Vec<DispatchRule>,
}

impl DispatchTable {
    /// Build the canonical table for a project.
    ///
    /// The relative order below is the contract; overlapping predicates make
    /// it observable.
    #[must_use]
    pub fn standard(paths: &ProjectPaths) -> Self {
        Self {
            rules: vec![
                image_assets_rule(),
                app_scripts_rule(paths),
                dependency_scripts_rule(),
                plain_css_rule(paths),
                scoped_css_rule(paths),
                plain_sass_rule(paths),
                scoped_sass_rule(paths),
                static_fallthrough_rule(),
            ],
        }
    }

    /// Build a table from an explicit rule list.
    #[must_use]
    pub fn from_rules(rules: Vec<DispatchRule>) -> Self {
        Self { rules }
    }

    /// First rule whose predicate and scope admit `path`, or `None` when the
    /// host runtime's defaults apply.
    #[must_use]
    pub fn dispatch(&self, path: &Path) -> Option<&DispatchRule> {
        let hit = self.rules.iter().find(|rule| rule.matches(path));
        match hit {
            Some(rule) => debug!(path = %path.display(), rule = rule.name, "dispatch matched"),
            None => debug!(path = %path.display(), "dispatch fell through to host defaults"),
        }
        hit
    }

    #[must_use]
    pub fn rules(&self) -> &[DispatchRule] {
        &self.rules
    }

    #[must_use]
    pub fn into_rules(self) -> Vec<DispatchRule> {
        self.rules
    }

    /// Find a rule by its stable name.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&DispatchRule> {
        self.rules.iter().find(|r| r.name == name)
    }
}

fn normalize(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Rule 1: raster images, inline at or below the byte threshold.
pub(crate) fn image_assets_rule() -> DispatchRule {
    DispatchRule {
        name: "image-assets",
        predicate: PathPattern::AnySuffix(IMAGE_SUFFIXES),
        scope: None,
        action: RuleAction::Asset(AssetPolicy::inline_or_emit()),
    }
}

/// Rule 2: first-party scripts through the app compiler, with the
/// named-asset-import rewrite that turns component-style vector-graphic
/// imports into references to the external rendering toolchain.
///
/// Scoped to the whole project root so that stories, scripts and other
/// first-party trees outside `src/` still compile through the app chain;
/// vendored code is kept out by the `node_modules` exclusion.
pub(crate) fn app_scripts_rule(paths: &ProjectPaths) -> DispatchRule {
    DispatchRule {
        name: "app-scripts",
        predicate: PathPattern::AnySuffix(SCRIPT_SUFFIXES),
        scope: Some(RuleScope {
            include: vec![paths.root.clone()],
            exclude: vec![ScopeFilter::Dir(paths.node_modules.clone())],
        }),
        action: RuleAction::Chain(TransformChain::from_steps(vec![
            TransformStep::with_options(
                "app-script-loader",
                json!({
                    "presets": ["sandbox-app"],
                    "cacheDirectory": true,
                    "namedAssetImports": {
                        "loaderMap": {
                            "svg": { "component": "svg-component-loader" }
                        }
                    },
                }),
            ),
        ])),
    }
}

/// Rule 3: plain scripts outside the app scope through the leaner dependency
/// compiler. Source maps are off: debugging steps through compiled vendor
/// code show the compiled output.
pub(crate) fn dependency_scripts_rule() -> DispatchRule {
    DispatchRule {
        name: "dependency-scripts",
        predicate: PathPattern::AnySuffix(DEPENDENCY_SUFFIXES),
        scope: Some(RuleScope {
            include: Vec::new(),
            exclude: vec![ScopeFilter::Fragment(RUNTIME_HELPERS_FRAGMENT.to_string())],
        }),
        action: RuleAction::Chain(TransformChain::from_steps(vec![
            TransformStep::with_options(
                "dependency-script-loader",
                json!({
                    "presets": ["sandbox-dependencies"],
                    "cacheDirectory": true,
                    "sourceMaps": false,
                    "compact": false,
                }),
            ),
        ])),
    }
}

/// Rule 4: unscoped `.css`.
pub(crate) fn plain_css_rule(paths: &ProjectPaths) -> DispatchRule {
    DispatchRule {
        name: "plain-css",
        predicate: PathPattern::PlainStyle(&["css"]),
        scope: None,
        action: RuleAction::Chain(build_style_chain(
            &StyleOptions::plain(1),
            None,
            &paths.shared_variables,
        )),
    }
}

/// Rule 5: `*.module.css` with deterministic scoped class names.
pub(crate) fn scoped_css_rule(paths: &ProjectPaths) -> DispatchRule {
    DispatchRule {
        name: "scoped-css",
        predicate: PathPattern::ScopedStyle(&["css"]),
        scope: None,
        action: RuleAction::Chain(build_style_chain(
            &StyleOptions::scoped(1),
            None,
            &paths.shared_variables,
        )),
    }
}

/// Rule 6: unscoped `.scss`/`.sass`, one extra preprocessing stage at the
/// end of the chain and a correspondingly larger importLoaders count.
pub(crate) fn plain_sass_rule(paths: &ProjectPaths) -> DispatchRule {
    DispatchRule {
        name: "plain-sass",
        predicate: PathPattern::PlainStyle(&["scss", "sass"]),
        scope: None,
        action: RuleAction::Chain(build_style_chain(
            &StyleOptions::plain(2),
            Some("sass-loader"),
            &paths.shared_variables,
        )),
    }
}

/// Rule 7: `*.module.scss`/`*.module.sass`; the scoped variant carries one
/// dedicated module-handling stage right after CSS interpretation, so its
/// chain is exactly one step longer than [`plain_sass_rule`]'s. The declared
/// importLoaders stays at the rule's value of 2.
pub(crate) fn scoped_sass_rule(paths: &ProjectPaths) -> DispatchRule {
    let mut chain = build_style_chain(
        &StyleOptions::scoped(2),
        Some("sass-loader"),
        &paths.shared_variables,
    );
    chain.insert_after("css-loader", TransformStep::bare("css-modules-loader"));

    DispatchRule {
        name: "scoped-sass",
        predicate: PathPattern::ScopedStyle(&["scss", "sass"]),
        scope: None,
        action: RuleAction::Chain(chain),
    }
}

/// Rule 8: everything not already claimed by name is emitted as a hashed
/// output file, unconditionally.
pub(crate) fn static_fallthrough_rule() -> DispatchRule {
    DispatchRule {
        name: "static-fallthrough",
        predicate: PathPattern::ExceptSuffix(FALLTHROUGH_EXCLUDED),
        scope: None,
        action: RuleAction::Asset(AssetPolicy::emit_only()),
    }
}
