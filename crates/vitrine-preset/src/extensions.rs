//! Candidate extension resolution for bare imports.
//!
//! When an import path omits its suffix, the host runtime tries candidates
//! from this list left to right. The list is a fixed priority order; the only
//! dynamic input is whether a type-system toolchain is configured, which is
//! detected with a single memoized existence check for the project's type
//! config artifact.

use crate::paths::ProjectPaths;
use std::sync::OnceLock;

/// Ordered candidate suffixes tried when an import omits its extension.
///
/// Plain variants of each family come before typed ones so that adding the
/// type system never changes which file an existing bare import resolves to.
pub const BASE_CANDIDATES: &[&str] = &[
    ".web.mjs", ".mjs", ".web.js", ".js", ".web.ts", ".ts", ".web.tsx", ".tsx", ".json",
    ".web.jsx", ".jsx",
];

/// Whether a suffix denotes the typed-script variant of its family.
#[must_use]
pub fn is_typed_suffix(suffix: &str) -> bool {
    suffix.ends_with(".ts") || suffix.ends_with(".tsx")
}

/// Filter a candidate list for type-system availability.
///
/// When the type system is unavailable every typed-variant suffix is removed;
/// the relative order of the remainder is preserved exactly. Pure and
/// idempotent.
#[must_use]
pub fn filter_candidates(base: &[&str], type_system_available: bool) -> Vec<String> {
    base.iter()
        .filter(|suffix| type_system_available || !is_typed_suffix(suffix))
        .map(|suffix| (*suffix).to_string())
        .collect()
}

/// Computes the candidate extension list for one configuration build.
///
/// The existence check for the type config artifact runs at most once per
/// resolver; a fresh resolver is constructed for each build, so a config
/// file added mid-build is not observed until the next build.
#[derive(Debug)]
pub struct ExtensionResolver {
    paths: ProjectPaths,
    type_system: OnceLock<bool>,
}

impl ExtensionResolver {
    #[must_use]
    pub fn new(paths: ProjectPaths) -> Self {
        Self {
            paths,
            type_system: OnceLock::new(),
        }
    }

    /// Whether the type-system toolchain is configured (memoized).
    ///
    /// A missing artifact means "feature absent", never an error.
    pub fn type_system_available(&self) -> bool {
        *self
            .type_system
            .get_or_init(|| self.paths.type_config.exists())
    }

    /// The filtered candidate list in priority order.
    #[must_use]
    pub fn candidates(&self) -> Vec<String> {
        filter_candidates(BASE_CANDIDATES, self.type_system_available())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_filter_removes_typed_variants() {
        let filtered = filter_candidates(BASE_CANDIDATES, false);
        assert!(!filtered.iter().any(|s| is_typed_suffix(s)));
        assert_eq!(
            filtered,
            vec![".web.mjs", ".mjs", ".web.js", ".js", ".json", ".web.jsx", ".jsx"]
        );
    }

    #[test]
    fn test_filter_preserves_full_list_when_typed() {
        let filtered = filter_candidates(BASE_CANDIDATES, true);
        assert_eq!(filtered, BASE_CANDIDATES);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let once = filter_candidates(BASE_CANDIDATES, false);
        let once_refs: Vec<&str> = once.iter().map(String::as_str).collect();
        let twice = filter_candidates(&once_refs, false);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_preserves_relative_order() {
        let filtered = filter_candidates(BASE_CANDIDATES, false);
        let mjs = filtered.iter().position(|s| s == ".mjs").unwrap();
        let js = filtered.iter().position(|s| s == ".js").unwrap();
        let json = filtered.iter().position(|s| s == ".json").unwrap();
        assert!(mjs < js && js < json);
    }

    #[test]
    fn test_resolver_detects_type_config() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("tsconfig.json"), "{}").unwrap();

        let resolver = ExtensionResolver::new(ProjectPaths::from_root(dir.path()));
        assert!(resolver.type_system_available());
        assert!(resolver.candidates().iter().any(|s| s == ".tsx"));
    }

    #[test]
    fn test_resolver_missing_config_narrows_list() {
        let dir = tempdir().unwrap();
        let resolver = ExtensionResolver::new(ProjectPaths::from_root(dir.path()));
        assert!(!resolver.type_system_available());
        assert!(!resolver.candidates().iter().any(|s| s == ".ts"));
    }

    #[test]
    fn test_resolver_check_is_memoized() {
        let dir = tempdir().unwrap();
        let resolver = ExtensionResolver::new(ProjectPaths::from_root(dir.path()));
        assert!(!resolver.type_system_available());

        // The artifact appearing after the first probe is not observed.
        fs::write(dir.path().join("tsconfig.json"), "{}").unwrap();
        assert!(!resolver.type_system_available());
        assert!(!resolver.candidates().iter().any(|s| s == ".ts"));
    }
}
