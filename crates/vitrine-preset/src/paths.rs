use serde::Serialize;
use std::path::{Path, PathBuf};

/// Project layout the preset is computed against.
///
/// All paths are absolute or root-relative as the host supplies them; the
/// preset never canonicalizes. The only path that is ever probed on disk is
/// [`ProjectPaths::type_config`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPaths {
    /// Project root directory.
    pub root: PathBuf,
    /// First-party source directory. The app chain compiles the whole
    /// project root; this narrower path is for callers that want it.
    pub app_src: PathBuf,
    /// Vendored dependency directory, excluded from the app chain.
    pub node_modules: PathBuf,
    /// Shared variables stylesheet used as an extra import root by the
    /// vendor-prefixing stage.
    pub shared_variables: PathBuf,
    /// Type-system configuration artifact; its presence enables the typed
    /// extension candidates.
    pub type_config: PathBuf,
}

impl ProjectPaths {
    /// Conventional layout under a project root.
    #[must_use]
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            app_src: root.join("src"),
            node_modules: root.join("node_modules"),
            shared_variables: root.join("src").join("variables.css"),
            type_config: root.join("tsconfig.json"),
            root,
        }
    }

    /// Override the first-party source directory.
    #[must_use]
    pub fn with_app_src(mut self, app_src: impl Into<PathBuf>) -> Self {
        self.app_src = app_src.into();
        self
    }

    /// Whether `path` falls under the first-party source directory.
    #[must_use]
    pub fn in_app_src(&self, path: &Path) -> bool {
        path.starts_with(&self.app_src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_root_layout() {
        let paths = ProjectPaths::from_root("/proj");
        assert_eq!(paths.app_src, PathBuf::from("/proj/src"));
        assert_eq!(paths.node_modules, PathBuf::from("/proj/node_modules"));
        assert_eq!(paths.type_config, PathBuf::from("/proj/tsconfig.json"));
        assert_eq!(
            paths.shared_variables,
            PathBuf::from("/proj/src/variables.css")
        );
    }

    #[test]
    fn test_in_app_src() {
        let paths = ProjectPaths::from_root("/proj");
        assert!(paths.in_app_src(Path::new("/proj/src/App.tsx")));
        assert!(!paths.in_app_src(Path::new("/proj/node_modules/lib/index.js")));
    }

    #[test]
    fn test_with_app_src() {
        let paths = ProjectPaths::from_root("/proj").with_app_src("/proj/lib");
        assert!(paths.in_app_src(Path::new("/proj/lib/main.js")));
        assert!(!paths.in_app_src(Path::new("/proj/src/main.js")));
    }
}
