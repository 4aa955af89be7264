//! Style-chain construction.
//!
//! Builds the transform chain for stylesheet-like inputs: runtime injection,
//! CSS interpretation, vendor prefixing, and optionally one trailing
//! preprocessor stage. The builder is pure; everything it emits is a function
//! of its arguments.

use crate::chain::{TransformChain, TransformStep};
use serde::Serialize;
use serde_json::json;
use std::path::Path;
use vitrine_util::short_hash;

/// Deterministic naming for scoped (module) class names.
///
/// The rendered name is stable across rebuilds and collision-free across
/// files because the digest covers the resource path as well as the local
/// class name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalIdentStrategy {
    /// Template advertised to the host runtime.
    pub template: String,
}

impl LocalIdentStrategy {
    /// The stable strategy used for all scoped stylesheets.
    #[must_use]
    pub fn stable() -> Self {
        Self {
            template: "[name]_[local]__[hash:5]".to_string(),
        }
    }

    /// Render a scoped class name for `local` defined in `resource`.
    #[must_use]
    pub fn render(&self, resource: &Path, local: &str) -> String {
        let stem = resource
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("style");
        // `Button.module.css` scopes as `Button`, not `Button.module`.
        let stem = stem.strip_suffix(".module").unwrap_or(stem);
        let mut seed = resource.to_string_lossy().replace('\\', "/");
        seed.push('\0');
        seed.push_str(local);
        format!("{stem}_{local}__{}", short_hash(seed.as_bytes(), 5))
    }
}

/// Options for the CSS-interpretation stage of a style chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleOptions {
    /// Number of loader stages that run before the CSS-interpretation stage
    /// in application order, so `@import`/`url()` references are routed back
    /// through the same chain instead of being skipped.
    pub import_loaders: u32,
    /// Whether class names are scoped per file.
    pub modules: bool,
    /// Naming strategy for scoped class names; present iff `modules` is on.
    pub local_ident: Option<LocalIdentStrategy>,
}

impl StyleOptions {
    /// Plain (unscoped) stylesheet options.
    #[must_use]
    pub fn plain(import_loaders: u32) -> Self {
        Self {
            import_loaders,
            modules: false,
            local_ident: None,
        }
    }

    /// Scoped (module) stylesheet options with the stable naming strategy.
    #[must_use]
    pub fn scoped(import_loaders: u32) -> Self {
        Self {
            import_loaders,
            modules: true,
            local_ident: Some(LocalIdentStrategy::stable()),
        }
    }
}

/// Build a style chain in fixed order: runtime injection, CSS interpretation,
/// vendor prefixing, then the preprocessor iff one is supplied.
///
/// `shared_variables` is handed to the prefixing stage as an additional
/// import root.
#[must_use]
pub fn build_style_chain(
    options: &StyleOptions,
    preprocessor: Option<&str>,
    shared_variables: &Path,
) -> TransformChain {
    let mut css_options = json!({
        "importLoaders": options.import_loaders,
        "modules": options.modules,
    });
    if let Some(ident) = &options.local_ident {
        css_options["localIdent"] = json!(ident);
    }

    let mut chain = TransformChain::from_steps(vec![
        TransformStep::bare("style-loader"),
        TransformStep::with_options("css-loader", css_options),
        TransformStep::with_options(
            "postcss-loader",
            json!({
                "stage": 0,
                "flexbox": "no-2009",
                "features": { "color-mod-function": true },
                "importFrom": shared_variables.to_string_lossy().replace('\\', "/"),
            }),
        ),
    ]);

    if let Some(id) = preprocessor {
        chain.push(TransformStep::bare(id));
    }

    chain
}
