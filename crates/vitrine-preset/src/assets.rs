//! Static asset policies: inline small payloads, emit the rest as hashed
//! output files.

use serde::Serialize;
use std::path::Path;
use vitrine_util::short_hash;

/// Byte-size cutoff at or below which a binary asset is embedded as a data
/// URI instead of emitted as a separate file.
pub const INLINE_LIMIT: u64 = 10_000;

/// Output name template for emitted assets.
pub const ASSET_NAME_TEMPLATE: &str = "static/media/[name].[hash:8].[ext]";

/// What to do with an asset of a given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetDisposition {
    /// Embed directly as a data URI.
    Inline,
    /// Emit as a separate, content-hashed output file.
    Emit,
}

/// Single-parameter asset policy: inline at or below the limit, emit above
/// it. A policy with no limit always emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetPolicy {
    /// Inline threshold in bytes; `None` means never inline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_limit: Option<u64>,
    /// Template for emitted output names.
    pub name_template: String,
}

impl AssetPolicy {
    /// The raster-image policy: inline at or below [`INLINE_LIMIT`] bytes.
    #[must_use]
    pub fn inline_or_emit() -> Self {
        Self {
            inline_limit: Some(INLINE_LIMIT),
            name_template: ASSET_NAME_TEMPLATE.to_string(),
        }
    }

    /// The catch-all policy: always emit, no inlining threshold.
    #[must_use]
    pub fn emit_only() -> Self {
        Self {
            inline_limit: None,
            name_template: ASSET_NAME_TEMPLATE.to_string(),
        }
    }

    /// Decide what happens to a payload of `size` bytes.
    #[must_use]
    pub fn disposition(&self, size: u64) -> AssetDisposition {
        match self.inline_limit {
            Some(limit) if size <= limit => AssetDisposition::Inline,
            _ => AssetDisposition::Emit,
        }
    }

    /// Render the hashed output name for an emitted asset.
    #[must_use]
    pub fn output_name(&self, path: &Path, content: &[u8]) -> String {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("asset");
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("bin");
        self.name_template
            .replace("[name]", stem)
            .replace("[hash:8]", &short_hash(content, 8))
            .replace("[ext]", ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_at_threshold() {
        let policy = AssetPolicy::inline_or_emit();
        assert_eq!(policy.disposition(10_000), AssetDisposition::Inline);
    }

    #[test]
    fn test_emit_just_above_threshold() {
        let policy = AssetPolicy::inline_or_emit();
        assert_eq!(policy.disposition(10_001), AssetDisposition::Emit);
    }

    #[test]
    fn test_emit_only_never_inlines() {
        let policy = AssetPolicy::emit_only();
        assert_eq!(policy.disposition(0), AssetDisposition::Emit);
        assert_eq!(policy.disposition(5), AssetDisposition::Emit);
    }

    #[test]
    fn test_output_name_is_hashed_and_deterministic() {
        let policy = AssetPolicy::inline_or_emit();
        let name = policy.output_name(Path::new("assets/logo.png"), b"pixels");
        let again = policy.output_name(Path::new("assets/logo.png"), b"pixels");

        assert_eq!(name, again);
        assert!(name.starts_with("static/media/logo."));
        assert!(name.ends_with(".png"));

        let changed = policy.output_name(Path::new("assets/logo.png"), b"other pixels");
        assert_ne!(name, changed);
    }
}
