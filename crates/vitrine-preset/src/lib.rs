//! Bundler preset for the vitrine component sandbox.
//!
//! Computes the declarative configuration the sandbox hands to its external
//! bundler runtime: which transform chain applies to a given source file, in
//! what order, with what options, and which file suffixes are tried when an
//! import path omits its extension. The preset only *describes* the pipeline;
//! running transforms, emitting bundles, and watching the filesystem belong
//! to the host runtime.
//!
//! The two entry points are [`preset::compose`] (story rendering) and
//! [`preset::compose_from_dev`] (reuse of the dev-server rule set by name).

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod assets;
pub mod base;
pub mod chain;
pub mod error;
pub mod extensions;
pub mod paths;
pub mod preset;
pub mod rules;
pub mod style;

pub use assets::{AssetDisposition, AssetPolicy};
pub use base::{BaseRuleSet, RulePurpose};
pub use chain::{TransformChain, TransformStep};
pub use error::Error;
pub use extensions::{filter_candidates, ExtensionResolver, BASE_CANDIDATES};
pub use paths::ProjectPaths;
pub use preset::{compose, compose_from_dev, Environment, PartialConfig};
pub use rules::{DispatchRule, DispatchTable, PathPattern, RuleAction, RuleScope};
pub use style::{build_style_chain, LocalIdentStrategy, StyleOptions};
