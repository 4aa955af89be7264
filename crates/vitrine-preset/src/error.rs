use crate::base::RulePurpose;
use thiserror::Error;

/// Error type for preset construction.
///
/// Almost everything in this crate is infallible by construction; the one
/// fallible operation is looking up a named rule in a [`crate::BaseRuleSet`],
/// which must fail at configuration-build time rather than hand the host a
/// malformed chain.
#[derive(Error, Debug)]
pub enum Error {
    #[error("base rule set has no rule for purpose '{purpose}' (expected rule named '{expected}')")]
    MissingBaseRule {
        purpose: RulePurpose,
        expected: &'static str,
    },
}
