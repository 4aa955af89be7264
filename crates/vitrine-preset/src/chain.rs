//! Transform chain types.
//!
//! A chain is an ordered sequence of named steps with options. The preset
//! fixes the sequence and the options; in which direction the host runtime
//! composes the steps is the host's convention, not ours.

use serde::Serialize;
use serde_json::Value;

/// One named processing step with host-facing options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformStep {
    /// Transform identifier, resolved by the host runtime.
    pub id: String,
    /// Options handed to the transform verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl TransformStep {
    /// A step with no options.
    #[must_use]
    pub fn bare(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            options: None,
        }
    }

    /// A step with options.
    #[must_use]
    pub fn with_options(id: impl Into<String>, options: Value) -> Self {
        Self {
            id: id.into(),
            options: Some(options),
        }
    }
}

/// An ordered sequence of transform steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TransformChain {
    steps: Vec<TransformStep>,
}

impl TransformChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_steps(steps: Vec<TransformStep>) -> Self {
        Self { steps }
    }

    /// Append a step at the end of the chain.
    pub fn push(&mut self, step: TransformStep) {
        self.steps.push(step);
    }

    /// Insert a step after the step with the given id.
    ///
    /// No-op when no step has that id; chain edits are always relative to a
    /// named stage, never to a position.
    pub fn insert_after(&mut self, id: &str, step: TransformStep) {
        if let Some(idx) = self.steps.iter().position(|s| s.id == id) {
            self.steps.insert(idx + 1, step);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransformStep> {
        self.steps.iter()
    }

    #[must_use]
    pub fn steps(&self) -> &[TransformStep] {
        &self.steps
    }

    /// Find a step by id.
    #[must_use]
    pub fn step(&self, id: &str) -> Option<&TransformStep> {
        self.steps.iter().find(|s| s.id == id)
    }
}

impl<'a> IntoIterator for &'a TransformChain {
    type Item = &'a TransformStep;
    type IntoIter = std::slice::Iter<'a, TransformStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
