//! Serializable walk records for reproducing failures.

use odyssey_core::{Params, WalkResult, WalkSeed};
use serde::{Deserialize, Serialize};

/// A step as it appears in a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedStep {
    /// Step name
    pub name: String,
    /// Parameters the step received
    #[serde(default)]
    pub params: Params,
}

impl RecordedStep {
    /// Create a new recorded step
    #[must_use]
    pub fn new(name: impl Into<String>, params: Params) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

/// Record of a walk, detached from the step implementations.
///
/// Print it when a walk fails, paste it into a regression test and hand
/// it to [`RandomWalk::replay_record`](crate::walk::RandomWalk::replay_record).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkRecord {
    /// Seed the walk was driven with
    pub seed: WalkSeed,
    /// Executed steps in order
    pub steps: Vec<RecordedStep>,
}

impl WalkRecord {
    /// Create an empty record
    #[must_use]
    pub fn new(seed: WalkSeed) -> Self {
        Self {
            seed,
            steps: Vec::new(),
        }
    }

    /// Add a step to the record
    #[must_use]
    pub fn with_step(mut self, name: impl Into<String>, params: Params) -> Self {
        self.steps.push(RecordedStep::new(name, params));
        self
    }

    /// Get step count
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the record holds no steps
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step names in order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.name.as_str()).collect()
    }

    /// Serialize to JSON
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Serialize to indented JSON
    #[must_use]
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialize from JSON
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::InvalidRecord`](odyssey_core::WalkError::InvalidRecord)
    /// if deserialization fails
    pub fn from_json(json: &str) -> WalkResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Comparison of two walk records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkComparison {
    /// Whether the walks executed the same steps with the same parameters
    pub identical: bool,
    /// Deltas found
    pub deltas: Vec<WalkDelta>,
}

/// A position where two walks disagree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkDelta {
    /// Position in the walk
    pub index: usize,
    /// Step in the first walk, if it reached this far
    pub expected: Option<RecordedStep>,
    /// Step in the second walk, if it reached this far
    pub actual: Option<RecordedStep>,
}

impl WalkComparison {
    /// Compare two walk records step by step.
    ///
    /// Seeds are not compared; two seeds can produce the same walk.
    #[must_use]
    pub fn compare(expected: &WalkRecord, actual: &WalkRecord) -> Self {
        let longest = expected.steps.len().max(actual.steps.len());

        let deltas: Vec<WalkDelta> = (0..longest)
            .filter_map(|index| {
                let left = expected.steps.get(index);
                let right = actual.steps.get(index);
                (left != right).then(|| WalkDelta {
                    index,
                    expected: left.cloned(),
                    actual: right.cloned(),
                })
            })
            .collect();

        Self {
            identical: deltas.is_empty(),
            deltas,
        }
    }

    /// Get delta count
    #[must_use]
    pub fn delta_count(&self) -> usize {
        self.deltas.len()
    }

    /// First position where the walks diverge
    #[must_use]
    pub fn first_divergence(&self) -> Option<usize> {
        self.deltas.first().map(|delta| delta.index)
    }

    /// Get formatted delta report
    #[must_use]
    pub fn report(&self) -> String {
        if self.identical {
            return "Walks are identical".to_string();
        }

        let mut report = format!("Found {} deltas:\n", self.deltas.len());
        for delta in &self.deltas {
            report.push_str(&format!(
                "  Step {}: expected {}, got {}\n",
                delta.index,
                describe(delta.expected.as_ref()),
                describe(delta.actual.as_ref())
            ));
        }
        report
    }
}

fn describe(step: Option<&RecordedStep>) -> String {
    match step {
        Some(step) => format!(
            "'{}' {}",
            step.name,
            serde_json::to_string(&step.params).unwrap_or_default()
        ),
        None => "nothing".to_string(),
    }
}
