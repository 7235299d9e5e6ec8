//! Ordered record of executed steps.

use crate::record::{RecordedStep, WalkRecord};
use crate::step::Step;
use odyssey_core::{Params, WalkSeed};
use std::sync::Arc;

/// One executed step and the parameters it actually received
pub struct HistoryEntry<C> {
    /// Step that ran
    pub step: Arc<dyn Step<C>>,
    /// Parameters passed to it
    pub params: Params,
}

impl<C> HistoryEntry<C> {
    /// Create a new history entry
    #[must_use]
    pub fn new(step: Arc<dyn Step<C>>, params: Params) -> Self {
        Self { step, params }
    }

    /// Name of the step that ran
    #[must_use]
    pub fn name(&self) -> &str {
        self.step.name()
    }
}

impl<C> Clone for HistoryEntry<C> {
    fn clone(&self) -> Self {
        Self {
            step: Arc::clone(&self.step),
            params: self.params.clone(),
        }
    }
}

/// Entries are equal when they name the same step with the same parameters.
impl<C> PartialEq for HistoryEntry<C> {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name() && self.params == other.params
    }
}

impl<C> std::fmt::Debug for HistoryEntry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryEntry")
            .field("step", &self.name())
            .field("params", &self.params)
            .finish()
    }
}

/// Append-only history of a walk
pub struct History<C> {
    entries: Vec<HistoryEntry<C>>,
}

impl<C> History<C> {
    /// Create an empty history
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a history from entries, e.g. a hand-written reproduction
    #[must_use]
    pub fn from_entries(entries: Vec<HistoryEntry<C>>) -> Self {
        Self { entries }
    }

    pub(crate) fn push(&mut self, entry: HistoryEntry<C>) {
        self.entries.push(entry);
    }

    /// Number of executed steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has executed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrow the entries in execution order
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry<C>] {
        &self.entries
    }

    /// Iterate over entries in execution order
    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry<C>> {
        self.entries.iter()
    }

    /// Most recently executed entry
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry<C>> {
        self.entries.last()
    }

    /// Step names in execution order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(HistoryEntry::name).collect()
    }

    /// Convert to a serializable record
    #[must_use]
    pub fn to_record(&self, seed: WalkSeed) -> WalkRecord {
        WalkRecord {
            seed,
            steps: self
                .entries
                .iter()
                .map(|entry| RecordedStep::new(entry.name(), entry.params.clone()))
                .collect(),
        }
    }
}

impl<C> Default for History<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for History<C> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<C> PartialEq for History<C> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<C> std::fmt::Debug for History<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

impl<'a, C> IntoIterator for &'a History<C> {
    type Item = &'a HistoryEntry<C>;
    type IntoIter = std::slice::Iter<'a, HistoryEntry<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<C> FromIterator<HistoryEntry<C>> for History<C> {
    fn from_iter<I: IntoIterator<Item = HistoryEntry<C>>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::FnStep;
    use futures::FutureExt;

    fn noop(name: &str) -> Arc<dyn Step<()>> {
        Arc::new(FnStep::new(name, |_ctx: &(), _params: &Params| async { Ok(()) }.boxed()))
    }

    #[test]
    fn test_history_new() {
        let history: History<()> = History::new();
        assert!(history.is_empty());
        assert!(history.last().is_none());
    }

    #[test]
    fn test_history_push_keeps_order() {
        let mut history = History::new();
        history.push(HistoryEntry::new(noop("a"), Params::new()));
        history.push(HistoryEntry::new(noop("b"), Params::new().with("y", 2)));

        assert_eq!(history.len(), 2);
        assert_eq!(history.names(), vec!["a", "b"]);
        assert_eq!(history.last().unwrap().params.get_i64("y"), Some(2));
    }

    #[test]
    fn test_entry_equality_by_name_and_params() {
        let first = HistoryEntry::new(noop("a"), Params::new().with("x", 1));
        let same = HistoryEntry::new(noop("a"), Params::new().with("x", 1));
        let other_params = HistoryEntry::new(noop("a"), Params::new().with("x", 2));
        let other_step = HistoryEntry::new(noop("b"), Params::new().with("x", 1));

        assert_eq!(first, same);
        assert_ne!(first, other_params);
        assert_ne!(first, other_step);
    }

    #[test]
    fn test_history_to_record() {
        let history: History<()> = [
            HistoryEntry::new(noop("a"), Params::new().with("x", 1)),
            HistoryEntry::new(noop("b"), Params::new()),
        ]
        .into_iter()
        .collect();

        let record = history.to_record(WalkSeed::from_literal(7));
        assert_eq!(record.seed.seed, 7);
        assert_eq!(record.len(), 2);
        assert_eq!(record.steps[0].name, "a");
        assert_eq!(record.steps[0].params.get_i64("x"), Some(1));
    }

    #[test]
    fn test_history_debug_shows_names() {
        let history = History::from_entries(vec![HistoryEntry::new(noop("login"), Params::new())]);
        assert!(format!("{:?}", history).contains("login"));
    }
}
