//! Random walk orchestrator.

use crate::config::WalkConfig;
use crate::history::{History, HistoryEntry};
use crate::record::WalkRecord;
use crate::registry::StepRegistry;
use crate::select::Selector;
use crate::step::Step;
use odyssey_core::{Params, WalkError, WalkResult, WalkSeed};
use std::sync::Arc;
use tracing::{debug, trace};

/// Drives a system under test through randomly chosen steps.
///
/// Owns the registered steps, the history since the last reset, and the
/// test context handed to every step. Driving operations take `&mut self`,
/// so exactly one step executes at a time and each one completes before
/// the next is chosen.
pub struct RandomWalk<C> {
    /// Test context passed to every step
    context: C,
    /// Registered steps
    registry: StepRegistry<C>,
    /// Executed steps; `None` until first use
    history: Option<History<C>>,
    /// Seeded step selection
    selector: Selector,
    /// Configuration
    config: WalkConfig,
}

impl<C> RandomWalk<C>
where
    C: Send + Sync + 'static,
{
    /// Create a walk with the default configuration (seed 42, uniform)
    #[must_use]
    pub fn new(context: C) -> Self {
        Self::with_config(context, WalkConfig::default())
    }

    /// Create a walk with a custom configuration
    #[must_use]
    pub fn with_config(context: C, config: WalkConfig) -> Self {
        Self {
            context,
            registry: StepRegistry::new(),
            history: None,
            selector: Selector::from_config(&config),
            config,
        }
    }

    /// Register a step with optional default parameters
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::DuplicateStep`] if a step with the same name is
    /// already registered
    pub fn register<S>(&mut self, step: S, default_params: Option<Params>) -> WalkResult<()>
    where
        S: Step<C> + 'static,
    {
        self.register_shared(Arc::new(step), default_params)
    }

    /// Register an already shared step
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::DuplicateStep`] if a step with the same name is
    /// already registered
    pub fn register_shared(
        &mut self,
        step: Arc<dyn Step<C>>,
        default_params: Option<Params>,
    ) -> WalkResult<()> {
        let name = step.name().to_string();
        self.registry.register(step, default_params)?;
        debug!(step = %name, registered = self.registry.len(), "registered step");
        Ok(())
    }

    /// Run `count` randomly chosen steps, one after another.
    ///
    /// History carries over from earlier walks; call [`reset`](Self::reset)
    /// to start over.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first failure
    pub async fn run_random_walk(&mut self, count: usize) -> WalkResult<()> {
        self.history.get_or_insert_with(History::new);
        debug!(count, seed = %self.config.seed, "starting random walk");

        for iteration in 0..count {
            trace!(iteration, "walk iteration");
            self.run_random_step().await?;
        }

        Ok(())
    }

    /// Run one step drawn from the currently applicable ones
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::NoApplicableStep`] if no predicate holds, or
    /// the step's failure
    pub async fn run_random_step(&mut self) -> WalkResult<()> {
        let (step, params) = {
            let candidates = self.registry.applicable();
            let chosen = self
                .selector
                .pick(&candidates)
                .ok_or(WalkError::NoApplicableStep {
                    registered: self.registry.len(),
                })?;
            debug!(
                step = %chosen.name(),
                candidates = candidates.len(),
                "selected step"
            );
            (Arc::clone(&chosen.step), chosen.default_params.clone())
        };

        self.execute_step(step, Some(params)).await
    }

    /// Record and run a step.
    ///
    /// The history entry is appended before execution, so a failing step is
    /// still part of the history.
    ///
    /// A failure from the step comes back as [`WalkError::StepFailed`]. The
    /// step's error sits unchanged in its `source`; use
    /// [`WalkError::into_step_error`] to take it out and downcast it to the
    /// concrete assertion error.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::StepFailed`] carrying the step's own error
    pub async fn execute_step(
        &mut self,
        step: Arc<dyn Step<C>>,
        params: Option<Params>,
    ) -> WalkResult<()> {
        let params = params.unwrap_or_default();
        let name = step.name().to_string();

        self.history
            .get_or_insert_with(History::new)
            .push(HistoryEntry::new(Arc::clone(&step), params.clone()));
        trace!(step = %name, ?params, "executing step");

        step.execute(&self.context, &params)
            .await
            .map_err(|source| WalkError::step_failed(name, source))
    }

    /// Run a registered step by name.
    ///
    /// `None` uses the defaults stored at registration; supplied params
    /// apply to this call only.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::UnknownStep`] if the name is not registered, or
    /// the step's failure
    pub async fn execute_named(&mut self, name: &str, params: Option<Params>) -> WalkResult<()> {
        let (step, params) = {
            let entry = self.registry.get(name)?;
            let params = params.unwrap_or_else(|| entry.default_params.clone());
            (Arc::clone(&entry.step), params)
        };

        self.execute_step(step, Some(params)).await
    }

    /// Discard the current history and re-run `history` in order.
    ///
    /// Each entry completes before the next starts. The resulting history
    /// equals `history` when every step succeeds.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first failure
    pub async fn replay(&mut self, history: &History<C>) -> WalkResult<()> {
        self.reset();
        debug!(steps = history.len(), "replaying history");

        for entry in history {
            self.execute_step(Arc::clone(&entry.step), Some(entry.params.clone()))
                .await?;
        }

        Ok(())
    }

    /// Replay a serialized record against the registered steps.
    ///
    /// Every name is resolved before anything runs; the history is left
    /// alone if one is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::UnknownStep`] for an unregistered name, or the
    /// first step failure
    pub async fn replay_record(&mut self, record: &WalkRecord) -> WalkResult<()> {
        let history = record
            .steps
            .iter()
            .map(|recorded| {
                self.registry.get(&recorded.name).map(|entry| {
                    HistoryEntry::new(Arc::clone(&entry.step), recorded.params.clone())
                })
            })
            .collect::<WalkResult<History<C>>>()?;

        debug!(seed = %record.seed, "replaying walk record");
        self.replay(&history).await
    }

    /// Clear the history. Registrations are kept.
    pub fn reset(&mut self) {
        trace!("resetting history");
        self.history = Some(History::new());
    }

    /// History since the last reset; `None` before first use
    #[must_use]
    pub fn history(&self) -> Option<&History<C>> {
        self.history.as_ref()
    }

    /// Copy of the history, empty before first use
    #[must_use]
    pub fn snapshot(&self) -> History<C> {
        self.history.clone().unwrap_or_default()
    }

    /// Serializable record of the history and seed
    #[must_use]
    pub fn record(&self) -> WalkRecord {
        self.snapshot().to_record(self.config.seed.clone())
    }

    /// Registered steps
    #[must_use]
    pub fn registry(&self) -> &StepRegistry<C> {
        &self.registry
    }

    /// Registered step names in registration order
    #[must_use]
    pub fn step_names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Default parameters stored for a step
    #[must_use]
    pub fn default_params(&self, name: &str) -> Option<&Params> {
        self.registry.get(name).ok().map(|entry| &entry.default_params)
    }

    /// Test context
    #[must_use]
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Mutable test context, for set-up between walks
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Seed driving selection
    #[must_use]
    pub fn seed(&self) -> &WalkSeed {
        &self.config.seed
    }

    /// Configuration
    #[must_use]
    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// Consume the walk, returning the test context
    #[must_use]
    pub fn into_context(self) -> C {
        self.context
    }
}
