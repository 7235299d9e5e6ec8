//! Step trait and the closure-backed step builder.

use async_trait::async_trait;
use futures::future::BoxFuture;
use odyssey_core::{Params, StepResult};

/// Weight used when a step declares none, or a non-positive one
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Replace a missing or unusable weight with [`DEFAULT_WEIGHT`]
#[must_use]
pub fn normalize_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        DEFAULT_WEIGHT
    }
}

/// A named unit of test action.
///
/// `C` is the test context handed to every execution: whatever assertion
/// or interaction primitives the steps need. The walk never inspects it.
#[async_trait]
pub trait Step<C>: Send + Sync {
    /// Unique step name
    fn name(&self) -> &str;

    /// Relative selection weight. Only consulted by
    /// [`Selection::Weighted`](crate::config::Selection::Weighted).
    fn weight(&self) -> f64 {
        DEFAULT_WEIGHT
    }

    /// Whether the step may run in the current state.
    ///
    /// Evaluated fresh before every random selection.
    fn is_applicable(&self) -> bool {
        true
    }

    /// Perform the action and its assertions
    async fn execute(&self, ctx: &C, params: &Params) -> StepResult;
}

type ExecuteFn<C> = dyn for<'a> Fn(&'a C, &'a Params) -> BoxFuture<'a, StepResult> + Send + Sync;
type PredicateFn = dyn Fn() -> bool + Send + Sync;

/// Step assembled from closures.
///
/// ```ignore
/// let step = FnStep::new("push", |ctx: &Ctx, params| {
///     async move { ctx.stack.push(params.get_i64("value")) }.boxed()
/// })
/// .with_weight(2.0)
/// .applicable_when(move || !full.load(Ordering::SeqCst));
/// ```
pub struct FnStep<C> {
    name: String,
    weight: f64,
    applicable: Option<Box<PredicateFn>>,
    execute: Box<ExecuteFn<C>>,
}

impl<C> FnStep<C>
where
    C: Send + Sync + 'static,
{
    /// Create a step with the given execution logic
    #[must_use]
    pub fn new<F>(name: impl Into<String>, execute: F) -> Self
    where
        F: for<'a> Fn(&'a C, &'a Params) -> BoxFuture<'a, StepResult> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            weight: DEFAULT_WEIGHT,
            applicable: None,
            execute: Box::new(execute),
        }
    }

    /// Set the selection weight
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = normalize_weight(weight);
        self
    }

    /// Guard the step with an applicability predicate
    #[must_use]
    pub fn applicable_when<P>(mut self, predicate: P) -> Self
    where
        P: Fn() -> bool + Send + Sync + 'static,
    {
        self.applicable = Some(Box::new(predicate));
        self
    }
}

#[async_trait]
impl<C> Step<C> for FnStep<C>
where
    C: Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn is_applicable(&self) -> bool {
        self.applicable.as_ref().map_or(true, |predicate| predicate())
    }

    async fn execute(&self, ctx: &C, params: &Params) -> StepResult {
        (self.execute)(ctx, params).await
    }
}

impl<C> std::fmt::Debug for FnStep<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnStep")
            .field("name", &self.name)
            .field("weight", &self.weight)
            .field("guarded", &self.applicable.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use odyssey_core::StepError;
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Default)]
    struct Ctx {
        seen: Mutex<Vec<Params>>,
    }

    fn recording(name: &str) -> FnStep<Ctx> {
        FnStep::new(name, |ctx: &Ctx, params: &Params| {
            async move {
                ctx.seen.lock().unwrap().push(params.clone());
                Ok(())
            }
            .boxed()
        })
    }

    #[test]
    fn test_normalize_weight() {
        assert_eq!(normalize_weight(2.5), 2.5);
        assert_eq!(normalize_weight(0.0), DEFAULT_WEIGHT);
        assert_eq!(normalize_weight(-1.0), DEFAULT_WEIGHT);
        assert_eq!(normalize_weight(f64::NAN), DEFAULT_WEIGHT);
        assert_eq!(normalize_weight(f64::INFINITY), DEFAULT_WEIGHT);
    }

    #[test]
    fn test_fn_step_defaults() {
        let step = recording("noop");
        assert_eq!(step.name(), "noop");
        assert_eq!(step.weight(), DEFAULT_WEIGHT);
        assert!(step.is_applicable());
    }

    #[test]
    fn test_fn_step_zero_weight_falls_back() {
        let step = recording("noop").with_weight(0.0);
        assert_eq!(step.weight(), DEFAULT_WEIGHT);
    }

    #[test]
    fn test_fn_step_predicate_is_live() {
        let open = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&open);
        let step = recording("close").applicable_when(move || flag.load(Ordering::SeqCst));

        assert!(!step.is_applicable());
        open.store(true, Ordering::SeqCst);
        assert!(step.is_applicable());
    }

    #[tokio::test]
    async fn test_fn_step_execute_passes_params() {
        let ctx = Ctx::default();
        let step = recording("push");
        let params = Params::new().with("value", 3);

        step.execute(&ctx, &params).await.unwrap();
        assert_eq!(ctx.seen.lock().unwrap().as_slice(), &[params]);
    }

    #[tokio::test]
    async fn test_fn_step_execute_propagates_error() {
        let step: FnStep<Ctx> = FnStep::new("broken", |_ctx: &Ctx, _params: &Params| {
            async { Err::<(), StepError>("invariant violated".into()) }.boxed()
        });

        let err = step.execute(&Ctx::default(), &Params::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "invariant violated");
    }

    #[test]
    fn test_fn_step_debug() {
        let step = recording("noop");
        let debug = format!("{:?}", step);
        assert!(debug.contains("noop"));
        assert!(debug.contains("guarded: false"));
    }
}
