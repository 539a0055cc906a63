//! Mutation coordinator.

use std::future::Future;
use std::sync::Arc;
use stockroom_cache::InvalidateFamily;
use stockroom_core::{Result, Validate};

/// Lifecycle of one mutation instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl MutationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, MutationState::Succeeded | MutationState::Failed)
    }
}

/// Runs create/update/delete operations: local validation first, the
/// remote call exactly once, and family invalidation only after success.
pub struct MutationCoordinator {
    caches: Arc<dyn InvalidateFamily>,
    families: Vec<&'static str>,
    state: MutationState,
    last_error: Option<String>,
}

impl MutationCoordinator {
    pub fn new(
        caches: Arc<dyn InvalidateFamily>,
        families: impl IntoIterator<Item = &'static str>,
    ) -> Self {
        Self {
            caches,
            families: families.into_iter().collect(),
            state: MutationState::Idle,
            last_error: None,
        }
    }

    pub fn state(&self) -> MutationState {
        self.state
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Closing the editing surface resets the instance for reuse.
    pub fn reset(&mut self) {
        self.state = MutationState::Idle;
        self.last_error = None;
    }

    /// Validates the payload locally, then dispatches the remote operation
    /// exactly once. No retry: every failure requires explicit re-action.
    pub async fn submit<P, Op, Fut, R>(&mut self, payload: P, op: Op) -> Result<R>
    where
        P: Validate,
        Op: FnOnce(P) -> Fut,
        Fut: Future<Output = Result<R>>,
    {
        self.state = MutationState::Submitting;

        if let Err(err) = payload.validate() {
            self.state = MutationState::Failed;
            self.last_error = Some(err.to_string());
            tracing::debug!(error = %err, "submission blocked by local validation");
            return Err(err);
        }

        match op(payload).await {
            Ok(out) => {
                self.state = MutationState::Succeeded;
                self.last_error = None;
                for family in &self.families {
                    self.caches.invalidate_family(family);
                }
                Ok(out)
            }
            Err(err) => {
                // cache untouched; the form keeps its state for resubmission
                self.state = MutationState::Failed;
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }
}
