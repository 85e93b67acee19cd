//! Per-call deadline and cancellation carried into the store layer.

use officedb_core::CallScope;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shareable cancellation switch for in-flight calls.
///
/// Clones observe the same switch; once cancelled it stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Caller-side bounds for one gateway call.
///
/// Without an explicit deadline the gateway's default deadline applies.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
    cancel: Option<CancelToken>,
}

impl CallContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Resolves the store scope, falling back to `default_timeout` from now.
    pub(crate) fn scope(&self, default_timeout: Option<Duration>) -> CallScope {
        let mut scope = CallScope::unbounded();
        let deadline = self
            .deadline
            .or_else(|| default_timeout.map(|timeout| Instant::now() + timeout));
        if let Some(deadline) = deadline {
            scope = scope.with_deadline(deadline);
        }
        if let Some(token) = &self.cancel {
            scope = scope.with_cancel_flag(token.0.clone());
        }
        scope
    }
}
