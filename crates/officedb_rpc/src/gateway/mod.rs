//! Typed in-process call surface over the entity services.
//!
//! # Responsibility
//! - Translate typed requests into one entity-service call each.
//! - Classify every failure once into a `Status`.
//! - Emit one `rpc_call` log event per call.
//!
//! # Invariants
//! - Stateless between calls; the store handle is the only shared resource.
//! - One request issues at most one store round trip. Nothing is retried.
//! - Log events carry method, status, code and duration, never entity data.

use crate::config::GatewayConfig;
use crate::context::CallContext;
use crate::status::{Code, Status};
use log::{error, info, warn};
use officedb_core::{
    open_db, CallScope, Entity, EntityService, ServiceResult, SqliteDocumentRepository,
    StoreHandle,
};
use std::time::{Duration, Instant};

mod people;
mod projects;
mod tickets;

/// Gateway serving person, ticket and project calls from one store.
///
/// Cheap to clone; clones share the store handle and may be used from any
/// thread.
#[derive(Debug, Clone)]
pub struct OfficeGateway {
    store: StoreHandle,
    default_deadline: Option<Duration>,
}

impl OfficeGateway {
    /// Serves calls from `store` without a default deadline.
    pub fn new(store: StoreHandle) -> Self {
        Self {
            store,
            default_deadline: None,
        }
    }

    /// Deadline applied to calls whose context has none.
    pub fn with_default_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.default_deadline = deadline;
        self
    }

    /// Opens the configured store file and applies the configured deadline.
    ///
    /// # Errors
    /// - `Internal` when the store cannot be opened or bootstrapped.
    pub fn open(config: &GatewayConfig) -> Result<Self, Status> {
        let store = open_db(&config.db_path).map_err(Status::from)?;
        Ok(Self::new(store).with_default_deadline(config.default_deadline))
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    pub fn default_deadline(&self) -> Option<Duration> {
        self.default_deadline
    }

    fn service<E: Entity>(&self, scope: CallScope) -> EntityService<E, SqliteDocumentRepository> {
        EntityService::new(
            SqliteDocumentRepository::new(self.store.clone(), E::COLLECTION).with_scope(scope),
        )
    }

    fn call<T>(
        &self,
        method: &'static str,
        ctx: &CallContext,
        op: impl FnOnce(CallScope) -> ServiceResult<T>,
    ) -> Result<T, Status> {
        let started_at = Instant::now();
        let result = op(ctx.scope(self.default_deadline)).map_err(Status::from);
        let duration_ms = started_at.elapsed().as_millis();

        match &result {
            Ok(_) => info!(
                "event=rpc_call module=rpc status=ok method={method} duration_ms={duration_ms}"
            ),
            Err(status) if status.code == Code::Internal => error!(
                "event=rpc_call module=rpc status=error method={method} duration_ms={duration_ms} code={} error={}",
                status.code, status.message
            ),
            Err(status) => warn!(
                "event=rpc_call module=rpc status=error method={method} duration_ms={duration_ms} code={}",
                status.code
            ),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::OfficeGateway;

    fn assert_send_sync<T: Send + Sync + Clone>() {}

    #[test]
    fn gateway_is_shareable_across_threads() {
        assert_send_sync::<OfficeGateway>();
    }
}
