//! Resource trait and related types
//!
//! Resources implement the remote calls only. Validation, defaults, timeouts,
//! not-found handling and read-after-write are driven by
//! [`ResourceReconciler`](crate::reconciler::ResourceReconciler).

use crate::codec::Changes;
use crate::context::{Context, Timeouts};
use crate::error::{Result, TfplugError};
use crate::import::ImportTemplate;
use crate::schema::Schema;
use crate::types::{Config, State};
use async_trait::async_trait;

/// How a resource's remote object comes and goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// Created and deleted through the API
    #[default]
    Managed,
    /// Account-wide settings that always exist remotely; create writes them
    /// and delete only forgets them locally
    Singleton,
}

/// Base trait for resources - implement the remote CRUD calls
/// Type name should be constant and match the key in the provider registry
#[async_trait]
pub trait Resource: Send + Sync {
    /// Type name should be constant (e.g., "twilio_sip_domain")
    fn type_name(&self) -> &str;

    /// Human readable name used in diagnostics ("SIP domain")
    fn display_name(&self) -> &str;

    fn schema(&self) -> Schema;

    /// Template import IDs must follow; `None` means the ID is the bare `sid`
    fn import_template(&self) -> Option<ImportTemplate> {
        None
    }

    fn timeouts(&self) -> Timeouts {
        Timeouts::default()
    }

    fn lifecycle(&self) -> Lifecycle {
        Lifecycle::Managed
    }

    /// Issues the create call for a validated configuration
    /// MUST return a seed holding the new `id` and any values the API only
    /// reveals at creation (e.g. generated secrets)
    async fn create(&self, ctx: &Context, config: &Config) -> Result<State>;

    /// Fetches the remote object addressed by `state`
    /// MUST return the full state, or a `NotFound` error when it is gone
    async fn read(&self, ctx: &Context, state: &State) -> Result<State>;

    /// Applies in-place changes; only changed attributes should be sent
    async fn update(&self, _ctx: &Context, _changes: &Changes<'_>) -> Result<()> {
        Err(TfplugError::UpdateNotSupported(self.type_name().to_string()))
    }

    /// Removes the remote object
    async fn delete(&self, ctx: &Context, state: &State) -> Result<()>;
}
