//! DataSource trait
//!
//! Data sources are read-only projections of remote objects or collections.

use crate::context::{Context, Timeouts};
use crate::error::Result;
use crate::schema::Schema;
use crate::types::{Config, State};
use async_trait::async_trait;

/// Base trait for data sources - implement read operations
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Type name should be constant (e.g., "twilio_taskrouter_workflows")
    fn type_name(&self) -> &str;

    /// Human readable name used in diagnostics ("workflows")
    fn display_name(&self) -> &str;

    fn schema(&self) -> Schema;

    fn timeouts(&self) -> Timeouts {
        Timeouts::default()
    }

    /// Called to read data - this is the only operation for data sources
    /// MUST populate all attributes and an `id`
    async fn read(&self, ctx: &Context, config: &Config) -> Result<State>;
}
