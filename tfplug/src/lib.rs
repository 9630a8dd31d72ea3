//! tfplug - Terraform Plugin Framework for Rust
//!
//! A framework for building Terraform providers in Rust: typed configuration
//! values, schemas with static validation, and a reconciler that drives each
//! resource through create, read, update, delete and import.

// Core modules
pub mod context;
pub mod error;
pub mod schema;
pub mod types;

// Provider API modules
pub mod data_source;
pub mod provider;
pub mod reconciler;
pub mod request;
pub mod resource;

// Helper modules
pub mod codec;
pub mod import;
pub mod logging;
pub mod pagination;
pub mod plan_modifier;
pub mod validator;

// Re-exports for convenience
pub use codec::{Changes, WriteIntent};
pub use context::{Context, Timeouts};
pub use data_source::DataSource;
pub use error::{Result, TfplugError};
pub use import::{import_state_passthrough_id, ImportTemplate};
pub use logging::{LogLevel, LoggingConfig};
pub use pagination::{collect_pages, Page};
pub use provider::{
    DataSourceRegistration, Provider, Registry, ResourceRegistration, ServiceRegistration,
};
pub use reconciler::{DataSourceReader, ResourceReconciler};
pub use resource::{Lifecycle, Resource};
pub use schema::{AttributeBuilder, AttributeType, NestedBlockBuilder, Schema, SchemaBuilder};
pub use types::{AttributePath, Config, Diagnostic, Dynamic, DynamicValue, State};
