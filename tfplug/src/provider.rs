//! Provider trait and the type-name registry
//!
//! Providers group their resources and data sources by service. Each service
//! contributes registrations; the [`Registry`] merges them and refuses
//! duplicate type names. Factories receive the configured client explicitly.

use crate::data_source::DataSource;
use crate::error::{Result, TfplugError};
use crate::reconciler::{DataSourceReader, ResourceReconciler};
use crate::request::{ConfigureRequest, ConfigureResponse};
use crate::resource::Resource;
use crate::schema::Schema;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Provider - the entry point the host talks to
#[async_trait]
pub trait Provider: Send + Sync {
    /// Schema of the provider configuration block
    fn provider_schema(&self) -> Schema;

    /// Called once with the provider configuration before any resource call
    async fn configure(&mut self, request: ConfigureRequest) -> ConfigureResponse;

    /// Instantiates a resource; fails until `configure` succeeded
    async fn create_resource(&self, name: &str) -> Result<ResourceReconciler>;

    async fn create_data_source(&self, name: &str) -> Result<DataSourceReader>;

    async fn resource_schemas(&self) -> BTreeMap<String, Schema>;

    async fn data_source_schemas(&self) -> BTreeMap<String, Schema>;
}

pub struct ResourceRegistration<C> {
    pub type_name: &'static str,
    pub schema: fn() -> Schema,
    pub factory: fn(C) -> Arc<dyn Resource>,
}

pub struct DataSourceRegistration<C> {
    pub type_name: &'static str,
    pub schema: fn() -> Schema,
    pub factory: fn(C) -> Arc<dyn DataSource>,
}

/// One product area's resources and data sources
pub trait ServiceRegistration<C>: Send + Sync {
    fn name(&self) -> &'static str;

    fn resources(&self) -> Vec<ResourceRegistration<C>> {
        Vec::new()
    }

    fn data_sources(&self) -> Vec<DataSourceRegistration<C>> {
        Vec::new()
    }
}

/// Type-name keyed view over every registered service
pub struct Registry<C> {
    resources: BTreeMap<&'static str, ResourceRegistration<C>>,
    data_sources: BTreeMap<&'static str, DataSourceRegistration<C>>,
}

impl<C: Clone> Registry<C> {
    pub fn new(services: &[Box<dyn ServiceRegistration<C>>]) -> Result<Self> {
        let mut resources = BTreeMap::new();
        let mut data_sources = BTreeMap::new();

        for service in services {
            for registration in service.resources() {
                let name = registration.type_name;
                if resources.insert(name, registration).is_some() {
                    return Err(TfplugError::DuplicateTypeName(name.to_string()));
                }
            }
            for registration in service.data_sources() {
                let name = registration.type_name;
                if data_sources.insert(name, registration).is_some() {
                    return Err(TfplugError::DuplicateTypeName(name.to_string()));
                }
            }
            tracing::trace!("Registered service {}", service.name());
        }

        Ok(Self {
            resources,
            data_sources,
        })
    }

    pub fn resource_types(&self) -> Vec<&'static str> {
        self.resources.keys().copied().collect()
    }

    pub fn data_source_types(&self) -> Vec<&'static str> {
        self.data_sources.keys().copied().collect()
    }

    pub fn resource_schemas(&self) -> BTreeMap<String, Schema> {
        self.resources
            .iter()
            .map(|(name, r)| (name.to_string(), (r.schema)()))
            .collect()
    }

    pub fn data_source_schemas(&self) -> BTreeMap<String, Schema> {
        self.data_sources
            .iter()
            .map(|(name, d)| (name.to_string(), (d.schema)()))
            .collect()
    }

    pub fn create_resource(&self, name: &str, client: C) -> Result<ResourceReconciler> {
        let registration = self
            .resources
            .get(name)
            .ok_or_else(|| TfplugError::ResourceNotFound(name.to_string()))?;
        Ok(ResourceReconciler::new((registration.factory)(client)))
    }

    pub fn create_data_source(&self, name: &str, client: C) -> Result<DataSourceReader> {
        let registration = self
            .data_sources
            .get(name)
            .ok_or_else(|| TfplugError::DataSourceNotFound(name.to_string()))?;
        Ok(DataSourceReader::new((registration.factory)(client)))
    }
}
