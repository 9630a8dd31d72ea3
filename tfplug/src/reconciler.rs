//! Lifecycle driver for resources and data sources
//!
//! `ResourceReconciler` wraps a [`Resource`] and applies the rules every
//! resource shares:
//!
//! - configuration is defaulted and validated before any remote call
//! - create, update and import always finish with a read of the remote object
//! - a read that finds nothing turns the state absent instead of failing
//! - delete treats an already missing object as success
//! - sensitive values the API never returns again are carried over
//! - every step runs under the resource's timeout for that operation

use crate::codec::Changes;
use crate::context::Context;
use crate::data_source::DataSource;
use crate::error::TfplugError;
use crate::import::import_state_passthrough_id;
use crate::plan_modifier::requires_replace;
use crate::request::{
    CreateRequest, CreateResponse, DeleteRequest, DeleteResponse, ImportRequest, ImportResponse,
    ReadDataSourceRequest, ReadDataSourceResponse, ReadRequest, ReadResponse, UpdateRequest,
    UpdateResponse, ValidateRequest, ValidateResponse,
};
use crate::resource::{Lifecycle, Resource};
use crate::schema::Schema;
use crate::types::{has_errors, AttributePath, Config, Diagnostic, State};
use std::sync::Arc;

fn failure(operation: &str, display_name: &str, err: &TfplugError) -> Diagnostic {
    tracing::warn!("Failed to {} {}: {}", operation, display_name, err);
    Diagnostic::error(
        format!("Failed to {} {}", operation, display_name),
        err.to_string(),
    )
}

pub struct ResourceReconciler {
    resource: Arc<dyn Resource>,
    schema: Schema,
}

impl ResourceReconciler {
    pub fn new(resource: Arc<dyn Resource>) -> Self {
        let schema = resource.schema();
        Self { resource, schema }
    }

    pub fn type_name(&self) -> &str {
        self.resource.type_name()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    fn fail(&self, operation: &str, err: &TfplugError) -> Diagnostic {
        failure(operation, self.resource.display_name(), err)
    }

    fn prepare(&self, mut config: Config) -> (Config, Vec<Diagnostic>) {
        self.schema.apply_defaults(&mut config);
        let diagnostics = self.schema.validate(&config);
        (config, diagnostics)
    }

    pub fn validate(&self, request: ValidateRequest) -> ValidateResponse {
        let (_, diagnostics) = self.prepare(request.config);
        ValidateResponse { diagnostics }
    }

    pub async fn create(&self, request: CreateRequest) -> CreateResponse {
        let (config, mut diagnostics) = self.prepare(request.config);
        if has_errors(&diagnostics) {
            return CreateResponse {
                state: None,
                diagnostics,
            };
        }

        let ctx = request
            .context
            .with_timeout(self.resource.timeouts().create);
        tracing::debug!("Creating {}", self.type_name());

        let seed = match ctx.run("create", self.resource.create(&ctx, &config)).await {
            Ok(seed) => seed,
            Err(e) => {
                diagnostics.push(self.fail("create", &e));
                return CreateResponse {
                    state: None,
                    diagnostics,
                };
            }
        };

        let mut state = config;
        state.merge(&seed);
        let Some(id) = state.id() else {
            diagnostics.push(self.fail(
                "create",
                &TfplugError::InvalidState("the API returned no identifier".to_string()),
            ));
            return CreateResponse {
                state: None,
                diagnostics,
            };
        };
        tracing::debug!("Created {} {}", self.type_name(), id);

        // The object exists from here on; failures keep the seeded state so
        // it stays tracked.
        match self.refresh(&ctx, &state).await {
            Ok(Some(new_state)) => CreateResponse {
                state: Some(new_state),
                diagnostics,
            },
            Ok(None) => {
                diagnostics.push(self.fail(
                    "create",
                    &TfplugError::NotFound(format!(
                        "{} {} disappeared right after creation",
                        self.resource.display_name(),
                        id
                    )),
                ));
                CreateResponse {
                    state: Some(state),
                    diagnostics,
                }
            }
            Err(e) => {
                diagnostics.push(self.fail("create", &e));
                CreateResponse {
                    state: Some(state),
                    diagnostics,
                }
            }
        }
    }

    pub async fn read(&self, request: ReadRequest) -> ReadResponse {
        if request.current_state.id().is_none() {
            return ReadResponse {
                state: None,
                diagnostics: vec![],
            };
        }

        let ctx = request.context.with_timeout(self.resource.timeouts().read);
        match self.refresh(&ctx, &request.current_state).await {
            Ok(state) => ReadResponse {
                state,
                diagnostics: vec![],
            },
            Err(e) => ReadResponse {
                diagnostics: vec![self.fail("read", &e)],
                state: Some(request.current_state),
            },
        }
    }

    pub async fn update(&self, request: UpdateRequest) -> UpdateResponse {
        let prior = request.current_state;
        let (config, mut diagnostics) = self.prepare(request.config);
        if has_errors(&diagnostics) {
            return UpdateResponse {
                state: Some(prior),
                diagnostics,
            };
        }

        let replace = requires_replace(&self.schema, &prior, &config);
        if !replace.is_empty() {
            let names: Vec<String> = replace.iter().map(AttributePath::to_string).collect();
            diagnostics.push(self.fail(
                "update",
                &TfplugError::Conflict(format!(
                    "{} cannot be changed in place; the resource must be replaced",
                    names.join(", ")
                )),
            ));
            return UpdateResponse {
                state: Some(prior),
                diagnostics,
            };
        }

        let ctx = request
            .context
            .with_timeout(self.resource.timeouts().update);
        let changes = Changes::updating(&prior, &config);
        tracing::debug!("Updating {} {:?}", self.type_name(), prior.id());

        if let Err(e) = ctx.run("update", self.resource.update(&ctx, &changes)).await {
            diagnostics.push(self.fail("update", &e));
            return UpdateResponse {
                state: Some(prior),
                diagnostics,
            };
        }

        let next = self.desired_state(&prior, &config);
        match self.refresh(&ctx, &next).await {
            Ok(Some(state)) => UpdateResponse {
                state: Some(state),
                diagnostics,
            },
            Ok(None) => {
                diagnostics.push(self.fail(
                    "update",
                    &TfplugError::NotFound(format!(
                        "{} {} no longer exists",
                        self.resource.display_name(),
                        prior.id().unwrap_or_default()
                    )),
                ));
                UpdateResponse {
                    state: Some(prior),
                    diagnostics,
                }
            }
            Err(e) => {
                diagnostics.push(self.fail("update", &e));
                UpdateResponse {
                    state: Some(next),
                    diagnostics,
                }
            }
        }
    }

    pub async fn delete(&self, request: DeleteRequest) -> DeleteResponse {
        let state = request.current_state;
        let Some(id) = state.id() else {
            return DeleteResponse::default();
        };

        if self.resource.lifecycle() == Lifecycle::Singleton {
            tracing::info!(
                "{} {} cannot be deleted remotely; removing it from state only",
                self.type_name(),
                id
            );
            return DeleteResponse::default();
        }

        let ctx = request
            .context
            .with_timeout(self.resource.timeouts().delete);
        match ctx.run("delete", self.resource.delete(&ctx, &state)).await {
            Ok(()) => {
                tracing::debug!("Deleted {} {}", self.type_name(), id);
                DeleteResponse::default()
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!("{} {} was already deleted", self.type_name(), id);
                DeleteResponse::default()
            }
            Err(e) => DeleteResponse {
                diagnostics: vec![self.fail("delete", &e)],
            },
        }
    }

    pub async fn import(&self, request: ImportRequest) -> ImportResponse {
        let seed = match self.resource.import_template() {
            Some(template) => template.parse(&request.id),
            None => import_state_passthrough_id(AttributePath::new("sid"), &request.id),
        };
        let seed = match seed {
            Ok(seed) => seed,
            Err(e) => {
                return ImportResponse {
                    state: None,
                    diagnostics: vec![self.fail("import", &e)],
                }
            }
        };

        let ctx = request.context.with_timeout(self.resource.timeouts().read);
        match self.refresh(&ctx, &seed).await {
            Ok(Some(state)) => ImportResponse {
                state: Some(state),
                diagnostics: vec![],
            },
            Ok(None) => ImportResponse {
                state: None,
                diagnostics: vec![self.fail(
                    "import",
                    &TfplugError::NotFound(format!(
                        "Cannot import non-existent remote object ({})",
                        request.id
                    )),
                )],
            },
            Err(e) => ImportResponse {
                state: None,
                diagnostics: vec![self.fail("import", &e)],
            },
        }
    }

    /// Reads the remote object; `None` means it no longer exists
    async fn refresh(&self, ctx: &Context, prior: &State) -> crate::Result<Option<State>> {
        match ctx.run("read", self.resource.read(ctx, prior)).await {
            Ok(mut state) => {
                if state.id().is_none() {
                    if let Some(id) = prior.id() {
                        state.set_id(id);
                    }
                }
                self.preserve_sensitive(prior, &mut state);
                Ok(Some(state))
            }
            Err(e) if e.is_not_found() => {
                tracing::info!(
                    "{} {} not found, removing from state",
                    self.type_name(),
                    prior.id().unwrap_or_default()
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Sensitive values the API does not echo back keep their known value
    fn preserve_sensitive(&self, prior: &State, state: &mut State) {
        for attr in self.schema.sensitive_attributes() {
            let path = AttributePath::new(&attr.name);
            if !state.has(&path) {
                if let Some(value) = prior.get(&path) {
                    let _ = state.set_value(&path, value.clone());
                }
            }
        }
    }

    /// Prior state with every configurable attribute replaced by its
    /// configured value
    fn desired_state(&self, prior: &State, config: &Config) -> State {
        let mut next = prior.clone();
        for name in self.schema.configurable_names() {
            let path = AttributePath::new(name);
            match config.get(&path) {
                Some(value) => {
                    let _ = next.set_value(&path, value.clone());
                }
                None => {
                    next.remove(&path);
                }
            }
        }
        next
    }
}

pub struct DataSourceReader {
    data_source: Arc<dyn DataSource>,
    schema: Schema,
}

impl DataSourceReader {
    pub fn new(data_source: Arc<dyn DataSource>) -> Self {
        let schema = data_source.schema();
        Self {
            data_source,
            schema,
        }
    }

    pub fn type_name(&self) -> &str {
        self.data_source.type_name()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn validate(&self, request: ValidateRequest) -> ValidateResponse {
        let mut config = request.config;
        self.schema.apply_defaults(&mut config);
        ValidateResponse {
            diagnostics: self.schema.validate(&config),
        }
    }

    pub async fn read(&self, request: ReadDataSourceRequest) -> ReadDataSourceResponse {
        let mut config = request.config;
        self.schema.apply_defaults(&mut config);
        let mut diagnostics = self.schema.validate(&config);
        if has_errors(&diagnostics) {
            return ReadDataSourceResponse {
                state: None,
                diagnostics,
            };
        }

        let ctx = request
            .context
            .with_timeout(self.data_source.timeouts().read);
        match ctx.run("read", self.data_source.read(&ctx, &config)).await {
            Ok(state) => {
                let mut full = config;
                full.merge(&state);
                ReadDataSourceResponse {
                    state: Some(full),
                    diagnostics,
                }
            }
            Err(e) => {
                diagnostics.push(failure("read", self.data_source.display_name(), &e));
                ReadDataSourceResponse {
                    state: None,
                    diagnostics,
                }
            }
        }
    }
}
