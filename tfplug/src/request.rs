//! Request and response types exchanged with the host runtime

use crate::context::Context;
use crate::types::{Config, Diagnostic, State};

#[derive(Clone)]
pub struct ConfigureRequest {
    pub context: Context,
    pub config: Config,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigureResponse {
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Clone)]
pub struct ValidateRequest {
    pub config: Config,
}

#[derive(Debug, Clone, Default)]
pub struct ValidateResponse {
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Clone)]
pub struct CreateRequest {
    pub context: Context,
    pub config: Config,
}

/// `state` stays `None` when nothing was created remotely
#[derive(Debug, Clone)]
pub struct CreateResponse {
    pub state: Option<State>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Clone)]
pub struct ReadRequest {
    pub context: Context,
    pub current_state: State,
}

/// `state` is `None` when the remote object no longer exists
#[derive(Debug, Clone)]
pub struct ReadResponse {
    pub state: Option<State>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Clone)]
pub struct UpdateRequest {
    pub context: Context,
    pub config: Config,
    pub current_state: State,
}

#[derive(Debug, Clone)]
pub struct UpdateResponse {
    pub state: Option<State>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Clone)]
pub struct DeleteRequest {
    pub context: Context,
    pub current_state: State,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteResponse {
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Clone)]
pub struct ImportRequest {
    pub context: Context,
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct ImportResponse {
    pub state: Option<State>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Clone)]
pub struct ReadDataSourceRequest {
    pub context: Context,
    pub config: Config,
}

#[derive(Debug, Clone)]
pub struct ReadDataSourceResponse {
    pub state: Option<State>,
    pub diagnostics: Vec<Diagnostic>,
}
