//! Context implementation for cancellation and timeouts
//!
//! This module provides the Context type which carries cancellation signals
//! and deadlines across async boundaries. Derived contexts observe their
//! parent's cancellation; cancelling a child leaves the parent running.

use crate::error::{Result, TfplugError};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Context carries cancellation signals and deadlines
/// CRITICAL: Pass this as first parameter to ALL async trait methods
#[derive(Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    deadline: Option<Instant>,
    timeout: Option<Duration>,
    done_tx: watch::Sender<bool>,
    parent: Option<Context>,
}

impl Context {
    pub fn new() -> Self {
        let (done_tx, _) = watch::channel(false);

        Self {
            inner: Arc::new(ContextInner {
                deadline: None,
                timeout: None,
                done_tx,
                parent: None,
            }),
        }
    }

    /// Derives a context whose deadline is at most `timeout` from now
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let requested = Instant::now() + timeout;
        let deadline = match self.inner.deadline {
            Some(parent) if parent < requested => parent,
            _ => requested,
        };
        let (done_tx, _) = watch::channel(false);

        Self {
            inner: Arc::new(ContextInner {
                deadline: Some(deadline),
                timeout: Some(timeout),
                done_tx,
                parent: Some(self.clone()),
            }),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        if *self.inner.done_tx.borrow() {
            return true;
        }
        if self.inner.deadline.is_some_and(|d| Instant::now() >= d) {
            return true;
        }
        self.inner
            .parent
            .as_ref()
            .is_some_and(|parent| parent.is_cancelled())
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }

    pub fn cancel(&self) {
        let _ = self.inner.done_tx.send(true);
    }

    /// Resolves once this context or any ancestor is cancelled
    pub async fn cancelled(&self) {
        let mut waits = Vec::new();
        let mut current = Some(self);
        while let Some(ctx) = current {
            let mut done = ctx.inner.done_tx.subscribe();
            waits.push(Box::pin(async move {
                if done.wait_for(|cancelled| *cancelled).await.is_err() {
                    std::future::pending::<()>().await;
                }
            }));
            current = ctx.inner.parent.as_ref();
        }
        futures::future::select_all(waits).await;
    }

    /// Runs `future` until it completes, the deadline passes or the context
    /// is cancelled, whichever happens first
    pub async fn run<T, F>(&self, operation: &str, future: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if *self.inner.done_tx.borrow()
            || self
                .inner
                .parent
                .as_ref()
                .is_some_and(|parent| parent.is_cancelled())
        {
            return Err(TfplugError::Cancelled(operation.to_string()));
        }

        let deadline = self.inner.deadline;
        let timeout = self.inner.timeout.unwrap_or_default();
        let expired = async move {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            result = future => result,
            _ = self.cancelled() => Err(TfplugError::Cancelled(operation.to_string())),
            _ = expired => Err(TfplugError::Timeout {
                operation: operation.to_string(),
                after: timeout,
            }),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-operation time limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub create: Duration,
    pub read: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            create: Duration::from_secs(10 * 60),
            read: Duration::from_secs(5 * 60),
            update: Duration::from_secs(10 * 60),
            delete: Duration::from_secs(10 * 60),
        }
    }
}
