//! Scope-bound async work
//!
//! A [`UiScope`] stands for the lifetime of one screen. Work started inside it
//! may finish after the screen is gone; once the scope is closed (or dropped)
//! such completions are discarded instead of being applied to stale state.

use crate::core::error::ExplorerError;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Await `future` for at most `limit`
pub async fn with_timeout<F, T>(limit: Duration, future: F) -> Result<T, ExplorerError>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(limit, future)
        .await
        .map_err(|_| ExplorerError::Timeout(limit))
}

/// Lifetime of one screen's pending work
#[derive(Debug)]
pub struct UiScope {
    name: String,
    token: CancellationToken,
}

impl UiScope {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token: CancellationToken::new(),
        }
    }

    /// Child scope, closed together with this one
    pub fn child(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token: self.token.child_token(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Tear the scope down; pending completions are dropped
    pub fn close(&self) {
        if !self.token.is_cancelled() {
            tracing::debug!(scope = %self.name, "closing scope");
            self.token.cancel();
        }
    }

    /// Await `future` unless the scope closes first
    pub async fn run<F, T>(&self, future: F) -> Result<T, ExplorerError>
    where
        F: Future<Output = T>,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(ExplorerError::Cancelled),
            value = future => Ok(value),
        }
    }

    /// Run `future` in the background and hand its output to `apply` while
    /// the scope is still open.
    ///
    /// The returned handle resolves to `true` when the completion was applied.
    pub fn spawn<F, T, A>(&self, future: F, apply: A) -> JoinHandle<bool>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
        A: FnOnce(T) + Send + 'static,
    {
        let token = self.token.clone();
        let name = self.name.clone();
        tokio::spawn(async move {
            let value = tokio::select! {
                biased;
                _ = token.cancelled() => None,
                value = future => Some(value),
            };
            match value {
                Some(value) if !token.is_cancelled() => {
                    apply(value);
                    true
                }
                _ => {
                    tracing::debug!(scope = %name, "dropping completion of closed scope");
                    false
                }
            }
        })
    }
}

impl Drop for UiScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
