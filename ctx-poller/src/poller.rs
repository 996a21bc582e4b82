//! Fixed-interval poller with hierarchical cancellation
//!
//! A [`CtxPoller`] owns a parent [`CancellationToken`]. Every call to
//! [`Poller::start`] derives a fresh child token from it and spawns a Tokio
//! task that waits one interval, invokes the action with the child token, and
//! repeats. [`Poller::stop`] cancels only the child, so the parent can be
//! reused for the next start. Cancelling the parent from outside ends the
//! loop as well.
//!
//! Invocations never overlap: the loop awaits the action before it starts the
//! next wait, so a slow action stretches the gap between ticks. Cancellation
//! is only observed while waiting; an in-flight action always runs to
//! completion.
//!
//! `start` and `stop` take `&mut self`. Concurrent control of one poller from
//! several tasks requires the caller to wrap it in a lock.

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::config::PollerConfig;
use crate::error::{PollerError, Result};

type Action = Arc<dyn Fn(CancellationToken) -> BoxFuture<'static, ()> + Send + Sync>;

/// Start/stop control surface of a background poller.
pub trait Poller {
    /// Whether a background loop is currently running.
    fn is_active(&self) -> bool;

    /// Spawn the background loop.
    ///
    /// Returns as soon as the loop is spawned; the first invocation happens
    /// one full interval later.
    ///
    /// # Errors
    ///
    /// - [`PollerError::AlreadyStarted`] if a loop is already running
    /// - [`PollerError::InvalidInterval`] if the interval is below
    ///   [`MIN_INTERVAL`](crate::MIN_INTERVAL)
    /// - [`PollerError::NoRuntime`] if called outside a Tokio runtime
    fn start(&mut self) -> Result<()>;

    /// Cancel the running loop. Does nothing if the poller is inactive.
    ///
    /// Returns without waiting for the loop to exit.
    fn stop(&mut self);
}

/// State of one start/stop cycle
struct ActiveRun {
    token: CancellationToken,
    running: Arc<AtomicBool>,
}

/// Clears the run's flag when the poll loop returns or unwinds
struct RunningGuard(Arc<AtomicBool>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// [`Poller`] driven by a [`CancellationToken`] hierarchy.
pub struct CtxPoller {
    parent: CancellationToken,
    config: PollerConfig,
    action: Action,
    run: Option<ActiveRun>,
}

/// Create a poller with the default 5 second interval and a private parent
/// token that is never cancelled.
pub fn default_poller<F, Fut>(action: F) -> CtxPoller
where
    F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    CtxPoller::with_config(CancellationToken::new(), PollerConfig::default(), action)
}

impl CtxPoller {
    /// Create an inactive poller listening on `parent`.
    ///
    /// The interval is not validated until [`Poller::start`].
    pub fn new<F, Fut>(parent: CancellationToken, action: F, interval: Duration) -> Self
    where
        F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self::with_config(parent, PollerConfig::new().with_interval(interval), action)
    }

    /// Create an inactive poller from a [`PollerConfig`].
    pub fn with_config<F, Fut>(parent: CancellationToken, config: PollerConfig, action: F) -> Self
    where
        F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let action: Action = Arc::new(move |token: CancellationToken| action(token).boxed());

        Self {
            parent,
            config,
            action,
            run: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.config.interval
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }
}

impl Poller for CtxPoller {
    fn is_active(&self) -> bool {
        self.run
            .as_ref()
            .is_some_and(|run| run.running.load(Ordering::Acquire))
    }

    fn start(&mut self) -> Result<()> {
        if self.is_active() {
            tracing::warn!(poller = %self.config.name, "start rejected: already running");
            return Err(PollerError::AlreadyStarted);
        }

        if let Err(e) = self.config.validate() {
            tracing::warn!(poller = %self.config.name, error = %e, "start rejected");
            return Err(e);
        }

        let handle = Handle::try_current().map_err(|_| PollerError::NoRuntime)?;

        // A previous run may have ended on its own through parent cancellation
        if let Some(stale) = self.run.take() {
            stale.token.cancel();
        }

        let token = self.parent.child_token();
        let running = Arc::new(AtomicBool::new(true));

        handle.spawn(poll_loop(
            self.config.clone(),
            Arc::clone(&self.action),
            token.clone(),
            Arc::clone(&running),
        ));

        self.run = Some(ActiveRun { token, running });
        Ok(())
    }

    fn stop(&mut self) {
        if !self.is_active() {
            return;
        }

        if let Some(run) = self.run.take() {
            run.token.cancel();
            tracing::debug!(poller = %self.config.name, "poller stopped");
        }
    }
}

impl Drop for CtxPoller {
    fn drop(&mut self) {
        if let Some(run) = self.run.take() {
            run.token.cancel();
        }
    }
}

impl fmt::Debug for CtxPoller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CtxPoller")
            .field("name", &self.config.name)
            .field("interval", &self.config.interval)
            .field("active", &self.is_active())
            .field("parent_cancelled", &self.parent.is_cancelled())
            .finish()
    }
}

async fn poll_loop(
    config: PollerConfig,
    action: Action,
    token: CancellationToken,
    running: Arc<AtomicBool>,
) {
    let _guard = RunningGuard(running);
    let mut ticks: u64 = 0;

    tracing::debug!(
        poller = %config.name,
        interval = ?config.interval,
        "poll loop started"
    );

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = tokio::time::sleep(config.interval) => {
                ticks += 1;
                tracing::trace!(poller = %config.name, tick = ticks, "invoking action");
                action(token.clone()).await;
            }
        }
    }

    tracing::debug!(poller = %config.name, ticks, "poll loop exited");
}
