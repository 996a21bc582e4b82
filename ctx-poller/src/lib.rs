//! # ctx-poller
//!
//! A cancellable background poller: invoke an async action once per fixed
//! interval until the poller is stopped or its parent
//! [`CancellationToken`](tokio_util::sync::CancellationToken) is cancelled.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ctx_poller::{CtxPoller, Poller};
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> ctx_poller::Result<()> {
//! let shutdown = CancellationToken::new();
//! let mut poller = CtxPoller::new(
//!     shutdown.clone(),
//!     |token| async move {
//!         if !token.is_cancelled() {
//!             println!("tick");
//!         }
//!     },
//!     Duration::from_secs(10),
//! );
//!
//! poller.start()?;
//! assert!(poller.is_active());
//!
//! // Either stop this poller only...
//! poller.stop();
//! // ...or cancel the parent token to end every poller derived from it.
//! shutdown.cancel();
//! # Ok(())
//! # }
//! ```
//!
//! Starting requires a Tokio runtime; the loop is spawned on the current one.

pub mod config;
pub mod error;
pub mod logging;
mod poller;

pub use config::{PollerConfig, DEFAULT_INTERVAL, MIN_INTERVAL};
pub use error::{PollerError, Result};
pub use poller::{default_poller, CtxPoller, Poller};
