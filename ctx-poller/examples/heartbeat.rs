//! Heartbeat - minimal ctx-poller demo
//!
//! Prints a heartbeat every 5 seconds, stops the poller, restarts it, then
//! ends the second run by cancelling the parent token.
//!
//! Run: CTX_POLLER_LOG_MODE=debug cargo run -p ctx-poller --example heartbeat

use ctx_poller::logging::init_logging_from_env;
use ctx_poller::{CtxPoller, Poller, PollerConfig};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging_from_env()?;

    let beats = Arc::new(AtomicU64::new(0));
    let task_beats = Arc::clone(&beats);

    let shutdown = CancellationToken::new();
    let mut poller = CtxPoller::with_config(
        shutdown.clone(),
        PollerConfig::new().with_name("heartbeat"),
        move |token| {
            let beats = Arc::clone(&task_beats);
            async move {
                let n = beats.fetch_add(1, Ordering::SeqCst) + 1;
                println!("beat #{n} (cancelled: {})", token.is_cancelled());
            }
        },
    );

    poller.start()?;
    tokio::time::sleep(Duration::from_secs(12)).await;
    poller.stop();
    println!("stopped after {} beats", beats.load(Ordering::SeqCst));

    poller.start()?;
    tokio::time::sleep(Duration::from_secs(6)).await;
    shutdown.cancel();
    tokio::time::sleep(Duration::from_millis(10)).await;
    println!(
        "parent cancelled, active = {}, total beats = {}",
        poller.is_active(),
        beats.load(Ordering::SeqCst)
    );

    Ok(())
}
