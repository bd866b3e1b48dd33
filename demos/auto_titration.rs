//! Automatic titration on a tokio task
//!
//! Starts continuous addition on the weak acid scenario, lets it run past
//! the equivalence point, then cancels it. Pass `--to-end` to let it fill
//! the burette instead. Runs in real time (0.1 mL every 100 ms).
//!
//! ```bash
//! RUST_LOG=titration_rs=debug cargo run --example auto_titration -- --to-end
//! ```

use std::time::Duration;

use titration_rs::chemistry::ScenarioCatalog;
use titration_rs::config::SessionConfiguration;
use titration_rs::session::{LoggingObserver, TitrationSession, shared, spawn_continuous_addition};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let to_end = std::env::args().any(|a| a == "--to-end");

    let catalog = ScenarioCatalog::builtin();
    let scenario = catalog.get("Weak Acid - Strong Base").ok_or("missing weak scenario")?.clone();

    // Faster than the default cadence so the demo finishes in a few seconds
    let config = SessionConfiguration::default()
        .auto_increment(0.5)
        .tick_interval(Duration::from_millis(50));
    let mut session = TitrationSession::with_configuration(scenario, config)?;
    session.subscribe(LoggingObserver);
    let session = shared(session);

    let handle = spawn_continuous_addition(session.clone())?;

    if !to_end {
        tokio::time::sleep(Duration::from_millis(3_500)).await;
        handle.cancel()?;
    }
    let summary = handle.join().await?;

    let session = session.lock().map_err(|_| "session lock poisoned")?;
    println!(
        "{:?} after {} ticks: {:.1} mL, pH {:.2} ({:?})",
        summary.end,
        summary.ticks,
        session.current_volume(),
        session.current_ph(),
        session.regime()
    );
    Ok(())
}
