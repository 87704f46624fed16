//! mirror-server entry point.
//!
//! Loads the configuration, builds the initial position mapper, and maps
//! control events read from stdin until EOF or Ctrl-C.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()               -- TOML, defaults when absent
//!  └─ SharedMapper::from_geometry -- first geometry epoch
//!  └─ run_event_loop(stdin)
//!       ├─ LAEvent:    -> InjectInputUseCase -> TracingInjector
//!       └─ LAGeometry: -> SharedMapper::apply_geometry
//! ```
//!
//! Usage: `mirror-server [CONFIG_PATH]` (default `mirror-server.toml`).
//! Logs go to stderr so stdout stays free for the device-side runtime.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mirror_server::application::inject_input::InjectInputUseCase;
use mirror_server::application::update_geometry::SharedMapper;
use mirror_server::infrastructure::event_source::run_event_loop;
use mirror_server::infrastructure::input_injection::TracingInjector;
use mirror_server::infrastructure::storage::config::load_config;

const DEFAULT_CONFIG_PATH: &str = "mirror-server.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = load_config(&config_path)?;

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(config = %config_path.display(), "mirror-server starting");

    let geometry = config.geometry.to_geometry()?;
    let mapper = Arc::new(SharedMapper::from_geometry(&geometry));
    let use_case = InjectInputUseCase::new(Arc::new(TracingInjector::new()), mapper);

    let stdin = BufReader::new(tokio::io::stdin());
    tokio::select! {
        result = run_event_loop(stdin, &use_case) => {
            let handled = result?;
            info!(handled, "control stream ended");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    let stats = use_case.stats();
    info!(
        injected = stats.injected,
        rescaled = stats.rescaled,
        geometry_changes = stats.geometry_changes,
        "mirror-server stopped"
    );
    Ok(())
}
