use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    // Load .env first so RUST_LOG and the database URL are visible
    dotenv().ok();
    common::utils::logging::init_logging_default();
    info!(service = "wishes-server", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    init_logging();

    // Instance context for log correlation (nothing sensitive)
    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    // Panic hook: route panics through tracing so they land in the same log stream
    std::panic::set_hook(Box::new(move |info| {
        error!(service = "wishes-server", event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    // Multi-threaded runtime; a build failure is logged and ends the process
    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "wishes-server", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    // Startup event
    info!(service = "wishes-server", event = "start", %service_id, pid, version, "local server starting");

    // server::run returns after Ctrl+C once in-flight requests finish
    match rt.block_on(server::run()) {
        Ok(()) => {
            info!(service = "wishes-server", event = "stop", %service_id, pid, "server stopped normally");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            // Bad config.toml or bind failure
            error!(service = "wishes-server", event = "run_failed", error = %e, "server::run returned error");
            std::process::ExitCode::FAILURE
        }
    }
}
