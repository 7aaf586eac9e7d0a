//! Adoption Dashboard Binary
//!
//! Fetches TVL history for the tracked Solana DeFi protocols from DefiLlama,
//! scores adoption quality, and shows the result.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin adoption_dashboard            # terminal UI
//! cargo run --release --bin adoption_dashboard -- --plain # stdout report
//! ```
//!
//! ## Environment Variables
//!
//! - LLAMA_API_BASE - DefiLlama API base URL (default: https://api.llama.fi)
//! - LLAMA_TIMEOUT_SECS - HTTP timeout per request (default: 10)
//! - TVL_CACHE_TTL_SECS - Cache lifetime for fetched series, 0 = session (default: 0)
//! - RUST_LOG - Logging level (optional, default: info in plain mode, off in UI mode)

use sol_adoption::{ui, AdoptionDashboard, DashboardConfig, DashboardError};
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Terminal,
    Plain,
}

impl OutputMode {
    /// Filter used when RUST_LOG is unset; stderr would draw over the UI
    fn default_log_filter(self) -> &'static str {
        match self {
            OutputMode::Plain => "info",
            OutputMode::Terminal => "off",
        }
    }
}

fn parse_mode_from_args() -> OutputMode {
    if env::args().any(|arg| arg == "--plain") {
        OutputMode::Plain
    } else {
        OutputMode::Terminal
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = DashboardConfig::from_env();
    let mode = parse_mode_from_args();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(mode.default_log_filter()),
    )
        .target(env_logger::Target::Stderr)
        .init();

    log::info!("🚀 Starting Solana DeFi adoption dashboard...");
    log::info!("📊 Configuration:");
    log::info!("   LLAMA_API_BASE: {}", config.api_base);
    log::info!("   Timeout: {}s", config.timeout_secs);
    match config.cache_ttl() {
        Some(ttl) => log::info!("   Cache TTL: {}s", ttl.as_secs()),
        None => log::info!("   Cache TTL: session"),
    }
    if let Some(filter) = &config.rust_log {
        log::info!("   RUST_LOG: {}", filter);
    }

    let dashboard = AdoptionDashboard::from_config(&config)?;

    match mode {
        OutputMode::Terminal => ui::run_ui(&dashboard).await?,
        OutputMode::Plain => match dashboard.report().await {
            Ok(report) => print!("{}", ui::render_plain_report(&report)),
            Err(DashboardError::NoUsableData) => {
                log::error!("❌ {}", DashboardError::NoUsableData);
                eprintln!("{}", DashboardError::NoUsableData);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_mode_silences_logs_by_default() {
        assert_eq!(OutputMode::Terminal.default_log_filter(), "off");
        assert_eq!(OutputMode::Plain.default_log_filter(), "info");
    }
}
