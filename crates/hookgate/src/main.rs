// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hookgate - an outbound webhook egress guard.
//!
//! This is the binary entry point for the Hookgate server.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod check;
mod serve;

/// Hookgate - an outbound webhook egress guard.
#[derive(Parser, Debug)]
#[command(name = "hookgate", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the egress guard server.
    Serve,
    /// Load the configuration and print the effective egress policy.
    Check,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match hookgate_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            hookgate_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("hookgate: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Check) => {
            check::run_check(&config);
        }
        None => {
            println!("hookgate: use --help for available commands");
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this -- the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed).
        let config =
            hookgate_config::load_and_validate().expect("default config should be valid");
        assert_eq!(config.server.port, 8787);
        assert_eq!(config.throttle.max_requests, 10);
    }
}
