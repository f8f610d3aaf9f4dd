//! # Pokecare
//!
//! The binary for the pokecare virtual pet.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │            apps/pokecare (THE BINARY)        │
//! │                                              │
//! │   ┌─────────────┐        ┌──────────────┐    │
//! │   │    CLI      │───────▶│  PetSession  │    │
//! │   │   (clap)    │        │ (selection)  │    │
//! │   └─────────────┘        └──────┬───────┘    │
//! │                                 ▼            │
//! │                        ┌────────────────┐    │
//! │                        │ pokecare-core  │    │
//! │                        │  (THE LOGIC)   │    │
//! │                        └────────────────┘    │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! pokecare list
//! pokecare select p2
//! pokecare feed
//! pokecare task add "Clean room" --stage 1
//! ```

use clap::Parser;
use pokecare::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // POKECARE_LOG_FORMAT=json switches to machine-parseable logs.
    let log_format = std::env::var("POKECARE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pokecare=info,pokecare_core=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  ┌─┐┌─┐┬┌─┌─┐┌─┐┌─┐┬─┐┌─┐
  ├─┘│ │├┴┐├┤ │  ├─┤├┬┘├┤
  ┴  └─┘┴ ┴└─┘└─┘┴ ┴┴└─└─┘

  Virtual Pet v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
