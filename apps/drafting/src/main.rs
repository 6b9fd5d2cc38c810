//! # Tripdesk Drafting Console Entry Point
//!
//! Operator console for one invoice drafting session.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     tripdesk-drafting (console)                         │
//! │                                                                         │
//! │   stdin lines ──► console::execute ──► commands/* ──► JSON on stdout    │
//! │                                                                         │
//! │   main.rs ─────► flags, config, logging, session                        │
//! │   lib.rs ──────► DraftingSession, init_tracing                          │
//! │   commands/ ───► set_draft_field, search_entities, check_submission     │
//! │   state/ ──────► DraftState, CatalogState, SearchState, ConfigState     │
//! │                                                                         │
//! │   logs ──► stderr                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load lookup config (file, env, `--api-url`)
//! 3. Build the drafting session and spawn the resolvers
//! 4. Load the service catalog
//! 5. Read console lines until `quit` or end of input

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

use tripdesk_drafting_lib::commands::catalog::load_service_catalog;
use tripdesk_drafting_lib::console::{self, Reply};
use tripdesk_drafting_lib::{init_tracing, DraftingSession};
use tripdesk_lookup::LookupConfig;

#[derive(Debug, Parser)]
#[command(name = "tripdesk-drafting")]
#[command(version)]
#[command(about = "Invoice drafting console for the Tripdesk back office")]
struct Cli {
    /// Lookup config file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Back-office API base URL, overriding config and environment
    #[arg(long)]
    api_url: Option<String>,
}

fn print_reply(reply: &serde_json::Value) {
    match serde_json::to_string_pretty(reply) {
        Ok(text) => println!("{}", text),
        Err(e) => error!("Failed to render reply: {}", e),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let mut lookup = LookupConfig::load_or_default(cli.config);
    if let Some(url) = cli.api_url {
        lookup.api.base_url = url;
    }

    let session = match DraftingSession::connect(&lookup) {
        Ok(session) => session,
        Err(e) => {
            error!("Cannot start drafting session: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Starting Tripdesk drafting console");

    let catalog = load_service_catalog(&session.catalog, &session.draft).await;
    match serde_json::to_value(&catalog) {
        Ok(value) => print_reply(&value),
        Err(e) => error!("Failed to render catalog: {}", e),
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read console input: {}", e);
                break;
            }
        };

        match console::execute(&session, &line).await {
            Reply::Json(value) => print_reply(&value),
            Reply::Text(text) => println!("{}", text),
            Reply::Empty => {}
            Reply::Quit => break,
        }
    }

    session.shutdown().await;
    ExitCode::SUCCESS
}
