//! CLI for the Warden record-access gate.
//!
//! Pipeline: set query -> run access check -> render outcome.

use clap::{Parser, Subcommand};
use warden_core::AccessQuery;
use warden_gate::driver::run_check;
use warden_gate::render;
use warden_gate::{AccessGate, MemorySink, TextSurface, TracingSink};
use warden_provider::{AccessChecker, HttpAccessChecker, StaticPolicy};

#[derive(Parser, Debug)]
#[command(name = "warden", version, about = "Record access gate")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check access to a record and render the resulting view.
    Check {
        #[arg(short, long, env = "WARDEN_ACCESS_URL")]
        endpoint: Option<String>,

        #[arg(short, long)]
        record: String,

        /// Object API name, when the hosting context knows it.
        #[arg(short, long)]
        object: Option<String>,

        #[arg(long, default_value_t = false)]
        json: bool,

        /// Skip the remote check; decide from a local allow-all policy.
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Simulate the form reporting a successful save after a grant.
        #[arg(long, default_value_t = false)]
        save: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            endpoint,
            record,
            object,
            json,
            dry_run,
            save,
        } => {
            tracing::info!(record = %record, dry_run, "starting access check");

            // 1. Pick the checker backend.
            let checker: Box<dyn AccessChecker> = if dry_run {
                tracing::info!("dry_run mode: deciding from local allow-all policy");
                Box::new(StaticPolicy::allow_all())
            } else {
                let endpoint = endpoint
                    .ok_or("--endpoint (or WARDEN_ACCESS_URL) is required unless --dry-run")?;
                Box::new(HttpAccessChecker::connect(&endpoint)?)
            };

            // 2. Configure the gate.
            let mut gate = AccessGate::new();
            gate.set_query(AccessQuery::new(record, object));

            // 3. Run the check and render.
            if json {
                let sink = MemorySink::new();
                run_check(&mut gate, checker.as_ref(), &sink).await;
                if save {
                    gate.on_save_success(&sink);
                }

                let doc = serde_json::json!({
                    "view": gate.view(),
                    "notifications": sink.take(),
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                let sink = TracingSink;
                run_check(&mut gate, checker.as_ref(), &sink).await;
                if save {
                    gate.on_save_success(&sink);
                }

                let mut surface = TextSurface::new(std::io::stdout());
                render::apply(&mut surface, &gate.view())?;
            }
        }
    }

    Ok(())
}
