use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use events_bootstrap::{init_logging, run_query, QueryOptions};

#[derive(Parser, Debug)]
#[command(name = "events-query")]
#[command(about = "Scan the events table for rows whose created_at contains DATE", long_about = None)]
struct Args {
    /// Substring of created_at to match, e.g. 01/06/2022. Defaults to today
    date: Option<String>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_json);

    run_query(QueryOptions {
        config_path: args.config,
        created_at: args.date,
        pretty: args.pretty,
    })
    .await
}
