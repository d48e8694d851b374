use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info, warn};

use events_application::{cancel_pair, query_events, AppState, EventQuery, ScanControl};
use events_domain::{Event, ScanOutcome};

use crate::context::AppContext;

#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    pub config_path: Option<PathBuf>,
    pub created_at: Option<String>,
    pub pretty: bool,
}

pub async fn run_query(options: QueryOptions) -> Result<()> {
    let context = AppContext::new(options.config_path.as_deref()).await?;
    let state = context.state;

    let (canceller, signal) = cancel_pair();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, cancelling scan");
            canceller.cancel();
        }
    });

    let result = query(&state, options.created_at, ScanControl::new().with_cancel(signal)).await;
    interrupt.abort();
    let outcome = result?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_outcome(&mut out, &outcome, options.pretty)?;
    debug!("{}", state.metrics.render_prometheus());
    Ok(())
}

async fn query(
    state: &AppState,
    created_at: Option<String>,
    control: ScanControl,
) -> Result<ScanOutcome<Event>> {
    let outcome = query_events(state, EventQuery { created_at }, control).await?;
    info!(
        table = %state.config.table_name,
        records = outcome.records.len(),
        "query finished"
    );
    if !outcome.is_clean() {
        warn!(
            skipped = outcome.skipped.len(),
            "some rows could not be decoded and were left out"
        );
        for row in &outcome.skipped {
            debug!(page = row.page, index = row.index, "skipped row: {}", row.error);
        }
    }
    Ok(outcome)
}

/// Writes the records as one JSON array followed by a newline.
pub fn write_outcome<W: Write>(out: &mut W, outcome: &ScanOutcome<Event>, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, &outcome.records)?;
    } else {
        serde_json::to_writer(&mut *out, &outcome.records)?;
    }
    writeln!(out)?;
    Ok(())
}
