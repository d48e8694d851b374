// Scan executor
// Pulls pages one at a time until the store stops handing out continuation
// tokens. Page N is fully decoded before page N+1 is requested.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use events_domain::ports::TableScanner;
use events_domain::{Record, ResultAggregator, ScanOutcome, ScanRequest};

use crate::{AppError, Metrics};

/// Cancels every scan holding the paired [`CancelSignal`].
#[derive(Debug)]
pub struct Canceller(watch::Sender<bool>);

impl Canceller {
    pub fn cancel(&self) {
        self.0.send_replace(true);
    }
}

#[derive(Debug, Clone)]
pub struct CancelSignal(watch::Receiver<bool>);

impl CancelSignal {
    pub fn is_cancelled(&self) -> bool {
        *self.0.borrow()
    }

    /// Resolves once cancelled. Never resolves if the canceller is dropped
    /// without firing.
    async fn cancelled(&mut self) {
        loop {
            if *self.0.borrow_and_update() {
                return;
            }
            if self.0.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

pub fn cancel_pair() -> (Canceller, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (Canceller(tx), CancelSignal(rx))
}

/// Cooperative stop conditions for a scan.
#[derive(Debug, Clone, Default)]
pub struct ScanControl {
    cancel: Option<CancelSignal>,
    timeout: Option<Duration>,
}

impl ScanControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel(mut self, signal: CancelSignal) -> Self {
        self.cancel = Some(signal);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Applies `timeout` only when no explicit one was set.
    pub fn or_timeout(mut self, timeout: Option<Duration>) -> Self {
        if self.timeout.is_none() {
            self.timeout = timeout;
        }
        self
    }

    async fn guard<F, T>(&self, deadline: Option<Instant>, pages: usize, work: F) -> Result<T, AppError>
    where
        F: Future<Output = T>,
    {
        let mut cancel = self.cancel.clone();
        let cancelled = async move {
            match cancel.as_mut() {
                Some(signal) => signal.cancelled().await,
                None => std::future::pending::<()>().await,
            }
        };
        let expired = async move {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => Err(AppError::Cancelled { pages }),
            _ = expired => Err(AppError::DeadlineExceeded { pages }),
            value = work => Ok(value),
        }
    }
}

/// Runs a full, filtered, projected scan and decodes every page into `R`.
///
/// Any page-level failure aborts the scan and discards what was aggregated.
/// Rows that fail to decode are skipped and reported in the outcome.
pub async fn execute_scan<R: Record>(
    scanner: &dyn TableScanner,
    request: &ScanRequest,
    control: &ScanControl,
    metrics: &Metrics,
) -> Result<ScanOutcome<R>, AppError> {
    metrics.record_scan();
    let deadline = control.timeout.map(|timeout| Instant::now() + timeout);
    let mut aggregator = ResultAggregator::<R>::new();
    let mut start = None;

    loop {
        let completed = aggregator.pages();
        let page = match control
            .guard(deadline, completed, scanner.scan_page(request, start.take()))
            .await
        {
            Ok(Ok(page)) => page,
            Ok(Err(reason)) => {
                metrics.record_scan_error();
                error!(
                    table = %request.table_name,
                    page = completed + 1,
                    "scan request failed: {:#}",
                    reason
                );
                return Err(AppError::Scan {
                    page: completed + 1,
                    reason,
                });
            }
            Err(err) => {
                metrics.record_scan_error();
                warn!(table = %request.table_name, "{}", err);
                return Err(err);
            }
        };

        let summary = aggregator.absorb(&page.items);
        metrics.record_page(summary.decoded, summary.skipped);
        debug!(
            table = %request.table_name,
            "page {} with {} items",
            summary.page,
            summary.rows
        );
        if summary.skipped > 0 {
            warn!(
                table = %request.table_name,
                page = summary.page,
                skipped = summary.skipped,
                "skipped rows that failed to decode"
            );
        }

        match page.next {
            Some(token) => start = Some(token),
            None => break,
        }
    }

    let outcome = aggregator.finish();
    info!(
        table = %request.table_name,
        pages = outcome.pages,
        records = outcome.records.len(),
        skipped = outcome.skipped.len(),
        "scan complete"
    );
    Ok(outcome)
}
