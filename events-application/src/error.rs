use thiserror::Error;

use events_domain::ExpressionError;

/// The single terminal error a query surfaces. Whatever was aggregated before
/// the failure is dropped.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid query: {0}")]
    InvalidExpression(#[from] ExpressionError),
    #[error("scan failed on page {page}: {reason:#}")]
    Scan { page: usize, reason: anyhow::Error },
    #[error("scan cancelled after {pages} page(s)")]
    Cancelled { pages: usize },
    #[error("scan deadline exceeded after {pages} page(s)")]
    DeadlineExceeded { pages: usize },
}
