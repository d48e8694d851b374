use async_trait::async_trait;

use crate::entities::{ContinuationToken, ScanPage, ScanRequest};

/// Pull-based paginator over a full table scan.
///
/// `start` is `None` for the first page and the previous page's token
/// afterwards. A returned page without a token is the last one.
#[async_trait]
pub trait TableScanner: Send + Sync {
    async fn scan_page(
        &self,
        request: &ScanRequest,
        start: Option<ContinuationToken>,
    ) -> anyhow::Result<ScanPage>;
}
