use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    scans: AtomicU64,
    scan_errors: AtomicU64,
    pages: AtomicU64,
    rows_returned: AtomicU64,
    rows_skipped: AtomicU64,
}

impl Metrics {
    pub fn record_scan(&self) {
        self.scans.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_scan_error(&self) {
        self.scan_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_page(&self, decoded: usize, skipped: usize) {
        self.pages.fetch_add(1, Ordering::Relaxed);
        self.rows_returned
            .fetch_add(decoded as u64, Ordering::Relaxed);
        self.rows_skipped
            .fetch_add(skipped as u64, Ordering::Relaxed);
    }

    pub fn rows_skipped(&self) -> u64 {
        self.rows_skipped.load(Ordering::Relaxed)
    }

    pub fn render_prometheus(&self) -> String {
        let scans = self.scans.load(Ordering::Relaxed);
        let errors = self.scan_errors.load(Ordering::Relaxed);
        let pages = self.pages.load(Ordering::Relaxed);
        let returned = self.rows_returned.load(Ordering::Relaxed);
        let skipped = self.rows_skipped.load(Ordering::Relaxed);

        format!(
            "# TYPE events_scans_total counter\n\
events_scans_total {}\n\
# TYPE events_scan_errors_total counter\n\
events_scan_errors_total {}\n\
# TYPE events_scan_pages_total counter\n\
events_scan_pages_total {}\n\
# TYPE events_rows_returned_total counter\n\
events_rows_returned_total {}\n\
# TYPE events_rows_skipped_total counter\n\
events_rows_skipped_total {}\n",
            scans, errors, pages, returned, skipped
        )
    }
}
