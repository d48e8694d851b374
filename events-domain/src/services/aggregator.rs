// Result aggregation across scan pages
// Decoded records accumulate in arrival order. Rows that fail to decode are
// set aside as diagnostics instead of failing the scan.

use crate::entities::attribute::AttributeMap;
use crate::entities::schema::{DecodeError, Record};
use crate::services::codec::decode_row;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based page number.
    pub page: usize,
    /// Position of the row within its page.
    pub index: usize,
    pub error: DecodeError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    pub page: usize,
    pub rows: usize,
    pub decoded: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome<R> {
    pub records: Vec<R>,
    pub skipped: Vec<SkippedRow>,
    pub pages: usize,
}

impl<R> ScanOutcome<R> {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

#[derive(Debug)]
pub struct ResultAggregator<R> {
    records: Vec<R>,
    skipped: Vec<SkippedRow>,
    pages: usize,
}

impl<R: Record> Default for ResultAggregator<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> ResultAggregator<R> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
            pages: 0,
        }
    }

    pub fn absorb(&mut self, items: &[AttributeMap]) -> PageSummary {
        self.pages += 1;
        let before = self.records.len();
        let skipped_before = self.skipped.len();

        for (index, item) in items.iter().enumerate() {
            match decode_row::<R>(item) {
                Ok(record) => self.records.push(record),
                Err(error) => self.skipped.push(SkippedRow {
                    page: self.pages,
                    index,
                    error,
                }),
            }
        }

        PageSummary {
            page: self.pages,
            rows: items.len(),
            decoded: self.records.len() - before,
            skipped: self.skipped.len() - skipped_before,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn finish(self) -> ScanOutcome<R> {
        ScanOutcome {
            records: self.records,
            skipped: self.skipped,
            pages: self.pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::attribute::AttributeValue;
    use crate::entities::event::{Event, ATTR_EXPIRES_AT};
    use crate::services::codec::encode_row;

    fn event(id: &str) -> Event {
        Event {
            id: id.to_string(),
            created_at: "01/06/2022 10:00".to_string(),
            ..Event::default()
        }
    }

    #[test]
    fn keeps_page_then_row_order() {
        let mut aggregator = ResultAggregator::<Event>::new();
        aggregator.absorb(&[encode_row(&event("a")), encode_row(&event("b"))]);
        aggregator.absorb(&[]);
        aggregator.absorb(&[encode_row(&event("c"))]);

        let outcome = aggregator.finish();
        let ids: Vec<&str> = outcome.records.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(outcome.pages, 3);
        assert!(outcome.is_clean());
    }

    #[test]
    fn does_not_deduplicate() {
        let mut aggregator = ResultAggregator::<Event>::new();
        aggregator.absorb(&[encode_row(&event("a"))]);
        aggregator.absorb(&[encode_row(&event("a"))]);
        assert_eq!(aggregator.len(), 2);
    }

    #[test]
    fn malformed_row_is_skipped_and_recorded() {
        let mut bad = encode_row(&event("bad"));
        bad.insert(ATTR_EXPIRES_AT.to_string(), AttributeValue::Bool(true));

        let mut aggregator = ResultAggregator::<Event>::new();
        let summary = aggregator.absorb(&[encode_row(&event("a")), bad, encode_row(&event("b"))]);
        assert_eq!(
            summary,
            PageSummary {
                page: 1,
                rows: 3,
                decoded: 2,
                skipped: 1,
            }
        );

        let outcome = aggregator.finish();
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].page, 1);
        assert_eq!(outcome.skipped[0].index, 1);
    }
}
