// In-memory table
// Evaluates scans the way the managed store does: rows are read in storage
// order, `page_size` bounds the rows evaluated per page, the filter runs on
// the evaluated rows and the projection trims what comes back.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

use events_domain::ports::TableScanner;
use events_domain::{
    encode_row, AttributeMap, ContinuationToken, Record, ScanPage, ScanRequest, ATTR_ID,
    ATTR_OCCURRED_AT, DEFAULT_TABLE_NAME,
};

const DEFAULT_PAGE_SIZE: usize = 100;

pub struct InMemoryTable {
    name: String,
    key_attributes: Vec<String>,
    page_size: usize,
    rows: RwLock<Vec<AttributeMap>>,
}

impl InMemoryTable {
    pub fn new(name: impl Into<String>, key_attributes: &[&str]) -> Self {
        Self {
            name: name.into(),
            key_attributes: key_attributes.iter().map(|key| key.to_string()).collect(),
            page_size: DEFAULT_PAGE_SIZE,
            rows: RwLock::new(Vec::new()),
        }
    }

    /// The events table, keyed by (`id`, `occurred_at`).
    pub fn events() -> Self {
        Self::new(DEFAULT_TABLE_NAME, &[ATTR_ID, ATTR_OCCURRED_AT])
    }

    /// Page size used when a request does not set one.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts a row, replacing any row with the same key.
    pub async fn put(&self, row: AttributeMap) -> Result<()> {
        let key = self.key_of(&row)?;
        let mut rows = self.rows.write().await;
        match rows.iter().position(|existing| self.matches_key(existing, &key)) {
            Some(index) => rows[index] = row,
            None => rows.push(row),
        }
        Ok(())
    }

    pub async fn put_record<R: Record>(&self, record: &R) -> Result<()> {
        self.put(encode_row(record)).await
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    fn key_of(&self, row: &AttributeMap) -> Result<AttributeMap> {
        self.key_attributes
            .iter()
            .map(|name| {
                row.get(name)
                    .map(|value| (name.clone(), value.clone()))
                    .ok_or_else(|| anyhow!("row is missing key attribute {}", name))
            })
            .collect()
    }

    fn matches_key(&self, row: &AttributeMap, key: &AttributeMap) -> bool {
        key.iter().all(|(name, value)| row.get(name) == Some(value))
    }
}

#[async_trait]
impl TableScanner for InMemoryTable {
    async fn scan_page(
        &self,
        request: &ScanRequest,
        start: Option<ContinuationToken>,
    ) -> Result<ScanPage> {
        if request.table_name != self.name {
            return Err(anyhow!("table not found: {}", request.table_name));
        }

        let rows = self.rows.read().await;
        let begin = match start {
            None => 0,
            Some(token) => {
                rows.iter()
                    .position(|row| self.matches_key(row, token.key()))
                    .ok_or_else(|| anyhow!("continuation token does not match any row"))?
                    + 1
            }
        };
        let limit = request
            .page_size
            .map(|size| size as usize)
            .unwrap_or(self.page_size)
            .max(1);
        let end = (begin + limit).min(rows.len());
        let evaluated = &rows[begin.min(end)..end];

        let expression = &request.expression;
        let items = evaluated
            .iter()
            .filter(|row| expression.filter().map_or(true, |filter| filter.matches(row)))
            .map(|row| match expression.projection() {
                Some(projection) => projection.apply(row),
                None => row.clone(),
            })
            .collect();

        let next = if end < rows.len() {
            Some(ContinuationToken::new(self.key_of(&rows[end - 1])?))
        } else {
            None
        };

        Ok(ScanPage { items, next })
    }
}
