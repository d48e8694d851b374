// Scan request and page shapes exchanged with the table store

use crate::entities::attribute::AttributeMap;
use crate::services::expression::ScanExpression;

/// Opaque resume point handed back by the store when more pages remain.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuationToken(AttributeMap);

impl ContinuationToken {
    pub fn new(key: AttributeMap) -> Self {
        Self(key)
    }

    pub fn key(&self) -> &AttributeMap {
        &self.0
    }

    pub fn into_key(self) -> AttributeMap {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub table_name: String,
    pub expression: ScanExpression,
    /// Upper bound on rows evaluated per page; the store picks when unset.
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct ScanPage {
    pub items: Vec<AttributeMap>,
    pub next: Option<ContinuationToken>,
}

impl ScanPage {
    pub fn last(items: Vec<AttributeMap>) -> Self {
        Self { items, next: None }
    }

    pub fn with_next(items: Vec<AttributeMap>, next: ContinuationToken) -> Self {
        Self {
            items,
            next: Some(next),
        }
    }

    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}
