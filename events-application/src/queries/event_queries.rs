use chrono::Local;

use events_domain::{
    created_at_contains, Event, ExpressionBuilder, ExpressionError, ProjectionExpression,
    ScanExpression, ScanOutcome, ScanRequest,
};

use crate::executor::{execute_scan, ScanControl};
use crate::{AppError, AppState};

/// Day format of `created_at` values, used when no day is given.
pub const CREATED_AT_DAY_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    /// Substring to look for in `created_at`. Defaults to today's date.
    pub created_at: Option<String>,
}

impl EventQuery {
    pub fn created_on(value: impl Into<String>) -> Self {
        Self {
            created_at: Some(value.into()),
        }
    }
}

/// Projection over every event attribute plus the `created_at` substring
/// filter.
pub fn event_scan_expression(created_at: &str) -> Result<ScanExpression, ExpressionError> {
    ExpressionBuilder::new()
        .with_filter(created_at_contains(created_at))
        .with_projection(ProjectionExpression::for_record::<Event>()?)
        .build()
}

pub async fn query_events(
    state: &AppState,
    query: EventQuery,
    control: ScanControl,
) -> Result<ScanOutcome<Event>, AppError> {
    let created_at = query
        .created_at
        .unwrap_or_else(|| Local::now().format(CREATED_AT_DAY_FORMAT).to_string());

    let request = ScanRequest {
        table_name: state.config.table_name.clone(),
        expression: event_scan_expression(&created_at)?,
        page_size: state.config.page_size,
    };
    let control = control.or_timeout(state.config.scan_timeout);

    execute_scan::<Event>(state.scanner.as_ref(), &request, &control, &state.metrics).await
}
