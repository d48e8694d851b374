// Events Application Layer

pub mod error;
pub mod executor;
pub mod metrics;
pub mod queries;
pub mod state;

#[cfg(test)]
mod testing;

pub use error::AppError;
pub use executor::{cancel_pair, execute_scan, CancelSignal, Canceller, ScanControl};
pub use metrics::Metrics;
pub use queries::*;
pub use state::AppState;
