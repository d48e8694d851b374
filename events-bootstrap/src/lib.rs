pub mod context;
pub mod lifecycle;
pub mod logging;

pub use lifecycle::{run_query, write_outcome, QueryOptions};
pub use logging::init_logging;
