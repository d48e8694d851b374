pub mod dynamo_scanner;
pub mod memory_table;

pub use dynamo_scanner::*;
pub use memory_table::*;
