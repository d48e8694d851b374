// Domain entities and wire shapes

pub mod attribute;
pub mod config;
pub mod event;
pub mod scan;
pub mod schema;

pub use attribute::*;
pub use config::*;
pub use event::*;
pub use scan::*;
pub use schema::*;
