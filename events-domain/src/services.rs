// Pure domain services

pub mod aggregator;
pub mod codec;
pub mod expression;

pub use aggregator::*;
pub use codec::*;
pub use expression::*;
