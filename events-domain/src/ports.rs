// Port traits (interfaces)
// Define what the domain needs from the table store

pub mod scanner;

pub use scanner::*;
