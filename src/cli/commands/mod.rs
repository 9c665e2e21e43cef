//! Command implementations.

pub mod report;
pub mod search;
pub mod serve;
