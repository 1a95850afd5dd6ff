// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod config;
pub mod import;
pub mod lineup;
pub mod report;
pub mod roster;
pub mod valuation;
