pub mod config;
pub mod errors;
pub mod exec;
pub mod harness;
pub mod report;
pub mod stats;
