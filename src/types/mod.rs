pub mod config;
pub mod findings;
pub mod report;
pub mod score;
