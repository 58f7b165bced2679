pub mod cli;
pub mod config;
pub mod probe;
pub mod queries;
pub mod report;
pub mod tls;
