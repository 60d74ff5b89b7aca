pub mod config;
pub mod logging;
pub mod output;
pub mod scoring;
pub mod snapshot;
