pub mod calendar;
pub mod config;
pub mod error;
pub mod normalizer;
pub mod server;
pub mod shutdown;
pub mod startup;
