pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod detail;
pub mod error;
pub mod logging;
pub mod route;
pub mod store;
pub mod types;

#[cfg(test)]
mod testing;
