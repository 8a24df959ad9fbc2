pub mod cmd;
pub mod config;
pub mod context;
pub mod domain;
pub mod error;
pub mod infra;
pub mod repository;
pub mod services;
pub mod telemetry;
pub mod workflow;

#[cfg(test)]
mod testing;
