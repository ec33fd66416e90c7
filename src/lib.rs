//! askdb - An AI data analyst that answers questions about your database.
//!
//! This library exposes the core modules for use in integration tests.

pub mod agent;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod llm;
pub mod logging;
pub mod safety;
