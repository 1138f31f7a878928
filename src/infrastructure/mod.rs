//! Infrastructure layer module
//!
//! Process-wide concerns that are not ports:
//! - Configuration management
//! - Logging infrastructure

pub mod config;
pub mod logging;
