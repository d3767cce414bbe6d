//! Comprehensive System structural summary engine.
//!
//! [`scoring::calculate`] turns a list of scored Rorschach responses into the
//! upper section, lower section, special indices, and per-response rows of the
//! structural summary. The remaining modules carry the service plumbing shared
//! with the HTTP/CLI front end.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
