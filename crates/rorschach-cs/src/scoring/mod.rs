//! Structural summary engine.
//!
//! The pipeline is pure: responses are parsed into typed codes, tabulated,
//! turned into ratios, classified for human representation, screened by the
//! special indices, and assembled into a [`StructuralSummary`].

pub mod advisory;
pub mod domain;
pub mod engine;
pub mod export;
pub mod format;
pub mod human;
pub mod import;
pub mod indices;
pub mod ratios;
pub mod sample;
pub mod summary;
pub mod tables;
pub mod tabulate;

pub use advisory::protocol_advisories;
pub use domain::Response;
pub use engine::{calculate, CalculationError, CalculationResult, ValidationError};
pub use export::{summary_rows, write_csv, ExportError, SummaryRow};
pub use human::HumanRepresentation;
pub use import::{ImportError, ResponseImporter};
pub use sample::sample_data;
pub use summary::StructuralSummary;
