//! # dnscover-core
//!
//! The report pipeline, leaf first:
//!
//! * **[`input`]**: reads the YAML inventory and enforces its invariants.
//! * **[`coverage`]**: classifies every record and produces the [`ReportResult`].
//! * **[`chart`]**: projects the percentage onto a two-slice pie and rasterizes it.
//! * **[`report`]**: lays the computed values out as a [`report::Document`].
//! * **[`render`]**: turns a document into PDF bytes and persists them.
//!
//! Data only flows forward; nothing here keeps state between calls.

pub mod chart;
pub mod coverage;
pub mod error;
pub mod input;
pub mod render;
pub mod report;

pub use chart::ChartDistribution;
pub use coverage::{Coverage, RecordRow, ReportResult, aggregate};
pub use error::{Error, Result};
