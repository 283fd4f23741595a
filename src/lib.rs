//! Core library for the pcs-tools command line application.
//!
//! The library exposes the pieces that power the indicator export as well as
//! the unit tests. The modules are structured to keep responsibilities narrow
//! and composable: the HTTP and spreadsheet adapters live under
//! [`pcs::tools::io`], data representations inside [`pcs::tools::model`], the
//! per-goal reshaping logic in [`pcs::tools::merge`], and the export
//! orchestration under [`pcs::tools::export`].

pub mod pcs;

pub use pcs::tools::{Result, ToolError, error, export, io, merge, model};
