//! Core abstractions for thesis-rs
//!
//! This crate provides the foundational types shared by every sub-agent:
//!
//! - The [`Analyst`] trait implemented by each research sub-agent
//! - The [`AnalystReport`] output type a finished sub-agent produces
//! - Shared [`Error`] and [`Result`] types

pub mod analyst;
pub mod error;
pub mod report;

// Re-export main types
pub use analyst::Analyst;
pub use error::{Error, Result};
pub use report::AnalystReport;
