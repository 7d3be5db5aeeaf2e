//! Domain types and pure logic for booth staffing.
//!
//! This crate has no I/O. Everything the flows need to decide (which report
//! actions a staff member sees, how an answer is validated and composed, how
//! dashboard data is joined and filtered, what an exported table contains)
//! lives here and takes its inputs from the caller.

pub mod aggregate;
pub mod answer;
pub mod catalog;
pub mod error;
pub mod export;
pub mod models;
pub mod search;
pub mod types;
