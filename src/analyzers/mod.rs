//! Score classification and group statistics.
//!
//! This module assigns a band to every DS score, computes per-group mean,
//! sample variance and standard deviation, and prepares the chart data
//! shown alongside those statistics.

pub mod aggregate;
pub mod charts;
pub mod grade;
pub mod types;
pub mod utility;
