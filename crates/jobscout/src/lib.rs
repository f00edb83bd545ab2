//! Core workflows for the Jobscout service: job search with resume match
//! scoring, and application lifecycle tracking.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
