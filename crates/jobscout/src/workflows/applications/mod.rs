//! Application tracking workflow.
//!
//! Users record which postings they applied to and walk each application
//! through a status lifecycle with an append-only timeline.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationId, ApplicationStatus, NewApplication, TimelineEntry,
};
pub use repository::{ApplicationRepository, RepositoryError};
pub use router::application_router;
pub use service::{ApplicationError, ApplicationTracker, TransitionPolicy};
