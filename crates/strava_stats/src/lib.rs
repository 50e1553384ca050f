//! Personal-best statistics for a Strava athlete, rendered into a README.
//!
//! The core is pure: [`normalize`](normalize::normalize) rescales a time to
//! a race distance, [`aggregate`](aggregate::aggregate) keeps the fastest
//! normalized time per [`TargetDistance`](targets::TargetDistance), and
//! [`merge`](document::merge) rewrites the statistics section of a document.
//! [`job::run`] wires these to the API client and a [`store::DocumentStore`].

pub mod aggregate;
pub mod document;
pub mod error;
pub mod job;
pub mod normalize;
pub mod store;
pub mod targets;

pub use aggregate::{PersonalBest, PersonalBests, RunStats};
pub use error::{JobError, JobResult};
pub use targets::TargetDistance;
