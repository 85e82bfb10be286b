//! Service layer for reviews.
//! - Validates submissions against a declarative schema before any store call.
//! - Hides the backing store behind `ReviewRepository` (PostgreSQL or in-memory).
//! - Bounds every store call with a timeout.

pub mod errors;
pub mod review;
