//! Core domain types
//!
//! These types describe what the review service reports about a user's
//! submissions once the raw payload has passed validation.

pub mod submission;
