//! Repository layer
//!
//! Repositories are the agent's view of the two remote services: the
//! review-status endpoint it polls and the bot API it delivers through.
//! They carry no business logic.
//!
//! All repositories are trait-based so the scheduler can be driven by
//! in-memory fakes in tests.

mod messages;
mod statuses;

#[cfg(test)]
pub mod memory;

// Re-export traits
pub use messages::MessageRepository;
pub use statuses::StatusRepository;
