//! Service layer
//!
//! Services turn validated submissions into delivered messages. They sit
//! between the scheduler and the repositories.
//!
//! Services are trait-based to enable testing and dependency injection.

mod failure_reporter;
mod notifier;

// Re-export traits
pub use notifier::NotificationService;

// Re-export implementations
pub use failure_reporter::FailureReporter;
pub use notifier::StatusNotifier;
