//! Scheduler layer for the agent
//!
//! Owns the poll cursor and drives the fetch → validate → notify cycle on a
//! fixed interval. Everything runs sequentially on one task.

pub mod cursor;
pub mod poller;

pub use poller::StatusPoller;
