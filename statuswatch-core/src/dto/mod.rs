//! Data Transfer Objects for the messaging API
//!
//! Lightweight request/response shapes used by the HTTP client when
//! delivering notifications.

pub mod message;
