//! Statuswatch Core
//!
//! Core types and pure logic for the review-status notification agent.
//!
//! This crate contains:
//! - Domain types: submissions and fetch results as seen by the agent
//! - DTOs: wire payloads exchanged with the messaging API
//! - Validation: shape checks on raw review-service responses
//! - Verdicts: the fixed status catalog and notification text
//!
//! Nothing in here performs I/O or logging. Callers decide what to do
//! with the classified outcomes.

pub mod domain;
pub mod dto;
pub mod validation;
pub mod verdict;
