//! Domain core for the flashdeck study service.
//!
//! Holds the spaced-repetition scheduling logic (review state machine and
//! due-card selection) plus the input rules shared by the persistence and
//! HTTP layers. This crate has no internal dependencies so it can be tested
//! without a database.

pub mod due;
pub mod error;
pub mod review;
pub mod scheduler;
pub mod types;
pub mod validation;
