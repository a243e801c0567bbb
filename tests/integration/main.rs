//! Integration tests for the process-wide emitter and its helper functions.
//!
//! Every test shares the global instance, so each one uses its own event
//! names.

mod helpers;

mod apply_test;
mod filter_test;
mod listener_test;
