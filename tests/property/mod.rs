//! Property-based tests for decorum behaviors.
//!
//! Run with: cargo test --test property_tests
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold across all behaviors.

pub mod counter;
pub mod memoize;
pub mod registry;
pub mod repeat;
