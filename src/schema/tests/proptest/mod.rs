//! Property-based tests for the schema engine.

mod normalize_proptest;
