//! Integration tests for flowgraph.
//!
//! These tests drive a `FlowCanvas` through pointer and key events and
//! check the resulting graph, selection and invalidations end-to-end.

mod connect_tests;
mod drag_tests;
mod reprocess_tests;
