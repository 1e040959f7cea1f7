//! End-to-end planning tests for jplan-lib.

mod common;
mod framework_tests;
mod properties_tests;
mod source_tree_tests;
