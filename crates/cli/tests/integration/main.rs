//! CLI integration tests.

mod common;
mod deps_tests;
mod plan_tests;
mod waves_tests;
