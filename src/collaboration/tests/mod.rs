//! Tests for collaboration domain rules, the membership directory, and the
//! orchestration service.

mod permission_tests;
mod service_tests;
