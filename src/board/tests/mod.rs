//! Tests for the board domain and adapters.

mod domain_tests;
mod repository_tests;
