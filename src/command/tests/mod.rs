//! Unit tests for the command module.

mod dispatch_tests;
mod parser_tests;
mod rate_limiter_tests;
mod registry_tests;
mod support;
