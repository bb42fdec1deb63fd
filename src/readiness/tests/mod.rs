//! Unit tests for the readiness module.

mod evaluator_tests;
