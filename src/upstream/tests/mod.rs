//! Unit tests for the upstream module.

mod memory_tests;
