//! Unit tests for the bot command set.

mod support;
