//! Unit tests for the agent starter engine
//!
//! These tests use mocked ports and temp directories and run without network
//! access or a `git` binary.

mod materialize_service;
mod property_tests;
mod publish_service;
