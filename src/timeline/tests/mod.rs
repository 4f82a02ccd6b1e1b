//! Unit tests for the timeline module.

mod domain_tests;
mod support;
mod timeline_tests;
