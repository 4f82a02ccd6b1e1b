//! Unit tests for the overlay module.

mod resolver_tests;
