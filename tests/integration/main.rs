//! Integration tests for Sitemap-Sweep
//!
//! These tests use wiremock to create mock HTTP servers and exercise
//! discovery, traversal and the full sweep end-to-end.

mod common;
mod crawl_tests;
mod discovery_tests;
mod traversal_tests;
