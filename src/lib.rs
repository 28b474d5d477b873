//! memegen library
//!
//! Exposes the catalog cache, name matcher, imgflip clients and CLI parsing
//! for use by the binary and integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod matcher;
