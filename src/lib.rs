//! Intertwine - Problem Network Service
//!
//! This crate models social problems, the causal and scoped connections
//! between them, and the community-scoped ratings contributors place on
//! those connections.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
