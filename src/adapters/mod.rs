//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (HTTP client, file I/O, terminal output).
//! Each sub-module groups adapters by infrastructure concern.
//!
//! Adapter categories:
//! - `api`: retrying HTTP client and upstream response shapes
//! - `persistence`: JSON file store and the stale-cache layer
//! - `render`: terminal presentation

pub mod api;
pub mod persistence;
pub mod render;
