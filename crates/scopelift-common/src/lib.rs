//! Shared foundation types for the scopelift analyzer.
//!
//! This crate provides the pieces every other scopelift crate needs:
//! - Identifier newtypes (`SiteId`, `BodyId`)
//! - Source locations and the site table (`SourceLocation`, `SiteMap`)
//! - Centralized limits and thresholds

// Identifier newtypes carried on trace records
pub mod ids;
pub use ids::{BodyId, SiteId};

// Source location parsing and the site table
pub mod location;
pub use location::{SiteMap, SourceLocation};

// Centralized limits and thresholds
pub mod limits;
