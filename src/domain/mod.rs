//! Core domain models for bowup
//!
//! This module contains the fundamental types used throughout the application:
//! - Version parsing and (major, minor, patch) ordering
//! - Declared constraints with their operator prefix
//! - Per-dependency records joining local and remote data

mod constraint;
mod record;
mod version;

pub use constraint::{ConstraintOp, VersionConstraint};
pub use record::{DependencyRecord, UpgradeDecision};
pub use version::{compare, parse_version};
