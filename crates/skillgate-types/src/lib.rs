//! # skillgate-types
//!
//! Core type definitions for the skillgate skill validation engine.
//!
//! This crate is the foundation of the dependency graph -- the engine
//! crate depends on it. It contains:
//!
//! - **[`error`]** -- [`SkillGateError`] and the crate [`Result`] alias
//! - **[`threat`]** -- The threat model: trust levels, severities,
//!   violations, and validation request/result snapshots
//! - **[`skill`]** -- Skill document and frontmatter metadata types

pub mod error;
pub mod skill;
pub mod threat;

pub use error::{Result, SkillGateError};
pub use threat::{
    ThreatCategory, ThreatSeverity, TrustLevel, ValidationRequest, ValidationResult, Violation,
    ViolationLocation,
};
