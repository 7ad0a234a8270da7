//! # conform-core
//!
//! Core types and error types for the conform schema conformance engine.
//!
//! This crate provides the foundational types shared across all conform crates:
//! - Reference schema definitions (`schema.json`)
//! - Domain references handed out by discovery and per-domain scan records
//! - Structural conformance verdicts and column diffs
//! - Categorical value catalogs
//! - Aggregate report roots (`domains.json`, `categoricals.json`)
//! - Status enums, including the scan run state machine
//! - Table addressing and on-disk layout
//! - Command response types

pub mod address;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
