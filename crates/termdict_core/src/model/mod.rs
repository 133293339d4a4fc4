//! Domain model for dictionary terms.
//!
//! # Responsibility
//! - Define the closed subject enumeration and the canonical term record.
//! - Keep construction-time validation next to the types it protects.
//!
//! # Invariants
//! - A `Term` always carries a known `Subject` and a non-blank label.
//! - Term IDs are unique within one load cycle and never reused.

pub mod term;
