//! Linguistic value objects produced by the pipeline.
//!
//! # Responsibility
//! - Define the per-word token shape filled from analyzer output.
//!
//! # Invariants
//! - Absent lemma/tags are `None`, never empty strings standing in for absence.
//! - A token exposing tags always exposes a lemma.

pub mod token;
