//! Store filter expressions.
//!
//! # Responsibility
//! - Describe exact-match, range and array-containment lookups as values.
//! - Compile filters into parameterized SQL predicates over JSON bodies.
//!
//! # Invariants
//! - Building or compiling a filter never touches the store.
//! - Comparisons are type-sensitive: an integer never matches text.
//! - Field names reach SQL only as bound JSON-path parameters.

pub mod filter;
