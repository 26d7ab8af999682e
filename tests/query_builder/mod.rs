//! Query Builder Tests Module
//!
//! Keyset predicate construction exercised through the public API.

pub mod conditions;
pub mod order;
