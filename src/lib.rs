#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Keyset Core Rust
//!
//! SQL predicate construction for keyset pagination.
//!
//! ## Overview
//!
//! Given an ordering specification (a sequence of sort conditions mixing
//! ascending and descending, unique and non-unique, enumerated and continuous
//! columns) and a reference record, the builder emits one SQL condition that
//! matches exactly the records sorting strictly before, or strictly after, the
//! reference record. The output is an SQL fragment with `?` placeholders and a
//! list of JSON parameters; executing it is left to the caller.
//!
//! ## Module Organization
//!
//! - [`query_builder`] - Order spaces, predicate terms and keyset composition
//! - [`config`] - Predicate configuration (defaults, config file, environment)
//! - [`error`] - Structured error handling
//! - [`validation`] - Ordering specification validation
//! - [`logging`] - Structured logging setup
//! - `postgres` - Binding predicates into `sqlx` query builders (feature `postgres`)
//!
//! ## Quick Start
//!
//! ```rust
//! use keyset_core::{build_predicate, OrderCondition, OrderSpace, PredicateConfig, Side};
//! use serde_json::json;
//!
//! # fn main() -> keyset_core::Result<()> {
//! let space = OrderSpace::new(vec![
//!     OrderCondition::asc("score"),
//!     OrderCondition::asc("id").unique(),
//! ])?;
//! let cursor = json!({"score": 10, "id": 7});
//!
//! let config = PredicateConfig::default().with_wrap_top_level_or(false);
//! let (sql, params) = build_predicate(&cursor, &space, Side::After, config)?.into_parts();
//! assert_eq!(sql, "score > ? OR (score = ? AND id > ?)");
//! assert_eq!(params, vec![json!(10), json!(10), json!(7)]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # All tests, including property tests
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod query_builder;
pub mod validation;

pub use crate::config::PredicateConfig;
pub use crate::error::{KeysetError, Result};
pub use crate::query_builder::{
    build_predicate, Direction, Enumeration, KeysetPredicateBuilder, NullsOrder, OrderCondition,
    OrderSpace, Predicate, RecordValues, Side, Term,
};
