//! # Query Builder System
//!
//! Keyset predicates: SQL conditions selecting the records that sort strictly
//! before or strictly after a reference record under a multi-column order.
//!
//! ## Key Components
//!
//! - [`order`] - Ordering specification (`OrderSpace`, `OrderCondition`, `ORDER BY` rendering)
//! - [`conditions`] - Predicate terms and the `Identity`/`Never` sentinel algebra
//! - [`relative`] - Per-condition relative and tie-break terms
//! - [`keyset`] - Lexicographic composition and the index-friendly top-level rewrite
//! - [`record`] - Reading reference values off records
//!
//! ## Index-Friendly Output
//!
//! The exact predicate has OR at its top level, which planners cannot use to
//! narrow a scan on the leading sort column. With `wrap_top_level_or` enabled
//! (the default) the builder prepends an implied non-strict inequality on that
//! column:
//!
//! ```text
//! score >= ? AND (score > ? OR (score = ? AND id > ?))
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use keyset_core::query_builder::{KeysetPredicateBuilder, OrderCondition, OrderSpace};
//! use keyset_core::PredicateConfig;
//! use serde_json::json;
//!
//! let space = OrderSpace::new(vec![
//!     OrderCondition::asc("score"),
//!     OrderCondition::asc("id").unique(),
//! ])
//! .unwrap();
//!
//! let builder = KeysetPredicateBuilder::new(&space, PredicateConfig::default());
//! let predicate = builder.after(&json!({"score": 10, "id": 7})).unwrap();
//! assert_eq!(predicate.sql, "score >= ? AND (score > ? OR (score = ? AND id > ?))");
//! assert_eq!(predicate.params, vec![json!(10), json!(10), json!(10), json!(7)]);
//! ```

pub mod conditions;
pub mod keyset;
pub mod order;
pub mod record;
pub mod relative;

pub use conditions::{Fragment, LogicalOperator, Term};
pub use keyset::{build_predicate, KeysetPredicateBuilder, Predicate};
pub use order::{Direction, Enumeration, NullsOrder, OrderCondition, OrderSpace, Side};
pub use record::{to_record_values, FnRecord, RecordValues};
pub use relative::{equality_term, relative_term};
