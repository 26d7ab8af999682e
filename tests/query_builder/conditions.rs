use keyset_core::query_builder::conditions::*;
use serde_json::json;

#[test]
fn test_join_concatenates_params_left_to_right() {
    let term = Term::join(
        LogicalOperator::And,
        [
            Term::comparison("a", ">=", json!(1)),
            Term::Identity,
            Term::membership("b", vec![json!("x"), json!("y")]),
            Term::is_not_null("c"),
        ],
    );
    let (sql, params) = term.into_parts();
    assert_eq!(sql, "a >= ? AND b IN (?) AND c IS NOT NULL");
    assert_eq!(params, vec![json!(1), json!(["x", "y"])]);
}

#[test]
fn test_never_short_circuits_and() {
    let term = Term::join(
        LogicalOperator::And,
        [Term::equals("a", json!(1)), Term::Never, Term::equals("b", json!(2))],
    );
    assert_eq!(term, Term::Never);
    assert_eq!(term.into_parts(), ("1=0".to_string(), vec![]));
}

#[test]
fn test_identity_absorbs_or() {
    let term = Term::join(
        LogicalOperator::Or,
        [Term::Never, Term::equals("a", json!(1)), Term::Identity],
    );
    assert_eq!(term, Term::Identity);
    assert_eq!(term.to_sql(), "");
}

#[test]
fn test_nested_compound_terms() {
    let inner = Term::comparison("b", "<", json!(2))
        .or(Term::equals("b", json!(2)).and(Term::comparison("c", ">", json!(3))));
    let term = Term::comparison("a", ">", json!(1)).or(Term::equals("a", json!(1)).and(inner));

    assert_eq!(
        term.to_sql(),
        "a > ? OR (a = ? AND (b < ? OR (b = ? AND c > ?)))"
    );
    assert_eq!(term.param_count(), 5);
}

#[test]
fn test_parenthesized_fragment_is_not_wrapped_twice() {
    let exact = Term::comparison("a", ">", json!(1)).or(Term::equals("a", json!(1)));
    let term = Term::comparison("a", ">=", json!(1)).and(exact.parenthesized());
    assert_eq!(term.to_sql(), "a >= ? AND (a > ? OR a = ?)");
}

#[test]
fn test_fragment_accessors() {
    let fragment = Fragment::new("x = ?", vec![json!(true)]);
    assert_eq!(fragment.sql(), "x = ?");
    assert_eq!(fragment.params(), &[json!(true)]);
    assert!(!fragment.is_compound());
}
