use keyset_core::query_builder::order::*;
use keyset_core::KeysetError;
use serde_json::json;

#[test]
fn test_order_by_for_plain_columns() {
    let space = OrderSpace::new(vec![
        OrderCondition::desc("created_at").with_column("posts.created_at"),
        OrderCondition::asc("id").with_column("posts.id").unique(),
    ])
    .unwrap();

    let (sql, params) = space.order_by_sql(false);
    assert_eq!(sql, "posts.created_at DESC, posts.id ASC");
    assert!(params.is_empty());

    let (sql, _) = space.order_by_sql(true);
    assert_eq!(sql, "posts.created_at ASC, posts.id DESC");
}

#[test]
fn test_order_space_rejects_condition_after_unique() {
    let result = OrderSpace::new(vec![
        OrderCondition::asc("id").unique(),
        OrderCondition::asc("name").unique(),
    ]);
    assert!(matches!(result, Err(KeysetError::InvalidOrderSpace { .. })));
}

#[test]
fn test_order_space_rejects_empty() {
    assert!(matches!(
        OrderSpace::new(Vec::new()),
        Err(KeysetError::InvalidOrderSpace { .. })
    ));
}

#[test]
fn test_order_space_round_trips_through_json() {
    let space = OrderSpace::new(vec![
        OrderCondition::asc("status")
            .with_enumeration(Enumeration::complete(vec![json!("open"), json!("closed")])),
        OrderCondition::desc("score").nulls_first(),
        OrderCondition::asc("id").unique(),
    ])
    .unwrap();

    let encoded = serde_json::to_value(&space).unwrap();
    assert_eq!(encoded[1]["nulls"], json!("first"));
    assert_eq!(encoded[0]["enumeration"]["complete"], json!(true));

    let decoded: OrderSpace = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded, space);
}

#[test]
fn test_side_and_direction_helpers() {
    assert_eq!(Side::Before.opposite(), Side::After);
    assert_eq!(Side::After.to_string(), "after");
    assert_eq!(Direction::Desc.reversed(), Direction::Asc);
    assert_eq!(NullsOrder::Last.reversed(), NullsOrder::First);
    assert_eq!(Direction::Asc.as_sql(), "ASC");
}
