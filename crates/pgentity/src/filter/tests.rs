use super::*;
use crate::property::{Property, PropertyType};
use crate::value::Value;

fn props() -> Vec<Property> {
    vec![
        Property::new("name", PropertyType::String),
        Property::new("age", PropertyType::Integer),
        Property::new("createdAt", PropertyType::Timestamp),
        Property::new("password", PropertyType::Password).filterable(false),
    ]
}

fn lookup<'p>(props: &'p [Property]) -> impl Fn(&str) -> Option<&'p Property> + 'p {
    move |key| props.iter().find(|p| p.key == key)
}

#[test]
fn test_deserialize_keeps_key_order() {
    let filters: Filters = serde_json::from_str(
        r#"{"zeta": {"value": 1, "matchMode": "equals"},
            "alpha": {"value": "a", "matchMode": "contains"},
            "mid": {"value": [1, 2]}}"#,
    )
    .unwrap();
    assert_eq!(filters.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
    assert_eq!(filters.get("mid").unwrap().match_mode, None);
}

#[test]
fn test_unknown_match_mode_deserializes_as_none() {
    let filters: Filters =
        serde_json::from_str(r#"{"d": {"value": "x", "matchMode": "dateAfter"}}"#).unwrap();
    assert_eq!(filters.get("d").unwrap().match_mode, None);
}

#[test]
fn test_null_filters_are_empty() {
    let filters: Filters = serde_json::from_str("null").unwrap();
    assert!(filters.is_empty());
}

#[test]
fn test_clean_drops_invalid_entries() {
    let props = props();
    let filters = Filters::new()
        .with("name", Filter::new("Jo", MatchMode::StartsWith))
        .with("unknown", Filter::new(1, MatchMode::Equals))
        .with("password", Filter::new("x", MatchMode::Equals))
        .with("createdAt", Filter::new("2024", MatchMode::Contains))
        .with("age", Filter::new(30, MatchMode::Gte));

    let cleaned = clean_filters(filters, lookup(&props));
    assert_eq!(cleaned.keys().collect::<Vec<_>>(), vec!["name", "age"]);
}

#[test]
fn test_clean_drops_missing_match_mode() {
    let props = props();
    let mut filters = Filters::new();
    filters.insert(
        "name",
        Filter {
            value: Value::from("x"),
            match_mode: None,
        },
    );
    assert!(clean_filters(filters, lookup(&props)).is_empty());
}

#[test]
fn test_date_filter_with_string_mode_leaves_no_argument() {
    let props = props();
    let filters = Filters::new().with("createdAt", Filter::new("2024-01-01", MatchMode::Contains));
    let compiled = compile(&clean_filters(filters, lookup(&props)), 1);
    assert!(compiled.conditions.is_empty());
    assert!(compiled.args.is_empty());
    assert_eq!(compiled.next, 1);
}

#[test]
fn test_compile_scalars() {
    let filters = Filters::new()
        .with("name", Filter::new("John", MatchMode::StartsWith))
        .with("age", Filter::new(30, MatchMode::Gte));
    let compiled = compile(&filters, 1);
    assert_eq!(compiled.conditions, vec!["name LIKE $1%", "age >= $2"]);
    assert_eq!(compiled.args, vec![Value::from("John"), Value::from(30)]);
    assert_eq!(compiled.next, 3);
}

#[test]
fn test_compile_multi_valued_in() {
    let filters = Filters::new()
        .with("name", Filter::new("x", MatchMode::NotContains))
        .with("age", Filter::new(vec![18, 21, 65], MatchMode::In))
        .with("createdAt", Filter::new("2024-01-01T00:00:00Z", MatchMode::Before));
    let compiled = compile(&filters, 1);
    assert_eq!(
        compiled.conditions,
        vec![
            "name NOT LIKE %$1%",
            "age IN ($2,$3,$4)",
            r#""createdAt" < $5"#
        ]
    );
    assert_eq!(compiled.args.len(), 5);
    assert_eq!(compiled.args[1..4], [Value::from(18), Value::from(21), Value::from(65)]);
}

#[test]
fn test_compile_continues_from_start() {
    let filters = Filters::new().with("name", Filter::new("x", MatchMode::EndsWith));
    let compiled = compile(&filters, 4);
    assert_eq!(compiled.conditions, vec!["name LIKE %$4"]);
    assert_eq!(compiled.next, 5);
}

#[test]
fn test_compile_skips_without_wasting_ordinals() {
    let filters = Filters::new()
        .with("a", Filter::new(vec![1, 9], MatchMode::Between))
        .with("b", Filter::new(Vec::<i32>::new(), MatchMode::In))
        .with("c", Filter::new(3, MatchMode::Lt))
        .with("d", Filter::new("x", MatchMode::StDwithin))
        .with("e", Filter::new(4, MatchMode::NotEquals));
    let compiled = compile(&filters, 1);
    assert_eq!(compiled.conditions, vec!["c < $1", "e <> $2"]);
    assert_eq!(compiled.args, vec![Value::from(3), Value::from(4)]);
}

#[test]
fn test_placeholder_count_matches_args() {
    let filters = Filters::new()
        .with("name", Filter::new("a", MatchMode::Contains))
        .with("age", Filter::new(vec![1, 2, 3, 4], MatchMode::In))
        .with("createdAt", Filter::new("2024-01-01T00:00:00Z", MatchMode::After));
    let compiled = compile(&filters, 1);
    let text = compiled.conditions.join(" AND ");
    let count = text.matches('$').count();
    assert_eq!(count, compiled.args.len());
    for n in 1..=compiled.args.len() {
        assert!(text.contains(&format!("${n}")));
    }
}
