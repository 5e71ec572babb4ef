//! End-to-end checks of the public API across the built-in drivers.

use sqlprep::{
    Array, Mode, MultiInsertSyntax, MySqlDriver, PostgresDriver, PrepError, Preprocessor,
    PreprocessorConfig, SqlLiteral, SqliteDriver, Value, array, params,
};
use std::sync::Arc;

fn quiet() -> PreprocessorConfig {
    PreprocessorConfig::new().no_logging()
}

#[test]
fn search_query_with_optional_filters() {
    let pre = Preprocessor::new(PostgresDriver).with_config(quiet());

    let mut filters = Array::new();
    filters.insert("status", "active");
    filters.insert("age >=", 18);
    filters.insert("country", array!["CZ", "SK"]);

    let (sql, bound) = pre
        .process(
            &params![
                "SELECT id, name FROM users WHERE",
                filters,
                "ORDER BY ?",
                array! { "name" => 1, "created_at" => -1 }
            ],
            false,
        )
        .unwrap();

    assert_eq!(
        sql,
        r#"SELECT id, name FROM users WHERE ("status" = ?) AND ("age" >= ?) AND ("country" IN (?, ?)) ORDER BY "name", "created_at" DESC"#
    );
    assert_eq!(bound, params!["active", 18, "CZ", "SK"]);
}

#[test]
fn upsert_with_shared_driver() {
    let pre = Preprocessor::with_driver(Arc::new(MySqlDriver)).with_config(quiet());
    let row = array! { "id" => 1, "hits" => 1 };

    let (sql, bound) = pre
        .process(
            &params![
                "INSERT INTO counters ?values ON DUPLICATE KEY UPDATE ?",
                row,
                array! { "hits+=" => 1 }
            ],
            false,
        )
        .unwrap();

    assert_eq!(
        sql,
        "INSERT INTO counters (`id`, `hits`) VALUES (?, ?) ON DUPLICATE KEY UPDATE `hits` = `hits` + ?"
    );
    assert_eq!(bound, params![1, 1, 1]);
}

#[test]
fn sqlite_inline_batch_insert() {
    let pre = Preprocessor::new(SqliteDriver::new()).with_config(quiet());
    let rows = array![
        array! { "name" => "a", "score" => 1.25 },
        array! { "name" => "b'c", "score" => 2.0 }
    ];

    let (sql, bound) = pre.process(&params!["?values", rows], false).unwrap();
    assert_eq!(sql, "([name], [score]) VALUES ('a', 1.25), ('b''c', 2)");
    assert!(bound.is_empty());

    let legacy = pre
        .clone()
        .with_config(quiet().multi_insert(MultiInsertSyntax::UnionSelect));
    let rows = array![array! { "n" => 1 }, array! { "n" => 2 }];
    let (sql, _) = legacy.process(&params!["?values", rows], false).unwrap();
    assert_eq!(sql, "([n]) SELECT 1 UNION ALL SELECT 2");
}

#[test]
fn nested_literals_keep_binding_order() {
    let pre = Preprocessor::new(MySqlDriver).with_config(quiet());
    let recent = SqlLiteral::new("created_at > ?").bind("2024-01-01");
    let owned = SqlLiteral::new("owner_id IN ?").bind(array![3, 4]);

    let (sql, bound) = pre
        .process(
            &params![
                "SELECT * FROM docs WHERE ?or",
                array! { 0 => recent, 1 => owned },
                "LIMIT ?",
                10
            ],
            false,
        )
        .unwrap();

    assert_eq!(
        sql,
        "SELECT * FROM docs WHERE (created_at > ?) OR (owner_id IN (?, ?)) LIMIT ?"
    );
    assert_eq!(bound, params!["2024-01-01", 3, 4, 10]);
}

#[test]
fn json_values_convert_to_arrays() {
    let pre = Preprocessor::new(MySqlDriver).with_config(quiet());
    let json = serde_json::json!({ "name": "x", "tags": ["a", "b"], "deleted": null });

    let conditions = Value::try_from(json).unwrap();
    let (sql, _) = pre.process(&[Value::from("?and"), conditions], false).unwrap();
    assert_eq!(
        sql,
        "(`name` = 'x') AND (`tags` IN ('a', 'b')) AND (`deleted` IS NULL)"
    );
}

#[test]
fn json_integers_beyond_i64_are_rejected() {
    let e = Value::try_from(serde_json::json!({ "id": u64::MAX })).unwrap_err();
    assert!(matches!(e, PrepError::InvalidValue(_)));
}

#[test]
fn errors_describe_the_offending_placeholder() {
    let pre = Preprocessor::new(MySqlDriver).with_config(quiet());

    let e = pre.process(&params!["a IN ?list", 1], false).unwrap_err();
    assert_eq!(e.to_string(), "Placeholder ?list expects array, int given");

    let e = pre.process(&params!["a = ?x", 1], false).unwrap_err();
    assert!(matches!(e, PrepError::UnknownPlaceholder(ref s) if s == "x"));

    let e = pre.process(&params!["a = ?", 1, 2], false).unwrap_err();
    assert!(e.is_arity_error());
}

#[test]
fn modes_parse_from_suffixes() {
    assert_eq!(Mode::from_suffix("values"), Some(Mode::Values));
    assert_eq!(Mode::from_suffix("name"), None);
    assert_eq!(Mode::Or.to_string(), "or");
}
