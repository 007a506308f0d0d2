mod support;

use support::{connect, MockDb};

use pretty_assertions::assert_eq;
use rowgate::{
    row,
    schema::ColumnMetadata,
    stmt::{Type, Value},
    DefaultSource, TableConfig,
};

use std::sync::Arc;

fn accounts_columns() -> Vec<ColumnMetadata> {
    vec![
        ColumnMetadata::new("id", Type::Integer).not_null().identity(),
        ColumnMetadata::new("status", Type::Text)
            .not_null()
            .default_value("active"),
        ColumnMetadata::new("plan", Type::Text).default_value("free"),
        ColumnMetadata::new("note", Type::Text),
    ]
}

#[tokio::test]
async fn schema_defaults_fill_non_nullable_columns() {
    let db = Arc::new(MockDb::new());
    db.register_table("accounts", accounts_columns());
    let accounts = connect(
        &db,
        TableConfig::builder("accounts")
            .primary_key(["id"])
            .default_source(DefaultSource::Schema)
            .build(),
    )
    .await;

    let row = accounts.create_row(row! {}, None).unwrap();

    assert_eq!(row.get("status"), Some(&Value::from("active")));
    // nullable column without an opt-in flag stays null
    assert_eq!(row.get("plan"), Some(&Value::Null));
    assert_eq!(row.get("note"), Some(&Value::Null));
    assert!(!row.is_stored());
}

#[tokio::test]
async fn nullable_opt_in_receives_schema_default() {
    let db = Arc::new(MockDb::new());
    db.register_table("accounts", accounts_columns());
    let accounts = connect(
        &db,
        TableConfig::builder("accounts")
            .primary_key(["id"])
            .default_source(DefaultSource::Schema)
            .schema_default("plan", true)
            .schema_default("status", false)
            .build(),
    )
    .await;

    let row = accounts.create_row(row! {}, None).unwrap();

    assert_eq!(row.get("plan"), Some(&Value::from("free")));
    // opted out, even though non-nullable
    assert_eq!(row.get("status"), Some(&Value::Null));
}

#[tokio::test]
async fn caller_data_wins_over_defaults() {
    let db = Arc::new(MockDb::new());
    db.register_table("accounts", accounts_columns());
    let accounts = connect(
        &db,
        TableConfig::builder("accounts")
            .primary_key(["id"])
            .default_source(DefaultSource::Schema)
            .build(),
    )
    .await;

    let row = accounts
        .create_row(row! { "status" => "suspended" }, None)
        .unwrap();

    assert_eq!(row.get("status"), Some(&Value::from("suspended")));
}

#[tokio::test]
async fn class_defaults_apply_to_known_columns_only() {
    let db = Arc::new(MockDb::new());
    db.register_table("accounts", accounts_columns());
    let accounts = connect(
        &db,
        TableConfig::builder("accounts")
            .primary_key(["id"])
            .default_source(DefaultSource::Class)
            .class_default("note", "imported")
            .class_default("ghost", "ignored")
            .build(),
    )
    .await;

    let row = accounts.create_row(row! {}, None).unwrap();

    assert_eq!(row.get("note"), Some(&Value::from("imported")));
    assert_eq!(row.get("ghost"), None);
    // schema defaults do not apply under the Class policy
    assert_eq!(row.get("status"), Some(&Value::Null));
}

#[tokio::test]
async fn per_call_override_beats_configured_source() {
    let db = Arc::new(MockDb::new());
    db.register_table("accounts", accounts_columns());
    let accounts = connect(
        &db,
        TableConfig::builder("accounts")
            .primary_key(["id"])
            .default_source(DefaultSource::Schema)
            .build(),
    )
    .await;

    let row = accounts
        .create_row(row! {}, Some(DefaultSource::None))
        .unwrap();

    assert!(row.data().values().all(Value::is_null));
    assert_eq!(row.data().len(), accounts.columns().len());
}

#[tokio::test]
async fn unknown_column_in_initial_data_is_rejected() {
    let db = Arc::new(MockDb::new());
    db.register_table("accounts", accounts_columns());
    let accounts = connect(
        &db,
        TableConfig::builder("accounts").primary_key(["id"]).build(),
    )
    .await;

    let err = accounts.create_row(row! { "ghost" => 1 }, None).unwrap_err();
    assert!(err.is_argument());
}
