use bulkup::{driver::Operation, UpdateRow, Value};
use pretty_assertions::assert_eq;
use tests::{
    fixtures::{seeded_users, setup_users, users, User},
    tests, DbTest,
};

fn scenario() -> Vec<UpdateRow> {
    vec![
        UpdateRow::new()
            .key("orgId", 1)
            .key("email", "a@x.com")
            .set("name", "A2")
            .set("status", "ACTIVE"),
        UpdateRow::new()
            .key("orgId", 1)
            .key("email", "b@x.com")
            .set("status", "INACTIVE"),
    ]
}

async fn two_rows_one_statement(test: &mut DbTest) {
    let db = setup_users(test).await;

    let count = db.bulk_update("User", scenario()).await.unwrap();
    assert_eq!(count, 2);

    // Exactly one statement reached the database
    assert_eq!(test.log().len(), 1);
    let op = test.log().pop().unwrap();
    let Operation::BulkUpdate(update) = op.operation else {
        panic!("expected a bulk update; op={:#?}", op.operation)
    };
    assert_eq!(update.rows.len(), 2);
    assert_eq!(update.assignments.len(), 2);
    assert_eq!(update.assignments[0].column, "name");
    assert_eq!(update.assignments[0].cases.len(), 1);
    assert_eq!(update.assignments[1].column, "status");
    assert_eq!(update.assignments[1].cases.len(), 2);

    assert_eq!(
        users(test, &db).await,
        [
            User::new(1, "a@x.com", Some("A2"), Some("ACTIVE")),
            User::new(1, "b@x.com", Some("B"), Some("INACTIVE")),
            User::new(2, "a@x.com", Some("C"), Some("PENDING")),
        ]
    );
}

async fn unmatched_key_changes_nothing(test: &mut DbTest) {
    let db = setup_users(test).await;

    let rows = [UpdateRow::new()
        .key("orgId", 9)
        .key("email", "z@x.com")
        .set("name", "Z")];

    assert_eq!(db.bulk_update("User", rows).await.unwrap(), 0);
    assert_eq!(test.log().len(), 1);
    assert_eq!(users(test, &db).await, seeded_users());
}

async fn unmatched_rows_do_not_block_matched_ones(test: &mut DbTest) {
    let db = setup_users(test).await;

    let rows = [
        UpdateRow::new()
            .key("orgId", 9)
            .key("email", "z@x.com")
            .set("name", "Z"),
        UpdateRow::new()
            .key("orgId", 2)
            .key("email", "a@x.com")
            .set("name", "C2"),
    ];

    assert_eq!(db.bulk_update("User", rows).await.unwrap(), 1);

    let mut expect = seeded_users();
    expect[2].name = Some("C2".to_string());
    assert_eq!(users(test, &db).await, expect);
}

async fn explicit_null_is_applied(test: &mut DbTest) {
    let db = setup_users(test).await;

    let rows = [UpdateRow::new()
        .key("orgId", 1)
        .key("email", "a@x.com")
        .set_null("name")];

    assert_eq!(db.bulk_update("User", rows).await.unwrap(), 1);

    let mut expect = seeded_users();
    expect[0].name = None;
    assert_eq!(users(test, &db).await, expect);
}

async fn text_null_is_stored_as_text(test: &mut DbTest) {
    let db = setup_users(test).await;

    let rows = [UpdateRow::new()
        .key("orgId", 1)
        .key("email", "a@x.com")
        .set("name", "null")];

    db.bulk_update("User", rows).await.unwrap();

    let mut expect = seeded_users();
    expect[0].name = Some("null".to_string());
    assert_eq!(users(test, &db).await, expect);
}

async fn absent_columns_keep_their_value(test: &mut DbTest) {
    let db = setup_users(test).await;

    let rows = [
        UpdateRow::new()
            .key("orgId", 1)
            .key("email", "a@x.com")
            .set("name", "A2"),
        UpdateRow::new()
            .key("orgId", 1)
            .key("email", "b@x.com")
            .set("status", "ACTIVE"),
    ];

    assert_eq!(db.bulk_update("User", rows).await.unwrap(), 2);

    assert_eq!(
        users(test, &db).await,
        [
            User::new(1, "a@x.com", Some("A2"), Some("PENDING")),
            User::new(1, "b@x.com", Some("B"), Some("ACTIVE")),
            User::new(2, "a@x.com", Some("C"), Some("PENDING")),
        ]
    );
}

async fn row_without_data_is_left_unchanged(test: &mut DbTest) {
    let db = setup_users(test).await;

    let rows = [
        UpdateRow::new()
            .key("orgId", 1)
            .key("email", "a@x.com")
            .set("name", "A2"),
        UpdateRow::new().key("orgId", 1).key("email", "b@x.com"),
    ];

    // The second row still matches the filter; its columns are assigned
    // their own value.
    assert_eq!(db.bulk_update("User", rows).await.unwrap(), 2);

    let mut expect = seeded_users();
    expect[0].name = Some("A2".to_string());
    assert_eq!(users(test, &db).await, expect);
}

async fn first_duplicate_key_wins(test: &mut DbTest) {
    let db = setup_users(test).await;

    let rows = [
        UpdateRow::new()
            .key("orgId", 1)
            .key("email", "a@x.com")
            .set("name", "first"),
        UpdateRow::new()
            .key("orgId", 1)
            .key("email", "a@x.com")
            .set("name", "second"),
    ];

    assert_eq!(db.bulk_update("User", rows).await.unwrap(), 1);

    let mut expect = seeded_users();
    expect[0].name = Some("first".to_string());
    assert_eq!(users(test, &db).await, expect);
}

async fn applying_twice_is_idempotent(test: &mut DbTest) {
    let db = setup_users(test).await;

    db.bulk_update("User", scenario()).await.unwrap();
    let once = users(test, &db).await;

    db.bulk_update("User", scenario()).await.unwrap();
    assert_eq!(users(test, &db).await, once);
}

async fn compound_key_wrapper(test: &mut DbTest) {
    let db = setup_users(test).await;

    let rows = [UpdateRow::new()
        .key_record(
            "orgId_email",
            [("orgId", Value::from(2)), ("email", Value::from("a@x.com"))],
        )
        .set("status", "ACTIVE")];

    assert_eq!(db.bulk_update("User", rows).await.unwrap(), 1);

    let mut expect = seeded_users();
    expect[2].status = Some("ACTIVE".to_string());
    assert_eq!(users(test, &db).await, expect);
}

async fn reordered_key_columns(test: &mut DbTest) {
    let db = setup_users(test).await;

    let rows = [
        UpdateRow::new()
            .key("orgId", 1)
            .key("email", "a@x.com")
            .set("status", "ACTIVE"),
        UpdateRow::new()
            .key("email", "a@x.com")
            .key("orgId", 2)
            .set("status", "ACTIVE"),
    ];

    assert_eq!(db.bulk_update("User", rows).await.unwrap(), 2);

    let mut expect = seeded_users();
    expect[0].status = Some("ACTIVE".to_string());
    expect[2].status = Some("ACTIVE".to_string());
    assert_eq!(users(test, &db).await, expect);
}

async fn table_handle(test: &mut DbTest) {
    let db = setup_users(test).await;

    let table = db.table("User").unwrap();
    assert_eq!(table.name().to_string(), test.table_name("User"));

    assert_eq!(table.bulk_update(scenario()).await.unwrap(), 2);
    assert_eq!(test.log().bulk_updates().len(), 1);
}

async fn scalar_types(test: &mut DbTest) {
    let db = test.setup_db().await;
    let table = test.table_name("Account");

    db.exec_sql(
        format!(
            "CREATE TABLE \"{table}\" (
                \"id\" INTEGER PRIMARY KEY,
                \"balance\" DOUBLE PRECISION,
                \"active\" BOOLEAN,
                \"visits\" BIGINT
            )"
        ),
        [],
    )
    .await
    .unwrap();
    db.exec_sql(
        format!("INSERT INTO \"{table}\" (\"id\", \"balance\", \"active\", \"visits\") VALUES (1, 0.5, FALSE, 0), (2, 0.5, FALSE, 0)"),
        [],
    )
    .await
    .unwrap();

    let rows = [
        UpdateRow::new()
            .key("id", 1)
            .set("balance", 12.5)
            .set("active", true)
            .set("visits", 7_000_000_000_i64),
        UpdateRow::new().key("id", 2).set("balance", -3),
    ];

    assert_eq!(db.bulk_update("Account", rows).await.unwrap(), 2);

    let rows = db
        .query_sql(
            format!("SELECT \"balance\", \"active\", \"visits\" FROM \"{table}\" ORDER BY \"id\""),
            [],
        )
        .await
        .unwrap();

    assert_eq!(rows[0].get("balance").and_then(Value::as_f64), Some(12.5));
    // SQLite reads booleans back as integers
    assert!(rows[0].get("active").cloned().unwrap().to_bool().unwrap());
    assert_eq!(rows[0].get("visits").and_then(Value::as_i64), Some(7_000_000_000));

    assert_eq!(rows[1].get("balance").and_then(Value::as_f64), Some(-3.0));
    assert!(!rows[1].get("active").cloned().unwrap().to_bool().unwrap());
}

tests!(
    two_rows_one_statement,
    unmatched_key_changes_nothing,
    unmatched_rows_do_not_block_matched_ones,
    explicit_null_is_applied,
    text_null_is_stored_as_text,
    absent_columns_keep_their_value,
    row_without_data_is_left_unchanged,
    first_duplicate_key_wins,
    applying_twice_is_idempotent,
    compound_key_wrapper,
    reordered_key_columns,
    table_handle,
    scalar_types,
);
