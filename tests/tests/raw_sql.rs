use bulkup::{Value, ValueRecord};
use pretty_assertions::assert_eq;
use tests::{fixtures::setup_users, tests, DbTest};

async fn exec_sql_reports_affected_rows(test: &mut DbTest) {
    let db = setup_users(test).await;
    let table = test.table_name("User");

    // SQLite reads `$N` as a named parameter numbered by first appearance.
    let count = db
        .exec_sql(
            format!("UPDATE \"{table}\" SET \"status\" = $1 WHERE \"orgId\" = $2"),
            [Value::from("ARCHIVED"), Value::from(1)],
        )
        .await
        .unwrap();

    assert_eq!(count, 2);
    assert_eq!(test.log().len(), 1);
}

async fn query_sql_keys_rows_by_column(test: &mut DbTest) {
    let db = setup_users(test).await;
    let table = test.table_name("User");

    let rows = db
        .query_sql(
            format!(
                "SELECT \"email\", \"name\" FROM \"{table}\" WHERE \"orgId\" = $1 ORDER BY \"email\""
            ),
            [Value::from(1)],
        )
        .await
        .unwrap();

    assert_eq!(
        rows,
        [
            ValueRecord::from([("email", "a@x.com"), ("name", "A")]),
            ValueRecord::from([("email", "b@x.com"), ("name", "B")]),
        ]
    );

    // Column order follows the select list
    assert_eq!(rows[0].names().collect::<Vec<_>>(), ["email", "name"]);
}

async fn query_sql_reads_nulls(test: &mut DbTest) {
    let db = setup_users(test).await;
    let table = test.table_name("User");

    db.exec_sql(
        format!("UPDATE \"{table}\" SET \"name\" = NULL WHERE \"orgId\" = 2"),
        [],
    )
    .await
    .unwrap();

    let rows = db
        .query_sql(
            format!("SELECT \"name\" FROM \"{table}\" WHERE \"orgId\" = 2"),
            [],
        )
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert!(rows[0].get("name").unwrap().is_null());
}

tests!(
    exec_sql_reports_affected_rows,
    query_sql_keys_rows_by_column,
    query_sql_reads_nulls,
);
