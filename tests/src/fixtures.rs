//! Tables shared by the integration tests.

use bulkup::{Db, ValueRecord};

use crate::DbTest;

/// One row of the `User` fixture table.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub org_id: i64,
    pub email: String,
    pub name: Option<String>,
    pub status: Option<String>,
}

impl User {
    pub fn new(org_id: i64, email: &str, name: Option<&str>, status: Option<&str>) -> User {
        User {
            org_id,
            email: email.to_string(),
            name: name.map(str::to_string),
            status: status.map(str::to_string),
        }
    }

    fn from_record(record: &ValueRecord) -> User {
        let text = |name: &str| {
            record
                .get(name)
                .and_then(|value| value.as_str())
                .map(str::to_string)
        };

        User {
            org_id: record
                .get("orgId")
                .and_then(|value| value.as_i64())
                .expect("orgId"),
            email: text("email").expect("email"),
            name: text("name"),
            status: text("status"),
        }
    }
}

/// Creates the `User` table keyed by `(orgId, email)` and seeds three rows,
/// then clears the operation log.
///
/// | orgId | email   | name | status  |
/// |-------|---------|------|---------|
/// | 1     | a@x.com | A    | PENDING |
/// | 1     | b@x.com | B    | PENDING |
/// | 2     | a@x.com | C    | PENDING |
pub async fn setup_users(test: &mut DbTest) -> Db {
    let db = test.setup_db().await;
    let table = test.table_name("User");

    db.exec_sql(
        format!(
            "CREATE TABLE \"{table}\" (
                \"orgId\" INTEGER NOT NULL,
                \"email\" TEXT NOT NULL,
                \"name\" TEXT,
                \"status\" TEXT,
                PRIMARY KEY (\"orgId\", \"email\")
            )"
        ),
        [],
    )
    .await
    .unwrap();

    db.exec_sql(
        format!(
            "INSERT INTO \"{table}\" (\"orgId\", \"email\", \"name\", \"status\") VALUES
                (1, 'a@x.com', 'A', 'PENDING'),
                (1, 'b@x.com', 'B', 'PENDING'),
                (2, 'a@x.com', 'C', 'PENDING')"
        ),
        [],
    )
    .await
    .unwrap();

    test.log().clear();
    db
}

/// The seeded `User` rows, before any update.
pub fn seeded_users() -> Vec<User> {
    vec![
        User::new(1, "a@x.com", Some("A"), Some("PENDING")),
        User::new(1, "b@x.com", Some("B"), Some("PENDING")),
        User::new(2, "a@x.com", Some("C"), Some("PENDING")),
    ]
}

/// Every `User` row, ordered by key.
///
/// The read goes through the logged connection; assert on the log first.
pub async fn users(test: &DbTest, db: &Db) -> Vec<User> {
    let table = test.table_name("User");

    db.query_sql(
        format!(
            "SELECT \"orgId\", \"email\", \"name\", \"status\" FROM \"{table}\"
             ORDER BY \"orgId\", \"email\""
        ),
        [],
    )
    .await
    .unwrap()
    .iter()
    .map(User::from_record)
    .collect()
}
