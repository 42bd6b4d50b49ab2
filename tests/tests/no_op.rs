use bulkup::UpdateRow;
use pretty_assertions::assert_eq;
use tests::{
    fixtures::{seeded_users, setup_users, users},
    tests, DbTest,
};

async fn empty_batch_sends_nothing(test: &mut DbTest) {
    let db = setup_users(test).await;

    assert_eq!(db.bulk_update("User", []).await.unwrap(), 0);
    assert!(test.log().is_empty());
}

async fn batch_without_data_sends_nothing(test: &mut DbTest) {
    let db = setup_users(test).await;

    let rows = [
        UpdateRow::new().key("orgId", 1).key("email", "a@x.com"),
        UpdateRow::new().key("orgId", 1).key("email", "b@x.com"),
    ];

    assert_eq!(db.bulk_update("User", rows).await.unwrap(), 0);
    assert!(test.log().is_empty());
    assert_eq!(users(test, &db).await, seeded_users());
}

async fn empty_batch_through_table_handle(test: &mut DbTest) {
    let db = setup_users(test).await;

    let table = db.table("User").unwrap();
    assert_eq!(table.bulk_update(Vec::new()).await.unwrap(), 0);
    assert!(test.log().is_empty());
}

async fn empty_batch_for_missing_table_is_not_an_error(test: &mut DbTest) {
    let db = test.setup_db().await;

    // Nothing is sent, so the database never gets to complain.
    assert_eq!(db.bulk_update("DoesNotExist", []).await.unwrap(), 0);
    assert!(test.log().is_empty());
}

tests!(
    empty_batch_sends_nothing,
    batch_without_data_sends_nothing,
    empty_batch_through_table_handle,
    empty_batch_for_missing_table_is_not_an_error,
);
