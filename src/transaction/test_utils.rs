use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use scraper::ElementRef;
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    database_id::TransactionId,
    db::initialize,
    transaction::{
        NewTransaction, SQLiteTransactionStore, SharedTransactionStore, Transaction,
        TransactionSource, TransactionStore, TransactionType,
    },
};

/// A stored transaction for tests that only care about the amount, date and category.
pub fn create_test_transaction(amount: f64, date: Date, category: &str) -> Transaction {
    Transaction {
        id: 0,
        description: String::new(),
        amount,
        category: category.to_owned(),
        transaction_date: date,
        source: TransactionSource::Manual,
        transaction_type: TransactionType::from_amount(amount),
        created_at: OffsetDateTime::UNIX_EPOCH,
        updated_at: OffsetDateTime::UNIX_EPOCH,
    }
}

/// A transaction store backed by an in-memory SQLite database.
pub fn get_test_store() -> SharedTransactionStore {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    Arc::new(SQLiteTransactionStore::new(Arc::new(Mutex::new(conn))))
}

/// A store where every operation fails as if the database lock was poisoned.
#[derive(Debug)]
pub struct FailingTransactionStore;

impl TransactionStore for FailingTransactionStore {
    fn load(&self) -> Result<Vec<Transaction>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn insert(&self, _transaction: NewTransaction) -> Result<Transaction, Error> {
        Err(Error::DatabaseLockError)
    }

    fn insert_many(&self, _transactions: Vec<NewTransaction>) -> Result<Vec<Transaction>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn soft_delete(&self, _id: TransactionId) -> Result<(), Error> {
        Err(Error::DatabaseLockError)
    }
}

#[track_caller]
pub fn assert_transaction_type_inputs(form: &ElementRef, checked_type: Option<&str>) {
    let selector = scraper::Selector::parse("input[type=radio][name=type_]").unwrap();
    let inputs = form.select(&selector).collect::<Vec<_>>();
    assert_eq!(
        inputs.len(),
        2,
        "want 2 transaction type inputs, got {}",
        inputs.len()
    );

    let mut values = inputs
        .iter()
        .filter_map(|input| input.value().attr("value"))
        .collect::<Vec<_>>();
    values.sort_unstable();
    assert_eq!(
        values,
        vec!["expense", "income"],
        "want transaction type values to be expense/income, got {values:?}"
    );

    let checked_count = inputs
        .iter()
        .filter(|input| input.value().attr("checked").is_some())
        .count();
    assert_eq!(
        checked_count, 1,
        "want exactly one transaction type input checked, got {checked_count}"
    );

    if let Some(checked_type) = checked_type {
        let expected_checked = inputs.iter().any(|input| {
            input.value().attr("value") == Some(checked_type)
                && input.value().attr("checked").is_some()
        });
        assert!(
            expected_checked,
            "want {checked_type} to be checked, but it was not"
        );
    }
}
