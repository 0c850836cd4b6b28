//! The gateway between the web layer and wherever transactions are persisted.
//!
//! Handlers only see [TransactionStore], so the SQLite implementation here can
//! be swapped for another backend without touching the views or the analytics.

use std::{
    fmt::Debug,
    sync::{Arc, Mutex, MutexGuard},
};

use rusqlite::{Connection, Row, types::Type};
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::TransactionId,
    transaction::core::{NewTransaction, Transaction},
};

/// Loads, inserts and soft deletes transactions.
pub trait TransactionStore: Debug + Send + Sync {
    /// Get all transactions that have not been deleted, newest first.
    ///
    /// Transactions are ordered by transaction date descending, then by when
    /// they were recorded, descending.
    fn load(&self) -> Result<Vec<Transaction>, Error>;

    /// Store a new transaction and return it with its ID and timestamps.
    fn insert(&self, transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Store every transaction in `transactions`, or none of them if any insert fails.
    fn insert_many(&self, transactions: Vec<NewTransaction>) -> Result<Vec<Transaction>, Error>;

    /// Mark the transaction `id` as deleted so that it no longer shows up in [TransactionStore::load].
    ///
    /// # Errors
    /// Returns [Error::DeleteMissingTransaction] if there is no live transaction with the ID `id`.
    fn soft_delete(&self, id: TransactionId) -> Result<(), Error>;
}

/// A transaction store that can be shared between request handlers.
pub type SharedTransactionStore = Arc<dyn TransactionStore>;

/// Stores transactions in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a store that uses `connection`.
    ///
    /// The database should already be set up with [crate::initialize_db].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

impl TransactionStore for SQLiteTransactionStore {
    fn load(&self) -> Result<Vec<Transaction>, Error> {
        let connection = self.lock()?;

        connection
            .prepare(
                "SELECT id, description, amount, category, transaction_date, source, type, created_at, updated_at
                FROM \"transaction\"
                WHERE is_deleted = 0
                ORDER BY transaction_date DESC, created_at DESC, id DESC",
            )?
            .query_map([], map_transaction_row)?
            .collect::<Result<Vec<Transaction>, rusqlite::Error>>()
            .map_err(|error| error.into())
    }

    fn insert(&self, transaction: NewTransaction) -> Result<Transaction, Error> {
        let connection = self.lock()?;

        Ok(insert_row(&connection, transaction, OffsetDateTime::now_utc())?)
    }

    fn insert_many(&self, transactions: Vec<NewTransaction>) -> Result<Vec<Transaction>, Error> {
        let connection = self.lock()?;
        let now = OffsetDateTime::now_utc();

        // Dropping `batch` without committing rolls back the rows inserted so far.
        let batch = connection.unchecked_transaction()?;
        let inserted = transactions
            .into_iter()
            .map(|transaction| insert_row(&batch, transaction, now))
            .collect::<Result<Vec<Transaction>, rusqlite::Error>>()?;
        batch.commit()?;

        Ok(inserted)
    }

    fn soft_delete(&self, id: TransactionId) -> Result<(), Error> {
        let connection = self.lock()?;

        let rows_affected = connection.execute(
            "UPDATE \"transaction\" SET is_deleted = 1, updated_at = ?1
            WHERE id = ?2 AND is_deleted = 0",
            (OffsetDateTime::now_utc(), id),
        )?;

        match rows_affected {
            0 => Err(Error::DeleteMissingTransaction),
            _ => Ok(()),
        }
    }
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                transaction_date TEXT NOT NULL,
                source TEXT NOT NULL,
                type TEXT NOT NULL,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
                )",
        (),
    )?;

    // Covers the live-rows-by-date query used by every page.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_live_date
        ON \"transaction\"(is_deleted, transaction_date);",
        (),
    )?;

    Ok(())
}

fn insert_row(
    connection: &Connection,
    transaction: NewTransaction,
    now: OffsetDateTime,
) -> Result<Transaction, rusqlite::Error> {
    connection
        .prepare(
            "INSERT INTO \"transaction\"
                (description, amount, category, transaction_date, source, type, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            RETURNING id, description, amount, category, transaction_date, source, type, created_at, updated_at",
        )?
        .query_row(
            (
                transaction.description,
                transaction.amount,
                transaction.category,
                transaction.transaction_date,
                transaction.source.as_str(),
                transaction.transaction_type.as_str(),
                now,
                now,
            ),
            map_transaction_row,
        )
}

/// Map a database row to a Transaction.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let source: String = row.get(5)?;
    let transaction_type: String = row.get(6)?;

    Ok(Transaction {
        id: row.get(0)?,
        description: row.get(1)?,
        amount: row.get(2)?,
        category: row.get(3)?,
        transaction_date: row.get(4)?,
        source: source
            .parse()
            .map_err(|error: String| conversion_error(5, error))?,
        transaction_type: transaction_type
            .parse()
            .map_err(|error: String| conversion_error(6, error))?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

fn conversion_error(column: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, message.into())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        transaction::{Transaction, TransactionSource, TransactionType},
    };

    use super::{SQLiteTransactionStore, TransactionStore};

    fn get_test_store() -> SQLiteTransactionStore {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        SQLiteTransactionStore::new(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn insert_returns_stored_transaction() {
        let store = get_test_store();

        let transaction = store
            .insert(
                Transaction::build(-12.75, date!(2024 - 01 - 15), "Bus fare")
                    .category("Transport"),
            )
            .unwrap();

        assert_eq!(transaction.id, 1);
        assert_eq!(transaction.description, "Bus fare");
        assert_eq!(transaction.amount, -12.75);
        assert_eq!(transaction.category, "Transport");
        assert_eq!(transaction.transaction_date, date!(2024 - 01 - 15));
        assert_eq!(transaction.source, TransactionSource::Manual);
        assert_eq!(transaction.transaction_type, TransactionType::Debit);
        assert_eq!(transaction.created_at, transaction.updated_at);
    }

    #[test]
    fn insert_many_stores_every_transaction() {
        let store = get_test_store();

        let inserted = store
            .insert_many(vec![
                Transaction::build(-5.5, date!(2024 - 01 - 15), "Coffee").category("Food"),
                Transaction::build(3500.0, date!(2024 - 01 - 15), "Pay").category("Salary"),
            ])
            .unwrap();

        assert_eq!(inserted.len(), 2);
        assert_eq!(inserted[0].description, "Coffee");
        assert_eq!(inserted[1].description, "Pay");
        assert_eq!(store.load().unwrap().len(), 2);
    }

    #[test]
    fn insert_many_keeps_nothing_when_one_insert_fails() {
        let store = get_test_store();
        store
            .connection
            .lock()
            .unwrap()
            .execute(
                "CREATE TRIGGER reject_pay BEFORE INSERT ON \"transaction\"
                WHEN NEW.description = 'Pay'
                BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
                (),
            )
            .unwrap();

        let result = store.insert_many(vec![
            Transaction::build(-5.5, date!(2024 - 01 - 15), "Coffee").category("Food"),
            Transaction::build(3500.0, date!(2024 - 01 - 15), "Pay").category("Salary"),
        ]);

        assert!(
            matches!(result, Err(Error::SqlError(_))),
            "want SQL error, got {result:?}"
        );
        assert_eq!(store.load(), Ok(vec![]));
    }

    #[test]
    fn insert_many_with_no_transactions_is_ok() {
        let store = get_test_store();

        assert_eq!(store.insert_many(vec![]), Ok(vec![]));
    }

    #[test]
    fn load_returns_empty_vec_for_no_transactions() {
        let store = get_test_store();

        assert_eq!(store.load(), Ok(vec![]));
    }

    #[test]
    fn load_orders_by_date_then_creation_descending() {
        let store = get_test_store();
        let first = store
            .insert(Transaction::build(1.0, date!(2024 - 01 - 15), "first"))
            .unwrap();
        let newest_date = store
            .insert(Transaction::build(2.0, date!(2024 - 03 - 01), "newest date"))
            .unwrap();
        let oldest_date = store
            .insert(Transaction::build(3.0, date!(2023 - 12 - 31), "oldest date"))
            .unwrap();
        let same_day_later = store
            .insert(Transaction::build(4.0, date!(2024 - 01 - 15), "same day, later"))
            .unwrap();

        let got = store.load().unwrap();

        assert_eq!(got, vec![newest_date, same_day_later, first, oldest_date]);
    }

    #[test]
    fn soft_delete_hides_transaction() {
        let store = get_test_store();
        let kept = store
            .insert(Transaction::build(1.0, date!(2024 - 01 - 15), "kept"))
            .unwrap();
        let deleted = store
            .insert(Transaction::build(2.0, date!(2024 - 01 - 16), "deleted"))
            .unwrap();

        store.soft_delete(deleted.id).unwrap();

        assert_eq!(store.load(), Ok(vec![kept]));
    }

    #[test]
    fn soft_delete_keeps_row_in_database() {
        let store = get_test_store();
        let transaction = store
            .insert(Transaction::build(1.0, date!(2024 - 01 - 15), ""))
            .unwrap();

        store.soft_delete(transaction.id).unwrap();

        let connection = store.connection.lock().unwrap();
        let is_deleted: bool = connection
            .query_row(
                "SELECT is_deleted FROM \"transaction\" WHERE id = ?1",
                (transaction.id,),
                |row| row.get(0),
            )
            .unwrap();
        assert!(is_deleted);
    }

    #[test]
    fn soft_delete_fails_on_missing_transaction() {
        let store = get_test_store();

        assert_eq!(store.soft_delete(42), Err(Error::DeleteMissingTransaction));
    }

    #[test]
    fn soft_delete_fails_on_already_deleted_transaction() {
        let store = get_test_store();
        let transaction = store
            .insert(Transaction::build(1.0, date!(2024 - 01 - 15), ""))
            .unwrap();
        store.soft_delete(transaction.id).unwrap();

        assert_eq!(
            store.soft_delete(transaction.id),
            Err(Error::DeleteMissingTransaction)
        );
    }

    #[test]
    fn load_fails_on_unknown_source() {
        let store = get_test_store();
        store
            .connection
            .lock()
            .unwrap()
            .execute(
                "INSERT INTO \"transaction\"
                    (description, amount, category, transaction_date, source, type, created_at, updated_at)
                VALUES ('', 1.0, 'Food', '2024-01-15', 'Carrier Pigeon', 'credit',
                    '2024-01-15 00:00:00.0+00:00', '2024-01-15 00:00:00.0+00:00')",
                (),
            )
            .unwrap();

        let result = store.load();

        assert!(
            matches!(result, Err(Error::SqlError(_))),
            "want SQL error, got {result:?}"
        );
    }
}
