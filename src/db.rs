//! Sets up the application's SQLite database.

use rusqlite::Connection;

use crate::transaction::create_transaction_table;

/// Create all of the database tables for the application.
///
/// Tables are only created if they do not already exist, so this is safe to
/// call on an existing database.
///
/// # Errors
/// Returns an error if a table cannot be created or there is some other SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction = connection.unchecked_transaction()?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
