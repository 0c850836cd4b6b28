//! Transactions: the core model, the persistence gateway and the pages and endpoints for managing them.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod form;
mod samples_endpoint;
mod store;
mod summary;
mod transactions_page;

#[cfg(test)]
pub(crate) mod test_utils;

pub use core::{
    CATEGORIES, NewTransaction, Transaction, TransactionSource, TransactionType,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use samples_endpoint::{add_sample_transactions_endpoint, sample_transactions};
pub use store::{
    SQLiteTransactionStore, SharedTransactionStore, TransactionStore, create_transaction_table,
};
pub use transactions_page::get_transactions_page;
