use axum::{
    extract::{FromRef, Path, State},
    response::{Html, IntoResponse, Response},
};

use crate::{
    AppState, Error,
    database_id::TransactionId,
    transaction::{SharedTransactionStore, TransactionStore},
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    transaction_store: SharedTransactionStore,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// A route handler for soft deleting a transaction.
///
/// Responds with an empty body on success so that htmx replaces the
/// transaction's row with nothing, or an error alert otherwise.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    match state.transaction_store.soft_delete(transaction_id) {
        // The status code has to be 200 OK or htmx will not remove the row.
        Ok(()) => {
            tracing::info!("deleted transaction {transaction_id}");
            Html("").into_response()
        }
        Err(Error::DeleteMissingTransaction) => {
            tracing::warn!("tried to delete missing transaction {transaction_id}");
            Error::DeleteMissingTransaction.into_alert_response()
        }
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}
