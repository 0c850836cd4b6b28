//! Adds a pair of example transactions, as if they had been imported from the user's mailbox.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use time::Date;

use crate::{
    AppState, Error, endpoints,
    timezone::get_local_date,
    transaction::{
        NewTransaction, SharedTransactionStore, Transaction, TransactionSource, TransactionStore,
    },
};

/// The state needed to add the sample transactions.
#[derive(Debug, Clone)]
pub struct SampleTransactionsState {
    pub transaction_store: SharedTransactionStore,
    pub local_timezone: String,
}

impl FromRef<AppState> for SampleTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A coffee expense and a salary deposit dated `today`.
pub fn sample_transactions(today: Date) -> [NewTransaction; 2] {
    [
        Transaction::build(-5.5, today, "Coffee at Starbucks")
            .category("Food")
            .source(TransactionSource::Gmail),
        Transaction::build(3500.0, today, "Salary Deposit")
            .category("Salary")
            .source(TransactionSource::Gmail),
    ]
}

/// A route handler that stores the sample transactions and redirects to the transactions view.
pub async fn add_sample_transactions_endpoint(
    State(state): State<SampleTransactionsState>,
) -> Response {
    let Some(today) = get_local_date(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezoneError(state.local_timezone).into_alert_response();
    };

    if let Err(error) = state
        .transaction_store
        .insert_many(sample_transactions(today).into())
    {
        tracing::error!("could not add sample transactions: {error}");
        return error.into_alert_response();
    }

    tracing::info!("added sample transactions");

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
