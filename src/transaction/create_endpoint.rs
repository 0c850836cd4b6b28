//! Defines the endpoint for creating a new transaction.
use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error, endpoints,
    timezone::get_local_date,
    transaction::{
        NewTransaction, SharedTransactionStore, Transaction, TransactionStore,
        form::FormTransactionType,
    },
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// Where the new transaction is saved.
    pub transaction_store: SharedTransactionStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// Whether the amount is money spent or money earned.
    pub type_: FormTransactionType,
    /// Text detailing the transaction.
    pub description: String,
    /// The size of the transaction in dollars, always positive.
    pub amount: f64,
    /// The label used to group the transaction.
    pub category: String,
    /// The date when the transaction ocurred.
    pub date: Date,
}

impl TransactionForm {
    /// Check the form and turn it into a manually entered transaction.
    ///
    /// Expenses are stored with a negative amount and income with a positive
    /// amount. Surrounding whitespace is removed from the text fields.
    ///
    /// # Errors
    /// Returns an error if the amount is not a positive number, the
    /// description or category is blank, or the date is after `today`.
    pub fn validate(self, today: Date) -> Result<NewTransaction, Error> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(Error::InvalidAmount(self.amount));
        }

        let description = self.description.trim();
        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        let category = self.category.trim();
        if category.is_empty() {
            return Err(Error::EmptyCategory);
        }

        if self.date > today {
            return Err(Error::FutureDate(self.date));
        }

        let amount = match self.type_ {
            FormTransactionType::Expense => -self.amount,
            FormTransactionType::Income => self.amount,
        };

        Ok(Transaction::build(amount, self.date, description).category(category))
    }
}

/// A route handler for creating a new transaction, redirects to transactions view on success.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let Some(today) = get_local_date(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezoneError(state.local_timezone).into_alert_response();
    };

    let transaction = match form.validate(today) {
        Ok(transaction) => transaction,
        Err(error) => {
            tracing::warn!("rejected transaction form: {error}");
            return error.into_alert_response();
        }
    };

    match state.transaction_store.insert(transaction) {
        Ok(transaction) => {
            tracing::info!(
                "created transaction {} for {} in {}",
                transaction.id,
                transaction.amount,
                transaction.category
            );

            (
                HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("could not create transaction: {error}");
            error.into_alert_response()
        }
    }
}
