use axum::{Json, extract::State};

use crate::{
    Error,
    analytics::{page::AnalyticsState, report::AnalyticsReport},
    transaction::TransactionStore,
};

/// The analytics report for every transaction as JSON.
pub async fn get_analytics_report(
    State(state): State<AnalyticsState>,
) -> Result<Json<AnalyticsReport>, Error> {
    let transactions = state
        .transaction_store
        .load()
        .inspect_err(|error| tracing::error!("could not load transactions: {error}"))?;

    Ok(Json(AnalyticsReport::from_transactions(&transactions)))
}
