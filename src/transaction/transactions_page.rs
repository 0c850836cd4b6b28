//! The landing page: the add transaction form, the summary cards and the transaction list.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use time::{Date, macros::format_description};

use crate::{
    AppState, Error,
    analytics::compute_summary_totals,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE, CARD_TITLE_STYLE,
        CATEGORY_BADGE_STYLE, EXPENSE_TEXT_STYLE, INCOME_TEXT_STYLE, PAGE_CONTAINER_STYLE, base,
        dollar_input_styles, format_currency,
    },
    navigation::NavBar,
    timezone::get_local_date,
    transaction::{
        SharedTransactionStore, Transaction, TransactionStore,
        form::{FormTransactionType, TransactionFormDefaults, transaction_form},
        summary::transaction_summary,
    },
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    pub transaction_store: SharedTransactionStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Which transactions to show in the list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionFilter {
    #[default]
    All,
    /// Transactions with a positive amount.
    Income,
    /// Transactions with a negative amount.
    Expense,
}

impl TransactionFilter {
    fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            TransactionFilter::All => true,
            TransactionFilter::Income => transaction.amount > 0.0,
            TransactionFilter::Expense => transaction.amount < 0.0,
        }
    }

    fn as_query(&self) -> &'static str {
        match self {
            TransactionFilter::All => "all",
            TransactionFilter::Income => "income",
            TransactionFilter::Expense => "expense",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            TransactionFilter::All => "All",
            TransactionFilter::Income => "Income",
            TransactionFilter::Expense => "Expenses",
        }
    }
}

/// The query parameters for the transactions page.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionsQuery {
    #[serde(default)]
    pub filter: TransactionFilter,
}

/// Display the form, the summary of all transactions and the filtered transaction list.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Response, Error> {
    let today = get_local_date(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let transactions = state
        .transaction_store
        .load()
        .inspect_err(|error| tracing::error!("could not load transactions: {error}"))?;

    Ok(transactions_view(&transactions, query.filter, today).into_response())
}

fn transactions_view(transactions: &[Transaction], filter: TransactionFilter, today: Date) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let summary = compute_summary_totals(transactions);

    let mut form_defaults = TransactionFormDefaults::new(today);
    if filter == TransactionFilter::Income {
        form_defaults.transaction_type = FormTransactionType::Income;
    }

    let filtered: Vec<&Transaction> = transactions
        .iter()
        .filter(|transaction| filter.matches(transaction))
        .collect();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (transaction_form(&form_defaults))

            (transaction_summary(&summary))

            (mail_import())

            section class=(CARD_STYLE)
            {
                div class="flex flex-wrap items-center justify-between gap-4 mb-4"
                {
                    h2 class=(CARD_TITLE_STYLE) { "Transactions" }
                    (filter_links(filter))
                }

                @if transactions.is_empty() {
                    (empty_state())
                } @else if filtered.is_empty() {
                    p class="text-gray-500 dark:text-gray-400"
                    {
                        "No " (filter.label().to_lowercase()) " to show."
                    }
                } @else {
                    ul id="transaction-list" class="divide-y divide-gray-200 dark:divide-gray-700"
                    {
                        @for transaction in filtered {
                            (transaction_row(transaction))
                        }
                    }
                }
            }
        }
    };

    base("Transactions", &[dollar_input_styles()], &content)
}

fn filter_links(active: TransactionFilter) -> Markup {
    let link_style = |is_active: bool| {
        if is_active {
            "px-3 py-1 rounded text-sm font-medium bg-blue-600 text-white"
        } else {
            "px-3 py-1 rounded text-sm font-medium text-gray-700 bg-gray-100 \
            hover:bg-gray-200 dark:text-gray-300 dark:bg-gray-700 dark:hover:bg-gray-600"
        }
    };

    html! {
        nav class="flex gap-2" aria-label="Filter transactions"
        {
            @for filter in [TransactionFilter::All, TransactionFilter::Income, TransactionFilter::Expense] {
                a
                    href={ (endpoints::TRANSACTIONS_VIEW) "?filter=" (filter.as_query()) }
                    class=(link_style(filter == active))
                    aria-current=[(filter == active).then_some("page")]
                {
                    (filter.label())
                }
            }
        }
    }
}

fn empty_state() -> Markup {
    html! {
        p id="empty-transactions" class="py-8 text-center text-gray-500 dark:text-gray-400"
        {
            "No transactions yet. Add your first transaction above, or start with some samples."
        }
    }
}

/// Adds the sample transactions at any time, standing in for the mail import.
fn mail_import() -> Markup {
    html! {
        section id="mail-import" class=(CARD_STYLE)
        {
            h2 class=(CARD_TITLE_STYLE) { "Mail Import" }

            p class="mb-4 text-sm text-gray-500 dark:text-gray-400"
            {
                "Transactions from your mailbox are imported by a separate service. \
                Add a sample coffee purchase and salary deposit to see how imported transactions look."
            }

            button
                type="button"
                hx-post=(endpoints::SAMPLE_TRANSACTIONS_API)
                hx-target-error="#alert-container"
                class=(BUTTON_SECONDARY_STYLE)
            {
                "Add sample transactions"
            }
        }
    }
}

fn format_date(date: Date) -> String {
    date.format(format_description!(
        "[month repr:short] [day padding:none], [year]"
    ))
    .unwrap_or_else(|_| date.to_string())
}

/// Income and zero amounts get a plus sign, expenses a minus sign.
fn format_signed_amount(amount: f64) -> String {
    let sign = if amount >= 0.0 { '+' } else { '-' };
    let magnitude = format_currency(amount.abs());

    format!("{sign}{magnitude}")
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let amount_style = if transaction.amount >= 0.0 {
        INCOME_TEXT_STYLE
    } else {
        EXPENSE_TEXT_STYLE
    };

    html! {
        li
            id={ "transaction-" (transaction.id) }
            class="flex items-center justify-between gap-4 py-3"
            data-transaction-id=(transaction.id)
        {
            div class="min-w-0"
            {
                p class="font-medium truncate" { (transaction.description) }

                div class="flex items-center gap-2 text-sm text-gray-500 dark:text-gray-400"
                {
                    span class=(CATEGORY_BADGE_STYLE) { (transaction.category) }
                    time datetime=(transaction.transaction_date) { (format_date(transaction.transaction_date)) }
                }
            }

            div class="flex items-center gap-4"
            {
                span class={ "font-semibold " (amount_style) } data-amount=(transaction.amount)
                {
                    (format_signed_amount(transaction.amount))
                }

                button
                    type="button"
                    hx-delete=(format_endpoint(endpoints::DELETE_TRANSACTION, transaction.id))
                    hx-target="closest li"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    aria-label={ "Delete " (transaction.description) }
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}
