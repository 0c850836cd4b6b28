//! The analytics page: monthly income and expense trend, and the top categories.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    analytics::{
        aggregation::proportion_of,
        report::{AnalyticsReport, CategoryTotal, MonthlySummary},
    },
    endpoints,
    html::{
        CARD_STYLE, CARD_TITLE_STYLE, EXPENSE_TEXT_STYLE, INCOME_TEXT_STYLE,
        PAGE_CONTAINER_STYLE, base, currency_rounded_with_tooltip, format_currency_rounded, link,
    },
    navigation::NavBar,
    transaction::{SharedTransactionStore, TransactionStore},
};

/// The state needed for the analytics page and API.
#[derive(Debug, Clone)]
pub struct AnalyticsState {
    pub transaction_store: SharedTransactionStore,
}

impl FromRef<AppState> for AnalyticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

const INCOME_BAR_STYLE: &str = "bg-green-500 rounded-full h-2";
const EXPENSE_BAR_STYLE: &str = "bg-red-500 rounded-full h-2";

/// Display the monthly trend and top categories for every transaction.
pub async fn get_analytics_page(State(state): State<AnalyticsState>) -> Result<Response, Error> {
    let transactions = state
        .transaction_store
        .load()
        .inspect_err(|error| tracing::error!("could not load transactions: {error}"))?;

    let nav_bar = NavBar::new(endpoints::ANALYTICS_VIEW).into_html();

    if transactions.is_empty() {
        return Ok(analytics_no_data_view(nav_bar).into_response());
    }

    let report = AnalyticsReport::from_transactions(&transactions);

    Ok(analytics_view(nav_bar, &report).into_response())
}

fn analytics_no_data_view(nav_bar: Markup) -> Markup {
    let transactions_link = link(endpoints::TRANSACTIONS_VIEW, "Add transactions");

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            section id="analytics-empty" class={ (CARD_STYLE) " text-center py-12" }
            {
                p class="text-gray-500 dark:text-gray-400" { "No transactions to analyze yet" }
                p class="text-sm text-gray-400 mt-2" { (transactions_link) " to see insights." }
            }
        }
    );

    base("Analytics", &[], &content)
}

fn analytics_view(nav_bar: Markup, report: &AnalyticsReport) -> Markup {
    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            section class=(CARD_STYLE)
            {
                h2 class="text-2xl font-bold mb-6" { "Transaction Analytics" }

                @if !report.monthly.is_empty() {
                    (monthly_trend(&report.monthly, report.max_monthly_amount))
                }

                div class="grid grid-cols-1 lg:grid-cols-2 gap-8"
                {
                    @if !report.top_expense_categories.is_empty() {
                        (category_ranking(
                            "top-expenses",
                            "Top Expense Categories",
                            &report.top_expense_categories,
                            EXPENSE_BAR_STYLE,
                            EXPENSE_TEXT_STYLE,
                        ))
                    }

                    @if !report.top_income_categories.is_empty() {
                        (category_ranking(
                            "top-income",
                            "Top Income Categories",
                            &report.top_income_categories,
                            INCOME_BAR_STYLE,
                            INCOME_TEXT_STYLE,
                        ))
                    }
                }
            }
        }
    );

    base("Analytics", &[], &content)
}

fn bar(width_percent: f64, style: &str) -> Markup {
    html! {
        div class=(style) style=(format!("width: {width_percent:.1}%")) {}
    }
}

fn monthly_trend(months: &[MonthlySummary], max_monthly_amount: f64) -> Markup {
    html! {
        div id="monthly-trend" class="mb-8"
        {
            h3 class=(CARD_TITLE_STYLE) { "Monthly Trend" }

            div class="space-y-4"
            {
                @for month in months {
                    div data-month=(month.month)
                    {
                        div class="flex justify-between text-sm mb-2"
                        {
                            span class="font-medium" { (month.month) }

                            div class="flex gap-4 text-xs"
                            {
                                span class=(INCOME_TEXT_STYLE)
                                {
                                    "Income: " (format_currency_rounded(month.income))
                                }
                                span class=(EXPENSE_TEXT_STYLE)
                                {
                                    "Expenses: " (format_currency_rounded(month.expenses))
                                }
                            }
                        }

                        div class="flex gap-1"
                        {
                            @if month.income > 0.0 {
                                (bar(proportion_of(month.income, max_monthly_amount), INCOME_BAR_STYLE))
                            }
                            @if month.expenses > 0.0 {
                                (bar(proportion_of(month.expenses, max_monthly_amount), EXPENSE_BAR_STYLE))
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Bars are scaled against the largest category, i.e. the first in `ranking`.
fn category_ranking(
    id: &str,
    title: &str,
    ranking: &[CategoryTotal],
    bar_style: &str,
    amount_style: &str,
) -> Markup {
    let largest = ranking.first().map_or(0.0, |category| category.total);

    html! {
        div id=(id)
        {
            h3 class=(CARD_TITLE_STYLE) { (title) }

            ol class="space-y-3"
            {
                @for category in ranking {
                    li class="flex items-center gap-3" data-category=(category.category)
                    {
                        div class="flex-1"
                        {
                            p class="text-sm font-medium" { (category.category) }
                            div class="mt-1 bg-gray-200 dark:bg-gray-700 rounded-full h-2"
                            {
                                (bar(proportion_of(category.total, largest), bar_style))
                            }
                        }

                        span class={ "text-sm font-bold whitespace-nowrap " (amount_style) }
                        {
                            (currency_rounded_with_tooltip(category.total))
                        }
                    }
                }
            }
        }
    }
}
