//! Everything the analytics page shows, computed in one pass over the transactions.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    analytics::aggregation::{
        MonthKey, SummaryTotals, TOP_CATEGORY_COUNT, bucket_by_month, categorize_by_sign,
        compute_summary_totals, max_monthly_amount, rank_top_categories, sorted_months,
    },
    transaction::Transaction,
};

/// The totals for one month of the trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    /// The month as `YYYY-MM`.
    pub month: MonthKey,
    pub income: f64,
    pub expenses: f64,
}

/// A category and its total, as shown in the top category rankings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// The summary totals, monthly trend and top categories for a set of transactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub summary: SummaryTotals,
    /// Months in chronological order, only months with non-zero transactions.
    pub monthly: Vec<MonthlySummary>,
    /// The scale for the monthly trend bars, never zero.
    pub max_monthly_amount: f64,
    pub top_expense_categories: Vec<CategoryTotal>,
    pub top_income_categories: Vec<CategoryTotal>,
}

impl AnalyticsReport {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let category_totals = categorize_by_sign(transactions);
        let monthly_totals = bucket_by_month(transactions);

        let ranked = |totals: &BTreeMap<String, f64>| -> Vec<CategoryTotal> {
            rank_top_categories(totals, TOP_CATEGORY_COUNT)
                .into_iter()
                .map(|(category, total)| CategoryTotal { category, total })
                .collect()
        };

        Self {
            summary: compute_summary_totals(transactions),
            max_monthly_amount: max_monthly_amount(&monthly_totals),
            monthly: sorted_months(&monthly_totals)
                .into_iter()
                .map(|month| {
                    let totals = monthly_totals[&month];

                    MonthlySummary {
                        month,
                        income: totals.income,
                        expenses: totals.expenses,
                    }
                })
                .collect(),
            top_expense_categories: ranked(&category_totals.expenses),
            top_income_categories: ranked(&category_totals.income),
        }
    }
}
