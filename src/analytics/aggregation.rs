//! Transaction aggregation for the summary panel and the analytics page.
//!
//! Provides functions to total transactions by category and by month, rank
//! categories, and compute overall income, expenses and balance.
//!
//! The sign of the amount is the only thing that decides whether a
//! transaction counts as income (positive) or an expense (negative). A
//! transaction with an amount of exactly zero is neither, so it never
//! contributes to any total produced here.

use std::{collections::BTreeMap, fmt};

use serde::{Serialize, Serializer};
use time::Date;

use crate::transaction::Transaction;

/// How many categories the analytics page ranks for income and for expenses.
pub const TOP_CATEGORY_COUNT: usize = 5;

/// The bar chart scale used when there is no monthly total to scale against.
pub const DEFAULT_MAX_MONTHLY_AMOUNT: f64 = 100.0;

/// A calendar month, displayed as `YYYY-MM`, e.g. "2024-01".
///
/// Ordering is chronological, which is also the lexicographic order of the
/// zero-padded display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u8,
}

impl MonthKey {
    /// The month that `date` falls in.
    pub fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month() as u8,
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Category totals split by the sign of the transaction amounts.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CategoryTotals {
    /// Category to the summed absolute value of its negative amounts.
    pub expenses: BTreeMap<String, f64>,
    /// Category to the sum of its positive amounts.
    pub income: BTreeMap<String, f64>,
}

/// The income and expenses for a single month.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyTotals {
    /// The sum of positive amounts.
    pub income: f64,
    /// The summed absolute value of negative amounts.
    pub expenses: f64,
}

/// Income, expenses and the balance between them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryTotals {
    /// The sum of positive amounts.
    pub income: f64,
    /// The summed absolute value of negative amounts.
    pub expenses: f64,
    /// `income - expenses`.
    pub balance: f64,
}

/// Totals transactions by category, separately for expenses and income.
///
/// Expense totals are positive (absolute values). Zero amounts are skipped.
pub fn categorize_by_sign(transactions: &[Transaction]) -> CategoryTotals {
    let mut totals = CategoryTotals::default();

    for transaction in transactions {
        let amount = transaction.amount;

        if amount < 0.0 {
            *totals
                .expenses
                .entry(transaction.category.clone())
                .or_insert(0.0) += amount.abs();
        } else if amount > 0.0 {
            *totals
                .income
                .entry(transaction.category.clone())
                .or_insert(0.0) += amount;
        }
    }

    totals
}

/// Totals income and expenses for each month.
///
/// The map iterates in chronological order. Zero amounts are skipped, so a
/// month that only has zero-amount transactions does not appear.
pub fn bucket_by_month(transactions: &[Transaction]) -> BTreeMap<MonthKey, MonthlyTotals> {
    let mut totals: BTreeMap<MonthKey, MonthlyTotals> = BTreeMap::new();

    for transaction in transactions {
        let amount = transaction.amount;

        if amount == 0.0 {
            continue;
        }

        let month = MonthKey::from_date(transaction.transaction_date);
        let month_totals = totals.entry(month).or_default();

        if amount < 0.0 {
            month_totals.expenses += amount.abs();
        } else {
            month_totals.income += amount;
        }
    }

    totals
}

/// The months in `monthly_totals` in chronological order.
pub fn sorted_months(monthly_totals: &BTreeMap<MonthKey, MonthlyTotals>) -> Vec<MonthKey> {
    monthly_totals.keys().copied().collect()
}

/// The largest income or expense total of any month.
///
/// Returns [DEFAULT_MAX_MONTHLY_AMOUNT] if there are no months or the largest
/// total is not positive, so the result is always safe to divide by.
pub fn max_monthly_amount(monthly_totals: &BTreeMap<MonthKey, MonthlyTotals>) -> f64 {
    let max = monthly_totals
        .values()
        .map(|totals| totals.income.max(totals.expenses))
        .fold(0.0, f64::max);

    if max > 0.0 {
        max
    } else {
        DEFAULT_MAX_MONTHLY_AMOUNT
    }
}

/// The `count` categories with the largest totals, largest first.
///
/// Ties keep the order of `category_totals`, i.e. alphabetical by category.
pub fn rank_top_categories(
    category_totals: &BTreeMap<String, f64>,
    count: usize,
) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = category_totals
        .iter()
        .map(|(category, total)| (category.clone(), *total))
        .collect();

    // `sort_by` is stable, which is what keeps ties in alphabetical order.
    ranked.sort_by(|(_, a), (_, b)| b.total_cmp(a));
    ranked.truncate(count);
    ranked
}

/// Total income, total expenses and the balance for `transactions`.
pub fn compute_summary_totals(transactions: &[Transaction]) -> SummaryTotals {
    let income: f64 = transactions
        .iter()
        .filter(|transaction| transaction.amount > 0.0)
        .map(|transaction| transaction.amount)
        .sum();

    let expenses: f64 = transactions
        .iter()
        .filter(|transaction| transaction.amount < 0.0)
        .map(|transaction| transaction.amount.abs())
        .sum();

    SummaryTotals {
        income,
        expenses,
        balance: income - expenses,
    }
}

/// `amount` as a percentage of `max`, for sizing bars.
///
/// Returns zero when `max` is not positive instead of dividing by it.
pub fn proportion_of(amount: f64, max: f64) -> f64 {
    if max > 0.0 { amount / max * 100.0 } else { 0.0 }
}
