//! The balance, income and expenses cards above the transaction list.

use maud::{Markup, html};

use crate::{
    analytics::SummaryTotals,
    html::{EXPENSE_TEXT_STYLE, INCOME_TEXT_STYLE, format_currency},
};

const SUMMARY_CARD_STYLE: &str = "flex-1 bg-white dark:bg-gray-800 rounded-lg shadow p-6";
const SUMMARY_LABEL_STYLE: &str = "text-sm font-medium text-gray-500 dark:text-gray-400";
const SUMMARY_VALUE_STYLE: &str = "mt-2 text-2xl font-bold";

fn summary_card(id: &str, label: &str, amount: f64, colour: &str) -> Markup {
    html! {
        div id=(id) class=(SUMMARY_CARD_STYLE)
        {
            p class=(SUMMARY_LABEL_STYLE) { (label) }
            p class={ (SUMMARY_VALUE_STYLE) " " (colour) } data-amount=(amount)
            {
                (format_currency(amount))
            }
        }
    }
}

/// Cards for the balance, total income and total expenses.
///
/// The balance is green when it is zero or more and red otherwise.
pub fn transaction_summary(totals: &SummaryTotals) -> Markup {
    let balance_colour = if totals.balance >= 0.0 {
        INCOME_TEXT_STYLE
    } else {
        EXPENSE_TEXT_STYLE
    };

    html! {
        section class="w-full flex flex-col gap-4 sm:flex-row" aria-label="Summary"
        {
            (summary_card("summary-balance", "Balance", totals.balance, balance_colour))
            (summary_card("summary-income", "Income", totals.income, INCOME_TEXT_STYLE))
            (summary_card("summary-expenses", "Expenses", totals.expenses, EXPENSE_TEXT_STYLE))
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::{analytics::SummaryTotals, test_utils::assert_valid_html};

    use super::transaction_summary;

    #[track_caller]
    fn card_amount(html: &Html, id: &str) -> (f64, String) {
        let selector = Selector::parse(&format!("#{id} [data-amount]")).unwrap();
        let value = html
            .select(&selector)
            .next()
            .unwrap_or_else(|| panic!("could not find summary card {id}"));
        let amount = value
            .value()
            .attr("data-amount")
            .unwrap()
            .parse()
            .unwrap();
        let class = value.value().attr("class").unwrap_or_default().to_owned();

        (amount, class)
    }

    #[test]
    fn shows_each_total() {
        let totals = SummaryTotals {
            income: 3500.0,
            expenses: 18.25,
            balance: 3481.75,
        };

        let html = Html::parse_fragment(&transaction_summary(&totals).into_string());
        assert_valid_html(&html);

        assert_eq!(card_amount(&html, "summary-income").0, 3500.0);
        assert_eq!(card_amount(&html, "summary-expenses").0, 18.25);
        let (balance, class) = card_amount(&html, "summary-balance");
        assert_eq!(balance, 3481.75);
        assert!(class.contains("text-green-600"), "got class {class:?}");
    }

    #[test]
    fn negative_balance_is_red() {
        let totals = SummaryTotals {
            income: 0.0,
            expenses: 5.5,
            balance: -5.5,
        };

        let html = Html::parse_fragment(&transaction_summary(&totals).into_string());

        let (_, class) = card_amount(&html, "summary-balance");
        assert!(class.contains("text-red-600"), "got class {class:?}");
    }
}
