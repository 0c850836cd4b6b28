//! The form for adding a transaction, shown at the top of the transactions page.

use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, CARD_TITLE_STYLE, FORM_LABEL_STYLE,
        FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner,
    },
    transaction::core::{CATEGORIES, DEFAULT_CATEGORY},
};

/// The transaction type radio buttons, which decide the sign of the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormTransactionType {
    Expense,
    Income,
}

/// The initial values of the transaction form.
pub struct TransactionFormDefaults<'a> {
    pub transaction_type: FormTransactionType,
    pub category: &'a str,
    /// The default and latest selectable date, i.e. today in the local timezone.
    pub today: Date,
}

impl TransactionFormDefaults<'_> {
    /// An expense in the default category dated `today`.
    pub fn new(today: Date) -> Self {
        Self {
            transaction_type: FormTransactionType::Expense,
            category: DEFAULT_CATEGORY,
            today,
        }
    }
}

pub fn transaction_form(defaults: &TransactionFormDefaults<'_>) -> Markup {
    let is_expense = defaults.transaction_type == FormTransactionType::Expense;

    html! {
        section class=(CARD_STYLE)
        {
            h2 class=(CARD_TITLE_STYLE) { "Add Transaction" }

            form
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target-error="#alert-container"
                hx-indicator="#indicator"
                class="grid gap-4 sm:grid-cols-2"
            {
                fieldset class="sm:col-span-2"
                {
                    legend class=(FORM_LABEL_STYLE) { "Type" }

                    div class="flex gap-3"
                    {
                        label class="flex flex-1"
                        {
                            input
                                name="type_"
                                type="radio"
                                value="expense"
                                checked[is_expense]
                                required
                                class=(FORM_RADIO_INPUT_STYLE);

                            span class=(FORM_RADIO_LABEL_STYLE) { "Expense" }
                        }

                        label class="flex flex-1"
                        {
                            input
                                name="type_"
                                type="radio"
                                value="income"
                                checked[!is_expense]
                                required
                                class=(FORM_RADIO_INPUT_STYLE);

                            span class=(FORM_RADIO_LABEL_STYLE) { "Income" }
                        }
                    }
                }

                div class="sm:col-span-2"
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                    input
                        name="description"
                        id="description"
                        type="text"
                        placeholder="e.g. Coffee at Starbucks"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                    div class="input-wrapper w-full"
                    {
                        input
                            name="amount"
                            id="amount"
                            type="number"
                            step="0.01"
                            min="0.01"
                            placeholder="0.00"
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                    select
                        name="category"
                        id="category"
                        required
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for category in CATEGORIES {
                            option value=(category) selected[category == defaults.category] { (category) }
                        }
                    }
                }

                div class="sm:col-span-2"
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                    input
                        name="date"
                        id="date"
                        type="date"
                        max=(defaults.today)
                        value=(defaults.today)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" id="indicator" class=(format!("{BUTTON_PRIMARY_STYLE} sm:col-span-2"))
                {
                    span class="htmx-indicator" { (loading_spinner()) }
                    "Add Transaction"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        endpoints,
        test_utils::{
            assert_form_input, assert_form_submit_button, assert_hx_endpoint, assert_valid_html,
            must_get_form,
        },
        transaction::{CATEGORIES, test_utils::assert_transaction_type_inputs},
    };

    use super::{FormTransactionType, TransactionFormDefaults, transaction_form};

    fn render(defaults: &TransactionFormDefaults<'_>) -> Html {
        Html::parse_fragment(&transaction_form(defaults).into_string())
    }

    #[test]
    fn form_posts_to_transactions_api() {
        let html = render(&TransactionFormDefaults::new(date!(2024 - 01 - 15)));
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::TRANSACTIONS_API, "hx-post");
        assert_form_input(&form, "description", "text");
        assert_form_input(&form, "amount", "number");
        assert_form_input(&form, "date", "date");
        assert_form_submit_button(&form);
        assert_transaction_type_inputs(&form, Some("expense"));
    }

    #[test]
    fn form_checks_selected_type() {
        let mut defaults = TransactionFormDefaults::new(date!(2024 - 01 - 15));
        defaults.transaction_type = FormTransactionType::Income;

        let html = render(&defaults);

        assert_transaction_type_inputs(&must_get_form(&html), Some("income"));
    }

    #[test]
    fn date_defaults_to_and_is_limited_to_today() {
        let html = render(&TransactionFormDefaults::new(date!(2024 - 01 - 15)));

        let selector = Selector::parse("input[name=date]").unwrap();
        let input = html.select(&selector).next().expect("no date input");
        assert_eq!(input.value().attr("value"), Some("2024-01-15"));
        assert_eq!(input.value().attr("max"), Some("2024-01-15"));
    }

    #[test]
    fn category_lists_every_category_with_default_selected() {
        let html = render(&TransactionFormDefaults::new(date!(2024 - 01 - 15)));

        let selector = Selector::parse("select[name=category] option").unwrap();
        let options: Vec<_> = html.select(&selector).collect();
        let values: Vec<&str> = options
            .iter()
            .filter_map(|option| option.value().attr("value"))
            .collect();
        assert_eq!(values, CATEGORIES);

        let selected: Vec<&str> = options
            .iter()
            .filter(|option| option.value().attr("selected").is_some())
            .filter_map(|option| option.value().attr("value"))
            .collect();
        assert_eq!(selected, vec!["Food"]);
    }

    #[test]
    fn amount_must_be_positive() {
        let html = render(&TransactionFormDefaults::new(date!(2024 - 01 - 15)));

        let selector = Selector::parse("input[name=amount]").unwrap();
        let input = html.select(&selector).next().expect("no amount input");
        assert_eq!(input.value().attr("min"), Some("0.01"));
        assert_eq!(input.value().attr("step"), Some("0.01"));
    }
}
