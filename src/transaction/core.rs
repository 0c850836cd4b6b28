//! Defines the core data models for transactions.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::database_id::TransactionId;

/// The categories suggested by the transaction form.
///
/// Categories are free text, so stored transactions may use other labels.
pub const CATEGORIES: [&str; 11] = [
    "Salary",
    "Freelance",
    "Investment",
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Healthcare",
    "Education",
    "Other",
];

/// The category selected by default in the transaction form.
pub const DEFAULT_CATEGORY: &str = "Food";

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, build a [NewTransaction] and insert it with
/// a [crate::transaction::TransactionStore].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned in this transaction.
    ///
    /// Positive values are income (credits), negative values are expenses (debits).
    pub amount: f64,
    /// The label used to group the transaction, e.g. "Food".
    pub category: String,
    /// When the transaction happened.
    pub transaction_date: Date,
    /// Where the transaction came from.
    pub source: TransactionSource,
    /// Whether money left (debit) or entered (credit) the account.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// When the transaction was recorded.
    pub created_at: OffsetDateTime,
    /// When the transaction was last modified.
    pub updated_at: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [NewTransaction::new] for discoverability.
    pub fn build(amount: f64, transaction_date: Date, description: &str) -> NewTransaction {
        NewTransaction::new(amount, transaction_date, description)
    }
}

/// The fields needed to insert a transaction.
///
/// The transaction type is derived from the sign of `amount` when the
/// transaction is built, so the two can never disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// A text description of what the transaction was for.
    pub description: String,
    /// The signed amount, positive for income and negative for expenses.
    pub amount: f64,
    /// The label used to group the transaction.
    pub category: String,
    /// When the transaction happened.
    pub transaction_date: Date,
    /// Where the transaction came from.
    pub source: TransactionSource,
    /// Derived from the sign of `amount`.
    pub transaction_type: TransactionType,
}

impl NewTransaction {
    /// Create a manually entered transaction in the default category.
    pub fn new(amount: f64, transaction_date: Date, description: &str) -> Self {
        Self {
            description: description.to_owned(),
            amount,
            category: DEFAULT_CATEGORY.to_owned(),
            transaction_date,
            source: TransactionSource::Manual,
            transaction_type: TransactionType::from_amount(amount),
        }
    }

    /// Set the category for the transaction.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Set the source of the transaction.
    pub fn source(mut self, source: TransactionSource) -> Self {
        self.source = source;
        self
    }
}

/// Whether a transaction is a debit (money out) or a credit (money in).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money left the account.
    Debit,
    /// Money entered the account.
    Credit,
}

impl TransactionType {
    /// Negative amounts are debits, everything else is a credit.
    pub fn from_amount(amount: f64) -> Self {
        if amount < 0.0 { Self::Debit } else { Self::Credit }
    }

    /// The value stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debit" => Ok(Self::Debit),
            "credit" => Ok(Self::Credit),
            _ => Err(format!("unknown transaction type: {s}")),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a transaction was recorded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionSource {
    /// Entered by the user through the transaction form.
    Manual,
    /// Imported from the user's mailbox.
    Gmail,
}

impl TransactionSource {
    /// The value stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "Manual",
            Self::Gmail => "Gmail",
        }
    }
}

impl FromStr for TransactionSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Manual" => Ok(Self::Manual),
            "Gmail" => Ok(Self::Gmail),
            _ => Err(format!("unknown transaction source: {s}")),
        }
    }
}

impl fmt::Display for TransactionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{DEFAULT_CATEGORY, Transaction, TransactionSource, TransactionType};

    #[test]
    fn build_derives_type_from_sign() {
        let expense = Transaction::build(-5.5, date!(2024 - 01 - 15), "Coffee");
        let income = Transaction::build(3500.0, date!(2024 - 01 - 15), "Salary");

        assert_eq!(expense.transaction_type, TransactionType::Debit);
        assert_eq!(income.transaction_type, TransactionType::Credit);
    }

    #[test]
    fn build_uses_manual_source_and_default_category() {
        let transaction = Transaction::build(-5.5, date!(2024 - 01 - 15), "Coffee");

        assert_eq!(transaction.source, TransactionSource::Manual);
        assert_eq!(transaction.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn builder_overrides_category_and_source() {
        let transaction = Transaction::build(-5.5, date!(2024 - 01 - 15), "Coffee")
            .category("Entertainment")
            .source(TransactionSource::Gmail);

        assert_eq!(transaction.category, "Entertainment");
        assert_eq!(transaction.source, TransactionSource::Gmail);
    }

    #[test]
    fn stored_values_parse_back() {
        for transaction_type in [TransactionType::Debit, TransactionType::Credit] {
            assert_eq!(
                transaction_type.as_str().parse::<TransactionType>(),
                Ok(transaction_type)
            );
        }

        for source in [TransactionSource::Manual, TransactionSource::Gmail] {
            assert_eq!(source.as_str().parse::<TransactionSource>(), Ok(source));
        }

        assert!("refund".parse::<TransactionType>().is_err());
        assert!("Bank".parse::<TransactionSource>().is_err());
    }
}
