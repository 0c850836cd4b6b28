use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;
use time::{Date, Duration, OffsetDateTime, error::ComponentRange};

use expense_tracker::{
    NewTransaction, SQLiteTransactionStore, Transaction, TransactionSource, TransactionStore,
    initialize_db, sample_transactions,
};

/// A utility for creating a test database for the expense tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// How many months of transactions to generate, ending with the current month.
    #[arg(long, short, default_value_t = 6)]
    months: u8,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let connection = Connection::open(output_path)?;
    initialize_db(&connection)?;

    let store = SQLiteTransactionStore::new(Arc::new(Mutex::new(connection)));
    let today = OffsetDateTime::now_utc().date();

    println!("Creating transactions for the last {} months...", args.months);
    let mut transactions = Vec::new();
    for (month_offset, date) in (0..args.months).zip(monthly_dates(today, args.months)?) {
        transactions.extend(month_of_transactions(date, month_offset));
    }
    transactions.extend(sample_transactions(today));

    let count = store.insert_many(transactions)?.len();

    println!("Created {count} transactions. Success!");

    Ok(())
}

/// One date in each of the `months` calendar months ending with the month of `today`, newest first.
fn monthly_dates(today: Date, months: u8) -> Result<Vec<Date>, ComponentRange> {
    // Day 28 exists in every month and keeps the current month's date on or before today.
    let day = today.day().min(28);
    let mut month_start = today.replace_day(1)?;
    let mut dates = Vec::with_capacity(usize::from(months));

    for _ in 0..months {
        dates.push(month_start.replace_day(day)?);
        month_start = (month_start - Duration::days(1)).replace_day(1)?;
    }

    Ok(dates)
}

/// A salary, rent and a handful of smaller expenses that vary from month to month.
fn month_of_transactions(date: Date, month_offset: u8) -> Vec<NewTransaction> {
    let variation = f64::from(month_offset % 3) * 12.5;

    vec![
        Transaction::build(3500.0, date, "Salary Deposit").category("Salary"),
        Transaction::build(-1200.0, date, "Rent").category("Bills"),
        Transaction::build(-85.0 - variation, date, "Power bill").category("Bills"),
        Transaction::build(-140.0 + variation, date, "Supermarket").category("Food"),
        Transaction::build(-45.5, date, "Bus pass").category("Transport"),
        Transaction::build(-60.0 + variation * 2.0, date, "Concert tickets")
            .category("Entertainment"),
        Transaction::build(-5.5, date, "Coffee at Starbucks")
            .category("Food")
            .source(TransactionSource::Gmail),
        Transaction::build(250.0 + variation, date, "Freelance invoice").category("Freelance"),
    ]
}
