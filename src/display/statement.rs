//! Account statement formatting
//!
//! Renders one account's transaction history as fixed-width columns:
//! id, date, description, counter-account, inbound amount, outbound amount
//! and the running balance.

use crate::models::{AccountRecord, Direction};
use crate::services::account::PostedTransaction;

/// Column widths
const ID_WIDTH: usize = 5;
const DATE_WIDTH: usize = 10;
const DESCRIPTION_WIDTH: usize = 40;
const COUNTER_WIDTH: usize = 30;
const MONEY_WIDTH: usize = 8;

/// Header line plus a dashed rule one dash longer than the title
pub fn format_statement_header(account: &AccountRecord) -> String {
    let title = format!("Account: {} (type: {})", account.name, account.type_label());
    let rule = "-".repeat(title.chars().count() + 1);
    format!("{}\n{}", title, rule)
}

/// Format one statement line
///
/// The balance column carries the display convention of `account`.
pub fn format_statement_line(account: &AccountRecord, posted: &PostedTransaction) -> String {
    let txn = &posted.transaction;
    let date = txn.date.format("%Y-%m-%d").to_string();
    let amount = txn.amount.abs().format_column(MONEY_WIDTH);
    let balance = account.display_balance(posted.balance).format_column(MONEY_WIDTH);
    let blank = " ".repeat(MONEY_WIDTH + 4);

    let prefix = format!(
        "{:>id_w$}  {:date_w$.date_w$}  {:desc_w$.desc_w$} {:cp_w$.cp_w$}",
        txn.id,
        date,
        txn.description,
        txn.counterparty(&account.name),
        id_w = ID_WIDTH,
        date_w = DATE_WIDTH,
        desc_w = DESCRIPTION_WIDTH,
        cp_w = COUNTER_WIDTH,
    );

    match txn.direction_for(&account.name) {
        Direction::In => format!("{} {} {} {}", prefix, amount, blank, balance),
        Direction::Out => format!("{} {} {} {}", prefix, blank, amount, balance),
    }
}

/// Format a full statement
///
/// With `limit`, only the most recent `limit` lines are shown and the
/// transaction count is left out.
pub fn format_statement(
    account: &AccountRecord,
    posted: &[PostedTransaction],
    limit: Option<usize>,
) -> String {
    let shown = match limit {
        Some(n) => &posted[posted.len().saturating_sub(n)..],
        None => posted,
    };

    let mut lines = vec![format_statement_header(account)];
    lines.extend(shown.iter().map(|p| format_statement_line(account, p)));

    if limit.is_none() {
        lines.push(format!("Number of transactions: {}", posted.len()));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountType, Money, Transaction, TransactionId};
    use chrono::NaiveDate;

    fn posted(id: u64, source: &str, destination: &str, cents: i64, balance: i64) -> PostedTransaction {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let mut transaction = Transaction::new(
            TransactionId::new(id),
            source,
            destination,
            Money::from_cents(cents),
            date,
        );
        transaction.description = "Weekly shop".into();
        PostedTransaction {
            transaction,
            balance: Money::from_cents(balance),
        }
    }

    fn bank() -> AccountRecord {
        AccountRecord::new("bank", Some(AccountType::Bank), Money::from_cents(100000))
    }

    #[test]
    fn test_header() {
        assert_eq!(
            format_statement_header(&bank()),
            "Account: bank (type: bank)\n---------------------------"
        );

        let unset = AccountRecord::new("misc", None, Money::zero());
        let header = format_statement_header(&unset);
        let (title, rule) = header.split_once('\n').unwrap();
        assert_eq!(title, "Account: misc (type: unset)");
        assert_eq!(rule.len(), title.len() + 1);
        assert!(rule.chars().all(|c| c == '-'));
    }

    #[test]
    fn test_out_line_layout() {
        let line = format_statement_line(&bank(), &posted(1, "bank", "groceries", 5025, 94975));
        let expected = format!(
            "    1  2024-01-10  {:40} {:30}              {} {}",
            "Weekly shop", "groceries", "   50.25", "  949.75"
        );
        assert_eq!(line, expected);
    }

    #[test]
    fn test_in_line_layout() {
        let groceries = AccountRecord::new("groceries", Some(AccountType::Expense), Money::zero());
        let line = format_statement_line(&groceries, &posted(1, "bank", "groceries", 5025, 5025));
        let expected = format!(
            "    1  2024-01-10  {:40} {:30} {}              {}",
            "Weekly shop", "bank", "   50.25", "   50.25"
        );
        assert_eq!(line, expected);
    }

    #[test]
    fn test_in_and_out_lines_have_equal_width() {
        let groceries = AccountRecord::new("groceries", Some(AccountType::Expense), Money::zero());
        let p = posted(1, "bank", "groceries", 5025, 5025);
        assert_eq!(
            format_statement_line(&bank(), &p).len(),
            format_statement_line(&groceries, &p).len()
        );
    }

    #[test]
    fn test_negative_amount_is_shown_unsigned_in_the_other_column() {
        // bank pays -20: money actually comes back in
        let line = format_statement_line(&bank(), &posted(2, "bank", "shop", -2000, 102000));
        assert!(line.contains("shop"));
        let expected_tail = format!(" {}              {}", "   20.00", " 1020.00");
        assert!(line.ends_with(&expected_tail), "{}", line);
    }

    #[test]
    fn test_fields_are_truncated() {
        let mut p = posted(123456, "bank", &"x".repeat(50), 100, 0);
        p.transaction.description = "d".repeat(60);
        let line = format_statement_line(&bank(), &p);
        assert!(line.starts_with("123456  2024-01-10  "));
        assert!(line.contains(&format!("{} {} ", "d".repeat(40), "x".repeat(30))));
        assert!(!line.contains(&"d".repeat(41)));
    }

    #[test]
    fn test_credit_balance_sign_inverted() {
        let visa = AccountRecord::new("visa", Some(AccountType::Credit), Money::zero());
        let line = format_statement_line(&visa, &posted(1, "visa", "groceries", 1250, -1250));
        assert!(line.ends_with("   12.50"), "{}", line);
    }

    #[test]
    fn test_statement_limit_and_count() {
        let history = vec![
            posted(1, "bank", "groceries", 100, 99900),
            posted(2, "bank", "groceries", 100, 99800),
            posted(3, "bank", "groceries", 100, 99700),
        ];

        let full = format_statement(&bank(), &history, None);
        assert_eq!(full.lines().count(), 2 + 3 + 1);
        assert!(full.ends_with("Number of transactions: 3"));

        let limited = format_statement(&bank(), &history, Some(2));
        let lines: Vec<_> = limited.lines().collect();
        assert_eq!(lines.len(), 2 + 2);
        assert!(lines[2].starts_with("    2"));
        assert!(lines[3].starts_with("    3"));
        assert!(!limited.contains("Number of transactions"));

        assert_eq!(format_statement(&bank(), &history, Some(10)).lines().count(), 5);
        assert_eq!(format_statement(&bank(), &history, Some(0)).lines().count(), 2);
    }

    #[test]
    fn test_empty_statement() {
        let text = format_statement(&bank(), &[], None);
        assert!(text.ends_with("Number of transactions: 0"));
        assert_eq!(text.lines().count(), 3);
    }
}
