//! Account roster formatting
//!
//! Lists every account grouped by type with its display balance.

use crate::models::AccountType;
use crate::services::account::AccountSummary;

const NAME_WIDTH: usize = 30;
const BALANCE_WIDTH: usize = 12;

fn format_group(title: &str, summaries: &[&AccountSummary]) -> Vec<String> {
    let mut lines = vec![format!("{}:", title)];
    for summary in summaries {
        lines.push(format!(
            "  {:w$.w$}  {}",
            summary.account.name,
            summary.display_balance().format_column(BALANCE_WIDTH),
            w = NAME_WIDTH,
        ));
    }
    lines.push(String::new());
    lines
}

/// Format the roster of all accounts
///
/// Groups come in the fixed order bank, credit, income, expense, each
/// sorted by name. Accounts without a type are listed last under
/// `UNASSIGNED`, and only when there are any.
pub fn format_roster(summaries: &[AccountSummary]) -> String {
    let title = "List of accounts:";
    let mut lines = vec![title.to_string(), "-".repeat(title.len() + 1)];

    let mut sorted: Vec<&AccountSummary> = summaries.iter().collect();
    sorted.sort_by(|a, b| a.account.name.cmp(&b.account.name));

    for account_type in AccountType::ALL {
        let group: Vec<&AccountSummary> = sorted
            .iter()
            .copied()
            .filter(|s| s.account.account_type == Some(account_type))
            .collect();
        lines.extend(format_group(&account_type.as_str().to_uppercase(), &group));
    }

    let unassigned: Vec<&AccountSummary> = sorted
        .iter()
        .copied()
        .filter(|s| s.account.account_type.is_none())
        .collect();
    if !unassigned.is_empty() {
        lines.extend(format_group("UNASSIGNED", &unassigned));
    }

    // No blank line after the last group
    lines.pop();
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountRecord, Money};

    fn summary(name: &str, account_type: Option<AccountType>, cents: i64) -> AccountSummary {
        AccountSummary {
            account: AccountRecord::new(name, account_type, Money::zero()),
            balance: Money::from_cents(cents),
        }
    }

    #[test]
    fn test_groups_in_fixed_order() {
        let roster = format_roster(&[
            summary("rent", Some(AccountType::Expense), 120000),
            summary("salary", Some(AccountType::Income), -200000),
            summary("bank", Some(AccountType::Bank), 80000),
            summary("visa", Some(AccountType::Credit), -1250),
        ]);

        let lines: Vec<&str> = roster.lines().collect();
        assert_eq!(lines[0], "List of accounts:");
        assert_eq!(lines[1], "------------------");

        let pos = |needle: &str| roster.find(needle).unwrap();
        assert!(pos("BANK:") < pos("CREDIT:"));
        assert!(pos("CREDIT:") < pos("INCOME:"));
        assert!(pos("INCOME:") < pos("EXPENSE:"));
        assert!(!roster.contains("UNASSIGNED:"));
    }

    #[test]
    fn test_balances_use_display_convention() {
        let roster = format_roster(&[
            summary("salary", Some(AccountType::Income), -200000),
            summary("bank", Some(AccountType::Bank), 80000),
        ]);

        assert!(roster.contains(&format!("  {:30}  {:>12}", "salary", " 2000.00")));
        assert!(roster.contains(&format!("  {:30}  {:>12}", "bank", " 800.00")));
    }

    #[test]
    fn test_names_sorted_within_group() {
        let roster = format_roster(&[
            summary("rent", Some(AccountType::Expense), 0),
            summary("groceries", Some(AccountType::Expense), 0),
            summary("fuel", Some(AccountType::Expense), 0),
        ]);

        let fuel = roster.find("fuel").unwrap();
        let groceries = roster.find("groceries").unwrap();
        let rent = roster.find("rent").unwrap();
        assert!(fuel < groceries && groceries < rent);
    }

    #[test]
    fn test_untyped_accounts_listed_last() {
        let roster = format_roster(&[
            summary("employer", None, -200000),
            summary("bank", Some(AccountType::Bank), 0),
        ]);

        assert!(roster.find("UNASSIGNED:").unwrap() > roster.find("EXPENSE:").unwrap());
        assert!(roster.contains(&format!("  {:30}  {:>12}", "employer", "-2000.00")));
    }

    #[test]
    fn test_empty_roster() {
        let roster = format_roster(&[]);
        assert_eq!(
            roster,
            "List of accounts:\n------------------\nBANK:\n\nCREDIT:\n\nINCOME:\n\nEXPENSE:"
        );
    }
}
