//! Transfer request model
//!
//! A transfer waiting to be recorded, as produced by the CSV importer and
//! consumed by batch apply. Stored as YAML so it can be reviewed and edited
//! by hand in between.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;

/// One pending transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Source account name
    pub from: String,

    /// Destination account name
    pub to: String,

    pub amount: Money,

    #[serde(default)]
    pub description: String,

    /// Logical date; absent means "when applied"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl TransferRequest {
    /// Whether either side still carries the given placeholder name
    pub fn is_unassigned(&self, placeholder: &str) -> bool {
        self.from == placeholder || self.to == placeholder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_layout() {
        let request = TransferRequest {
            from: "visa_credit_card".into(),
            to: "groceries".into(),
            amount: Money::from_cents(1250),
            description: "COOP ZURICH Purchase".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 2),
        };

        let yaml = serde_yaml::to_string(&vec![request.clone()]).unwrap();
        assert!(yaml.contains("from: visa_credit_card"));
        assert!(yaml.contains("to: groceries"));
        assert!(yaml.contains("amount: 12.5"));
        assert!(yaml.contains("2024-03-02"));

        let parsed: Vec<TransferRequest> = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, vec![request]);
    }

    #[test]
    fn test_hand_written_request() {
        let yaml = "- from: bank\n  to: rent\n  amount: 1200\n";
        let parsed: Vec<TransferRequest> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed[0].amount.cents(), 120000);
        assert!(parsed[0].description.is_empty());
        assert!(parsed[0].date.is_none());
    }

    #[test]
    fn test_is_unassigned() {
        let request = TransferRequest {
            from: "visa_credit_card".into(),
            to: "<TBA>".into(),
            amount: Money::from_cents(100),
            description: String::new(),
            date: None,
        };
        assert!(request.is_unassigned("<TBA>"));
        assert!(!request.is_unassigned("<none>"));
    }
}
