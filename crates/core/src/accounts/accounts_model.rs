//! Account domain models.
//!
//! Engines key their outputs by the account name carried on each record, so
//! an `Account` entry only adds display metadata: an optional type label, a
//! manually tracked balance, and the dashboard grouping tag.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-defined account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    /// Persisted under the frontend's `type` key.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Decimal>,
    /// Dashboard grouping tag; `None` means ungrouped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl Account {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            account_type: None,
            balance: None,
            group: None,
        }
    }
}

/// Tags every account whose name appears in `names` with `group`.
pub fn assign_group(accounts: &mut [Account], names: &[String], group: &str) {
    for account in accounts.iter_mut() {
        if names.iter().any(|name| name == &account.name) {
            account.group = Some(group.to_string());
        }
    }
}

/// Removes the grouping tag from every account whose name appears in `names`.
pub fn clear_group(accounts: &mut [Account], names: &[String]) {
    for account in accounts.iter_mut() {
        if names.iter().any(|name| name == &account.name) {
            account.group = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounts() -> Vec<Account> {
        vec![
            Account::new("Brokerage"),
            Account::new("Pension"),
            Account::new("Savings"),
        ]
    }

    #[test]
    fn assign_group_tags_only_named_accounts() {
        let mut accounts = accounts();
        let names = vec!["Brokerage".to_string(), "Savings".to_string()];

        assign_group(&mut accounts, &names, "Liquid");

        assert_eq!(accounts[0].group.as_deref(), Some("Liquid"));
        assert_eq!(accounts[1].group, None);
        assert_eq!(accounts[2].group.as_deref(), Some("Liquid"));
    }

    #[test]
    fn assign_group_overwrites_previous_group() {
        let mut accounts = accounts();
        let names = vec!["Pension".to_string()];

        assign_group(&mut accounts, &names, "Retirement");
        assign_group(&mut accounts, &names, "Long Term");

        assert_eq!(accounts[1].group.as_deref(), Some("Long Term"));
    }

    #[test]
    fn clear_group_only_touches_named_accounts() {
        let mut accounts = accounts();
        let all: Vec<String> = accounts.iter().map(|a| a.name.clone()).collect();
        assign_group(&mut accounts, &all, "Everything");

        clear_group(&mut accounts, &all[..1].to_vec());

        assert_eq!(accounts[0].group, None);
        assert_eq!(accounts[1].group.as_deref(), Some("Everything"));
        assert_eq!(accounts[2].group.as_deref(), Some("Everything"));
    }

    #[test]
    fn serde_uses_the_frontend_keys_and_skips_empty_fields() {
        let account = Account {
            id: "a-1".to_string(),
            name: "Brokerage".to_string(),
            account_type: Some("securities".to_string()),
            balance: None,
            group: None,
        };
        let json = serde_json::to_string(&account).unwrap();
        assert_eq!(
            json,
            r#"{"id":"a-1","name":"Brokerage","type":"securities"}"#
        );

        let parsed: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, account);
    }
}
