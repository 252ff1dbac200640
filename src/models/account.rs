use serde::{Deserialize, Serialize};

/// Account type offered by the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Individual,
    Company,
}

impl AccountType {
    /// Wire value sent to the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Individual => "individual",
            AccountType::Company => "company",
        }
    }

    /// Cycle to the other account type (used by the create-account select).
    pub fn toggle(&self) -> Self {
        match self {
            AccountType::Individual => AccountType::Company,
            AccountType::Company => AccountType::Individual,
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountType::Individual => write!(f, "Individual Account"),
            AccountType::Company => write!(f, "Company Account"),
        }
    }
}

/// A bank account as returned by `GET /api/accounts/`.
///
/// `balance` is a DRF decimal, serialized on the wire as a string
/// (e.g. `"1500.00"`); it is carried verbatim for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub account_type: AccountType,
    pub balance: String,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_deserializes_wire_shape() {
        // Shape produced by the accounts list endpoint (extra keys ignored)
        let json = r#"{"id": 7, "user": 3, "account_type": "individual", "balance": "1500.00"}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.id, 7);
        assert_eq!(account.account_type, AccountType::Individual);
        assert_eq!(account.balance, "1500.00");
    }

    #[test]
    fn test_account_type_wire_values() {
        assert_eq!(AccountType::Individual.as_str(), "individual");
        assert_eq!(AccountType::Company.as_str(), "company");
        assert_eq!(
            serde_json::to_string(&AccountType::Company).unwrap(),
            "\"company\""
        );
    }

    #[test]
    fn test_account_type_toggle() {
        assert_eq!(AccountType::Individual.toggle(), AccountType::Company);
        assert_eq!(AccountType::Company.toggle(), AccountType::Individual);
    }
}
