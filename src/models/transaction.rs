use serde::{Deserialize, Serialize};

/// Transaction type accepted by the transactions endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Withdraw,
    PayBill,
    Transfer,
}

impl TransactionType {
    /// Withdrawals carry no recipient; the form hides the field.
    pub fn needs_recipient(&self) -> bool {
        !matches!(self, TransactionType::Withdraw)
    }

    /// Cycle through the three types (used by the transaction form select).
    pub fn next(&self) -> Self {
        match self {
            TransactionType::Withdraw => TransactionType::PayBill,
            TransactionType::PayBill => TransactionType::Transfer,
            TransactionType::Transfer => TransactionType::Withdraw,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Withdraw => write!(f, "Withdraw"),
            TransactionType::PayBill => write!(f, "Pay Bill"),
            TransactionType::Transfer => write!(f, "Transfer"),
        }
    }
}

/// A bank statement line as returned by `GET /api/accounts/{id}/statements/`.
///
/// `amount` is a DRF decimal string; `recipient` is absent for withdrawals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statement {
    pub id: i64,
    pub transaction_type: TransactionType,
    pub amount: String,
    pub recipient: Option<i64>,
    #[serde(default)]
    pub sender: Option<i64>,
}

/// Request body for `POST /api/accounts/transactions/create/`.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRequest {
    pub transaction_type: TransactionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<i64>,
    pub amount: String,
    pub sender: i64,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_deserializes_withdrawal() {
        let json = r#"{"id": 12, "transaction_type": "withdraw", "amount": "50.00", "recipient": null, "sender": 7}"#;
        let statement: Statement = serde_json::from_str(json).unwrap();
        assert_eq!(statement.transaction_type, TransactionType::Withdraw);
        assert!(statement.recipient.is_none());
        assert_eq!(statement.sender, Some(7));
    }

    #[test]
    fn test_statement_deserializes_transfer() {
        let json = r#"{"id": 13, "transaction_type": "transfer", "amount": "200.00", "recipient": 9, "sender": 7}"#;
        let statement: Statement = serde_json::from_str(json).unwrap();
        assert_eq!(statement.transaction_type, TransactionType::Transfer);
        assert_eq!(statement.recipient, Some(9));
    }

    #[test]
    fn test_transaction_request_omits_empty_recipient() {
        let request = TransactionRequest {
            transaction_type: TransactionType::Withdraw,
            recipient: None,
            amount: "50.00".to_string(),
            sender: 7,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("recipient"));
        assert!(json.contains("\"transaction_type\":\"withdraw\""));
    }

    #[test]
    fn test_transaction_type_display() {
        assert_eq!(TransactionType::Withdraw.to_string(), "Withdraw");
        assert_eq!(TransactionType::PayBill.to_string(), "Pay Bill");
        assert_eq!(TransactionType::Transfer.to_string(), "Transfer");
    }

    #[test]
    fn test_transaction_type_needs_recipient() {
        assert!(!TransactionType::Withdraw.needs_recipient());
        assert!(TransactionType::PayBill.needs_recipient());
        assert!(TransactionType::Transfer.needs_recipient());
    }
}
