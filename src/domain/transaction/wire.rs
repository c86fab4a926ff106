//! Wire types for `cashier_payments` and `cashier_withdrawal_cancel` responses.

use crate::error::{SdkError, ServerError};
use crate::shared::TransactionId;
use crate::ws::SubscriptionInfo;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A crypto transaction as the server sends it.
///
/// Snapshots carry every field; pushes may carry only the fields that
/// changed, so everything except `id` is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CryptoTransaction {
    pub id: TransactionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_valid_to_cancel: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,
}

/// The `cashier_payments` payload, keyed by provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CashierPayments {
    #[serde(default)]
    pub crypto: Vec<CryptoTransaction>,
}

/// Response to a `cashier_payments` request, and the shape of every push on
/// a `cashier_payments` subscription.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CashierPaymentsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cashier_payments: Option<CashierPayments>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ServerError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<SubscriptionInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub req_id: Option<u64>,
}

impl CashierPaymentsResponse {
    pub fn success(crypto: Vec<CryptoTransaction>) -> Self {
        Self {
            cashier_payments: Some(CashierPayments { crypto }),
            ..Default::default()
        }
    }

    pub fn failure(error: ServerError) -> Self {
        Self {
            error: Some(error),
            ..Default::default()
        }
    }

    /// The payload, or the server error that replaced it.
    pub fn into_result(self) -> Result<CashierPayments, SdkError> {
        if let Some(error) = self.error {
            return Err(SdkError::Server(error));
        }
        self.cashier_payments.ok_or_else(|| {
            SdkError::Validation("cashier_payments response without payload".to_string())
        })
    }
}

/// Body of a successful `cashier_withdrawal_cancel` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CancelledWithdrawal {
    pub id: TransactionId,
    #[serde(default)]
    pub status_code: String,
}

/// Response to a `cashier_withdrawal_cancel` request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CancelResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cashier_withdrawal_cancel: Option<CancelledWithdrawal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ServerError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub req_id: Option<u64>,
}

impl CancelResponse {
    pub fn success(id: TransactionId, status_code: impl Into<String>) -> Self {
        Self {
            cashier_withdrawal_cancel: Some(CancelledWithdrawal {
                id,
                status_code: status_code.into(),
            }),
            ..Default::default()
        }
    }

    pub fn failure(error: ServerError) -> Self {
        Self {
            error: Some(error),
            ..Default::default()
        }
    }

    pub fn into_result(self) -> Result<CancelledWithdrawal, SdkError> {
        if let Some(error) = self.error {
            return Err(SdkError::Server(error));
        }
        self.cashier_withdrawal_cancel.ok_or_else(|| {
            SdkError::Validation("cashier_withdrawal_cancel response without payload".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_snapshot_response() {
        let json = r#"{
            "cashier_payments": {
                "crypto": [{
                    "address_hash": "tb1qxyz",
                    "address_url": "https://explorer/tb1qxyz",
                    "amount": 0.5,
                    "id": "3",
                    "is_valid_to_cancel": 1,
                    "status_code": "LOCKED",
                    "status_message": "We're processing your withdrawal.",
                    "submit_date": 1700000000,
                    "transaction_type": "withdrawal"
                }]
            },
            "req_id": 7
        }"#;
        let resp: CashierPaymentsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.req_id, Some(7));
        let payments = resp.into_result().unwrap();
        assert_eq!(payments.crypto.len(), 1);
        let tx = &payments.crypto[0];
        assert_eq!(tx.id.as_str(), "3");
        assert_eq!(tx.amount, Some(Decimal::new(5, 1)));
        assert_eq!(tx.submit_date, Some(1_700_000_000));
    }

    #[test]
    fn test_parse_partial_push() {
        let json = r#"{"cashier_payments":{"crypto":[{"id":"3","status_code":"CANCELLED"}]},
                       "subscription":{"id":"sub-1"}}"#;
        let resp: CashierPaymentsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.subscription.as_ref().unwrap().id.as_str(), "sub-1");
        let tx = &resp.into_result().unwrap().crypto[0];
        assert_eq!(tx.status_code.as_deref(), Some("CANCELLED"));
        assert!(tx.amount.is_none());
        assert!(tx.submit_date.is_none());
    }

    #[test]
    fn test_error_takes_precedence() {
        let json = r#"{"error":{"code":"AuthorizationRequired","message":"Please log in."}}"#;
        let resp: CashierPaymentsResponse = serde_json::from_str(json).unwrap();
        match resp.into_result() {
            Err(SdkError::Server(e)) => assert_eq!(e.code, "AuthorizationRequired"),
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_payload_is_validation_error() {
        let resp = CashierPaymentsResponse::default();
        assert!(matches!(resp.into_result(), Err(SdkError::Validation(_))));
    }

    #[test]
    fn test_cancel_response() {
        let json = r#"{"cashier_withdrawal_cancel":{"id":"3","status_code":"CANCELLED"}}"#;
        let resp: CancelResponse = serde_json::from_str(json).unwrap();
        let cancelled = resp.into_result().unwrap();
        assert_eq!(cancelled.id.as_str(), "3");
        assert_eq!(cancelled.status_code, "CANCELLED");

        let failed = CancelResponse::failure(ServerError::new("InvalidId", "No such withdrawal"));
        assert!(matches!(failed.into_result(), Err(SdkError::Server(_))));
    }
}
