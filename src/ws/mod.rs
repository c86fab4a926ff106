//! Wire vocabulary of the cashier messaging API.
//!
//! The socket itself belongs to the host. This module defines the request
//! envelopes a transport sends and the response envelopes it routes back,
//! so `CashierTransport` implementations share one encoding.

use crate::domain::transaction::wire::{CancelResponse, CashierPaymentsResponse};
use crate::error::{ServerError, TransportError};
use crate::shared::{Provider, SubscriptionId, TransactionId, TransactionType};
use serde::{Deserialize, Serialize};

// ─── Outbound messages ───────────────────────────────────────────────────────

/// Request for the crypto transaction list, optionally as a subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashierPaymentsRequest {
    pub cashier_payments: u8,
    pub provider: Provider,
    pub transaction_type: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscribe: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub req_id: Option<u64>,
}

/// Request to cancel a pending crypto withdrawal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashierWithdrawalCancelRequest {
    pub cashier_withdrawal_cancel: u8,
    pub id: TransactionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub req_id: Option<u64>,
}

/// Request to end a standing subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForgetRequest {
    pub forget: SubscriptionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub req_id: Option<u64>,
}

/// Messages sent from client to server.
///
/// The API discriminates requests by their leading field name rather than by
/// a tag, so variants serialize untagged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessageOut {
    CashierPayments(CashierPaymentsRequest),
    CashierWithdrawalCancel(CashierWithdrawalCancelRequest),
    Forget(ForgetRequest),
}

impl MessageOut {
    /// One-time fetch of the transaction list.
    pub fn cashier_payments(provider: Provider, transaction_type: TransactionType) -> Self {
        MessageOut::CashierPayments(CashierPaymentsRequest {
            cashier_payments: 1,
            provider,
            transaction_type,
            subscribe: None,
            req_id: None,
        })
    }

    /// Fetch plus a standing subscription for later changes.
    pub fn subscribe_cashier_payments(
        provider: Provider,
        transaction_type: TransactionType,
    ) -> Self {
        MessageOut::CashierPayments(CashierPaymentsRequest {
            cashier_payments: 1,
            provider,
            transaction_type,
            subscribe: Some(1),
            req_id: None,
        })
    }

    pub fn cancel_withdrawal(id: TransactionId) -> Self {
        MessageOut::CashierWithdrawalCancel(CashierWithdrawalCancelRequest {
            cashier_withdrawal_cancel: 1,
            id,
            req_id: None,
        })
    }

    pub fn forget(subscription: SubscriptionId) -> Self {
        MessageOut::Forget(ForgetRequest {
            forget: subscription,
            req_id: None,
        })
    }

    /// Tag the request so its response can be matched.
    pub fn with_req_id(mut self, req_id: u64) -> Self {
        match &mut self {
            MessageOut::CashierPayments(r) => r.req_id = Some(req_id),
            MessageOut::CashierWithdrawalCancel(r) => r.req_id = Some(req_id),
            MessageOut::Forget(r) => r.req_id = Some(req_id),
        }
        self
    }

    pub fn req_id(&self) -> Option<u64> {
        match self {
            MessageOut::CashierPayments(r) => r.req_id,
            MessageOut::CashierWithdrawalCancel(r) => r.req_id,
            MessageOut::Forget(r) => r.req_id,
        }
    }

    /// The `msg_type` the server will answer with.
    pub fn msg_type(&self) -> &'static str {
        match self {
            MessageOut::CashierPayments(_) => "cashier_payments",
            MessageOut::CashierWithdrawalCancel(_) => "cashier_withdrawal_cancel",
            MessageOut::Forget(_) => "forget",
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl std::fmt::Display for MessageOut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_json() {
            Ok(json) => write!(f, "{}", json),
            Err(_) => write!(f, "<{}>", self.msg_type()),
        }
    }
}

// ─── Inbound messages ────────────────────────────────────────────────────────

/// Raw inbound message from the server.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageIn {
    #[serde(flatten)]
    pub kind: Kind,
}

impl MessageIn {
    pub fn parse(text: &str) -> Result<Self, TransportError> {
        serde_json::from_str(text).map_err(|e| TransportError::DeserializationError(e.to_string()))
    }
}

/// The type of inbound message, keyed by the envelope's `msg_type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "msg_type")]
pub enum Kind {
    #[serde(rename = "cashier_payments")]
    CashierPayments(CashierPaymentsResponse),
    #[serde(rename = "cashier_withdrawal_cancel")]
    CashierWithdrawalCancel(CancelResponse),
    #[serde(rename = "forget")]
    Forget(ForgetResponse),
    #[serde(other)]
    Unknown,
}

impl Kind {
    pub fn req_id(&self) -> Option<u64> {
        match self {
            Kind::CashierPayments(r) => r.req_id,
            Kind::CashierWithdrawalCancel(r) => r.req_id,
            Kind::Forget(r) => r.req_id,
            Kind::Unknown => None,
        }
    }

    /// Subscription this message belongs to, for push routing.
    pub fn subscription_id(&self) -> Option<&SubscriptionId> {
        match self {
            Kind::CashierPayments(r) => r.subscription.as_ref().map(|s| &s.id),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ServerError> {
        match self {
            Kind::CashierPayments(r) => r.error.as_ref(),
            Kind::CashierWithdrawalCancel(r) => r.error.as_ref(),
            Kind::Forget(r) => r.error.as_ref(),
            Kind::Unknown => None,
        }
    }
}

/// `subscription` block attached to streamed responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionInfo {
    pub id: SubscriptionId,
}

/// Response to a `forget` request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForgetResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forget: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ServerError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub req_id: Option<u64>,
}

impl ForgetResponse {
    /// Whether the server actually had (and dropped) the subscription.
    pub fn forgotten(&self) -> bool {
        self.forget == Some(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cashier_payments_request_serialization() {
        let msg = MessageOut::subscribe_cashier_payments(Provider::Crypto, TransactionType::All)
            .with_req_id(3);
        let parsed: serde_json::Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();

        assert_eq!(parsed["cashier_payments"], 1);
        assert_eq!(parsed["provider"], "crypto");
        assert_eq!(parsed["transaction_type"], "all");
        assert_eq!(parsed["subscribe"], 1);
        assert_eq!(parsed["req_id"], 3);
        assert_eq!(msg.req_id(), Some(3));
    }

    #[test]
    fn test_one_time_request_omits_subscribe() {
        let msg = MessageOut::cashier_payments(Provider::Crypto, TransactionType::All);
        let parsed: serde_json::Value = serde_json::from_str(&msg.to_string()).unwrap();
        assert!(parsed.get("subscribe").is_none());
        assert!(parsed.get("req_id").is_none());
    }

    #[test]
    fn test_cancel_and_forget_serialization() {
        let cancel = MessageOut::cancel_withdrawal(TransactionId::from("tx-42"));
        let parsed: serde_json::Value = serde_json::from_str(&cancel.to_string()).unwrap();
        assert_eq!(parsed["cashier_withdrawal_cancel"], 1);
        assert_eq!(parsed["id"], "tx-42");
        assert_eq!(cancel.msg_type(), "cashier_withdrawal_cancel");

        let forget = MessageOut::forget(SubscriptionId::from("sub-1"));
        assert_eq!(forget.to_string(), r#"{"forget":"sub-1"}"#);
    }

    #[test]
    fn test_parse_cashier_payments_push() {
        let text = r#"{
            "msg_type": "cashier_payments",
            "echo_req": {"cashier_payments": 1, "subscribe": 1},
            "req_id": 9,
            "subscription": {"id": "sub-1"},
            "cashier_payments": {"crypto": [{"id": "7", "submit_date": 50}]}
        }"#;
        let msg = MessageIn::parse(text).unwrap();
        assert_eq!(msg.kind.req_id(), Some(9));
        assert_eq!(msg.kind.subscription_id().unwrap().as_str(), "sub-1");
        match msg.kind {
            Kind::CashierPayments(resp) => {
                let crypto = resp.into_result().unwrap().crypto;
                assert_eq!(crypto[0].submit_date, Some(50));
            }
            other => panic!("expected CashierPayments, got: {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_envelope() {
        let text = r#"{
            "msg_type": "cashier_withdrawal_cancel",
            "error": {"code": "CryptoWithdrawalCancelError", "message": "Cannot cancel."}
        }"#;
        let msg = MessageIn::parse(text).unwrap();
        assert_eq!(
            msg.kind.error().unwrap().code,
            "CryptoWithdrawalCancelError"
        );
    }

    #[test]
    fn test_parse_forget_and_unknown() {
        let forget = MessageIn::parse(r#"{"msg_type":"forget","forget":1}"#).unwrap();
        match forget.kind {
            Kind::Forget(resp) => assert!(resp.forgotten()),
            other => panic!("expected Forget, got: {other:?}"),
        }

        let unknown = MessageIn::parse(r#"{"msg_type":"ping","ping":"pong"}"#).unwrap();
        assert!(matches!(unknown.kind, Kind::Unknown));

        assert!(matches!(
            MessageIn::parse("not json"),
            Err(TransportError::DeserializationError(_))
        ));
    }
}
