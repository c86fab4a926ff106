//! Transaction domain: crypto cashier transactions and their history list.

mod convert;
pub mod state;
pub mod wire;

use crate::shared::TransactionId;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use state::TransactionHistory;

/// A crypto deposit/withdrawal record as shown in the cashier.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TransactionItem {
    pub id: TransactionId,
    pub address_hash: String,
    pub address_url: String,
    pub amount: Decimal,
    pub is_valid_to_cancel: i64,
    pub status_code: String,
    pub status_message: String,
    /// Epoch seconds.
    pub submit_date: i64,
    pub transaction_type: String,
}

impl TransactionItem {
    /// Whether the server still allows this transaction to be cancelled.
    pub fn can_cancel(&self) -> bool {
        self.is_valid_to_cancel == 1
    }

    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.submit_date, 0).single()
    }
}
