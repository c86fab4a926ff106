//! Conversions from wire records to domain transactions.

use super::wire::CryptoTransaction;
use super::TransactionItem;

impl From<CryptoTransaction> for TransactionItem {
    fn from(t: CryptoTransaction) -> Self {
        Self {
            id: t.id,
            address_hash: t.address_hash.unwrap_or_default(),
            address_url: t.address_url.unwrap_or_default(),
            amount: t.amount.unwrap_or_default(),
            is_valid_to_cancel: t.is_valid_to_cancel.unwrap_or_default(),
            status_code: t.status_code.unwrap_or_default(),
            status_message: t.status_message.unwrap_or_default(),
            submit_date: t.submit_date.unwrap_or_default(),
            transaction_type: t.transaction_type.unwrap_or_default(),
        }
    }
}

impl TransactionItem {
    /// Overwrite the fields present in `patch`; absent fields keep their value.
    pub fn apply(&mut self, patch: CryptoTransaction) {
        if let Some(v) = patch.address_hash {
            self.address_hash = v;
        }
        if let Some(v) = patch.address_url {
            self.address_url = v;
        }
        if let Some(v) = patch.amount {
            self.amount = v;
        }
        if let Some(v) = patch.is_valid_to_cancel {
            self.is_valid_to_cancel = v;
        }
        if let Some(v) = patch.status_code {
            self.status_code = v;
        }
        if let Some(v) = patch.status_message {
            self.status_message = v;
        }
        if let Some(v) = patch.submit_date {
            self.submit_date = v;
        }
        if let Some(v) = patch.transaction_type {
            self.transaction_type = v;
        }
    }
}
