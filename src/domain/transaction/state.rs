//! Transaction state container: app-owned, SDK-provided update logic.

use super::wire::CryptoTransaction;
use super::TransactionItem;
use crate::shared::TransactionId;

/// A user's crypto transactions, most recent first.
///
/// Every mutation re-sorts the whole list by `submit_date` descending with a
/// stable sort, so equal dates keep their previous relative order.
/// Ids are unique within the list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionHistory {
    transactions: Vec<TransactionItem>,
}

impl TransactionHistory {
    /// Replace all transactions (e.g. from a snapshot fetch).
    ///
    /// Records repeating an id are folded into the first occurrence.
    pub fn replace(&mut self, transactions: Vec<CryptoTransaction>) {
        self.transactions.clear();
        self.upsert_all(transactions);
        self.sort();
    }

    /// Merge a push: unknown ids are appended, known ids are patched in place.
    pub fn merge(&mut self, transactions: Vec<CryptoTransaction>) {
        self.upsert_all(transactions);
        self.sort();
    }

    fn upsert_all(&mut self, transactions: Vec<CryptoTransaction>) {
        for incoming in transactions {
            match self.transactions.iter_mut().find(|t| t.id == incoming.id) {
                Some(existing) => existing.apply(incoming),
                None => self.transactions.push(incoming.into()),
            }
        }
    }

    fn sort(&mut self) {
        self.transactions
            .sort_by(|a, b| b.submit_date.cmp(&a.submit_date));
    }

    pub fn transactions(&self) -> &[TransactionItem] {
        &self.transactions
    }

    pub fn get(&self, id: &TransactionId) -> Option<&TransactionItem> {
        self.transactions.iter().find(|t| &t.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
