//! View state owned by the transaction history store.

use crate::domain::transaction::TransactionHistory;
use crate::shared::TransactionId;

/// Everything the cashier view renders from.
///
/// Empty selection strings mean "nothing selected".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub transactions: TransactionHistory,
    pub is_loading: bool,
    pub is_transactions_visible: bool,
    pub is_cancel_modal_visible: bool,
    pub is_status_modal_visible: bool,
    pub selected_transaction_id: String,
    pub selected_status: String,
    pub selected_status_description: String,
}

impl StoreState {
    /// The transaction targeted by the cancel dialog, if any.
    pub fn selected_transaction(&self) -> Option<TransactionId> {
        if self.selected_transaction_id.is_empty() {
            None
        } else {
            Some(TransactionId::new(self.selected_transaction_id.clone()))
        }
    }
}
