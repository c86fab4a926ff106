//! Transport seam: the messaging operations the store needs from the host.
//!
//! Implementations typically wrap an authorized websocket connection and use
//! the envelopes in [`crate::ws`] to encode requests and route responses.

use crate::domain::transaction::wire::{CancelResponse, CashierPaymentsResponse};
use crate::error::TransportError;
use crate::shared::{Provider, SubscriptionId, TransactionId, TransactionType};
use async_trait::async_trait;
use std::sync::Arc;

/// Callback invoked once per push on a `cashier_payments` subscription.
///
/// Called synchronously by the transport in delivery order; each call runs to
/// completion before the next push is handed over.
pub type PushHandler = Arc<dyn Fn(CashierPaymentsResponse) + Send + Sync>;

#[async_trait]
pub trait CashierTransport: Send + Sync {
    /// One-time fetch of the transaction list.
    async fn fetch_payments(
        &self,
        provider: Provider,
        transaction_type: TransactionType,
    ) -> Result<CashierPaymentsResponse, TransportError>;

    /// Open a standing subscription. Resolves once the server has registered
    /// it; later pushes go to `on_push`.
    async fn subscribe_payments(
        &self,
        provider: Provider,
        transaction_type: TransactionType,
        on_push: PushHandler,
    ) -> Result<SubscriptionId, TransportError>;

    /// Cancel a pending withdrawal.
    async fn cancel_payment(&self, id: &TransactionId) -> Result<CancelResponse, TransportError>;

    /// End a standing subscription.
    async fn forget(&self, subscription: &SubscriptionId) -> Result<(), TransportError>;
}
