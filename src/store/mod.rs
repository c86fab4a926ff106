//! Transaction history store: the cashier view's crypto transaction state.
//!
//! The store owns the transaction list and the dialog/selection flags, talks
//! to the host's [`CashierTransport`] and publishes a revision number on every
//! mutation so a rendering layer can re-read [`StoreState`] when it changes.
//!
//! Lifecycle:
//! 1. `on_mount`: snapshot fetch, then a standing subscription (crypto
//!    accounts only, skipped while the host is switching accounts).
//! 2. pushes: merged into the list as they arrive.
//! 3. `on_unmount`: subscription forgotten, state reset.

mod config;
mod state;

pub use config::{StoreConfig, TransactionHistoryStoreBuilder};
pub use state::StoreState;

use crate::domain::account::AccountContext;
use crate::domain::transaction::wire::{CancelledWithdrawal, CashierPaymentsResponse, CryptoTransaction};
use crate::domain::transaction::TransactionItem;
use crate::error::SdkError;
use crate::shared::{SubscriptionId, TransactionId};
use crate::transport::{CashierTransport, PushHandler};

use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

struct Inner {
    transport: Arc<dyn CashierTransport>,
    account: Arc<dyn AccountContext>,
    config: StoreConfig,
    state: RwLock<StoreState>,
    subscription: Mutex<Option<SubscriptionId>>,
    /// Bumped on unmount; work started under an older value is discarded.
    generation: AtomicU64,
    revision: watch::Sender<u64>,
}

/// Cheaply cloneable handle to the store. Clones share the same state.
#[derive(Clone)]
pub struct TransactionHistoryStore {
    inner: Arc<Inner>,
}

impl TransactionHistoryStore {
    pub fn builder() -> TransactionHistoryStoreBuilder {
        TransactionHistoryStoreBuilder::default()
    }

    pub(crate) fn from_parts(
        transport: Arc<dyn CashierTransport>,
        account: Arc<dyn AccountContext>,
        config: StoreConfig,
    ) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                transport,
                account,
                config,
                state: RwLock::new(StoreState::default()),
                subscription: Mutex::new(None),
                generation: AtomicU64::new(0),
                revision,
            }),
        }
    }

    fn update<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> R {
        let mut state = self.inner.state.write();
        let result = f(&mut *state);
        drop(state);
        self.inner.revision.send_modify(|rev| *rev += 1);
        result
    }

    fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }

    // ── Read access ──────────────────────────────────────────────────────

    /// A copy of the whole view state.
    pub fn snapshot(&self) -> StoreState {
        self.inner.state.read().clone()
    }

    pub fn transactions(&self) -> Vec<TransactionItem> {
        self.inner.state.read().transactions.transactions().to_vec()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.read().is_loading
    }

    pub fn is_transactions_visible(&self) -> bool {
        self.inner.state.read().is_transactions_visible
    }

    pub fn is_cancel_modal_visible(&self) -> bool {
        self.inner.state.read().is_cancel_modal_visible
    }

    pub fn is_status_modal_visible(&self) -> bool {
        self.inner.state.read().is_status_modal_visible
    }

    pub fn selected_transaction_id(&self) -> String {
        self.inner.state.read().selected_transaction_id.clone()
    }

    pub fn selected_status(&self) -> String {
        self.inner.state.read().selected_status.clone()
    }

    pub fn selected_status_description(&self) -> String {
        self.inner.state.read().selected_status_description.clone()
    }

    /// Id of the standing push subscription, if one is registered.
    pub fn subscription_id(&self) -> Option<SubscriptionId> {
        self.inner.subscription.lock().clone()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Receiver that observes a new revision after every state mutation.
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.inner.revision.borrow()
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Whether the active account currency is a crypto currency.
    pub fn is_crypto_account(&self) -> bool {
        self.inner
            .account
            .currency()
            .map(|c| self.inner.config.is_cryptocurrency(&c))
            .unwrap_or(false)
    }

    /// Load the history and start listening for changes.
    ///
    /// No-op unless the account is a crypto account that is not mid-switch.
    /// The snapshot is applied before the subscription is registered so
    /// pushes never race the initial list. An unmount while this runs stops
    /// it before the subscription step.
    pub async fn on_mount(&self) {
        if !self.is_crypto_account() {
            tracing::debug!("Skipping crypto transactions: account currency is not crypto");
            return;
        }
        if self.inner.account.just_switched_account() {
            tracing::debug!("Skipping crypto transactions: account switch in progress");
            return;
        }

        let generation = self.generation();
        self.set_loading(true);
        self.fetch_snapshot(generation).await;
        if self.generation() != generation {
            tracing::debug!("Store unmounted during mount, not subscribing");
            return;
        }
        self.subscribe(generation).await;
        if self.generation() == generation {
            self.set_loading(false);
        }
    }

    /// Fetch the full history once and replace the list with it.
    ///
    /// Failures leave the list untouched and are only logged.
    pub async fn fetch_initial_history(&self) {
        self.fetch_snapshot(self.generation()).await;
    }

    async fn fetch_snapshot(&self, generation: u64) {
        let config = &self.inner.config;

        let response = match self
            .inner
            .transport
            .fetch_payments(config.provider, config.transaction_type)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Failed to fetch crypto transactions: {}", e);
                return;
            }
        };

        if self.generation() != generation {
            tracing::debug!("Discarding crypto transaction snapshot fetched before unmount");
            return;
        }

        match response.into_result() {
            Ok(payments) => {
                tracing::info!(
                    count = payments.crypto.len(),
                    "Loaded crypto transaction history"
                );
                self.set_history(payments.crypto);
            }
            Err(e) => tracing::warn!("Crypto transaction snapshot rejected: {}", e),
        }
    }

    /// Register the push handler for future transaction changes.
    ///
    /// A subscription already held by this store is forgotten once the new
    /// one is registered.
    pub async fn subscribe_to_updates(&self) {
        self.subscribe(self.generation()).await;
    }

    async fn subscribe(&self, generation: u64) {
        let config = &self.inner.config;

        let id = match self
            .inner
            .transport
            .subscribe_payments(
                config.provider,
                config.transaction_type,
                self.push_handler(generation),
            )
            .await
        {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("Failed to subscribe to crypto transactions: {}", e);
                return;
            }
        };

        if self.generation() != generation {
            tracing::debug!("Store unmounted while subscribing, forgetting {}", id);
            self.forget(&id).await;
            return;
        }

        tracing::debug!("Subscribed to crypto transactions: {}", id);
        let previous = self.inner.subscription.lock().replace(id);
        if let Some(previous) = previous {
            self.forget(&previous).await;
        }
    }

    fn push_handler(&self, generation: u64) -> PushHandler {
        let inner = Arc::downgrade(&self.inner);
        Arc::new(move |response: CashierPaymentsResponse| {
            let Some(inner) = inner.upgrade() else {
                return;
            };
            let store = TransactionHistoryStore { inner };
            if store.generation() != generation {
                tracing::trace!("Dropping crypto transaction push for a previous mount");
                return;
            }
            match response.into_result() {
                Ok(payments) => store.merge_transactions(payments.crypto),
                Err(e) => tracing::warn!("Dropping crypto transaction push: {}", e),
            }
        })
    }

    /// Forget the subscription and reset the view state.
    ///
    /// Pushes or responses that arrive afterwards for the old mount are ignored.
    pub async fn on_unmount(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);

        let subscription = self.inner.subscription.lock().take();
        if let Some(id) = subscription {
            self.forget(&id).await;
        }

        self.update(|s| *s = StoreState::default());
    }

    async fn forget(&self, id: &SubscriptionId) {
        if let Err(e) = self.inner.transport.forget(id).await {
            tracing::warn!("Failed to forget subscription {}: {}", id, e);
        }
    }

    // ── Transaction list ─────────────────────────────────────────────────

    /// Replace the whole list (sorted most recent first).
    pub fn set_history(&self, transactions: Vec<CryptoTransaction>) {
        self.update(|s| s.transactions.replace(transactions));
    }

    /// Merge pushed transactions into the list by id (sorted most recent first).
    pub fn merge_transactions(&self, transactions: Vec<CryptoTransaction>) {
        self.update(|s| s.transactions.merge(transactions));
    }

    /// Ask the server to cancel a pending withdrawal.
    ///
    /// On success the cancel dialog is closed and its selection cleared; the
    /// list itself is updated by the push that follows. Errors are returned
    /// untouched and leave the state as it was.
    pub async fn cancel_transaction(
        &self,
        id: &TransactionId,
    ) -> Result<CancelledWithdrawal, SdkError> {
        let response = self.inner.transport.cancel_payment(id).await?;
        let cancelled = response.into_result()?;

        tracing::info!("Cancelled crypto withdrawal {}", id);
        self.update(|s| {
            s.selected_transaction_id.clear();
            s.is_cancel_modal_visible = false;
        });
        Ok(cancelled)
    }

    // ── Dialogs and flags ────────────────────────────────────────────────

    pub fn set_selected_transaction_id(&self, id: impl Into<String>) {
        let id = id.into();
        self.update(|s| s.selected_transaction_id = id);
    }

    pub fn set_cancel_modal_visible(&self, is_visible: bool) {
        self.update(|s| s.is_cancel_modal_visible = is_visible);
    }

    pub fn show_cancel_modal(&self, id: impl Into<String>) {
        self.set_selected_transaction_id(id);
        self.set_cancel_modal_visible(true);
    }

    pub fn hide_cancel_modal(&self) {
        self.set_selected_transaction_id("");
        self.set_cancel_modal_visible(false);
    }

    pub fn set_selected_status(&self, status: impl Into<String>) {
        let status = status.into();
        self.update(|s| s.selected_status = status);
    }

    pub fn set_selected_status_description(&self, description: impl Into<String>) {
        let description = description.into();
        self.update(|s| s.selected_status_description = description);
    }

    pub fn set_status_modal_visible(&self, is_visible: bool) {
        self.update(|s| s.is_status_modal_visible = is_visible);
    }

    pub fn show_status_modal(&self, description: impl Into<String>, name: impl Into<String>) {
        self.set_selected_status_description(description);
        self.set_selected_status(name);
        self.set_status_modal_visible(true);
    }

    /// Close the status dialog. The status selection is kept.
    pub fn hide_status_modal(&self) {
        self.set_status_modal_visible(false);
    }

    pub fn set_loading(&self, is_loading: bool) {
        self.update(|s| s.is_loading = is_loading);
    }

    pub fn set_transactions_visible(&self, is_visible: bool) {
        self.update(|s| s.is_transactions_visible = is_visible);
    }
}

impl std::fmt::Debug for TransactionHistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionHistoryStore")
            .field("config", &self.inner.config)
            .field("state", &*self.inner.state.read())
            .field("subscription", &*self.inner.subscription.lock())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::AccountState;
    use crate::domain::transaction::wire::CancelResponse;
    use crate::error::TransportError;
    use crate::shared::{Provider, TransactionType};
    use async_trait::async_trait;

    /// Transport that fails every call; setters never touch it.
    struct Offline;

    #[async_trait]
    impl CashierTransport for Offline {
        async fn fetch_payments(
            &self,
            _provider: Provider,
            _transaction_type: TransactionType,
        ) -> Result<CashierPaymentsResponse, TransportError> {
            Err(TransportError::NotConnected)
        }

        async fn subscribe_payments(
            &self,
            _provider: Provider,
            _transaction_type: TransactionType,
            _on_push: PushHandler,
        ) -> Result<SubscriptionId, TransportError> {
            Err(TransportError::NotConnected)
        }

        async fn cancel_payment(&self, _id: &TransactionId) -> Result<CancelResponse, TransportError> {
            Err(TransportError::NotConnected)
        }

        async fn forget(&self, _subscription: &SubscriptionId) -> Result<(), TransportError> {
            Err(TransportError::NotConnected)
        }
    }

    fn store(currency: &str) -> TransactionHistoryStore {
        TransactionHistoryStore::builder()
            .transport(Arc::new(Offline))
            .account(Arc::new(AccountState::with_currency(currency)))
            .build()
            .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let store = store("BTC");
        assert_eq!(store.snapshot(), StoreState::default());
        assert!(store.subscription_id().is_none());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_show_and_hide_cancel_modal() {
        let store = store("BTC");
        store.show_cancel_modal("tx-42");
        assert_eq!(store.selected_transaction_id(), "tx-42");
        assert!(store.is_cancel_modal_visible());
        assert_eq!(
            store.snapshot().selected_transaction(),
            Some(TransactionId::from("tx-42"))
        );

        store.hide_cancel_modal();
        assert_eq!(store.selected_transaction_id(), "");
        assert!(!store.is_cancel_modal_visible());
        assert!(store.snapshot().selected_transaction().is_none());
    }

    #[test]
    fn test_hide_status_modal_keeps_selection() {
        let store = store("BTC");
        store.show_status_modal("Waiting for confirmations", "PENDING");
        assert!(store.is_status_modal_visible());
        assert_eq!(store.selected_status(), "PENDING");
        assert_eq!(
            store.selected_status_description(),
            "Waiting for confirmations"
        );

        store.hide_status_modal();
        assert!(!store.is_status_modal_visible());
        assert_eq!(store.selected_status(), "PENDING");
        assert_eq!(
            store.selected_status_description(),
            "Waiting for confirmations"
        );
    }

    #[test]
    fn test_both_modals_can_be_open() {
        let store = store("BTC");
        store.show_cancel_modal("a");
        store.show_status_modal("desc", "name");
        assert!(store.is_cancel_modal_visible());
        assert!(store.is_status_modal_visible());
    }

    #[test]
    fn test_setters_are_independent_and_idempotent() {
        let store = store("BTC");
        store.set_transactions_visible(true);
        store.set_transactions_visible(true);
        store.set_loading(true);
        let state = store.snapshot();
        assert!(state.is_transactions_visible);
        assert!(state.is_loading);
        assert!(!state.is_cancel_modal_visible);
        assert!(!state.is_status_modal_visible);
        assert!(state.selected_transaction_id.is_empty());
    }

    #[test]
    fn test_mutations_bump_revision() {
        let store = store("BTC");
        let rx = store.changes();
        store.set_loading(true);
        store.show_cancel_modal("a");
        // show_cancel_modal is two mutations
        assert_eq!(store.revision(), 3);
        assert!(rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_swallowed_fetch_failure_leaves_list() {
        let store = store("BTC");
        store.set_history(vec![CryptoTransaction {
            id: TransactionId::from("a"),
            submit_date: Some(1),
            ..Default::default()
        }]);

        store.on_mount().await;

        assert_eq!(store.transactions().len(), 1);
        assert!(!store.is_loading());
        assert!(store.subscription_id().is_none());
    }

    #[tokio::test]
    async fn test_cancel_transport_failure_propagates() {
        let store = store("BTC");
        store.show_cancel_modal("a");
        let result = store.cancel_transaction(&TransactionId::from("a")).await;
        assert!(matches!(
            result,
            Err(SdkError::Transport(TransportError::NotConnected))
        ));
        assert!(store.is_cancel_modal_visible());
        assert_eq!(store.selected_transaction_id(), "a");
    }
}
