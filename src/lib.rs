//! # Cashier SDK
//!
//! View-state store for the cashier's crypto transaction history.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core**: Shared newtypes, transaction domain model, wire types, list state
//! 2. **Wire**: Request/response envelopes of the cashier messaging API
//! 3. **Transport**: `CashierTransport`, the seam to the host's connection
//! 4. **Store**: `TransactionHistoryStore` with mount/unmount lifecycle,
//!    push merging, cancellation and dialog state
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cashier_sdk::prelude::*;
//!
//! let account = Arc::new(AccountState::with_currency("BTC"));
//! let store = TransactionHistoryStore::builder()
//!     .transport(my_transport)
//!     .account(account)
//!     .build()?;
//!
//! store.on_mount().await;
//! for tx in store.transactions() {
//!     println!("{} {} {}", tx.id, tx.amount, tx.status_code);
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified SDK error types.
pub mod error;

// ── Layer 2: Wire ────────────────────────────────────────────────────────────

/// Messaging API envelopes: requests, responses, subscriptions.
pub mod ws;

// ── Layer 3: Transport ───────────────────────────────────────────────────────

/// Transport trait implemented by the host.
pub mod transport;

// ── Layer 4: Store ───────────────────────────────────────────────────────────

/// `TransactionHistoryStore`: the primary entry point.
pub mod store;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{
        is_cryptocurrency, Provider, SubscriptionId, TransactionId, TransactionType,
    };

    // Domain types
    pub use crate::domain::account::{AccountContext, AccountState};
    pub use crate::domain::transaction::wire::{
        CancelResponse, CancelledWithdrawal, CashierPayments, CashierPaymentsResponse,
        CryptoTransaction,
    };
    pub use crate::domain::transaction::{TransactionHistory, TransactionItem};

    // Errors
    pub use crate::error::{SdkError, ServerError, TransportError};

    // Wire envelopes
    pub use crate::ws::{Kind, MessageIn, MessageOut, SubscriptionInfo};

    // Transport
    pub use crate::transport::{CashierTransport, PushHandler};

    // Store
    pub use crate::store::{
        StoreConfig, StoreState, TransactionHistoryStore, TransactionHistoryStoreBuilder,
    };
}
