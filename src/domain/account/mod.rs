//! Account domain: the parts of the logged-in account the cashier depends on.

use parking_lot::RwLock;

/// Read access to the active account, provided by the host application.
pub trait AccountContext: Send + Sync {
    /// Currency code of the active account, `None` before login.
    fn currency(&self) -> Option<String>;

    /// True while the host is in the middle of switching accounts.
    fn just_switched_account(&self) -> bool;
}

#[derive(Debug, Default)]
struct AccountFields {
    currency: Option<String>,
    just_switched_account: bool,
}

/// Thread-safe account state the host updates as the session changes.
///
/// Share it as `Arc<AccountState>` between the host and the store.
#[derive(Debug, Default)]
pub struct AccountState {
    fields: RwLock<AccountFields>,
}

impl AccountState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_currency(currency: impl Into<String>) -> Self {
        let state = Self::new();
        state.set_currency(Some(currency.into()));
        state
    }

    pub fn set_currency(&self, currency: Option<String>) {
        self.fields.write().currency = currency;
    }

    pub fn set_just_switched_account(&self, switched: bool) {
        self.fields.write().just_switched_account = switched;
    }
}

impl AccountContext for AccountState {
    fn currency(&self) -> Option<String> {
        self.fields.read().currency.clone()
    }

    fn just_switched_account(&self) -> bool {
        self.fields.read().just_switched_account
    }
}
