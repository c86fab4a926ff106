//! Store configuration and builder.

use super::TransactionHistoryStore;
use crate::domain::account::AccountContext;
use crate::error::SdkError;
use crate::shared::currency::{self, DEFAULT_CRYPTO_CURRENCIES};
use crate::shared::{Provider, TransactionType};
use crate::transport::CashierTransport;
use std::sync::Arc;

/// What the store requests and which account currencies count as crypto.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub provider: Provider,
    pub transaction_type: TransactionType,
    pub crypto_currencies: Vec<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Crypto,
            transaction_type: TransactionType::All,
            crypto_currencies: DEFAULT_CRYPTO_CURRENCIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

impl StoreConfig {
    pub fn is_cryptocurrency(&self, code: &str) -> bool {
        currency::is_listed(code, self.crypto_currencies.iter().map(String::as_str))
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct TransactionHistoryStoreBuilder {
    transport: Option<Arc<dyn CashierTransport>>,
    account: Option<Arc<dyn AccountContext>>,
    config: StoreConfig,
}

impl TransactionHistoryStoreBuilder {
    pub fn transport(mut self, transport: Arc<dyn CashierTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn account(mut self, account: Arc<dyn AccountContext>) -> Self {
        self.account = Some(account);
        self
    }

    pub fn provider(mut self, provider: Provider) -> Self {
        self.config.provider = provider;
        self
    }

    pub fn transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.config.transaction_type = transaction_type;
        self
    }

    /// Replace the list of currency codes treated as crypto.
    pub fn crypto_currencies<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.crypto_currencies = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<TransactionHistoryStore, SdkError> {
        let transport = self
            .transport
            .ok_or_else(|| SdkError::Validation("transport is required".to_string()))?;
        let account = self
            .account
            .ok_or_else(|| SdkError::Validation("account context is required".to_string()))?;
        if self.config.crypto_currencies.is_empty() {
            return Err(SdkError::Validation(
                "crypto currency list is empty".to_string(),
            ));
        }

        Ok(TransactionHistoryStore::from_parts(
            transport,
            account,
            self.config,
        ))
    }
}
