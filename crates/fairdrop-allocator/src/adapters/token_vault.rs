//! # In-Memory Token Vault
//!
//! Token ownership bookkeeping for tests and single-process deployments.
//! A production deployment would adapt the real base-token capability
//! behind the same `TokenVault` port.

use crate::domain::value_objects::{Address, TokenId};
use crate::errors::VaultError;
use crate::ports::outbound::TokenVault;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory ownership book: token → owner plus per-owner enumeration.
#[derive(Debug, Default)]
pub struct InMemoryTokenVault {
    owners: RwLock<HashMap<TokenId, Address>>,
    holdings: RwLock<HashMap<Address, Vec<TokenId>>>,
}

impl InMemoryTokenVault {
    /// Creates an empty vault.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn detach(holdings: &mut HashMap<Address, Vec<TokenId>>, owner: Address, token_id: TokenId) {
        if let Some(tokens) = holdings.get_mut(&owner) {
            tokens.retain(|&id| id != token_id);
            if tokens.is_empty() {
                holdings.remove(&owner);
            }
        }
    }
}

#[async_trait]
impl TokenVault for InMemoryTokenVault {
    async fn mint(&self, owner: Address, token_id: TokenId) -> Result<(), VaultError> {
        let mut owners = self.owners.write().unwrap();
        if owners.contains_key(&token_id) {
            return Err(VaultError::TokenExists(token_id));
        }
        owners.insert(token_id, owner);
        self.holdings
            .write()
            .unwrap()
            .entry(owner)
            .or_default()
            .push(token_id);
        Ok(())
    }

    async fn exists(&self, token_id: TokenId) -> bool {
        self.owners.read().unwrap().contains_key(&token_id)
    }

    async fn transfer(
        &self,
        from: Address,
        to: Address,
        token_id: TokenId,
    ) -> Result<(), VaultError> {
        let mut owners = self.owners.write().unwrap();
        let owner = *owners
            .get(&token_id)
            .ok_or(VaultError::UnknownToken(token_id))?;
        if owner != from {
            return Err(VaultError::NotTokenOwner {
                sender: from,
                token_id,
            });
        }
        owners.insert(token_id, to);

        let mut holdings = self.holdings.write().unwrap();
        Self::detach(&mut holdings, from, token_id);
        holdings.entry(to).or_default().push(token_id);
        Ok(())
    }

    async fn owner_of(&self, token_id: TokenId) -> Option<Address> {
        self.owners.read().unwrap().get(&token_id).copied()
    }

    async fn balance_of(&self, owner: Address) -> u64 {
        self.holdings
            .read()
            .unwrap()
            .get(&owner)
            .map_or(0, |tokens| tokens.len() as u64)
    }

    async fn tokens_of(&self, owner: Address) -> Vec<TokenId> {
        self.holdings
            .read()
            .unwrap()
            .get(&owner)
            .cloned()
            .unwrap_or_default()
    }

    async fn minted_count(&self) -> u64 {
        self.owners.read().unwrap().len() as u64
    }
}

// =============================================================================
// TESTS
// =============================================================================
