//! # Allocator Service
//!
//! Wires the domain protocol to the collaborator ports: phase gating,
//! commit/reveal allocation, public minting, the guarded batch executor,
//! and the pull-payment ledger.
//!
//! ## Atomicity
//!
//! All mutable protocol state lives behind one `RwLock` and every operation
//! holds the write guard for its full duration, so operations are strictly
//! serialized: two reveals for the same claim key cannot both succeed, and
//! token-identifier allocation is globally mutually exclusive.
//!
//! ## Ordering
//!
//! State that guards single-use (claim marks, commit clears, ledger zeroing)
//! is committed before any collaborator call in the same operation.

use crate::domain::claims::ClaimTracker;
use crate::domain::entities::{AllocatorConfig, ClaimKey, CommitRecord, SalePhase};
use crate::domain::ledger::ContributionLedger;
use crate::domain::services::{commit_digest, probe_token_id, public_seed, token_id_seed};
use crate::domain::value_objects::{Address, Hash, TokenId, U256};
use crate::domain::whitelist::WhitelistVerifier;
use crate::domain::{batch, TransferCall};
use crate::errors::AllocatorError;
use crate::events::AllocationEvent;
use crate::ports::inbound::AllocatorApi;
use crate::ports::outbound::{EntropySource, TokenVault, ValueTransfer};

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

// =============================================================================
// STATISTICS
// =============================================================================

/// Operation counters for the allocator service.
#[derive(Debug, Default, Clone)]
pub struct ServiceStats {
    /// Commitments recorded (overwrites included).
    pub commits_recorded: u64,
    /// Tokens minted through reveals.
    pub tokens_revealed: u64,
    /// Tokens minted through the public gate.
    pub public_mints: u64,
    /// Guarded batches dispatched.
    pub batches_executed: u64,
    /// Ledger credits recorded.
    pub contributions_credited: u64,
    /// Withdrawals settled.
    pub withdrawals_settled: u64,
    /// Operations rejected with an error.
    pub rejected_operations: u64,
}

// =============================================================================
// PROTOCOL STATE
// =============================================================================

/// Mutable protocol state, guarded as a unit.
#[derive(Debug)]
struct AllocatorState {
    phase: SalePhase,
    commits: HashMap<Address, CommitRecord>,
    claims: ClaimTracker,
    ledger: ContributionLedger,
    /// Per-service nonce mixed into public-mint seeds.
    public_nonce: u64,
}

// =============================================================================
// SERVICE
// =============================================================================

/// The allocation engine service.
///
/// Generic over its collaborators so tests inject in-memory adapters and a
/// deterministic entropy stub.
pub struct AllocatorService<V, T, E> {
    config: AllocatorConfig,
    operator: Address,
    verifier: WhitelistVerifier,
    vault: Arc<V>,
    treasury: Arc<T>,
    entropy: E,
    state: RwLock<AllocatorState>,
    events: RwLock<Vec<AllocationEvent>>,
    stats: RwLock<ServiceStats>,
}

impl<V, T, E> AllocatorService<V, T, E>
where
    V: TokenVault,
    T: ValueTransfer,
    E: EntropySource,
{
    /// Creates a service in the `Closed` phase.
    pub fn new(
        config: AllocatorConfig,
        operator: Address,
        vault: Arc<V>,
        treasury: Arc<T>,
        entropy: E,
    ) -> Self {
        let verifier = WhitelistVerifier::new(config.whitelist_root);
        let claims = ClaimTracker::for_mode(config.claim_mode);
        Self {
            config,
            operator,
            verifier,
            vault,
            treasury,
            entropy,
            state: RwLock::new(AllocatorState {
                phase: SalePhase::Closed,
                commits: HashMap::new(),
                claims,
                ledger: ContributionLedger::new(),
                public_nonce: 0,
            }),
            events: RwLock::new(Vec::new()),
            stats: RwLock::new(ServiceStats::default()),
        }
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// The configured operator principal.
    #[must_use]
    pub fn operator(&self) -> Address {
        self.operator
    }

    /// Handle to the token vault collaborator.
    #[must_use]
    pub fn vault(&self) -> &Arc<V> {
        &self.vault
    }

    /// Handle to the payout channel collaborator.
    #[must_use]
    pub fn treasury(&self) -> &Arc<T> {
        &self.treasury
    }

    /// Drains and returns all events recorded so far.
    pub async fn drain_events(&self) -> Vec<AllocationEvent> {
        std::mem::take(&mut *self.events.write().await)
    }

    /// Current operation counters.
    pub async fn stats(&self) -> ServiceStats {
        self.stats.read().await.clone()
    }

    async fn record(&self, event: AllocationEvent) {
        self.events.write().await.push(event);
    }

    async fn reject(&self, err: AllocatorError) -> AllocatorError {
        self.stats.write().await.rejected_operations += 1;
        warn!(error = %err, "operation rejected");
        err
    }

    /// Finds the first unminted identifier reachable from `seed` by linear
    /// probing. The pool-fullness check runs first so a failing allocation
    /// leaves no state behind.
    async fn allocate_from_seed(&self, seed: u64) -> Result<TokenId, AllocatorError> {
        let cap = self.config.max_supply;
        if self.vault.minted_count().await >= cap {
            return Err(AllocatorError::SupplyExhausted { cap });
        }
        for probe in 0..cap {
            let candidate = probe_token_id(seed, probe, cap);
            if !self.vault.exists(candidate).await {
                return Ok(candidate);
            }
        }
        Err(AllocatorError::SupplyExhausted { cap })
    }

    /// Simulates the batch's transfer sequence against current vault
    /// ownership. A batch that would fail midway is rejected here, before
    /// anything dispatches.
    async fn simulate_batch(&self, transfers: &[TransferCall]) -> Result<(), AllocatorError> {
        let mut pending: HashMap<TokenId, Address> = HashMap::new();
        for call in transfers {
            let owner = match pending.get(&call.token_id) {
                Some(owner) => Some(*owner),
                None => self.vault.owner_of(call.token_id).await,
            };
            match owner {
                None => {
                    return Err(crate::errors::VaultError::UnknownToken(call.token_id).into());
                }
                Some(owner) if owner != call.from => {
                    return Err(crate::errors::VaultError::NotTokenOwner {
                        sender: call.from,
                        token_id: call.token_id,
                    }
                    .into());
                }
                Some(_) => {
                    pending.insert(call.token_id, call.to);
                }
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    async fn handle_set_phase(
        &self,
        caller: Address,
        phase: SalePhase,
    ) -> Result<(), AllocatorError> {
        if caller != self.operator {
            return Err(self.reject(AllocatorError::NotOperator).await);
        }

        let mut state = self.state.write().await;
        let previous = state.phase;
        if !previous.is_forward(phase) && previous != phase {
            // The setter stays unconditional, but a regression is worth a trace.
            warn!(%previous, next = %phase, "non-forward phase transition");
        }
        state.phase = phase;
        drop(state);

        info!(%previous, current = %phase, "sale phase changed");
        self.record(AllocationEvent::PhaseChanged {
            from: previous,
            to: phase,
        })
        .await;
        Ok(())
    }

    async fn handle_commit(
        &self,
        caller: Address,
        position: u64,
        proof: &[Hash],
        secret: &[u8],
    ) -> Result<(), AllocatorError> {
        let mut state = self.state.write().await;

        if state.phase != SalePhase::Presale {
            let current = state.phase;
            drop(state);
            return Err(self
                .reject(AllocatorError::WrongPhase {
                    required: SalePhase::Presale,
                    current,
                })
                .await);
        }
        if !self.verifier.verify(position, caller, proof) {
            drop(state);
            return Err(self.reject(AllocatorError::NotWhitelisted).await);
        }

        let key = self.config.claim_mode.key_for(position, caller);
        if state.claims.has_claimed(key) {
            drop(state);
            return Err(self.reject(AllocatorError::AlreadyClaimed).await);
        }

        let digest = commit_digest(caller, secret);
        // A later commit overwrites the caller's pending record.
        state.commits.insert(caller, CommitRecord { digest, key });
        drop(state);

        self.stats.write().await.commits_recorded += 1;
        info!(principal = %caller, %digest, "commitment recorded");
        self.record(AllocationEvent::CommitRecorded {
            principal: caller,
            digest,
        })
        .await;
        Ok(())
    }

    async fn handle_reveal(
        &self,
        caller: Address,
        secret: &[u8],
    ) -> Result<TokenId, AllocatorError> {
        let mut state = self.state.write().await;

        let record = match state.commits.get(&caller) {
            Some(record) => *record,
            None => {
                drop(state);
                return Err(self.reject(AllocatorError::NoCommitFound).await);
            }
        };
        if commit_digest(caller, secret) != record.digest {
            drop(state);
            return Err(self.reject(AllocatorError::SecretMismatch).await);
        }

        // The entropy term is drawn only now, after the commitment is
        // durably recorded, so the committer could not target an identifier.
        let entropy = self.entropy.draw();
        let seed = token_id_seed(caller, secret, entropy, self.config.max_supply);
        let token_id = match self.allocate_from_seed(seed).await {
            Ok(id) => id,
            Err(err) => {
                drop(state);
                return Err(self.reject(err).await);
            }
        };

        // Single-use guards commit before the mint: mark the key captured at
        // commit time, then clear the record.
        if let Err(err) = state.claims.mark_claimed(record.key) {
            drop(state);
            return Err(self.reject(err).await);
        }
        state.commits.remove(&caller);

        if let Err(err) = self.vault.mint(caller, token_id).await {
            // Unreachable while the write guard is held; surface as internal.
            drop(state);
            return Err(self.reject(err.into()).await);
        }
        drop(state);

        self.stats.write().await.tokens_revealed += 1;
        info!(principal = %caller, %token_id, "reveal minted token");
        self.record(AllocationEvent::TokenRevealed {
            principal: caller,
            token_id,
        })
        .await;
        Ok(token_id)
    }

    async fn handle_public_mint(
        &self,
        caller: Address,
        payment: U256,
    ) -> Result<TokenId, AllocatorError> {
        let mut state = self.state.write().await;

        if state.phase != SalePhase::Public {
            let current = state.phase;
            drop(state);
            return Err(self
                .reject(AllocatorError::WrongPhase {
                    required: SalePhase::Public,
                    current,
                })
                .await);
        }
        if payment < self.config.public_mint_fee {
            drop(state);
            return Err(self.reject(AllocatorError::InsufficientPayment).await);
        }

        let entropy = self.entropy.draw();
        let seed = public_seed(caller, state.public_nonce, entropy, self.config.max_supply);
        let token_id = match self.allocate_from_seed(seed).await {
            Ok(id) => id,
            Err(err) => {
                drop(state);
                return Err(self.reject(err).await);
            }
        };
        state.public_nonce += 1;

        if let Err(err) = self.vault.mint(caller, token_id).await {
            drop(state);
            return Err(self.reject(err.into()).await);
        }
        drop(state);

        self.stats.write().await.public_mints += 1;
        info!(principal = %caller, %token_id, %payment, "public mint");
        self.record(AllocationEvent::PublicMinted {
            principal: caller,
            token_id,
            paid: payment,
        })
        .await;
        Ok(token_id)
    }

    async fn handle_execute_batch(
        &self,
        caller: Address,
        calls: &[Vec<u8>],
    ) -> Result<(), AllocatorError> {
        // Shape validation first: selector allow-list, non-zero senders.
        let transfers = match batch::validate_batch(calls) {
            Ok(transfers) => transfers,
            Err(err) => return Err(self.reject(err).await),
        };

        // Hold the state guard across simulate + dispatch so ownership cannot
        // shift between the two.
        let state = self.state.write().await;
        if let Err(err) = self.simulate_batch(&transfers).await {
            drop(state);
            return Err(self.reject(err).await);
        }
        for call in &transfers {
            if let Err(err) = self.vault.transfer(call.from, call.to, call.token_id).await {
                // Simulation makes this unreachable.
                drop(state);
                return Err(self.reject(err.into()).await);
            }
        }
        drop(state);

        self.stats.write().await.batches_executed += 1;
        info!(principal = %caller, transfers = transfers.len(), "batch dispatched");
        self.record(AllocationEvent::BatchExecuted {
            principal: caller,
            transfers: transfers.len(),
        })
        .await;
        Ok(())
    }

    async fn handle_credit(
        &self,
        caller: Address,
        beneficiary: Address,
        payment: U256,
    ) -> Result<(), AllocatorError> {
        // The attached payment IS the credited amount; funding on behalf of
        // another principal is allowed at any phase.
        let mut state = self.state.write().await;
        state.ledger.credit(beneficiary, payment);
        drop(state);

        self.stats.write().await.contributions_credited += 1;
        info!(from = %caller, %beneficiary, amount = %payment, "contribution credited");
        self.record(AllocationEvent::ContributionCredited {
            from: caller,
            beneficiary,
            amount: payment,
        })
        .await;
        Ok(())
    }

    async fn handle_withdraw(&self, caller: Address) -> Result<U256, AllocatorError> {
        let mut state = self.state.write().await;

        // Zero the owed balance before any value leaves.
        let amount = match state.ledger.take_balance(caller) {
            Ok(amount) => amount,
            Err(err) => {
                drop(state);
                return Err(self.reject(err).await);
            }
        };

        if let Err(err) = self.treasury.pay(caller, amount).await {
            // Full-rollback policy: a refused payout restores the balance.
            state.ledger.restore(caller, amount);
            drop(state);
            return Err(self.reject(err.into()).await);
        }
        drop(state);

        self.stats.write().await.withdrawals_settled += 1;
        info!(principal = %caller, %amount, "withdrawal settled");
        self.record(AllocationEvent::WithdrawalSettled {
            principal: caller,
            amount,
        })
        .await;
        Ok(amount)
    }
}

// =============================================================================
// DRIVING PORT IMPLEMENTATION
// =============================================================================

#[async_trait]
impl<V, T, E> AllocatorApi for AllocatorService<V, T, E>
where
    V: TokenVault,
    T: ValueTransfer,
    E: EntropySource,
{
    async fn set_phase(&self, caller: Address, phase: SalePhase) -> Result<(), AllocatorError> {
        self.handle_set_phase(caller, phase).await
    }

    async fn commit(
        &self,
        caller: Address,
        position: u64,
        proof: &[Hash],
        secret: &[u8],
    ) -> Result<(), AllocatorError> {
        self.handle_commit(caller, position, proof, secret).await
    }

    async fn reveal(&self, caller: Address, secret: &[u8]) -> Result<TokenId, AllocatorError> {
        self.handle_reveal(caller, secret).await
    }

    async fn public_mint(
        &self,
        caller: Address,
        payment: U256,
    ) -> Result<TokenId, AllocatorError> {
        self.handle_public_mint(caller, payment).await
    }

    async fn execute_batch(
        &self,
        caller: Address,
        calls: &[Vec<u8>],
    ) -> Result<(), AllocatorError> {
        self.handle_execute_batch(caller, calls).await
    }

    async fn credit(
        &self,
        caller: Address,
        beneficiary: Address,
        payment: U256,
    ) -> Result<(), AllocatorError> {
        self.handle_credit(caller, beneficiary, payment).await
    }

    async fn withdraw(&self, caller: Address) -> Result<U256, AllocatorError> {
        self.handle_withdraw(caller).await
    }

    async fn committed_digest(&self, principal: Address) -> Option<Hash> {
        self.state
            .read()
            .await
            .commits
            .get(&principal)
            .map(|record| record.digest)
    }

    async fn has_claimed_principal(&self, principal: Address) -> bool {
        self.state
            .read()
            .await
            .claims
            .has_claimed(ClaimKey::Principal(principal))
    }

    async fn has_claimed_position(&self, position: u64) -> bool {
        self.state
            .read()
            .await
            .claims
            .has_claimed(ClaimKey::Position(position))
    }

    async fn phase(&self) -> SalePhase {
        self.state.read().await.phase
    }

    async fn public_mint_fee(&self) -> U256 {
        self.config.public_mint_fee
    }

    async fn contribution_balance(&self, principal: Address) -> U256 {
        self.state.read().await.ledger.balance_of(principal)
    }
}

// =============================================================================
// TEST FACTORY
// =============================================================================

/// Operator principal used by [`create_test_service`].
#[must_use]
pub fn test_operator() -> Address {
    Address::new([0xfe; 20])
}

/// Builds a service over the in-memory adapters and a fixed entropy stub.
#[must_use]
pub fn create_test_service(
    whitelist_root: Hash,
    claim_mode: crate::domain::entities::ClaimMode,
) -> AllocatorService<
    crate::adapters::InMemoryTokenVault,
    crate::adapters::InMemoryTreasury,
    crate::adapters::FixedEntropy,
> {
    let config = AllocatorConfig::new("AirdropNFT", "ADN", whitelist_root, claim_mode);
    AllocatorService::new(
        config,
        test_operator(),
        Arc::new(crate::adapters::InMemoryTokenVault::new()),
        Arc::new(crate::adapters::InMemoryTreasury::new()),
        crate::adapters::FixedEntropy::default(),
    )
}

// =============================================================================
// TESTS
// =============================================================================
