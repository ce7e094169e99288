//! # Domain Services
//!
//! Pure hashing and derivation functions for the allocation protocol.
//! Deterministic, no I/O, no state.
//!
//! Every digest in the engine is Keccak-256 over packed bytes, matching the
//! encoding used by the offline whitelist generator.

use crate::domain::value_objects::{Address, Hash, TokenId};
use sha3::{Digest, Keccak256};

// =============================================================================
// KECCAK256 UTILITY
// =============================================================================

/// Computes the Keccak-256 hash of data.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let hash = Keccak256::digest(data);
    Hash::new(hash.into())
}

// =============================================================================
// WHITELIST LEAF & PAIR FOLDING
// =============================================================================

/// Computes the whitelist leaf digest for a (position, principal) pair.
///
/// Leaf = `keccak256(be256(position) ‖ principal)` — the position packed as a
/// 32-byte big-endian word followed by the 20-byte address, the same packed
/// encoding the offline tree builder uses.
#[must_use]
pub fn whitelist_leaf(position: u64, principal: Address) -> Hash {
    let mut data = [0u8; 52];
    data[24..32].copy_from_slice(&position.to_be_bytes());
    data[32..].copy_from_slice(principal.as_bytes());
    keccak256(&data)
}

/// Hashes two digests in canonical (sorted) order.
///
/// Sorting makes proof verification independent of left/right sibling
/// positioning inside the tree.
#[must_use]
pub fn hash_sorted_pair(a: Hash, b: Hash) -> Hash {
    let mut data = [0u8; 64];
    if a.as_bytes() <= b.as_bytes() {
        data[..32].copy_from_slice(a.as_bytes());
        data[32..].copy_from_slice(b.as_bytes());
    } else {
        data[..32].copy_from_slice(b.as_bytes());
        data[32..].copy_from_slice(a.as_bytes());
    }
    keccak256(&data)
}

// =============================================================================
// COMMIT DIGEST
// =============================================================================

/// Computes the commitment digest for a principal and secret.
///
/// Digest = `keccak256(principal ‖ secret)`. Binding the principal into the
/// digest prevents one caller from replaying another caller's commitment.
#[must_use]
pub fn commit_digest(principal: Address, secret: &[u8]) -> Hash {
    let mut data = Vec::with_capacity(20 + secret.len());
    data.extend_from_slice(principal.as_bytes());
    data.extend_from_slice(secret);
    keccak256(&data)
}

// =============================================================================
// TOKEN ID DERIVATION
// =============================================================================

/// Derives the token-id seed for a reveal.
///
/// Seed = `keccak256(principal ‖ secret ‖ entropy)` reduced into the pool.
/// The entropy term is unknowable at commit time, so a committer cannot
/// choose `secret` to target a particular identifier.
#[must_use]
pub fn token_id_seed(principal: Address, secret: &[u8], entropy: Hash, max_supply: u64) -> u64 {
    let mut data = Vec::with_capacity(20 + secret.len() + 32);
    data.extend_from_slice(principal.as_bytes());
    data.extend_from_slice(secret);
    data.extend_from_slice(entropy.as_bytes());
    reduce_to_pool(keccak256(&data), max_supply)
}

/// Derives the token-id seed for a public mint.
///
/// Public mints draw from the same pool but carry no committed secret; the
/// caller and a per-service nonce are mixed with the entropy instead.
#[must_use]
pub fn public_seed(principal: Address, nonce: u64, entropy: Hash, max_supply: u64) -> u64 {
    let mut data = [0u8; 60];
    data[..20].copy_from_slice(principal.as_bytes());
    data[20..28].copy_from_slice(&nonce.to_be_bytes());
    data[28..].copy_from_slice(entropy.as_bytes());
    reduce_to_pool(keccak256(&data), max_supply)
}

/// Deterministic collision fallback: linear probe from the seed.
///
/// Probing `(seed + probe) % max_supply` for `probe` in `0..max_supply`
/// visits every slot in the pool exactly once, so a free identifier is found
/// whenever one exists.
#[must_use]
pub fn probe_token_id(seed: u64, probe: u64, max_supply: u64) -> TokenId {
    debug_assert!(max_supply > 0);
    TokenId::new(seed.wrapping_add(probe) % max_supply)
}

fn reduce_to_pool(digest: Hash, max_supply: u64) -> u64 {
    debug_assert!(max_supply > 0);
    let mut word = [0u8; 8];
    word.copy_from_slice(&digest.as_bytes()[24..]);
    u64::from_be_bytes(word) % max_supply
}

// =============================================================================
// TESTS
// =============================================================================
