//! # Guarded Batch Calls
//!
//! Codec and validation for the restricted batch-execution path. Batched
//! calls are ABI-shaped byte strings (4-byte selector followed by 32-byte
//! words); the guard recognizes exactly one operation shape — the token
//! transfer — and rejects everything else before any dispatch.
//!
//! Restricting the batch to a single known-safe shape removes the
//! privilege-escalation surface of a generic delegated multicall while still
//! offering the convenience primitive.

use crate::domain::services::keccak256;
use crate::domain::value_objects::{Address, TokenId};
use crate::errors::AllocatorError;

/// Selector of the ownership-transfer entry point,
/// `transferFrom(address,address,uint256)`.
pub const TRANSFER_FROM_SELECTOR: [u8; 4] = [0x23, 0xb8, 0x72, 0xdd];

/// Encoded call length: selector + three 32-byte words.
pub const TRANSFER_CALL_LEN: usize = 4 + 3 * 32;

/// Computes the 4-byte selector for an operation signature.
#[must_use]
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = keccak256(signature.as_bytes());
    let mut sel = [0u8; 4];
    sel.copy_from_slice(&digest.as_bytes()[..4]);
    sel
}

/// A decoded, validated transfer call ready for dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferCall {
    /// Current owner the token moves from. Never zero.
    pub from: Address,
    /// Recipient.
    pub to: Address,
    /// Token being transferred.
    pub token_id: TokenId,
}

/// Encodes a transfer call in the batch wire shape.
#[must_use]
pub fn encode_transfer_from(from: Address, to: Address, token_id: TokenId) -> Vec<u8> {
    let mut data = Vec::with_capacity(TRANSFER_CALL_LEN);
    data.extend_from_slice(&TRANSFER_FROM_SELECTOR);
    data.extend_from_slice(&encode_address_word(from));
    data.extend_from_slice(&encode_address_word(to));
    data.extend_from_slice(&encode_u64_word(token_id.value()));
    data
}

/// Encodes a fee-paying mint call. Not transferable through the guard; used
/// by callers (and tests) exercising the rejection path.
#[must_use]
pub fn encode_public_mint() -> Vec<u8> {
    selector("publicMint()").to_vec()
}

/// Validates one encoded call against the allow-list.
///
/// # Errors
///
/// - `DisallowedOperation` — the selector is not the transfer selector, or
///   the call body is not a well-formed transfer encoding.
/// - `ZeroSender` — the decoded sender is the zero address.
pub fn validate_call(data: &[u8]) -> Result<TransferCall, AllocatorError> {
    if data.len() < 4 || data[..4] != TRANSFER_FROM_SELECTOR {
        return Err(AllocatorError::DisallowedOperation);
    }
    if data.len() != TRANSFER_CALL_LEN {
        return Err(AllocatorError::DisallowedOperation);
    }

    let from = decode_address_word(&data[4..36]).ok_or(AllocatorError::DisallowedOperation)?;
    let to = decode_address_word(&data[36..68]).ok_or(AllocatorError::DisallowedOperation)?;
    let token_id = decode_u64_word(&data[68..100]).ok_or(AllocatorError::DisallowedOperation)?;

    if from.is_zero() {
        return Err(AllocatorError::ZeroSender);
    }

    Ok(TransferCall {
        from,
        to,
        token_id: TokenId::new(token_id),
    })
}

/// Validates every call in a batch before anything dispatches.
///
/// # Errors
///
/// Propagates the first `validate_call` failure; a batch with any invalid
/// call yields no decoded transfers at all.
pub fn validate_batch(calls: &[Vec<u8>]) -> Result<Vec<TransferCall>, AllocatorError> {
    calls.iter().map(|call| validate_call(call)).collect()
}

fn encode_address_word(addr: Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(addr.as_bytes());
    word
}

fn decode_address_word(word: &[u8]) -> Option<Address> {
    // Left padding must be zero for a well-formed address word.
    if word[..12].iter().any(|&b| b != 0) {
        return None;
    }
    Address::from_slice(&word[12..])
}

fn encode_u64_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

fn decode_u64_word(word: &[u8]) -> Option<u64> {
    if word[..24].iter().any(|&b| b != 0) {
        return None;
    }
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&word[24..]);
    Some(u64::from_be_bytes(bytes))
}

// =============================================================================
// TESTS
// =============================================================================
