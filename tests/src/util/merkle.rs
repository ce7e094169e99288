//! # Whitelist Tree Fixture
//!
//! Builds a full Merkle tree over (position, principal) leaves with the same
//! sorted-pair folding the engine verifies against, and produces per-member
//! proofs. Odd nodes at any level are promoted unpaired.

use fairdrop_allocator::prelude::{hash_sorted_pair, whitelist_leaf, Address, Hash};

/// An offline whitelist: root plus proof material for every member.
pub struct WhitelistFixture {
    root: Hash,
    leaves: Vec<Hash>,
    members: Vec<(u64, Address)>,
}

impl WhitelistFixture {
    /// Builds a fixture whitelisting `members` at positions 0..n in order.
    /// The same address may appear at several positions.
    #[must_use]
    pub fn new(members: &[Address]) -> Self {
        assert!(!members.is_empty(), "fixture needs at least one member");
        let members: Vec<(u64, Address)> = members
            .iter()
            .enumerate()
            .map(|(position, principal)| (position as u64, *principal))
            .collect();
        let leaves: Vec<Hash> = members
            .iter()
            .map(|&(position, principal)| whitelist_leaf(position, principal))
            .collect();
        let root = Self::fold_to_root(leaves.clone());
        Self {
            root,
            leaves,
            members,
        }
    }

    /// Root of the tree.
    #[must_use]
    pub fn root(&self) -> Hash {
        self.root
    }

    /// Members as (position, principal) pairs.
    #[must_use]
    pub fn members(&self) -> &[(u64, Address)] {
        &self.members
    }

    /// Sibling path for the leaf at `position`. Levels where the node is
    /// promoted unpaired contribute no element.
    #[must_use]
    pub fn proof_for(&self, position: u64) -> Vec<Hash> {
        let mut index = position as usize;
        assert!(index < self.leaves.len(), "position outside the whitelist");

        let mut level = self.leaves.clone();
        let mut proof = Vec::new();
        while level.len() > 1 {
            let sibling = index ^ 1;
            if sibling < level.len() {
                proof.push(level[sibling]);
            }
            level = Self::next_level(&level);
            index /= 2;
        }
        proof
    }

    fn fold_to_root(mut level: Vec<Hash>) -> Hash {
        while level.len() > 1 {
            level = Self::next_level(&level);
        }
        level[0]
    }

    fn next_level(level: &[Hash]) -> Vec<Hash> {
        level
            .chunks(2)
            .map(|pair| {
                if let [left, right] = pair {
                    hash_sorted_pair(*left, *right)
                } else {
                    pair[0]
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::addr;
    use fairdrop_allocator::prelude::WhitelistVerifier;

    #[test]
    fn test_every_proof_verifies() {
        for count in 1..=8 {
            let members: Vec<Address> = (0..count).map(addr).collect();
            let fixture = WhitelistFixture::new(&members);
            let verifier = WhitelistVerifier::new(fixture.root());

            for &(position, principal) in fixture.members() {
                let proof = fixture.proof_for(position);
                assert!(
                    verifier.verify(position, principal, &proof),
                    "proof for position {position} in a {count}-leaf tree"
                );
            }
        }
    }

    #[test]
    fn test_wrong_position_or_principal_fails() {
        let fixture = WhitelistFixture::new(&[addr(1), addr(2), addr(3)]);
        let verifier = WhitelistVerifier::new(fixture.root());
        let proof = fixture.proof_for(0);

        // Right proof, wrong claimed position.
        assert!(!verifier.verify(1, addr(1), &proof));
        // Right proof, wrong principal.
        assert!(!verifier.verify(0, addr(9), &proof));
        // Position nobody holds, empty proof.
        assert!(!verifier.verify(9999, addr(9), &[]));
    }
}
