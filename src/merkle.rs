//! Binary Merkle accumulator used to derive the MultiSignature unlock hash (§4.4.5).
//!
//! Ported from the historical blake2b bracket-accumulator used for Sia v1/v2 unlock-condition
//! addressing, re-grounded on SHA-256 leaves: this subsystem's designated object hash (§6) is
//! SHA-256, not blake2b, so every leaf and node hash here goes through
//! [`crate::hash::sha256`] instead.

use crate::hash::{sha256, Hash};

const LEAF_HASH_PREFIX: [u8; 1] = [0u8];
const NODE_HASH_PREFIX: [u8; 1] = [1u8];

/// A "peak" accumulator: leaves are added one at a time, and balanced subtrees ("trees") of
/// matching height are merged as they complete. The root is well-defined for any number of
/// leaves without requiring padding to a power of two.
#[derive(Debug, PartialEq)]
pub struct Accumulator {
    trees: [Hash; 64],
    num_leaves: u64,
}

impl Default for Accumulator {
    fn default() -> Self {
        Accumulator {
            trees: [Hash::ZERO; 64],
            num_leaves: 0,
        }
    }
}

impl Accumulator {
    fn has_tree_at_height(&self, height: u64) -> bool { self.num_leaves & (1 << height) != 0 }

    pub fn add_leaf(&mut self, leaf: Hash) {
        let mut i = 0;
        let mut new_hash = leaf;
        while self.has_tree_at_height(i) {
            new_hash = hash_pair(&self.trees[i as usize], &new_hash);
            i += 1;
        }
        self.trees[i as usize] = new_hash;
        self.num_leaves += 1;
    }

    pub fn root(&self) -> Hash {
        let i = self.num_leaves.trailing_zeros() as u64;
        if i == 64 {
            return Hash::ZERO;
        }
        let mut root = self.trees[i as usize];
        for j in i + 1..64 {
            if self.has_tree_at_height(j) {
                root = hash_pair(&self.trees[j as usize], &root);
            }
        }
        root
    }
}

fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut preimage = Vec::with_capacity(1 + 32 + 32);
    preimage.extend_from_slice(&NODE_HASH_PREFIX);
    preimage.extend_from_slice(&left.0);
    preimage.extend_from_slice(&right.0);
    sha256(&preimage)
}

/// A leaf hash: `SHA-256(leaf_prefix || data)`.
pub fn leaf_hash(data: &[u8]) -> Hash {
    let mut preimage = Vec::with_capacity(1 + data.len());
    preimage.extend_from_slice(&LEAF_HASH_PREFIX);
    preimage.extend_from_slice(data);
    sha256(&preimage)
}
