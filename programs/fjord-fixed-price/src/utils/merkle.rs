use anchor_lang::prelude::Pubkey;
use solana_program::keccak;

pub const EMPTY_ROOT: [u8; 32] = [0u8; 32];

/// Walks `proof` from `leaf` to a root, hashing each pair in sorted order so
/// proofs carry no left/right flags.
pub fn merkle_verify(proof: &[[u8; 32]], root: &[u8; 32], leaf: &[u8; 32]) -> bool {
    let computed = proof.iter().fold(*leaf, |node, sibling| {
        if node <= *sibling {
            keccak::hashv(&[&node, sibling]).0
        } else {
            keccak::hashv(&[sibling, &node]).0
        }
    });
    computed == *root
}

/// Leaf of the allow list tree. Off-chain proof generators must hash the raw
/// 32 key bytes the same way.
pub fn allow_list_leaf(account: &Pubkey) -> [u8; 32] {
    keccak::hash(account.as_ref()).0
}

/// An all-zero root disables the allow list and the proof is never read.
pub fn verify_allow_list(root: &[u8; 32], account: &Pubkey, proof: &[[u8; 32]]) -> bool {
    if *root == EMPTY_ROOT {
        return true;
    }
    merkle_verify(proof, root, &allow_list_leaf(account))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash_pair(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
        if a <= b {
            keccak::hashv(&[a, b]).0
        } else {
            keccak::hashv(&[b, a]).0
        }
    }

    #[test]
    fn two_leaf_tree_verifies_both_members() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let (leaf_a, leaf_b) = (allow_list_leaf(&a), allow_list_leaf(&b));
        let root = hash_pair(&leaf_a, &leaf_b);

        assert!(merkle_verify(&[leaf_b], &root, &leaf_a));
        assert!(merkle_verify(&[leaf_a], &root, &leaf_b));
        assert!(verify_allow_list(&root, &a, &[leaf_b]));
        assert!(verify_allow_list(&root, &b, &[leaf_a]));
    }

    #[test]
    fn unlisted_account_is_rejected() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let c = Pubkey::new_unique();
        let (leaf_a, leaf_b) = (allow_list_leaf(&a), allow_list_leaf(&b));
        let root = hash_pair(&leaf_a, &leaf_b);

        assert!(!verify_allow_list(&root, &c, &[leaf_b]));
        assert!(!verify_allow_list(&root, &c, &[leaf_a]));
        assert!(!verify_allow_list(&root, &c, &[]));
    }

    #[test]
    fn pair_order_is_by_value_not_position() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let (leaf_a, leaf_b) = (allow_list_leaf(&a), allow_list_leaf(&b));
        let (lo, hi) = if leaf_a <= leaf_b { (leaf_a, leaf_b) } else { (leaf_b, leaf_a) };
        let positional_root = keccak::hashv(&[&hi, &lo]).0;

        assert!(!merkle_verify(&[hi], &positional_root, &lo));
    }

    #[test]
    fn four_leaf_tree_verifies_deep_proof() {
        let keys: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();
        let leaves: Vec<[u8; 32]> = keys.iter().map(allow_list_leaf).collect();
        let left = hash_pair(&leaves[0], &leaves[1]);
        let right = hash_pair(&leaves[2], &leaves[3]);
        let root = hash_pair(&left, &right);

        assert!(verify_allow_list(&root, &keys[2], &[leaves[3], left]));
        assert!(!verify_allow_list(&root, &keys[2], &[leaves[1], left]));
    }

    #[test]
    fn empty_root_admits_everyone() {
        let anyone = Pubkey::new_unique();
        assert!(verify_allow_list(&EMPTY_ROOT, &anyone, &[]));
        assert!(verify_allow_list(&EMPTY_ROOT, &anyone, &[[7u8; 32]]));
    }
}
