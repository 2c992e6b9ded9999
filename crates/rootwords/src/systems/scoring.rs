use std::collections::HashMap;

use crate::api::types::SlotId;
use crate::core::tree::DerivationTree;

/// Deepest tree depth at which each slot has been consumed.
///
/// The root consumes every slot at depth 0, so every ring slot appears.
pub fn slot_depths(tree: &DerivationTree) -> HashMap<SlotId, usize> {
    let mut depths: HashMap<SlotId, usize> = HashMap::new();
    for (id, depth) in tree.iter() {
        let Some(node) = tree.get(id) else { continue };
        for &slot in &node.slots {
            let max = depths.entry(slot).or_insert(depth);
            *max = (*max).max(depth);
        }
    }
    depths
}

/// Weight sorted depths so the shallowest slot counts most.
///
/// With `n` depths sorted ascending, entry `i` gets weight `n - i` and the
/// score is the sum of `depth * weight`.
pub fn score_depths(depths: &[usize]) -> u64 {
    let mut sorted = depths.to_vec();
    sorted.sort_unstable();
    let count = sorted.len();
    sorted
        .iter()
        .enumerate()
        .map(|(i, &depth)| depth as u64 * (count - i) as u64)
        .sum()
}

/// Score of the whole tree. Recomputed from scratch on every call.
pub fn compute_score(tree: &DerivationTree) -> u64 {
    let depths: Vec<usize> = slot_depths(tree).into_values().collect();
    score_depths(&depths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::SessionConfig;
    use crate::api::types::IdAllocator;
    use crate::core::ring::{parse_letters, LetterRing};

    fn ring(letters: &str) -> LetterRing {
        LetterRing::new(&parse_letters(letters), &SessionConfig::default(), &mut IdAllocator::new())
    }

    fn pick(ring: &LetterRing, idx: &[usize]) -> Vec<SlotId> {
        idx.iter().map(|&i| ring.slots()[i].id).collect()
    }

    #[test]
    fn weights_favor_shallow_slots() {
        assert_eq!(score_depths(&[0, 0, 2]), 2);
        assert_eq!(score_depths(&[2, 0, 0]), 2);
        // sorted [1, 2, 3], weights [3, 2, 1]
        assert_eq!(score_depths(&[3, 1, 2]), 3 + 4 + 3);
        assert_eq!(score_depths(&[]), 0);
    }

    #[test]
    fn root_only_scores_zero() {
        let ring = ring("CAT");
        let tree = DerivationTree::new(&ring);
        assert_eq!(compute_score(&tree), 0);
        assert_eq!(slot_depths(&tree).len(), 3);
    }

    #[test]
    fn deepest_use_of_a_slot_counts() {
        let ring = ring("CAT");
        let mut tree = DerivationTree::new(&ring);
        let at = tree.insert(tree.root(), &ring, &pick(&ring, &[1, 2])).unwrap();
        tree.insert(at, &ring, &pick(&ring, &[2])).unwrap();

        let depths = slot_depths(&tree);
        assert_eq!(depths[&ring.slots()[0].id], 0);
        assert_eq!(depths[&ring.slots()[1].id], 1);
        assert_eq!(depths[&ring.slots()[2].id], 2);
        // sorted [0, 1, 2], weights [3, 2, 1]
        assert_eq!(compute_score(&tree), 2 + 2);
    }

    #[test]
    fn two_shallow_slots_one_deep() {
        let ring = ring("CAT");
        let mut tree = DerivationTree::new(&ring);
        let a = tree.insert(tree.root(), &ring, &pick(&ring, &[2])).unwrap();
        tree.insert(a, &ring, &pick(&ring, &[2])).unwrap();
        assert_eq!(compute_score(&tree), 2);
    }

    #[test]
    fn score_is_idempotent() {
        let ring = ring("STONE");
        let mut tree = DerivationTree::new(&ring);
        let a = tree.insert(tree.root(), &ring, &pick(&ring, &[1, 2, 3, 4, 0])).unwrap();
        tree.insert(a, &ring, &pick(&ring, &[2, 3, 4])).unwrap();
        assert_eq!(compute_score(&tree), compute_score(&tree));
    }
}
